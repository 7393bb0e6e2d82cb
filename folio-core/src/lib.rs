//! Folio Core Library
//!
//! Document model, editing engine and persistence scheduling for Folio
//! portfolios.
//!
//! A portfolio is edited through an [`EditSession`]: mutations apply to the
//! in-memory document immediately, and the session's persistence scheduler
//! coalesces bursts of edits into a single full-snapshot write to a
//! [`DocumentStore`].

pub mod editor;
pub mod models;
pub mod persistence;
pub mod schema;
pub mod session;
pub mod store;
pub mod theme;

pub use editor::Editor;
pub use models::{
    ContentItem, ContentShape, FeatureBlocks, HeroBlock, HeroPatch, Layout, Portfolio,
    PortfolioPatch, Section, SectionContent, SectionKind, SectionPatch, ThemeDescriptor,
    ThemePatch, Visibility,
};
pub use persistence::{SaveState, SaveStatus, SchedulerConfig};
pub use schema::{to_editable, to_persisted, PersistedPortfolio};
pub use session::{EditSession, SessionError};
pub use store::{DocumentStore, FileStore, HttpStore, MemoryStore, PersistReceipt, StoreError};
pub use theme::{resolve_theme, ThemeInput, PRESETS};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
