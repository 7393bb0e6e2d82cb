//! Schema translation between the stored and editable representations.
//!
//! Both directions are pure functions. `to_editable(to_persisted(doc))`
//! returns `doc` for every field the wire format can carry; disabled
//! sections are the one thing the wire format cannot carry.

mod extract;
mod persisted;
mod translate;

pub use extract::{coerce, extract_content, locate_content, ExtractionStrategy, STRATEGIES};
pub use persisted::{PersistedHero, PersistedPortfolio, PersistedSection, PersistedTheme};
pub use translate::{to_editable, to_persisted};
