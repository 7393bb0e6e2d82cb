//! Theme presets and resolution.
//!
//! A stored theme may be a bare preset name, a partial object, or a fully
//! specified custom theme. Resolution always produces a complete
//! [`ThemeDescriptor`](crate::models::ThemeDescriptor).

mod presets;
mod resolve;

pub use presets::{default_theme, find_preset, ThemePreset, DEFAULT_PRESET, PRESETS};
pub use resolve::{
    apply_theme_patch, canonical_name, resolve_theme, ColorOverrides, FontOverrides,
    StyleOverrides, ThemeInput,
};
