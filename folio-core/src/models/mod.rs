mod hero;
mod portfolio;
mod section;
mod theme;

pub use hero::{HeroBlock, HeroPatch};
pub use portfolio::{is_valid_slug, FeatureBlocks, Layout, Portfolio, PortfolioPatch, Visibility};
pub use section::{
    fresh_section_id, ContentItem, ContentShape, Section, SectionContent, SectionKind,
    SectionPatch,
};
pub use theme::{
    ContainerWidth, Spacing, ThemeColors, ThemeDescriptor, ThemePatch, ThemeStyles, Typography,
    CUSTOM_THEME,
};
