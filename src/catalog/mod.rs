//! Static catalogs: scenes, themes and camera brands.

mod scenes;
mod themes;

pub use scenes::{find_scene, scenes, Scene};
pub use themes::{find_theme, themes, CssVariables, Theme, ThemeController, ThemeSink};

/// Camera brands offered for selection.
pub const BRANDS: [crate::types::Brand; 6] = crate::types::Brand::ALL;
