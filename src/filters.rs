//! Non-destructive filter configuration.
//!
//! The engine never touches pixels: a [`FiltersState`] is an opaque value
//! forwarded to the external filter processor. Only its identity matters
//! here: it participates in snapshot equality and history, nothing else.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Per-filter enable flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToggles {
    pub blur: bool,
    pub brighten: bool,
    pub brightness: bool,
    pub contrast: bool,
    pub emboss: bool,
    pub enhance: bool,
    pub grayscale: bool,
    pub hsl: bool,
    pub hsv: bool,
    pub invert: bool,
    pub noise: bool,
    pub pixelate: bool,
    pub posterize: bool,
    pub rgb: bool,
    pub rgba: bool,
    pub sepia: bool,
    pub solarize: bool,
    pub threshold: bool,
    pub mask: bool,
}

/// Light direction for the emboss filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbossDirection {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// The full filter configuration for one object: enable flags plus the
/// numeric/enum parameters each filter reads when enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiltersState {
    pub enabled: FilterToggles,
    /// Blur radius in pixels
    pub blur_radius: f32,
    /// Shared slider for the additive/multiplicative brightness filters
    pub brightness: f32,
    /// Typical range -100..100
    pub contrast: f32,
    /// 0..1
    pub emboss_strength: f32,
    /// 0..1
    pub emboss_white_level: f32,
    pub emboss_direction: EmbossDirection,
    pub emboss_blend: bool,
    /// 0..1
    pub enhance: f32,
    /// Degrees, -180..180
    pub hue: f32,
    pub saturation: f32,
    pub luminance: f32,
    /// 0..255 for HSV value
    pub value: f32,
    /// 0..1
    pub noise: f32,
    /// >= 1
    pub pixel_size: f32,
    /// 0..1, normalized posterize levels
    pub levels: f32,
    /// 0..255
    pub red: f32,
    /// 0..255
    pub green: f32,
    /// 0..255
    pub blue: f32,
    /// 0..1
    pub alpha: f32,
    /// 0..1
    pub threshold: f32,
    /// 0..255
    pub mask_threshold: f32,
}

impl Default for FiltersState {
    fn default() -> Self {
        Self {
            enabled: FilterToggles::default(),
            blur_radius: 0.0,
            brightness: 0.0,
            contrast: 0.0,
            emboss_strength: 0.5,
            emboss_white_level: 0.5,
            emboss_direction: EmbossDirection::TopLeft,
            emboss_blend: true,
            enhance: 0.0,
            hue: 0.0,
            saturation: 0.0,
            luminance: 0.0,
            value: 0.0,
            noise: 0.0,
            pixel_size: 1.0,
            levels: 0.5,
            red: 255.0,
            green: 255.0,
            blue: 255.0,
            alpha: 1.0,
            threshold: 0.5,
            mask_threshold: 128.0,
        }
    }
}

/// Shared default instance, used when seeding objects and history baselines.
pub static DEFAULT_FILTERS: Lazy<FiltersState> = Lazy::new(FiltersState::default);

impl FiltersState {
    /// True when no filter is enabled and every parameter is at its default.
    pub fn is_default(&self) -> bool {
        *self == *DEFAULT_FILTERS
    }
}
