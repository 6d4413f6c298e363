//! Slideshow playback settings edited from the admin panel.

use serde::{Deserialize, Serialize};

/// Upper bound for the cross-fade duration, in milliseconds.
pub const MAX_BLEND: u16 = 1000;
/// Upper bound for the time each image stays on screen, in seconds.
pub const MAX_SPEED: u16 = 180;

/// Settings saved through `/save-settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideshowSettings {
    /// Album the slideshow plays, without the storage root segment.
    #[serde(default = "default_album")]
    pub album: String,
    #[serde(default = "default_true", alias = "is_enabled")]
    pub is_enabled: bool,
    #[serde(default = "default_blend")]
    pub blend: u16,
    #[serde(default = "default_speed")]
    pub speed: u16,
    #[serde(default)]
    pub randomize: bool,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            album: default_album(),
            is_enabled: true,
            blend: default_blend(),
            speed: default_speed(),
            randomize: false,
        }
    }
}

impl SlideshowSettings {
    /// Builds settings from raw form values, clamping out-of-range numbers.
    ///
    /// `is_enabled` follows the form's select: any value of 1 or more
    /// enables the slideshow.
    pub fn from_form(album: &str, is_enabled: i64, blend: i64, speed: i64, randomize: bool) -> Self {
        Self {
            album: album.trim().to_string(),
            is_enabled: is_enabled.min(1) == 1,
            blend: blend.clamp(0, i64::from(MAX_BLEND)) as u16,
            speed: speed.clamp(0, i64::from(MAX_SPEED)) as u16,
            randomize,
        }
    }
}

fn default_album() -> String {
    "Shared".to_string()
}

fn default_true() -> bool {
    true
}

fn default_blend() -> u16 {
    250
}

fn default_speed() -> u16 {
    30
}
