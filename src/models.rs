use serde::{Deserialize, Serialize};

/// Kind of media a status carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// Upper-case label used on card badges
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::Image => "jpg",
            MediaType::Video => "mp4",
        }
    }
}

/// A single media item, either available to browse or already saved.
///
/// Only `is_saved` changes over the lifetime of a status; everything else is
/// fixed when discovery produces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub media_type: MediaType,
    /// Low-resolution preview locator
    pub thumbnail: String,
    /// Full-resolution media locator
    pub full_url: String,
    pub file_name: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Size in bytes
    pub size: u64,
    #[serde(default)]
    pub is_saved: bool,
}

impl Status {
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    /// Copy of this status with the saved flag set to `saved`
    pub fn with_saved(&self, saved: bool) -> Status {
        Status {
            is_saved: saved,
            ..self.clone()
        }
    }
}

/// Color theme preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Theme::Light => "Light mode",
            Theme::Dark => "Dark mode",
            Theme::System => "Follow system setting",
        }
    }

    /// Resolve `System` against the terminal's reported background.
    ///
    /// `COLORFGBG` is `"<fg>;<bg>"`; background colors 7 and 15 are light.
    pub fn resolve(&self, colorfgbg: Option<&str>) -> Theme {
        match self {
            Theme::System => {
                let light_bg = colorfgbg
                    .and_then(|v| v.rsplit(';').next())
                    .and_then(|bg| bg.trim().parse::<u8>().ok())
                    .map(|bg| bg == 7 || bg == 15)
                    .unwrap_or(false);
                if light_bg {
                    Theme::Light
                } else {
                    Theme::Dark
                }
            }
            other => *other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Status {
        Status {
            id: "status-1".into(),
            media_type: MediaType::Video,
            thumbnail: "thumb".into(),
            full_url: "full".into(),
            file_name: "status_1.mp4".into(),
            timestamp: 1_700_000_000_000,
            size: 1024,
            is_saved: false,
        }
    }

    #[test]
    fn test_with_saved_keeps_other_fields() {
        let status = sample();
        let saved = status.with_saved(true);
        assert!(saved.is_saved);
        assert_eq!(saved.id, status.id);
        assert_eq!(saved.size, status.size);
        assert_eq!(saved.timestamp, status.timestamp);
        assert!(!status.is_saved);
    }

    #[test]
    fn test_theme_resolve_system() {
        assert_eq!(Theme::System.resolve(Some("0;15")), Theme::Light);
        assert_eq!(Theme::System.resolve(Some("15;0")), Theme::Dark);
        assert_eq!(Theme::System.resolve(None), Theme::Dark);
        assert_eq!(Theme::Light.resolve(Some("15;0")), Theme::Light);
    }

    #[test]
    fn test_theme_yaml_names() {
        let yaml = serde_yaml::to_string(&Theme::Dark).unwrap();
        assert_eq!(yaml.trim(), "dark");
        let parsed: Theme = serde_yaml::from_str("light").unwrap();
        assert_eq!(parsed, Theme::Light);
    }
}
