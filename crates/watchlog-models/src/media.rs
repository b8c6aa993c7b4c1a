use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// Localized label used in the CSV export (媒体类型 column)
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "电影",
            MediaKind::Series => "电视剧",
        }
    }

    /// Map an export label or internal name back to the kind.
    /// Anything unrecognized falls back to Movie.
    pub fn from_label(s: &str) -> MediaKind {
        match s.trim() {
            "电视剧" | "series" | "tv" | "show" => MediaKind::Series,
            _ => MediaKind::Movie,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "series" | "tv" => Ok(MediaKind::Series),
            other => Err(format!("Invalid media kind: {}. Use 'movie' or 'series'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        assert_eq!(MediaKind::from_label(MediaKind::Movie.label()), MediaKind::Movie);
        assert_eq!(MediaKind::from_label(MediaKind::Series.label()), MediaKind::Series);
    }

    #[test]
    fn test_unknown_label_defaults_to_movie() {
        assert_eq!(MediaKind::from_label("纪录片"), MediaKind::Movie);
    }
}
