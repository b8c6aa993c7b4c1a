use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::media::MediaKind;
use crate::status::WatchStatus;

/// Fallback card colors used when a record has no poster
const COLOR_PALETTE: [&str; 8] = [
    "#e74c3c", "#e67e22", "#f1c40f", "#2ecc71", "#1abc9c", "#3498db", "#9b59b6", "#34495e",
];

/// One watch-log entry (a movie, or one watch of a series)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchRecord {
    pub id: String,
    pub title: String,
    /// Free-form year text; may be non-numeric ("2021-2023", "未知")
    #[serde(default)]
    pub year: String,
    /// Optional multi-value text ("美国/英国")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Multi-value text split on the fixed tag separators ("科幻,剧情")
    #[serde(default)]
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// 0.0 means unrated; otherwise within [0.5, 5.0]
    #[serde(default)]
    pub rating: f32,
    pub status: WatchStatus,
    #[serde(default)]
    pub review: String,
    /// Display color fallback when no poster is set
    #[serde(default)]
    pub color: String,
    /// Embedded poster image as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub media_kind: MediaKind,
    /// Series only: last episode watched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_episode: Option<u32>,
    /// Series only: total episode count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
    /// Movie: total runtime; series: per-episode runtime
    #[serde(default)]
    pub duration_minutes: u32,
    /// User-chosen watched date, editable after creation
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WatchRecord {
    /// Create a fresh record with a minted identity and both timestamps set to now
    pub fn new(title: impl Into<String>, status: WatchStatus, media_kind: MediaKind) -> Self {
        let title = title.into();
        let now = Utc::now();
        let color = pick_color(&title).to_string();
        Self {
            id: mint_id(),
            title,
            year: String::new(),
            country: None,
            genre: String::new(),
            director: None,
            rating: 0.0,
            status,
            review: String::new(),
            color,
            poster: None,
            media_kind,
            current_episode: None,
            total_episodes: None,
            duration_minutes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_series(&self) -> bool {
        self.media_kind == MediaKind::Series
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0.0
    }

    /// Clamp the rating into the valid [0, 5] domain
    pub fn set_rating(&mut self, rating: f32) {
        self.rating = rating.clamp(0.0, 5.0);
    }
}

/// Mint a new opaque record identity
pub fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

/// Pick a deterministic fallback color for a title
pub fn pick_color(title: &str) -> &'static str {
    let hash: usize = title.bytes().fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    COLOR_PALETTE[hash % COLOR_PALETTE.len()]
}
