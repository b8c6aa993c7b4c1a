use serde::Deserialize;
use tracing::{debug, warn};
use watchlog_models::MediaKind;

use crate::client::{strip_code_fence, AiClient};

const METADATA_SYSTEM_PROMPT: &str = "你是影视资料助手。根据片名返回一个 JSON 对象，\
字段为: title (规范片名), year (字符串), country (国家/地区, 多个用/分隔), \
genre (类型, 多个用逗号分隔), director (导演或主创), summary (一句话简介), \
color (适合做卡片背景的十六进制颜色), media_kind (\"movie\" 或 \"series\"), \
total_episodes (电视剧总集数, 数字, 电影为 null), \
duration_minutes (电影总时长或电视剧单集时长, 分钟数)。只返回 JSON，不要其他文字。";

/// Structured metadata suggested for a title. Every field is optional; the
/// caller only fills form fields that are still empty.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaMetadata {
    pub title: Option<String>,
    pub year: Option<String>,
    pub country: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub summary: Option<String>,
    pub color: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub total_episodes: Option<u32>,
    pub duration_minutes: Option<u32>,
}

/// Look up metadata for a title. Missing credential, transport failure, or a
/// non-conforming reply all yield `None`; the caller leaves its fields alone.
pub async fn fetch_metadata(client: &AiClient, title: &str) -> Option<MediaMetadata> {
    if !client.has_api_key() {
        debug!("No API key configured, skipping metadata fetch");
        return None;
    }

    let reply = match client.complete(METADATA_SYSTEM_PROMPT, title).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Metadata fetch for '{}' failed: {}", title, e);
            return None;
        }
    };

    match serde_json::from_str::<MediaMetadata>(strip_code_fence(&reply)) {
        Ok(metadata) => {
            debug!(title = %title, "Fetched metadata");
            Some(metadata)
        }
        Err(e) => {
            warn!("Metadata reply for '{}' was not valid JSON: {}", title, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_parses_partial_reply() {
        let reply = r#"{"title": "盗梦空间", "year": "2010", "media_kind": "movie"}"#;
        let metadata: MediaMetadata = serde_json::from_str(reply).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("盗梦空间"));
        assert_eq!(metadata.media_kind, Some(MediaKind::Movie));
        assert!(metadata.genre.is_none());
    }

    #[tokio::test]
    async fn test_fetch_without_key_degrades_to_none() {
        let client = AiClient::new("https://api.example.com/v1".to_string(), "m".to_string(), None);
        assert_eq!(fetch_metadata(&client, "盗梦空间").await, None);
    }
}
