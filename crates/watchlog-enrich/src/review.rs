use tracing::warn;
use watchlog_models::MediaKind;

use crate::client::AiClient;

/// Shown when the collaborator cannot produce a review
pub const FALLBACK_REVIEW: &str = "这部作品值得一看，留下了不错的印象。";

const REVIEW_SYSTEM_PROMPT: &str = "你是影评助手。根据片名、评分和媒体类型，\
写一段 50 字以内的中文短评，语气自然，不要剧透。只返回短评文字。";

/// Generate a short review. Any failure yields the fixed fallback text.
pub async fn generate_review(client: &AiClient, title: &str, rating: f32, kind: MediaKind) -> String {
    let prompt = format!("片名: {}，评分: {}/5，类型: {}", title, rating, kind.label());

    match client.complete(REVIEW_SYSTEM_PROMPT, &prompt).await {
        Ok(review) => {
            let review = review.trim().to_string();
            if review.is_empty() {
                FALLBACK_REVIEW.to_string()
            } else {
                review
            }
        }
        Err(e) => {
            warn!("Review generation for '{}' failed: {}", title, e);
            FALLBACK_REVIEW.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_falls_back_to_fixed_text() {
        let client = AiClient::new("https://api.example.com/v1".to_string(), "m".to_string(), None);
        let review = generate_review(&client, "盗梦空间", 5.0, MediaKind::Movie).await;
        assert_eq!(review, FALLBACK_REVIEW);
    }
}
