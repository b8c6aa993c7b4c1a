//! Tag lists serialized as delimited text.
//!
//! Genre and country fields hold multiple values joined by ad hoc separators
//! (半角/全角 comma, enumeration comma, slash, whitespace). All splitting goes
//! through here so the separator set stays in one place.

/// Separators recognized inside multi-value fields, besides whitespace
pub const TAG_SEPARATORS: [char; 4] = [',', '，', '、', '/'];

/// Split a delimited multi-value field into trimmed, non-empty tags
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || TAG_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_ascii_comma() {
        assert_eq!(split_tags("科幻,剧情"), vec!["科幻", "剧情"]);
    }

    #[test]
    fn test_split_on_mixed_separators() {
        assert_eq!(
            split_tags("科幻，剧情、悬疑/动作 冒险"),
            vec!["科幻", "剧情", "悬疑", "动作", "冒险"]
        );
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ，、/ ").is_empty());
    }
}
