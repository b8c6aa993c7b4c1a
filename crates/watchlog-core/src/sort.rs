use std::cmp::Ordering;
use watchlog_models::WatchRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Watched date
    #[default]
    CreatedAt,
    Rating,
    /// Best-effort integer parse of the free-form year text
    Year,
    /// Case-folded title text
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

/// Sort records by the selected key.
///
/// Descending order is produced by sorting ascending and reversing the result,
/// NOT by inverting the comparator. The stable ascending sort keeps equal keys
/// in input order, so a descending sort is the exact reverse of the ascending
/// one, tie order included. Callers relying on tie order must not change this.
pub fn sort_records(records: &mut [WatchRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| compare(a, b, key));
    if direction == SortDirection::Descending {
        records.reverse();
    }
}

fn compare(a: &WatchRecord, b: &WatchRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
        SortKey::Year => parse_year(&a.year).cmp(&parse_year(&b.year)),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Leading-digit integer parse; non-numeric text compares as 0
pub fn parse_year(text: &str) -> i32 {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_models::{MediaKind, WatchStatus};

    fn record(title: &str, year: &str, rating: f32) -> WatchRecord {
        let mut r = WatchRecord::new(title, WatchStatus::Watched, MediaKind::Movie);
        r.year = year.to_string();
        r.rating = rating;
        r
    }

    #[test]
    fn test_parse_year_best_effort() {
        assert_eq!(parse_year("1994"), 1994);
        assert_eq!(parse_year("2021-2023"), 2021);
        assert_eq!(parse_year("未知"), 0);
        assert_eq!(parse_year(""), 0);
    }

    #[test]
    fn test_sort_by_year_treats_non_numeric_as_zero() {
        let mut records = vec![record("a", "2020", 0.0), record("b", "未知", 0.0), record("c", "1999", 0.0)];
        sort_records(&mut records, SortKey::Year, SortDirection::Ascending);
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive() {
        let mut records = vec![record("banana", "", 0.0), record("Apple", "", 0.0)];
        sort_records(&mut records, SortKey::Title, SortDirection::Ascending);
        assert_eq!(records[0].title, "Apple");
    }

    #[test]
    fn test_descending_is_reverse_of_ascending_including_ties() {
        // Three records share a rating; the descending sort must be the exact
        // reverse of the ascending sort, equal-rating order included.
        let records = vec![
            record("a", "", 3.0),
            record("b", "", 3.0),
            record("c", "", 5.0),
            record("d", "", 3.0),
            record("e", "", 1.0),
        ];

        let mut ascending = records.clone();
        sort_records(&mut ascending, SortKey::Rating, SortDirection::Ascending);

        let mut descending = records;
        sort_records(&mut descending, SortKey::Rating, SortDirection::Descending);

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);

        // Stable ascending sort keeps ties in input order
        let asc_titles: Vec<&str> = ascending.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(asc_titles, ["e", "a", "b", "d", "c"]);
        let desc_titles: Vec<&str> = descending.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(desc_titles, ["c", "d", "b", "a", "e"]);
    }
}
