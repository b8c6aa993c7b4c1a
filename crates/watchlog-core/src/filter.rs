use chrono::{DateTime, Datelike, Duration, Local, Utc};
use watchlog_models::{WatchRecord, WatchStatus};

use crate::fuzzy::fuzzy_match;

/// Date-range selector applied to the record's watched date (local calendar
/// for year/month buckets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    /// Watched within the last N days
    LastDays(i64),
    /// Watched within a calendar year
    Year(i32),
    /// Watched within a calendar month
    Month(i32, u32),
}

impl DateRange {
    /// Parse a CLI selector: all | 7d | 30d | year:2024 | month:2024-05
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        match s {
            "all" => return Ok(DateRange::All),
            "7d" => return Ok(DateRange::LastDays(7)),
            "30d" => return Ok(DateRange::LastDays(30)),
            _ => {}
        }
        if let Some(year) = s.strip_prefix("year:") {
            return year
                .parse::<i32>()
                .map(DateRange::Year)
                .map_err(|_| format!("Invalid year selector: {}", s));
        }
        if let Some(month) = s.strip_prefix("month:") {
            if let Some((y, m)) = month.split_once('-') {
                if let (Ok(y), Ok(m)) = (y.parse::<i32>(), m.parse::<u32>()) {
                    if (1..=12).contains(&m) {
                        return Ok(DateRange::Month(y, m));
                    }
                }
            }
            return Err(format!("Invalid month selector: {}", s));
        }
        Err(format!(
            "Invalid range: {}. Use 'all', '7d', '30d', 'year:YYYY', or 'month:YYYY-MM'",
            s
        ))
    }

    fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match *self {
            DateRange::All => true,
            DateRange::LastDays(days) => created_at >= now - Duration::days(days),
            DateRange::Year(year) => created_at.with_timezone(&Local).year() == year,
            DateRange::Month(year, month) => {
                let local = created_at.with_timezone(&Local);
                local.year() == year && local.month() == month
            }
        }
    }
}

/// Filter configuration; every record must satisfy all four sub-predicates
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Fuzzy-matched against title and genre
    pub search: String,
    /// None means "all"
    pub status: Option<WatchStatus>,
    pub range: DateRange,
    /// Substring-matched against the country field; None means "all"
    pub country: Option<String>,
}

/// Whether a single record passes the filter, with an explicit "now" for the
/// relative date ranges
pub fn matches(record: &WatchRecord, opts: &FilterOptions, now: DateTime<Utc>) -> bool {
    let search_ok = opts.search.is_empty()
        || fuzzy_match(&record.title, &opts.search)
        || fuzzy_match(&record.genre, &opts.search);
    if !search_ok {
        return false;
    }

    if let Some(status) = opts.status {
        if record.status != status {
            return false;
        }
    }

    if !opts.range.contains(record.created_at, now) {
        return false;
    }

    if let Some(country) = opts.country.as_deref() {
        // Substring containment supports multi-country fields ("美国/英国")
        let contained = record
            .country
            .as_deref()
            .map(|c| c.contains(country))
            .unwrap_or(false);
        if !contained {
            return false;
        }
    }

    true
}

/// Filter a record set down to the entries matching `opts`
pub fn apply(records: &[WatchRecord], opts: &FilterOptions) -> Vec<WatchRecord> {
    let now = Utc::now();
    records
        .iter()
        .filter(|r| matches(r, opts, now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use watchlog_models::MediaKind;

    fn record(title: &str, genre: &str, country: &str, status: WatchStatus) -> WatchRecord {
        let mut r = WatchRecord::new(title, status, MediaKind::Movie);
        r.genre = genre.to_string();
        r.country = Some(country.to_string());
        r
    }

    #[test]
    fn test_default_options_match_everything() {
        let r = record("盗梦空间", "科幻", "美国", WatchStatus::Watched);
        assert!(matches(&r, &FilterOptions::default(), Utc::now()));
    }

    #[test]
    fn test_each_sub_predicate_excludes_independently() {
        let r = record("盗梦空间", "科幻", "美国/英国", WatchStatus::Watched);
        let now = Utc::now();

        let base = FilterOptions::default();
        assert!(matches(&r, &base, now));

        let mut failing = base.clone();
        failing.search = "完全无关".to_string();
        assert!(!matches(&r, &failing, now));

        let mut failing = base.clone();
        failing.status = Some(WatchStatus::Dropped);
        assert!(!matches(&r, &failing, now));

        let mut failing = base.clone();
        failing.range = DateRange::Year(1999);
        assert!(!matches(&r, &failing, now));

        let mut failing = base;
        failing.country = Some("日本".to_string());
        assert!(!matches(&r, &failing, now));
    }

    #[test]
    fn test_search_matches_genre_too() {
        let r = record("某部电影", "科幻,剧情", "美国", WatchStatus::Watched);
        let mut opts = FilterOptions::default();
        opts.search = "科幻".to_string();
        assert!(matches(&r, &opts, Utc::now()));
    }

    #[test]
    fn test_country_substring_on_multi_value_field() {
        let r = record("Foo", "", "美国/英国", WatchStatus::Watched);
        let mut opts = FilterOptions::default();
        opts.country = Some("英国".to_string());
        assert!(matches(&r, &opts, Utc::now()));
    }

    #[test]
    fn test_last_days_window() {
        let mut r = record("Foo", "", "", WatchStatus::Watched);
        let now = Utc::now();
        r.created_at = now - Duration::days(10);

        let mut opts = FilterOptions::default();
        opts.range = DateRange::LastDays(7);
        assert!(!matches(&r, &opts, now));
        opts.range = DateRange::LastDays(30);
        assert!(matches(&r, &opts, now));
    }

    #[test]
    fn test_month_selector_uses_local_calendar() {
        let mut r = record("Foo", "", "", WatchStatus::Watched);
        let local = Local.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        r.created_at = local.with_timezone(&Utc);

        let mut opts = FilterOptions::default();
        opts.range = DateRange::Month(2024, 5);
        assert!(matches(&r, &opts, Utc::now()));
        opts.range = DateRange::Month(2024, 6);
        assert!(!matches(&r, &opts, Utc::now()));
    }

    #[test]
    fn test_apply_is_a_subset() {
        let records = vec![
            record("盗梦空间", "科幻", "美国", WatchStatus::Watched),
            record("老友记", "喜剧", "美国", WatchStatus::Watching),
        ];
        let mut opts = FilterOptions::default();
        opts.status = Some(WatchStatus::Watching);
        let filtered = apply(&records, &opts);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "老友记");
    }

    #[test]
    fn test_range_parse() {
        assert_eq!(DateRange::parse("all").unwrap(), DateRange::All);
        assert_eq!(DateRange::parse("7d").unwrap(), DateRange::LastDays(7));
        assert_eq!(DateRange::parse("year:2024").unwrap(), DateRange::Year(2024));
        assert_eq!(DateRange::parse("month:2024-05").unwrap(), DateRange::Month(2024, 5));
        assert!(DateRange::parse("month:2024-13").is_err());
        assert!(DateRange::parse("yesterday").is_err());
    }
}
