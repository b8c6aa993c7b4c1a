//! Aggregate statistics over a (already filter-scoped) record subset.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use watchlog_models::{split_tags, MediaKind, WatchRecord, WatchStatus};

/// Genre histogram keeps only the most frequent buckets
const GENRE_BUCKET_LIMIT: usize = 8;

/// Bucket label for records without a genre
pub const UNKNOWN_GENRE: &str = "未知";

/// Granularity used to bucket the trend series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrame {
    /// Trend bucketed by calendar year observed in the data
    All,
    /// Trend bucketed by month of the given year (1..=12, zeros included)
    Year(i32),
    /// Trend bucketed by day of the given month (zeros included)
    Month(i32, u32),
}

/// One trend bucket: the day number, month number, or year depending on mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub bucket: i32,
    pub count: usize,
}

/// Per-series rollup: multiple watch entries of the same trimmed title count
/// as one logical series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRollup {
    pub title: String,
    /// Maximum current-episode value across the title's entries
    pub episodes_watched: u32,
    /// Latest non-zero per-episode duration supplied for the title
    pub episode_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub total: usize,
    pub movie_count: usize,
    /// Distinct series titles, not series entries
    pub series_count: usize,
    /// Average over rated (> 0) records; 0 when nothing is rated
    pub average_rating: f32,
    /// One bucket per status present, in enum display order
    pub status_counts: Vec<(WatchStatus, usize)>,
    /// Fixed 1..=5 star buckets; index 0 holds 1-star counts
    pub rating_histogram: [usize; 5],
    /// Top buckets by count, descending; ties break on label
    pub genre_counts: Vec<(String, usize)>,
    pub trend: Vec<TrendPoint>,
    /// Sum of per-title maximum episode counts
    pub episodes_watched: u32,
    /// Movie runtimes plus series episodes × per-episode duration
    pub total_minutes: u64,
    pub series_rollups: Vec<SeriesRollup>,
}

impl StatsReport {
    /// Total watch time as whole hours plus remainder minutes
    pub fn hours_minutes(&self) -> (u64, u64) {
        (self.total_minutes / 60, self.total_minutes % 60)
    }
}

/// Compute the full report. Pure function of its inputs: the caller scopes
/// `records` to the frame (via the date-range filter) beforehand.
pub fn aggregate(records: &[WatchRecord], frame: TimeFrame) -> StatsReport {
    let total = records.len();
    let movie_count = records.iter().filter(|r| r.media_kind == MediaKind::Movie).count();

    let rated: Vec<f32> = records.iter().filter(|r| r.is_rated()).map(|r| r.rating).collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f32>() / rated.len() as f32
    };

    let rollups = series_rollups(records);
    let series_count = rollups.len();
    let episodes_watched: u32 = rollups.iter().map(|s| s.episodes_watched).sum();

    let movie_minutes: u64 = records
        .iter()
        .filter(|r| r.media_kind == MediaKind::Movie)
        .map(|r| r.duration_minutes as u64)
        .sum();
    let series_minutes: u64 = rollups
        .iter()
        .map(|s| s.episodes_watched as u64 * s.episode_minutes as u64)
        .sum();

    StatsReport {
        total,
        movie_count,
        series_count,
        average_rating,
        status_counts: status_counts(records),
        rating_histogram: rating_histogram(records),
        genre_counts: genre_counts(records),
        trend: trend_series(records, frame),
        episodes_watched,
        total_minutes: movie_minutes + series_minutes,
        series_rollups: rollups,
    }
}

fn status_counts(records: &[WatchRecord]) -> Vec<(WatchStatus, usize)> {
    WatchStatus::ALL
        .iter()
        .filter_map(|&status| {
            let count = records.iter().filter(|r| r.status == status).count();
            (count > 0).then_some((status, count))
        })
        .collect()
}

fn rating_histogram(records: &[WatchRecord]) -> [usize; 5] {
    let mut buckets = [0usize; 5];
    for record in records.iter().filter(|r| r.is_rated()) {
        let star = (record.rating.round() as i64).clamp(1, 5) as usize;
        buckets[star - 1] += 1;
    }
    buckets
}

fn genre_counts(records: &[WatchRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let tags = split_tags(&record.genre);
        if tags.is_empty() {
            *counts.entry(UNKNOWN_GENRE.to_string()).or_default() += 1;
            continue;
        }
        // Each distinct tag counts once per record
        let distinct: HashSet<String> = tags.into_iter().collect();
        for tag in distinct {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(GENRE_BUCKET_LIMIT);
    sorted
}

fn trend_series(records: &[WatchRecord], frame: TimeFrame) -> Vec<TrendPoint> {
    let local_dates: Vec<chrono::DateTime<Local>> =
        records.iter().map(|r| r.created_at.with_timezone(&Local)).collect();

    match frame {
        TimeFrame::Month(year, month) => {
            let days = days_in_month(year, month);
            (1..=days)
                .map(|day| TrendPoint {
                    bucket: day as i32,
                    count: local_dates
                        .iter()
                        .filter(|d| d.year() == year && d.month() == month && d.day() == day)
                        .count(),
                })
                .collect()
        }
        TimeFrame::Year(year) => (1..=12)
            .map(|month| TrendPoint {
                bucket: month as i32,
                count: local_dates
                    .iter()
                    .filter(|d| d.year() == year && d.month() == month)
                    .count(),
            })
            .collect(),
        TimeFrame::All => {
            let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
            for date in &local_dates {
                *by_year.entry(date.year()).or_default() += 1;
            }
            by_year
                .into_iter()
                .map(|(bucket, count)| TrendPoint { bucket, count })
                .collect()
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

fn series_rollups(records: &[WatchRecord]) -> Vec<SeriesRollup> {
    struct Entry {
        episodes: u32,
        minutes: u32,
        minutes_updated: DateTime<Utc>,
    }

    let mut by_title: HashMap<String, Entry> = HashMap::new();
    for record in records.iter().filter(|r| r.is_series()) {
        let title = record.title.trim().to_string();
        let entry = by_title.entry(title).or_insert_with(|| Entry {
            episodes: 0,
            minutes: 0,
            minutes_updated: DateTime::<Utc>::MIN_UTC,
        });
        entry.episodes = entry.episodes.max(record.current_episode.unwrap_or(0));
        if record.duration_minutes > 0 && record.updated_at >= entry.minutes_updated {
            entry.minutes = record.duration_minutes;
            entry.minutes_updated = record.updated_at;
        }
    }

    let mut rollups: Vec<SeriesRollup> = by_title
        .into_iter()
        .map(|(title, entry)| SeriesRollup {
            title,
            episodes_watched: entry.episodes,
            episode_minutes: entry.minutes,
        })
        .collect();
    rollups.sort_by(|a, b| a.title.cmp(&b.title));
    rollups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn movie(title: &str, genre: &str, rating: f32, minutes: u32) -> WatchRecord {
        let mut r = WatchRecord::new(title, WatchStatus::Watched, MediaKind::Movie);
        r.genre = genre.to_string();
        r.rating = rating;
        r.duration_minutes = minutes;
        r
    }

    fn series(title: &str, episode: u32, minutes: u32) -> WatchRecord {
        let mut r = WatchRecord::new(title, WatchStatus::Watching, MediaKind::Series);
        r.current_episode = Some(episode);
        r.duration_minutes = minutes;
        r
    }

    #[test]
    fn test_series_rollup_dedup_by_title() {
        // Two entries for the same series: one logical series, max episode
        // wins, duration contribution is 8 * 40 = 320 minutes
        let records = vec![series("Foo", 5, 40), series("Foo", 8, 40)];
        let report = aggregate(&records, TimeFrame::All);

        assert_eq!(report.series_count, 1);
        assert_eq!(report.episodes_watched, 8);
        assert_eq!(report.total_minutes, 320);
    }

    #[test]
    fn test_rollup_keeps_latest_non_zero_duration() {
        let mut old = series("Foo", 3, 45);
        old.updated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut newer = series("Foo", 5, 0);
        newer.updated_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let report = aggregate(&[old, newer], TimeFrame::All);
        assert_eq!(report.series_rollups[0].episode_minutes, 45);
        assert_eq!(report.total_minutes, 5 * 45);
    }

    #[test]
    fn test_total_minutes_mixes_movies_and_series() {
        let records = vec![movie("盗梦空间", "科幻", 5.0, 148), series("Foo", 2, 40)];
        let report = aggregate(&records, TimeFrame::All);
        assert_eq!(report.total_minutes, 148 + 80);
        assert_eq!(report.hours_minutes(), (3, 48));
    }

    #[test]
    fn test_average_rating_ignores_unrated() {
        let records = vec![movie("a", "", 4.0, 0), movie("b", "", 0.0, 0), movie("c", "", 2.0, 0)];
        let report = aggregate(&records, TimeFrame::All);
        assert!((report.average_rating - 3.0).abs() < f32::EPSILON);

        let unrated = vec![movie("a", "", 0.0, 0)];
        assert_eq!(aggregate(&unrated, TimeFrame::All).average_rating, 0.0);
    }

    #[test]
    fn test_rating_histogram_has_fixed_buckets() {
        let records = vec![movie("a", "", 4.5, 0), movie("b", "", 4.0, 0), movie("c", "", 1.0, 0)];
        let report = aggregate(&records, TimeFrame::All);
        // 4.5 rounds up to the 5-star bucket
        assert_eq!(report.rating_histogram, [1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_genre_split_counts_each_tag_once_per_record() {
        let records = vec![movie("a", "科幻,剧情", 0.0, 0), movie("b", "科幻", 0.0, 0), movie("c", "", 0.0, 0)];
        let report = aggregate(&records, TimeFrame::All);

        let get = |label: &str| {
            report
                .genre_counts
                .iter()
                .find(|(g, _)| g == label)
                .map(|(_, c)| *c)
        };
        assert_eq!(get("科幻"), Some(2));
        assert_eq!(get("剧情"), Some(1));
        assert_eq!(get(UNKNOWN_GENRE), Some(1));
    }

    #[test]
    fn test_genre_buckets_truncated_to_top_eight() {
        let records: Vec<WatchRecord> =
            (0..12).map(|i| movie("m", &format!("genre{:02}", i), 0.0, 0)).collect();
        let report = aggregate(&records, TimeFrame::All);
        assert_eq!(report.genre_counts.len(), 8);
    }

    #[test]
    fn test_trend_year_mode_emits_all_twelve_months() {
        let mut r = movie("a", "", 0.0, 0);
        r.created_at = Local
            .with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let report = aggregate(&[r], TimeFrame::Year(2024));

        assert_eq!(report.trend.len(), 12);
        assert_eq!(report.trend[2], TrendPoint { bucket: 3, count: 1 });
        assert_eq!(report.trend[0].count, 0);
    }

    #[test]
    fn test_trend_month_mode_emits_every_day() {
        let report = aggregate(&[], TimeFrame::Month(2024, 2));
        assert_eq!(report.trend.len(), 29); // leap year
        let report = aggregate(&[], TimeFrame::Month(2023, 2));
        assert_eq!(report.trend.len(), 28);
    }

    #[test]
    fn test_trend_all_mode_only_observed_years() {
        let mut a = movie("a", "", 0.0, 0);
        a.created_at = Local.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap().with_timezone(&Utc);
        let mut b = movie("b", "", 0.0, 0);
        b.created_at = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap().with_timezone(&Utc);

        let report = aggregate(&[b, a], TimeFrame::All);
        let buckets: Vec<i32> = report.trend.iter().map(|p| p.bucket).collect();
        assert_eq!(buckets, [2022, 2024]); // ascending, gaps omitted
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = vec![movie("盗梦空间", "科幻,剧情", 5.0, 148), series("Foo", 8, 40)];
        let first = aggregate(&records, TimeFrame::All);
        let second = aggregate(&records, TimeFrame::All);
        assert_eq!(first, second);
    }
}
