use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use watchlog_models::{record, MediaKind, WatchRecord, WatchStatus};

use super::CSV_TIME_FORMAT;

/// Parse a structural JSON dump. The top level must be an array of
/// record-like objects; individual rows are coerced best-effort and skipped
/// when they are not objects at all.
pub fn from_json(content: &str) -> Result<Vec<WatchRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Import file is not valid JSON")?;
    let rows = value
        .as_array()
        .ok_or_else(|| anyhow!("JSON import must be an array of records"))?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match serde_json::from_value::<RecordDraft>(row.clone()) {
            Ok(draft) => records.push(draft.into_record()),
            Err(e) => {
                debug!(row = index, error = %e, "Skipping malformed JSON import row");
            }
        }
    }
    Ok(records)
}

/// Parse delimited text. Strips a leading BOM, maps recognized header cells
/// to fields (unknown columns ignored), coerces values best-effort per row,
/// and skips rows with fewer than 2 non-empty cells.
pub fn from_csv(content: &str) -> Result<Vec<WatchRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("Failed to read CSV header row")?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();
    debug!("CSV import columns: {:?}", headers.iter().collect::<Vec<_>>());

    let field = |row: &csv::StringRecord, name: &str| -> String {
        header_map
            .get(name)
            .and_then(|&i| row.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut records = Vec::new();
    let mut row_count = 0usize;
    for result in reader.records() {
        let row = result.context("Failed to parse CSV row")?;
        row_count += 1;

        // Rows that are effectively empty carry no record
        let filled = row.iter().filter(|cell| !cell.trim().is_empty()).count();
        if filled < 2 {
            debug!(row = row_count, "Skipping near-empty CSV row");
            continue;
        }

        let id = field(&row, "ID");
        let title = field(&row, "标题");
        let country = field(&row, "国家/地区");
        let director = field(&row, "导演");
        let current_episode = parse_count(&field(&row, "当前集数"));
        let total_episodes = parse_count(&field(&row, "总集数"));

        records.push(WatchRecord {
            id: if id.is_empty() { record::mint_id() } else { id },
            color: record::pick_color(&title).to_string(),
            title,
            year: field(&row, "年份"),
            country: (!country.is_empty()).then_some(country),
            genre: field(&row, "类型"),
            director: (!director.is_empty()).then_some(director),
            rating: parse_number(&field(&row, "评分")).clamp(0.0, 5.0),
            status: field(&row, "状态").parse().unwrap_or(WatchStatus::Watched),
            review: field(&row, "评价"),
            poster: None,
            media_kind: MediaKind::from_label(&field(&row, "媒体类型")),
            current_episode,
            total_episodes,
            duration_minutes: parse_number(&field(&row, "时长(分钟)")) as u32,
            created_at: parse_timestamp(&field(&row, "添加时间")),
            updated_at: parse_timestamp(&field(&row, "更新时间")),
        });
    }

    debug!("Parsed {} CSV rows into {} records", row_count, records.len());
    Ok(records)
}

/// Drop incoming records whose identity already exists; returns the unique
/// remainder (input order preserved) and the number dropped
pub fn dedup_against(
    existing: &[WatchRecord],
    incoming: Vec<WatchRecord>,
) -> (Vec<WatchRecord>, usize) {
    let mut seen: HashSet<String> = existing.iter().map(|r| r.id.clone()).collect();
    let total = incoming.len();
    let unique: Vec<WatchRecord> = incoming
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();
    let skipped = total - unique.len();
    (unique, skipped)
}

/// Best-effort float parse, defaulting to 0
fn parse_number(text: &str) -> f32 {
    text.trim().parse::<f32>().unwrap_or(0.0)
}

fn parse_count(text: &str) -> Option<u32> {
    let value = parse_number(text);
    (value > 0.0).then_some(value as u32)
}

/// Best-effort date parse, defaulting to now
fn parse_timestamp(text: &str) -> DateTime<Utc> {
    let text = text.trim();
    if text.is_empty() {
        return Utc::now();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, CSV_TIME_FORMAT) {
        if let Some(local) = Local.from_local_datetime(&naive).earliest() {
            return local.with_timezone(&Utc);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return local.with_timezone(&Utc);
            }
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(millis) = text.parse::<i64>() {
        if let Some(parsed) = Utc.timestamp_millis_opt(millis).single() {
            return parsed;
        }
    }
    Utc::now()
}

/// Tolerant shape for structural-dump rows; anything missing gets a default
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordDraft {
    id: Option<String>,
    title: Option<String>,
    year: Option<String>,
    country: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    rating: Option<f32>,
    status: Option<WatchStatus>,
    review: Option<String>,
    color: Option<String>,
    poster: Option<String>,
    media_kind: Option<MediaKind>,
    current_episode: Option<u32>,
    total_episodes: Option<u32>,
    duration_minutes: Option<u32>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl RecordDraft {
    fn into_record(self) -> WatchRecord {
        let title = self.title.unwrap_or_default();
        let now = Utc::now();
        WatchRecord {
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(record::mint_id),
            color: self
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| record::pick_color(&title).to_string()),
            title,
            year: self.year.unwrap_or_default(),
            country: self.country.filter(|c| !c.is_empty()),
            genre: self.genre.unwrap_or_default(),
            director: self.director.filter(|d| !d.is_empty()),
            rating: self.rating.unwrap_or(0.0).clamp(0.0, 5.0),
            status: self.status.unwrap_or(WatchStatus::Watched),
            review: self.review.unwrap_or_default(),
            poster: self.poster,
            media_kind: self.media_kind.unwrap_or(MediaKind::Movie),
            current_episode: self.current_episode,
            total_episodes: self.total_episodes,
            duration_minutes: self.duration_minutes.unwrap_or(0),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}
