use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use watchlog_models::WatchRecord;

use super::{CSV_HEADERS, CSV_TIME_FORMAT, UTF8_BOM};

/// Structural dump: the full record array, pretty-printed, no wrapping
pub fn to_json(records: &[WatchRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| anyhow!("Failed to serialize records: {}", e))
}

/// Delimited dump: BOM, fixed header row, one row per record. Fields are
/// quoted (inner quotes doubled) only when they contain the delimiter, a
/// quote, or a newline; the csv writer handles that.
pub fn to_csv(records: &[WatchRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        writer.write_record(&[
            record.id.clone(),
            record.title.clone(),
            record.year.clone(),
            record.country.clone().unwrap_or_default(),
            record.genre.clone(),
            record.director.clone().unwrap_or_default(),
            format_rating(record.rating),
            record.status.as_str().to_string(),
            record.review.clone(),
            format_timestamp(record.created_at),
            format_timestamp(record.updated_at),
            record.media_kind.label().to_string(),
            record.current_episode.map(|e| e.to_string()).unwrap_or_default(),
            record.total_episodes.map(|e| e.to_string()).unwrap_or_default(),
            record.duration_minutes.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e))?;
    let body = String::from_utf8(bytes)?;
    Ok(format!("{}{}", UTF8_BOM, body))
}

fn format_rating(rating: f32) -> String {
    if rating.fract() == 0.0 {
        format!("{}", rating as i64)
    } else {
        format!("{}", rating)
    }
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format(CSV_TIME_FORMAT).to_string()
}
