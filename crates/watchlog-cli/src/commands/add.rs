use anyhow::{anyhow, Result};
use clap::{ArgAction, Args};
use watchlog_enrich::fetch_metadata;
use watchlog_models::{MediaKind, WatchRecord, WatchStatus};

use crate::commands::{parse_watched_date, short_id, AppContext};
use crate::output::Output;

#[derive(Args)]
pub struct AddArgs {
    /// Title of the movie or series
    pub title: String,

    /// Release year (free-form text)
    #[arg(long)]
    pub year: Option<String>,

    /// Country/region, multiple values joined with /
    #[arg(long)]
    pub country: Option<String>,

    /// Genres, multiple values joined with commas
    #[arg(long)]
    pub genre: Option<String>,

    /// Director or creator
    #[arg(long)]
    pub director: Option<String>,

    /// Rating from 0 to 5 (0 = unrated)
    #[arg(long)]
    pub rating: Option<f32>,

    /// watched | planning | watching | dropped
    #[arg(long, default_value = "watched")]
    pub status: String,

    /// Free-text review
    #[arg(long)]
    pub review: Option<String>,

    /// movie | series (defaults to movie)
    #[arg(long = "media-type")]
    pub media_type: Option<String>,

    /// Series: last episode watched
    #[arg(long = "current-episode")]
    pub current_episode: Option<u32>,

    /// Series: total episode count
    #[arg(long = "total-episodes")]
    pub total_episodes: Option<u32>,

    /// Minutes (movie total / series per-episode)
    #[arg(long)]
    pub duration: Option<u32>,

    /// Watched date as YYYY-MM-DD (defaults to now)
    #[arg(long = "watched-at")]
    pub watched_at: Option<String>,

    /// Fill empty fields from the metadata service
    #[arg(long, action = ArgAction::SetTrue)]
    pub fetch: bool,
}

pub async fn run_add(args: AddArgs, output: &Output) -> Result<()> {
    let status: WatchStatus = args.status.parse().map_err(|e: String| anyhow!(e))?;
    let media_kind: Option<MediaKind> = args
        .media_type
        .as_deref()
        .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;

    let mut ctx = AppContext::open()?;

    let mut record = WatchRecord::new(args.title, status, media_kind.unwrap_or(MediaKind::Movie));
    record.year = args.year.unwrap_or_default();
    record.country = args.country;
    record.genre = args.genre.unwrap_or_default();
    record.director = args.director;
    record.review = args.review.unwrap_or_default();
    record.current_episode = args.current_episode;
    record.total_episodes = args.total_episodes;
    record.duration_minutes = args.duration.unwrap_or(0);
    if let Some(rating) = args.rating {
        record.set_rating(rating);
    }
    if let Some(date) = args.watched_at.as_deref() {
        record.created_at = parse_watched_date(date)?;
    }

    if args.fetch {
        let client = ctx.ai_client()?;
        match fetch_metadata(&client, &record.title).await {
            Some(metadata) => {
                fill_empty_fields(&mut record, metadata, media_kind.is_some());
                output.info("Filled empty fields from the metadata service");
            }
            None => output.warn("Metadata service returned no data; fields left unchanged"),
        }
    }

    let id = record.id.clone();
    let title = record.title.clone();
    ctx.store.add(record);
    ctx.flush()?;

    output.success(format!("Added '{}' ({})", title, short_id(&id)));
    Ok(())
}

/// Apply fetched metadata without overwriting anything the user typed;
/// `kind_from_user` marks an explicit --media-type that must win
fn fill_empty_fields(
    record: &mut WatchRecord,
    metadata: watchlog_enrich::MediaMetadata,
    kind_from_user: bool,
) {
    if record.year.is_empty() {
        record.year = metadata.year.unwrap_or_default();
    }
    if record.country.is_none() {
        record.country = metadata.country.filter(|c| !c.is_empty());
    }
    if record.genre.is_empty() {
        record.genre = metadata.genre.unwrap_or_default();
    }
    if record.director.is_none() {
        record.director = metadata.director.filter(|d| !d.is_empty());
    }
    if record.review.is_empty() {
        record.review = metadata.summary.unwrap_or_default();
    }
    if let Some(color) = metadata.color.filter(|c| !c.is_empty()) {
        record.color = color;
    }
    if !kind_from_user {
        if let Some(kind) = metadata.media_kind {
            record.media_kind = kind;
        }
    }
    if record.is_series() && record.total_episodes.is_none() {
        record.total_episodes = metadata.total_episodes;
    }
    if record.duration_minutes == 0 {
        record.duration_minutes = metadata.duration_minutes.unwrap_or(0);
    }
}
