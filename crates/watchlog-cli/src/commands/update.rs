use anyhow::{anyhow, Result};
use clap::Args;
use watchlog_models::{MediaKind, WatchStatus};

use crate::commands::{parse_watched_date, short_id, AppContext};
use crate::output::Output;

#[derive(Args)]
pub struct UpdateArgs {
    /// Entry ID (or unambiguous prefix)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub director: Option<String>,
    /// Rating from 0 to 5 (0 = unrated)
    #[arg(long)]
    pub rating: Option<f32>,
    /// watched | planning | watching | dropped
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub review: Option<String>,
    /// movie | series
    #[arg(long = "media-type")]
    pub media_type: Option<String>,
    #[arg(long = "current-episode")]
    pub current_episode: Option<u32>,
    #[arg(long = "total-episodes")]
    pub total_episodes: Option<u32>,
    /// Minutes (movie total / series per-episode)
    #[arg(long)]
    pub duration: Option<u32>,
    /// Watched date as YYYY-MM-DD
    #[arg(long = "watched-at")]
    pub watched_at: Option<String>,
}

pub fn run_update(args: UpdateArgs, output: &Output) -> Result<()> {
    // Validate typed fields before touching the store
    let status: Option<WatchStatus> = args
        .status
        .as_deref()
        .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;
    let media_kind: Option<MediaKind> = args
        .media_type
        .as_deref()
        .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;
    let watched_at = args.watched_at.as_deref().map(parse_watched_date).transpose()?;

    let mut ctx = AppContext::open()?;
    let id = ctx.resolve_id(&args.id)?;

    ctx.store.update(&id, |record| {
        if let Some(title) = args.title {
            record.title = title;
        }
        if let Some(year) = args.year {
            record.year = year;
        }
        if let Some(country) = args.country {
            record.country = (!country.is_empty()).then_some(country);
        }
        if let Some(genre) = args.genre {
            record.genre = genre;
        }
        if let Some(director) = args.director {
            record.director = (!director.is_empty()).then_some(director);
        }
        if let Some(rating) = args.rating {
            record.set_rating(rating);
        }
        if let Some(status) = status {
            record.status = status;
        }
        if let Some(review) = args.review {
            record.review = review;
        }
        if let Some(kind) = media_kind {
            record.media_kind = kind;
        }
        if let Some(episode) = args.current_episode {
            record.current_episode = Some(episode);
        }
        if let Some(total) = args.total_episodes {
            record.total_episodes = Some(total);
        }
        if let Some(duration) = args.duration {
            record.duration_minutes = duration;
        }
        if let Some(date) = watched_at {
            record.created_at = date;
        }
    });
    ctx.flush()?;

    output.success(format!("Updated entry {}", short_id(&id)));
    Ok(())
}
