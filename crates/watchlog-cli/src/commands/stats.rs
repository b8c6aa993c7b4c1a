use anyhow::{anyhow, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::json;
use watchlog_core::{filter, DateRange, FilterOptions, StatsReport, TimeFrame};

use crate::commands::AppContext;
use crate::output::{Output, OutputFormat};

#[derive(Args)]
pub struct StatsArgs {
    /// Time frame: all | year:YYYY | month:YYYY-MM
    #[arg(long, default_value = "all")]
    pub range: String,
}

pub fn run_stats(args: StatsArgs, output: &Output) -> Result<()> {
    let (range, frame) = parse_frame(&args.range)?;

    let ctx = AppContext::open()?;
    let opts = FilterOptions {
        range,
        ..FilterOptions::default()
    };
    let scoped = filter::apply(ctx.store.records(), &opts);
    let report = watchlog_core::stats::aggregate(&scoped, frame);

    if output.format() != OutputFormat::Human {
        output.json(&report_json(&report));
        return Ok(());
    }

    let (hours, minutes) = report.hours_minutes();
    output.info(format!(
        "Total {} entries: {} movies, {} series",
        report.total, report.movie_count, report.series_count
    ));
    output.info(format!(
        "Episodes watched: {}  |  Watch time: {}h {}m  |  Average rating: {:.1}",
        report.episodes_watched, hours, minutes, report.average_rating
    ));

    if !report.status_counts.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(["状态", "数量"]);
        for (status, count) in &report.status_counts {
            table.add_row([status.as_str().to_string(), count.to_string()]);
        }
        output.info(table.to_string());
    }

    let mut ratings = Table::new();
    ratings
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["评分", "数量"]);
    for (index, count) in report.rating_histogram.iter().enumerate() {
        ratings.add_row([format!("{}★", index + 1), count.to_string()]);
    }
    output.info(ratings.to_string());

    if !report.genre_counts.is_empty() {
        let mut genres = Table::new();
        genres
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(["类型", "数量"]);
        for (genre, count) in &report.genre_counts {
            genres.add_row([genre.clone(), count.to_string()]);
        }
        output.info(genres.to_string());
    }

    if !report.trend.is_empty() {
        let label = match frame {
            TimeFrame::All => "年份",
            TimeFrame::Year(_) => "月份",
            TimeFrame::Month(_, _) => "日期",
        };
        let mut trend = Table::new();
        trend
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header([label, "数量"]);
        for point in &report.trend {
            trend.add_row([point.bucket.to_string(), point.count.to_string()]);
        }
        output.info(trend.to_string());
    }

    Ok(())
}

/// Stats accepts the subset of range selectors that name a concrete frame
fn parse_frame(text: &str) -> Result<(DateRange, TimeFrame)> {
    match DateRange::parse(text).map_err(|e| anyhow!(e))? {
        DateRange::All => Ok((DateRange::All, TimeFrame::All)),
        DateRange::Year(year) => Ok((DateRange::Year(year), TimeFrame::Year(year))),
        DateRange::Month(year, month) => Ok((DateRange::Month(year, month), TimeFrame::Month(year, month))),
        DateRange::LastDays(_) => Err(anyhow!("Stats ranges are 'all', 'year:YYYY', or 'month:YYYY-MM'")),
    }
}

fn report_json(report: &StatsReport) -> serde_json::Value {
    let (hours, minutes) = report.hours_minutes();
    json!({
        "total": report.total,
        "movies": report.movie_count,
        "series": report.series_count,
        "average_rating": report.average_rating,
        "episodes_watched": report.episodes_watched,
        "total_minutes": report.total_minutes,
        "watch_time": format!("{}h {}m", hours, minutes),
        "status_counts": report.status_counts.iter()
            .map(|(status, count)| json!({"status": status.as_str(), "count": count}))
            .collect::<Vec<_>>(),
        "rating_histogram": report.rating_histogram,
        "genre_counts": report.genre_counts.iter()
            .map(|(genre, count)| json!({"genre": genre, "count": count}))
            .collect::<Vec<_>>(),
        "trend": report.trend.iter()
            .map(|point| json!({"bucket": point.bucket, "count": point.count}))
            .collect::<Vec<_>>(),
        "series_rollups": report.series_rollups.iter()
            .map(|s| json!({
                "title": s.title,
                "episodes_watched": s.episodes_watched,
                "episode_minutes": s.episode_minutes,
            }))
            .collect::<Vec<_>>(),
    })
}
