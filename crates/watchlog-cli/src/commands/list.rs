use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{ArgAction, Args, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;
use watchlog_core::{filter, sort, DateRange, FilterOptions, Paginator, SortDirection, SortKey};
use watchlog_models::WatchRecord;

use crate::commands::{short_id, AppContext};
use crate::output::{Output, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Fuzzy search over title and genre
    #[arg(long, default_value = "")]
    pub search: String,

    /// Filter by status: watched | planning | watching | dropped
    #[arg(long)]
    pub status: Option<String>,

    /// Date range: all | 7d | 30d | year:YYYY | month:YYYY-MM
    #[arg(long, default_value = "all")]
    pub range: String,

    /// Filter by country (substring match)
    #[arg(long)]
    pub country: Option<String>,

    /// Sort field
    #[arg(long, value_enum, default_value = "created")]
    pub sort: SortField,

    /// Sort ascending instead of descending
    #[arg(long, action = ArgAction::SetTrue)]
    pub asc: bool,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Entries per page (defaults to the configured page size)
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Created,
    Rating,
    Year,
    Title,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Created => SortKey::CreatedAt,
            SortField::Rating => SortKey::Rating,
            SortField::Year => SortKey::Year,
            SortField::Title => SortKey::Title,
        }
    }
}

pub fn run_list(args: ListArgs, output: &Output) -> Result<()> {
    let ctx = AppContext::open()?;

    let opts = FilterOptions {
        search: args.search.clone(),
        status: args
            .status
            .as_deref()
            .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
            .transpose()?,
        range: DateRange::parse(&args.range).map_err(|e| anyhow!(e))?,
        country: args.country.clone(),
    };

    let mut records = filter::apply(ctx.store.records(), &opts);
    let direction = if args.asc {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };
    sort::sort_records(&mut records, args.sort.into(), direction);

    let mut paginator = Paginator::new(args.page_size.unwrap_or(ctx.config.display.page_size));
    paginator.set_page(args.page, records.len());
    let page = paginator.slice(&records);
    let total_pages = paginator.total_pages(records.len());

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "total": records.len(),
            "page": paginator.current_page(),
            "total_pages": total_pages,
            "records": page,
        }));
        return Ok(());
    }

    if records.is_empty() {
        output.info("No entries match");
        return Ok(());
    }

    output.info(render_table(page));
    output.info(format!(
        "Page {}/{} - {} entries total",
        paginator.current_page(),
        total_pages,
        records.len()
    ));
    Ok(())
}

fn render_table(records: &[WatchRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["ID", "标题", "年份", "类型", "评分", "状态", "媒体", "进度", "添加时间"]);

    for record in records {
        let rating = if record.is_rated() {
            format!("{:.1}", record.rating)
        } else {
            "-".to_string()
        };
        let progress = match (record.current_episode, record.total_episodes) {
            (Some(current), Some(total)) => format!("{}/{}", current, total),
            (Some(current), None) => format!("{}/?", current),
            _ => "-".to_string(),
        };
        table.add_row([
            Cell::new(short_id(&record.id)),
            Cell::new(&record.title),
            Cell::new(&record.year),
            Cell::new(&record.genre),
            Cell::new(rating),
            Cell::new(record.status.as_str()),
            Cell::new(record.media_kind.label()),
            Cell::new(progress),
            Cell::new(record.created_at.with_timezone(&Local).format("%Y-%m-%d").to_string()),
        ]);
    }

    table.to_string()
}
