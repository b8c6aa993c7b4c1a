//! Import/export codec for the two interchange formats: a structural JSON
//! dump and delimited (CSV) text with a fixed, localized column set.

pub mod export;
pub mod import;

use std::path::Path;

pub use export::{to_csv, to_json};
pub use import::{dedup_against, from_csv, from_json};

/// Fixed CSV column order; import matches header cells against these names
/// exactly and ignores anything else.
pub const CSV_HEADERS: [&str; 15] = [
    "ID",
    "标题",
    "年份",
    "国家/地区",
    "类型",
    "导演",
    "评分",
    "状态",
    "评价",
    "添加时间",
    "更新时间",
    "媒体类型",
    "当前集数",
    "总集数",
    "时长(分钟)",
];

/// Byte-order marker prepended to CSV exports so spreadsheet tools decode
/// UTF-8 correctly
pub const UTF8_BOM: char = '\u{feff}';

/// Timestamp rendering used in the CSV columns
pub const CSV_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Choose the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }
}

/// Outcome of an import merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// Rows dropped because a record with the same identity already exists
    pub skipped_duplicates: usize,
}
