pub mod codec;
pub mod debounce;
pub mod filter;
pub mod fuzzy;
pub mod page;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod store;

pub use codec::{ExportFormat, ImportReport};
pub use debounce::SaveDebouncer;
pub use filter::{DateRange, FilterOptions};
pub use fuzzy::{edit_distance, fuzzy_match};
pub use page::Paginator;
pub use sort::{SortDirection, SortKey};
pub use stats::{StatsReport, TimeFrame};
pub use storage::JsonStorage;
pub use store::RecordStore;
