pub mod media;
pub mod record;
pub mod status;
pub mod tags;

pub use media::MediaKind;
pub use record::WatchRecord;
pub use status::WatchStatus;
pub use tags::split_tags;
