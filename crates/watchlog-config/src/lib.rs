pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{AiOptions, Config, ConfigError, DisplayOptions, StorageOptions};
pub use credentials::CredentialStore;
pub use paths::PathManager;
