pub mod app_config;
pub mod brands;
pub mod config;
pub mod records;

pub use app_config::AppConfig;
pub use brands::{load_brands, BrandsFile, RetailerConfig, SourceKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{Category, DealRecord, Price};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("invalid brands config: {0}")]
    Validation(String),
}
