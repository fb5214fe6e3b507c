pub mod config;
pub mod price;

pub use config::{Config, ConfigError, OcrSettings, OutputFormat, OutputSettings, DEFAULT_DATE_FORMAT};
pub use price::Price;
