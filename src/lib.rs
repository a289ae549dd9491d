#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod image;
pub mod pattern;
pub mod swift;

pub use catalog::{AssetCatalog, CatalogLog, LogLevel};
pub use config::RuleSet;
pub use error::PackError;
pub use swift::SwiftTarget;
