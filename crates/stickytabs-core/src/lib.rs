pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;

pub use catalog::{Catalog, CatalogItem, Section};
pub use config::{AppConfig, EasingType, EngineConfig, ScrollConfig};
pub use engine::StickyTabs;
pub use error::{Error, Result, ScrollTargetError};
