// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::{CatalogClient, CatalogError};
