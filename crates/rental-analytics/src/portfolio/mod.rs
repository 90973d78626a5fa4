//! Property storage and portfolio-level workflows around the analytics core.

pub mod filter;
pub mod import;
pub mod repository;
pub mod sample;
pub mod service;
pub mod summary;

pub use filter::PropertyFilter;
pub use import::{PortfolioImportError, PortfolioImporter};
pub use repository::{InMemoryPropertyStore, PropertyStore, StoreError};
pub use sample::sample_portfolio;
pub use service::{PortfolioService, PortfolioServiceError};
pub use summary::PortfolioSummary;
