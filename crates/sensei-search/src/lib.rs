pub mod bing;
pub mod client;
pub mod error;
pub mod filter;
pub mod searxng;

pub use bing::BingClient;
pub use client::{create_search_client, SearchClient};
pub use error::{Result, SearchError};
pub use searxng::SearxngClient;

// Re-export the data model so callers need only this crate
pub use sensei_types::{Category, SearchConfig, SearchProvider, SearchResult, SearchResultSet};
