pub mod extract;
pub mod fetcher;
pub mod http;

pub use extract::extract_main_text;
pub use fetcher::PageFetcher;
pub use http::{FetchError, HttpPageFetcher};
