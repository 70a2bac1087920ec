pub mod extract;
pub mod fetch;
pub mod normalize;

pub use extract::{extract_page, extract_text, PageText, MAX_CHARS};
pub use fetch::{fetch, fetch_with, FetchError, FetchOptions};
