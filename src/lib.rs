pub mod models;
pub mod shortener;
pub mod ui;

// Re-export commonly used types
pub use models::{Entry, EntryState, LinkList};
pub use shortener::{
    generate_random_string, is_valid_url, ShortenError, DEFAULT_BASE_URL, SHORT_ID_LENGTH,
};
