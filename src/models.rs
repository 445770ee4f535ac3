use std::path::PathBuf;

/// One scraped post. `id` is its 1-based rank in the batch and the stem of its image file.
///
/// Counts and the timestamp stay as the raw text found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: usize,
    pub caption: String,
    pub comments: String,
    pub likes: String,
    pub created_time: String,
    pub image_url: String,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    pub account: String,
    pub pages_requested: usize,
    pub pages_loaded: usize,
    pub posts: usize,
    pub images_saved: usize,
    pub images_failed: usize,
    pub csv_path: PathBuf,
}
