use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://inkphy.com";
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(3);

/// CSS selectors for every piece of the profile page markup the scraper relies on.
///
/// The target page is third-party and versioned; when its structure changes,
/// this is the only place that needs editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub post: String,
    pub image_link: String,
    pub caption: String,
    pub comments: String,
    pub likes: String,
    pub created_time: String,
    pub load_more: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            post: "div.item".to_string(),
            image_link: "a.mask".to_string(),
            caption: "p.caption".to_string(),
            comments: "span.comments".to_string(),
            likes: "span.likes".to_string(),
            created_time: "span.created_time".to_string(),
            load_more: "#click4more".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub output_root: PathBuf,
    /// Pause before each "load more" attempt so the page can finish rendering.
    pub page_delay: Duration,
    pub headless: bool,
    pub selectors: Selectors,
}

impl ScraperConfig {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    pub fn profile_url(&self, account: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), account)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_root: PathBuf::from("."),
            page_delay: DEFAULT_PAGE_DELAY,
            headless: true,
            selectors: Selectors::default(),
        }
    }
}
