use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::browser::{ChromeSession, RenderedPage};
use crate::config::ScraperConfig;
use crate::csv_writer;
use crate::extractor::PostExtractor;
use crate::images::{FetchOutcome, ImageFetcher};
use crate::models::ScrapeReport;
use crate::output::{validate_account, OutputLayout};
use crate::pagination::{pages_needed, paginate};

pub struct InkphyScraper {
    config: ScraperConfig,
    extractor: PostExtractor,
    images: ImageFetcher,
}

impl InkphyScraper {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let extractor = PostExtractor::new(&config.selectors)?;
        let images = ImageFetcher::new()?;
        Ok(Self {
            config,
            extractor,
            images,
        })
    }

    /// Scrape the latest `count` posts of `account` with a fresh browser session.
    ///
    /// The browser is closed before returning, whether the run succeeded or not.
    pub async fn scrape(&self, account: &str, count: usize) -> Result<ScrapeReport> {
        validate_account(account)?;
        pages_needed(count)?;

        let session = ChromeSession::launch(self.config.headless).await?;
        let result: Result<ScrapeReport> = async {
            let page = session.open(&self.config.profile_url(account)).await?;
            self.scrape_page(&page, account, count).await
        }
        .await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser: {:?}", e);
        }
        result
    }

    /// Paginate, extract, download images and write the CSV for a page already
    /// showing `account`'s profile.
    pub async fn scrape_page<P>(&self, page: &P, account: &str, count: usize) -> Result<ScrapeReport>
    where
        P: RenderedPage + ?Sized,
    {
        let layout = OutputLayout::new(&self.config.output_root, account)?;
        let pages_requested = pages_needed(count)?;

        info!("Loading {} page(s) for {} posts of {}", pages_requested, count, account);
        let pages_loaded = paginate(
            page,
            &self.config.selectors.load_more,
            pages_requested,
            self.config.page_delay,
        )
        .await;

        let html = page.html().await.context("Failed to read rendered page")?;
        let posts = self.extractor.extract(&html, count)?;
        info!("Extracted {} posts", posts.len());

        let mut images_saved = 0;
        let mut images_failed = 0;
        for post in &posts {
            match self
                .images
                .fetch(&post.image_url, &layout.image_path(post.id))
                .await?
            {
                FetchOutcome::Saved(_) => images_saved += 1,
                FetchOutcome::Skipped => images_failed += 1,
            }
        }
        if images_failed > 0 {
            warn!("{} of {} images could not be downloaded", images_failed, posts.len());
        }

        tokio::fs::create_dir_all(layout.account_dir())
            .await
            .with_context(|| format!("Failed to create {}", layout.account_dir().display()))?;
        let csv_path = layout.csv_path();
        csv_writer::write_posts(&csv_path, &posts)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;

        info!(
            "Scraping complete! {} posts, {} images saved to {}",
            posts.len(),
            images_saved,
            layout.account_dir().display()
        );

        Ok(ScrapeReport {
            account: account.to_string(),
            pages_requested,
            pages_loaded,
            posts: posts.len(),
            images_saved,
            images_failed,
            csv_path,
        })
    }
}
