use std::future::Future;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// A page rendered by a browser that can be driven and read back.
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// Locate a single control by CSS selector and activate it.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Current rendered markup.
    async fn html(&self) -> Result<String>;
}

pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    pub async fn launch(headless: bool) -> Result<Self> {
        info!("Initializing browser");

        let mut config = BrowserConfig::builder();
        if !headless {
            config = config.with_head();
        }
        config = config
            .window_size(1920, 1080)
            .viewport(None)
            .arg("--disable-gpu");

        let browser_config = config
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(e) = h {
                    error!("Browser handler error: {:?}", e);
                }
            }
        });

        Ok(Self { browser, handler })
    }

    pub async fn open(&self, url: &str) -> Result<ChromePage> {
        info!("Navigating to {}", url);
        let page = self
            .browser
            .new_page(url)
            .await
            .with_context(|| format!("Failed to open {}", url))?;
        page.wait_for_navigation()
            .await
            .with_context(|| format!("Navigation to {} did not finish", url))?;
        Ok(ChromePage { page })
    }

    /// Close the browser and stop the handler task, even when closing fails.
    pub async fn close(self) -> Result<()> {
        let Self { mut browser, handler } = self;
        let result = shutdown(
            async move {
                match browser.close().await {
                    Ok(_) => browser
                        .wait()
                        .await
                        .map(|_| ())
                        .context("Failed to reap browser process"),
                    Err(e) => {
                        if let Some(Err(kill)) = browser.kill().await {
                            warn!("Failed to kill browser process: {}", kill);
                        }
                        Err(anyhow::Error::from(e).context("Failed to close browser"))
                    }
                }
            },
            handler,
        )
        .await;
        debug!("Browser closed");
        result
    }
}

/// Run `close`, then stop `handler` whatever the outcome.
async fn shutdown<F>(close: F, handler: JoinHandle<()>) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let result = close.await;
    handler.abort();
    // A cancelled task reports a JoinError; that is the expected outcome here.
    let _ = handler.await;
    result
}

pub struct ChromePage {
    page: Page,
}

#[async_trait]
impl RenderedPage for ChromePage {
    async fn click(&self, selector: &str) -> Result<()> {
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    async fn html(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }
}
