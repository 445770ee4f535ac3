use std::time::Duration;

use tracing::{debug, info};

use crate::browser::RenderedPage;
use crate::error::ScrapeError;

/// Posts revealed by one "load more" click.
pub const PAGE_SIZE: usize = 12;

/// Number of "load more" clicks needed to reveal `requested` posts.
///
/// At least one click is always made: the first page of posts only shows up after it.
pub fn pages_needed(requested: usize) -> Result<usize, ScrapeError> {
    if requested == 0 {
        return Err(ScrapeError::InvalidCount);
    }

    let full = requested / PAGE_SIZE;
    let pages = if full == 0 {
        1
    } else if requested % PAGE_SIZE == 0 {
        full
    } else {
        full + 1
    };
    Ok(pages)
}

/// Click the load-more control up to `pages` times, sleeping `delay` before each attempt.
///
/// A control that cannot be found or clicked means the feed is exhausted; pagination
/// stops there without error. Returns the number of successful clicks.
pub async fn paginate<P>(page: &P, load_more: &str, pages: usize, delay: Duration) -> usize
where
    P: RenderedPage + ?Sized,
{
    let mut clicked = 0;

    for attempt in 1..=pages {
        tokio::time::sleep(delay).await;

        match page.click(load_more).await {
            Ok(()) => {
                clicked += 1;
                debug!("Loaded page {}/{}", attempt, pages);
            }
            Err(e) => {
                info!(
                    "No more content after {} of {} pages ({})",
                    clicked, pages, e
                );
                break;
            }
        }
    }

    clicked
}
