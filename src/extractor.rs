use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::Selectors;
use crate::error::{PostField, ScrapeError};
use crate::models::Post;

// The feed only exposes the picture as a CSS background on the image link,
// so the URL is pulled out of the style attribute by pattern.
static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^'"()\s]+\.jpg"#).unwrap());

/// First `http(s)://...jpg` URL inside an inline style, if any.
pub fn image_url_from_style(style: &str) -> Option<&str> {
    IMAGE_URL.find(style).map(|m| m.as_str())
}

/// Parses a fully paginated profile page into posts.
pub struct PostExtractor {
    post: Selector,
    image_link: Selector,
    caption: Selector,
    comments: Selector,
    likes: Selector,
    created_time: Selector,
}

impl PostExtractor {
    pub fn new(selectors: &Selectors) -> Result<Self, ScrapeError> {
        Ok(Self {
            post: compile(&selectors.post)?,
            image_link: compile(&selectors.image_link)?,
            caption: compile(&selectors.caption)?,
            comments: compile(&selectors.comments)?,
            likes: compile(&selectors.likes)?,
            created_time: compile(&selectors.created_time)?,
        })
    }

    /// Extract at most `limit` posts in document order.
    ///
    /// Containers without an image link are filler (ads, placeholders) and are skipped
    /// without consuming an id. A container with an image but a missing text field is
    /// a markup change and fails the whole extraction.
    pub fn extract(&self, html: &str, limit: usize) -> Result<Vec<Post>, ScrapeError> {
        let document = Html::parse_document(html);
        let mut posts = Vec::with_capacity(limit);

        for container in document.select(&self.post) {
            if posts.len() >= limit {
                break;
            }

            let id = posts.len() + 1;
            let Some(link) = container.select(&self.image_link).next() else {
                debug!("Skipping container without image link");
                continue;
            };

            let style = link
                .value()
                .attr("style")
                .ok_or(ScrapeError::MissingStyle { post: id })?;
            let image_url = image_url_from_style(style)
                .ok_or(ScrapeError::MissingImageUrl { post: id })?
                .to_string();

            posts.push(Post {
                id,
                caption: self.field(container, &self.caption, PostField::Caption, id)?,
                comments: self.field(container, &self.comments, PostField::Comments, id)?,
                likes: self.field(container, &self.likes, PostField::Likes, id)?,
                created_time: self.field(
                    container,
                    &self.created_time,
                    PostField::CreatedTime,
                    id,
                )?,
                image_url,
            });
        }

        Ok(posts)
    }

    fn field(
        &self,
        container: ElementRef<'_>,
        selector: &Selector,
        field: PostField,
        post: usize,
    ) -> Result<String, ScrapeError> {
        container
            .select(selector)
            .next()
            .map(|el| el.text().collect())
            .ok_or(ScrapeError::MissingField { post, field })
    }
}

fn compile(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_html(n: usize) -> String {
        format!(
            r#"<div class="item">
                <a class="mask" style="background-image: url('https://cdn.example.com/t51/{n}_n.jpg');" href="/p/{n}"></a>
                <p class="caption">caption {n}</p>
                <span class="comments">{n}</span>
                <span class="likes">{likes}</span>
                <span class="created_time">{n} days ago</span>
            </div>"#,
            likes = n * 10
        )
    }

    fn filler_html() -> &'static str {
        r#"<div class="item"><div class="ad">sponsored</div></div>"#
    }

    fn page(body: &str) -> String {
        format!("<html><body><div class=\"feed\">{body}</div></body></html>")
    }

    fn extractor() -> PostExtractor {
        PostExtractor::new(&Selectors::default()).unwrap()
    }

    #[test]
    fn extracts_all_fields() {
        let posts = extractor().extract(&page(&post_html(1)), 5).unwrap();
        assert_eq!(
            posts,
            vec![Post {
                id: 1,
                caption: "caption 1".to_string(),
                comments: "1".to_string(),
                likes: "10".to_string(),
                created_time: "1 days ago".to_string(),
                image_url: "https://cdn.example.com/t51/1_n.jpg".to_string(),
            }]
        );
    }

    #[test]
    fn stops_at_limit() {
        let body: String = (1..=15).map(post_html).collect();
        let posts = extractor().extract(&page(&body), 10).unwrap();

        assert_eq!(posts.len(), 10);
        let ids: Vec<usize> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(posts[9].caption, "caption 10");
    }

    #[test]
    fn filler_does_not_consume_ids() {
        let body = format!(
            "{}{}{}{}{}",
            filler_html(),
            post_html(1),
            filler_html(),
            filler_html(),
            post_html(2)
        );
        let posts = extractor().extract(&page(&body), 12).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].caption, "caption 2");
    }

    #[test]
    fn fewer_posts_than_requested() {
        let body: String = (1..=3).map(post_html).collect();
        assert_eq!(extractor().extract(&page(&body), 24).unwrap().len(), 3);
    }

    #[test]
    fn missing_caption_is_an_error() {
        let broken = r#"<div class="item">
            <a class="mask" style="background-image: url('https://cdn.example.com/x.jpg')"></a>
            <span class="comments">1</span>
            <span class="likes">2</span>
            <span class="created_time">now</span>
        </div>"#;
        let body = format!("{}{}", post_html(1), broken);

        let err = extractor().extract(&page(&body), 5).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingField { post: 2, field: PostField::Caption }
        ));
    }

    #[test]
    fn broken_container_past_limit_is_never_read() {
        let broken = r#"<div class="item"><a class="mask" style=""></a></div>"#;
        let body = format!("{}{}", post_html(1), broken);
        assert_eq!(extractor().extract(&page(&body), 1).unwrap().len(), 1);
    }

    #[test]
    fn image_link_without_jpg_is_an_error() {
        let body = r#"<div class="item"><a class="mask" style="background: none"></a></div>"#;
        assert!(matches!(
            extractor().extract(&page(body), 1),
            Err(ScrapeError::MissingImageUrl { post: 1 })
        ));

        let body = r#"<div class="item"><a class="mask"></a></div>"#;
        assert!(matches!(
            extractor().extract(&page(body), 1),
            Err(ScrapeError::MissingStyle { post: 1 })
        ));
    }

    #[test]
    fn text_is_kept_raw() {
        let body = r#"<div class="item">
            <a class="mask" style="background-image:url(https://cdn.example.com/a.jpg)"></a>
            <p class="caption"> Sunset <b>#beach</b> </p>
            <span class="comments">1.2k</span>
            <span class="likes">3,400</span>
            <span class="created_time">2017-09-08 18:10</span>
        </div>"#;
        let post = &extractor().extract(&page(body), 1).unwrap()[0];
        assert_eq!(post.caption, " Sunset #beach ");
        assert_eq!(post.comments, "1.2k");
        assert_eq!(post.likes, "3,400");
        assert_eq!(post.image_url, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn image_url_pattern() {
        assert_eq!(
            image_url_from_style("background-image: url('http://a.b/c/d.jpg');"),
            Some("http://a.b/c/d.jpg")
        );
        assert_eq!(
            image_url_from_style(r#"background-image: url("https://a.b/1.jpg"), url("https://a.b/2.jpg")"#),
            Some("https://a.b/1.jpg")
        );
        assert_eq!(image_url_from_style("background-image: url('https://a.b/c.png')"), None);
    }

    #[test]
    fn invalid_selector_is_reported() {
        let selectors = Selectors {
            post: "div[".to_string(),
            ..Selectors::default()
        };
        assert!(matches!(
            PostExtractor::new(&selectors),
            Err(ScrapeError::InvalidSelector { .. })
        ));
    }
}
