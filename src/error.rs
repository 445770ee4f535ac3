use std::fmt;

use thiserror::Error;

/// Text fields every post container must carry next to its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Caption,
    Comments,
    Likes,
    CreatedTime,
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostField::Caption => "caption",
            PostField::Comments => "comments",
            PostField::Likes => "likes",
            PostField::CreatedTime => "created_time",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("requested post count must be at least 1")]
    InvalidCount,

    #[error("invalid account name {0:?}")]
    InvalidAccount(String),

    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("post {post} has an image but no {field} element")]
    MissingField { post: usize, field: PostField },

    #[error("image link of post {post} has no style attribute")]
    MissingStyle { post: usize },

    #[error("no .jpg url found in image style of post {post}")]
    MissingImageUrl { post: usize },
}
