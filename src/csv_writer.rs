use anyhow::Result;
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::models::Post;

pub const HEADER: [&str; 5] = ["ID", "Post", "CommentCount", "LikeCount", "PublishDate"];

/// One table row. The image URL is left out; the id doubles as the image file name.
#[derive(Debug, Serialize)]
struct PostRow<'a> {
    #[serde(rename = "ID")]
    id: usize,
    #[serde(rename = "Post")]
    caption: &'a str,
    #[serde(rename = "CommentCount")]
    comments: &'a str,
    #[serde(rename = "LikeCount")]
    likes: &'a str,
    #[serde(rename = "PublishDate")]
    created_time: &'a str,
}

impl<'a> From<&'a Post> for PostRow<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: post.id,
            caption: &post.caption,
            comments: &post.comments,
            likes: &post.likes,
            created_time: &post.created_time,
        }
    }
}

pub struct CsvExporter {
    writer: Writer<File>,
}

impl CsvExporter {
    pub fn new(path: &Path) -> Result<Self> {
        // The header is written explicitly so an empty batch still gets one.
        let writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        Ok(Self { writer })
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(HEADER)?;
        Ok(())
    }

    pub fn write_post(&mut self, post: &Post) -> Result<()> {
        self.writer.serialize(PostRow::from(post))?;
        Ok(())
    }

    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a whole batch, header first.
pub fn write_posts(path: &Path, posts: &[Post]) -> Result<()> {
    let mut exporter = CsvExporter::new(path)?;
    exporter.write_header()?;
    for post in posts {
        exporter.write_post(post)?;
    }
    exporter.finalize()
}
