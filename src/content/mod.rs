//! Content module - post models and structured rich text

mod post;
mod richtext;

pub use post::{Banner, ContentBlock, Post, PostRef, PostSummary};
pub use richtext::{RichText, TextNode};
