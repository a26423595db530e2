//! Show a single post

use anyhow::Result;

use crate::navigation::{self, Neighbors};
use crate::source::ContentSource;
use crate::view::PostView;
use crate::Waypost;

/// Print one post with its reading time and chronological neighbors
pub async fn run(app: &Waypost, source: &dyn ContentSource, uid: &str) -> Result<()> {
    let post = source.fetch_by_uid(uid).await?;

    let found = match post.first_publication_date.as_deref() {
        Some(date) => {
            let index = source.fetch_full_index().await?;
            navigation::neighbors(&index, &post.uid, date)?
        }
        // An undated document has no place on the timeline
        None => Neighbors::default(),
    };

    let view = PostView::build(&post, found, &app.config)?;

    println!("{}", view.title);
    if !view.subtitle.is_empty() {
        println!("{}", view.subtitle);
    }
    println!();
    if let Some(date) = &view.published_on {
        println!("  date:    {}", date);
    }
    println!("  author:  {}", view.author);
    println!("  reading: {} min", view.reading_minutes);
    if let Some(previous) = &view.previous {
        println!("  {}: {} [{}]", previous.label, previous.title, previous.uid);
    }
    if let Some(next) = &view.next {
        println!("  {}: {} [{}]", next.label, next.title, next.uid);
    }

    for block in &post.content {
        println!();
        if let Some(heading) = &block.heading {
            println!("## {}", heading);
        }
        println!("{}", block.body.as_text());
    }

    Ok(())
}
