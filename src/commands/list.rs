//! List posts from the content source

use anyhow::Result;

use crate::listing::{ListingSession, LoadOutcome};
use crate::source::ContentSource;
use crate::view::ListingView;
use crate::Waypost;

/// Print the listing, paging through it the way a reader would
pub async fn run(app: &Waypost, source: &dyn ContentSource, all: bool) -> Result<()> {
    let mut session = ListingSession::new(app.config.per_page);

    match session.load_more(source).await {
        LoadOutcome::Loaded => {}
        LoadOutcome::Rejected(rejected) => anyhow::bail!("listing unavailable: {}", rejected),
        LoadOutcome::Failed(err) => return Err(err.into()),
    }

    if all {
        while session.can_load_more() {
            match session.load_more(source).await {
                LoadOutcome::Loaded => {}
                LoadOutcome::Rejected(_) => break,
                LoadOutcome::Failed(err) => return Err(err.into()),
            }
        }
    }

    let view = ListingView::from_session(&session, &app.config)?;
    let more = if view.can_load_more {
        ", more available"
    } else {
        ""
    };
    println!("Posts ({}{}):", view.posts.len(), more);
    for card in &view.posts {
        println!(
            "  {} - {} [{}]",
            card.published_on.as_deref().unwrap_or("unpublished"),
            card.title,
            card.uid
        );
    }

    Ok(())
}
