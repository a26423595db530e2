//! HTTP front-end
//!
//! Serves the view models as JSON and keeps one listing session per
//! client: `POST /listing` opens a session with its first page loaded,
//! `POST /listing/:id/more` performs one load-more round trip, and
//! `GET /posts/:uid` assembles the document view with its neighbors.
//! Sessions live in memory for the lifetime of the process.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::SiteConfig;
use crate::helpers::date::InvalidDate;
use crate::listing::{ListingSession, LoadOutcome, PageRequest};
use crate::navigation::{self, Neighbors};
use crate::source::{ContentSource, SourceError};
use crate::view::{ListingView, PostView};

/// Sessions kept before the oldest are evicted
const MAX_SESSIONS: usize = 1024;

/// Server state
struct ServerState {
    config: SiteConfig,
    source: Arc<dyn ContentSource>,
    sessions: Mutex<SessionStore>,
}

/// In-memory session store with oldest-first eviction
#[derive(Default)]
struct SessionStore {
    order: VecDeque<Uuid>,
    by_id: HashMap<Uuid, ListingSession>,
}

impl SessionStore {
    fn insert(&mut self, id: Uuid, session: ListingSession) {
        while self.by_id.len() >= MAX_SESSIONS {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.by_id.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(id);
        self.by_id.insert(id, session);
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut ListingSession> {
        self.by_id.get_mut(id)
    }
}

/// Start the front-end server
pub async fn start(
    config: SiteConfig,
    source: Arc<dyn ContentSource>,
    ip: &str,
    port: u16,
) -> Result<()> {
    let state = Arc::new(ServerState {
        config,
        source,
        sessions: Mutex::new(SessionStore::default()),
    });

    let app = Router::new()
        .route("/listing", post(open_listing))
        .route("/listing/:id", get(listing_view))
        .route("/listing/:id/more", post(load_more))
        .route("/posts/:uid", get(post_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Error payload for API responses
#[derive(Serialize)]
struct ApiError {
    error: String,
    retryable: bool,
}

/// A freshly opened session and its first view
#[derive(Serialize)]
struct SessionEnvelope {
    session: String,
    view: ListingView,
}

/// Open a listing session and load its first page
///
/// A failed first fetch still opens the session: the view reports the
/// failure and the client retries through the load-more endpoint.
async fn open_listing(State(state): State<Arc<ServerState>>) -> Response {
    let mut session = ListingSession::new(state.config.per_page);
    if let LoadOutcome::Failed(err) = session.load_more(state.source.as_ref()).await {
        tracing::warn!("initial listing fetch failed: {}", err);
    }

    let view = match ListingView::from_session(&session, &state.config) {
        Ok(view) => view,
        Err(err) => return view_error(err),
    };

    let id = Uuid::new_v4();
    state.sessions.lock().await.insert(id, session);
    tracing::debug!("opened listing session {}", id);

    (
        StatusCode::CREATED,
        Json(SessionEnvelope {
            session: id.to_string(),
            view,
        }),
    )
        .into_response()
}

/// Current view of a session
async fn listing_view(State(state): State<Arc<ServerState>>, Path(id): Path<Uuid>) -> Response {
    let mut sessions = state.sessions.lock().await;
    let Some(session) = sessions.get_mut(&id) else {
        return unknown_session();
    };
    match ListingView::from_session(session, &state.config) {
        Ok(view) => Json(view).into_response(),
        Err(err) => view_error(err),
    }
}

/// One load-more round trip for a session
///
/// The session lock is held only for the state transitions; the fetch
/// runs without it, so a concurrent trigger is rejected by the session
/// phase instead of being serialized behind the lock.
async fn load_more(State(state): State<Arc<ServerState>>, Path(id): Path<Uuid>) -> Response {
    let (request, page_size) = {
        let mut sessions = state.sessions.lock().await;
        let Some(session) = sessions.get_mut(&id) else {
            return unknown_session();
        };
        match session.request_more() {
            Ok(request) => (request, session.page_size()),
            Err(rejected) => {
                // Nothing changed; answer with the unchanged view
                tracing::debug!("load-more rejected for {}: {}", id, rejected);
                return match ListingView::from_session(session, &state.config) {
                    Ok(view) => Json(view).into_response(),
                    Err(err) => view_error(err),
                };
            }
        }
    };

    let cursor = match &request {
        PageRequest::First => None,
        PageRequest::Continue(token) => Some(token.as_str()),
    };
    let fetched = state.source.query_listing(page_size, cursor).await;

    let mut sessions = state.sessions.lock().await;
    let Some(session) = sessions.get_mut(&id) else {
        // Evicted while the fetch was in flight
        return unknown_session();
    };
    match fetched {
        Ok(page) => session.complete(page),
        Err(err) => {
            tracing::warn!("listing fetch failed for {}: {}", id, err);
            session.fail();
        }
    }

    match ListingView::from_session(session, &state.config) {
        Ok(view) => Json(view).into_response(),
        Err(err) => view_error(err),
    }
}

/// Full post page: document, reading time, neighbors
async fn post_view(State(state): State<Arc<ServerState>>, Path(uid): Path<String>) -> Response {
    let post = match state.source.fetch_by_uid(&uid).await {
        Ok(post) => post,
        Err(err) => return source_error(&err),
    };

    let found = match &post.first_publication_date {
        Some(date) => {
            let index = match state.source.fetch_full_index().await {
                Ok(index) => index,
                Err(err) => return source_error(&err),
            };
            match navigation::neighbors(&index, &post.uid, date) {
                Ok(found) => found,
                Err(err) => return view_error(err),
            }
        }
        // An undated document has no place on the timeline
        None => Neighbors::default(),
    };

    match PostView::build(&post, found, &state.config) {
        Ok(view) => Json(view).into_response(),
        Err(err) => view_error(err),
    }
}

fn unknown_session() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            error: "unknown listing session".to_string(),
            retryable: false,
        }),
    )
        .into_response()
}

fn source_error(err: &SourceError) -> Response {
    let status = match err {
        SourceError::NotFound(_) => StatusCode::NOT_FOUND,
        _ if err.is_retryable() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiError {
            error: err.to_string(),
            retryable: err.is_retryable(),
        }),
    )
        .into_response()
}

fn view_error(err: InvalidDate) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            error: err.to_string(),
            retryable: false,
        }),
    )
        .into_response()
}
