//! Realtime notice stream for the storefront UI.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{Router, extract::Extension, response::sse::Event as SseEvent, routing::get};

use crate::app::services::{self, AppServices};

pub fn router() -> Router {
    Router::new().route("/notices", get(stream_notices))
}

/// GET /stream/notices
///
/// Streams every user-facing notice as a Server-Sent Event, so the UI can
/// render toasts for operations regardless of which client triggered them.
pub async fn stream_notices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    services::notice_sse_stream(services)
}
