use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio::sync::broadcast;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use shopfront_catalog::{ProductCatalog, StockService};
use shopfront_store::{BroadcastNotifier, CartStore, Notice, Notifier, SnapshotStore, TracingNotifier};

/// Notifier used by the running service: every notice goes to the log and is
/// fanned out to SSE subscribers.
#[derive(Debug)]
pub struct ApiNotifier {
    log: TracingNotifier,
    realtime: Arc<BroadcastNotifier>,
}

impl ApiNotifier {
    pub fn new(realtime: Arc<BroadcastNotifier>) -> Self {
        Self {
            log: TracingNotifier,
            realtime,
        }
    }
}

impl Notifier for ApiNotifier {
    fn notify(&self, notice: Notice) {
        self.log.notify(notice.clone());
        self.realtime.notify(notice);
    }
}

/// Everything the handlers need: the cart store plus the notice channel that
/// feeds the SSE stream.
pub struct AppServices {
    store: CartStore,
    realtime: Arc<BroadcastNotifier>,
}

impl AppServices {
    /// Wire up the store against the given collaborators, hydrating the cart
    /// from the snapshot store.
    pub async fn open(
        products: Arc<dyn ProductCatalog>,
        stock: Arc<dyn StockService>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        let realtime = Arc::new(BroadcastNotifier::new(256));
        let notifier = Arc::new(ApiNotifier::new(realtime.clone()));
        let store = CartStore::open(products, stock, snapshots, notifier).await;

        Self { store, realtime }
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.realtime.subscribe()
    }
}

/// SSE stream of user notices fed from the broadcast channel.
///
/// Lagging receivers drop messages rather than backpressure the store.
pub fn notice_sse_stream(
    services: Arc<AppServices>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.subscribe_notices();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(notice) => {
            let data = serde_json::to_string(&notice).unwrap_or_else(|_| "{}".to_string());
            Some(Ok(SseEvent::default().event("notice").data(data)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
