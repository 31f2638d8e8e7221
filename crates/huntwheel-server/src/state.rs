use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use huntwheel_core::reveal::SharedSession;
use huntwheel_core::session::Session;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    /// Cancels an in-flight reveal task on shutdown.
    pub cancel: CancellationToken,
    pub sse_subscriber_count: Arc<AtomicUsize>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            cancel: CancellationToken::new(),
            sse_subscriber_count: Arc::new(AtomicUsize::new(0)),
            config: Arc::new(config),
        }
    }
}

/// RAII decrement of a connection counter when a stream drops.
pub struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    pub fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
