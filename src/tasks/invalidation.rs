//! Invalidation Listener
//!
//! Subscriber on the invalidation channel. Events are advisory: a lagging
//! listener skips what it missed and keeps going.

use tokio::sync::broadcast::{error::RecvError, Receiver};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Spawns a task that logs every invalidated key until the channel closes.
///
/// `on_event` runs for each key received, in order.
pub fn spawn_invalidation_listener<F>(mut events: Receiver<String>, mut on_event: F) -> JoinHandle<()>
where
    F: FnMut(&str) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(key) => {
                    info!(key = %key, "received cache invalidation");
                    on_event(&key);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "invalidation listener lagged, events dropped");
                }
                Err(RecvError::Closed) => {
                    info!("invalidation channel closed, listener stopping");
                    break;
                }
            }
        }
    })
}
