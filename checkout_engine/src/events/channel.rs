//! Simple stateless pub-sub event plumbing.
//!
//! Hooks subscribe to checkout events (progress, fee-leg failures, completion) and react to
//! them. Handlers are stateless: they receive the event payload and nothing else, so they can
//! never race the orchestrator for session state. Handlers may be async.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::{sync::mpsc, task::JoinSet};

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, listener) = mpsc::channel(buffer_size);
        Self { listener, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Consume events until the last producer is dropped, then wait for any in-flight handler
    /// invocations to finish before returning.
    pub async fn start_handler(mut self) {
        debug!("📨️ Starting event handler");
        // The handler keeps a sender of its own so that subscribe() works before startup. It has
        // to go now, or the receive loop below would never terminate.
        drop(self.sender);
        let mut jobs = JoinSet::new();
        while let Some(event) = self.listener.recv().await {
            trace!("📨️ Dispatching event to hook");
            let handler = Arc::clone(&self.handler);
            jobs.spawn(async move { (handler)(event).await });
        }
        while let Some(finished) = jobs.join_next().await {
            if let Err(e) = finished {
                warn!("📨️ An event hook did not run to completion: {e}");
            }
        }
        debug!("📨️ Event handler has shut down");
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📨️ Failed to publish event: {e}");
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    #[tokio::test]
    async fn events_from_all_producers_reach_the_hook() {
        let _ = env_logger::try_init();
        let total = Arc::new(AtomicU64::new(0));
        let tally = total.clone();
        let handler = Arc::new(move |v: u64| {
            let total = total.clone();
            Box::pin(async move {
                total.fetch_add(v, Ordering::SeqCst);
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        });
        let event_handler = EventHandler::new(4, handler);
        let producer_a = event_handler.subscribe();
        let producer_b = event_handler.subscribe();
        tokio::spawn(async move {
            for v in 1..=5u64 {
                producer_a.publish_event(v).await;
            }
        });
        tokio::spawn(async move {
            for v in 6..=10u64 {
                producer_b.publish_event(v).await;
            }
        });

        event_handler.start_handler().await;
        assert_eq!(tally.load(Ordering::SeqCst), 55);
    }
}
