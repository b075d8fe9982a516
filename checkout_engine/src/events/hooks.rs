use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{
    CheckoutCompleteEvent,
    EventHandler,
    EventProducer,
    FeeTransferFailedEvent,
    Handler,
    ProgressEvent,
};

/// The producer ends of the event channels, held by the orchestrator.
#[derive(Default, Clone)]
pub struct EventProducers {
    pub progress_producer: Vec<EventProducer<ProgressEvent>>,
    pub fee_failure_producer: Vec<EventProducer<FeeTransferFailedEvent>>,
    pub checkout_complete_producer: Vec<EventProducer<CheckoutCompleteEvent>>,
}

pub struct EventHandlers {
    pub on_progress: Option<EventHandler<ProgressEvent>>,
    pub on_fee_transfer_failed: Option<EventHandler<FeeTransferFailedEvent>>,
    pub on_checkout_complete: Option<EventHandler<CheckoutCompleteEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_progress = hooks.on_progress.map(|f| EventHandler::new(buffer_size, f));
        let on_fee_transfer_failed = hooks.on_fee_transfer_failed.map(|f| EventHandler::new(buffer_size, f));
        let on_checkout_complete = hooks.on_checkout_complete.map(|f| EventHandler::new(buffer_size, f));
        Self { on_progress, on_fee_transfer_failed, on_checkout_complete }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_progress {
            result.progress_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_fee_transfer_failed {
            result.fee_failure_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_checkout_complete {
            result.checkout_complete_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_progress {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_fee_transfer_failed {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_checkout_complete {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

/// Async callbacks to attach to checkout events. The UI typically hooks `on_progress`; a
/// back-office process hooks `on_fee_transfer_failed` to reconcile uncollected fees.
#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_progress: Option<Handler<ProgressEvent>>,
    pub on_fee_transfer_failed: Option<Handler<FeeTransferFailedEvent>>,
    pub on_checkout_complete: Option<Handler<CheckoutCompleteEvent>>,
}

impl EventHooks {
    pub fn on_progress<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(ProgressEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_progress = Some(Arc::new(f));
        self
    }

    pub fn on_fee_transfer_failed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(FeeTransferFailedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_fee_transfer_failed = Some(Arc::new(f));
        self
    }

    pub fn on_checkout_complete<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(CheckoutCompleteEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_checkout_complete = Some(Arc::new(f));
        self
    }
}
