use async_trait::async_trait;

use hourbook_core::dispatch::{BookingNotice, CancellationMail, Mailer, Notifier};

use crate::worker::{DeliveryJob, DispatchHandle};

/// Queue-backed [`Notifier`]: enqueues and returns immediately.
#[derive(Clone)]
pub struct QueuedNotifier {
    handle: DispatchHandle,
}

impl QueuedNotifier {
    pub fn new(handle: DispatchHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl Notifier for QueuedNotifier {
    async fn notify(&self, notice: BookingNotice) -> eyre::Result<()> {
        self.handle.enqueue(DeliveryJob::Notice(notice))
    }
}

/// Queue-backed [`Mailer`]: enqueues and returns immediately.
#[derive(Clone)]
pub struct QueuedMailer {
    handle: DispatchHandle,
}

impl QueuedMailer {
    pub fn new(handle: DispatchHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl Mailer for QueuedMailer {
    async fn send_cancellation(&self, mail: CancellationMail) -> eyre::Result<()> {
        self.handle.enqueue(DeliveryJob::Mail(mail))
    }
}
