use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use hourbook_core::dispatch::{BookingNotice, CancellationMail, Mailer, Notifier};

/// A unit of outbound delivery work.
#[derive(Debug, Clone)]
pub enum DeliveryJob {
    Notice(BookingNotice),
    Mail(CancellationMail),
}

/// Sending half of the dispatch queue.
///
/// `enqueue` never waits: when the queue is full the job is rejected and
/// the caller logs the failure, keeping the request path bounded.
#[derive(Clone)]
pub struct DispatchHandle {
    tx: mpsc::Sender<DeliveryJob>,
}

impl DispatchHandle {
    pub fn enqueue(&self, job: DeliveryJob) -> eyre::Result<()> {
        self.tx
            .try_send(job)
            .map_err(|err| eyre::eyre!("dispatch queue rejected job: {err}"))
    }
}

/// Spawns the delivery worker.
///
/// Jobs are drained in order; a failed delivery is logged and dropped (no
/// retries in the core — see the dispatch contract). The worker exits once
/// every handle has been dropped and the queue is empty.
pub fn spawn(
    notifier: Arc<dyn Notifier>,
    mailer: Arc<dyn Mailer>,
    capacity: usize,
) -> (DispatchHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<DeliveryJob>(capacity);

    let worker = tokio::spawn(async move {
        info!("Dispatch worker started");

        while let Some(job) = rx.recv().await {
            match job {
                DeliveryJob::Notice(notice) => {
                    if let Err(err) = notifier.notify(notice).await {
                        warn!("failed to deliver booking notice: {err}");
                    }
                }
                DeliveryJob::Mail(mail) => {
                    if let Err(err) = mailer.send_cancellation(mail).await {
                        warn!("failed to deliver cancellation mail: {err}");
                    }
                }
            }
        }

        info!("Dispatch worker stopped");
    });

    (DispatchHandle { tx }, worker)
}
