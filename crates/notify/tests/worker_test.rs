use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use hourbook_core::dispatch::{BookingNotice, CancellationMail, Mailer, Notifier};
use hourbook_notify::queue::{QueuedMailer, QueuedNotifier};
use hourbook_notify::worker;

struct RecordingNotifier(Arc<Mutex<Vec<BookingNotice>>>);

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notice: BookingNotice) -> eyre::Result<()> {
        self.0.lock().expect("lock").push(notice);
        Ok(())
    }
}

struct RecordingMailer(Arc<Mutex<Vec<CancellationMail>>>);

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_cancellation(&self, mail: CancellationMail) -> eyre::Result<()> {
        self.0.lock().expect("lock").push(mail);
        Ok(())
    }
}

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_cancellation(&self, _mail: CancellationMail) -> eyre::Result<()> {
        Err(eyre::eyre!("mail relay responded with status 502"))
    }
}

/// Backend that never completes, pinning the worker so the queue fills.
struct StalledMailer;

#[async_trait]
impl Mailer for StalledMailer {
    async fn send_cancellation(&self, _mail: CancellationMail) -> eyre::Result<()> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

fn notice(content: &str) -> BookingNotice {
    BookingNotice {
        recipient_id: Uuid::new_v4(),
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

fn mail() -> CancellationMail {
    CancellationMail {
        to: "Barber Bob <bob@example.com>".to_string(),
        provider_name: "Barber Bob".to_string(),
        client_name: "Ana Client".to_string(),
        formatted_date: "Tuesday, June 10 at 14:00".to_string(),
    }
}

#[tokio::test]
async fn test_worker_delivers_enqueued_jobs_in_order() {
    let notices = Arc::new(Mutex::new(Vec::new()));
    let mails = Arc::new(Mutex::new(Vec::new()));

    let (handle, worker) = worker::spawn(
        Arc::new(RecordingNotifier(notices.clone())),
        Arc::new(RecordingMailer(mails.clone())),
        8,
    );

    let notifier = QueuedNotifier::new(handle.clone());
    let mailer = QueuedMailer::new(handle);

    let first = notice("first");
    let second = notice("second");

    notifier.notify(first.clone()).await.expect("enqueue");
    notifier.notify(second.clone()).await.expect("enqueue");
    mailer.send_cancellation(mail()).await.expect("enqueue");

    // Dropping every handle closes the queue; the worker drains and exits.
    drop(notifier);
    drop(mailer);
    worker.await.expect("worker should finish cleanly");

    assert_eq!(*notices.lock().expect("lock"), vec![first, second]);
    assert_eq!(*mails.lock().expect("lock"), vec![mail()]);
}

#[tokio::test]
async fn test_worker_survives_backend_failure() {
    let notices = Arc::new(Mutex::new(Vec::new()));

    let (handle, worker) = worker::spawn(
        Arc::new(RecordingNotifier(notices.clone())),
        Arc::new(FailingMailer),
        8,
    );

    let notifier = QueuedNotifier::new(handle.clone());
    let mailer = QueuedMailer::new(handle);

    // The failed mail is logged and dropped; the notice behind it still
    // gets delivered.
    mailer.send_cancellation(mail()).await.expect("enqueue");
    let followup = notice("after the failure");
    notifier.notify(followup.clone()).await.expect("enqueue");

    drop(notifier);
    drop(mailer);
    worker.await.expect("worker should finish cleanly");

    assert_eq!(*notices.lock().expect("lock"), vec![followup]);
}

#[tokio::test]
async fn test_full_queue_rejects_instead_of_blocking() {
    let notices = Arc::new(Mutex::new(Vec::new()));

    let (handle, _worker) = worker::spawn(
        Arc::new(RecordingNotifier(notices)),
        Arc::new(StalledMailer),
        1,
    );

    let mailer = QueuedMailer::new(handle);

    // One job may be in flight and one may sit in the queue; within a few
    // attempts the bounded queue must start rejecting.
    let mut rejected = false;
    for _ in 0..5 {
        if mailer.send_cancellation(mail()).await.is_err() {
            rejected = true;
            break;
        }
    }

    assert!(rejected, "bounded queue should reject when full");
}
