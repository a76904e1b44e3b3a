use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use hourbook_core::dispatch::{CancellationMail, Mailer};

/// Relays cancellation mail to an external mail service over HTTP.
///
/// Template rendering and SMTP delivery belong to that service; this side
/// only ships the template name and context.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_cancellation(&self, mail: CancellationMail) -> eyre::Result<()> {
        let payload = json!({
            "to": mail.to,
            "subject": "Appointment cancelled",
            "template": "cancellation",
            "context": {
                "provider_name": mail.provider_name,
                "client_name": mail.client_name,
                "date": mail.formatted_date,
            },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(eyre::eyre!(
                "mail relay responded with status {}",
                response.status()
            ));
        }

        Ok(())
    }
}

/// Mailer used when no relay endpoint is configured: drops every mail with
/// a warning so cancellations keep working in environments without mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_cancellation(&self, mail: CancellationMail) -> eyre::Result<()> {
        warn!(to = %mail.to, "mail delivery disabled; dropping cancellation mail");
        Ok(())
    }
}
