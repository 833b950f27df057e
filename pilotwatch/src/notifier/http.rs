use std::time::Duration;

use serde::Serialize;

use crate::error::{ErrorKind, PilotError, PilotResult};
use crate::notifier::base::Notifier;

#[derive(Serialize)]
struct NotificationPayload<'a> {
    subject: &'a str,
    body: &'a str,
}

/// Notifier that posts notifications to a webhook endpoint as JSON.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpNotifier {
    /// Creates a notifier for the given endpoint.
    ///
    /// The bearer token is attached to every request when present. If the
    /// client cannot be constructed with the requested timeout, a default
    /// client is used instead.
    pub fn new(endpoint: String, auth_token: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint,
            auth_token,
        }
    }
}

impl Notifier for HttpNotifier {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn notify(&self, subject: &str, body: &str) -> PilotResult<()> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&NotificationPayload { subject, body });

        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            PilotError::from((
                ErrorKind::NotificationFailed,
                "failed to reach notification endpoint",
            ))
            .with_source(err)
        })?;

        response.error_for_status().map_err(|err| {
            PilotError::from((
                ErrorKind::NotificationFailed,
                "notification endpoint rejected the request",
            ))
            .with_source(err)
        })?;

        Ok(())
    }
}
