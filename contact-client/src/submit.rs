use serde::{Deserialize, Serialize};

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

pub const DEFAULT_RELAY_PATH: &str = "/contact.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fields of the contact form, posted form-encoded to the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed(SubmitFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitFailure {
    #[error("Another submission is still in flight")]
    InFlight,

    #[error("Relay rejected the submission ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to reach the relay: {0}")]
    Network(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts submissions to the relay endpoint, one at a time.
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: String,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ContactClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        Self::with_options(base_url, DEFAULT_RELAY_PATH, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        base_url: &str,
        relay_path: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                relay_path.trim_start_matches('/')
            ),
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Sends one submission. A call made while another is still awaiting the
    /// relay fails with [`SubmitFailure::InFlight`] without touching the network.
    pub async fn submit(&self, submission: &Submission) -> SubmitOutcome {
        let Some(_guard) = self.try_begin() else {
            return SubmitOutcome::Failed(SubmitFailure::InFlight);
        };
        self.post(submission).await
    }

    /// Takes the in-flight flag, or returns `None` when it is already held.
    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!("Ignoring contact submission while another is in flight");
            return None;
        }
        Some(InFlightGuard(&self.in_flight))
    }

    async fn post(&self, submission: &Submission) -> SubmitOutcome {
        tracing::debug!("Posting contact form to {}", self.endpoint);

        let response = match self.client.post(&self.endpoint).form(submission).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to reach contact relay: {e}");
                return SubmitOutcome::Failed(SubmitFailure::Network(e.to_string()));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!("Contact form submitted");
            return SubmitOutcome::Sent;
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };
        tracing::error!("Contact relay returned {}: {}", status, message);

        SubmitOutcome::Failed(SubmitFailure::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// What the contact form shows: field values and the two status indicators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: Submission,
    pub success_visible: bool,
    pub error_visible: bool,
}

impl FormState {
    /// Hides both indicators and returns the values to send.
    pub fn begin_submit(&mut self) -> Submission {
        self.success_visible = false;
        self.error_visible = false;
        self.fields.clone()
    }

    /// Success shows the success indicator and resets the form. A failure
    /// shows the error indicator and keeps the values so they can be resent.
    /// A submission dropped because another was in flight changes nothing.
    pub fn apply(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Sent => {
                self.success_visible = true;
                self.fields = Submission::default();
            }
            SubmitOutcome::Failed(SubmitFailure::InFlight) => {}
            SubmitOutcome::Failed(_) => self.error_visible = true,
        }
    }
}

/// Runs a full submit cycle for `form` against `client`. The form is left
/// untouched when another submission is still in flight.
pub async fn submit_form(client: &ContactClient, form: &mut FormState) -> SubmitOutcome {
    let Some(_guard) = client.try_begin() else {
        return SubmitOutcome::Failed(SubmitFailure::InFlight);
    };

    let submission = form.begin_submit();
    let outcome = client.post(&submission).await;
    form.apply(&outcome);
    outcome
}
