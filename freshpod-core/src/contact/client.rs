//! Contact submission flow: validate, throttle, send, classify

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::form::{ContactForm, Interest};
use super::limiter::SubmitRateLimiter;
use super::transport::ContactTransport;
use crate::error::ContactError;

/// Relay status values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Success,
    RateLimited,
    Spam,
    Forbidden,
    Other(String),
}

impl SubmitStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "success" => SubmitStatus::Success,
            "rate_limited" => SubmitStatus::RateLimited,
            "spam" => SubmitStatus::Spam,
            "forbidden" => SubmitStatus::Forbidden,
            other => SubmitStatus::Other(other.to_string()),
        }
    }

    /// Message shown to the visitor for this status
    pub fn message(&self, interest: Option<Interest>) -> &'static str {
        match self {
            SubmitStatus::Success => success_message(interest),
            SubmitStatus::RateLimited => "Please wait before submitting again.",
            SubmitStatus::Spam => "Spam detected.",
            SubmitStatus::Forbidden => "Unauthorized request.",
            SubmitStatus::Other(_) => "Something went wrong. Please try again.",
        }
    }
}

fn success_message(interest: Option<Interest>) -> &'static str {
    match interest {
        Some(Interest::Individual) => "Thank you for reaching out! We'll get back to you soon.",
        Some(Interest::Distribution) => {
            "Welcome to collaboration! We will contact you soon about distributorship details."
        }
        Some(Interest::Corporate) => {
            "Your employee hygiene is important! Our corporate team will connect with you shortly."
        }
        None => "Thank you! Your message has been sent successfully.",
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OutcomeKind {
    /// The relay accepted the message
    Sent,
    /// The relay answered with a non-success status
    Rejected { status: SubmitStatus },
    /// Blocked locally by the rate limiter
    Throttled { retry_in: u64 },
    /// The form failed validation; nothing was sent
    Invalid,
    /// No usable reply from the relay
    Network,
}

/// Result of a submission attempt, with the message to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    #[serde(flatten)]
    pub kind: OutcomeKind,
    pub message: String,
}

impl SubmitOutcome {
    fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Sent
    }
}

/// Submits contact forms through a transport, one at a time
pub struct ContactClient {
    transport: Box<dyn ContactTransport>,
    limiter: SubmitRateLimiter,
    site_key: String,
}

impl ContactClient {
    pub fn new(
        transport: Box<dyn ContactTransport>,
        limiter: SubmitRateLimiter,
        site_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            limiter,
            site_key: site_key.into(),
        }
    }

    pub fn limiter(&self) -> &SubmitRateLimiter {
        &self.limiter
    }

    /// Submit at the current time
    pub async fn submit_now(&mut self, form: &ContactForm) -> SubmitOutcome {
        self.submit(form, Utc::now()).await
    }

    /// Submit a form as of `now`
    ///
    /// Validation and the rate limit are checked before anything is sent.
    /// Only a `success` reply arms the limiter.
    pub async fn submit(&mut self, form: &ContactForm, now: DateTime<Utc>) -> SubmitOutcome {
        if let Err(e) = form.validate() {
            return SubmitOutcome::new(OutcomeKind::Invalid, e.to_string());
        }

        if let Err(e) = self.limiter.check(now) {
            let retry_in = match e {
                ContactError::RateLimited { retry_in, .. } => retry_in,
                _ => 0,
            };
            return SubmitOutcome::new(OutcomeKind::Throttled { retry_in }, e.to_string());
        }

        let fields = form.to_fields(&self.site_key);

        let response = match self.transport.send(&fields).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    transport = self.transport.name(),
                    "Contact submission failed: {:?}",
                    e
                );
                return SubmitOutcome::new(OutcomeKind::Network, e.to_string());
            }
        };

        let status = SubmitStatus::parse(&response.status);
        let message = status.message(form.interested_in);

        if status == SubmitStatus::Success {
            self.limiter.record_success(now);
            tracing::info!("Contact form sent");
            return SubmitOutcome::new(OutcomeKind::Sent, message);
        }

        tracing::debug!(status = %response.status, "Contact form rejected by relay");
        SubmitOutcome::new(OutcomeKind::Rejected { status }, message)
    }
}

#[cfg(test)]
mod client_tests {
    use super::*;
    use crate::contact::transport::RelayResponse;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::{Arc, Mutex};

    /// Replies with a fixed status and records what was sent
    struct MockTransport {
        status: Result<String, ContactError>,
        sent: Sent,
    }

    #[async_trait]
    impl ContactTransport for MockTransport {
        async fn send(&self, fields: &[(String, String)]) -> Result<RelayResponse, ContactError> {
            self.sent.lock().unwrap().push(fields.to_vec());
            self.status
                .clone()
                .map(|status| RelayResponse { status })
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    type Sent = Arc<Mutex<Vec<Vec<(String, String)>>>>;

    fn make_client(status: Result<&str, ContactError>) -> (ContactClient, Sent) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let transport = MockTransport {
            status: status.map(str::to_string),
            sent: Arc::clone(&sent),
        };
        let limiter = SubmitRateLimiter::new(std::time::Duration::from_secs(60));
        (ContactClient::new(Box::new(transport), limiter, "test-key"), sent)
    }

    fn form() -> ContactForm {
        ContactForm::new("Ravi", "9123456780", "ravi@example.com", "Price list please")
    }

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_760_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn test_success_message_depends_on_interest() {
        let (mut client, sent) = make_client(Ok("success"));

        let outcome = client
            .submit(&form().with_interest(Interest::Corporate), t0())
            .await;

        assert!(outcome.is_success());
        assert_eq!(
            outcome.message,
            "Your employee hygiene is important! Our corporate team will connect with you shortly."
        );

        let sent = sent.lock().unwrap();
        assert!(sent[0].contains(&("site_key".to_string(), "test-key".to_string())));
    }

    #[tokio::test]
    async fn test_relay_statuses() {
        for (status, message) in [
            ("rate_limited", "Please wait before submitting again."),
            ("spam", "Spam detected."),
            ("forbidden", "Unauthorized request."),
            ("error", "Something went wrong. Please try again."),
        ] {
            let (mut client, _) = make_client(Ok(status));
            let outcome = client.submit(&form(), t0()).await;

            assert!(!outcome.is_success());
            assert_eq!(outcome.message, message);
            assert!(client.limiter().last_success().is_none());
        }
    }

    #[tokio::test]
    async fn test_network_error_message() {
        let (mut client, _) = make_client(Err(ContactError::Network {
            reason: "dns".to_string(),
        }));
        let outcome = client.submit(&form(), t0()).await;

        assert_eq!(outcome.kind, OutcomeKind::Network);
        assert_eq!(
            outcome.message,
            "Network error. Please make sure you have a stable connection and try again."
        );
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let (mut client, sent) = make_client(Ok("success"));
        let mut bad = form();
        bad.phone = "123".to_string();

        let outcome = client.submit(&bad, t0()).await;
        assert_eq!(outcome.kind, OutcomeKind::Invalid);
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_success_within_window_is_throttled() {
        let (mut client, sent) = make_client(Ok("success"));

        assert!(client.submit(&form(), t0()).await.is_success());

        let outcome = client.submit(&form(), t0() + Duration::seconds(10)).await;
        assert_eq!(outcome.kind, OutcomeKind::Throttled { retry_in: 50 });
        assert_eq!(
            outcome.message,
            "Please wait 60 seconds before submitting another request."
        );

        let outcome = client.submit(&form(), t0() + Duration::seconds(61)).await;
        assert!(outcome.is_success());
        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failures_do_not_arm_limiter() {
        let (mut client, sent) = make_client(Ok("spam"));

        client.submit(&form(), t0()).await;
        client.submit(&form(), t0() + Duration::seconds(1)).await;
        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_outcome_serializes_with_kind() {
        let outcome = SubmitOutcome::new(
            OutcomeKind::Rejected {
                status: SubmitStatus::Spam,
            },
            "Spam detected.",
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "rejected");
        assert_eq!(json["status"], "spam");
        assert_eq!(json["message"], "Spam detected.");
    }
}
