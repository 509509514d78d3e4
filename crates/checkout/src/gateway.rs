//! Payment gateway boundary.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session request fields.
///
/// This is the hosted payment page's wire contract: the field names must
/// survive serialization exactly as written (`ref` is spelled with the raw
/// identifier for that reason).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Merchant public key.
    pub key: String,

    /// Payer email address.
    pub email: String,

    /// Amount in the gateway's minor currency unit.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Caller-supplied reference correlating this attempt with the gateway's
    /// response.
    pub r#ref: String,
}

/// Terminal signal from an opened payment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The payer completed payment; `reference` is the gateway's receipt id.
    Completed { reference: String },

    /// The payer closed the session without paying.
    Closed,
}

/// Errors raised by a gateway implementation.
///
/// Callers fold these into the cancel path; there is no user-visible
/// failure distinct from a cancelled session.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway could not be reached.
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// The gateway refused to open the session.
    #[error("gateway rejected the session: {0}")]
    Rejected(String),
}

/// Narrow seam to the payment provider SDK.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment session and resolves with its terminal event. The
    /// session may stay open indefinitely; no watchdog is imposed here.
    async fn open_session(&self, config: SessionConfig) -> Result<SessionEvent, GatewayError>;
}

#[derive(Debug, Default)]
struct FakeGatewayState {
    sessions: Vec<SessionConfig>,
    next_event: Option<SessionEvent>,
    fail_next: bool,
}

/// In-memory payment gateway for testing.
///
/// Records every opened session and resolves with a scripted event
/// (defaulting to [`SessionEvent::Closed`]).
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<FakeGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new fake gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next session to complete with the given payment reference.
    pub fn complete_next(&self, reference: impl Into<String>) {
        self.state.write().unwrap().next_event = Some(SessionEvent::Completed {
            reference: reference.into(),
        });
    }

    /// Scripts the next session to close without payment.
    pub fn close_next(&self) {
        self.state.write().unwrap().next_event = Some(SessionEvent::Closed);
    }

    /// Makes the next `open_session` call fail with a transport error.
    pub fn fail_next(&self) {
        self.state.write().unwrap().fail_next = true;
    }

    /// Returns how many sessions have been opened.
    pub fn session_count(&self) -> usize {
        self.state.read().unwrap().sessions.len()
    }

    /// Returns the most recently opened session config.
    pub fn last_session(&self) -> Option<SessionConfig> {
        self.state.read().unwrap().sessions.last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn open_session(&self, config: SessionConfig) -> Result<SessionEvent, GatewayError> {
        let mut state = self.state.write().unwrap();
        if state.fail_next {
            state.fail_next = false;
            return Err(GatewayError::Transport("connection reset".to_string()));
        }
        state.sessions.push(config);
        Ok(state.next_event.take().unwrap_or(SessionEvent::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(amount: i64) -> SessionConfig {
        SessionConfig {
            key: "pk_test_abc".to_string(),
            email: "payer@example.com".to_string(),
            amount,
            currency: "NGN".to_string(),
            r#ref: "12345".to_string(),
        }
    }

    #[test]
    fn session_config_serializes_ref_verbatim() {
        let json = serde_json::to_value(config(2000)).unwrap();
        assert_eq!(json["ref"], "12345");
        assert_eq!(json["key"], "pk_test_abc");
        assert_eq!(json["email"], "payer@example.com");
        assert_eq!(json["amount"], 2000);
        assert_eq!(json["currency"], "NGN");
    }

    #[tokio::test]
    async fn default_scripted_event_is_closed() {
        let gateway = InMemoryPaymentGateway::new();
        let event = gateway.open_session(config(100)).await.unwrap();
        assert_eq!(event, SessionEvent::Closed);
        assert_eq!(gateway.session_count(), 1);
    }

    #[tokio::test]
    async fn complete_next_resolves_once() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.complete_next("PAY-42");

        let event = gateway.open_session(config(100)).await.unwrap();
        assert_eq!(
            event,
            SessionEvent::Completed {
                reference: "PAY-42".to_string()
            }
        );

        // The script is consumed; the next session closes.
        let event = gateway.open_session(config(100)).await.unwrap();
        assert_eq!(event, SessionEvent::Closed);
    }

    #[tokio::test]
    async fn fail_next_raises_transport_error_without_recording() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.fail_next();

        let result = gateway.open_session(config(100)).await;
        assert!(matches!(result, Err(GatewayError::Transport(_))));
        assert_eq!(gateway.session_count(), 0);
    }

    #[tokio::test]
    async fn last_session_reflects_the_opened_config() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.open_session(config(4000)).await.unwrap();

        let session = gateway.last_session().unwrap();
        assert_eq!(session.amount, 4000);
        assert_eq!(session.currency, "NGN");
    }
}
