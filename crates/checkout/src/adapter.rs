//! Checkout adapter: cart total in, settled outcome out.

use chrono::{DateTime, Utc};
use domain::{CartStore, CartStoreError};
use kv_store::KeyValueStore;
use thiserror::Error;
use uuid::Uuid;

use crate::gateway::{PaymentGateway, SessionConfig, SessionEvent};
use crate::state::AttemptState;

/// Confirmation details for a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// The gateway's payment reference, surfaced to the user.
    pub reference: String,

    /// When the session settled.
    pub settled_at: DateTime<Utc>,
}

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment went through; the cart has been cleared.
    Succeeded { receipt: CheckoutReceipt },

    /// The session closed without payment; the cart is unchanged and the
    /// attempt can be retried with the same contents.
    Cancelled,
}

/// Errors that surface from a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requested with nothing in the cart; no session is opened.
    #[error("cart is empty")]
    EmptyCart,

    /// The computed amount was negative. Cart math cannot produce this, but
    /// the conversion refuses it anyway.
    #[error("refusing negative amount of {cents} minor units")]
    NegativeAmount { cents: i64 },

    /// Clearing the cart after a confirmed payment failed to persist.
    #[error(transparent)]
    Store(#[from] CartStoreError),
}

/// Converts the current cart total into a payment session and settles the
/// outcome against the cart store.
pub struct CheckoutAdapter<G> {
    gateway: G,
    merchant_key: String,
    payer_email: String,
    currency: String,
}

impl<G: PaymentGateway> CheckoutAdapter<G> {
    /// Creates an adapter bound to a gateway and merchant identity.
    pub fn new(
        gateway: G,
        merchant_key: impl Into<String>,
        payer_email: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            merchant_key: merchant_key.into(),
            payer_email: payer_email.into(),
            currency: currency.into(),
        }
    }

    /// Runs one checkout attempt against the current cart.
    ///
    /// An empty cart is refused before any session is opened. On success the
    /// cart is cleared (the only trigger besides an explicit user clear). A
    /// close, or a gateway error settling through the same path, leaves the
    /// cart untouched.
    #[tracing::instrument(skip(self, store))]
    pub async fn checkout<S: KeyValueStore>(
        &self,
        store: &mut CartStore<S>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let attempt = AttemptState::Idle;
        debug_assert!(attempt.can_open());

        let cart = store.snapshot();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let amount = cart.total().cents();
        if amount < 0 {
            return Err(CheckoutError::NegativeAmount { cents: amount });
        }

        let config = SessionConfig {
            key: self.merchant_key.clone(),
            email: self.payer_email.clone(),
            amount,
            currency: self.currency.clone(),
            r#ref: new_reference(),
        };

        let attempt = AttemptState::SessionOpened;
        tracing::info!(
            state = %attempt,
            amount,
            currency = %config.currency,
            session_ref = %config.r#ref,
            "opening payment session"
        );

        let event = match self.gateway.open_session(config).await {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(%err, "payment session failed, settling as cancelled");
                SessionEvent::Closed
            }
        };

        match event {
            SessionEvent::Completed { reference } => {
                let attempt = AttemptState::Succeeded;
                store.clear()?;
                metrics::counter!("checkout_succeeded_total").increment(1);
                tracing::info!(state = %attempt, %reference, "payment confirmed, cart cleared");
                Ok(CheckoutOutcome::Succeeded {
                    receipt: CheckoutReceipt {
                        reference,
                        settled_at: Utc::now(),
                    },
                })
            }
            SessionEvent::Closed => {
                let attempt = AttemptState::Cancelled;
                metrics::counter!("checkout_cancelled_total").increment(1);
                tracing::info!(state = %attempt, "payment session closed, cart unchanged");
                Ok(CheckoutOutcome::Cancelled)
            }
        }
    }
}

/// Generates a session reference.
///
/// UUIDv4 keeps the collision probability negligible across retries; the
/// gateway treats the value as opaque and rejects duplicates on its side.
fn new_reference() -> String {
    Uuid::new_v4().simple().to_string()
}
