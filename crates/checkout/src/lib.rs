//! Checkout handoff for the storefront cart.
//!
//! Converts the current cart total into a payment-session request against a
//! narrow [`PaymentGateway`] seam, settles the outcome, and clears the cart
//! on success. The gateway SDK itself lives behind the trait so tests run
//! against [`InMemoryPaymentGateway`].

pub mod adapter;
pub mod gateway;
pub mod state;

pub use adapter::{CheckoutAdapter, CheckoutError, CheckoutOutcome, CheckoutReceipt};
pub use gateway::{GatewayError, InMemoryPaymentGateway, PaymentGateway, SessionConfig, SessionEvent};
pub use state::AttemptState;
