//! Contact form submission
//!
//! A submission is validated locally, checked against the advisory rate
//! limit, posted to the form relay, and the relay's status is mapped to the
//! message shown to the visitor. Nothing here is fatal: every path ends in a
//! [`SubmitOutcome`].

mod client;
mod form;
mod limiter;
mod transport;

pub use client::{ContactClient, OutcomeKind, SubmitOutcome, SubmitStatus};
pub use form::{ContactForm, Interest};
pub use limiter::SubmitRateLimiter;
pub use transport::{ContactTransport, HttpContactTransport, RelayResponse};
