//! Application layer orchestrating request building and the gateway lifecycle.
//!
//! `CheckoutService` is the entry point per payment method: it decides the
//! initial order state, builds transaction requests and delegates lifecycle
//! calls to `TransactionLifecycleClient`.

pub mod builder;
pub mod checkout;
pub mod lifecycle;
