//! Storefront Client Module
//!
//! - The [`StoreApi`] data-collaborator contract
//! - [`MockStoreApi`], the in-process backend with simulated latency
//! - [`RequestSequencer`] for discarding superseded responses
//! - [`Storefront`], the orchestration layer the presentation code calls

pub mod api;
pub mod checkout;
pub mod mock;
pub mod sequencer;
pub mod storefront;

pub use api::StoreApi;
pub use mock::MockStoreApi;
pub use sequencer::{RequestSequencer, RequestTicket};
pub use storefront::Storefront;
