//! Object-Model Store API Module
//!
//! Everything needed to talk to the remote object-model store: the typed
//! store contract, exact-match query filters, the HTTP client implementing
//! the contract, and an in-memory implementation backing the test suite.

pub mod client;
pub mod constants;
pub mod filter;
pub mod memory;
pub mod store;

pub use client::StoreClient;
pub use filter::Filter;
pub use memory::{InMemoryStore, StoreCounters};
pub use store::ObjectStore;
