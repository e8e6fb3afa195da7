//! Helpers shared by in-crate unit tests.

pub(crate) mod fetcher;
#[path = "../../tests/support/socket_guard.rs"]
pub(crate) mod socket_guard;
