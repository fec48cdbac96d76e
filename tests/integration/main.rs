//! End-to-end tests driving the full router over the in-memory store.

mod helpers;
mod membership_test;
mod session_test;
mod user_test;
