//! # roster_client
//!
//! Client-side session state and route guards.
//!
//! Everything here is advisory: guards decide which views render without a
//! network round-trip, while the server's middleware remains the sole
//! enforcement point of record.

pub mod guards;
pub mod session;
