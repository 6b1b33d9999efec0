//! WebRTC signaling relay library.
//!
//! Peers meet in short-lived rooms identified by a 4-character code and
//! exchange connection-negotiation messages through this server before
//! switching to a direct peer-to-peer session.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
