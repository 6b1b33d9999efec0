//! Data Transfer Objects
//!
//! - `websocket`: WebSocket 上でやり取りする JSON メッセージ

pub mod websocket;
