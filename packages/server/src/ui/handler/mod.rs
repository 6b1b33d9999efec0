//! Request handlers.

mod dispatch;
mod http;
mod websocket;

pub use websocket::signaling_entrypoint;
