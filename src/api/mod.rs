// HTTP transport for the chat completions endpoint
pub mod client;

pub use client::{HttpTransport, TransportClient, TransportReply};
