// Adapters layer: concrete implementations for external systems (inbound HTTP, outbound webhook).

pub mod http;
pub mod webhook;
