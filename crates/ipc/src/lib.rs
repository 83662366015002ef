//! Host protocol: newline-delimited JSON events read from a byte stream.

pub mod client;
pub mod events;

pub use client::{read_all, spawn_listener};
pub use events::parse_event;
