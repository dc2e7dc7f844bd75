//! These models represent the conversation objects passed between a client
//! and an agent service.
//!
//! There are two related formats we need to interact with:
//! - the underlying message objects produced and consumed by the agent
//!   engine, which carry provider metadata and structured content
//! - the canonical chat messages sent over the wire to clients, which carry
//!   flattened text plus a serialized snapshot of the underlying object
//!
//! Conversion between the two is lossless in the forward-then-back direction:
//! the canonical form embeds the full serialized original, and reconstruction
//! replays that snapshot rather than rebuilding from the flattened fields.
pub mod chat;
pub mod content;
pub mod envelope;
pub mod message;
pub mod role;
pub mod tool;
