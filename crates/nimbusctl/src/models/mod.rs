//! Presentation models.
//!
//! Output-facing shapes, distinct from the wire types the client returns.
//! Each is built once per successful call by a pure mapping and emitted
//! immediately; nothing here is persisted.

pub mod batch;
pub mod compute;
pub mod network;
