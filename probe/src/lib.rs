//! Host side of the Gemini probe: real HTTP plus the two operations.
//!
//! `gemini-core` stays free of I/O; this crate owns the ureq agent and the
//! rendering choices the CLI exposes.

pub mod commands;
pub mod transport;

pub use commands::{failure_line, generate_content, list_models, GenerateStyle, ListStyle, ProbeOutput};
pub use transport::{Transport, UreqTransport};
