//! # Scribe Shared
//!
//! Types shared between the browser client and the server.
//! In a full-stack Rust setup, this crate is compiled for both server and WASM.

pub mod dto;
pub mod flow;
pub mod response;

pub use flow::{FlowError, FlowState, GenerationFlow, GenerationForm, GenerationMode, Remediation};
pub use response::{ApiResponse, ErrorResponse, GenerationResult};
