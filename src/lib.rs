//! Backend relay for product lens - analyzes product photos and suggests alternatives
//!
//! Receives an "analyze" or "similar" request, builds the matching prompt,
//! forwards it to Gemini with a server-held API key, and relays the extracted
//! text answer back to the caller.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod relay;
pub mod server;

pub use error::{Error, Result};
