//! Langflow integration for SocioAI
//!
//! Sends each user message to a hosted Langflow flow and extracts the
//! assistant's reply text from the run response.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;

pub use client::{reply_text, LangflowClient};
pub use config::{default_tweaks, LangflowConfig};
