//! Upstream flow seam
//!
//! The relay only needs "send this text, get the assistant's text back".
//! Providers implement [`FlowClient`]; adaptors hold an `Arc<dyn FlowClient>`.

use crate::Result;
use async_trait::async_trait;

/// A hosted flow that turns one user message into one assistant reply
#[async_trait]
pub trait FlowClient: Send + Sync {
    /// Provider name, for logs and health output
    fn name(&self) -> &str;

    /// Run the flow once, non-streaming, and return the reply text.
    ///
    /// Any transport failure, non-success status or unexpected body shape is
    /// an error; there is no retry.
    async fn run(&self, input: &str) -> Result<String>;
}
