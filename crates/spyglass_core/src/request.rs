//! Request and response types for LLM generation.

use crate::Message;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Generic text-generation request.
///
/// # Examples
///
/// ```
/// use spyglass_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(100u32)
///     .temperature(0.7f32)
///     .model("gemini-2.5-flash")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Shorthand for a single-user-message request with default settings.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            ..Self::default()
        }
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use spyglass_core::GenerateResponse;
///
/// let response = GenerateResponse::from_text("Hello! How can I help?");
///
/// assert_eq!(response.text(), "Hello! How can I help?");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text outputs from the model
    pub outputs: Vec<String>,
}

impl GenerateResponse {
    /// Create a response from a single text output.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![text.into()],
        }
    }

    /// Join all outputs into a single string.
    pub fn text(&self) -> String {
        self.outputs.join("\n")
    }

    /// True when no output carries non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.outputs.iter().all(|o| o.trim().is_empty())
    }
}
