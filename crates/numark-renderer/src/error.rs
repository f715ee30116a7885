//! Render error type.

use crate::token::TokenType;

/// Errors returned by a render pass.
///
/// Rendering is a pure transform, so every error is terminal for the pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No rule is registered for the token type.
    #[error("unknown token type `{token_type}` at index {index}")]
    UnknownTokenType {
        /// Type of the offending token.
        token_type: TokenType,
        /// Position in the stream being rendered.
        index: usize,
    },
    /// A token lacks a field its rule requires.
    #[error("token `{token_type}` at index {index} is missing required field `{field}`")]
    MissingField {
        /// Type of the malformed token.
        token_type: TokenType,
        /// Name of the missing field.
        field: &'static str,
        /// Position in the stream being rendered.
        index: usize,
    },
    /// Failure reported by a user-supplied rule.
    #[error("rule `{rule}` failed: {message}")]
    Custom {
        /// Rule or fence name.
        rule: String,
        /// Error message.
        message: String,
    },
}

impl RenderError {
    /// Create a custom rule error.
    pub fn custom(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
