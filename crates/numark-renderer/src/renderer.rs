//! Render driver: walks the token stream and concatenates rule output.

use std::any::Any;

use pulldown_cmark::Parser;

use crate::error::RenderError;
use crate::events;
use crate::fence::FenceRules;
use crate::options::Options;
use crate::rule::{Rule, RuleContext, RuleTable};
use crate::token::{Token, TokenType};

/// Token-stream renderer.
///
/// Owns a [`RuleTable`] and a [`FenceRules`] registry. Both are populated
/// through the builder methods before rendering; `render` takes `&self`, so a
/// renderer can be shared across threads once configured.
///
/// # Example
///
/// ```
/// use numark_renderer::{Options, Renderer, Token, TokenType};
///
/// let tokens = [
///     Token::paragraph_open(false),
///     Token::inline("hi", vec![Token::text("hi")]),
///     Token::paragraph_close(false),
/// ];
/// let html = Renderer::new().render(&tokens, &Options::default()).unwrap();
/// assert_eq!(html, "<nu-block padding=\"1x 0\">hi</nu-block>\n");
/// ```
#[derive(Clone, Debug)]
pub struct Renderer {
    rules: RuleTable,
    fence_rules: FenceRules,
}

impl Renderer {
    /// Renderer with the default rule set and no custom fence rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(RuleTable::with_defaults())
    }

    /// Renderer with an explicit rule table.
    #[must_use]
    pub fn with_rules(rules: RuleTable) -> Self {
        Self {
            rules,
            fence_rules: FenceRules::new(),
        }
    }

    /// Add or replace the rule for a token type.
    #[must_use]
    pub fn with_rule(mut self, token_type: TokenType, rule: Rule) -> Self {
        self.rules.insert(token_type, rule);
        self
    }

    /// Register a custom fence rule selected by the first info-string word.
    #[must_use]
    pub fn with_fence_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.fence_rules.insert(name, rule);
        self
    }

    /// Registered token rules.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Registered custom fence rules.
    pub fn fence_rules(&self) -> &FenceRules {
        &self.fence_rules
    }

    /// Render a token stream.
    pub fn render(&self, tokens: &[Token], options: &Options) -> Result<String, RenderError> {
        self.render_with_env(tokens, options, &())
    }

    /// Render a token stream with an auxiliary env visible to every rule.
    pub fn render_with_env(
        &self,
        tokens: &[Token],
        options: &Options,
        env: &dyn Any,
    ) -> Result<String, RenderError> {
        tracing::debug!(
            tokens = tokens.len(),
            dialect = ?options.dialect,
            "Rendering token stream"
        );
        let output = self.render_tokens(tokens, options, env)?;
        tracing::debug!(bytes = output.len(), "Rendered token stream");
        Ok(output)
    }

    /// Render the children of an inline token.
    pub fn render_inline(
        &self,
        children: &[Token],
        options: &Options,
        env: &dyn Any,
    ) -> Result<String, RenderError> {
        self.render_tokens(children, options, env)
    }

    /// Parse markdown with pulldown-cmark and render the adapted tokens.
    pub fn render_markdown(&self, markdown: &str, options: &Options) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, events::parser_options());
        let tokens = events::to_tokens(parser);
        self.render(&tokens, options)
    }

    fn render_tokens(
        &self,
        tokens: &[Token],
        options: &Options,
        env: &dyn Any,
    ) -> Result<String, RenderError> {
        let mut output = String::new();
        for (idx, token) in tokens.iter().enumerate() {
            let Some(rule) = self.rules.get(&token.token_type) else {
                tracing::debug!(token_type = %token.token_type, index = idx, "No rule for token");
                return Err(RenderError::UnknownTokenType {
                    token_type: token.token_type.clone(),
                    index: idx,
                });
            };
            let ctx = RuleContext::new(tokens, idx, options, env, self);
            let fragment = rule.call(&ctx).inspect_err(|err| {
                tracing::debug!(index = idx, error = %err, "Rule failed");
            })?;
            output.push_str(&fragment);
        }
        Ok(output)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
