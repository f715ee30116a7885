//! Rules, the rule table, and the context a rule is invoked with.
//!
//! A [`Rule`] maps one stream position to one markup fragment. It sees the
//! stream through a read-only [`RuleContext`]: the tokens, the position, the
//! options, the auxiliary env, and a narrow view of the owning renderer
//! (rule lookup, fence registry membership, break resolution). Rules cannot
//! reach the output buffer or mutate the env.
//!
//! # Example
//!
//! ```
//! use numark_renderer::{Options, Renderer, Rule, Token, TokenType};
//!
//! let renderer = Renderer::new().with_rule(
//!     TokenType::Hr,
//!     Rule::new(|ctx| Ok(format!("<nu-line/>{}", ctx.break_after()))),
//! );
//! let html = renderer
//!     .render(&[Token::new(TokenType::Hr)], &Options::default())
//!     .unwrap();
//! assert_eq!(html, "<nu-line/>\n");
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::breaks::get_break;
use crate::error::RenderError;
use crate::markup::MarkupTable;
use crate::options::Options;
use crate::renderer::Renderer;
use crate::token::{Token, TokenType};

type RuleFn = dyn Fn(&RuleContext<'_>) -> Result<String, RenderError> + Send + Sync;

/// Render rule for one token type.
///
/// Rules must be deterministic for identical inputs and must return exactly
/// one fragment. Open/close halves are only valid when concatenated with
/// their counterpart in stream order.
#[derive(Clone)]
pub struct Rule(Arc<RuleFn>);

impl Rule {
    /// Wrap a function as a rule.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&RuleContext<'_>) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the rule.
    pub fn call(&self, ctx: &RuleContext<'_>) -> Result<String, RenderError> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rule(..)")
    }
}

/// Read-only view of one render step.
pub struct RuleContext<'a> {
    tokens: &'a [Token],
    idx: usize,
    options: &'a Options,
    env: &'a dyn Any,
    renderer: &'a Renderer,
}

impl<'a> RuleContext<'a> {
    /// `idx` must be in bounds for `tokens`.
    pub(crate) fn new(
        tokens: &'a [Token],
        idx: usize,
        options: &'a Options,
        env: &'a dyn Any,
        renderer: &'a Renderer,
    ) -> Self {
        debug_assert!(idx < tokens.len());
        Self {
            tokens,
            idx,
            options,
            env,
            renderer,
        }
    }

    /// The token stream being rendered.
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Position of the current token.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// The current token.
    pub fn token(&self) -> &'a Token {
        &self.tokens[self.idx]
    }

    /// Render options.
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Markup table of the configured dialect.
    pub fn markup(&self) -> &'static MarkupTable {
        self.options.dialect.markup()
    }

    /// Auxiliary env, if it has type `T`.
    pub fn env<T: Any>(&self) -> Option<&'a T> {
        self.env.downcast_ref::<T>()
    }

    /// Look up the rule registered for a token type.
    pub fn rule(&self, token_type: &TokenType) -> Option<&'a Rule> {
        self.renderer.rules().get(token_type)
    }

    /// Whether a custom fence rule is registered under `name`.
    pub fn has_fence_rule(&self, name: &str) -> bool {
        self.renderer.fence_rules().contains(name)
    }

    pub(crate) fn fence_rule(&self, name: &str) -> Option<&'a Rule> {
        self.renderer.fence_rules().get(name)
    }

    /// Trailing break required after the current token (`""` or `"\n"`).
    pub fn break_after(&self) -> &'static str {
        get_break(self.tokens, self.idx)
    }

    /// Render inline children with the same options and env.
    pub fn render_inline(&self, children: &[Token]) -> Result<String, RenderError> {
        self.renderer.render_inline(children, self.options, self.env)
    }

    /// Error for a missing required field on the current token.
    pub fn missing(&self, field: &'static str) -> RenderError {
        RenderError::MissingField {
            token_type: self.token().token_type.clone(),
            field,
            index: self.idx,
        }
    }
}

/// Mapping from token type to rule.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: HashMap<TokenType, Rule>,
}

impl RuleTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the default rule for every built-in token type.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        crate::rules::register_defaults(&mut table);
        table
    }

    /// Register or replace a rule. Returns the previous rule.
    pub fn insert(&mut self, token_type: TokenType, rule: Rule) -> Option<Rule> {
        self.rules.insert(token_type, rule)
    }

    /// Remove a rule.
    pub fn remove(&mut self, token_type: &TokenType) -> Option<Rule> {
        self.rules.remove(token_type)
    }

    /// Look up a rule.
    pub fn get(&self, token_type: &TokenType) -> Option<&Rule> {
        self.rules.get(token_type)
    }

    /// Whether a rule is registered.
    pub fn contains(&self, token_type: &TokenType) -> bool {
        self.rules.contains_key(token_type)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
