//! Fenced block rendering and custom fence rules.
//!
//! The first word of a fence info string selects a registered custom rule,
//! which then replaces the default rendering entirely:
//!
//! ```
//! use numark_renderer::{Options, Renderer, Rule, Token};
//!
//! let renderer = Renderer::new().with_fence_rule(
//!     "mermaid",
//!     Rule::new(|ctx| Ok(format!("<nu-diagram>{}</nu-diagram>", ctx.token().content.trim()))),
//! );
//! let tokens = [Token::fence("mermaid", "graph TD; A-->B\n")];
//! let html = renderer.render(&tokens, &Options::default()).unwrap();
//! assert_eq!(html, "<nu-diagram>graph TD; A-->B</nu-diagram>");
//! ```
//!
//! Without a custom rule the block is rendered with the dialect's fence
//! markup: a `lang_prefix` class from the escaped label, the `enumerate`
//! keyword as a structural attribute, or a namespaced label (`nu-card`) as
//! the element name.

use std::collections::HashMap;

use crate::error::RenderError;
use crate::escape::{escape_html, escape_label, has};
use crate::markup::FenceMarkup;
use crate::rule::{Rule, RuleContext};

/// Reserved label that switches on line enumeration.
const ENUMERATE_KEYWORD: &str = "enumerate";

/// Registry of custom fence rules keyed by the first info-string word.
#[derive(Clone, Debug, Default)]
pub struct FenceRules {
    rules: HashMap<String, Rule>,
}

impl FenceRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a custom rule. Returns the previous rule.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(name.into(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        has(&self.rules, name)
    }

    /// Registered names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parsed fence info string.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FenceInfo<'a> {
    /// Whitespace-separated words.
    pub words: Vec<&'a str>,
    /// Words joined by single spaces.
    pub label: String,
}

impl<'a> FenceInfo<'a> {
    pub fn parse(params: &'a str) -> Self {
        let words: Vec<&str> = params.split_whitespace().collect();
        let label = words.join(" ");
        Self { words, label }
    }

    pub fn name(&self) -> Option<&'a str> {
        self.words.first().copied()
    }
}

/// Opening element selection for a non-custom fence.
#[derive(Debug, PartialEq, Eq)]
enum FenceTag<'a> {
    /// Default element with optional class and structural attributes.
    Default { attrs: String },
    /// Element named by a namespaced label. The namespace stays part of the
    /// name: `nu-card` renders as `<nu-card>`.
    Named(&'a str),
}

/// Default rule for fence tokens.
pub(crate) fn render(ctx: &RuleContext<'_>) -> Result<String, RenderError> {
    let token = ctx.token();
    let info = FenceInfo::parse(&token.params);

    if let Some(name) = info.name()
        && let Some(rule) = ctx.fence_rule(name)
    {
        tracing::trace!(fence = name, index = ctx.idx(), "Delegating to custom fence rule");
        return rule.call(ctx);
    }

    let markup = &ctx.markup().fence;
    let options = ctx.options();
    let tag = select_tag(&info.label, markup, &options.lang_prefix);

    let body = options
        .highlight
        .as_ref()
        .and_then(|highlight| highlight(&token.content, &info.words))
        .filter(|highlighted| !highlighted.is_empty())
        .unwrap_or_else(|| escape_html(&token.content));

    let mut out = match &tag {
        FenceTag::Default { attrs } => markup
            .element
            .open_with(&format!("{attrs}{}", markup.presentation)),
        FenceTag::Named(name) => format!("<{name}>"),
    };
    match markup.literal {
        Some(literal) => {
            out.push_str(&literal.open());
            out.push_str(&body);
            out.push_str(&literal.close());
        }
        None => out.push_str(&body),
    }
    match &tag {
        FenceTag::Default { .. } => out.push_str(&markup.element.close()),
        FenceTag::Named(name) => {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
    out.push_str(ctx.break_after());
    Ok(out)
}

fn select_tag<'a>(label: &'a str, markup: &FenceMarkup, lang_prefix: &str) -> FenceTag<'a> {
    if label.is_empty() {
        return FenceTag::Default {
            attrs: String::new(),
        };
    }
    if label == ENUMERATE_KEYWORD {
        return FenceTag::Default {
            attrs: markup.enumerate.to_owned(),
        };
    }
    if let Some(namespace) = markup.namespace
        && let Some(rest) = label.strip_prefix(namespace)
        && is_tag_name(rest)
    {
        return FenceTag::Named(label);
    }
    FenceTag::Default {
        attrs: format!(
            r#" class="{}{}""#,
            escape_html(lang_prefix),
            escape_label(label)
        ),
    }
}

/// Custom element name suffix: ASCII letter, then letters, digits or `-`.
fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Opening markup of the default fence element without a label, up to the
/// body.
#[must_use]
pub fn default_open_tag(markup: &FenceMarkup) -> String {
    let mut out = markup.element.open_with(markup.presentation);
    if let Some(literal) = markup.literal {
        out.push_str(&literal.open());
    }
    out
}

/// Closing counterpart of [`default_open_tag`].
#[must_use]
pub fn default_close_tag(markup: &FenceMarkup) -> String {
    let mut out = String::new();
    if let Some(literal) = markup.literal {
        out.push_str(&literal.close());
    }
    out.push_str(&markup.element.close());
    out
}
