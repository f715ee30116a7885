//! Render options.

use std::fmt;
use std::sync::Arc;

use crate::markup::Dialect;

/// Syntax highlighter callback.
///
/// Receives the raw fence content and the info-string words. Returning
/// `None` (or an empty string) falls back to escaped content.
pub type Highlighter = Arc<dyn Fn(&str, &[&str]) -> Option<String> + Send + Sync>;

/// Options read by rules during a render pass.
#[derive(Clone)]
pub struct Options {
    /// CSS class prefix for fenced code labels.
    pub lang_prefix: String,
    /// Optional syntax highlighter for fenced code.
    pub highlight: Option<Highlighter>,
    /// Emit XHTML-style void elements (`<br />`).
    pub xhtml_out: bool,
    /// Link target for rendered links.
    pub link_target: Option<String>,
    /// Render soft breaks as hard breaks.
    pub breaks: bool,
    /// Markup dialect used by the default rules.
    pub dialect: Dialect,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lang_prefix: "language-".to_owned(),
            highlight: None,
            xhtml_out: false,
            link_target: None,
            breaks: false,
            dialect: Dialect::default(),
        }
    }
}

impl Options {
    /// Set the syntax highlighter.
    #[must_use]
    pub fn with_highlight<F>(mut self, highlight: F) -> Self
    where
        F: Fn(&str, &[&str]) -> Option<String> + Send + Sync + 'static,
    {
        self.highlight = Some(Arc::new(highlight));
        self
    }

    /// Set the markup dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("lang_prefix", &self.lang_prefix)
            .field("highlight", &self.highlight.is_some())
            .field("xhtml_out", &self.xhtml_out)
            .field("link_target", &self.link_target)
            .field("breaks", &self.breaks)
            .field("dialect", &self.dialect)
            .finish()
    }
}
