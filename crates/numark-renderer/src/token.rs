//! Token model consumed by the renderer.
//!
//! A token stream is a flat, index-addressable sequence produced once by a
//! parser. Container constructs appear as open/close pairs, leaf constructs
//! as single tokens, and inline content as an [`TokenType::Inline`] token
//! whose children are rendered in place.

use std::fmt;

/// Token type tag used for rule dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    BlockquoteOpen,
    BlockquoteClose,
    /// Indented code block (`block = true`) or inline code span.
    Code,
    /// Fenced code block carrying an info string in `params`.
    Fence,
    HeadingOpen,
    HeadingClose,
    Hr,
    BulletListOpen,
    BulletListClose,
    ListItemOpen,
    ListItemClose,
    OrderedListOpen,
    OrderedListClose,
    ParagraphOpen,
    ParagraphClose,
    LinkOpen,
    LinkClose,
    Image,
    TableOpen,
    TableClose,
    TheadOpen,
    TheadClose,
    TbodyOpen,
    TbodyClose,
    TrOpen,
    TrClose,
    ThOpen,
    ThClose,
    TdOpen,
    TdClose,
    StrongOpen,
    StrongClose,
    EmOpen,
    EmClose,
    DelOpen,
    DelClose,
    InsOpen,
    InsClose,
    MarkOpen,
    MarkClose,
    Sub,
    Sup,
    Hardbreak,
    Softbreak,
    Text,
    Htmlblock,
    Htmltag,
    AbbrOpen,
    AbbrClose,
    FootnoteRef,
    FootnoteBlockOpen,
    FootnoteBlockClose,
    FootnoteOpen,
    FootnoteClose,
    FootnoteAnchor,
    DlOpen,
    DlClose,
    DtOpen,
    DtClose,
    DdOpen,
    DdClose,
    /// Container for inline children; rendered by recursing into them.
    Inline,
    /// Token emitted by a parser plugin. Renders only if a rule is registered.
    Extension(String),
}

impl TokenType {
    /// Create an extension token type.
    #[must_use]
    pub fn extension(name: impl Into<String>) -> Self {
        Self::Extension(name.into())
    }

    /// Snake-case name of this token type (e.g. `paragraph_open`).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::BlockquoteOpen => "blockquote_open",
            Self::BlockquoteClose => "blockquote_close",
            Self::Code => "code",
            Self::Fence => "fence",
            Self::HeadingOpen => "heading_open",
            Self::HeadingClose => "heading_close",
            Self::Hr => "hr",
            Self::BulletListOpen => "bullet_list_open",
            Self::BulletListClose => "bullet_list_close",
            Self::ListItemOpen => "list_item_open",
            Self::ListItemClose => "list_item_close",
            Self::OrderedListOpen => "ordered_list_open",
            Self::OrderedListClose => "ordered_list_close",
            Self::ParagraphOpen => "paragraph_open",
            Self::ParagraphClose => "paragraph_close",
            Self::LinkOpen => "link_open",
            Self::LinkClose => "link_close",
            Self::Image => "image",
            Self::TableOpen => "table_open",
            Self::TableClose => "table_close",
            Self::TheadOpen => "thead_open",
            Self::TheadClose => "thead_close",
            Self::TbodyOpen => "tbody_open",
            Self::TbodyClose => "tbody_close",
            Self::TrOpen => "tr_open",
            Self::TrClose => "tr_close",
            Self::ThOpen => "th_open",
            Self::ThClose => "th_close",
            Self::TdOpen => "td_open",
            Self::TdClose => "td_close",
            Self::StrongOpen => "strong_open",
            Self::StrongClose => "strong_close",
            Self::EmOpen => "em_open",
            Self::EmClose => "em_close",
            Self::DelOpen => "del_open",
            Self::DelClose => "del_close",
            Self::InsOpen => "ins_open",
            Self::InsClose => "ins_close",
            Self::MarkOpen => "mark_open",
            Self::MarkClose => "mark_close",
            Self::Sub => "sub",
            Self::Sup => "sup",
            Self::Hardbreak => "hardbreak",
            Self::Softbreak => "softbreak",
            Self::Text => "text",
            Self::Htmlblock => "htmlblock",
            Self::Htmltag => "htmltag",
            Self::AbbrOpen => "abbr_open",
            Self::AbbrClose => "abbr_close",
            Self::FootnoteRef => "footnote_ref",
            Self::FootnoteBlockOpen => "footnote_block_open",
            Self::FootnoteBlockClose => "footnote_block_close",
            Self::FootnoteOpen => "footnote_open",
            Self::FootnoteClose => "footnote_close",
            Self::FootnoteAnchor => "footnote_anchor",
            Self::DlOpen => "dl_open",
            Self::DlClose => "dl_close",
            Self::DtOpen => "dt_open",
            Self::DtClose => "dt_close",
            Self::DdOpen => "dd_open",
            Self::DdClose => "dd_close",
            Self::Inline => "inline",
            Self::Extension(name) => name,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Table cell alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// A single token of the stream.
///
/// Kind-specific fields are optional; a rule that needs one reports
/// [`RenderError::MissingField`](crate::RenderError::MissingField) when it is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Dispatch tag.
    pub token_type: TokenType,
    /// Raw text content (text, code, html, inline source).
    pub content: String,
    /// Block-level flag (distinguishes indented code from inline code).
    pub block: bool,
    /// Tight flag for paragraphs inside tight lists.
    pub tight: bool,
    /// Fence info string.
    pub params: String,
    /// Children of an inline token.
    pub children: Vec<Token>,
    /// Heading level (1-6).
    pub level: Option<u8>,
    /// Ordered list start number.
    pub order: Option<u64>,
    /// Table cell alignment.
    pub align: Option<Align>,
    /// Link destination.
    pub href: Option<String>,
    /// Link, image or abbreviation title.
    pub title: Option<String>,
    /// Image source.
    pub src: Option<String>,
    /// Image alt text.
    pub alt: Option<String>,
    /// Footnote id (zero-based).
    pub id: Option<usize>,
    /// Footnote reference repeat index.
    pub sub_id: usize,
}

impl Token {
    /// Create a token with empty content and no kind-specific fields.
    #[must_use]
    pub fn new(token_type: TokenType) -> Self {
        Self {
            token_type,
            content: String::new(),
            block: false,
            tight: false,
            params: String::new(),
            children: Vec::new(),
            level: None,
            order: None,
            align: None,
            href: None,
            title: None,
            src: None,
            alt: None,
            id: None,
            sub_id: 0,
        }
    }

    /// Text token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(TokenType::Text).with_content(content)
    }

    /// Inline container token.
    #[must_use]
    pub fn inline(content: impl Into<String>, children: Vec<Token>) -> Self {
        Self {
            children,
            ..Self::new(TokenType::Inline).with_content(content)
        }
    }

    /// Paragraph open token.
    #[must_use]
    pub fn paragraph_open(tight: bool) -> Self {
        Self::new(TokenType::ParagraphOpen).with_tight(tight)
    }

    /// Paragraph close token.
    #[must_use]
    pub fn paragraph_close(tight: bool) -> Self {
        Self::new(TokenType::ParagraphClose).with_tight(tight)
    }

    /// Fence token with the given info string and content.
    #[must_use]
    pub fn fence(params: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(TokenType::Fence)
            .with_params(params)
            .with_content(content)
            .with_block(true)
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: bool) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn with_tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: u64) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Option<Align>) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    #[must_use]
    pub fn with_footnote(mut self, id: usize, sub_id: usize) -> Self {
        self.id = Some(id);
        self.sub_id = sub_id;
        self
    }

    /// Whether this is the given token type.
    #[must_use]
    pub fn is(&self, token_type: &TokenType) -> bool {
        self.token_type == *token_type
    }
}
