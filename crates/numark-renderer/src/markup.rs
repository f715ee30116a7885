//! Declarative per-construct markup for each output dialect.
//!
//! The default rules share one mechanism and read tag names and fixed
//! attributes from a [`MarkupTable`]. Two dialects are provided:
//! - [`Dialect::Numl`]: `nu-*` custom elements
//! - [`Dialect::Html`]: plain HTML5

/// Output dialect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// `nu-*` custom elements.
    #[default]
    Numl,
    /// Plain HTML5 elements.
    Html,
}

impl Dialect {
    /// Markup table for this dialect.
    #[must_use]
    pub fn markup(self) -> &'static MarkupTable {
        match self {
            Self::Numl => &NUML,
            Self::Html => &HTML,
        }
    }
}

/// Element with fixed attributes.
///
/// `attrs` is either empty or starts with a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attrs: &'static str,
}

impl Element {
    const fn new(name: &'static str) -> Self {
        Self { name, attrs: "" }
    }

    const fn with_attrs(name: &'static str, attrs: &'static str) -> Self {
        Self { name, attrs }
    }

    /// Opening tag with fixed attributes only.
    #[must_use]
    pub fn open(&self) -> String {
        self.open_with("")
    }

    /// Opening tag with additional attributes appended (`extra` starts with a space).
    #[must_use]
    pub fn open_with(&self, extra: &str) -> String {
        format!("<{}{}{extra}>", self.name, self.attrs)
    }

    /// Closing tag.
    #[must_use]
    pub fn close(&self) -> String {
        format!("</{}>", self.name)
    }
}

/// How a void element is written in XHTML mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoidClosing {
    /// `<hr />`
    SelfClosing,
    /// `<nu-line></nu-line>`
    ExplicitClose,
}

/// Element without content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoidElement {
    pub element: Element,
    pub closing: VoidClosing,
}

impl VoidElement {
    const fn new(element: Element, closing: VoidClosing) -> Self {
        Self { element, closing }
    }

    /// Render the element with extra attributes.
    #[must_use]
    pub fn render(&self, extra: &str, xhtml_out: bool) -> String {
        let Element { name, attrs } = self.element;
        match (xhtml_out, self.closing) {
            (false, _) => format!("<{name}{attrs}{extra}>"),
            (true, VoidClosing::SelfClosing) => format!("<{name}{attrs}{extra} />"),
            (true, VoidClosing::ExplicitClose) => format!("<{name}{attrs}{extra}></{name}>"),
        }
    }
}

/// Code element with an optional literal-text container inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeMarkup {
    pub element: Element,
    pub literal: Option<Element>,
}

impl CodeMarkup {
    /// Wrap already-escaped content.
    #[must_use]
    pub fn wrap(&self, body: &str) -> String {
        match self.literal {
            Some(literal) => format!(
                "{}{}{body}{}{}",
                self.element.open(),
                literal.open(),
                literal.close(),
                self.element.close()
            ),
            None => format!("{}{body}{}", self.element.open(), self.element.close()),
        }
    }
}

/// Fenced block markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FenceMarkup {
    /// Default block element.
    pub element: Element,
    /// Layout attributes added to the default element only.
    pub presentation: &'static str,
    /// Literal-text container around the body.
    pub literal: Option<Element>,
    /// Label prefix selecting a custom element name.
    pub namespace: Option<&'static str>,
    /// Structural attribute set by the `enumerate` keyword.
    pub enumerate: &'static str,
}

/// Heading markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadingMarkup {
    /// One element carrying the level as an attribute.
    LevelAttribute {
        name: &'static str,
        attr: &'static str,
    },
    /// Level encoded in the tag name (`h1`..`h6`).
    NumberedTag { prefix: &'static str },
}

impl HeadingMarkup {
    #[must_use]
    pub fn open(&self, level: u8) -> String {
        match self {
            Self::LevelAttribute { name, attr } => format!(r#"<{name} {attr}="{level}">"#),
            Self::NumberedTag { prefix } => format!("<{prefix}{level}>"),
        }
    }

    /// Closing tag; `None` when the dialect needs a level that is absent.
    #[must_use]
    pub fn close(&self, level: Option<u8>) -> Option<String> {
        match self {
            Self::LevelAttribute { name, .. } => Some(format!("</{name}>")),
            Self::NumberedTag { prefix } => level.map(|level| format!("</{prefix}{level}>")),
        }
    }
}

/// How `Options::link_target` is expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Prefix on the destination value (`to="!https://..."`).
    HrefPrefix(&'static str),
    /// Separate attribute (`target="_blank"`).
    Attribute(&'static str),
}

/// Link markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkMarkup {
    pub name: &'static str,
    pub href: &'static str,
    pub title: &'static str,
    pub target: LinkTarget,
}

/// Image markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageMarkup {
    pub element: VoidElement,
    pub alt: &'static str,
}

/// Abbreviation markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbbrMarkup {
    /// Wrapper element followed by a tooltip child holding the title.
    Tooltip {
        element: Element,
        tooltip: &'static str,
    },
    /// Title carried as an attribute.
    TitleAttribute(Element),
}

impl AbbrMarkup {
    /// Opening markup; `title` must already be escaped.
    #[must_use]
    pub fn open(&self, title: &str) -> String {
        match self {
            Self::Tooltip { element, tooltip } => {
                format!("{}<{tooltip}>{title}</{tooltip}>", element.open())
            }
            Self::TitleAttribute(element) => element.open_with(&format!(r#" title="{title}""#)),
        }
    }

    #[must_use]
    pub fn close(&self) -> String {
        match self {
            Self::Tooltip { element, .. } | Self::TitleAttribute(element) => element.close(),
        }
    }
}

/// Footnote markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FootnoteMarkup {
    /// Wrapper around a footnote reference link.
    pub reference: Element,
    /// Separator before the footnote block.
    pub separator: VoidElement,
    /// Footnote block container.
    pub block: Element,
    /// Back-reference link text.
    pub backref: &'static str,
}

/// Markup for every construct the default rules render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkupTable {
    pub blockquote: Element,
    pub code_block: CodeMarkup,
    pub code_inline: CodeMarkup,
    pub fence: FenceMarkup,
    pub heading: HeadingMarkup,
    pub hr: VoidElement,
    pub bullet_list: Element,
    pub ordered_list: Element,
    pub list_item: Element,
    pub paragraph: Element,
    pub link: LinkMarkup,
    pub image: ImageMarkup,
    pub table: Element,
    pub thead: Element,
    pub tbody: Element,
    pub tr: Element,
    pub th: Element,
    pub td: Element,
    pub strong: Element,
    pub em: Element,
    pub del: Element,
    pub ins: Element,
    pub mark: Element,
    pub sub: Element,
    pub sup: Element,
    pub line_break: VoidElement,
    pub abbr: AbbrMarkup,
    pub footnotes: FootnoteMarkup,
    pub dl: Element,
    pub dt: Element,
    pub dd: Element,
}

const TEXTAREA: Element = Element::new("textarea");

/// `nu-*` custom element dialect.
pub static NUML: MarkupTable = MarkupTable {
    blockquote: Element::new("nu-blockquote"),
    code_block: CodeMarkup {
        element: Element::new("nu-code"),
        literal: Some(TEXTAREA),
    },
    code_inline: CodeMarkup {
        element: Element::with_attrs("nu-code", " inline"),
        literal: Some(TEXTAREA),
    },
    fence: FenceMarkup {
        element: Element::new("nu-code"),
        presentation: r#" display="block" overflow="auto" scrollbar"#,
        literal: Some(TEXTAREA),
        namespace: Some("nu-"),
        enumerate: " enumerate",
    },
    heading: HeadingMarkup::LevelAttribute {
        name: "nu-heading",
        attr: "level",
    },
    hr: VoidElement::new(Element::new("hr"), VoidClosing::SelfClosing),
    bullet_list: Element::new("nu-list"),
    ordered_list: Element::with_attrs("nu-list", " enumerate"),
    list_item: Element::new("nu-listitem"),
    paragraph: Element::with_attrs("nu-block", r#" padding="1x 0""#),
    link: LinkMarkup {
        name: "nu-link",
        href: "to",
        title: "label",
        target: LinkTarget::HrefPrefix("!"),
    },
    image: ImageMarkup {
        element: VoidElement::new(Element::new("nu-img"), VoidClosing::SelfClosing),
        alt: "label",
    },
    table: Element::new("nu-table"),
    thead: Element::new("nu-rowgroup"),
    tbody: Element::new("nu-rowgroup"),
    tr: Element::new("nu-row"),
    th: Element::new("nu-columnheader"),
    td: Element::new("nu-cell"),
    strong: Element::with_attrs("nu-el", r#" text="bolder""#),
    em: Element::with_attrs("nu-el", r#" text="i""#),
    del: Element::with_attrs("nu-block", r#" theme="deleted""#),
    ins: Element::with_attrs("nu-block", r#" theme="inserted""#),
    mark: Element::new("nu-mark"),
    sub: Element::with_attrs("nu-el", r#" text="sub""#),
    sup: Element::with_attrs("nu-el", r#" text="sup""#),
    line_break: VoidElement::new(Element::new("br"), VoidClosing::SelfClosing),
    abbr: AbbrMarkup::Tooltip {
        element: Element::with_attrs("nu-el", r#" text="u""#),
        tooltip: "tooltip",
    },
    footnotes: FootnoteMarkup {
        reference: Element::with_attrs("nu-el", r#" text="sup" class="footnote-ref""#),
        separator: VoidElement::new(
            Element::with_attrs("nu-line", r#" class="footnotes-sep""#),
            VoidClosing::ExplicitClose,
        ),
        block: Element::with_attrs("nu-block", r#" class="footnotes""#),
        backref: "\u{21a9}",
    },
    dl: Element::new("dl"),
    dt: Element::new("dt"),
    dd: Element::new("dd"),
};

/// Plain HTML5 dialect.
pub static HTML: MarkupTable = MarkupTable {
    blockquote: Element::new("blockquote"),
    code_block: CodeMarkup {
        element: Element::new("pre"),
        literal: Some(Element::new("code")),
    },
    code_inline: CodeMarkup {
        element: Element::new("code"),
        literal: None,
    },
    fence: FenceMarkup {
        element: Element::new("pre"),
        presentation: "",
        literal: Some(Element::new("code")),
        namespace: None,
        enumerate: " data-line-numbers",
    },
    heading: HeadingMarkup::NumberedTag { prefix: "h" },
    hr: VoidElement::new(Element::new("hr"), VoidClosing::SelfClosing),
    bullet_list: Element::new("ul"),
    ordered_list: Element::new("ol"),
    list_item: Element::new("li"),
    paragraph: Element::new("p"),
    link: LinkMarkup {
        name: "a",
        href: "href",
        title: "title",
        target: LinkTarget::Attribute("target"),
    },
    image: ImageMarkup {
        element: VoidElement::new(Element::new("img"), VoidClosing::SelfClosing),
        alt: "alt",
    },
    table: Element::new("table"),
    thead: Element::new("thead"),
    tbody: Element::new("tbody"),
    tr: Element::new("tr"),
    th: Element::new("th"),
    td: Element::new("td"),
    strong: Element::new("strong"),
    em: Element::new("em"),
    del: Element::new("del"),
    ins: Element::new("ins"),
    mark: Element::new("mark"),
    sub: Element::new("sub"),
    sup: Element::new("sup"),
    line_break: VoidElement::new(Element::new("br"), VoidClosing::SelfClosing),
    abbr: AbbrMarkup::TitleAttribute(Element::new("abbr")),
    footnotes: FootnoteMarkup {
        reference: Element::with_attrs("sup", r#" class="footnote-ref""#),
        separator: VoidElement::new(
            Element::with_attrs("hr", r#" class="footnotes-sep""#),
            VoidClosing::SelfClosing,
        ),
        block: Element::with_attrs("section", r#" class="footnotes""#),
        backref: "\u{21a9}",
    },
    dl: Element::new("dl"),
    dt: Element::new("dt"),
    dd: Element::new("dd"),
};
