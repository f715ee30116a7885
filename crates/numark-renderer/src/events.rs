//! Adapter from pulldown-cmark events to the token stream.
//!
//! pulldown-cmark reports tight list items without paragraph events; the
//! adapter wraps their inline content in tight paragraph tokens so the token
//! stream has the same shape a markdown-it style parser produces, including
//! the empty tight paragraph of an empty item.

use std::collections::HashMap;
use std::mem;

use pulldown_cmark::{CodeBlockKind, Event, Options, Tag, TagEnd};

use crate::token::{Token, TokenType};
use crate::util::{alignment, heading_level_to_num};

/// Parser extensions covering every construct the default rules render.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SUPERSCRIPT
        | Options::ENABLE_SUBSCRIPT
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Translate a pulldown-cmark event stream into tokens.
///
/// # Example
///
/// ```
/// use numark_renderer::{TokenType, events};
/// use pulldown_cmark::Parser;
///
/// let tokens = events::to_tokens(Parser::new("*hi*"));
/// assert_eq!(tokens.len(), 3);
/// assert!(tokens[1].is(&TokenType::Inline));
/// assert!(tokens[1].children[0].is(&TokenType::EmOpen));
/// ```
pub fn to_tokens<'a, I>(events: I) -> Vec<Token>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut builder = TokenBuilder::default();
    for event in events {
        builder.process_event(event);
    }
    builder.finish()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Item,
    Other,
}

/// Inline children collected for one `inline` token.
#[derive(Default)]
struct InlineBuffer {
    content: String,
    children: Vec<Token>,
    /// Opened for a tight list item; closes a tight paragraph on flush.
    implicit_paragraph: bool,
}

struct ImageBuffer {
    src: String,
    title: String,
    alt: String,
    depth: usize,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<pulldown_cmark::Alignment>,
    cell: usize,
    in_head: bool,
    body_open: bool,
}

#[derive(Default)]
struct FootnoteState {
    /// Id by normalized label, in first-reference order.
    ids: HashMap<String, usize>,
    /// Reference count per id.
    counts: Vec<usize>,
    /// Definition bodies by normalized label.
    definitions: Vec<(String, Vec<Token>)>,
    /// Main stream saved while a definition is being collected.
    saved: Option<(String, Vec<Token>)>,
}

impl FootnoteState {
    fn reference(&mut self, label: &str) -> (usize, usize) {
        let next = self.ids.len();
        let id = *self.ids.entry(label.to_lowercase()).or_insert(next);
        if id == self.counts.len() {
            self.counts.push(0);
        }
        let sub_id = self.counts[id];
        self.counts[id] += 1;
        (id, sub_id)
    }
}

#[derive(Default)]
struct TokenBuilder {
    tokens: Vec<Token>,
    containers: Vec<Container>,
    inline: Option<InlineBuffer>,
    image: Option<ImageBuffer>,
    script: Option<(TokenType, String)>,
    /// Fence info (`None` for indented code) and collected content.
    code: Option<(Option<String>, String)>,
    html: Option<String>,
    in_metadata: bool,
    table: TableState,
    footnotes: FootnoteState,
}

impl TokenBuilder {
    fn process_event(&mut self, event: Event<'_>) {
        if self.in_metadata {
            if matches!(event, Event::End(TagEnd::MetadataBlock(_))) {
                self.in_metadata = false;
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => {
                if !self.capture_plain(&html) {
                    self.push_inline(Token::new(TokenType::Htmltag).with_content(&*html), &html);
                }
            }
            Event::FootnoteReference(label) => {
                let label: &str = &label;
                if !self.capture_plain(&format!("[{label}]")) {
                    let (id, sub_id) = self.footnotes.reference(label);
                    let token = Token::new(TokenType::FootnoteRef).with_footnote(id, sub_id);
                    self.push_inline(token, &format!("[^{label}]"));
                }
            }
            Event::SoftBreak => self.line_break(TokenType::Softbreak),
            Event::HardBreak => self.line_break(TokenType::Hardbreak),
            Event::Rule => {
                self.flush_inline();
                self.tokens.push(Token::new(TokenType::Hr));
            }
            Event::TaskListMarker(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                tracing::debug!(?event, "Skipping unsupported event");
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        if !is_inline_tag(&tag) {
            self.flush_inline();
        }
        match tag {
            Tag::Paragraph => {
                self.tokens.push(Token::paragraph_open(false));
                self.inline = Some(InlineBuffer::default());
            }
            Tag::Heading { level, .. } => {
                self.tokens
                    .push(Token::new(TokenType::HeadingOpen).with_level(heading_level_to_num(level)));
                self.inline = Some(InlineBuffer::default());
            }
            Tag::BlockQuote(_) => {
                self.containers.push(Container::Other);
                self.tokens.push(Token::new(TokenType::BlockquoteOpen));
            }
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => Some(info.to_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((info, String::new()));
            }
            Tag::HtmlBlock => {
                self.html = Some(String::new());
            }
            Tag::List(start) => {
                self.containers.push(Container::Other);
                let token = match start {
                    Some(order) => Token::new(TokenType::OrderedListOpen).with_order(order),
                    None => Token::new(TokenType::BulletListOpen),
                };
                self.tokens.push(token);
            }
            Tag::Item => {
                self.containers.push(Container::Item);
                self.tokens.push(Token::new(TokenType::ListItemOpen));
            }
            Tag::FootnoteDefinition(label) => {
                self.containers.push(Container::Other);
                let main = mem::take(&mut self.tokens);
                self.footnotes.saved = Some((label.to_lowercase(), main));
            }
            Tag::DefinitionList => {
                self.containers.push(Container::Other);
                self.tokens.push(Token::new(TokenType::DlOpen));
            }
            Tag::DefinitionListTitle => {
                self.containers.push(Container::Other);
                self.tokens.push(Token::new(TokenType::DtOpen));
            }
            Tag::DefinitionListDefinition => {
                self.containers.push(Container::Other);
                self.tokens.push(Token::new(TokenType::DdOpen));
            }
            Tag::Table(alignments) => {
                self.containers.push(Container::Other);
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                self.tokens.push(Token::new(TokenType::TableOpen));
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.tokens.push(Token::new(TokenType::TheadOpen));
                self.tokens.push(Token::new(TokenType::TrOpen));
            }
            Tag::TableRow => {
                if !self.table.body_open {
                    self.table.body_open = true;
                    self.tokens.push(Token::new(TokenType::TbodyOpen));
                }
                self.table.cell = 0;
                self.tokens.push(Token::new(TokenType::TrOpen));
            }
            Tag::TableCell => {
                let token_type = if self.table.in_head {
                    TokenType::ThOpen
                } else {
                    TokenType::TdOpen
                };
                let align = self
                    .table
                    .alignments
                    .get(self.table.cell)
                    .copied()
                    .and_then(alignment);
                self.tokens.push(Token::new(token_type).with_align(align));
                self.inline = Some(InlineBuffer::default());
            }
            Tag::MetadataBlock(_) => {
                tracing::debug!("Skipping metadata block");
                self.in_metadata = true;
            }
            Tag::Emphasis => self.push_marker(TokenType::EmOpen),
            Tag::Strong => self.push_marker(TokenType::StrongOpen),
            Tag::Strikethrough => self.push_marker(TokenType::DelOpen),
            Tag::Superscript => self.script = Some((TokenType::Sup, String::new())),
            Tag::Subscript => self.script = Some((TokenType::Sub, String::new())),
            // Links inside alt text or sub/sup content keep only their text.
            Tag::Link { .. } if self.in_plain_text() => {}
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut token = Token::new(TokenType::LinkOpen).with_href(&*dest_url);
                if !title.is_empty() {
                    token = token.with_title(&*title);
                }
                self.push_inline(token, "");
            }
            Tag::Image {
                dest_url, title, ..
            } => match &mut self.image {
                Some(image) => image.depth += 1,
                None => {
                    self.image = Some(ImageBuffer {
                        src: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                        depth: 1,
                    });
                }
            },
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if !is_inline_tag_end(tag) {
            self.flush_inline();
        }
        match tag {
            TagEnd::Paragraph => self.tokens.push(Token::paragraph_close(false)),
            TagEnd::Heading(level) => {
                self.tokens
                    .push(Token::new(TokenType::HeadingClose).with_level(heading_level_to_num(level)));
            }
            TagEnd::BlockQuote(_) => {
                self.containers.pop();
                self.tokens.push(Token::new(TokenType::BlockquoteClose));
            }
            TagEnd::CodeBlock => {
                if let Some((info, content)) = self.code.take() {
                    let token = match info {
                        Some(info) => Token::fence(info, content),
                        None => Token::new(TokenType::Code)
                            .with_content(content)
                            .with_block(true),
                    };
                    self.tokens.push(token);
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html.take() {
                    self.tokens
                        .push(Token::new(TokenType::Htmlblock).with_content(html));
                }
            }
            TagEnd::List(ordered) => {
                self.containers.pop();
                self.tokens.push(Token::new(if ordered {
                    TokenType::OrderedListClose
                } else {
                    TokenType::BulletListClose
                }));
            }
            TagEnd::Item => {
                self.containers.pop();
                if self
                    .tokens
                    .last()
                    .is_some_and(|last| last.is(&TokenType::ListItemOpen))
                {
                    self.tokens.push(Token::paragraph_open(true));
                    self.tokens.push(Token::inline("", Vec::new()));
                    self.tokens.push(Token::paragraph_close(true));
                }
                self.tokens.push(Token::new(TokenType::ListItemClose));
            }
            TagEnd::FootnoteDefinition => {
                self.containers.pop();
                if let Some((label, main)) = self.footnotes.saved.take() {
                    let body = mem::replace(&mut self.tokens, main);
                    self.footnotes.definitions.push((label, body));
                }
            }
            TagEnd::DefinitionList => {
                self.containers.pop();
                self.tokens.push(Token::new(TokenType::DlClose));
            }
            TagEnd::DefinitionListTitle => {
                self.containers.pop();
                self.tokens.push(Token::new(TokenType::DtClose));
            }
            TagEnd::DefinitionListDefinition => {
                self.containers.pop();
                self.tokens.push(Token::new(TokenType::DdClose));
            }
            TagEnd::Table => {
                self.containers.pop();
                if self.table.body_open {
                    self.tokens.push(Token::new(TokenType::TbodyClose));
                }
                self.tokens.push(Token::new(TokenType::TableClose));
                self.table = TableState::default();
            }
            TagEnd::TableHead => {
                self.tokens.push(Token::new(TokenType::TrClose));
                self.tokens.push(Token::new(TokenType::TheadClose));
                self.table.in_head = false;
            }
            TagEnd::TableRow => self.tokens.push(Token::new(TokenType::TrClose)),
            TagEnd::TableCell => {
                self.tokens.push(Token::new(if self.table.in_head {
                    TokenType::ThClose
                } else {
                    TokenType::TdClose
                }));
                self.table.cell += 1;
            }
            TagEnd::MetadataBlock(_) => {}
            TagEnd::Emphasis => self.push_marker(TokenType::EmClose),
            TagEnd::Strong => self.push_marker(TokenType::StrongClose),
            TagEnd::Strikethrough => self.push_marker(TokenType::DelClose),
            TagEnd::Superscript | TagEnd::Subscript => {
                if let Some((token_type, content)) = self.script.take() {
                    let token = Token::new(token_type).with_content(&content);
                    self.push_inline(token, &content);
                }
            }
            TagEnd::Link => self.push_marker(TokenType::LinkClose),
            TagEnd::Image => self.end_image(),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = &mut self.code {
            content.push_str(text);
        } else if !self.capture_plain(text) {
            self.push_inline(Token::text(text), text);
        }
    }

    fn inline_code(&mut self, code: &str) {
        if !self.capture_plain(code) {
            self.push_inline(
                Token::new(TokenType::Code).with_content(code),
                &format!("`{code}`"),
            );
        }
    }

    fn line_break(&mut self, token_type: TokenType) {
        if !self.capture_plain(" ") {
            self.push_inline(Token::new(token_type), "\n");
        }
    }

    /// Inside image alt text or sub/sup content everything is plain text.
    fn in_plain_text(&self) -> bool {
        self.image.is_some() || self.script.is_some()
    }

    /// Append to the active alt text or sub/sup content. Returns `false`
    /// when neither is open.
    fn capture_plain(&mut self, text: &str) -> bool {
        if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else if let Some((_, content)) = &mut self.script {
            content.push_str(text);
        } else {
            return false;
        }
        true
    }

    fn html(&mut self, html: &str) {
        match &mut self.html {
            Some(buffer) => buffer.push_str(html),
            None => {
                self.flush_inline();
                self.tokens
                    .push(Token::new(TokenType::Htmlblock).with_content(html));
            }
        }
    }

    fn end_image(&mut self) {
        let Some(image) = &mut self.image else {
            return;
        };
        if image.depth > 1 {
            image.depth -= 1;
            return;
        }
        let Some(image) = self.image.take() else {
            return;
        };
        let source = format!("![{}]({})", image.alt, image.src);
        let mut token = Token::new(TokenType::Image)
            .with_src(image.src)
            .with_alt(image.alt);
        if !image.title.is_empty() {
            token = token.with_title(image.title);
        }
        self.push_inline(token, &source);
    }

    /// Formatting marker with no text of its own. Dropped inside image alt
    /// text and sub/sup content, which are plain text.
    fn push_marker(&mut self, token_type: TokenType) {
        if !self.in_plain_text() {
            self.push_inline(Token::new(token_type), "");
        }
    }

    fn push_inline(&mut self, token: Token, source: &str) {
        if self.inline.is_none() {
            let implicit_paragraph = self.containers.last() == Some(&Container::Item);
            if implicit_paragraph {
                self.tokens.push(Token::paragraph_open(true));
            }
            self.inline = Some(InlineBuffer {
                implicit_paragraph,
                ..InlineBuffer::default()
            });
        }
        if let Some(buffer) = &mut self.inline {
            buffer.content.push_str(source);
            buffer.children.push(token);
        }
    }

    fn flush_inline(&mut self) {
        if let Some(buffer) = self.inline.take() {
            self.tokens
                .push(Token::inline(buffer.content, buffer.children));
            if buffer.implicit_paragraph {
                self.tokens.push(Token::paragraph_close(true));
            }
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_inline();
        if let Some((_, main)) = self.footnotes.saved.take() {
            let body = mem::replace(&mut self.tokens, main);
            self.tokens.extend(body);
        }
        self.append_footnote_block();
        self.tokens
    }

    fn append_footnote_block(&mut self) {
        let definitions = mem::take(&mut self.footnotes.definitions);
        let mut entries: Vec<(usize, Vec<Token>)> = Vec::with_capacity(definitions.len());
        for (label, body) in definitions {
            match self.footnotes.ids.get(&label) {
                Some(&id) => entries.push((id, body)),
                None => tracing::debug!(label = %label, "Dropping unreferenced footnote definition"),
            }
        }
        if entries.is_empty() {
            return;
        }
        entries.sort_by_key(|(id, _)| *id);

        self.tokens.push(Token::new(TokenType::FootnoteBlockOpen));
        for (id, mut body) in entries {
            let refs = self.footnotes.counts.get(id).copied().unwrap_or(0).max(1);
            let anchors = (0..refs).map(|sub_id| {
                Token::new(TokenType::FootnoteAnchor).with_footnote(id, sub_id)
            });

            self.tokens
                .push(Token::new(TokenType::FootnoteOpen).with_footnote(id, 0));
            let trailing_close = body
                .last()
                .is_some_and(|last| last.is(&TokenType::ParagraphClose))
                .then(|| body.pop())
                .flatten();
            self.tokens.extend(body);
            self.tokens.extend(anchors);
            self.tokens.extend(trailing_close);
            self.tokens
                .push(Token::new(TokenType::FootnoteClose).with_footnote(id, 0));
        }
        self.tokens.push(Token::new(TokenType::FootnoteBlockClose));
    }
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript
            | Tag::Link { .. }
            | Tag::Image { .. }
    )
}

fn is_inline_tag_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::Link
            | TagEnd::Image
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Parser;

    use super::*;
    use crate::token::Align;

    fn tokens(markdown: &str) -> Vec<Token> {
        to_tokens(Parser::new_ext(markdown, parser_options()))
    }

    fn names(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.token_type.name()).collect()
    }

    #[test]
    fn test_paragraph() {
        let tokens = tokens("hi there");
        assert_eq!(names(&tokens), vec!["paragraph_open", "inline", "paragraph_close"]);
        assert!(!tokens[0].tight);
        assert_eq!(tokens[1].content, "hi there");
        assert_eq!(names(&tokens[1].children), vec!["text"]);
    }

    #[test]
    fn test_tight_list_wraps_items_in_tight_paragraphs() {
        let tokens = tokens("- a\n- b\n");
        assert_eq!(
            names(&tokens),
            vec![
                "bullet_list_open",
                "list_item_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "list_item_close",
                "list_item_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "list_item_close",
                "bullet_list_close",
            ]
        );
        assert!(tokens[2].tight && tokens[4].tight);
    }

    #[test]
    fn test_loose_list_paragraphs_are_not_tight() {
        let tokens = tokens("- a\n\n- b\n");
        let paragraphs: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.is(&TokenType::ParagraphOpen))
            .collect();
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs.iter().all(|t| !t.tight));
    }

    #[test]
    fn test_empty_item_yields_empty_tight_paragraph() {
        let tokens = tokens("1. a\n2.\n3. c\n");
        let empty = tokens
            .iter()
            .position(|t| t.is(&TokenType::Inline) && t.content.is_empty())
            .unwrap();
        assert!(tokens[empty - 1].is(&TokenType::ParagraphOpen) && tokens[empty - 1].tight);
        assert!(tokens[empty + 1].is(&TokenType::ParagraphClose) && tokens[empty + 1].tight);
        assert!(tokens[empty + 2].is(&TokenType::ListItemClose));
    }

    #[test]
    fn test_nested_list_closes_implicit_paragraph() {
        let tokens = tokens("- a\n  - b\n");
        assert_eq!(
            names(&tokens[..6]),
            vec![
                "bullet_list_open",
                "list_item_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "bullet_list_open",
            ]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let tokens = tokens("3. x\n");
        assert_eq!(tokens[0].order, Some(3));
    }

    #[test]
    fn test_heading_level() {
        let tokens = tokens("## Title\n");
        assert_eq!(names(&tokens), vec!["heading_open", "inline", "heading_close"]);
        assert_eq!(tokens[0].level, Some(2));
        assert_eq!(tokens[2].level, Some(2));
    }

    #[test]
    fn test_code_blocks() {
        let tokens = tokens("```rust  linenos\nfn main() {}\n```\n\n    indented\n");
        assert_eq!(tokens[0].token_type, TokenType::Fence);
        assert_eq!(tokens[0].params, "rust  linenos");
        assert_eq!(tokens[0].content, "fn main() {}\n");
        assert_eq!(tokens[1].token_type, TokenType::Code);
        assert!(tokens[1].block);
        assert_eq!(tokens[1].content, "indented\n");
    }

    #[test]
    fn test_inline_constructs() {
        let tokens = tokens("a `b` **c** ~~d~~ [e](http://x \"T\") <kbd>");
        let children = &tokens[1].children;
        assert_eq!(
            names(children),
            vec![
                "text",
                "code",
                "text",
                "strong_open",
                "text",
                "strong_close",
                "text",
                "del_open",
                "text",
                "del_close",
                "text",
                "link_open",
                "text",
                "link_close",
                "text",
                "htmltag",
            ]
        );
        let link = &children[11];
        assert_eq!(link.href.as_deref(), Some("http://x"));
        assert_eq!(link.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_image_collects_alt_text() {
        let tokens = tokens("![a *b* `c`](x.png \"T\")");
        let children = &tokens[1].children;
        assert_eq!(names(children), vec!["image"]);
        assert_eq!(children[0].alt.as_deref(), Some("a b c"));
        assert_eq!(children[0].src.as_deref(), Some("x.png"));
        assert_eq!(children[0].title.as_deref(), Some("T"));
        assert!(!tokens[1].content.is_empty());
    }

    #[test]
    fn test_image_alt_flattens_nested_inlines() {
        let tokens = tokens("![foo [bar](/url)\nbaz <b>](/img.png)\n");
        let children = &tokens[1].children;
        assert_eq!(names(children), vec!["image"]);
        assert_eq!(children[0].alt.as_deref(), Some("foo bar baz <b>"));
        assert_eq!(children[0].src.as_deref(), Some("/img.png"));
    }

    #[test]
    fn test_sub_and_sup() {
        let tokens = tokens("H~2~O x^2^");
        let children = &tokens[1].children;
        let sub = children.iter().find(|t| t.is(&TokenType::Sub)).unwrap();
        let sup = children.iter().find(|t| t.is(&TokenType::Sup)).unwrap();
        assert_eq!(sub.content, "2");
        assert_eq!(sup.content, "2");
    }

    #[test]
    fn test_table_alignment() {
        let tokens = tokens("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        assert_eq!(
            names(&tokens),
            vec![
                "table_open",
                "thead_open",
                "tr_open",
                "th_open",
                "inline",
                "th_close",
                "th_open",
                "inline",
                "th_close",
                "tr_close",
                "thead_close",
                "tbody_open",
                "tr_open",
                "td_open",
                "inline",
                "td_close",
                "td_open",
                "inline",
                "td_close",
                "tr_close",
                "tbody_close",
                "table_close",
            ]
        );
        assert_eq!(tokens[3].align, Some(Align::Left));
        assert_eq!(tokens[6].align, Some(Align::Right));
        assert_eq!(tokens[16].align, Some(Align::Right));
    }

    #[test]
    fn test_footnotes_move_to_trailing_block() {
        let tokens = tokens("A[^n] B[^n].\n\n[^n]: Note.\n\nAfter.\n");
        let refs: Vec<(Option<usize>, usize)> = tokens[1]
            .children
            .iter()
            .filter(|t| t.is(&TokenType::FootnoteRef))
            .map(|t| (t.id, t.sub_id))
            .collect();
        assert_eq!(refs, vec![(Some(0), 0), (Some(0), 1)]);

        let block = tokens
            .iter()
            .position(|t| t.is(&TokenType::FootnoteBlockOpen))
            .unwrap();
        assert_eq!(
            names(&tokens[block..]),
            vec![
                "footnote_block_open",
                "footnote_open",
                "paragraph_open",
                "inline",
                "footnote_anchor",
                "footnote_anchor",
                "paragraph_close",
                "footnote_close",
                "footnote_block_close",
            ]
        );
        assert_eq!(tokens[block + 5].sub_id, 1);
        // The paragraph after the definition stays in the main stream.
        assert!(tokens[..block].iter().any(|t| t.content == "After."));
    }

    #[test]
    fn test_definition_list() {
        let tokens = tokens("Term\n: Definition\n");
        assert_eq!(names(&tokens).first(), Some(&"dl_open"));
        assert!(names(&tokens).contains(&"dt_open"));
        assert!(names(&tokens).contains(&"dd_close"));
        assert_eq!(names(&tokens).last(), Some(&"dl_close"));
    }

    #[test]
    fn test_metadata_block_is_skipped() {
        let tokens = tokens("---\ntitle: x\n---\n\nBody\n");
        assert_eq!(names(&tokens), vec!["paragraph_open", "inline", "paragraph_close"]);
        assert_eq!(tokens[1].content, "Body");
    }

    #[test]
    fn test_html_block() {
        let tokens = tokens("<div>\nhi\n</div>\n");
        assert_eq!(names(&tokens), vec!["htmlblock"]);
        assert_eq!(tokens[0].content, "<div>\nhi\n</div>\n");
    }
}
