//! Default rules for every built-in token type.
//!
//! Tag names and fixed attributes come from the active [`MarkupTable`];
//! this module only decides structure, escaping and line breaks.
//!
//! [`MarkupTable`]: crate::markup::MarkupTable

use std::fmt::Write;

use crate::error::RenderError;
use crate::escape::{escape_html, replace_entities, unescape_md};
use crate::fence;
use crate::markup::LinkTarget;
use crate::rule::{Rule, RuleContext, RuleTable};
use crate::token::TokenType;

type RuleResult = Result<String, RenderError>;

pub(crate) fn register_defaults(table: &mut RuleTable) {
    let defaults: [(TokenType, fn(&RuleContext<'_>) -> RuleResult); 62] = [
        (TokenType::BlockquoteOpen, blockquote_open),
        (TokenType::BlockquoteClose, blockquote_close),
        (TokenType::Code, code),
        (TokenType::Fence, fence::render),
        (TokenType::HeadingOpen, heading_open),
        (TokenType::HeadingClose, heading_close),
        (TokenType::Hr, hr),
        (TokenType::BulletListOpen, bullet_list_open),
        (TokenType::BulletListClose, bullet_list_close),
        (TokenType::ListItemOpen, list_item_open),
        (TokenType::ListItemClose, list_item_close),
        (TokenType::OrderedListOpen, ordered_list_open),
        (TokenType::OrderedListClose, ordered_list_close),
        (TokenType::ParagraphOpen, paragraph_open),
        (TokenType::ParagraphClose, paragraph_close),
        (TokenType::LinkOpen, link_open),
        (TokenType::LinkClose, link_close),
        (TokenType::Image, image),
        (TokenType::TableOpen, table_open),
        (TokenType::TableClose, table_close),
        (TokenType::TheadOpen, thead_open),
        (TokenType::TheadClose, thead_close),
        (TokenType::TbodyOpen, tbody_open),
        (TokenType::TbodyClose, tbody_close),
        (TokenType::TrOpen, tr_open),
        (TokenType::TrClose, tr_close),
        (TokenType::ThOpen, th_open),
        (TokenType::ThClose, th_close),
        (TokenType::TdOpen, td_open),
        (TokenType::TdClose, td_close),
        (TokenType::StrongOpen, |ctx| Ok(ctx.markup().strong.open())),
        (TokenType::StrongClose, |ctx| Ok(ctx.markup().strong.close())),
        (TokenType::EmOpen, |ctx| Ok(ctx.markup().em.open())),
        (TokenType::EmClose, |ctx| Ok(ctx.markup().em.close())),
        (TokenType::DelOpen, |ctx| Ok(ctx.markup().del.open())),
        (TokenType::DelClose, |ctx| Ok(ctx.markup().del.close())),
        (TokenType::InsOpen, |ctx| Ok(ctx.markup().ins.open())),
        (TokenType::InsClose, |ctx| Ok(ctx.markup().ins.close())),
        (TokenType::MarkOpen, |ctx| Ok(ctx.markup().mark.open())),
        (TokenType::MarkClose, |ctx| Ok(ctx.markup().mark.close())),
        (TokenType::Sub, sub),
        (TokenType::Sup, sup),
        (TokenType::Hardbreak, hardbreak),
        (TokenType::Softbreak, softbreak),
        (TokenType::Inline, inline),
        (TokenType::Text, text),
        (TokenType::Htmlblock, raw_html),
        (TokenType::Htmltag, raw_html),
        (TokenType::AbbrOpen, abbr_open),
        (TokenType::AbbrClose, |ctx| Ok(ctx.markup().abbr.close())),
        (TokenType::FootnoteRef, footnote_ref),
        (TokenType::FootnoteBlockOpen, footnote_block_open),
        (TokenType::FootnoteBlockClose, footnote_block_close),
        (TokenType::FootnoteOpen, footnote_open),
        (TokenType::FootnoteClose, footnote_close),
        (TokenType::FootnoteAnchor, footnote_anchor),
        (TokenType::DlOpen, |ctx| Ok(format!("{}\n", ctx.markup().dl.open()))),
        (TokenType::DlClose, |ctx| Ok(format!("{}\n", ctx.markup().dl.close()))),
        (TokenType::DtOpen, |ctx| Ok(ctx.markup().dt.open())),
        (TokenType::DtClose, |ctx| Ok(format!("{}\n", ctx.markup().dt.close()))),
        (TokenType::DdOpen, |ctx| Ok(ctx.markup().dd.open())),
        (TokenType::DdClose, |ctx| Ok(format!("{}\n", ctx.markup().dd.close()))),
    ];

    for (token_type, rule) in defaults {
        table.insert(token_type, Rule::new(rule));
    }
}

// Blocks

fn blockquote_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().blockquote.open()))
}

fn blockquote_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!(
        "{}{}",
        ctx.markup().blockquote.close(),
        ctx.break_after()
    ))
}

fn code(ctx: &RuleContext<'_>) -> RuleResult {
    let token = ctx.token();
    let body = escape_html(&token.content);
    if token.block {
        Ok(format!(
            "{}{}",
            ctx.markup().code_block.wrap(&body),
            ctx.break_after()
        ))
    } else {
        Ok(ctx.markup().code_inline.wrap(&body))
    }
}

fn heading_open(ctx: &RuleContext<'_>) -> RuleResult {
    let level = ctx.token().level.ok_or_else(|| ctx.missing("level"))?;
    Ok(ctx.markup().heading.open(level))
}

fn heading_close(ctx: &RuleContext<'_>) -> RuleResult {
    let close = ctx
        .markup()
        .heading
        .close(ctx.token().level)
        .ok_or_else(|| ctx.missing("level"))?;
    Ok(format!("{close}\n"))
}

fn hr(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!(
        "{}{}",
        ctx.markup().hr.render("", ctx.options().xhtml_out),
        ctx.break_after()
    ))
}

// Lists

fn bullet_list_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().bullet_list.open()))
}

fn bullet_list_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!(
        "{}{}",
        ctx.markup().bullet_list.close(),
        ctx.break_after()
    ))
}

fn list_item_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.markup().list_item.open())
}

fn list_item_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().list_item.close()))
}

fn ordered_list_open(ctx: &RuleContext<'_>) -> RuleResult {
    let start = match ctx.token().order {
        Some(order) if order > 1 => format!(r#" start="{order}""#),
        _ => String::new(),
    };
    Ok(format!("{}\n", ctx.markup().ordered_list.open_with(&start)))
}

fn ordered_list_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!(
        "{}{}",
        ctx.markup().ordered_list.close(),
        ctx.break_after()
    ))
}

// Paragraphs

fn paragraph_open(ctx: &RuleContext<'_>) -> RuleResult {
    if ctx.token().tight {
        Ok(String::new())
    } else {
        Ok(ctx.markup().paragraph.open())
    }
}

fn paragraph_close(ctx: &RuleContext<'_>) -> RuleResult {
    let token = ctx.token();
    // A tight paragraph around an empty inline gets no break of its own.
    let empty_tight = token.tight
        && ctx.idx() > 0
        && ctx.tokens().get(ctx.idx() - 1).is_some_and(|prev| {
            prev.is(&TokenType::Inline) && prev.content.is_empty()
        });

    let mut out = if token.tight {
        String::new()
    } else {
        ctx.markup().paragraph.close()
    };
    if !empty_tight {
        out.push_str(ctx.break_after());
    }
    Ok(out)
}

// Links and images

fn link_open(ctx: &RuleContext<'_>) -> RuleResult {
    let token = ctx.token();
    let markup = &ctx.markup().link;
    let href = token.href.as_deref().ok_or_else(|| ctx.missing("href"))?;

    let mut attrs = String::new();
    let prefix = match (markup.target, &ctx.options().link_target) {
        (LinkTarget::HrefPrefix(prefix), Some(_)) => prefix,
        _ => "",
    };
    let _ = write!(attrs, r#" {}="{prefix}{}""#, markup.href, escape_html(href));
    if let Some(title) = token.title.as_deref().filter(|t| !t.is_empty()) {
        let _ = write!(
            attrs,
            r#" {}="{}""#,
            markup.title,
            escape_html(&replace_entities(title))
        );
    }
    if let (LinkTarget::Attribute(name), Some(target)) = (markup.target, &ctx.options().link_target)
    {
        let _ = write!(attrs, r#" {name}="{}""#, escape_html(target));
    }
    Ok(format!("<{}{attrs}>", markup.name))
}

fn link_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("</{}>", ctx.markup().link.name))
}

fn image(ctx: &RuleContext<'_>) -> RuleResult {
    let token = ctx.token();
    let markup = &ctx.markup().image;
    let src = token.src.as_deref().ok_or_else(|| ctx.missing("src"))?;

    let alt = token
        .alt
        .as_deref()
        .map(|alt| escape_html(&replace_entities(&unescape_md(alt))))
        .unwrap_or_default();
    let mut attrs = format!(r#" src="{}" {}="{alt}""#, escape_html(src), markup.alt);
    if let Some(title) = token.title.as_deref().filter(|t| !t.is_empty()) {
        let _ = write!(attrs, r#" title="{}""#, escape_html(&replace_entities(title)));
    }
    Ok(markup.element.render(&attrs, ctx.options().xhtml_out))
}

// Tables

fn table_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().table.open()))
}

fn table_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().table.close()))
}

fn thead_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().thead.open()))
}

fn thead_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().thead.close()))
}

fn tbody_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().tbody.open()))
}

fn tbody_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().tbody.close()))
}

fn tr_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.markup().tr.open())
}

fn tr_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().tr.close()))
}

fn alignment_style(ctx: &RuleContext<'_>) -> String {
    ctx.token()
        .align
        .map(|align| format!(r#" style="text-align:{}""#, align.as_str()))
        .unwrap_or_default()
}

fn th_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.markup().th.open_with(&alignment_style(ctx)))
}

fn th_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.markup().th.close())
}

fn td_open(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.markup().td.open_with(&alignment_style(ctx)))
}

fn td_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.markup().td.close())
}

// Inline leaves

fn inline(ctx: &RuleContext<'_>) -> RuleResult {
    ctx.render_inline(&ctx.token().children)
}

fn sub(ctx: &RuleContext<'_>) -> RuleResult {
    let el = ctx.markup().sub;
    Ok(format!(
        "{}{}{}",
        el.open(),
        escape_html(&ctx.token().content),
        el.close()
    ))
}

fn sup(ctx: &RuleContext<'_>) -> RuleResult {
    let el = ctx.markup().sup;
    Ok(format!(
        "{}{}{}",
        el.open(),
        escape_html(&ctx.token().content),
        el.close()
    ))
}

fn hardbreak(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!(
        "{}\n",
        ctx.markup().line_break.render("", ctx.options().xhtml_out)
    ))
}

fn softbreak(ctx: &RuleContext<'_>) -> RuleResult {
    if ctx.options().breaks {
        hardbreak(ctx)
    } else {
        Ok("\n".to_owned())
    }
}

fn text(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(escape_html(&ctx.token().content))
}

fn raw_html(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(ctx.token().content.clone())
}

fn abbr_open(ctx: &RuleContext<'_>) -> RuleResult {
    let title = ctx
        .token()
        .title
        .as_deref()
        .ok_or_else(|| ctx.missing("title"))?;
    Ok(ctx
        .markup()
        .abbr
        .open(&escape_html(&replace_entities(title))))
}

// Footnotes

fn footnote_number(ctx: &RuleContext<'_>) -> Result<usize, RenderError> {
    ctx.token()
        .id
        .map(|id| id + 1)
        .ok_or_else(|| ctx.missing("id"))
}

fn footnote_ref_id(ctx: &RuleContext<'_>, number: usize) -> String {
    match ctx.token().sub_id {
        0 => format!("fnref{number}"),
        sub_id => format!("fnref{number}:{sub_id}"),
    }
}

fn footnote_ref(ctx: &RuleContext<'_>) -> RuleResult {
    let number = footnote_number(ctx)?;
    let markup = ctx.markup();
    let link = &markup.link;
    Ok(format!(
        r##"{}<{name} {href}="#fn{number}" id="{id}">[{number}]</{name}>{}"##,
        markup.footnotes.reference.open(),
        markup.footnotes.reference.close(),
        name = link.name,
        href = link.href,
        id = footnote_ref_id(ctx, number),
    ))
}

fn footnote_block_open(ctx: &RuleContext<'_>) -> RuleResult {
    let markup = ctx.markup();
    Ok(format!(
        "{}\n{}\n{}\n",
        markup
            .footnotes
            .separator
            .render("", ctx.options().xhtml_out),
        markup.footnotes.block.open(),
        markup
            .ordered_list
            .open_with(r#" class="footnotes-list""#),
    ))
}

fn footnote_block_close(ctx: &RuleContext<'_>) -> RuleResult {
    let markup = ctx.markup();
    Ok(format!(
        "{}\n{}\n",
        markup.ordered_list.close(),
        markup.footnotes.block.close()
    ))
}

fn footnote_open(ctx: &RuleContext<'_>) -> RuleResult {
    let number = footnote_number(ctx)?;
    Ok(ctx
        .markup()
        .list_item
        .open_with(&format!(r#" id="fn{number}" class="footnote-item""#)))
}

fn footnote_close(ctx: &RuleContext<'_>) -> RuleResult {
    Ok(format!("{}\n", ctx.markup().list_item.close()))
}

fn footnote_anchor(ctx: &RuleContext<'_>) -> RuleResult {
    let number = footnote_number(ctx)?;
    let markup = ctx.markup();
    let link = &markup.link;
    Ok(format!(
        r##" <{name} {href}="#{id}" class="footnote-backref">{backref}</{name}>"##,
        name = link.name,
        href = link.href,
        id = footnote_ref_id(ctx, number),
        backref = markup.footnotes.backref,
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::markup::Dialect;
    use crate::{Options, RenderError, Renderer, Token, TokenType};

    fn render(tokens: &[Token]) -> String {
        Renderer::new().render(tokens, &Options::default()).unwrap()
    }

    fn render_html(tokens: &[Token]) -> String {
        let options = Options::default().with_dialect(Dialect::Html);
        Renderer::new().render(tokens, &options).unwrap()
    }

    fn leaf(token_type: TokenType) -> Token {
        Token::new(token_type)
    }

    #[test]
    fn test_blockquote() {
        let tokens = [
            leaf(TokenType::BlockquoteOpen),
            leaf(TokenType::BlockquoteClose),
        ];
        assert_eq!(render(&tokens), "<nu-blockquote>\n</nu-blockquote>\n");
        assert_eq!(render_html(&tokens), "<blockquote>\n</blockquote>\n");
    }

    #[test]
    fn test_code_block_and_inline() {
        let block = [leaf(TokenType::Code).with_content("a < b").with_block(true)];
        assert_eq!(
            render(&block),
            "<nu-code><textarea>a &lt; b</textarea></nu-code>\n"
        );
        let inline = [leaf(TokenType::Code).with_content("x & y")];
        assert_eq!(
            render(&inline),
            "<nu-code inline><textarea>x &amp; y</textarea></nu-code>"
        );
        assert_eq!(render_html(&inline), "<code>x &amp; y</code>");
    }

    #[test]
    fn test_heading() {
        let tokens = [
            leaf(TokenType::HeadingOpen).with_level(2),
            Token::inline("Title", vec![Token::text("Title")]),
            leaf(TokenType::HeadingClose).with_level(2),
        ];
        assert_eq!(render(&tokens), "<nu-heading level=\"2\">Title</nu-heading>\n");
        assert_eq!(render_html(&tokens), "<h2>Title</h2>\n");
    }

    #[test]
    fn test_heading_without_level_is_error() {
        let tokens = [leaf(TokenType::HeadingOpen)];
        let err = Renderer::new()
            .render(&tokens, &Options::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingField { field: "level", index: 0, .. }
        ));
    }

    #[test]
    fn test_numbered_heading_close_needs_level() {
        let tokens = [leaf(TokenType::HeadingClose)];
        assert_eq!(render(&tokens), "</nu-heading>\n");
        let options = Options::default().with_dialect(Dialect::Html);
        assert!(Renderer::new().render(&tokens, &options).is_err());
    }

    #[test]
    fn test_hr_xhtml() {
        let tokens = [leaf(TokenType::Hr)];
        assert_eq!(render(&tokens), "<hr>\n");
        let options = Options {
            xhtml_out: true,
            ..Options::default()
        };
        assert_eq!(Renderer::new().render(&tokens, &options).unwrap(), "<hr />\n");
    }

    #[test]
    fn test_ordered_list_start() {
        let tokens = [
            leaf(TokenType::OrderedListOpen).with_order(3),
            leaf(TokenType::OrderedListClose),
        ];
        assert_eq!(render(&tokens), "<nu-list enumerate start=\"3\">\n</nu-list>\n");

        let tokens = [
            leaf(TokenType::OrderedListOpen).with_order(1),
            leaf(TokenType::OrderedListClose),
        ];
        assert_eq!(render_html(&tokens), "<ol>\n</ol>\n");
    }

    #[test]
    fn test_link_with_title_and_target() {
        let tokens = [
            leaf(TokenType::LinkOpen)
                .with_href("https://example.com/?a=1&b=2")
                .with_title("Say &quot;hi&quot;"),
            Token::text("site"),
            leaf(TokenType::LinkClose),
        ];
        assert_eq!(
            render(&tokens),
            r#"<nu-link to="https://example.com/?a=1&amp;b=2" label="Say &quot;hi&quot;">site</nu-link>"#
        );

        let options = Options {
            link_target: Some("_blank".to_owned()),
            ..Options::default()
        };
        assert_eq!(
            Renderer::new().render(&tokens[..1], &options).unwrap(),
            r#"<nu-link to="!https://example.com/?a=1&amp;b=2" label="Say &quot;hi&quot;">"#
        );

        let options = options.with_dialect(Dialect::Html);
        assert_eq!(
            Renderer::new().render(&tokens[..1], &options).unwrap(),
            r#"<a href="https://example.com/?a=1&amp;b=2" title="Say &quot;hi&quot;" target="_blank">"#
        );
    }

    #[test]
    fn test_link_without_href_is_error() {
        let err = Renderer::new()
            .render(&[leaf(TokenType::LinkOpen)], &Options::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingField { field: "href", .. }));
    }

    #[test]
    fn test_image() {
        let tokens = [leaf(TokenType::Image)
            .with_src("a.png")
            .with_alt(r"\*star\* &amp; <b>")
            .with_title("T")];
        assert_eq!(
            render(&tokens),
            r#"<nu-img src="a.png" label="*star* &amp; &lt;b&gt;" title="T">"#
        );
        let options = Options {
            xhtml_out: true,
            ..Options::default().with_dialect(Dialect::Html)
        };
        assert_eq!(
            Renderer::new().render(&tokens, &options).unwrap(),
            r#"<img src="a.png" alt="*star* &amp; &lt;b&gt;" title="T" />"#
        );
    }

    #[test]
    fn test_image_without_alt() {
        let tokens = [leaf(TokenType::Image).with_src("a.png")];
        assert_eq!(render(&tokens), r#"<nu-img src="a.png" label="">"#);
    }

    #[test]
    fn test_table_cells_alignment() {
        let tokens = [
            leaf(TokenType::TableOpen),
            leaf(TokenType::TheadOpen),
            leaf(TokenType::TrOpen),
            leaf(TokenType::ThOpen).with_align(Some(crate::Align::Center)),
            Token::inline("A", vec![Token::text("A")]),
            leaf(TokenType::ThClose),
            leaf(TokenType::TrClose),
            leaf(TokenType::TheadClose),
            leaf(TokenType::TbodyOpen),
            leaf(TokenType::TrOpen),
            leaf(TokenType::TdOpen),
            Token::inline("1", vec![Token::text("1")]),
            leaf(TokenType::TdClose),
            leaf(TokenType::TrClose),
            leaf(TokenType::TbodyClose),
            leaf(TokenType::TableClose),
        ];
        assert_eq!(
            render_html(&tokens),
            "<table>\n<thead>\n<tr><th style=\"text-align:center\">A</th></tr>\n</thead>\n\
             <tbody>\n<tr><td>1</td></tr>\n</tbody>\n</table>\n"
        );
        assert!(render(&tokens).contains("<nu-columnheader style=\"text-align:center\">A</nu-columnheader>"));
    }

    #[test]
    fn test_inline_pairs() {
        let tokens = [
            leaf(TokenType::StrongOpen),
            Token::text("b"),
            leaf(TokenType::StrongClose),
            leaf(TokenType::EmOpen),
            Token::text("i"),
            leaf(TokenType::EmClose),
            leaf(TokenType::DelOpen),
            leaf(TokenType::DelClose),
            leaf(TokenType::InsOpen),
            leaf(TokenType::InsClose),
            leaf(TokenType::MarkOpen),
            leaf(TokenType::MarkClose),
        ];
        assert_eq!(
            render(&tokens),
            "<nu-el text=\"bolder\">b</nu-el><nu-el text=\"i\">i</nu-el>\
             <nu-block theme=\"deleted\"></nu-block><nu-block theme=\"inserted\"></nu-block>\
             <nu-mark></nu-mark>"
        );
        assert_eq!(
            render_html(&tokens),
            "<strong>b</strong><em>i</em><del></del><ins></ins><mark></mark>"
        );
    }

    #[test]
    fn test_sub_sup_escape_content() {
        let tokens = [
            leaf(TokenType::Sub).with_content("<2>"),
            leaf(TokenType::Sup).with_content("n"),
        ];
        assert_eq!(
            render(&tokens),
            "<nu-el text=\"sub\">&lt;2&gt;</nu-el><nu-el text=\"sup\">n</nu-el>"
        );
    }

    #[test]
    fn test_breaks() {
        let tokens = [leaf(TokenType::Hardbreak), leaf(TokenType::Softbreak)];
        assert_eq!(render(&tokens), "<br>\n\n");
        let options = Options {
            breaks: true,
            xhtml_out: true,
            ..Options::default()
        };
        assert_eq!(
            Renderer::new().render(&tokens, &options).unwrap(),
            "<br />\n<br />\n"
        );
    }

    #[test]
    fn test_raw_html_passthrough() {
        let tokens = [
            leaf(TokenType::Htmlblock).with_content("<div>\n"),
            leaf(TokenType::Htmltag).with_content("<kbd>"),
        ];
        assert_eq!(render(&tokens), "<div>\n<kbd>");
    }

    #[test]
    fn test_abbr() {
        let tokens = [
            leaf(TokenType::AbbrOpen).with_title("Hyper &amp; Text"),
            Token::text("HTML"),
            leaf(TokenType::AbbrClose),
        ];
        assert_eq!(
            render(&tokens),
            "<nu-el text=\"u\"><tooltip>Hyper &amp; Text</tooltip>HTML</nu-el>"
        );
        assert_eq!(
            render_html(&tokens),
            "<abbr title=\"Hyper &amp; Text\">HTML</abbr>"
        );
    }

    #[test]
    fn test_footnote_ref() {
        let tokens = [
            leaf(TokenType::FootnoteRef).with_footnote(0, 0),
            leaf(TokenType::FootnoteRef).with_footnote(0, 1),
        ];
        assert_eq!(
            render(&tokens),
            "<nu-el text=\"sup\" class=\"footnote-ref\"><nu-link to=\"#fn1\" id=\"fnref1\">[1]</nu-link></nu-el>\
             <nu-el text=\"sup\" class=\"footnote-ref\"><nu-link to=\"#fn1\" id=\"fnref1:1\">[1]</nu-link></nu-el>"
        );
        assert_eq!(
            render_html(&tokens[..1]),
            "<sup class=\"footnote-ref\"><a href=\"#fn1\" id=\"fnref1\">[1]</a></sup>"
        );
    }

    #[test]
    fn test_footnote_block() {
        let tokens = [
            leaf(TokenType::FootnoteBlockOpen),
            leaf(TokenType::FootnoteOpen).with_footnote(1, 0),
            leaf(TokenType::FootnoteAnchor).with_footnote(1, 0),
            leaf(TokenType::FootnoteClose),
            leaf(TokenType::FootnoteBlockClose),
        ];
        assert_eq!(
            render(&tokens),
            "<nu-line class=\"footnotes-sep\">\n<nu-block class=\"footnotes\">\n\
             <nu-list enumerate class=\"footnotes-list\">\n\
             <nu-listitem id=\"fn2\" class=\"footnote-item\"> \
             <nu-link to=\"#fnref2\" class=\"footnote-backref\">\u{21a9}</nu-link></nu-listitem>\n\
             </nu-list>\n</nu-block>\n"
        );
        let options = Options {
            xhtml_out: true,
            ..Options::default().with_dialect(Dialect::Html)
        };
        let html = Renderer::new().render(&tokens, &options).unwrap();
        assert!(html.starts_with(
            "<hr class=\"footnotes-sep\" />\n<section class=\"footnotes\">\n<ol class=\"footnotes-list\">\n"
        ));
    }

    #[test]
    fn test_footnote_without_id_is_error() {
        let err = Renderer::new()
            .render(&[leaf(TokenType::FootnoteOpen)], &Options::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingField { field: "id", .. }));
    }

    #[test]
    fn test_definition_list() {
        let tokens = [
            leaf(TokenType::DlOpen),
            leaf(TokenType::DtOpen),
            Token::inline("term", vec![Token::text("term")]),
            leaf(TokenType::DtClose),
            leaf(TokenType::DdOpen),
            Token::inline("def", vec![Token::text("def")]),
            leaf(TokenType::DdClose),
            leaf(TokenType::DlClose),
        ];
        assert_eq!(render(&tokens), "<dl>\n<dt>term</dt>\n<dd>def</dd>\n</dl>\n");
    }

    #[test]
    fn test_tight_paragraph_close_after_empty_inline() {
        let tokens = [
            leaf(TokenType::ListItemOpen),
            Token::paragraph_open(true),
            Token::inline("", Vec::new()),
            Token::paragraph_close(true),
            leaf(TokenType::ListItemClose),
        ];
        assert_eq!(render(&tokens), "<nu-listitem></nu-listitem>\n");
    }
}
