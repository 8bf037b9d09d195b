//! Parser for the inline rich-text markup carried by paragraph text.
//!
//! Supported tags are `<b>`/`<strong>`, `<i>`/`<em>`, `<super>`/`<sup>` and
//! `<sub>`, plus the usual character entities. Anything the parser does not
//! recognize is kept as literal text, so parsing never fails.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1, take_while_m_n};
use nom::character::complete::char;
use nom::combinator::{map, map_opt, value};
use nom::sequence::delimited;
use nom::{IResult, Parser};

/// Vertical placement of a span relative to the line baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    #[default]
    Normal,
    Super,
    Sub,
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub script: Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Bold,
    Italic,
    Super,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open(TagKind),
    Close(TagKind),
    Char(char),
    Text(&'a str),
}

fn tag_name(input: &str) -> IResult<&str, TagKind> {
    alt((
        value(TagKind::Bold, alt((tag("strong"), tag("b")))),
        value(TagKind::Italic, alt((tag("em"), tag("i")))),
        value(TagKind::Super, alt((tag("super"), tag("sup")))),
        value(TagKind::Sub, tag("sub")),
    ))
    .parse(input)
}

fn open_tag(input: &str) -> IResult<&str, Token<'_>> {
    map(delimited(char('<'), tag_name, char('>')), Token::Open).parse(input)
}

fn close_tag(input: &str) -> IResult<&str, Token<'_>> {
    map(delimited(tag("</"), tag_name, char('>')), Token::Close).parse(input)
}

fn named_entity(input: &str) -> IResult<&str, char> {
    alt((
        value('&', tag("&amp;")),
        value('<', tag("&lt;")),
        value('>', tag("&gt;")),
        value('"', tag("&quot;")),
        value('\'', tag("&apos;")),
    ))
    .parse(input)
}

fn decimal_entity(input: &str) -> IResult<&str, char> {
    map_opt(
        delimited(
            tag("&#"),
            take_while_m_n(1, 7, |c: char| c.is_ascii_digit()),
            char(';'),
        ),
        |digits: &str| digits.parse::<u32>().ok().and_then(char::from_u32),
    )
    .parse(input)
}

fn hex_entity(input: &str) -> IResult<&str, char> {
    map_opt(
        delimited(
            alt((tag("&#x"), tag("&#X"))),
            take_while_m_n(1, 6, |c: char| c.is_ascii_hexdigit()),
            char(';'),
        ),
        |digits: &str| u32::from_str_radix(digits, 16).ok().and_then(char::from_u32),
    )
    .parse(input)
}

fn entity(input: &str) -> IResult<&str, Token<'_>> {
    map(alt((named_entity, hex_entity, decimal_entity)), Token::Char).parse(input)
}

fn text(input: &str) -> IResult<&str, Token<'_>> {
    map(take_till1(|c: char| c == '<' || c == '&'), Token::Text).parse(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((close_tag, open_tag, entity, text)).parse(input)
}

/// Tracks open tags by depth so that nested and repeated tags balance.
#[derive(Debug, Default)]
struct FormatState {
    bold: usize,
    italic: usize,
    superscript: usize,
    subscript: usize,
}

impl FormatState {
    fn counter(&mut self, kind: TagKind) -> &mut usize {
        match kind {
            TagKind::Bold => &mut self.bold,
            TagKind::Italic => &mut self.italic,
            TagKind::Super => &mut self.superscript,
            TagKind::Sub => &mut self.subscript,
        }
    }

    fn open(&mut self, kind: TagKind) {
        *self.counter(kind) += 1;
    }

    fn close(&mut self, kind: TagKind) {
        let counter = self.counter(kind);
        *counter = counter.saturating_sub(1);
    }

    /// The innermost script wins only in the sense that subscript is checked
    /// last; mixing both is not meaningful for titles.
    fn script(&self) -> Script {
        if self.subscript > 0 {
            Script::Sub
        } else if self.superscript > 0 {
            Script::Super
        } else {
            Script::Normal
        }
    }
}

fn push_text(spans: &mut Vec<InlineSpan>, state: &FormatState, text: &str) {
    if text.is_empty() {
        return;
    }
    let bold = state.bold > 0;
    let italic = state.italic > 0;
    let script = state.script();

    if let Some(last) = spans.last_mut() {
        if last.bold == bold && last.italic == italic && last.script == script {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(InlineSpan {
        text: text.to_string(),
        bold,
        italic,
        script,
    });
}

/// Parses inline markup into formatted spans. Adjacent text with the same
/// formatting is merged into one span.
pub fn parse_inline(markup: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut state = FormatState::default();
    let mut rest = markup;

    while !rest.is_empty() {
        match token(rest) {
            Ok((remaining, tok)) => {
                match tok {
                    Token::Open(kind) => state.open(kind),
                    Token::Close(kind) => state.close(kind),
                    Token::Char(c) => push_text(&mut spans, &state, c.encode_utf8(&mut [0u8; 4])),
                    Token::Text(t) => push_text(&mut spans, &state, t),
                }
                rest = remaining;
            }
            Err(_) => {
                // A '<' or '&' that does not start a known construct is literal.
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    push_text(&mut spans, &state, c.encode_utf8(&mut [0u8; 4]));
                }
                rest = chars.as_str();
            }
        }
    }

    spans
}
