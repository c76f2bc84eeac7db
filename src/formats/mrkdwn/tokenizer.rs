//! State machine tokenizer for the mrkdwn format.
//!
//! mrkdwn has no formal grammar; what a byte means depends on where it
//! sits. The tokenizer is a cursor over the input with two states:
//!
//! - `Outside`: formatting markers, angle-bracketed platform syntax, line
//!   markers and escapes are all live.
//! - `InsideFence`: everything is literal except the closing ``` and
//!   angle-bracketed URLs, which are recognized only so their brackets can
//!   be stripped.
//!
//! Transitions happen only on a ``` run. Style markers are emitted only
//! when they sit on a word boundary on at least one side, so `snake_case`
//! and `2*3` stay literal; pairing (and degradation of unpaired markers)
//! is the parser's job.

use crate::ast::nodes::BroadcastRange;
use crate::common::has_url_scheme;
use crate::error::ConvertError;

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    BoldMarker,
    ItalicMarker,
    StrikeMarker,
    InlineCode(String),
    FenceOpen,
    FenceClose,
    Link {
        url: String,
        label: Option<String>,
    },
    UserMention {
        id: String,
        name: Option<String>,
    },
    ChannelMention {
        id: String,
        name: Option<String>,
    },
    UsergroupMention {
        id: String,
        name: Option<String>,
    },
    Broadcast(BroadcastRange),
    Date {
        timestamp: i64,
        format: Option<String>,
        fallback: Option<String>,
    },
    Emoji(String),
    QuoteMarker,
    ListMarker {
        ordered: bool,
        number: Option<u32>,
    },
    Newline,
    BlankLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InsideFence,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    state: State,
    fence_open_pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            text,
            pos: 0,
            state: State::Outside,
            fence_open_pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ConvertError> {
        while self.pos < self.text.len() {
            match self.state {
                State::Outside => self.outside_step()?,
                State::InsideFence => self.inside_step(),
            }
        }
        if self.state == State::InsideFence {
            return Err(ConvertError::parse("unterminated code fence")
                .with_element("```")
                .with_position(self.fence_open_pos));
        }
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.text.as_bytes()[self.pos - 1] == b'\n'
    }

    fn prev_char(&self) -> Option<char> {
        self.text[..self.pos].chars().next_back()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text[pos..].chars().next()
    }

    /// Append literal text, merging into a trailing text token.
    fn push_text(&mut self, s: &str) {
        if let Some(Token::Text(prev)) = self.tokens.last_mut() {
            prev.push_str(s);
        } else {
            self.tokens.push(Token::Text(s.to_string()));
        }
    }

    fn outside_step(&mut self) -> Result<(), ConvertError> {
        let rest = self.rest();

        if rest.starts_with("```") {
            self.tokens.push(Token::FenceOpen);
            self.fence_open_pos = self.pos;
            self.pos += 3;
            self.state = State::InsideFence;
            return Ok(());
        }

        if rest.starts_with('<') {
            return self.angle_step();
        }

        if rest.starts_with('`') {
            self.inline_code_step();
            return Ok(());
        }

        let at_line_start = self.at_line_start();

        if rest.starts_with('*') {
            // `* ` at column 0 is a bullet, not a bold delimiter.
            if at_line_start && rest[1..].starts_with(' ') {
                self.tokens.push(Token::ListMarker {
                    ordered: false,
                    number: None,
                });
                self.pos += 2;
            } else {
                self.style_marker_step('*', Token::BoldMarker);
            }
            return Ok(());
        }

        if rest.starts_with('_') {
            self.style_marker_step('_', Token::ItalicMarker);
            return Ok(());
        }

        if rest.starts_with('~') {
            self.style_marker_step('~', Token::StrikeMarker);
            return Ok(());
        }

        if at_line_start && rest.starts_with("&gt;") {
            self.tokens.push(Token::QuoteMarker);
            self.pos += 4;
            if self.rest().starts_with(' ') {
                self.pos += 1;
            }
            return Ok(());
        }

        if at_line_start && rest.starts_with("> ") {
            self.tokens.push(Token::QuoteMarker);
            self.pos += 2;
            return Ok(());
        }

        if at_line_start && rest.starts_with('•') && rest['•'.len_utf8()..].starts_with(' ') {
            self.tokens.push(Token::ListMarker {
                ordered: false,
                number: None,
            });
            self.pos += '•'.len_utf8() + 1;
            return Ok(());
        }

        if at_line_start && rest.starts_with(|c: char| c.is_ascii_digit()) {
            if self.ordered_marker_step(rest) {
                return Ok(());
            }
        }

        if rest.starts_with('\n') {
            let run = rest.bytes().take_while(|&b| b == b'\n').count();
            if run >= 2 {
                self.tokens.push(Token::BlankLine);
                self.pos += run;
            } else {
                self.tokens.push(Token::Newline);
                self.pos += 1;
            }
            return Ok(());
        }

        if rest.starts_with('\\') {
            match rest[1..].chars().next() {
                Some(c @ ('<' | '>' | '*' | '_' | '~' | '`')) => {
                    self.push_text(&c.to_string());
                    self.pos += 1 + c.len_utf8();
                }
                _ => {
                    self.push_text("\\");
                    self.pos += 1;
                }
            }
            return Ok(());
        }

        if rest.starts_with(':') {
            if let Some((name, consumed)) = scan_emoji(rest) {
                self.tokens.push(Token::Emoji(name));
                self.pos += consumed;
            } else {
                self.push_text(":");
                self.pos += 1;
            }
            return Ok(());
        }

        self.text_step();
        Ok(())
    }

    fn style_marker_step(&mut self, marker: char, token: Token) {
        let prev_alnum = self.prev_char().is_some_and(|c| c.is_alphanumeric());
        let next_alnum = self
            .char_at(self.pos + marker.len_utf8())
            .is_some_and(|c| c.is_alphanumeric());
        if prev_alnum && next_alnum {
            let mut buf = [0u8; 4];
            self.push_text(marker.encode_utf8(&mut buf));
        } else {
            self.tokens.push(token);
        }
        self.pos += marker.len_utf8();
    }

    fn inline_code_step(&mut self) {
        self.pos += 1;
        match self.rest().find('`') {
            Some(close) => {
                let content = self.text[self.pos..self.pos + close].to_string();
                self.tokens.push(Token::InlineCode(content));
                self.pos += close + 1;
            }
            None => self.push_text("`"),
        }
    }

    fn ordered_marker_step(&mut self, rest: &str) -> bool {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if !rest[digits..].starts_with(". ") {
            return false;
        }
        let Ok(number) = rest[..digits].parse::<u32>() else {
            return false;
        };
        self.tokens.push(Token::ListMarker {
            ordered: true,
            number: Some(number),
        });
        self.pos += digits + 2;
        true
    }

    /// Classify the content between `<` and the next `>`.
    fn angle_step(&mut self) -> Result<(), ConvertError> {
        let start = self.pos;
        let after = &self.text[self.pos + 1..];
        let Some(close) = after.find('>') else {
            // No closing bracket anywhere: the `<` is literal.
            self.push_text("<");
            self.pos += 1;
            return Ok(());
        };
        let content = &after[..close];
        let end = self.pos + 1 + close + 1;

        if let Some(body) = content.strip_prefix('@') {
            let (id, name) = split_pipe(body);
            self.tokens.push(Token::UserMention { id, name });
        } else if let Some(body) = content.strip_prefix('#') {
            let (id, name) = split_pipe(body);
            self.tokens.push(Token::ChannelMention { id, name });
        } else if let Some(body) = content.strip_prefix('!') {
            let token = self.meta_marker(body, start)?;
            self.tokens.push(token);
        } else if has_url_scheme(content) {
            let (url, label) = split_pipe(content);
            self.tokens.push(Token::Link { url, label });
        } else {
            // Not platform syntax; keep the brackets.
            let literal = self.text[start..end].to_string();
            self.push_text(&literal);
        }
        self.pos = end;
        Ok(())
    }

    /// Classify `<!…>` content: usergroup, date, or broadcast.
    fn meta_marker(&self, body: &str, position: usize) -> Result<Token, ConvertError> {
        if let Some(rest) = body.strip_prefix("subteam^") {
            let (id, name) = split_pipe(rest);
            return Ok(Token::UsergroupMention { id, name });
        }

        if let Some(rest) = body.strip_prefix("date^") {
            return parse_date_marker(rest, position);
        }

        let (keyword, _label) = split_pipe(body);
        match BroadcastRange::parse(&keyword) {
            Some(range) => Ok(Token::Broadcast(range)),
            None => Err(
                ConvertError::parse(format!("unrecognized broadcast range: {keyword:?}"))
                    .with_element("<!…>")
                    .with_position(position),
            ),
        }
    }

    fn text_step(&mut self) {
        let start = self.pos;
        while self.pos < self.text.len() {
            let rest = self.rest();
            if rest.starts_with(['*', '_', '~', '`', '<', '\n', '\\', ':']) {
                break;
            }
            self.pos += rest.chars().next().map_or(1, char::len_utf8);
        }
        if self.pos > start {
            let segment = self.text[start..self.pos].to_string();
            self.push_text(&segment);
        }
    }

    fn inside_step(&mut self) {
        let rest = self.rest();

        if rest.starts_with("```") {
            self.tokens.push(Token::FenceClose);
            self.pos += 3;
            self.state = State::Outside;
            return;
        }

        if rest.starts_with('<') {
            let after = &rest[1..];
            if let Some(close) = after.find('>') {
                if has_url_scheme(&after[..close]) {
                    let url = after[..close].to_string();
                    self.push_text(&url);
                    self.pos += close + 2;
                    return;
                }
            }
            self.push_text("<");
            self.pos += 1;
            return;
        }

        let start = self.pos;
        while self.pos < self.text.len() {
            let rest = self.rest();
            if rest.starts_with("```") || rest.starts_with('<') {
                break;
            }
            self.pos += rest.chars().next().map_or(1, char::len_utf8);
        }
        if self.pos > start {
            let segment = self.text[start..self.pos].to_string();
            self.push_text(&segment);
        }
    }
}

/// Split `body|label` into its two halves.
fn split_pipe(body: &str) -> (String, Option<String>) {
    match body.split_once('|') {
        Some((head, tail)) => (head.to_string(), Some(tail.to_string())),
        None => (body.to_string(), None),
    }
}

/// Parse the tail of `<!date^EPOCH^FORMAT|FALLBACK>`.
fn parse_date_marker(rest: &str, position: usize) -> Result<Token, ConvertError> {
    let (ts_str, tail) = match rest.split_once('^') {
        Some((ts, tail)) => (ts, Some(tail)),
        None => {
            let (ts, fallback) = split_pipe(rest);
            return build_date(&ts, None, fallback, position);
        }
    };
    let (format, fallback) = match tail {
        Some(tail) => {
            let (format, fallback) = split_pipe(tail);
            (Some(format), fallback)
        }
        None => (None, None),
    };
    build_date(ts_str, format, fallback, position)
}

fn build_date(
    ts: &str,
    format: Option<String>,
    fallback: Option<String>,
    position: usize,
) -> Result<Token, ConvertError> {
    let timestamp = ts.parse::<i64>().map_err(|_| {
        ConvertError::parse(format!("invalid date timestamp: {ts:?}"))
            .with_element("<!date^…>")
            .with_position(position)
    })?;
    Ok(Token::Date {
        timestamp,
        format: format.filter(|f| !f.is_empty()),
        fallback: fallback.filter(|f| !f.is_empty()),
    })
}

/// Scan `:name:` at the start of `rest` (which begins with a colon).
fn scan_emoji(rest: &str) -> Option<(String, usize)> {
    let body = &rest[1..];
    let end = body.find(|c: char| {
        !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' || c == '+')
    })?;
    if end == 0 || body.as_bytes()[end] != b':' {
        return None;
    }
    Some((body[..end].to_string(), end + 2))
}
