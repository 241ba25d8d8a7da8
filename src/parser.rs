//! The resumable scanner — the central driver of the crate.
//!
//! [`VktorParser`] is the Rust analogue of `vktor_parser` in
//! `original_source/libvktor/vktor.c`, restructured the way `actson`'s
//! [`crate`]-level teacher structures its own `JsonParser`: a single struct
//! owning all parse state, one public entry point that resumes directly into
//! whatever sub-scanner was suspended, and a set of small, cheap accessor
//! methods for reading the current token instead of building a tree.
//!
//! Where the original C driver folds "what production am I reading" and
//! "what's legal next" into one `expected` bitmask and a giant `switch`, this
//! version keeps two things separate: [`ExpectedSet`] still tracks legal next
//! productions (consulted before every structural dispatch, exactly as
//! `vktor.c` does), while *how far into the current token* the scanner has
//! gotten is its own small `ScanState`, so resuming mid-token never needs to
//! smuggle extra meaning through the expected-set bits the way the original's
//! `VKTOR_C_UNIC1..4`/`VKTOR_C_ESCAPED` values did.

use std::str::FromStr;

use crate::chunk::ChunkQueue;
use crate::container::{ContainerKind, NestingStack};
use crate::error::{VktorError, ValueError};
use crate::expected::ExpectedSet;
use crate::token::TokenKind;
use crate::unicode::{bmp_to_utf8, hex_nibble, surrogate_pair_to_utf8};

/// The default maximum nesting depth, matching `vktor_parser_init`'s typical
/// caller-supplied value in the original C library's own test suite.
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// The result of a single call to [`VktorParser::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A token was produced; inspect it via the accessor methods.
    Token,
    /// Input was exhausted mid-parse. Call [`VktorParser::feed`] with more
    /// bytes, then call [`VktorParser::parse`] again.
    NeedMore,
    /// The top-level value has been fully closed and no bytes remain
    /// buffered. Once returned, further calls to `parse` keep returning
    /// `Complete` without doing any further work.
    Complete,
}

#[derive(Debug, Clone, Copy)]
struct StringState {
    is_key: bool,
    mode: StringMode,
}

#[derive(Debug, Clone, Copy)]
enum StringMode {
    Normal,
    Escaped,
    /// Accumulating the four hex nibbles of a `\uXXXX` escape. `nibble`
    /// counts how many have been read so far (0..4); `acc` holds the 16-bit
    /// value assembled so far.
    Unicode { nibble: u8, acc: u16 },
    /// A high surrogate was just decoded; the next two bytes must be `\`
    /// then `u` before the low surrogate's own four nibbles.
    AwaitLowBackslash,
    AwaitLowU,
    UnicodeLow { nibble: u8, acc: u16 },
}

#[derive(Debug, Clone, Copy)]
struct NumberState {
    /// Which of `Dot`/`Exp`/`Signum` are still legal from here on,
    /// mirroring `vktor.c`'s locally-scoped reuse of the expected-token
    /// bitmask inside `parser_read_number_token`.
    local: ExpectedSet,
}

#[derive(Debug, Clone, Copy)]
struct KeywordState {
    literal: &'static [u8],
    kind: TokenKind,
    matched: usize,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    TopLevel,
    InString(StringState),
    InNumber(NumberState),
    InKeyword(KeywordState),
    Complete,
}

/// An incremental, pull-style JSON tokenizer.
///
/// `VktorParser` never requires the whole document to be in memory: feed it
/// byte chunks with [`feed`](Self::feed) as they arrive, and call
/// [`parse`](Self::parse) to advance to the next token, a request for more
/// input, or the end of the document.
///
/// ```
/// use vktor::{Status, TokenKind, VktorParser};
///
/// let mut parser = VktorParser::new(32);
/// parser.feed(br#"{"a":1}"#.to_vec());
///
/// assert_eq!(parser.parse().unwrap(), Status::Token);
/// assert_eq!(parser.token_kind(), Some(TokenKind::ObjectStart));
///
/// assert_eq!(parser.parse().unwrap(), Status::Token);
/// assert_eq!(parser.token_kind(), Some(TokenKind::ObjectKey));
/// assert_eq!(parser.value_str_borrow().unwrap(), "a");
///
/// assert_eq!(parser.parse().unwrap(), Status::Token);
/// assert_eq!(parser.value_long().unwrap(), 1);
///
/// assert_eq!(parser.parse().unwrap(), Status::Token);
/// assert_eq!(parser.token_kind(), Some(TokenKind::ObjectEnd));
///
/// assert_eq!(parser.parse().unwrap(), Status::Complete);
/// ```
pub struct VktorParser {
    chunks: ChunkQueue,
    stack: NestingStack,
    expected: ExpectedSet,
    state: ScanState,

    token_kind: Option<TokenKind>,
    token_buf: Vec<u8>,
    /// The high surrogate half of a surrogate pair currently being decoded.
    pending_high_surrogate: u16,

    /// Set once `parse` returns an `Err`; further calls re-return the same
    /// error without touching the chunk queue (spec.md §4.7: "further calls
    /// are undefined" is narrowed here to "repeat the terminal error").
    poisoned: Option<VktorError>,
}

impl VktorParser {
    /// Create a new parser with the given maximum nesting depth.
    pub fn new(max_depth: usize) -> Self {
        VktorParser {
            chunks: ChunkQueue::new(),
            stack: NestingStack::new(max_depth),
            expected: ExpectedSet::VALUE_TOKENS,
            state: ScanState::TopLevel,
            token_kind: None,
            token_buf: Vec::new(),
            pending_high_surrogate: 0,
            poisoned: None,
        }
    }

    /// Feed the parser with more JSON bytes to be parsed on subsequent calls
    /// to [`parse`](Self::parse). A zero-length chunk has no effect.
    pub fn feed(&mut self, bytes: Vec<u8>) {
        self.chunks.push(bytes);
    }

    /// Parse buffered input until the next JSON token is encountered.
    pub fn parse(&mut self) -> Result<Status, VktorError> {
        if let Some(err) = self.poisoned {
            return Err(err);
        }
        if matches!(self.state, ScanState::Complete) {
            return Ok(Status::Complete);
        }

        let result = match self.state {
            ScanState::TopLevel => self.scan_top_level(),
            ScanState::InString(_) => self.scan_string_body(),
            ScanState::InNumber(_) => self.scan_number(),
            ScanState::InKeyword(_) => self.scan_keyword(),
            ScanState::Complete => unreachable!("handled above"),
        };

        if let Err(err) = result {
            self.poisoned = Some(err);
        }
        result
    }

    /// The type of the token the parser is currently positioned on, or
    /// `None` before the first token and after structural tokens that carry
    /// no value.
    pub fn token_kind(&self) -> Option<TokenKind> {
        self.token_kind
    }

    /// The current array/object nesting depth. 0 means top level.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The kind of container enclosing the current token, or `None` at the
    /// top level.
    pub fn current_container(&self) -> Option<ContainerKind> {
        self.stack.current()
    }

    /// The value of the current token as a signed 64-bit integer.
    ///
    /// As in the original library, this reads the longest leading
    /// `(sign)? digit*` prefix of the token's text — suitable for `Int`
    /// tokens, but it will also happily read the integer part of a `Float`
    /// token's text.
    pub fn value_long(&self) -> Result<i64, ValueError> {
        let text = self.value_bytes()?;
        let prefix_len = numeric_prefix_len(text);
        btoi::btoi(&text[..prefix_len]).map_err(|_| ValueError::OutOfRange)
    }

    /// The value of the current token as a double-precision float.
    ///
    /// `f64::from_str` saturates rather than erroring on overflow (e.g.
    /// `"1e400"` parses to `f64::INFINITY`), so overflow is detected
    /// explicitly afterwards — JSON numbers never spell out `inf`/`nan`
    /// themselves, so an infinite result can only mean the token's
    /// magnitude didn't fit.
    pub fn value_double(&self) -> Result<f64, ValueError> {
        let text = self.value_str_borrow()?;
        let value = f64::from_str(text).map_err(|_| ValueError::OutOfRange)?;
        if value.is_infinite() {
            return Err(ValueError::OutOfRange);
        }
        Ok(value)
    }

    /// Borrow the current token's value as a string slice. The borrow is
    /// invalidated by the next call to [`parse`](Self::parse).
    ///
    /// Per spec.md §1, the scanner never validates UTF-8 on non-escaped
    /// string bytes — it passes any byte `>= 0x20` through unchanged — so a
    /// `String`/`ObjectKey` token may legitimately hold invalid UTF-8; this
    /// is reported as [`ValueError::InvalidUtf8`] rather than assumed away.
    pub fn value_str_borrow(&self) -> Result<&str, ValueError> {
        let bytes = self.value_bytes()?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Copy the current token's value into a freshly allocated `String`.
    pub fn value_str_copy(&self) -> Result<String, ValueError> {
        self.value_str_borrow().map(|s| s.to_owned())
    }

    fn value_bytes(&self) -> Result<&[u8], ValueError> {
        if self.has_value() {
            Ok(&self.token_buf)
        } else {
            Err(ValueError::NoValue)
        }
    }

    fn has_value(&self) -> bool {
        matches!(
            self.token_kind,
            Some(TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::ObjectKey)
        )
    }

    /// The expected set after any value (token or closed container)
    /// completes, based on the container now enclosing it. Shared by the
    /// container-close, comma, and every value-producing sub-scanner, just
    /// as `vktor.c`'s `expect_next_value_token` macro is.
    fn expected_after_value(&self) -> ExpectedSet {
        match self.stack.current() {
            Some(ContainerKind::Object) => ExpectedSet::COMMA | ExpectedSet::OBJECT_END,
            Some(ContainerKind::Array) => ExpectedSet::COMMA | ExpectedSet::ARRAY_END,
            None => ExpectedSet::NONE,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.chunks.peek() {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' | 0x0C | 0x0B => {
                    self.chunks.consume();
                }
                _ => break,
            }
        }
    }

    /// The top-level driver: skips whitespace, then dispatches on the next
    /// byte. Structural bytes that don't themselves produce a token (`,` and
    /// `:`) are consumed in a loop within this same call, exactly as in
    /// `vktor_parse`'s original inner `while` loop.
    fn scan_top_level(&mut self) -> Result<Status, VktorError> {
        loop {
            self.skip_whitespace();

            let Some(b) = self.chunks.peek() else {
                if self.expected.is_empty() && self.stack.depth() == 0 {
                    self.state = ScanState::Complete;
                    return Ok(Status::Complete);
                }
                return Ok(Status::NeedMore);
            };

            match b {
                b'{' => return self.begin_container(b, ContainerKind::Object),
                b'[' => return self.begin_container(b, ContainerKind::Array),
                b'}' => return self.end_container(b, ContainerKind::Object),
                b']' => return self.end_container(b, ContainerKind::Array),
                b'"' => return self.begin_string(b),
                b',' => self.handle_comma(b)?,
                b':' => self.handle_colon(b)?,
                b't' => return self.begin_keyword(b, ExpectedSet::TRUE, b"true", TokenKind::True),
                b'f' => {
                    return self.begin_keyword(b, ExpectedSet::FALSE, b"false", TokenKind::False)
                }
                b'n' => return self.begin_keyword(b, ExpectedSet::NULL, b"null", TokenKind::Null),
                b'0'..=b'9' | b'+' | b'-' => return self.begin_number(b),
                other => return Err(VktorError::UnexpectedInput(other)),
            }
        }
    }

    fn begin_container(&mut self, b: u8, kind: ContainerKind) -> Result<Status, VktorError> {
        let start_bit = match kind {
            ContainerKind::Object => ExpectedSet::OBJECT_START,
            ContainerKind::Array => ExpectedSet::ARRAY_START,
        };
        if !self.expected.contains(start_bit) {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.chunks.consume();
        if !self.stack.push(kind) {
            return Err(VktorError::MaxNestReached);
        }
        self.token_kind = Some(match kind {
            ContainerKind::Object => TokenKind::ObjectStart,
            ContainerKind::Array => TokenKind::ArrayStart,
        });
        self.token_buf.clear();
        self.expected = match kind {
            ContainerKind::Object => ExpectedSet::OBJECT_KEY | ExpectedSet::OBJECT_END,
            ContainerKind::Array => ExpectedSet::VALUE_TOKENS | ExpectedSet::ARRAY_END,
        };
        Ok(Status::Token)
    }

    fn end_container(&mut self, b: u8, kind: ContainerKind) -> Result<Status, VktorError> {
        let end_bit = match kind {
            ContainerKind::Object => ExpectedSet::OBJECT_END,
            ContainerKind::Array => ExpectedSet::ARRAY_END,
        };
        if !self.expected.contains(end_bit) || self.stack.current() != Some(kind) {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.chunks.consume();
        if !self.stack.pop(kind) {
            return Err(VktorError::Internal("nesting stack underflow"));
        }
        self.token_kind = Some(match kind {
            ContainerKind::Object => TokenKind::ObjectEnd,
            ContainerKind::Array => TokenKind::ArrayEnd,
        });
        self.token_buf.clear();
        self.expected = self.expected_after_value();
        Ok(Status::Token)
    }

    fn handle_comma(&mut self, b: u8) -> Result<(), VktorError> {
        if !self.expected.contains(ExpectedSet::COMMA) {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.chunks.consume();
        self.expected = match self.stack.current() {
            Some(ContainerKind::Object) => ExpectedSet::OBJECT_KEY,
            Some(ContainerKind::Array) => ExpectedSet::VALUE_TOKENS,
            None => return Err(VktorError::Internal("comma outside any container")),
        };
        Ok(())
    }

    fn handle_colon(&mut self, b: u8) -> Result<(), VktorError> {
        if !self.expected.contains(ExpectedSet::COLON) {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.chunks.consume();
        self.expected = ExpectedSet::VALUE_TOKENS;
        Ok(())
    }

    fn begin_string(&mut self, b: u8) -> Result<Status, VktorError> {
        let is_key = self.expected.contains(ExpectedSet::OBJECT_KEY);
        if !is_key && !self.expected.contains(ExpectedSet::STRING) {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.chunks.consume();
        self.token_kind = Some(if is_key {
            TokenKind::ObjectKey
        } else {
            TokenKind::String
        });
        self.token_buf.clear();
        self.state = ScanState::InString(StringState {
            is_key,
            mode: StringMode::Normal,
        });
        self.scan_string_body()
    }

    fn begin_keyword(
        &mut self,
        b: u8,
        required: ExpectedSet,
        literal: &'static [u8],
        kind: TokenKind,
    ) -> Result<Status, VktorError> {
        if !self.expected.contains(required) {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.token_buf.clear();
        self.state = ScanState::InKeyword(KeywordState {
            literal,
            kind,
            matched: 0,
        });
        self.scan_keyword()
    }

    fn begin_number(&mut self, b: u8) -> Result<Status, VktorError> {
        if !self.expected.contains(ExpectedSet::INT) && !self.expected.contains(ExpectedSet::FLOAT)
        {
            return Err(VktorError::UnexpectedInput(b));
        }
        self.token_kind = Some(TokenKind::Int);
        self.token_buf.clear();
        self.state = ScanState::InNumber(NumberState {
            local: ExpectedSet::DOT | ExpectedSet::EXP | ExpectedSet::SIGNUM,
        });
        self.scan_number()
    }

    fn scan_keyword(&mut self) -> Result<Status, VktorError> {
        loop {
            let ScanState::InKeyword(mut s) = self.state else {
                unreachable!("scan_keyword called outside InKeyword state")
            };

            let Some(b) = self.chunks.consume() else {
                self.state = ScanState::InKeyword(s);
                return Ok(Status::NeedMore);
            };

            if s.literal[s.matched] != b {
                return Err(VktorError::UnexpectedInput(b));
            }
            s.matched += 1;

            if s.matched == s.literal.len() {
                self.token_kind = Some(s.kind);
                self.state = ScanState::TopLevel;
                self.expected = self.expected_after_value();
                return Ok(Status::Token);
            }

            self.state = ScanState::InKeyword(s);
        }
    }

    fn scan_number(&mut self) -> Result<Status, VktorError> {
        loop {
            let ScanState::InNumber(mut s) = self.state else {
                unreachable!("scan_number called outside InNumber state")
            };

            let Some(b) = self.chunks.peek() else {
                self.state = ScanState::InNumber(s);
                return Ok(Status::NeedMore);
            };

            match b {
                b'0'..=b'9' => {
                    self.chunks.consume();
                    self.token_buf.push(b);
                    s.local = s.local.remove(ExpectedSet::SIGNUM);
                }
                b'.' => {
                    if !s.local.contains(ExpectedSet::DOT) || self.token_buf.is_empty() {
                        return Err(VktorError::UnexpectedInput(b));
                    }
                    self.chunks.consume();
                    self.token_buf.push(b);
                    s.local = s.local.remove(ExpectedSet::DOT);
                    self.token_kind = Some(TokenKind::Float);
                }
                b'+' | b'-' => {
                    if !s.local.contains(ExpectedSet::SIGNUM) {
                        return Err(VktorError::UnexpectedInput(b));
                    }
                    self.chunks.consume();
                    self.token_buf.push(b);
                    s.local = s.local.remove(ExpectedSet::SIGNUM);
                }
                b'e' | b'E' => {
                    if !s.local.contains(ExpectedSet::EXP) || self.token_buf.is_empty() {
                        return Err(VktorError::UnexpectedInput(b));
                    }
                    if matches!(self.token_buf.last(), Some(b'.' | b'+' | b'-')) {
                        return Err(VktorError::UnexpectedInput(b));
                    }
                    self.chunks.consume();
                    self.token_buf.push(b);
                    s.local = (s.local.remove(ExpectedSet::EXP).remove(ExpectedSet::DOT))
                        | ExpectedSet::SIGNUM;
                    self.token_kind = Some(TokenKind::Float);
                }
                _ => {
                    if matches!(self.token_buf.last(), Some(b'.' | b'+' | b'-' | b'e' | b'E')) {
                        return Err(VktorError::UnexpectedInput(b));
                    }
                    self.state = ScanState::TopLevel;
                    self.expected = self.expected_after_value();
                    return Ok(Status::Token);
                }
            }

            self.state = ScanState::InNumber(s);
        }
    }

    fn scan_string_body(&mut self) -> Result<Status, VktorError> {
        loop {
            let Some(b) = self.chunks.consume() else {
                return Ok(Status::NeedMore);
            };

            let ScanState::InString(mut s) = self.state else {
                unreachable!("scan_string_body called outside InString state")
            };

            if let Some(status) = self.step_string_byte(&mut s, b)? {
                return Ok(status);
            }

            self.state = ScanState::InString(s);
        }
    }

    /// Process one byte of a string/object-key token. Returns `Some(status)`
    /// when the token completes, `None` to keep reading.
    fn step_string_byte(
        &mut self,
        s: &mut StringState,
        b: u8,
    ) -> Result<Option<Status>, VktorError> {
        match s.mode {
            StringMode::Normal => match b {
                b'"' => {
                    self.state = ScanState::TopLevel;
                    self.expected = if s.is_key {
                        ExpectedSet::COLON
                    } else {
                        self.expected_after_value()
                    };
                    return Ok(Some(Status::Token));
                }
                b'\\' => s.mode = StringMode::Escaped,
                0x00..=0x1F => return Err(VktorError::UnexpectedInput(b)),
                _ => self.token_buf.push(b),
            },
            StringMode::Escaped => match b {
                b'"' => {
                    self.token_buf.push(b'"');
                    s.mode = StringMode::Normal;
                }
                b'\\' => {
                    self.token_buf.push(b'\\');
                    s.mode = StringMode::Normal;
                }
                b'/' => {
                    self.token_buf.push(b'/');
                    s.mode = StringMode::Normal;
                }
                b'b' => {
                    self.token_buf.push(0x08);
                    s.mode = StringMode::Normal;
                }
                b'f' => {
                    self.token_buf.push(0x0C);
                    s.mode = StringMode::Normal;
                }
                b'n' => {
                    self.token_buf.push(0x0A);
                    s.mode = StringMode::Normal;
                }
                b'r' => {
                    self.token_buf.push(0x0D);
                    s.mode = StringMode::Normal;
                }
                b't' => {
                    self.token_buf.push(0x09);
                    s.mode = StringMode::Normal;
                }
                b'u' => s.mode = StringMode::Unicode { nibble: 0, acc: 0 },
                _ => return Err(VktorError::UnexpectedInput(b)),
            },
            StringMode::Unicode { nibble, acc } => {
                let acc = self.accumulate_nibble(acc, nibble, b)?;
                if nibble + 1 < 4 {
                    s.mode = StringMode::Unicode {
                        nibble: nibble + 1,
                        acc,
                    };
                    return Ok(None);
                }
                if (0xD800..=0xDBFF).contains(&acc) {
                    self.pending_high_surrogate = acc;
                    s.mode = StringMode::AwaitLowBackslash;
                } else if (0xDC00..=0xDFFF).contains(&acc) {
                    // an unpaired low surrogate
                    return Err(VktorError::UnexpectedInput(b));
                } else {
                    let (buf, len) =
                        bmp_to_utf8(acc).ok_or(VktorError::UnexpectedInput(b))?;
                    self.token_buf.extend_from_slice(&buf[..len]);
                    s.mode = StringMode::Normal;
                }
            }
            StringMode::AwaitLowBackslash => {
                if b != b'\\' {
                    return Err(VktorError::UnexpectedInput(b));
                }
                s.mode = StringMode::AwaitLowU;
            }
            StringMode::AwaitLowU => {
                if b != b'u' {
                    return Err(VktorError::UnexpectedInput(b));
                }
                s.mode = StringMode::UnicodeLow { nibble: 0, acc: 0 };
            }
            StringMode::UnicodeLow { nibble, acc } => {
                let acc = self.accumulate_nibble(acc, nibble, b)?;
                if nibble + 1 < 4 {
                    s.mode = StringMode::UnicodeLow {
                        nibble: nibble + 1,
                        acc,
                    };
                    return Ok(None);
                }
                let utf8 = surrogate_pair_to_utf8(self.pending_high_surrogate, acc)
                    .ok_or(VktorError::UnexpectedInput(b))?;
                self.token_buf.extend_from_slice(&utf8);
                self.pending_high_surrogate = 0;
                s.mode = StringMode::Normal;
            }
        }

        Ok(None)
    }

    fn accumulate_nibble(&self, acc: u16, _nibble: u8, b: u8) -> Result<u16, VktorError> {
        if !b.is_ascii_hexdigit() {
            return Err(VktorError::UnexpectedInput(b));
        }
        Ok((acc << 4) | hex_nibble(b) as u16)
    }
}

/// The length of the longest `(sign)? digit*` prefix of `buf`, mirroring
/// `strtol`'s lenient prefix parsing in `vktor_get_value_long`.
fn numeric_prefix_len(buf: &[u8]) -> usize {
    let mut i = 0;
    if i < buf.len() && matches!(buf[i], b'+' | b'-') {
        i += 1;
    }
    while i < buf.len() && buf[i].is_ascii_digit() {
        i += 1;
    }
    i
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_all(parser: &mut VktorParser) -> Vec<(Status, Option<TokenKind>)> {
        let mut out = Vec::new();
        loop {
            let status = parser.parse().unwrap();
            out.push((status, parser.token_kind()));
            if status == Status::Complete {
                break;
            }
        }
        out
    }

    #[test]
    fn true_split_across_feeds() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"t".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::NeedMore);
        parser.feed(b"rue".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::True));
        assert_eq!(parser.parse().unwrap(), Status::Complete);
    }

    #[test]
    fn nested_object_and_array() {
        let mut parser = VktorParser::new(8);
        parser.feed(br#"{"a":1,"b":[false,null]}"#.to_vec());

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::ObjectStart));

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::ObjectKey));
        assert_eq!(parser.value_str_borrow().unwrap(), "a");

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::Int));
        assert_eq!(parser.value_long().unwrap(), 1);
        assert_eq!(parser.depth(), 1);
        assert_eq!(parser.current_container(), Some(ContainerKind::Object));

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::ObjectKey));
        assert_eq!(parser.value_str_borrow().unwrap(), "b");

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::ArrayStart));

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::False));

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::Null));

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::ArrayEnd));

        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::ObjectEnd));

        assert_eq!(parser.parse().unwrap(), Status::Complete);
    }

    #[test]
    fn escaped_bmp_codepoint() {
        // \u00e9 is the JSON escape for U+00E9 (e acute); decoded
        // UTF-8 is the two bytes 0xC3 0xA9.
        let mut parser = VktorParser::new(8);
        parser.feed(br#""\u00e9""#.to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.value_str_borrow().unwrap().as_bytes(), [0xC3, 0xA9]);
    }

    #[test]
    fn escaped_surrogate_pair() {
        // \uD834\uDD1E is the surrogate pair for U+1D11E (MUSICAL
        // SYMBOL G CLEF); decoded UTF-8 is the four bytes
        // 0xF0 0x9D 0x84 0x9E.
        let mut parser = VktorParser::new(8);
        parser.feed(br#""\uD834\uDD1E""#.to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(
            parser.value_str_borrow().unwrap().as_bytes(),
            [0xF0, 0x9D, 0x84, 0x9E]
        );
    }

    #[test]
    fn high_surrogate_not_followed_by_low_surrogate_is_rejected() {
        // A high surrogate must be followed by `\u` before its low half;
        // a plain character breaks that required prefix.
        let mut parser = VktorParser::new(8);
        parser.feed(br#""\uD834A""#.to_vec());
        assert!(matches!(
            parser.parse(),
            Err(VktorError::UnexpectedInput(_))
        ));

        // The `\u` prefix is present but U+0041 is not itself a low
        // surrogate, so the pair is invalid.
        let mut parser = VktorParser::new(8);
        parser.feed(br#""\uD834\u0041""#.to_vec());
        assert!(matches!(
            parser.parse(),
            Err(VktorError::UnexpectedInput(_))
        ));
    }

    #[test]
    fn raw_non_utf8_byte_in_string_is_passed_through_but_reported_as_invalid_utf8() {
        // spec.md §1's non-goal: the scanner only rejects unescaped control
        // characters below 0x20, so a lone 0xFF byte (>= 0x20, not '"'/'\')
        // is accepted as part of a String token's raw bytes.
        let mut parser = VktorParser::new(8);
        parser.feed(vec![b'"', 0xFF, b'"']);
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::String));
        assert!(matches!(
            parser.value_str_borrow(),
            Err(ValueError::InvalidUtf8(_))
        ));
        assert!(matches!(
            parser.value_str_copy(),
            Err(ValueError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn float_with_negative_exponent() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"123.45e-2".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::Float));
        assert!((parser.value_double().unwrap() - 1.2345).abs() < 1e-12);
        assert_eq!(parser.value_str_borrow().unwrap(), "123.45e-2");
    }

    #[test]
    fn array_fed_across_two_chunks() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"[1, 2,".to_vec());

        let events = parse_all_until_need_more(&mut parser);
        assert_eq!(
            events,
            vec![TokenKind::ArrayStart, TokenKind::Int, TokenKind::Int]
        );

        parser.feed(b"3]".to_vec());
        let rest = parse_all(&mut parser);
        assert_eq!(
            rest,
            vec![
                (Status::Token, Some(TokenKind::Int)),
                (Status::Token, Some(TokenKind::ArrayEnd)),
                (Status::Complete, Some(TokenKind::ArrayEnd)),
            ]
        );
    }

    fn parse_all_until_need_more(parser: &mut VktorParser) -> Vec<TokenKind> {
        let mut out = Vec::new();
        loop {
            match parser.parse().unwrap() {
                Status::Token => out.push(parser.token_kind().unwrap()),
                Status::NeedMore => break,
                Status::Complete => break,
            }
        }
        out
    }

    #[test]
    fn max_nest_is_enforced() {
        let mut parser = VktorParser::new(3);
        parser.feed(b"[[[[]]]]".to_vec());
        for _ in 0..3 {
            assert_eq!(parser.parse().unwrap(), Status::Token);
            assert_eq!(parser.token_kind(), Some(TokenKind::ArrayStart));
        }
        assert_eq!(parser.parse(), Err(VktorError::MaxNestReached));
    }

    #[test]
    fn unescaped_control_character_is_rejected() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"\"ab\x01cd\"".to_vec());
        assert_eq!(parser.parse(), Err(VktorError::UnexpectedInput(0x01)));
    }

    #[test]
    fn error_is_terminal_and_repeats() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"]".to_vec());
        let err = parser.parse().unwrap_err();
        assert_eq!(parser.parse().unwrap_err(), err);
    }

    #[test]
    fn complete_is_idempotent() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"true".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.parse().unwrap(), Status::Complete);
        assert_eq!(parser.parse().unwrap(), Status::Complete);
    }

    #[test]
    fn trailing_garbage_after_value_is_rejected() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"true}".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.parse(), Err(VktorError::UnexpectedInput(b'}')));
    }

    #[test]
    fn zero_length_feed_has_no_effect() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"tr".to_vec());
        parser.feed(Vec::new());
        parser.feed(b"ue".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.token_kind(), Some(TokenKind::True));
    }

    #[test]
    fn depth_and_container_reported_at_terminal_state() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"[1,2,3]".to_vec());
        loop {
            if parser.parse().unwrap() == Status::Complete {
                break;
            }
        }
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.current_container(), None);
    }

    #[test]
    fn value_long_on_non_numeric_token_is_no_value() {
        let mut parser = VktorParser::new(8);
        parser.feed(b"true".to_vec());
        parser.parse().unwrap();
        assert_eq!(parser.value_long(), Err(ValueError::NoValue));
    }

    #[test]
    fn integers_at_i64_boundary() {
        let mut parser = VktorParser::new(8);
        parser.feed(i64::MAX.to_string().into_bytes());
        parser.feed(b" ".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.value_long().unwrap(), i64::MAX);
    }

    #[test]
    fn integer_just_beyond_i64_is_out_of_range() {
        let mut parser = VktorParser::new(8);
        let text = "9223372036854775808"; // i64::MAX + 1
        parser.feed(text.as_bytes().to_vec());
        parser.feed(b" ".to_vec());
        assert_eq!(parser.parse().unwrap(), Status::Token);
        assert_eq!(parser.value_long(), Err(ValueError::OutOfRange));
    }
}
