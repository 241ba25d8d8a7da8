//! Error types.
//!
//! Split the way the teacher splits them (`actson::parser::ParserError` vs.
//! its per-accessor `InvalidStringValueError`/`InvalidIntValueError`/
//! `InvalidFloatValueError`): one enum for terminal, parse-time failures,
//! and a second for the small set of accessor-time failures that don't
//! invalidate the parser.

use std::str::Utf8Error;

use thiserror::Error;

/// A terminal error encountered while parsing. No further calls to
/// [`crate::parser::VktorParser::parse`] should be made once this is
/// returned — see spec.md §4.7.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VktorError {
    /// The input contained a byte that is not legal at the current parse
    /// position: a structural character out of turn, an unescaped control
    /// character inside a string, a malformed number, or a value that
    /// doesn't match the keyword it started.
    #[error("unexpected input: '{ch}' (0x{hex:02x})", ch = *.0 as char, hex = .0)]
    UnexpectedInput(u8),

    /// Pushing a container would exceed the parser's configured maximum
    /// nesting depth.
    #[error("maximal nesting level reached")]
    MaxNestReached,

    /// The parser reached a state that should be unreachable under normal
    /// operation (e.g. popping an empty nesting stack).
    #[error("internal parser error: {0}")]
    Internal(&'static str),
}

/// An error returned by a value accessor (`value_long`, `value_double`,
/// `value_str_borrow`, `value_str_copy`). Unlike [`VktorError`], this does
/// not affect the parser's ability to continue.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// There is no current token, or the current token has no associated
    /// value (e.g. calling `value_long` right after `ArrayStart`).
    #[error("no value associated with the current token")]
    NoValue,

    /// The token's textual value does not fit in the requested numeric type.
    #[error("value is out of range for the requested numeric type")]
    OutOfRange,

    /// The token's bytes are not valid UTF-8. spec.md §1 deliberately
    /// excludes UTF-8 validation of non-escaped string bytes from the
    /// scanner's job (it only rejects unescaped control characters below
    /// 0x20), so a `String`/`ObjectKey` token may legitimately contain
    /// bytes that don't decode — this surfaces that case to the caller
    /// instead of the string accessors, mirroring how the teacher's own
    /// `InvalidStringValueError` wraps a `Utf8Error` (`actson::parser`).
    #[error("token value is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}
