//! # vktor
//!
//! An incremental, pull-style JSON tokenizer.
//!
//! `vktor` never blocks on I/O and never requires the whole document to be
//! resident in memory at once: feed it byte chunks as they arrive with
//! [`VktorParser::feed`], then call [`VktorParser::parse`] to pull the next
//! token. When input runs out mid-document, `parse` returns
//! [`Status::NeedMore`] instead of blocking — feed more bytes and call it
//! again.
//!
//! ## Example
//!
//! ```
//! use vktor::{Status, TokenKind, VktorParser};
//!
//! let mut parser = VktorParser::new(vktor::DEFAULT_MAX_DEPTH);
//! parser.feed(br#"{"name": "Elvis"}"#.to_vec());
//!
//! loop {
//!     match parser.parse().unwrap() {
//!         Status::Token => {
//!             // do something useful with parser.token_kind(), parser.value_str_borrow(), ...
//!         }
//!         Status::NeedMore => {
//!             // no more input available in this example; a real caller would feed() more
//!             break;
//!         }
//!         Status::Complete => break,
//!     }
//! }
//! ```
//!
//! ## Feeding input incrementally
//!
//! Bytes may arrive split anywhere, including in the middle of a string
//! escape or a number's exponent. `parse` resumes exactly where it left off
//! once more bytes are fed:
//!
//! ```
//! use vktor::{Status, TokenKind, VktorParser};
//!
//! let mut parser = VktorParser::new(8);
//! parser.feed(b"tr".to_vec());
//! assert_eq!(parser.parse().unwrap(), Status::NeedMore);
//!
//! parser.feed(b"ue".to_vec());
//! assert_eq!(parser.parse().unwrap(), Status::Token);
//! assert_eq!(parser.token_kind(), Some(TokenKind::True));
//! ```

mod chunk;
mod container;
mod error;
mod expected;
mod parser;
mod token;
mod unicode;

pub use container::ContainerKind;
pub use error::{ValueError, VktorError};
pub use parser::{Status, VktorParser, DEFAULT_MAX_DEPTH};
pub use token::TokenKind;
