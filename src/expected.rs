//! The expected-token bitmask.
//!
//! [`ExpectedSet`] tracks which lexical productions are legal as the *next*
//! byte sequence the scanner may see. It is consulted before every
//! structural dispatch and every sub-scanner transition, and is updated on
//! every token and on every structural transition — see `vktor.c`'s
//! `expected` field and the `VKTOR_C_*`/`VKTOR_T_*` bitmask it was built
//! from, which this type ports directly as named associated constants
//! instead of raw enum variants ORed together.
//!
//! `vktor.c`'s `expected` field also carries bits for the string
//! sub-scanner's escape/Unicode-escape sub-states (`VKTOR_C_ESCAPED`,
//! `VKTOR_C_UNIC1..4`). This crate does not port those bits: how far into
//! an in-progress string escape the scanner has gotten is tracked by
//! [`crate::parser`]'s own `StringMode` enum instead, so `ExpectedSet` only
//! ever needs to answer "what production may legally start next."
use std::ops::{BitOr, BitOrAssign};

/// A bitmask of permitted next productions.
///
/// Bits below 1<<16 correspond to [`crate::token::TokenKind`] values (a
/// token is "expected" if its bit is set); bits at 1<<16 and above are
/// structural, non-token productions (separators and the number
/// sub-scanner's local `.`/`e`/sign flags) that never themselves become a
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpectedSet(u32);

impl ExpectedSet {
    pub const NONE: ExpectedSet = ExpectedSet(0);

    pub const NULL: ExpectedSet = ExpectedSet(1 << 0);
    pub const TRUE: ExpectedSet = ExpectedSet(1 << 1);
    pub const FALSE: ExpectedSet = ExpectedSet(1 << 2);
    pub const INT: ExpectedSet = ExpectedSet(1 << 3);
    pub const FLOAT: ExpectedSet = ExpectedSet(1 << 4);
    pub const STRING: ExpectedSet = ExpectedSet(1 << 5);
    pub const ARRAY_START: ExpectedSet = ExpectedSet(1 << 6);
    pub const ARRAY_END: ExpectedSet = ExpectedSet(1 << 7);
    pub const OBJECT_START: ExpectedSet = ExpectedSet(1 << 8);
    pub const OBJECT_KEY: ExpectedSet = ExpectedSet(1 << 9);
    pub const OBJECT_END: ExpectedSet = ExpectedSet(1 << 10);

    pub const COMMA: ExpectedSet = ExpectedSet(1 << 16);
    pub const COLON: ExpectedSet = ExpectedSet(1 << 17);
    pub const DOT: ExpectedSet = ExpectedSet(1 << 18);
    pub const SIGNUM: ExpectedSet = ExpectedSet(1 << 19);
    pub const EXP: ExpectedSet = ExpectedSet(1 << 20);

    /// Any token that may start a JSON value.
    pub const VALUE_TOKENS: ExpectedSet = ExpectedSet(
        Self::NULL.0
            | Self::TRUE.0
            | Self::FALSE.0
            | Self::INT.0
            | Self::FLOAT.0
            | Self::STRING.0
            | Self::ARRAY_START.0
            | Self::OBJECT_START.0,
    );

    pub const fn contains(self, other: ExpectedSet) -> bool {
        (self.0 & other.0) != 0
    }

    pub const fn remove(self, other: ExpectedSet) -> ExpectedSet {
        ExpectedSet(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ExpectedSet {
    type Output = ExpectedSet;

    fn bitor(self, rhs: ExpectedSet) -> ExpectedSet {
        ExpectedSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExpectedSet {
    fn bitor_assign(&mut self, rhs: ExpectedSet) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn value_tokens_contains_each_value_kind() {
        for bit in [
            ExpectedSet::NULL,
            ExpectedSet::TRUE,
            ExpectedSet::FALSE,
            ExpectedSet::INT,
            ExpectedSet::FLOAT,
            ExpectedSet::STRING,
            ExpectedSet::ARRAY_START,
            ExpectedSet::OBJECT_START,
        ] {
            assert!(ExpectedSet::VALUE_TOKENS.contains(bit));
        }
        assert!(!ExpectedSet::VALUE_TOKENS.contains(ExpectedSet::OBJECT_END));
    }

    #[test]
    fn remove_clears_only_the_given_bit() {
        let set = ExpectedSet::SIGNUM | ExpectedSet::DOT;
        let narrowed = set.remove(ExpectedSet::SIGNUM);
        assert!(!narrowed.contains(ExpectedSet::SIGNUM));
        assert!(narrowed.contains(ExpectedSet::DOT));
    }

    #[test]
    fn none_is_empty() {
        assert!(ExpectedSet::NONE.is_empty());
        assert!(!ExpectedSet::VALUE_TOKENS.is_empty());
    }
}
