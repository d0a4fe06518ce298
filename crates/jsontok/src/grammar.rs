//! The "expected next token" transition table for both grammar
//! dialects.
//!
//! One table drives a single scanner set: every entry takes the dialect
//! into account, so the two modes cannot drift apart outside their
//! documented differences. The tokenizer recomputes its expectation
//! mask through these entries after each accepted token and gates every
//! scanner against it.

use crate::token::TokenType;

/// The grammar dialect a [`Tokenizer`](crate::Tokenizer) enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    /// RFC 8259 grammar: a document is an object or array, object keys
    /// are strings, primitives start with a digit, `-`, `t`, `f`, or
    /// `n`, and every member is comma-separated.
    #[default]
    Strict,
    /// Relaxed grammar: bare words are primitives anywhere a value is
    /// legal, any token before a `:` becomes a key, multiple top-level
    /// values are tolerated, and a completed key/value pair need not be
    /// followed by a comma.
    Permissive,
}

impl Dialect {
    pub(crate) fn is_permissive(self) -> bool {
        matches!(self, Dialect::Permissive)
    }

    /// Expectation before any input has been scanned.
    pub(crate) fn initial(self) -> TokenType {
        match self {
            Dialect::Strict => TokenType::CONTAINER,
            Dialect::Permissive => TokenType::ANY_VALUE,
        }
    }

    /// Expectation after an object or array opened.
    pub(crate) fn after_open(self, container: TokenType) -> TokenType {
        match self {
            // An object starts with a key or closes immediately.
            Dialect::Strict if container == TokenType::OBJECT => {
                TokenType::STRING | TokenType::CLOSE
            }
            _ => TokenType::ANY_VALUE | TokenType::CLOSE,
        }
    }

    /// Expectation after a string token, classified as key or value.
    pub(crate) fn after_string(self, is_key: bool) -> TokenType {
        match self {
            Dialect::Strict if is_key => TokenType::DELIMITER,
            Dialect::Strict => TokenType::DELIMITER | TokenType::CLOSE,
            Dialect::Permissive => {
                TokenType::ANY_VALUE | TokenType::DELIMITER | TokenType::CLOSE
            }
        }
    }

    /// Expectation after a primitive token. `enclosed` reports whether
    /// an open container still surrounds the cursor; without one the
    /// permissive dialect lets another top-level value follow.
    pub(crate) fn after_primitive(self, enclosed: bool) -> TokenType {
        let next = TokenType::DELIMITER | TokenType::CLOSE;
        match self {
            Dialect::Permissive if !enclosed => next | TokenType::ANY_VALUE,
            _ => next,
        }
    }

    /// Expectation after a colon.
    pub(crate) fn after_colon(self) -> TokenType {
        TokenType::ANY_VALUE
    }

    /// Expectation after a comma, once the open container has been
    /// re-derived.
    pub(crate) fn after_comma(self, in_object: bool) -> TokenType {
        match self {
            // Inside an object the next token must be a key.
            Dialect::Strict if in_object => TokenType::STRING,
            _ => TokenType::ANY_VALUE,
        }
    }

    /// Expectation after a closing bracket. `enclosed` reports whether
    /// a container is still open around the cursor; once the top-level
    /// value has closed, the strict dialect only admits further
    /// containers while the permissive dialect admits anything.
    pub(crate) fn after_close(self, enclosed: bool) -> TokenType {
        if enclosed {
            TokenType::DELIMITER | TokenType::CLOSE
        } else {
            match self {
                Dialect::Strict => TokenType::CONTAINER,
                Dialect::Permissive => TokenType::ANY_VALUE,
            }
        }
    }
}
