//! An incremental, allocation-free JSON tokenizer.
//!
//! `jsontok` scans a byte buffer holding JSON text and produces a flat
//! sequence of lightweight token descriptors (type, byte span, child
//! count, and optional parent/sibling links) into a caller-supplied
//! fixed-capacity pool. It performs no heap allocation, no string
//! copying or unescaping, and builds no tree; it is meant to be
//! embedded inside a larger parser or document model that decodes the
//! spans it reports.
//!
//! The [`Tokenizer`] value is the complete parser state. A scan that
//! stops because the pool filled up ([`TokenizeError::Capacity`]) or
//! the input ran out ([`TokenizeError::Truncated`]) resumes from the
//! retained state once the caller supplies a larger pool or more
//! bytes; nothing is rescanned. Invoking [`Tokenizer::count`] instead
//! of [`Tokenizer::tokenize`] runs the same scan without storage, to
//! size a pool before the real pass.
//!
//! Two grammar [`Dialect`]s are supported: strict RFC 8259, and a
//! permissive mode that accepts bare words, non-string keys, and
//! multiple top-level values.
//!
//! # Examples
//!
//! ```rust
//! use jsontok::{Token, TokenType, Tokenizer, TokenizerOptions};
//!
//! let input = br#"{"temp": 21.5, "ok": true}"#;
//! let mut tokenizer = Tokenizer::new(TokenizerOptions::default());
//! let capacity = tokenizer.count(input).unwrap();
//!
//! let mut tokens = [Token::default(); 16];
//! tokenizer.reset();
//! let produced = tokenizer.tokenize(input, &mut tokens[..capacity]).unwrap();
//!
//! assert_eq!(produced, 5);
//! assert_eq!(tokens[0].size(), 2);
//! let keys: Vec<_> = tokens[..produced]
//!     .iter()
//!     .filter(|t| t.is(TokenType::KEY))
//!     .map(|t| t.bytes(input).unwrap())
//!     .collect();
//! assert_eq!(keys, ["temp", "ok"]);
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

mod error;
mod grammar;
mod options;
mod pool;
mod token;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use error::TokenizeError;
pub use grammar::Dialect;
pub use options::TokenizerOptions;
pub use token::{Token, TokenType};
pub use tokenizer::Tokenizer;
