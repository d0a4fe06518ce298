mod dry_run;
mod resume;

use std::{vec, vec::Vec};

use crate::{Dialect, Token, TokenizeError, Tokenizer, TokenizerOptions};

pub(crate) fn strict() -> TokenizerOptions {
    TokenizerOptions::default()
}

pub(crate) fn permissive() -> TokenizerOptions {
    TokenizerOptions {
        dialect: Dialect::Permissive,
        ..TokenizerOptions::default()
    }
}

/// One-shot tokenize with a generous pool; panics on error.
pub(crate) fn tokenize_ok(options: TokenizerOptions, input: &[u8]) -> Vec<Token> {
    let mut tokens = vec![Token::default(); 64];
    let mut tokenizer = Tokenizer::new(options);
    let produced = tokenizer
        .tokenize(input, &mut tokens)
        .expect("input should tokenize");
    tokens.truncate(produced);
    tokens
}

/// One-shot tokenize with a generous pool; panics on success.
pub(crate) fn tokenize_err(options: TokenizerOptions, input: &[u8]) -> TokenizeError {
    let mut tokens = vec![Token::default(); 64];
    let mut tokenizer = Tokenizer::new(options);
    tokenizer
        .tokenize(input, &mut tokens)
        .expect_err("input should be rejected")
}
