use rstest::rstest;

use super::{permissive, strict, tokenize_ok};
use crate::{TokenizeError, Tokenizer};

#[test]
fn dry_run_counts_without_storing() {
    let mut tokenizer = Tokenizer::new(strict());
    assert_eq!(tokenizer.count(br#"{"a":1}"#), Ok(3));
}

#[rstest]
#[case(br#"{"a":1}"# as &[u8])]
#[case(br#"{"a":1,"b":2}"#)]
#[case(br#"{"a":[1,{"b":null}],"c":true}"#)]
#[case(b"{}")]
#[case(b"[[],[[]],{}]")]
#[case(br#"["a\"b\\c", -12.5e+7, true, false, null]"#)]
#[case(b"{} []")]
fn count_agrees_with_real_run(#[case] input: &[u8]) {
    let mut counter = Tokenizer::new(strict());
    let counted = counter.count(input).expect("count");

    let tokens = tokenize_ok(strict(), input);
    assert_eq!(counted, tokens.len());
}

#[rstest]
#[case(b"{a:1}" as &[u8])]
#[case(b"{} {} 1 2 \"x\"")]
#[case(b"a:1 b:2")]
#[case(b"null")]
fn count_agrees_with_real_run_permissive(#[case] input: &[u8]) {
    let mut counter = Tokenizer::new(permissive());
    let counted = counter.count(input).expect("count");

    let tokens = tokenize_ok(permissive(), input);
    assert_eq!(counted, tokens.len());
}

/// The documented asymmetry: a dry run skips grammar acceptance, so it
/// can report a clean count for a document the real run rejects.
#[rstest]
#[case::missing_value(br#"{"a":}"# as &[u8], 2)]
#[case::category_mismatch(b"[1}", 2)]
#[case::trailing_scalar(b"{} 1", 2)]
#[case::comma_after_key(br#"{"a",1}"#, 3)]
fn count_can_accept_what_the_real_run_rejects(#[case] input: &[u8], #[case] counted: usize) {
    let mut counter = Tokenizer::new(strict());
    assert_eq!(counter.count(input), Ok(counted));

    let mut tokens = std::vec![crate::Token::default(); 16];
    let mut tokenizer = Tokenizer::new(strict());
    assert_eq!(
        tokenizer.tokenize(input, &mut tokens),
        Err(TokenizeError::Invalid)
    );
}

#[rstest]
#[case::bad_escape(br#"["\q"]"# as &[u8])]
#[case::bad_unicode_escape(br#"["\u12G4"]"#)]
#[case::control_byte_in_primitive(b"[12\x013]")]
fn count_still_validates_characters(#[case] input: &[u8]) {
    let mut counter = Tokenizer::new(strict());
    assert_eq!(counter.count(input), Err(TokenizeError::Invalid));
}

#[test]
fn count_still_checks_bracket_balance() {
    let mut counter = Tokenizer::new(strict());
    assert_eq!(counter.count(br#"{"a":1"#), Err(TokenizeError::Truncated));

    let mut counter = Tokenizer::new(strict());
    assert_eq!(counter.count(b"]"), Err(TokenizeError::Invalid));

    let mut counter = Tokenizer::new(strict());
    assert_eq!(counter.count(b"{}}"), Err(TokenizeError::Invalid));
}

#[test]
fn count_sizes_a_pool_for_the_real_run() {
    let input = br#"{"a":[1,2,3],"b":{"c":"d"}}"#;

    let mut counter = Tokenizer::new(strict());
    let capacity = counter.count(input).expect("count");

    let mut tokens = std::vec![crate::Token::default(); capacity];
    let mut tokenizer = Tokenizer::new(strict());
    assert_eq!(tokenizer.tokenize(input, &mut tokens), Ok(capacity));
}
