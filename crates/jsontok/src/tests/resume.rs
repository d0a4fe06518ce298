use std::vec;

use super::{strict, tokenize_ok};
use crate::{Token, TokenizeError, Tokenizer};

#[test]
fn capacity_error_leaves_state_at_the_failing_token() {
    let input = br#"{"a":1}"#;
    let mut tokens = [Token::default(); 1];
    let mut tokenizer = Tokenizer::new(strict());

    assert_eq!(
        tokenizer.tokenize(input, &mut tokens),
        Err(TokenizeError::Capacity)
    );
    // The cursor sits on the opening quote of the string that failed
    // to allocate.
    assert_eq!(tokenizer.cursor(), 1);
}

#[test]
fn growing_the_pool_resumes_the_parse() {
    let input = br#"{"a":1}"#;
    let mut small = [Token::default(); 1];
    let mut tokenizer = Tokenizer::new(strict());

    assert_eq!(
        tokenizer.tokenize(input, &mut small),
        Err(TokenizeError::Capacity)
    );

    // Grow the pool, keeping the records produced so far.
    let mut grown = [Token::default(); 8];
    grown[..small.len()].copy_from_slice(&small);

    assert_eq!(tokenizer.tokenize(input, &mut grown), Ok(3));
    assert_eq!(&grown[..3], &tokenize_ok(strict(), input)[..]);
}

#[test]
fn every_starting_capacity_converges_to_the_same_tokens() {
    let input = br#"{"a":[1,{"b":null}],"c":true}"#;
    let expected = tokenize_ok(strict(), input);

    for capacity in 0..expected.len() {
        let mut pool = vec![Token::default(); capacity];
        let mut tokenizer = Tokenizer::new(strict());
        assert_eq!(
            tokenizer.tokenize(input, &mut pool),
            Err(TokenizeError::Capacity),
            "capacity {capacity} should exhaust",
        );

        let mut grown = vec![Token::default(); expected.len()];
        grown[..capacity].copy_from_slice(&pool);
        assert_eq!(tokenizer.tokenize(input, &mut grown), Ok(expected.len()));
        assert_eq!(grown, expected);
    }
}

#[test]
fn appending_input_resumes_after_truncation() {
    let mut tokens = [Token::default(); 8];
    let mut tokenizer = Tokenizer::new(strict());

    assert_eq!(
        tokenizer.tokenize(br#"{"a":"#, &mut tokens),
        Err(TokenizeError::Truncated)
    );
    assert_eq!(tokenizer.cursor(), 5);

    let full = br#"{"a":1}"#;
    assert_eq!(tokenizer.tokenize(full, &mut tokens), Ok(3));
    assert_eq!(&tokens[..3], &tokenize_ok(strict(), full)[..]);
}

#[test]
fn truncation_mid_string_rewinds_to_the_opening_quote() {
    let mut tokens = [Token::default(); 8];
    let mut tokenizer = Tokenizer::new(strict());

    assert_eq!(
        tokenizer.tokenize(br#"{"long na"#, &mut tokens),
        Err(TokenizeError::Truncated)
    );
    // The partial string was not consumed; scanning restarts at its
    // opening quote once more input arrives.
    assert_eq!(tokenizer.cursor(), 1);

    let full = br#"{"long name":null}"#;
    assert_eq!(tokenizer.tokenize(full, &mut tokens), Ok(3));
    assert_eq!(tokens[1].bytes(full).unwrap(), "long name");
}

#[test]
fn every_split_point_converges_to_the_same_tokens() {
    // The multi-byte character makes some split points land inside a
    // UTF-8 sequence; the scanner works on bytes and must not care.
    let full = r#"{"a":[1,{"b":null}],"c":"xéy"}"#.as_bytes();
    let expected = tokenize_ok(strict(), full);

    for split in 0..full.len() {
        let mut tokens = vec![Token::default(); expected.len()];
        let mut tokenizer = Tokenizer::new(strict());

        match tokenizer.tokenize(&full[..split], &mut tokens) {
            Ok(_) | Err(TokenizeError::Truncated) => {}
            Err(err) => panic!("split {split}: unexpected error {err}"),
        }

        assert_eq!(
            tokenizer.tokenize(full, &mut tokens),
            Ok(expected.len()),
            "split {split}",
        );
        assert_eq!(tokens, expected, "split {split}");
    }
}

#[test]
fn count_resumes_and_stays_cumulative() {
    let full = br#"[true, false, null]"#;

    let mut tokenizer = Tokenizer::new(strict());
    assert_eq!(
        tokenizer.count(br#"[true, fa"#),
        Err(TokenizeError::Truncated)
    );
    assert_eq!(tokenizer.count(full), Ok(4));
}

#[test]
fn reset_clears_retained_state() {
    let input = br#"{"a":1}"#;
    let mut tokens = [Token::default(); 8];
    let mut tokenizer = Tokenizer::new(strict());

    assert_eq!(tokenizer.tokenize(input, &mut tokens), Ok(3));
    // Without a reset the cursor would sit past the shorter new input.
    tokenizer.reset();
    assert_eq!(tokenizer.cursor(), 0);
    assert_eq!(tokenizer.tokenize(b"[1]", &mut tokens), Ok(2));
}
