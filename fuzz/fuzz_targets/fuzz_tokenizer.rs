#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsontok::{Dialect, Token, TokenType, TokenizeError, Tokenizer, TokenizerOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fn options_from_flags(flags: u8) -> TokenizerOptions {
    TokenizerOptions {
        dialect: if flags & 1 != 0 {
            Dialect::Permissive
        } else {
            Dialect::Strict
        },
        parent_links: flags & 2 != 0,
        sibling_links: flags & 4 != 0,
    }
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(8)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3 | 4 => Value::String(u.arbitrary()?),
            5 | 6 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let members: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(members.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn check_tokens(tokens: &[Token], input: &[u8]) {
    for (idx, token) in tokens.iter().enumerate() {
        let span = token.span().expect("finished tokens are closed");
        assert!(span.end <= input.len(), "span inside the input");
        assert!(
            token.is(TokenType::ANY_VALUE),
            "stored tokens carry a base category"
        );
        if let Some(parent) = token.parent() {
            assert!(parent < idx, "parents precede their children");
        }
        if let Some(sibling) = token.next_sibling() {
            assert!(sibling > idx, "siblings follow in allocation order");
            assert!(sibling < tokens.len());
        }
    }
}

/// Dry run, then real run, cross-checking the two.
fn tokenize_both_ways(options: TokenizerOptions, input: &[u8]) {
    let mut counter = Tokenizer::new(options);
    let counted = counter.count(input);

    let capacity = match counted {
        Ok(n) => n,
        // A grammar-invalid document can still count; size generously
        // so the real run only fails for grammar reasons.
        Err(_) => input.len(),
    };
    let mut tokens = vec![Token::default(); capacity];
    let mut tokenizer = Tokenizer::new(options);

    match tokenizer.tokenize(input, &mut tokens) {
        Ok(produced) => {
            // The dry run skips only grammar checks, so any document
            // the real run accepts must count successfully, to the
            // same total.
            assert_eq!(counted, Ok(produced));
            assert_eq!(tokenizer.depth(), 0);
            tokens.truncate(produced);
            check_tokens(&tokens, input);
        }
        Err(err) => {
            assert!(tokenizer.cursor() <= input.len());
            if counted.is_ok() {
                // With a pool sized by a successful count, only the
                // deferred grammar checks can fail.
                assert_eq!(err, TokenizeError::Invalid);
            }
        }
    }
}

fn run(data: &[u8]) {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let options = options_from_flags(flags);

    // One flag routes the remaining bytes through serde_json first, so
    // the harness regularly sees well-formed documents and not just
    // byte soup.
    let serialized;
    let input = if flags & 8 != 0 {
        let mut u = Unstructured::new(rest);
        let Ok(value) = ArbitraryValue::arbitrary(&mut u) else {
            return;
        };
        serialized = serde_json::to_vec(&value.0).expect("serialize arbitrary value");
        &serialized[..]
    } else {
        rest
    };

    tokenize_both_ways(options, input);

    // Oracle: anything serde_json accepts from a container root, the
    // strict dialect must accept as well.
    if options.dialect == Dialect::Strict {
        if let Ok(value) = serde_json::from_slice::<Value>(input) {
            if matches!(value, Value::Object(_) | Value::Array(_)) {
                let mut oracle_tokens = vec![Token::default(); input.len().max(1)];
                let mut oracle = Tokenizer::new(options);
                oracle
                    .tokenize(input, &mut oracle_tokens)
                    .expect("serde_json-valid container documents must tokenize");
            }
        }
    }
}

fuzz_target!(|data: &[u8]| run(data));
