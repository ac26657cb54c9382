//! Language tests for the production combinators
//!
//! Every case checks both views of a production: the derived regex must accept
//! exactly the inputs the interpreter accepts with `parse_remaining`.

use regram::error::{Found, ParseError};
use regram::{one_of, seq, Production, SymbolKind};
use rstest::rstest;

fn assert_language(p: &Production, accepted: &[&str], rejected: &[&str]) {
    assert_eq!(p.to_string(), p.pattern());
    for input in accepted {
        assert!(p.matches(input).unwrap(), "regex should accept {input:?}");
        if let Err(err) = p.parse_remaining_str(input) {
            panic!("parse should accept {input:?}: {err}");
        }
    }
    for input in rejected {
        assert!(!p.matches(input).unwrap(), "regex should reject {input:?}");
        assert!(
            p.parse_remaining_str(input).is_err(),
            "parse should reject {input:?}"
        );
    }
}

fn t(expr: &str) -> Production {
    Production::terminal(expr).unwrap()
}

#[test]
fn test_empty_sequence() {
    let p = Production::of(Vec::<&str>::new()).unwrap();
    assert_language(&p, &[""], &["1", "0"]);
}

#[test]
fn test_single_terminal() {
    let p = Production::of(["1"]).unwrap();
    assert_language(&p, &["1"], &["", "0", "11"]);
}

#[test]
fn test_two_terminal_sequence() {
    let p = Production::of(["1", "0"]).unwrap();
    assert_language(&p, &["10"], &["", "1", "0", "01", "100"]);
}

#[test]
fn test_terminal_with_inner_alternation() {
    let p = Production::of(["1|0"]).unwrap();
    assert_language(&p, &["1", "0"], &["", "10", "01"]);
}

#[test]
fn test_empty_alternation() {
    let p = Production::one_of(Vec::<&str>::new()).unwrap();
    assert_language(&p, &[""], &["1"]);
}

#[test]
fn test_single_alternative() {
    let p = Production::one_of(["1"]).unwrap();
    assert_language(&p, &["1"], &["", "11"]);
}

#[test]
fn test_two_alternatives() {
    let p = Production::one_of(["1", "0"]).unwrap();
    assert_language(&p, &["1", "0"], &["", "11", "00", "10"]);
}

#[rstest]
#[case::of_empty(Production::empty().opt(), &[""], &["1"])]
#[case::of_terminal(t("1").opt(), &["", "1"], &["0", "11"])]
#[case::of_sequence(Production::of(["1", "0"]).unwrap().opt(), &["", "10"], &["1", "0"])]
#[case::nested(t("1").opt().opt(), &["", "1"], &["0", "11"])]
fn test_optional(#[case] p: Production, #[case] accepted: &[&str], #[case] rejected: &[&str]) {
    assert_language(&p, accepted, rejected);
}

#[rstest]
#[case::of_empty(Production::empty().repeat(), &[""], &["1"])]
#[case::of_empty_alternation(Production::one_of(Vec::<&str>::new()).unwrap().repeat(), &[""], &["1"])]
#[case::of_terminal(t("1").repeat(), &["", "1", "11", "111"], &["0", "10"])]
#[case::of_sequence(
    Production::of(["1", "0"]).unwrap().repeat(),
    &["", "10", "1010", "101010"],
    &["0", "1", "01", "101"]
)]
#[case::of_single_alternative(Production::one_of(["1"]).unwrap().repeat(), &["", "1", "11", "111"], &["0", "10"])]
#[case::of_alternation(
    Production::one_of(["1", "0"]).unwrap().repeat(),
    &["", "1", "0", "11", "10", "01", "00", "1100"],
    &["2", "102"]
)]
fn test_repetition(#[case] p: Production, #[case] accepted: &[&str], #[case] rejected: &[&str]) {
    assert_language(&p, accepted, rejected);
}

#[test]
fn test_wrapped_empty() {
    let b = Production::empty();
    let a = Production::of([&b]).unwrap();
    assert_language(&a, &[""], &["1", "0"]);

    let twice = Production::of([&a]).unwrap();
    assert_language(&twice, &[""], &["1"]);
}

#[test]
fn test_wrapped_terminal() {
    let b = t("1");
    let a = Production::of([&b]).unwrap();
    assert_language(&a, &["1"], &["", "0", "11"]);

    let symbol = a.parse_remaining_str("1").unwrap();
    assert_eq!(symbol.kind(), SymbolKind::NonTerminal);
    assert_eq!(symbol.origin(), &a);
    assert_eq!(symbol.children()[0].origin(), &b);
}

#[test]
fn test_wrapped_sequence() {
    let b = Production::of(["1", "0"]).unwrap();
    let a = Production::of([&b]).unwrap();
    assert_language(&a, &["10"], &["", "1", "0", "01"]);
}

#[test]
fn test_optional_before_terminal() {
    let c = t("1");
    let b = Production::of([c.opt()]).unwrap();
    let a = seq![&b, "0"].unwrap();
    assert_language(&a, &["10", "0"], &["", "1"]);
}

#[test]
fn test_repeated_sequence_with_optional_tail() {
    let c = t("0");
    let b = seq!["1", c.opt()].unwrap();
    let a = seq!["0", b.repeat()].unwrap();
    assert_language(&a, &["0", "01", "010", "0101", "010110"], &["", "1", "0100"]);
}

#[test]
fn test_two_optionals() {
    let a = Production::sequence([t("1").opt(), t("0").opt()]);
    assert_language(&a, &["", "1", "0", "10"], &["11", "01"]);
}

#[test]
fn test_heterogeneous_alternation() {
    let digit = t("[0-9]");
    let sign = one_of!["\\+", "-"].unwrap();
    let number = seq![sign.opt(), &digit, digit.repeat()].unwrap();
    assert_language(&number, &["7", "+12", "-305"], &["", "+", "1+", "--1"]);
}

#[test]
fn test_sequence_tree_shape() {
    let p = Production::of(["1", "0"]).unwrap();
    let symbol = p.parse_remaining_str("10").unwrap();

    assert_eq!(symbol.kind(), SymbolKind::NonTerminal);
    assert_eq!(symbol.len(), 2);
    let values: Vec<&str> = symbol.terminals().iter().map(|t| t.value()).collect();
    assert_eq!(values, vec!["1", "0"]);
    assert!(symbol
        .children()
        .iter()
        .all(|child| child.kind() == SymbolKind::Terminal));
}

#[test]
fn test_sequence_mismatch_position() {
    let p = Production::of(["1", "0"]).unwrap();
    let err = p.parse_str("01").unwrap_err();
    assert_eq!(err.position(), Some(0));
    match err {
        ParseError::RuleMismatch { expected, found } => {
            assert_eq!(expected.to_string(), "{1}");
            assert!(matches!(found, Found::Token(ref token) if token.value() == "0"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_repeated_alternation() {
    let p = Production::one_of(["1", "0"]).unwrap().repeat();
    let symbol = p.parse_remaining_str("1010").unwrap();
    assert_eq!(symbol.len(), 4);
    assert!(symbol
        .children()
        .iter()
        .all(|child| child.kind() == SymbolKind::Terminal));
    assert_eq!(symbol.text(), "1010");

    let err = p.parse_remaining_str("2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Too many tokens: input continues with \"2\" at 0"
    );

    // parse alone stops the loop before "2" and leaves it unread
    let symbol = p.parse_str("2").unwrap();
    assert_eq!(symbol.len(), 0);
    assert!(!p.matches("2").unwrap());

    let err = p.children()[0].parse_str("2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rule mismatch: expected one of {1, 0}, found \"2\" at 0"
    );
}

#[test]
fn test_optional_singleton() {
    let p = t("1").opt();

    let symbol = p.parse_remaining_str("").unwrap();
    assert_eq!(symbol.kind(), SymbolKind::Singleton);
    assert_eq!(symbol.len(), 0);

    let symbol = p.parse_remaining_str("1").unwrap();
    assert_eq!(symbol.kind(), SymbolKind::Singleton);
    assert_eq!(symbol.len(), 1);
}

#[test]
fn test_too_many_tokens() {
    let p = Production::of(["1", "0"]).unwrap();
    let symbol = p.parse_str("100").unwrap();
    assert_eq!(symbol.text(), "10");

    match p.parse_remaining_str("100").unwrap_err() {
        ParseError::TooManyTokens { next } => {
            assert_eq!(next.value(), "0");
            assert_eq!(next.span(), 2..3);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_end_of_input_mismatch() {
    let p = Production::of(["1", "0"]).unwrap();
    let err = p.parse_str("1").unwrap_err();
    assert!(matches!(
        err,
        ParseError::RuleMismatch {
            found: Found::EndOfInput,
            ..
        }
    ));
    assert_eq!(err.position(), None);
}

#[test]
fn test_csv_file() {
    let textdata = Production::one_of([r"[\x20-\x21]", r"[\x23-\x2B]", r"[\x2D-\x7E]"]).unwrap();
    let lf = t(r"\x0A");
    let dquote = t(r"\x22");
    let cr = t(r"\x0D");
    let crlf = Production::sequence([cr.clone(), lf.clone()]);
    let comma = t(r"\x2C");
    let non_escaped = Production::of([textdata.repeat()]).unwrap();
    let escaped = Production::sequence([
        dquote.clone(),
        Production::alternation([
            textdata.clone(),
            comma.clone(),
            cr,
            lf,
            Production::sequence([dquote.clone(), dquote.clone()]),
        ])
        .repeat(),
        dquote,
    ]);
    let field = Production::alternation([escaped, non_escaped]);
    let record = Production::sequence([
        field.clone(),
        Production::sequence([comma.clone(), field.clone()]).repeat(),
    ]);
    let header = Production::sequence([
        field.clone(),
        Production::sequence([comma, field]).repeat(),
    ]);
    let file = Production::sequence([
        Production::sequence([header, crlf.clone()]).opt(),
        Production::sequence([record, crlf.opt()]).repeat(),
    ]);

    let input = "TITLE,RELEASED\r\n\
                 Please Please Me,22 March 1963\r\n\
                 With the Beatles,22 November 1963\r\n\
                 Introducing... The Beatles,10 January 1964\r\n\
                 Meet the Beatles!,20 January 1964\r\n";
    assert!(file.matches(input).unwrap());
    let symbol = file.parse_remaining_str(input).unwrap();
    assert_eq!(symbol.text(), input);
    assert_eq!(symbol.children()[1].len(), 4);
}

#[test]
fn test_comment_markers() {
    let cr = t(r"\r");
    let lf = t(r"\n");
    let line_terminator = Production::alternation([lf.clone(), seq![&cr, lf.opt()].unwrap()]);
    let comment_head = seq!["/", one_of!["/", r"\*"].unwrap()].unwrap();
    let comment_tail = seq![r"\*", t("/").opt()].unwrap();
    let comment = Production::alternation([comment_head, comment_tail]);
    let input = one_of![&line_terminator, &comment, "."].unwrap().repeat();

    let text = "//\n/*\r*\r\n*/";
    assert_language(&input, &[text], &[]);

    let symbol = input.parse_remaining_str(text).unwrap();
    let pieces: Vec<String> = symbol.children().iter().map(|child| child.text()).collect();
    assert_eq!(pieces, vec!["//", "\n", "/*", "\r", "*", "\r\n", "*/"]);
}
