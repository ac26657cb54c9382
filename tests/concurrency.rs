//! Productions shared across threads

use regram::{Grammar, Production, Symbol, VecTokenizer};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_send_and_sync() {
    assert_send_sync::<Production>();
    assert_send_sync::<Symbol>();
    assert_send_sync::<Grammar>();
}

#[test]
fn test_shared_production_parses_in_parallel() {
    let bits = Production::one_of(["1", "0"]).unwrap().repeat();
    let inputs = ["1010", "0", "", "111000111", "01"];

    let trees: Vec<Symbol> = thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let bits = &bits;
                s.spawn(move || {
                    let mut tokens = VecTokenizer::chars(input);
                    bits.parse_remaining(&mut tokens).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (tree, input) in trees.iter().zip(inputs) {
        assert_eq!(tree.text(), input);
        assert_eq!(tree.len(), input.len());
        assert_eq!(tree.origin(), &bits);
    }
}

#[test]
fn test_pattern_is_derived_once_under_contention() {
    let p = Production::sequence([
        Production::terminal("[a-z]").unwrap().repeat(),
        Production::terminal("=").unwrap(),
    ]);

    let patterns: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| p.pattern().to_string()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(patterns.iter().all(|pattern| pattern == p.pattern()));
    assert!(p.matches("ab=").unwrap());
}
