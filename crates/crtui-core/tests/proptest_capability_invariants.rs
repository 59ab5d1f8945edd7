//! Property-based invariant tests for capability interpretation and key
//! resolution.
//!
//! 1. Parameter substitution round-trips through decimal rendering.
//! 2. `%i` shifts both parameters by exactly one.
//! 3. Interpretation is deterministic and leaves the template untouched.
//! 4. The interpreter never panics, whatever bytes the template holds.
//! 5. Every candidate in the stock table resolves to its own key.
//! 6. The resolver never panics on arbitrary input bytes.

use std::io::Cursor;

use crtui_core::capability::CapabilityTemplate;
use crtui_core::input::{KeyResolver, Resolution};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parameters_round_trip(a in 0i64..=1_000_000, b in 0i64..=1_000_000) {
        let t = CapabilityTemplate::new(&b"%p1%d;%p2%d"[..]);
        let out = t.interpret(a, b).unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        let (first, second) = text.split_once(';').unwrap();
        prop_assert_eq!(first.parse::<i64>().unwrap(), a);
        prop_assert_eq!(second.parse::<i64>().unwrap(), b);
    }
}

proptest! {
    #[test]
    fn increment_shifts_both_by_one(a in 0i64..=1_000_000, b in 0i64..=1_000_000) {
        let plain = CapabilityTemplate::new(&b"%p1%d;%p2%d"[..]);
        let incremented = CapabilityTemplate::new(&b"%i%p1%d;%p2%d"[..]);
        prop_assert_eq!(
            incremented.interpret(a, b).unwrap(),
            plain.interpret(a + 1, b + 1).unwrap()
        );
    }
}

proptest! {
    #[test]
    fn interpretation_is_deterministic(
        a in -1_000i64..=1_000,
        b in -1_000i64..=1_000,
    ) {
        let t = CapabilityTemplate::new(&b"\x1b[%i%p1%d;%p2%dH"[..]);
        let before = t.as_bytes().to_vec();
        let first = t.interpret(a, b).unwrap();
        let second = t.interpret(a, b).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(t.as_bytes(), before.as_slice());
    }
}

proptest! {
    #[test]
    fn interpreter_never_panics(
        template in proptest::collection::vec(any::<u8>(), 0..64),
        a in any::<i32>(),
        b in any::<i32>(),
    ) {
        let t = CapabilityTemplate::new(template);
        // Malformed templates must fail, not panic or emit partial output.
        let _ = t.interpret(i64::from(a), i64::from(b));
    }
}

#[test]
fn every_stock_candidate_resolves_to_its_key() {
    let resolver = KeyResolver::default();
    let entries: Vec<_> = resolver
        .table()
        .entries()
        .map(|(key, seq)| (key, seq.to_vec()))
        .collect();
    for (key, sequence) in entries {
        let mut source = Cursor::new(sequence[1..].to_vec());
        assert_eq!(
            resolver.resolve(&mut source).unwrap(),
            Resolution::Key(key),
            "candidate {sequence:?}"
        );
    }
}

proptest! {
    #[test]
    fn resolver_never_panics(input in proptest::collection::vec(any::<u8>(), 0..16)) {
        let resolver = KeyResolver::default();
        let mut source = Cursor::new(input);
        // Arbitrary bytes either resolve, mismatch, or hit end of input.
        let outcome = resolver.resolve(&mut source).unwrap();
        match outcome {
            Resolution::Key(_) | Resolution::NoMatch => {}
        }
    }
}
