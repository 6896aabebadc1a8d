use std::panic::{self, AssertUnwindSafe};

use test_case::test_case;
use test_context::{ContextDeclaration, ContextMeta, ContextRule};
use test_context_suite::*;
use test_context_testing::Journal;

#[test_case(&[A_IS_SET], &["before a", "body", "after a"]; "single context")]
#[test_case(&[B_IS_SET], &["before b", "body", "after b"]; "other context only")]
#[test_case(
    &[A_IS_SET, B_IS_SET],
    &["before a", "before b", "body", "after a", "after b"];
    "each of in declared order"
)]
#[test_case(
    &[B_IS_SET, A_IS_SET],
    &["before b", "before a", "body", "after b", "after a"];
    "reversed declaration"
)]
#[test_case(&[], &["body"]; "no contexts")]
#[test_case(&["unregistered"], &["body"]; "unregistered context")]
fn wraps_the_body(
    names: &[&str],
    expect: &[&str],
) {
    test_context_testing::logging();

    let rule = ContextRule::<Pair>::new();
    let mut pair = Pair::default();
    let declaration: ContextDeclaration = names.iter().copied().collect();

    rule.run(&mut pair, &declaration, |pair: &mut Pair| {
        pair.journal.record("body")
    })
    .unwrap();

    assert_eq!(pair.journal.entries(), expect);
}

#[test]
fn each_action_runs_exactly_once() {
    let rule = ContextRule::<Pair>::new();
    let mut pair = Pair::default();

    rule.evaluate(
        &mut pair,
        Some(&ContextMeta::each_of([A_IS_SET, B_IS_SET])),
        |_: &mut Pair| {},
    )
    .unwrap();

    for entry in ["before a", "before b", "after a", "after b"] {
        assert_eq!(pair.journal.count(entry), 1, "{entry}");
    }
    assert!(!pair.journal.contains("before unnamed"));
}

#[test]
fn teardown_sees_the_body_effects() {
    let rule = ContextRule::<Pair>::new();
    let mut pair = Pair::default();

    rule.evaluate(&mut pair, Some(&ContextMeta::when(A_IS_SET)), |pair: &mut Pair| {
        assert_eq!(pair.a, Some(Marker));
    })
    .unwrap();

    assert_eq!(pair.a, None);
}

fn failing_body(pair: &mut Pair) {
    pair.journal.record("body");
    panic!("assertion in body");
}

#[test]
fn teardown_runs_when_the_body_panics() {
    let journal = Journal::new();
    let rule = ContextRule::<Pair>::new();
    let mut pair = Pair::with_journal(journal.clone());

    let caught = panic::catch_unwind(AssertUnwindSafe(|| {
        rule.evaluate(
            &mut pair,
            Some(&ContextMeta::each_of([A_IS_SET, B_IS_SET])),
            failing_body,
        )
    }));

    let payload = caught.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"assertion in body"));
    assert_eq!(
        journal.entries(),
        ["before a", "before b", "body", "after a", "after b"]
    );
}

#[test]
fn teardown_runs_when_the_body_returns_an_error() {
    let rule = ContextRule::<Pair>::new();
    let mut pair = Pair::default();

    let outcome = rule
        .evaluate(
            &mut pair,
            Some(&ContextMeta::when(B_IS_SET)),
            |_: &mut Pair| -> Result<(), &'static str> { Err("not equal") },
        )
        .unwrap();

    assert_eq!(outcome, Err("not equal"));
    assert_eq!(pair.journal.entries(), ["before b", "after b"]);
}

#[test]
fn one_rule_serves_many_instances() {
    let rule = ContextRule::<Pair>::new();

    for meta in [
        Some(ContextMeta::when(A_IS_SET)),
        None,
        Some(ContextMeta::when(B_IS_SET)),
    ] {
        let mut pair = Pair::default();
        let expect_a = meta.as_ref().is_some_and(|meta| meta.when == A_IS_SET);

        rule.evaluate(&mut pair, meta.as_ref(), |pair: &mut Pair| {
            assert_eq!(pair.a.is_some(), expect_a);
        })
        .unwrap();
    }
}

#[test]
fn wrapped_body_is_deferred() {
    let rule = ContextRule::<Pair>::new();
    let wrapped = rule.apply(Some(ContextMeta::when(A_IS_SET)), |pair: &mut Pair| {
        pair.journal.record("body")
    });

    let mut pair = Pair::default();
    assert!(pair.journal.entries().is_empty());

    wrapped(&mut pair).unwrap();
    assert_eq!(pair.journal.entries(), ["before a", "body", "after a"]);
}

#[test]
fn registry_is_indexed_once() {
    let rule = ContextRule::<Pair>::new();
    let registry = rule.registry();

    let names: Vec<_> = registry.names().into_iter().map(|name| name.as_str()).collect();
    assert_eq!(names, ["", A_IS_SET, B_IS_SET]);
    assert_eq!(registry.len(), 5);
}
