//! Property-based tests for routing invariants using proptest.
//!
//! Invariants tested:
//! - Empty command permission never denies at the command gate
//! - A missing permission is reported with the token substituted verbatim
//! - In-bounds arguments invoke the reached rule with the argument tail
//! - Routing the same input twice gives the same outcome
//! - Two default executors fail discovery wherever they are declared

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]
#![allow(clippy::expect_used)]

use colonel_core::{
    discover, route, ArgumentBounds, CommandHeader, DefaultExecutorMeta, DiscoveryError,
    DispatchOutcome, ExecutorMeta, Handle, Handler, HandlerMethod, InvokedTarget, LocalSender,
    RoutingTable,
};
use proptest::prelude::*;

fn fast_config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        max_shrink_iters: 128,
        ..ProptestConfig::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STRATEGIES
// ═══════════════════════════════════════════════════════════════════════════

fn token_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

fn arguments_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(token_strategy(), 0..=max)
}

fn permission_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(\\.[a-z*]{1,6}){0,3}"
}

/// Randomizes the case of every character.
fn case_variant(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn give_table(bounds: ArgumentBounds) -> RoutingTable {
    let handler = Handler::new("Economy")
        .header(CommandHeader::new("eco").with_usage("/eco", "Usage: {USAGE}"))
        .executor(
            "give",
            ExecutorMeta::new("give").with_bounds(bounds),
            |_, _, _| {},
        );
    discover(&handler).expect("handler should discover")
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn prop_empty_permission_never_denies(
        arguments in arguments_strategy(4),
        message in "[A-Za-z {}]{0,20}",
    ) {
        let mut header = CommandHeader::new("eco");
        header.permission_message = message;
        let table = discover(&Handler::new("Economy").header(header))
            .expect("handler should discover");
        let sender = LocalSender::player("Steve");

        let outcome = route(&table, &sender, "eco", &arguments);

        prop_assert!(!matches!(outcome, DispatchOutcome::Denied(_)));
    }

    #[test]
    fn prop_missing_permission_substituted_verbatim(
        permission in permission_strategy(),
        arguments in arguments_strategy(4),
    ) {
        let header = CommandHeader::new("eco")
            .with_permission(permission.clone(), "You lack {PERMISSION}!");
        let handler = Handler::new("Economy")
            .header(header)
            .default_executor("main", DefaultExecutorMeta::new(), |_, _, _| {});
        let table = discover(&handler).expect("handler should discover");
        let sender = LocalSender::player("Steve");

        let outcome = route(&table, &sender, "eco", &arguments);

        prop_assert_eq!(outcome, DispatchOutcome::Denied(format!("You lack {permission}!")));
    }

    #[test]
    fn prop_granted_permission_passes_gate(
        permission in permission_strategy(),
    ) {
        let header = CommandHeader::new("eco").with_permission(permission.clone(), "No {PERMISSION}");
        let handler = Handler::new("Economy")
            .header(header)
            .default_executor("main", DefaultExecutorMeta::new(), |_, _, _| {});
        let table = discover(&handler).expect("handler should discover");
        let sender = LocalSender::player("Steve").with_permission(permission);

        prop_assert!(route(&table, &sender, "eco", &[]).is_invoked());
    }

    #[test]
    fn prop_in_bounds_invokes_with_tail(
        name in case_variant("give"),
        (min, max, tail) in (0..4_usize, 0..4_usize).prop_flat_map(|(a, b)| {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            (Just(min), Just(max), proptest::collection::vec(token_strategy(), min..=max))
        }),
    ) {
        let table = give_table(ArgumentBounds::between(min, max));
        let sender = LocalSender::player("Steve");
        let arguments: Vec<String> = std::iter::once(name).chain(tail.iter().cloned()).collect();

        let outcome = route(&table, &sender, "eco", &arguments);

        prop_assert_eq!(outcome, DispatchOutcome::Invoked {
            target: InvokedTarget::Executor { name: "give".to_string() },
            arguments: tail,
        });
    }

    #[test]
    fn prop_out_of_bounds_shows_usage_or_silence(
        extra in 1..4_usize,
        max in 0..3_usize,
    ) {
        let table = give_table(ArgumentBounds::at_most(max));
        let sender = LocalSender::player("Steve");
        let arguments: Vec<String> = std::iter::once("give".to_string())
            .chain((0..max + extra).map(|i| i.to_string()))
            .collect();

        let outcome = route(&table, &sender, "eco", &arguments);

        prop_assert!(matches!(outcome, DispatchOutcome::UsageShown(_) | DispatchOutcome::Silent));
    }

    #[test]
    fn prop_routing_is_idempotent(
        arguments in arguments_strategy(3),
        op in any::<bool>(),
    ) {
        let handler = Handler::new("Economy")
            .header(CommandHeader::new("eco").with_usage("/eco", "Usage: {USAGE}"))
            .executor(
                "give",
                ExecutorMeta::new("give")
                    .with_aliases(["add"])
                    .with_permission("eco.give", "No {PERMISSION}")
                    .with_bounds(ArgumentBounds::exactly(1)),
                |_, _, _| {},
            )
            .default_executor(
                "balance",
                DefaultExecutorMeta::new().with_bounds(ArgumentBounds::exactly(0)),
                |_, _, _| {},
            );
        let table = discover(&handler).expect("handler should discover");
        let sender = LocalSender::player("Steve").with_op(op);

        let first = route(&table, &sender, "eco", &arguments);
        let second = route(&table, &sender, "eco", &arguments);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_two_defaults_fail_anywhere(
        executors in 0..5_usize,
        (first, second) in (0..6_usize, 0..6_usize),
    ) {
        let mut methods: Vec<HandlerMethod> = (0..executors)
            .map(|i| {
                HandlerMethod::plain(format!("sub{i}"), Handle::noop())
                    .with_executor(ExecutorMeta::new(format!("sub{i}")))
            })
            .collect();
        let a = first.min(methods.len());
        methods.insert(a, HandlerMethod::plain("a", Handle::noop())
            .with_default_executor(DefaultExecutorMeta::new()));
        let b = second.min(methods.len());
        methods.insert(b, HandlerMethod::plain("b", Handle::noop())
            .with_default_executor(DefaultExecutorMeta::new()));

        let handler = methods
            .into_iter()
            .fold(Handler::new("Economy").header(CommandHeader::new("eco")), Handler::method);

        prop_assert!(
            matches!(
                discover(&handler),
                Err(DiscoveryError::MultipleDefaultExecutors { .. })
            ),
            "expected MultipleDefaultExecutors error"
        );
    }
}
