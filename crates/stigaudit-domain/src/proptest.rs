//! Property-based tests for the evaluation engine.
//!
//! These tests use proptest to verify invariants around:
//! - Classification partitioning (no node dropped, none duplicated)
//! - Verdict laws (fail dominance, not-applicable, vacuous pass)
//! - Determinism of repeated evaluation and aggregation

use crate::engine::evaluate;
use crate::model::Pattern;
use crate::summary::Aggregator;
use crate::test_support::{MemTree, global_rule, hier_rule};
use crate::tree::{ConfigNode, ConfigTree};
use proptest::prelude::*;
use std::collections::BTreeSet;
use stigaudit_types::Verdict;

// ============================================================================
// Strategies
// ============================================================================

fn arb_statement() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("interface GigabitEthernet0/1"),
        Just("interface Loopback0"),
        Just("ip address 10.0.0.1 255.255.255.0"),
        Just("no ip proxy-arp"),
        Just("shutdown"),
        Just("description uplink"),
        Just("service password-encryption"),
        Just("logging buffered 16384"),
    ]
}

/// Configuration text with arbitrary nesting (indentation 0-3 levels).
fn arb_config() -> impl Strategy<Value = String> {
    prop::collection::vec((0usize..4, arb_statement()), 0..40).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(depth, stmt)| format!("{}{}", " ".repeat(depth), stmt))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn arb_pattern() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("^interface"),
        Just("ip address"),
        Just("proxy-arp"),
        Just("shutdown"),
        Just("^service"),
        Just("description"),
    ]
}

fn lines(nodes: &[ConfigNode]) -> BTreeSet<u32> {
    nodes.iter().map(|n| n.line).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn global_classifies_every_match_exactly_once(
        config in arb_config(),
        pattern in arb_pattern(),
        expected in 0u32..5,
    ) {
        let tree = MemTree::parse(&config);
        let rule = global_rule("V-P1", pattern, expected);
        let outcome = evaluate(&tree, &rule).expect("evaluate");

        let re = Pattern::new(pattern).compile().expect("compile");
        let matched = tree.find_all(&re);

        prop_assert_eq!(outcome.classified.len(), matched.len());
        prop_assert!(outcome.classified.na.is_empty());
        prop_assert_ne!(outcome.verdict, Verdict::NotApplicable);
        prop_assert_eq!(outcome.verdict == Verdict::Pass, matched.len() == expected as usize);
    }

    #[test]
    fn hierarchical_partitions_candidate_parents(
        config in arb_config(),
        parent in arb_pattern(),
        when in prop::option::of(arb_pattern()),
        child in arb_pattern(),
        expected in 0u32..3,
    ) {
        let tree = MemTree::parse(&config);
        let rule = hier_rule("V-P2", parent, when, child, expected);
        let outcome = evaluate(&tree, &rule).expect("evaluate");
        let c = &outcome.classified;

        let pass = lines(&c.pass);
        let fail = lines(&c.fail);
        let na = lines(&c.na);
        prop_assert!(pass.is_disjoint(&fail));
        prop_assert!(pass.is_disjoint(&na));
        prop_assert!(fail.is_disjoint(&na));

        let re = Pattern::new(parent).compile().expect("compile");
        let candidates = lines(&tree.find_all(&re));
        let union: BTreeSet<u32> = pass.union(&fail).chain(na.iter()).copied().collect();
        prop_assert_eq!(union, candidates);
        prop_assert_eq!(c.len(), c.pass.len() + c.fail.len() + c.na.len());

        if when.is_none() {
            prop_assert!(c.na.is_empty());
        }
    }

    #[test]
    fn hierarchical_verdict_laws(
        config in arb_config(),
        parent in arb_pattern(),
        when in prop::option::of(arb_pattern()),
        child in arb_pattern(),
        expected in 0u32..3,
    ) {
        let tree = MemTree::parse(&config);
        let rule = hier_rule("V-P3", parent, when, child, expected);
        let outcome = evaluate(&tree, &rule).expect("evaluate");
        let c = &outcome.classified;

        // Fail dominance.
        if !c.fail.is_empty() {
            prop_assert_eq!(outcome.verdict, Verdict::Fail);
        }
        // Not-applicable law (both directions).
        let na_law = c.fail.is_empty() && !c.na.is_empty() && c.pass.is_empty();
        prop_assert_eq!(outcome.verdict == Verdict::NotApplicable, na_law);
        // Vacuous pass.
        if c.is_empty() {
            prop_assert_eq!(outcome.verdict, Verdict::Pass);
        }
    }

    #[test]
    fn no_candidates_is_vacuous_pass(config in arb_config(), child in arb_pattern()) {
        let tree = MemTree::parse(&config);
        let rule = hier_rule("V-P4", "^router ospf", Some("network"), child, 1);
        let outcome = evaluate(&tree, &rule).expect("evaluate");

        prop_assert_eq!(outcome.verdict, Verdict::Pass);
        prop_assert!(outcome.classified.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent(
        config in arb_config(),
        parent in arb_pattern(),
        when in prop::option::of(arb_pattern()),
        child in arb_pattern(),
        expected in 0u32..3,
    ) {
        let tree = MemTree::parse(&config);
        let rule = hier_rule("V-P5", parent, when, child, expected);

        let first = evaluate(&tree, &rule).expect("evaluate");
        let second = evaluate(&tree, &rule).expect("evaluate");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fail_count_is_independent_of_record_order(
        config in arb_config(),
        specs in prop::collection::vec((arb_pattern(), 0u32..3), 1..12),
    ) {
        let tree = MemTree::parse(&config);
        let rules: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, (p, n))| global_rule(&format!("V-{i:03}"), p, *n))
            .collect();

        let mut forward = Aggregator::new();
        for rule in &rules {
            forward.record(rule.clone(), evaluate(&tree, rule).expect("evaluate"));
        }
        let mut backward = Aggregator::new();
        for rule in rules.iter().rev() {
            backward.record(rule.clone(), evaluate(&tree, rule).expect("evaluate"));
        }

        prop_assert_eq!(forward.finalize(), backward.finalize());
    }
}
