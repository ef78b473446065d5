use crate::error::EvalError;
use crate::model::{Check, Pattern, Rule, When};
use crate::outcome::{Classified, RuleOutcome};
use crate::tree::ConfigTree;
use stigaudit_types::Verdict;

/// Evaluate one rule against a configuration tree.
///
/// All patterns are compiled before any search, so a malformed rule fails without partial work.
pub fn evaluate<T: ConfigTree + ?Sized>(tree: &T, rule: &Rule) -> Result<RuleOutcome, EvalError> {
    match &rule.check {
        Check::Global {
            pattern,
            expected_count,
        } => evaluate_global(tree, pattern, *expected_count),
        Check::Hierarchical {
            parent,
            when,
            child,
            expected_count,
        } => evaluate_hierarchical(tree, parent, when, child, *expected_count),
    }
}

fn evaluate_global<T: ConfigTree + ?Sized>(
    tree: &T,
    pattern: &Pattern,
    expected_count: u32,
) -> Result<RuleOutcome, EvalError> {
    let re = pattern.compile()?;
    let matches = tree.find_all(&re);

    let mut classified = Classified::default();
    let verdict = if count_matches(matches.len(), expected_count) {
        classified.pass = matches;
        Verdict::Pass
    } else {
        classified.fail = matches;
        Verdict::Fail
    };

    Ok(RuleOutcome {
        verdict,
        classified,
    })
}

fn evaluate_hierarchical<T: ConfigTree + ?Sized>(
    tree: &T,
    parent: &Pattern,
    when: &When,
    child: &Pattern,
    expected_count: u32,
) -> Result<RuleOutcome, EvalError> {
    let parent_re = parent.compile()?;
    let when_re = match when {
        When::Always => None,
        When::Matches(p) => Some(p.compile()?),
    };
    let child_re = child.compile()?;

    let mut classified = Classified::default();

    for candidate in tree.find_all(&parent_re) {
        let applicable = match &when_re {
            None => true,
            Some(re) => !tree.search_descendants(&candidate, re)?.is_empty(),
        };
        if !applicable {
            classified.na.push(candidate);
            continue;
        }

        let found = tree.search_descendants(&candidate, &child_re)?.len();
        if count_matches(found, expected_count) {
            classified.pass.push(candidate);
        } else {
            classified.fail.push(candidate);
        }
    }

    Ok(RuleOutcome {
        verdict: hierarchical_verdict(&classified),
        classified,
    })
}

/// Fail dominates; N/A only when nothing passed; otherwise pass (including no candidates).
fn hierarchical_verdict(classified: &Classified) -> Verdict {
    if !classified.fail.is_empty() {
        Verdict::Fail
    } else if !classified.na.is_empty() && classified.pass.is_empty() {
        Verdict::NotApplicable
    } else {
        Verdict::Pass
    }
}

fn count_matches(found: usize, expected: u32) -> bool {
    u32::try_from(found).is_ok_and(|n| n == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pattern;
    use crate::test_support::{MemTree, global_rule, hier_rule};
    use crate::tree::{ConfigNode, TreeError};
    use regex::Regex;

    const ROUTER: &str = "\
hostname edge-1
service password-encryption
service timestamps log datetime
interface GigabitEthernet0/0
 ip address 10.0.0.1 255.255.255.0
 no ip proxy-arp
interface GigabitEthernet0/1
 ip address 10.0.1.1 255.255.255.0
interface GigabitEthernet0/2
 shutdown
";

    #[test]
    fn global_pass_when_count_matches() {
        let tree = MemTree::parse(ROUTER);
        let rule = global_rule("V-1", "^service ", 2);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
        assert_eq!(outcome.classified.pass.len(), 2);
        assert!(outcome.classified.fail.is_empty());
        assert!(outcome.classified.na.is_empty());
    }

    #[test]
    fn global_fail_puts_every_match_in_fail() {
        let tree = MemTree::parse(ROUTER);
        let rule = global_rule("V-2", "^interface ", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Fail);
        assert_eq!(outcome.classified.fail.len(), 3);
        assert!(outcome.classified.pass.is_empty());
        assert!(outcome.classified.na.is_empty());
    }

    #[test]
    fn global_zero_expected_with_zero_matches_passes() {
        let tree = MemTree::parse(ROUTER);
        let rule = global_rule("V-3", "^ip http server", 0);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
        assert!(outcome.classified.is_empty());
    }

    #[test]
    fn hierarchical_all_not_applicable() {
        let tree = MemTree::parse(
            "\
interface Loopback0
 description mgmt
interface Loopback1
 shutdown
",
        );
        let rule = hier_rule("V-4", "^interface", Some(r"ip\s+address"), "no ip proxy-arp", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::NotApplicable);
        assert_eq!(outcome.classified.na.len(), 2);
        assert!(outcome.classified.pass.is_empty());
        assert!(outcome.classified.fail.is_empty());
    }

    #[test]
    fn hierarchical_mixed_fail_dominates() {
        let tree = MemTree::parse(ROUTER);
        let rule = hier_rule("V-5", "^interface", Some(r"ip\s+address"), "no ip proxy-arp", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Fail);
        assert_eq!(outcome.classified.pass.len(), 1);
        assert_eq!(outcome.classified.fail.len(), 1);
        assert_eq!(outcome.classified.na.len(), 1);
        assert_eq!(outcome.classified.pass[0].text, "interface GigabitEthernet0/0");
        assert_eq!(outcome.classified.fail[0].text, "interface GigabitEthernet0/1");
        assert_eq!(outcome.classified.na[0].text, "interface GigabitEthernet0/2");
    }

    #[test]
    fn hierarchical_pass_and_na_without_fail_is_pass() {
        let tree = MemTree::parse(
            "\
interface Gi0/0
 ip address 10.0.0.1 255.255.255.0
 no ip proxy-arp
interface Gi0/1
 shutdown
",
        );
        let rule = hier_rule("V-6", "^interface", Some(r"ip\s+address"), "no ip proxy-arp", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
        assert_eq!(outcome.classified.pass.len(), 1);
        assert_eq!(outcome.classified.na.len(), 1);
    }

    #[test]
    fn hierarchical_without_candidates_is_vacuous_pass() {
        let tree = MemTree::parse(ROUTER);
        let rule = hier_rule("V-7", "^line vty", None, "transport input ssh", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
        assert!(outcome.classified.is_empty());
    }

    #[test]
    fn hierarchical_searches_descendants_at_any_depth() {
        let tree = MemTree::parse(
            "\
router bgp 65000
 address-family ipv4
  neighbor 10.0.0.2 password 7 0822455D0A16
",
        );
        let rule = hier_rule("V-8", "^router bgp", None, "neighbor .* password", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
    }

    #[test]
    fn hierarchical_child_search_stays_inside_subtree() {
        let tree = MemTree::parse(
            "\
line con 0
 exec-timeout 10 0
line vty 0 4
 transport input telnet
",
        );
        let rule = hier_rule("V-9", "^line con", None, "exec-timeout|transport", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
        assert_eq!(outcome.classified.pass.len(), 1);
    }

    #[test]
    fn when_and_child_searches_are_independent() {
        let tree = MemTree::parse(
            "\
interface Gi0/0
 ip address 10.0.0.1 255.255.255.0
",
        );
        // The same child line satisfies both the gate and the count.
        let rule = hier_rule("V-10", "^interface", Some("ip address"), "ip address", 1);

        let outcome = evaluate(&tree, &rule).expect("evaluate");
        assert_eq!(outcome.verdict, Verdict::Pass);
    }

    #[test]
    fn malformed_pattern_is_reported_not_panicked() {
        let tree = MemTree::parse(ROUTER);
        let mut rule = hier_rule("V-11", "^interface", None, "ok", 1);
        if let Check::Hierarchical { child, .. } = &mut rule.check {
            *child = Pattern::new("[unterminated");
        }

        let err = evaluate(&tree, &rule).expect_err("malformed");
        match err {
            EvalError::MalformedPattern { pattern, .. } => assert_eq!(pattern, "[unterminated"),
            other => panic!("unexpected error: {other}"),
        }
    }

    struct ForeignTree;

    impl ConfigTree for ForeignTree {
        fn find_all(&self, _pattern: &Regex) -> Vec<ConfigNode> {
            vec![ConfigNode::new(99, "interface Ghost0")]
        }

        fn search_descendants(
            &self,
            node: &ConfigNode,
            _pattern: &Regex,
        ) -> Result<Vec<ConfigNode>, TreeError> {
            Err(TreeError::UnknownLine { line: node.line })
        }
    }

    #[test]
    fn invalid_tree_handle_is_reported() {
        let rule = hier_rule("V-12", "^interface", None, "x", 1);
        let err = evaluate(&ForeignTree, &rule).expect_err("invalid tree");
        assert!(matches!(
            err,
            EvalError::InvalidTree(TreeError::UnknownLine { line: 99 })
        ));
    }
}
