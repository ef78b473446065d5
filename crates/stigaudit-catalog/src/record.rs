use serde::Deserialize;
use stigaudit_domain::{Check, EvalError, Pattern, Rule, RuleId, When};

/// One rule as stored on disk (`<rules_dir>/<os_type>/<id>.yml`).
#[derive(Clone, Debug, Deserialize)]
struct RuleRecordV1 {
    severity: String,
    #[serde(alias = "desc")]
    description: String,
    #[serde(default)]
    part_of_stig: Vec<String>,
    check: CheckRecord,
}

#[derive(Clone, Debug, Deserialize)]
struct CheckRecord {
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    when: Option<WhenRecord>,
    text: String,
    text_cnt: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum WhenRecord {
    Flag(bool),
    Pattern(String),
}

/// A rule record that could not be turned into a [`Rule`].
#[derive(Debug, thiserror::Error)]
pub enum RuleLoadError {
    #[error("read rule file: {0}")]
    Read(#[from] std::io::Error),

    #[error("decode rule {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("rule {id}: `when: false` disables the check; remove the rule from the catalog instead")]
    WhenFalse { id: String },

    #[error("rule {id}: {source}")]
    Pattern {
        id: String,
        #[source]
        source: EvalError,
    },
}

/// Decode one YAML rule record.
///
/// A non-empty `check.parent` selects the hierarchical check; otherwise the check is global
/// and `check.when` is ignored. Every pattern is compiled before the rule is returned.
pub fn parse_rule_record(id: RuleId, text: &str) -> Result<Rule, RuleLoadError> {
    let record: RuleRecordV1 =
        serde_yaml::from_str(text).map_err(|source| RuleLoadError::Decode {
            id: id.to_string(),
            source,
        })?;

    let CheckRecord {
        parent,
        when,
        text,
        text_cnt,
    } = record.check;

    let check = match parent.filter(|p| !p.is_empty()) {
        None => Check::Global {
            pattern: Pattern::new(text),
            expected_count: text_cnt,
        },
        Some(parent) => {
            let when = match when {
                None | Some(WhenRecord::Flag(true)) => When::Always,
                Some(WhenRecord::Flag(false)) => {
                    return Err(RuleLoadError::WhenFalse { id: id.to_string() });
                }
                Some(WhenRecord::Pattern(p)) => When::Matches(Pattern::new(p)),
            };
            Check::Hierarchical {
                parent: Pattern::new(parent),
                when,
                child: Pattern::new(text),
                expected_count: text_cnt,
            }
        }
    };

    let rule = Rule {
        id,
        severity: record.severity,
        description: record.description,
        applicability_tags: record.part_of_stig.into_iter().collect(),
        check,
    };
    rule.validate().map_err(|source| RuleLoadError::Pattern {
        id: rule.id.to_string(),
        source,
    })?;

    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Rule, RuleLoadError> {
        parse_rule_record(RuleId::new("V-1"), text)
    }

    #[test]
    fn global_record_without_parent() {
        let rule = parse(
            r#"
severity: high
desc: The device must encrypt passwords.
part_of_stig: [IOS-NDM]
check:
  text: ^service password-encryption
  text_cnt: 1
"#,
        )
        .expect("parse");

        assert_eq!(rule.description, "The device must encrypt passwords.");
        assert!(rule.applicability_tags.contains("IOS-NDM"));
        assert_eq!(
            rule.check,
            Check::Global {
                pattern: Pattern::new("^service password-encryption"),
                expected_count: 1,
            }
        );
    }

    #[test]
    fn global_record_ignores_when() {
        let rule = parse(
            r#"
severity: low
description: x
check:
  when: false
  text: foo
  text_cnt: 0
"#,
        )
        .expect("parse");
        assert!(matches!(rule.check, Check::Global { .. }));
        assert!(rule.applicability_tags.is_empty());
    }

    #[test]
    fn empty_parent_selects_global() {
        let rule = parse(
            r#"
severity: low
description: x
check:
  parent: ""
  text: foo
  text_cnt: 0
"#,
        )
        .expect("parse");
        assert!(matches!(rule.check, Check::Global { .. }));
    }

    #[test]
    fn hierarchical_record_with_when_pattern() {
        let rule = parse(
            r#"
severity: medium
description: Proxy ARP must be disabled on interfaces with an address.
part_of_stig: [IOS-RTR, IOS-L2S]
check:
  parent: ^interface
  when: ip\s+address
  text: no ip proxy-arp
  text_cnt: 1
"#,
        )
        .expect("parse");

        assert_eq!(
            rule.check,
            Check::Hierarchical {
                parent: Pattern::new("^interface"),
                when: When::Matches(Pattern::new(r"ip\s+address")),
                child: Pattern::new("no ip proxy-arp"),
                expected_count: 1,
            }
        );
        assert_eq!(rule.applicability_tags.len(), 2);
    }

    #[test]
    fn hierarchical_when_true_or_missing_is_always() {
        for when in ["  when: true\n", ""] {
            let text = format!(
                "severity: low\ndescription: x\ncheck:\n  parent: ^line vty\n{when}  text: exec-timeout\n  text_cnt: 1\n"
            );
            let rule = parse(&text).expect("parse");
            match rule.check {
                Check::Hierarchical { when, .. } => assert_eq!(when, When::Always),
                other => panic!("unexpected check: {other:?}"),
            }
        }
    }

    #[test]
    fn hierarchical_when_false_is_rejected() {
        let err = parse(
            r#"
severity: low
description: x
check:
  parent: ^line vty
  when: false
  text: exec-timeout
  text_cnt: 1
"#,
        )
        .expect_err("when false");
        assert!(matches!(err, RuleLoadError::WhenFalse { .. }));
    }

    #[test]
    fn negative_count_is_decode_error() {
        let err = parse(
            r#"
severity: low
description: x
check:
  text: foo
  text_cnt: -1
"#,
        )
        .expect_err("negative");
        assert!(matches!(err, RuleLoadError::Decode { .. }));
    }

    #[test]
    fn missing_check_is_decode_error() {
        let err = parse("severity: low\ndescription: x\n").expect_err("missing check");
        assert!(err.to_string().starts_with("decode rule V-1"));
    }

    #[test]
    fn malformed_pattern_is_rejected_at_load() {
        let err = parse(
            r#"
severity: low
description: x
check:
  parent: ^interface
  when: "(ip"
  text: foo
  text_cnt: 1
"#,
        )
        .expect_err("bad regex");
        assert!(matches!(
            err,
            RuleLoadError::Pattern {
                source: EvalError::MalformedPattern { .. },
                ..
            }
        ));
    }
}
