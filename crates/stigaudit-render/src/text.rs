use crate::RenderableOutcome;
use stigaudit_types::Verbosity;

const SEPARATOR: &str =
    "----------------------------------------------------------------------";

/// Joins node texts inside one classification group.
const GROUP_JOINER: char = '~';
/// Joins the three groups and the leading fields of a record row.
const FIELD_JOINER: char = ',';

/// Render one outcome at the requested verbosity. Multi-line output has no trailing newline.
pub fn render_outcome(outcome: &RenderableOutcome, verbosity: Verbosity) -> String {
    match verbosity {
        Verbosity::Brief => render_brief(outcome),
        Verbosity::Detail => render_detail(outcome),
        Verbosity::Record => render_record(outcome),
    }
}

/// `{id:<10} {description:<62} {verdict}`
pub fn render_brief(outcome: &RenderableOutcome) -> String {
    format!(
        "{:<10} {:<62} {}",
        outcome.id,
        outcome.description,
        outcome.verdict.label()
    )
}

pub fn render_detail(outcome: &RenderableOutcome) -> String {
    let mut lines: Vec<String> = vec![
        SEPARATOR.to_string(),
        format!("Vuln ID:     {}", outcome.id),
        format!("Severity:    {}", outcome.severity),
        format!("Description: {}", outcome.description),
    ];
    for (group, texts) in outcome.groups() {
        lines.push(format!("{group} objects:"));
        lines.extend(texts.iter().map(|t| format!("  - {t}")));
    }
    lines.push(format!("Success:     {}", outcome.verdict.label()));
    lines.join("\n")
}

/// One delimited row: id, severity, description, verdict, then the pass, fail and na groups.
///
/// Fields are not quoted or escaped, so a delimiter inside a field is ambiguous.
pub fn render_record(outcome: &RenderableOutcome) -> String {
    let groups: Vec<String> = outcome
        .groups()
        .iter()
        .map(|(_, texts)| texts.join(&GROUP_JOINER.to_string()))
        .collect();

    let mut row = vec![
        outcome.id.clone(),
        outcome.severity.clone(),
        outcome.description.clone(),
        outcome.verdict.label().to_string(),
    ];
    row.extend(groups);
    row.join(&FIELD_JOINER.to_string())
}
