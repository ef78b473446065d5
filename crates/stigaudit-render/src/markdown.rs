use crate::RenderableRun;
use stigaudit_types::Verdict;

pub fn render_markdown(run: &RenderableRun) -> String {
    let mut out = String::new();

    out.push_str("# STIG audit report\n\n");
    out.push_str(&format!(
        "- Config: `{}`\n- Platform: `{}`\n- Audits: {}\n",
        run.config_file,
        run.os_type,
        if run.stigs.is_empty() {
            "(none)".to_string()
        } else {
            run.stigs.join(", ")
        }
    ));
    out.push_str(&format!(
        "- Verdict: **{}**\n- Rules: {} pass / {} fail / {} n/a\n- Exit status: {}\n\n",
        run.verdict.label(),
        run.counts.pass,
        run.counts.fail,
        run.counts.not_applicable,
        run.exit_status
    ));

    if run.outcomes.is_empty() {
        out.push_str("No applicable rules.\n");
    } else {
        out.push_str("## Rules\n\n");
        out.push_str("| Rule | Severity | Verdict | Description |\n");
        out.push_str("|---|---|---|---|\n");
        for o in &run.outcomes {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                o.id,
                o.severity,
                o.verdict.label(),
                escape_cell(&o.description)
            ));
        }

        let failing: Vec<_> = run
            .outcomes
            .iter()
            .filter(|o| o.verdict == Verdict::Fail && !o.fail.is_empty())
            .collect();
        if !failing.is_empty() {
            out.push_str("\n## Failing elements\n\n");
            for o in failing {
                out.push_str(&format!("- `{}`\n", o.id));
                for text in &o.fail {
                    out.push_str(&format!("  - `{}`\n", text.trim()));
                }
            }
        }
    }

    if !run.errors.is_empty() {
        out.push_str(&format!("\n## Errors ({})\n\n", run.counts.errors));
        for e in &run.errors {
            out.push_str(&format!("- `{}`: {}\n", e.subject, e.message));
        }
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
