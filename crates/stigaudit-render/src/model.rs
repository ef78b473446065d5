use stigaudit_types::Verdict;

/// One evaluated rule, flattened for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableOutcome {
    pub id: String,
    pub severity: String,
    pub description: String,
    pub verdict: Verdict,
    /// Node texts, in document order.
    pub pass: Vec<String>,
    pub fail: Vec<String>,
    pub na: Vec<String>,
}

impl RenderableOutcome {
    /// The classification groups in display order.
    pub fn groups(&self) -> [(&'static str, &[String]); 3] {
        [
            ("pass", self.pass.as_slice()),
            ("fail", self.fail.as_slice()),
            ("na", self.na.as_slice()),
        ]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub pass: u32,
    pub fail: u32,
    pub not_applicable: u32,
    pub errors: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableError {
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRun {
    pub config_file: String,
    pub os_type: String,
    pub stigs: Vec<String>,
    pub verdict: Verdict,
    pub counts: RenderableCounts,
    pub exit_status: u8,
    pub outcomes: Vec<RenderableOutcome>,
    pub errors: Vec<RenderableError>,
}
