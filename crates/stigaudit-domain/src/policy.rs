use stigaudit_types::ids::EXIT_FAIL_COUNT_MAX;

/// Mapping from a run's fail count to the process exit status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Clamp at [`EXIT_FAIL_COUNT_MAX`]; the status above it is reserved for fatal errors.
    #[default]
    Saturate,
    /// Legacy behavior: the fail count modulo 256, as truncated by the host.
    /// A run with exactly 256 failures exits 0, and 255 failures exit with the same status as
    /// a fatal error (`EXIT_FATAL`).
    Wrap,
}

impl ExitPolicy {
    pub fn exit_status(self, fail_count: u32) -> u8 {
        match self {
            ExitPolicy::Saturate => fail_count.min(u32::from(EXIT_FAIL_COUNT_MAX)) as u8,
            ExitPolicy::Wrap => (fail_count % 256) as u8,
        }
    }
}
