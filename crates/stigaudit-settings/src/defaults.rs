use crate::resolve::EffectiveSettings;
use stigaudit_domain::ExitPolicy;
use stigaudit_types::{Verbosity, ids};

pub fn defaults() -> EffectiveSettings {
    EffectiveSettings {
        rules_dir: ids::DEFAULT_RULES_DIR.to_string(),
        os_type: None,
        stigs: Vec::new(),
        verbosity: Verbosity::Brief,
        fail_only: false,
        exit_policy: ExitPolicy::Saturate,
        rule_globs: vec![ids::DEFAULT_RULE_GLOB.to_string()],
        log_file: ids::DEFAULT_LOG_FILE.to_string(),
        parallel: false,
    }
}
