//! In-band markers: comment lines such as `!@#stig:IOS-NDM` and `!@#type:ios`
//! that let a configuration name its own platform and audits.

use crate::ConfTree;
use regex::Regex;
use stigaudit_domain::ConfigTree;
use stigaudit_types::ids;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markers {
    /// Every `!@#stig:` value, in document order, without duplicates.
    pub stigs: Vec<String>,
    /// The first `!@#type:` value.
    pub os_type: Option<String>,
}

pub fn discover_markers(tree: &ConfTree) -> Markers {
    let mut stigs: Vec<String> = Vec::new();
    for value in marker_values(tree, ids::MARKER_STIG_PATTERN, ids::MARKER_STIG) {
        if !stigs.contains(&value) {
            stigs.push(value);
        }
    }

    let os_type = marker_values(tree, ids::MARKER_TYPE_PATTERN, ids::MARKER_TYPE)
        .into_iter()
        .next();

    Markers { stigs, os_type }
}

fn marker_values(tree: &ConfTree, pattern: &str, prefix: &str) -> Vec<String> {
    let Ok(re) = Regex::new(pattern) else {
        return Vec::new();
    };
    tree.find_all(&re)
        .iter()
        .filter_map(|node| re.find(&node.text))
        .filter_map(|m| m.as_str().strip_prefix(prefix))
        .filter_map(|rest| rest.split(':').next())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
