//! Drift Reports
//!
//! Human-readable lines logged when a heal succeeds or nothing matches. The
//! structured counterpart is [`QualifiedWarning`].

use crate::resolution::DriftKind;
use crate::warning::QualifiedWarning;

pub const WARNING_BANNER: &str = "*************** mendpath warning ***************";

const NOT_FOUND_PREFIX: &str = "It appears that even the Golden Master has no element";

/// Diagnostic for a locator nothing in the expected state matches.
pub fn not_found_message(described_as: &str, queried: &str) -> String {
    format!("{} with {} '{}'.", NOT_FOUND_PREFIX, described_as, queried)
}

/// Lines logged when a heal succeeds, telling the user what changed and how
/// to update the test.
pub fn drift_report(warning: &QualifiedWarning, drift: DriftKind) -> Vec<String> {
    let site = warning
        .call_site
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "<unknown call site>".to_string());

    let mut lines = vec![
        WARNING_BANNER.to_string(),
        format!(
            "The {} used for element identification changed from '{}' to '{}'.",
            warning.attribute_label,
            warning.queried,
            warning.actual_value.as_deref().unwrap_or("null")
        ),
        "The element was identified based on the persisted Golden Master.".to_string(),
    ];

    if let Some(test) = warning.call_site.as_ref().and_then(|s| s.test.as_deref()) {
        lines.push(format!(
            "If you apply these changes to the Golden Master, your test {} will break.",
            test
        ));
    }

    match &warning.actual_value {
        Some(new_value) => lines.push(format!(
            "Use {} \"{}\" or retest id \"{}\" to update your test at {}.",
            drift.suggested_locator(),
            new_value,
            warning.retest_id,
            site
        )),
        None => lines.push(format!(
            "Use retest id \"{}\" to update your test at {}.",
            warning.retest_id, site
        )),
    }

    lines
}
