use crate::fields::{Field, extract};
use crate::types::Issue;

// ---------------------------------------------------------------------------
// Free-text issue filter
// ---------------------------------------------------------------------------

/// Filter issues by case-insensitive substring match on any displayed
/// field's extracted value. Returns indices of matching issues in input
/// order. An empty or whitespace-only term matches everything.
pub fn filter_issues(issues: &[Issue], fields: &[Field], term: &str) -> Vec<usize> {
    if term.trim().is_empty() {
        return (0..issues.len()).collect();
    }
    let lower = term.to_lowercase();
    issues
        .iter()
        .enumerate()
        .filter(|(_, issue)| {
            fields
                .iter()
                .any(|field| extract(issue, field).to_lowercase().contains(&lower))
        })
        .map(|(i, _)| i)
        .collect()
}
