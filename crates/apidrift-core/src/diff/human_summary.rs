//! Human-readable summary renderer for schema diffs.

use crate::diff::model::DiffReport;
use crate::endpoints::{EndpointChanges, EndpointRef};

fn render_field_sections(out: &mut String, report: &DiffReport) {
    if !report.added.is_empty() {
        out.push_str(&format!("### Added Fields ({})\n\n", report.added.len()));
        for (path, tag) in &report.added {
            out.push_str(&format!("- `{}`: {}\n", path, tag));
        }
        out.push('\n');
    }

    if !report.removed.is_empty() {
        out.push_str(&format!("### Removed Fields ({})\n\n", report.removed.len()));
        for (path, tag) in &report.removed {
            out.push_str(&format!("- `{}`: {}\n", path, tag));
        }
        out.push('\n');
    }

    if !report.changed.is_empty() {
        out.push_str(&format!("### Type Changes ({})\n\n", report.changed.len()));
        for (path, change) in &report.changed {
            out.push_str(&format!(
                "- `{}`: {} → {}\n",
                path, change.old_type, change.new_type
            ));
        }
        out.push('\n');
    }
}

/// Render a Markdown summary of a [`DiffReport`].
///
/// Informational only; the structured report is the source of truth.
pub fn render_human_summary(report: &DiffReport) -> String {
    let mut out = String::new();
    out.push_str("## Schema Diff\n\n");

    let counts = report.counts();
    out.push_str(&format!(
        "**Added**: {}  \n**Removed**: {}  \n**Changed**: {}\n\n",
        counts.added, counts.removed, counts.changed
    ));

    if report.is_empty() {
        out.push_str("_No schema changes detected._\n");
        return out;
    }

    render_field_sections(&mut out, report);
    out
}

fn endpoint_list(out: &mut String, title: &str, endpoints: &[EndpointRef]) {
    if endpoints.is_empty() {
        return;
    }
    out.push_str(&format!("- **{}** ({}): ", title, endpoints.len()));
    let names: Vec<String> = endpoints.iter().map(|e| format!("`{}`", e)).collect();
    out.push_str(&names.join(", "));
    out.push('\n');
}

/// Render a Markdown summary of an endpoint snapshot comparison.
pub fn render_endpoint_summary(changes: &EndpointChanges) -> String {
    let mut out = String::new();
    out.push_str("## Endpoint Diff\n\n");

    let summary = &changes.diff_summary;
    out.push_str(&format!(
        "| | Added | Removed | Modified/Changed |\n\
         |---|---|---|---|\n\
         | Endpoints | {} | {} | {} |\n\
         | Fields | {} | {} | {} |\n\n",
        summary.endpoint_changes.added,
        summary.endpoint_changes.removed,
        summary.endpoint_changes.modified,
        summary.field_changes.added,
        summary.field_changes.removed,
        summary.field_changes.changed,
    ));

    if changes.is_empty() {
        out.push_str("_No endpoint changes detected._\n");
        return out;
    }

    out.push_str("### Endpoints\n\n");
    endpoint_list(&mut out, "Added", &changes.added_endpoints);
    endpoint_list(&mut out, "Removed", &changes.removed_endpoints);
    endpoint_list(&mut out, "Modified", &changes.modified_endpoints);
    out.push('\n');

    render_field_sections(&mut out, &changes.field_changes);
    out
}
