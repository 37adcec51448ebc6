//! Table rendering for comparisons and single-report views.

use crate::compare::DiffRow;
use crate::parser::Report;

/// The pair of labels naming the two compared reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub a: String,
    pub b: String,
}

impl Labels {
    /// Fill missing labels: none supplied means "A"/"B", one supplied gets
    /// "B" as its counterpart. Anything past the first two is ignored.
    pub fn resolve(supplied: &[String]) -> Self {
        Labels {
            a: supplied.first().cloned().unwrap_or_else(|| "A".to_string()),
            b: supplied.get(1).cloned().unwrap_or_else(|| "B".to_string()),
        }
    }
}

/// Render the comparison as an aligned 4-column terminal table with a
/// color-coded delta column. Cell text is never wrapped.
pub fn comparison_table(rows: &[DiffRow], labels: &Labels) -> String {
    let header = ["", labels.a.as_str(), labels.b.as_str(), "Delta"];
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.label(),
                row.score_a_percent(),
                row.score_b_percent(),
                row.delta_plain(),
            ]
        })
        .collect();

    let mut widths = [
        header[0].chars().count(),
        header[1].chars().count(),
        header[2].chars().count(),
        header[3].chars().count(),
    ];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<lw$}  {:>aw$}  {:>bw$}  {:>dw$}\n",
        header[0],
        header[1],
        header[2],
        header[3],
        lw = widths[0],
        aw = widths[1],
        bw = widths[2],
        dw = widths[3],
    ));
    out.push_str(&format!(
        "  {}\n",
        "─".repeat(widths.iter().sum::<usize>() + 6)
    ));

    for (row, cell) in rows.iter().zip(&cells) {
        // The colored delta carries ANSI escapes, so pad by the plain width.
        let pad = widths[3].saturating_sub(cell[3].chars().count());
        out.push_str(&format!(
            "  {:<lw$}  {:>aw$}  {:>bw$}  {}{}\n",
            cell[0],
            cell[1],
            cell[2],
            " ".repeat(pad),
            row.delta_colored(),
            lw = widths[0],
            aw = widths[1],
            bw = widths[2],
        ));
    }

    out
}

/// Render the comparison as a pipe-delimited markdown table suitable for a
/// GitHub comment body.
pub fn comparison_markdown(rows: &[DiffRow], labels: &Labels) -> String {
    let mut out = String::new();
    out.push_str(&format!("|  | {} | {} | Delta |\n", labels.a, labels.b));
    out.push_str("|---|---|---|---|\n");

    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.label_markdown(),
            row.score_a_percent(),
            row.score_b_percent(),
            row.delta_markdown(),
        ));
    }

    out
}

/// One-line message for the empty-diff case. Only produced when both
/// labels are non-empty.
pub fn no_difference_message(labels: &Labels) -> Option<String> {
    if labels.a.is_empty() || labels.b.is_empty() {
        return None;
    }
    Some(format!(
        "The comparison of Lighthouse reports between `{}` and `{}` showed no difference.",
        labels.a, labels.b
    ))
}

/// Render one report as a Metric/Score/Weight table, categories first with
/// their audits nested underneath in `auditRefs` order.
///
/// With `omit_done` set, audits rendering a score of exactly "100" are
/// hidden. Audit ids a category references but the report does not carry
/// are skipped.
pub fn view_table(report: &Report, omit_done: bool) -> String {
    let header = ["Metric", "Score", "Weight"];
    let mut cells: Vec<[String; 3]> = Vec::new();

    for category in report.categories.values() {
        cells.push([
            category.title.clone(),
            format!("{:.0}", category.score_or_zero() * 100.0),
            String::new(),
        ]);

        for audit_ref in &category.audit_refs {
            let Some(audit) = report.audit(&audit_ref.id) else {
                continue;
            };

            let score = format!("{:.0}", audit.score_or_zero() * 100.0);
            if omit_done && score == "100" {
                continue;
            }

            cells.push([
                format!("- {}", audit.title),
                score,
                audit_ref.weight.to_string(),
            ]);
        }
    }

    let mut widths = [
        header[0].chars().count(),
        header[1].chars().count(),
        header[2].chars().count(),
    ];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<mw$}  {:>sw$}  {:>ww$}\n",
        header[0],
        header[1],
        header[2],
        mw = widths[0],
        sw = widths[1],
        ww = widths[2],
    ));
    out.push_str(&format!(
        "  {}\n",
        "─".repeat(widths.iter().sum::<usize>() + 4)
    ));
    for row in &cells {
        out.push_str(&format!(
            "  {:<mw$}  {:>sw$}  {:>ww$}\n",
            row[0],
            row[1],
            row[2],
            mw = widths[0],
            sw = widths[1],
            ww = widths[2],
        ));
    }

    out
}
