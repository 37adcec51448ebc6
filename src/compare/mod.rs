//! Comparison of two parsed Lighthouse reports.
//!
//! Walks report A's categories in sorted id order, matches them against
//! report B by id, and emits one [`DiffRow`] per score difference — a
//! category row first, then one nested row per differing audit in the
//! category's stored `auditRefs` order. Identical scores and ids missing
//! from either side produce nothing.

use colored::Colorize;

use crate::parser::Report;

/// Whether a diff row describes a category or one of its audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLevel {
    Category,
    Audit,
}

/// One line of a comparison.
///
/// Carries the raw title and scores; every rendered form (plain, colored,
/// markdown) is derived from these fields so the three can never disagree.
#[derive(Debug, Clone)]
pub struct DiffRow {
    pub level: DiffLevel,
    pub title: String,
    pub score_a: f64,
    pub score_b: f64,
}

impl DiffRow {
    /// Score delta in percentage points.
    pub fn delta(&self) -> f64 {
        (self.score_b - self.score_a) * 100.0
    }

    /// Row label: audit titles are indented under their category.
    pub fn label(&self) -> String {
        match self.level {
            DiffLevel::Category => self.title.clone(),
            DiffLevel::Audit => format!("- {}", self.title),
        }
    }

    /// Label for markdown output; category titles are emphasized.
    pub fn label_markdown(&self) -> String {
        match self.level {
            DiffLevel::Category => format!("**{}**", self.title),
            DiffLevel::Audit => format!("- {}", self.title),
        }
    }

    pub fn score_a_percent(&self) -> String {
        format!("{:.0}", self.score_a * 100.0)
    }

    pub fn score_b_percent(&self) -> String {
        format!("{:.0}", self.score_b * 100.0)
    }

    /// Delta without decoration: `+15` for gains, `-15` for losses.
    pub fn delta_plain(&self) -> String {
        let delta = format!("{:.0}", self.delta());
        if delta.starts_with('-') {
            delta
        } else {
            format!("+{}", delta)
        }
    }

    /// Delta with ANSI color for terminal tables.
    pub fn delta_colored(&self) -> String {
        let plain = self.delta_plain();
        if self.is_regression() {
            plain.red().to_string()
        } else {
            plain.green().to_string()
        }
    }

    /// Delta with emoji markers for markdown comments.
    pub fn delta_markdown(&self) -> String {
        let plain = self.delta_plain();
        if self.is_regression() {
            format!("❌  {}", plain)
        } else {
            format!("✅  {}", plain)
        }
    }

    fn is_regression(&self) -> bool {
        self.delta_plain().starts_with('-')
    }
}

/// Compute the ordered list of score differences between two reports.
///
/// No differences is a valid, empty result.
pub fn diff_reports(report_a: &Report, report_b: &Report) -> Vec<DiffRow> {
    let mut rows = Vec::new();

    for (cat_id, cat_a) in &report_a.categories {
        let Some(cat_b) = report_b.categories.get(cat_id) else {
            continue;
        };
        if cat_a.score_or_zero() == cat_b.score_or_zero() {
            continue;
        }

        rows.push(DiffRow {
            level: DiffLevel::Category,
            title: cat_a.title.clone(),
            score_a: cat_a.score_or_zero(),
            score_b: cat_b.score_or_zero(),
        });

        for audit_ref in &cat_a.audit_refs {
            let Some(audit_a) = report_a.audit(&audit_ref.id) else {
                continue;
            };
            let Some(audit_b) = report_b.audit(&audit_ref.id) else {
                continue;
            };
            if audit_a.score_or_zero() == audit_b.score_or_zero() {
                continue;
            }

            rows.push(DiffRow {
                level: DiffLevel::Audit,
                title: audit_a.title.clone(),
                score_a: audit_a.score_or_zero(),
                score_b: audit_b.score_or_zero(),
            });
        }
    }

    rows
}
