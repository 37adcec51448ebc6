use anyhow::Result;
use colored::Colorize;

use super::read_report;
use crate::compare::diff_reports;
use crate::github::{add_comment, CommentTarget};
use crate::render::{comparison_markdown, comparison_table, no_difference_message, Labels};

/// Flags of the `compare` command, resolved into an explicit struct.
pub struct CompareOptions {
    pub inputs: Vec<String>,
    pub labels: Vec<String>,
    pub github: Option<CommentTarget>,
}

/// Diff two report files, print the result, optionally post it to GitHub.
///
/// A failed comment post is a warning only: the local table has already
/// been delivered, so the exit code stays zero.
pub fn compare(options: &CompareOptions) -> Result<()> {
    if options.inputs.len() != 2 {
        anyhow::bail!("please specify exactly two --input/-i flags");
    }

    let labels = Labels::resolve(&options.labels);
    let report_a = read_report(&options.inputs[0])?;
    let report_b = read_report(&options.inputs[1])?;

    let rows = diff_reports(&report_a, &report_b);

    if rows.is_empty() {
        if let Some(message) = no_difference_message(&labels) {
            println!("{}", message);
        }
    } else {
        print!("{}", comparison_table(&rows, &labels));
    }

    if let Some(target) = &options.github {
        let body = if rows.is_empty() {
            format!(
                "Comparison of Lighthouse reports between `{}` and `{}` showed no difference.",
                labels.a, labels.b
            )
        } else {
            format!(
                "Comparison of Lighthouse reports:\n\n{}",
                comparison_markdown(&rows, &labels)
            )
        };

        match add_comment(target, &body) {
            Ok(()) => println!(
                "{} Comment posted to {}/{}#{}",
                "✓".green(),
                target.owner,
                target.repo,
                target.issue
            ),
            Err(err) => eprintln!("{} Could not post comment: {:#}", "!".yellow(), err),
        }
    }

    Ok(())
}
