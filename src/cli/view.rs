use anyhow::Result;

use super::read_report;
use crate::render::view_table;

/// Print one report file as a Metric/Score/Weight table.
pub fn view(input: &str, omit_done: bool) -> Result<()> {
    let report = read_report(input)?;
    print!("{}", view_table(&report, omit_done));
    Ok(())
}
