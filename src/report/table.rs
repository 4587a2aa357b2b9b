//! @ai:module:intent Terminal table of a performance report
//! @ai:module:layer infrastructure
//! @ai:module:public_api format_table, format_table_colored
//! @ai:module:stateless true

use crate::performer::{PerformanceReport, TOTAL_KEY};
use colored::Colorize;

const HEADERS: [&str; 3] = ["Test", "Acc", "Support"];

fn column_widths(rows: &[[String; 3]]) -> [usize; 3] {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn separator(widths: &[usize; 3]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ")
}

/// @ai:intent Render `[Test, Acc, Support]` rows as a plain aligned table
/// @ai:effects pure
pub fn format_table(report: &PerformanceReport) -> String {
    let rows = report.rows();
    let widths = column_widths(&rows);
    let mut output = String::new();

    output.push_str(&format!(
        "{:<w0$}  {:>w1$}  {:>w2$}\n",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    ));
    output.push_str(&separator(&widths));
    output.push('\n');

    for [test, acc, support] in &rows {
        output.push_str(&format!(
            "{:<w0$}  {:>w1$}  {:>w2$}\n",
            test,
            acc,
            support,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        ));
    }

    output
}

/// @ai:intent Same table with accuracy colored by threshold, total in bold
/// @ai:effects pure
pub fn format_table_colored(report: &PerformanceReport) -> String {
    let rows = report.rows();
    let widths = column_widths(&rows);
    let mut output = String::new();

    let header = format!(
        "{:<w0$}  {:>w1$}  {:>w2$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    output.push_str(&format!("{}\n", header.bold()));
    output.push_str(&format!("{}\n", separator(&widths).dimmed()));

    for (entry, [test, acc, support]) in report.iter().zip(&rows) {
        // Pad before coloring so escape codes do not skew the columns.
        let test = format!("{:<w$}", test, w = widths[0]);
        let acc = format!("{:>w$}", acc, w = widths[1]);
        let support = format!("{:>w$}", support, w = widths[2]);

        let test = if entry.key == TOTAL_KEY {
            test.bold()
        } else {
            test.normal()
        };
        let acc = match entry.score.accuracy {
            a if a >= 0.9 => acc.green(),
            a if a >= 0.5 => acc.yellow(),
            _ => acc.red(),
        };

        output.push_str(&format!("{}  {}  {}\n", test, acc, support.dimmed()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performer::ReportBuilder;
    use crate::types::BehaviorType;
    use pretty_assertions::assert_eq;

    fn report() -> PerformanceReport {
        let mut builder = ReportBuilder::new();
        builder.record("Cap", "A", BehaviorType::Invariance, true);
        builder.record("Cap", "B", BehaviorType::Invariance, false);
        builder.finish()
    }

    #[test]
    fn test_format_table_layout() {
        let table = format_table(&report());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[0].starts_with("Test"));
        assert!(lines[0].ends_with("Support"));
        assert_eq!(lines[2], "Total                       0.5000      1/2");
        assert!(lines.iter().any(|l| l.starts_with("Name - B")));
    }

    #[test]
    fn test_colored_table_keeps_rows() {
        colored::control::set_override(false);
        let colored = format_table_colored(&report());
        assert_eq!(colored, format_table(&report()));
        colored::control::unset_override();
    }
}
