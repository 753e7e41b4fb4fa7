//! Plain-text rendering of ranking reports and partner lists.

use crate::column_id::labels;
use crate::ranking::{RankingReport, RankingRow};
use crate::synergy::Partner;
use std::fmt;

/// Significant digits shown for report values.
pub const SIGNIFICANT_DIGITS: usize = 5;

const VALUE_WIDTH: usize = 11;

/// Format `value` with `digits` significant digits.
///
/// Very small or very large magnitudes switch to exponent notation so
/// cells keep a bounded width. The magnitude is taken after rounding, so
/// a carry into the next power of ten never adds a digit.
///
/// # Examples
///
/// ```rust
/// use rolestat::report::format_significant;
///
/// assert_eq!(format_significant(3.14159265, 5), "3.1416");
/// assert_eq!(format_significant(-0.000123456, 5), "-0.00012346");
/// assert_eq!(format_significant(123456.0, 5), "1.2346e5");
/// assert_eq!(format_significant(0.0000123456, 5), "1.2346e-5");
/// assert_eq!(format_significant(99.99996, 5), "100.00");
/// assert_eq!(format_significant(0.0, 5), "0.0000");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }
    let scientific = format!("{:.*e}", digits - 1, value);
    let magnitude = rounded_exponent(&scientific);
    if magnitude < -4 || magnitude >= digits as i32 {
        scientific
    } else {
        format!("{:.*}", (digits as i32 - 1 - magnitude) as usize, value)
    }
}

/// Exponent of a `{:e}`-formatted number.
fn rounded_exponent(scientific: &str) -> i32 {
    scientific
        .rsplit_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// Options for [`render_ranking`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show at most this many rows.
    pub limit: Option<usize>,
    /// Order rows by overall ranking, best first.
    pub sort_by_overall: bool,
}

/// Render the report as a fixed-width text table.
///
/// The first column holds the creature name, followed by the PD, SD, PO,
/// SO, ODB, PSB and BSR columns.
pub fn render_ranking(report: &RankingReport, options: RenderOptions) -> String {
    RankingTable { report, options }.to_string()
}

struct RankingTable<'a> {
    report: &'a RankingReport,
    options: RenderOptions,
}

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<&RankingRow> = if self.options.sort_by_overall {
            self.report.sorted_by_overall()
        } else {
            self.report.rows().iter().collect()
        };
        if let Some(limit) = self.options.limit {
            rows.truncate(limit);
        }

        let name_width = rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());
        let width = VALUE_WIDTH;

        write!(f, "{:<name_width$}", "Name")?;
        for label in labels::REPORT {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            "-".repeat(name_width + labels::REPORT.len() * (width + 1))
        )?;

        for row in rows {
            write!(f, "{:<name_width$}", row.name)?;
            for value in row.values() {
                let cell = format_significant(value, SIGNIFICANT_DIGITS);
                write!(f, " {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for RankingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = RankingTable {
            report: self,
            options: RenderOptions::default(),
        };
        fmt::Display::fmt(&table, f)
    }
}

/// Render a partner list in the results-file layout.
///
/// ```text
/// Results for charizard:
/// -------------------------------------
/// |  1  |  swampert  |  Score = 2.34521  |
/// ...
/// ```
pub fn render_partners(subject: &str, partners: &[Partner]) -> String {
    PartnerList { subject, partners }.to_string()
}

struct PartnerList<'a> {
    subject: &'a str,
    partners: &'a [Partner],
}

impl fmt::Display for PartnerList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .partners
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(0);
        let rule = "-".repeat(name_width + 31);
        let index_width = self.partners.len().to_string().len();

        writeln!(f, "Results for {}:", self.subject)?;
        writeln!(f, "{rule}")?;
        for (i, partner) in self.partners.iter().enumerate() {
            writeln!(
                f,
                "|  {:>index_width$}  |  {:<name_width$}  |  Score = {:.5}  |",
                i + 1,
                partner.name,
                partner.score
            )?;
        }
        writeln!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{rank, RankingParams};
    use crate::role::{RoleScoreMatrix, RoleScores};

    fn report() -> RankingReport {
        let names = vec!["alpha".to_string(), "b".to_string(), "gamma-long".to_string()];
        let rows = vec![
            RoleScores {
                physical_durability: 1.0,
                special_durability: 5.0,
                physical_offense: 2.0,
                special_offense: 8.0,
            },
            RoleScores {
                physical_durability: 4.0,
                special_durability: 2.0,
                physical_offense: 9.0,
                special_offense: 1.0,
            },
            RoleScores {
                physical_durability: 7.0,
                special_durability: 3.0,
                physical_offense: 4.0,
                special_offense: 3.0,
            },
        ];
        rank(
            &RoleScoreMatrix::from_parts(names, rows),
            &RankingParams::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(1.0, 5), "1.0000");
        assert_eq!(format_significant(99.999, 5), "99.999");
        assert_eq!(format_significant(-25.123456, 5), "-25.123");
        assert_eq!(format_significant(0.5, 3), "0.500");
        assert_eq!(format_significant(f64::NAN, 5), "NaN");
        assert_eq!(format_significant(-3.5e-15, 5), "-3.5000e-15");
    }

    #[test]
    fn test_format_significant_rounding_carry() {
        assert_eq!(format_significant(99.99996, 5), "100.00");
        assert_eq!(format_significant(9.999996, 5), "10.000");
        assert_eq!(format_significant(-9.999996, 5), "-10.000");
        assert_eq!(format_significant(0.99999996, 5), "1.0000");
        assert_eq!(format_significant(99999.7, 5), "1.0000e5");
        assert_eq!(format_significant(0.000099999996, 5), "0.00010000");
    }

    #[test]
    fn test_render_header_and_rows() {
        let text = render_ranking(&report(), RenderOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for label in labels::REPORT {
            assert!(lines[0].contains(label));
        }
        assert!(lines[2].starts_with("alpha"));
        assert!(lines[4].starts_with("gamma-long"));
        // fixed width: every data line is as long as the header
        assert!(lines[2..].iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_render_sorted_with_limit() {
        let report = report();
        let best = report.sorted_by_overall()[0].name.clone();
        let text = render_ranking(
            &report,
            RenderOptions {
                limit: Some(1),
                sort_by_overall: true,
            },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with(&best));
        assert!(lines[2].trim_end().ends_with("3.0000"));
    }

    #[test]
    fn test_display_matches_default_render() {
        let report = report();
        assert_eq!(
            report.to_string(),
            render_ranking(&report, RenderOptions::default())
        );
    }

    #[test]
    fn test_render_partners() {
        let partners = vec![
            Partner {
                name: "swampert".into(),
                score: 2.345214,
            },
            Partner {
                name: "rotom".into(),
                score: 2.5,
            },
        ];
        let text = render_partners("charizard", &partners);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Results for charizard:");
        assert_eq!(lines[1], "-".repeat(8 + 31));
        assert_eq!(lines[2], "|  1  |  swampert  |  Score = 2.34521  |");
        assert_eq!(lines[3], "|  2  |  rotom     |  Score = 2.50000  |");
        assert_eq!(lines.len(), 5);
    }
}
