use crate::{error::ConfigError, instruction::Instruction, line::Line, scanner::ScanReport};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const ANNOTATION: &str = " # Line ";

/// Order of the lines in a result export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportOrder {
    /// Global source order.
    LineNumber,
    /// Grouped by instruction in list order, then by match order.
    Instruction,
}

impl Default for ExportOrder {
    fn default() -> ExportOrder {
        ExportOrder::LineNumber
    }
}

impl FromStr for ExportOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<ExportOrder, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "line" | "line-number" => Ok(ExportOrder::LineNumber),
            "instruction" => Ok(ExportOrder::Instruction),
            _ => Err(ConfigError::UnknownOrder(s.to_owned())),
        }
    }
}

fn annotate(out: &mut String, line: &Line, description: &str) {
    out.push_str(line.text());
    out.push_str(ANNOTATION);
    out.push_str(&line.number().to_string());
    out.push_str(", ");
    out.push_str(description);
    out.push('\n');
}

/// Renders every matched line as `<text> # Line <number>, <description>`.
pub fn export_results(report: &ScanReport, order: ExportOrder) -> String {
    let mut out = String::new();

    match order {
        ExportOrder::LineNumber => {
            for hit in report.hits() {
                let description = report
                    .instruction_for(hit)
                    .map_or("", Instruction::description);
                annotate(&mut out, hit.line(), description);
            }
        }
        ExportOrder::Instruction => {
            for instruction in report.instructions() {
                for line in instruction.matched_lines() {
                    annotate(&mut out, line, instruction.description());
                }
            }
        }
    }

    out
}

/// Recovers the original source text from an exported result line.
pub fn strip_annotation(exported: &str) -> &str {
    match exported.rfind(ANNOTATION) {
        Some(ix) => &exported[..ix],
        None => exported,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub name: String,
    pub description: String,
    pub count: usize,
}

/// Per-instruction match counts, in instruction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(pub Vec<SummaryRow>);

pub fn summarize(report: &ScanReport) -> Summary {
    Summary(
        report
            .instructions()
            .iter()
            .map(|instruction| SummaryRow {
                name: instruction.name().to_owned(),
                description: instruction.description().to_owned(),
                count: instruction.matched_lines().len(),
            })
            .collect(),
    )
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .0
            .iter()
            .map(|row| row.name.len())
            .chain(std::iter::once("Name".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<width$}  {:>7}  Description", "Name", "Count", width = name_width)?;
        for row in &self.0 {
            writeln!(
                f,
                "{:<width$}  {:>7}  {}",
                row.name,
                row.count,
                row.description,
                width = name_width
            )?;
        }

        Ok(())
    }
}
