//! Summary Report Module
//! The fixed-format textual summary printed after the figures are written.

use std::io::{self, Write};

use serde::Serialize;

use crate::data::Relationship;
use crate::stats::Totals;

/// The printed database summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub totals: Totals,
    pub relationships: Vec<Relationship>,
}

impl SummaryReport {
    pub fn new(totals: Totals, relationships: &[Relationship]) -> Self {
        Self {
            totals,
            relationships: relationships.to_vec(),
        }
    }

    /// Write the summary in its fixed format.
    pub fn write_into(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "MyDB Database Visualization Complete!")?;
        writeln!(out)?;
        writeln!(out, "Database Summary:")?;
        writeln!(out, "================")?;
        writeln!(out, "Total Collections: {}", self.totals.collections)?;
        writeln!(out, "Total Documents: {}", self.totals.documents)?;
        writeln!(out, "Total Storage: {:.2} KB", self.totals.storage_kb)?;
        writeln!(out)?;
        writeln!(out, "Key Relationships:")?;
        for rel in &self.relationships {
            writeln!(out, "- {} connect to {} via {}", rel.from, rel.to, rel.via)?;
        }
        Ok(())
    }

    /// Print the summary to stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_into(&mut handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatabaseSample;
    use crate::stats::SummaryCalculator;

    #[test]
    fn summary_text_is_stable() {
        let sample = DatabaseSample::mydb();
        let frame = sample.collections_frame().unwrap();
        let totals = SummaryCalculator::totals(&frame).unwrap();
        let report = SummaryReport::new(totals, &sample.relationships);

        let mut buf = Vec::new();
        report.write_into(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "MyDB Database Visualization Complete!\n\
             \n\
             Database Summary:\n\
             ================\n\
             Total Collections: 6\n\
             Total Documents: 89\n\
             Total Storage: 16.12 KB\n\
             \n\
             Key Relationships:\n\
             - Users connect to Orders via user_email\n\
             - Users connect to Reviews via user_email\n\
             - Products connect to Orders via items array\n\
             - Products connect to Reviews via product name\n"
        );
    }

    #[test]
    fn summary_serializes_to_json() {
        let sample = DatabaseSample::mydb();
        let frame = sample.collections_frame().unwrap();
        let totals = SummaryCalculator::totals(&frame).unwrap();
        let report = SummaryReport::new(totals, &sample.relationships);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totals"]["documents"], 89);
        assert_eq!(json["relationships"].as_array().unwrap().len(), 4);
    }
}
