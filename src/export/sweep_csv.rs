//! CSV output of iteration sweeps

use std::{fs::File, io::Write, path::Path};

use crate::{Result, error::Error, pipeline::SweepRow};

/// Writes sweep rows with a header line, one row per iteration budget.
pub struct SweepCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl SweepCsvWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SweepCsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn write_row(&mut self, row: &SweepRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    pub fn write_all(&mut self, rows: &[SweepRow]) -> Result<()> {
        for row in rows {
            self.write_row(row)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::SerializationContext {
                operation: "flush sweep CSV".to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let mut writer = SweepCsvWriter::new(Vec::new());
        writer
            .write_all(&[SweepRow {
                iterations: 1000,
                episodes_run: 1000,
                converged: false,
                win_rate: 0.5,
                draw_rate: 0.25,
                loss_rate: 0.25,
                mean_reward: 0.125,
            }])
            .unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("iterations,episodes_run,converged,win_rate,draw_rate,loss_rate,mean_reward")
        );
        assert_eq!(lines.next(), Some("1000,1000,false,0.5,0.25,0.25,0.125"));
        assert_eq!(lines.next(), None);
    }
}
