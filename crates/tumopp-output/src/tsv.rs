//! TSV output backend.
//!
//! Writes up to four files into the configured output directory:
//! - `population.tsv` — every cell that ever existed
//! - `snapshots.tsv`  — population states at recorded instants
//! - `drivers.tsv`    — the driver-mutation log
//! - `distances.tsv`  — sampled pairwise distances

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::row::{CellRow, DistanceRow, DriverRow};
use crate::OutputResult;

/// Writes simulation artifacts as tab-separated files under one directory.
pub struct TsvWriter {
    dir: std::path::PathBuf,
}

impl TsvWriter {
    /// Use (and create if needed) `dir` as the output directory.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open(&self, name: &str, header: &[&str]) -> OutputResult<Writer<File>> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(self.dir.join(name))?;
        writer.write_record(header)?;
        Ok(writer)
    }

    fn write_cell(writer: &mut Writer<File>, row: &CellRow) -> OutputResult<()> {
        writer.write_record(&[
            row.x.to_string(),
            row.y.to_string(),
            row.z.to_string(),
            row.id.to_string(),
            row.ancestor.to_string(),
            row.birth.to_string(),
            row.death.to_string(),
            row.beta.to_string(),
            row.delta.to_string(),
            row.alpha.to_string(),
            row.rho.to_string(),
            row.kind.to_string(),
            row.omega.to_string(),
        ])?;
        Ok(())
    }

    const CELL_HEADER: [&'static str; 13] = [
        "x", "y", "z", "id", "ancestor", "birth", "death", "beta", "delta", "alpha", "rho",
        "type", "omega",
    ];

    /// `population.tsv` — one row per cell ever existed.
    pub fn write_population(&self, rows: &[CellRow]) -> OutputResult<()> {
        let mut writer = self.open("population.tsv", &Self::CELL_HEADER)?;
        for row in rows {
            Self::write_cell(&mut writer, row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// `snapshots.tsv` — cell rows prefixed by the snapshot time.
    pub fn write_snapshots(&self, rows: &[(f64, CellRow)]) -> OutputResult<()> {
        let mut header = vec!["time"];
        header.extend_from_slice(&Self::CELL_HEADER);
        let mut writer = self.open("snapshots.tsv", &header)?;
        for (time, row) in rows {
            writer.write_record(&[
                time.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.id.to_string(),
                row.ancestor.to_string(),
                row.birth.to_string(),
                row.death.to_string(),
                row.beta.to_string(),
                row.delta.to_string(),
                row.alpha.to_string(),
                row.rho.to_string(),
                row.kind.to_string(),
                row.omega.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// `drivers.tsv` — the driver-mutation log.
    pub fn write_drivers(&self, rows: &[DriverRow]) -> OutputResult<()> {
        let mut writer = self.open("drivers.tsv", &["id", "type", "coef"])?;
        for row in rows {
            writer.write_record(&[row.id.to_string(), row.kind.to_string(), row.coef.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// `distances.tsv` — one row per sampled pair.
    pub fn write_distances(&self, rows: &[DistanceRow]) -> OutputResult<()> {
        let mut writer = self.open("distances.tsv", &["genealogy", "graph", "euclidean"])?;
        for row in rows {
            writer.write_record(&[
                row.genealogy.to_string(),
                row.graph.to_string(),
                row.euclidean.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
