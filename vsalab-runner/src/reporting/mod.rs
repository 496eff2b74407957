//! Report artifacts: `REPORT_<date>.md` and `REPORT_<date>.csv`.

pub mod csv;
pub mod markdown;

pub use self::csv::{write_csv, ReportRow};
pub use markdown::MarkdownReportGenerator;

use crate::analysis::ScanOutcome;
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Paths of the artifacts a scan produced.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub markdown: PathBuf,
    pub csv: PathBuf,
}

/// Write both report artifacts under `dir`, creating it if needed.
pub fn write_reports(
    outcome: &ScanOutcome,
    as_of: NaiveDate,
    dir: &Path,
) -> io::Result<ReportPaths> {
    fs::create_dir_all(dir)?;

    let markdown_path = dir.join(format!("REPORT_{as_of}.md"));
    let markdown = MarkdownReportGenerator.generate(outcome, as_of);
    fs::write(&markdown_path, markdown)?;

    let csv_path = dir.join(format!("REPORT_{as_of}.csv"));
    let file = fs::File::create(&csv_path)?;
    write_csv(outcome, file).map_err(io::Error::other)?;

    Ok(ReportPaths {
        markdown: markdown_path,
        csv: csv_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_both_artifacts() {
        let dir = TempDir::new().unwrap();
        let outcome = ScanOutcome::default();
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let paths = write_reports(&outcome, as_of, dir.path()).unwrap();

        assert!(paths.markdown.exists());
        assert!(paths.csv.exists());
        assert!(paths
            .markdown
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains("2024-06-28"));

        let md = fs::read_to_string(&paths.markdown).unwrap();
        assert!(md.starts_with("# VSA Scan Report"));
    }
}
