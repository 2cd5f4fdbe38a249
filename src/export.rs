use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::args::ExportFormat;
use crate::error::ExportError;
use crate::extract;
use crate::page::BoardPage;
use crate::shape::{self, Shaped};

/// Board title with all whitespace removed, plus the lowercase extension.
pub fn output_file_name(title: &str, format: ExportFormat) -> String {
    let stem: String = title.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}.{}", stem, format.extension())
}

pub fn output_path(dir: &Path, title: &str, format: ExportFormat) -> PathBuf {
    dir.join(output_file_name(title, format))
}

/// Persist shaped output. Tables go through the CSV writer, text is written as is.
pub fn write_shaped(path: &Path, shaped: &Shaped) -> Result<(), ExportError> {
    match shaped {
        Shaped::Table(rows) => write_csv(path, rows),
        Shaped::Text(text) => std::fs::write(path, text).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<(), ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract, shape and write one board. Returns the path written.
///
/// The file is only created once extraction has fully succeeded.
pub async fn export_board<P: BoardPage>(
    page: &P,
    format: ExportFormat,
    out_dir: &Path,
    timeout: Duration,
) -> Result<PathBuf, ExportError> {
    let board = extract::extract_board(page, timeout).await?;
    info!(
        "Extracted '{}': {} columns, {} messages",
        board.title,
        board.columns.len(),
        board.message_count()
    );

    let shaped = shape::shape(&board, format);
    let path = output_path(out_dir, &board.title, format);
    write_shaped(&path, &shaped)?;
    info!("Wrote {} export to {}", format, path.display());

    Ok(path)
}
