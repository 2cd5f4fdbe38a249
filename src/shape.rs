use crate::args::ExportFormat;
use crate::board::Board;

/// A board reshaped for one output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shaped {
    /// Header row of column titles followed by data rows, all the same width.
    Table(Vec<Vec<String>>),
    Text(String),
}

pub fn shape(board: &Board, format: ExportFormat) -> Shaped {
    match format {
        ExportFormat::Csv => Shaped::Table(build_rows(board)),
        ExportFormat::Txt => Shaped::Text(build_text(board)),
    }
}

/// Lay messages out as CSV rows.
///
/// Vote counts are left out so ideas are weighed on their own, and messages
/// without votes are skipped. A message at index `j` goes into row `j + 1`
/// when that row already exists; otherwise a fresh row is appended at the end
/// of the table.
pub fn build_rows(board: &Board) -> Vec<Vec<String>> {
    let width = board.columns.len();
    if width == 0 {
        return Vec::new();
    }

    let mut rows: Vec<Vec<String>> = vec![board.columns.iter().map(|c| c.title.clone()).collect()];

    for (i, column) in board.columns.iter().enumerate() {
        for (j, message) in column.messages.iter().enumerate() {
            if message.votes == 0 {
                continue;
            }
            match rows.get_mut(j + 1) {
                Some(row) => row[i] = message.text.clone(),
                None => {
                    let mut row = vec![String::new(); width];
                    row[i] = message.text.clone();
                    rows.push(row);
                }
            }
        }
    }

    rows
}

/// Render the board as a plaintext summary, votes included.
pub fn build_text(board: &Board) -> String {
    let mut out = format!("{}\n\n", board.title);

    for column in board.columns.iter().filter(|c| !c.messages.is_empty()) {
        out.push_str(&column.title);
        out.push('\n');
        for message in &column.messages {
            out.push_str(&format!("- {} ({})\n", message.text, message.votes));
        }
        out.push('\n');
    }

    out
}
