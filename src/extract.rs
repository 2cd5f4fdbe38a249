use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::board::{Board, Column, Message};
use crate::error::ExportError;
use crate::page::BoardPage;

pub const COLUMN: &str = ".message-list";
pub const BOARD_TITLE: &str = ".board-name";
pub const COLUMN_TITLE: &str = ".column-header";
pub const MESSAGE: &str = ".message-main";
pub const MESSAGE_TEXT: &str = ".message-body .text";
pub const MESSAGE_VOTES: &str = ".votes .vote-area span.show-vote-count";

/// Walk the rendered board and collect every column and message.
///
/// Reads happen strictly in document order: column `i` is fully read before
/// column `i + 1` is touched.
pub async fn extract_board<P: BoardPage>(page: &P, timeout: Duration) -> Result<Board, ExportError> {
    page.wait_for(COLUMN, timeout).await?;

    let title = match page.text(BOARD_TITLE).await {
        Ok(t) if !t.is_empty() => t,
        Ok(_) | Err(ExportError::MissingElement { .. }) => return Err(ExportError::MissingBoardTitle),
        Err(e) => return Err(e),
    };

    let nodes = page.query_all(COLUMN).await?;
    info!("Board '{}' has {} columns", title, nodes.len());

    let pb = ProgressBar::new(nodes.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} columns")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut columns = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let column = read_column(page, node).await?;
        debug!("Column '{}': {} messages", column.title, column.messages.len());
        columns.push(column);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(Board { title, columns })
}

async fn read_column<P: BoardPage>(page: &P, node: &P::Node) -> Result<Column, ExportError> {
    let title = page.node_text(node, COLUMN_TITLE).await?;
    let nodes = page.node_query_all(node, MESSAGE).await?;

    let mut messages = Vec::with_capacity(nodes.len());
    for msg in &nodes {
        let text = page.node_text(msg, MESSAGE_TEXT).await?;
        let votes = page.node_int(msg, MESSAGE_VOTES).await?;
        messages.push(Message::new(text, votes));
    }

    Ok(Column { title, messages })
}
