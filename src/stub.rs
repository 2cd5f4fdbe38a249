//! In-memory `BoardPage` for tests. Answers the same selectors the real board does.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExportError;
use crate::extract::{BOARD_TITLE, COLUMN, COLUMN_TITLE, MESSAGE, MESSAGE_TEXT, MESSAGE_VOTES};
use crate::page::BoardPage;

pub struct StubPage {
    title: Option<String>,
    columns: Vec<StubColumn>,
    rendered: bool,
}

struct StubColumn {
    title: String,
    /// (body text, raw vote text)
    messages: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy)]
pub enum StubNode {
    Column(usize),
    Message(usize, usize),
}

impl StubPage {
    pub fn board(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            columns: Vec::new(),
            rendered: true,
        }
    }

    pub fn column(mut self, title: &str, messages: &[(&str, &str)]) -> Self {
        self.columns.push(StubColumn {
            title: title.to_string(),
            messages: messages
                .iter()
                .map(|(text, votes)| (text.to_string(), votes.to_string()))
                .collect(),
        });
        self
    }

    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    /// The board container never shows up.
    pub fn unrendered(mut self) -> Self {
        self.rendered = false;
        self
    }

    fn message(&self, col: usize, idx: usize) -> &(String, String) {
        &self.columns[col].messages[idx]
    }
}

fn missing(selector: &str) -> ExportError {
    ExportError::MissingElement {
        selector: selector.to_string(),
    }
}

#[async_trait(?Send)]
impl BoardPage for StubPage {
    type Node = StubNode;

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ExportError> {
        if selector == COLUMN && self.rendered && !self.columns.is_empty() {
            return Ok(());
        }
        tokio::time::sleep(timeout).await;
        Err(ExportError::Timeout {
            selector: selector.to_string(),
            secs: timeout.as_secs(),
        })
    }

    async fn text(&self, selector: &str) -> Result<String, ExportError> {
        match (selector, &self.title) {
            (BOARD_TITLE, Some(title)) => Ok(title.trim().to_string()),
            _ => Err(missing(selector)),
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<StubNode>, ExportError> {
        if selector == COLUMN {
            Ok((0..self.columns.len()).map(StubNode::Column).collect())
        } else {
            Ok(Vec::new())
        }
    }

    async fn node_text(&self, node: &StubNode, selector: &str) -> Result<String, ExportError> {
        let text = match (*node, selector) {
            (StubNode::Column(c), COLUMN_TITLE) => &self.columns[c].title,
            (StubNode::Message(c, m), MESSAGE_TEXT) => &self.message(c, m).0,
            (StubNode::Message(c, m), MESSAGE_VOTES) => &self.message(c, m).1,
            _ => return Err(missing(selector)),
        };
        Ok(text.trim().to_string())
    }

    async fn node_query_all(
        &self,
        node: &StubNode,
        selector: &str,
    ) -> Result<Vec<StubNode>, ExportError> {
        match (*node, selector) {
            (StubNode::Column(c), MESSAGE) => Ok((0..self.columns[c].messages.len())
                .map(|m| StubNode::Message(c, m))
                .collect()),
            _ => Ok(Vec::new()),
        }
    }
}
