use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExportError;

/// What board extraction needs from a loaded page.
///
/// Implemented by the Chromium adapter in `browser.rs` and by an in-memory
/// stub in tests. Every read returns trimmed text. Calls are awaited one at a
/// time, so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait BoardPage {
    /// Handle to an element found by one of the query methods.
    type Node;

    /// Resolve once `selector` matches at least one element, or fail with
    /// `ExportError::Timeout` after `timeout`.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ExportError>;

    /// Inner text of the first element on the page matching `selector`.
    async fn text(&self, selector: &str) -> Result<String, ExportError>;

    /// All elements on the page matching `selector`, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, ExportError>;

    /// Inner text of the first descendant of `node` matching `selector`.
    async fn node_text(&self, node: &Self::Node, selector: &str) -> Result<String, ExportError>;

    /// All descendants of `node` matching `selector`, in document order.
    async fn node_query_all(
        &self,
        node: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, ExportError>;

    /// Descendant text read as a vote count.
    async fn node_int(&self, node: &Self::Node, selector: &str) -> Result<u32, ExportError> {
        let text = self.node_text(node, selector).await?;
        parse_votes(&text)
    }
}

pub fn parse_votes(text: &str) -> Result<u32, ExportError> {
    text.trim()
        .parse()
        .map_err(|_| ExportError::ParseVotes { text: text.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn votes_parse_whole_numbers() {
        assert_eq!(parse_votes("0").unwrap(), 0);
        assert_eq!(parse_votes(" 12 ").unwrap(), 12);
    }

    #[test]
    fn votes_reject_non_numbers() {
        for text in ["", "many", "3 votes", "-1", "2.5"] {
            assert!(
                matches!(parse_votes(text), Err(ExportError::ParseVotes { .. })),
                "{text}"
            );
        }
    }
}
