use std::fmt::Display;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ExportError;
use crate::page::BoardPage;
use crate::settings::Settings;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A running Chromium plus the task that pumps its CDP events.
pub struct ChromeBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
}

/// One loaded tab.
pub struct ChromePage {
    page: Page,
}

fn cdp(e: CdpError) -> ExportError {
    ExportError::Browser(e.to_string())
}

impl ChromeBrowser {
    pub async fn launch(settings: &Settings) -> Result<Self, ExportError> {
        let mut builder = BrowserConfig::builder();
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ExportError::Launch)?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|e| ExportError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            let skipped = pump_events(&mut events).await;
            debug!("CDP handler finished ({} events skipped)", skipped);
        });

        info!(headless = settings.headless, "Browser launched");
        Ok(Self { browser, handler })
    }

    /// Open a new tab on `url` and wait for it to load.
    pub async fn open(&self, url: &Url) -> Result<ChromePage, ExportError> {
        info!("Loading {}", url);
        let page = self
            .browser
            .new_page(url.as_str())
            .await
            .map_err(|e| ExportError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(ChromePage { page })
    }

    /// Shut Chromium down. Problems here are logged, never returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Browser did not exit cleanly: {}", e);
        }
        if let Err(e) = self.handler.await {
            warn!("CDP handler task failed: {}", e);
        }
    }
}

/// Drive the CDP event stream until the connection closes.
///
/// Errors are single events the handler could not process (for example a
/// message from a newer Chrome it cannot decode); the stream stays usable.
/// Returns how many were skipped.
async fn pump_events<S, E>(events: &mut S) -> usize
where
    S: Stream<Item = Result<(), E>> + Unpin,
    E: Display,
{
    let mut skipped = 0;
    while let Some(event) = events.next().await {
        if let Err(e) = event {
            debug!("Skipping CDP event: {}", e);
            skipped += 1;
        }
    }
    skipped
}

async fn inner_text(element: &Element) -> Result<String, ExportError> {
    let text = element.inner_text().await.map_err(cdp)?;
    Ok(text.unwrap_or_default().trim().to_string())
}

fn first(elements: Vec<Element>, selector: &str) -> Result<Element, ExportError> {
    elements
        .into_iter()
        .next()
        .ok_or_else(|| ExportError::MissingElement {
            selector: selector.to_string(),
        })
}

#[async_trait(?Send)]
impl BoardPage for ChromePage {
    type Node = Element;

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), ExportError> {
        let start = Instant::now();
        loop {
            if !self.page.find_elements(selector).await.map_err(cdp)?.is_empty() {
                debug!("'{}' appeared after {:?}", selector, start.elapsed());
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(ExportError::Timeout {
                    selector: selector.to_string(),
                    secs: timeout.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn text(&self, selector: &str) -> Result<String, ExportError> {
        let elements = self.page.find_elements(selector).await.map_err(cdp)?;
        inner_text(&first(elements, selector)?).await
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Element>, ExportError> {
        self.page.find_elements(selector).await.map_err(cdp)
    }

    async fn node_text(&self, node: &Element, selector: &str) -> Result<String, ExportError> {
        let elements = node.find_elements(selector).await.map_err(cdp)?;
        inner_text(&first(elements, selector)?).await
    }

    async fn node_query_all(
        &self,
        node: &Element,
        selector: &str,
    ) -> Result<Vec<Element>, ExportError> {
        node.find_elements(selector).await.map_err(cdp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_errors_do_not_stop_the_handler() {
        let seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = seen.clone();
        let events: Vec<Result<(), String>> = vec![
            Ok(()),
            Err("data did not match any variant".into()),
            Ok(()),
            Err("unknown method".into()),
            Ok(()),
        ];
        let mut stream = futures::stream::iter(events).inspect(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        let skipped = pump_events(&mut stream).await;

        assert_eq!(skipped, 2);
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 5);
    }
}
