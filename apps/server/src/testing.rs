//! Test doubles for driving whole cycles without network access.

use async_trait::async_trait;
use goldwatch_alerts::{DispatchError, Sink};
use goldwatch_core::SourceId;
use goldwatch_feeds::{FeedError, PageFetcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn btmh_page(product: &str, buy: &str, sell: &str) -> String {
    format!(
        r#"<table class="gold-table-content"><tbody>
            <tr><td>{product}</td><td>{buy}</td><td>{sell}</td></tr>
        </tbody></table>"#
    )
}

pub fn btmc_page(product: &str, buy: &str, sell: &str) -> String {
    format!(
        r#"<table class="bd_price_home"><tbody>
            <tr><td>Thương hiệu</td><td>Loại vàng</td><td>Hàm lượng</td><td>Mua vào</td><td>Bán ra</td></tr>
            <tr><td><img src="/logo.png"></td><td>{product}</td><td>-</td><td>{buy}</td><td>{sell}</td></tr>
        </tbody></table>"#
    )
}

/// Fetcher whose pages can be swapped between cycles.
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<SourceId, Result<String, FeedError>>>,
    panic_on_fetch: bool,
}

impl FakeFetcher {
    pub fn panicking() -> Self {
        Self {
            panic_on_fetch: true,
            ..Default::default()
        }
    }

    pub fn set(&self, source: SourceId, page: Result<String, FeedError>) {
        self.pages.lock().unwrap().insert(source, page);
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        if self.panic_on_fetch {
            panic!("fetcher exploded");
        }
        let source = SourceId::ALL
            .into_iter()
            .find(|s| s.url() == url)
            .ok_or(FeedError::Status(404))?;
        self.pages
            .lock()
            .unwrap()
            .get(&source)
            .cloned()
            .unwrap_or(Err(FeedError::Http("no page".into())))
    }
}

/// Sink that records every message it is given.
#[derive(Default)]
pub struct SpySink {
    pub messages: Mutex<Vec<String>>,
    pub fail: bool,
}

impl SpySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Sink for SpySink {
    fn name(&self) -> &str {
        "Spy"
    }

    async fn deliver(&self, message: &str) -> Result<(), DispatchError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(DispatchError::Request {
                sink: "Spy".to_string(),
                message: "unreachable".to_string(),
            });
        }
        Ok(())
    }
}
