//! Price aggregator for one poll cycle.
//!
//! Fetches every source page in order and tags each extracted record with
//! its source. A failing source contributes nothing; the others still run.

use crate::adapter;
use crate::rest::PageFetcher;
use goldwatch_core::{PriceRecord, SourceId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Collects headline prices from all configured sources.
#[derive(Clone)]
pub struct PriceAggregator {
    fetcher: Arc<dyn PageFetcher>,
    sources: Vec<SourceId>,
}

impl PriceAggregator {
    /// Create an aggregator polling every known source.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_sources(fetcher, SourceId::ALL.to_vec())
    }

    /// Create an aggregator polling only `sources`, in the given order.
    pub fn with_sources(fetcher: Arc<dyn PageFetcher>, sources: Vec<SourceId>) -> Self {
        Self { fetcher, sources }
    }

    /// Fetch and parse a single source.
    pub async fn collect_source(&self, source: SourceId) -> Option<PriceRecord> {
        let page = match self.fetcher.fetch(source.url()).await {
            Ok(page) => page,
            Err(e) => {
                warn!(source = source.code(), url = source.url(), error = %e, "Failed to fetch price page");
                return None;
            }
        };
        adapter::extract(source, &page)
    }

    /// Collect records from every source, grouped in source order.
    pub async fn collect(&self) -> Vec<PriceRecord> {
        let mut records = Vec::with_capacity(self.sources.len());
        for &source in &self.sources {
            if let Some(record) = self.collect_source(source).await {
                records.push(record);
            }
        }
        debug!(sources = self.sources.len(), records = records.len(), "Collected prices");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeedError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const BTMH_PAGE: &str = r#"<table class="gold-table-content"><tbody>
        <tr><td>SJC 1L</td><td>84.500</td><td>86.500</td></tr>
    </tbody></table>"#;

    const BTMC_PAGE: &str = r#"<table class="bd_price_home"><tbody>
        <tr><td>Thương hiệu</td><td>Loại</td><td>Hàm lượng</td><td>Mua</td><td>Bán</td></tr>
        <tr><td><img src="logo.png"></td><td>Vàng miếng</td><td>-</td><td>845</td><td>865</td></tr>
    </tbody></table>"#;

    /// Serves canned responses and records requested URLs.
    struct MockFetcher {
        pages: HashMap<&'static str, Result<String, FeedError>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn new(btmh: Result<&str, FeedError>, btmc: Result<&str, FeedError>) -> Self {
            let mut pages = HashMap::new();
            pages.insert(SourceId::BaoTinManhHai.url(), btmh.map(str::to_string));
            pages.insert(SourceId::BaoTinMinhChau.url(), btmc.map(str::to_string));
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FeedError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .unwrap_or(Err(FeedError::Status(404)))
        }
    }

    #[tokio::test]
    async fn test_collect_in_source_order() {
        let fetcher = Arc::new(MockFetcher::new(Ok(BTMH_PAGE), Ok(BTMC_PAGE)));
        let aggregator = PriceAggregator::new(fetcher.clone());

        let records = aggregator.collect().await;
        let sources: Vec<_> = records.iter().map(|r| r.source).collect();
        assert_eq!(sources, vec![SourceId::BaoTinManhHai, SourceId::BaoTinMinhChau]);
        assert_eq!(records[0].product_type, "SJC 1L");
        assert_eq!(records[1].buy_price, "845.000");

        let requests = fetcher.requests.lock().unwrap().clone();
        assert_eq!(requests, vec!["https://www.baotinmanhhai.vn", "https://btmc.vn"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        let fetcher = Arc::new(MockFetcher::new(
            Err(FeedError::Http("connection refused".into())),
            Ok(BTMC_PAGE),
        ));
        let records = PriceAggregator::new(fetcher).collect().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, SourceId::BaoTinMinhChau);
    }

    #[tokio::test]
    async fn test_parse_failure_is_isolated() {
        let fetcher = Arc::new(MockFetcher::new(Ok(BTMH_PAGE), Ok("<html>maintenance</html>")));
        let records = PriceAggregator::new(fetcher).collect().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, SourceId::BaoTinManhHai);
    }

    #[tokio::test]
    async fn test_all_sources_failing() {
        let fetcher = Arc::new(MockFetcher::new(Err(FeedError::Status(500)), Err(FeedError::Status(502))));
        let records = PriceAggregator::new(fetcher).collect().await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_with_sources_subset() {
        let fetcher = Arc::new(MockFetcher::new(Ok(BTMH_PAGE), Ok(BTMC_PAGE)));
        let aggregator = PriceAggregator::with_sources(fetcher.clone(), vec![SourceId::BaoTinMinhChau]);
        let records = aggregator.collect().await;
        assert_eq!(records.len(), 1);
        assert_eq!(fetcher.requests.lock().unwrap().len(), 1);
    }
}
