pub mod config;
pub mod feed;
pub mod render;
pub mod storage;
pub mod sync;

use std::collections::BTreeMap;

use feed::FeedService;
use render::RenderService;
use storage::StorageService;
use sync::SyncService;

#[derive(Debug, Clone, Default)]
pub struct AppServices {
    feed: FeedService,
    storage: StorageService,
    render: RenderService,
    sync: SyncService,
}

impl AppServices {
    pub fn health_report(&self) -> BTreeMap<String, String> {
        let mut report = BTreeMap::new();
        report.insert(self.feed.name().to_string(), self.feed.status().to_string());
        report.insert(
            self.storage.name().to_string(),
            self.storage.status().to_string(),
        );
        report.insert(
            self.render.name().to_string(),
            self.render.status().to_string(),
        );
        report.insert(self.sync.name().to_string(), self.sync.status().to_string());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_report_lists_every_service() {
        let report = AppServices::default().health_report();
        let names: Vec<&str> = report.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["feed", "render", "storage", "sync"]);
        assert!(report.values().all(|status| status == "ready"));
    }
}
