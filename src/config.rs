//! Page configuration
//!
//! Defaults match the stock recipe page. The web build lets the URL query
//! override the log level and commit order.

use log::LevelFilter;

use crate::storage::STORAGE_KEY;

/// When a submitted record is drawn relative to being persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitOrder {
    /// Persist first; draw only if the write succeeded
    #[default]
    SaveThenRender,
    /// Draw first, then persist. A failed write leaves the view ahead of storage.
    RenderThenSave,
}

impl CommitOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitOrder::SaveThenRender => "save-first",
            CommitOrder::RenderThenSave => "render-first",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "save-first" | "save" => Some(CommitOrder::SaveThenRender),
            "render-first" | "render" => Some(CommitOrder::RenderThenSave),
            _ => None,
        }
    }
}

/// Where things live on the page and how the controller behaves
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage slot for the record list
    pub storage_key: String,
    /// Container that receives cards
    pub container_selector: String,
    pub form_selector: String,
    /// Button that wipes storage and the container
    pub clear_selector: String,
    /// Custom element created per record
    pub card_tag: String,
    pub commit_order: CommitOrder,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            container_selector: "main".to_string(),
            form_selector: "form".to_string(),
            clear_selector: r#"button[type="button"]"#.to_string(),
            card_tag: "recipe-card".to_string(),
            commit_order: CommitOrder::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Defaults with overrides from a URL query string (`?log=debug&commit=render-first`)
    ///
    /// Returns the config and the pairs that were skipped (unknown key or bad
    /// value). This runs before logging is up, so the caller reports them.
    pub fn from_query(query: &str) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut ignored = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "log" => value.parse::<LevelFilter>().map(|l| config.log_level = l).is_ok(),
                "commit" => CommitOrder::from_str(value)
                    .map(|o| config.commit_order = o)
                    .is_some(),
                _ => false,
            };
            if !applied {
                ignored.push(pair.to_string());
            }
        }
        (config, ignored)
    }
}
