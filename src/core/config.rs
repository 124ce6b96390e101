use std::path::PathBuf;
use std::time::Duration;

pub const ENV_FILE: &str = ".env.local";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{field} must be an http(s) url, got {value:?}")]
    NotHttpUrl { field: &'static str, value: String },
    #[error("MIRROR_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    pub blog_id: String,
    pub feed_host: String,
    pub post_base: String,
    pub category: String,
    pub data_file: PathBuf,
    pub html_file: PathBuf,
    pub sitemap_file: PathBuf,
    pub site_url: String,
    pub timeout_secs: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            blog_id: "joecool00".to_string(),
            feed_host: "https://rss.blog.naver.com".to_string(),
            post_base: "https://m.blog.naver.com".to_string(),
            category: "AI Mind".to_string(),
            data_file: PathBuf::from("data/posts.json"),
            html_file: PathBuf::from("index.html"),
            sitemap_file: PathBuf::from("sitemap.xml"),
            site_url: "https://seoulproxy.com/".to_string(),
            timeout_secs: 20,
        }
    }
}

impl MirrorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(ENV_FILE);
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `MIRROR_*` variables; blank values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = read("MIRROR_BLOG_ID") {
            config.blog_id = value;
        }
        if let Some(value) = read("MIRROR_FEED_HOST") {
            config.feed_host = value;
        }
        if let Some(value) = read("MIRROR_POST_BASE") {
            config.post_base = value;
        }
        if let Some(value) = read("MIRROR_CATEGORY") {
            config.category = value;
        }
        if let Some(value) = read("MIRROR_DATA_FILE") {
            config.data_file = PathBuf::from(value);
        }
        if let Some(value) = read("MIRROR_HTML_FILE") {
            config.html_file = PathBuf::from(value);
        }
        if let Some(value) = read("MIRROR_SITEMAP_FILE") {
            config.sitemap_file = PathBuf::from(value);
        }
        if let Some(value) = read("MIRROR_SITE_URL") {
            config.site_url = value;
        }
        if let Some(value) = read("MIRROR_TIMEOUT_SECS") {
            config.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    pub fn feed_url(&self) -> String {
        crate::core::feed::fetcher::feed_url(&self.feed_host, &self.blog_id)
    }

    /// Prefix of every canonical post link, `<post-base>/<blog-id>`.
    pub fn canonical_base(&self) -> String {
        format!("{}/{}", self.post_base.trim_end_matches('/'), self.blog_id)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn validate_config(config: &MirrorConfig) -> Result<(), ConfigError> {
    if config.blog_id.trim().is_empty() {
        return Err(ConfigError::Empty("MIRROR_BLOG_ID"));
    }
    if config.category.trim().is_empty() {
        return Err(ConfigError::Empty("MIRROR_CATEGORY"));
    }
    for (field, value) in [
        ("MIRROR_FEED_HOST", &config.feed_host),
        ("MIRROR_POST_BASE", &config.post_base),
        ("MIRROR_SITE_URL", &config.site_url),
    ] {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::NotHttpUrl {
                field,
                value: value.clone(),
            });
        }
    }
    if config.timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout("0".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_mirrored_blog() {
        let config = MirrorConfig::from_lookup(|_| None).expect("defaults must validate");
        assert_eq!(config.feed_url(), "https://rss.blog.naver.com/joecool00");
        assert_eq!(config.canonical_base(), "https://m.blog.naver.com/joecool00");
        assert_eq!(config.category, "AI Mind");
        assert_eq!(config.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn env_values_override_defaults_and_blanks_are_ignored() {
        let config = MirrorConfig::from_lookup(lookup_from(&[
            ("MIRROR_BLOG_ID", "someone"),
            ("MIRROR_CATEGORY", "  "),
            ("MIRROR_DATA_FILE", "/tmp/posts.json"),
            ("MIRROR_TIMEOUT_SECS", "5"),
        ]))
        .expect("config should load");

        assert_eq!(config.blog_id, "someone");
        assert_eq!(config.category, "AI Mind");
        assert_eq!(config.data_file, PathBuf::from("/tmp/posts.json"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn rejects_invalid_values() {
        let bad_timeout = MirrorConfig::from_lookup(lookup_from(&[("MIRROR_TIMEOUT_SECS", "soon")]));
        assert!(matches!(bad_timeout, Err(ConfigError::InvalidTimeout(_))));

        let bad_host = MirrorConfig::from_lookup(lookup_from(&[("MIRROR_FEED_HOST", "ftp://x")]));
        assert!(matches!(
            bad_host,
            Err(ConfigError::NotHttpUrl {
                field: "MIRROR_FEED_HOST",
                ..
            })
        ));

        let config = MirrorConfig {
            blog_id: String::new(),
            ..MirrorConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Empty("MIRROR_BLOG_ID"))
        ));
    }
}
