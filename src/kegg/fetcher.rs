//! Blocking HTTP fetcher backed by the response cache

use super::cache::ResponseCache;
use super::config::KeggConfig;
use super::{KeggError, KeggResult, TextFetcher};
use reqwest::blocking::Client;
use tracing::{debug, info};

pub struct HttpFetcher {
    client: Client,
    cache: ResponseCache,
}

impl HttpFetcher {
    pub fn new(config: &KeggConfig) -> KeggResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            cache: ResponseCache::new(config.cache_dir.clone()),
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn download(&self, url: &str) -> KeggResult<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();

        if !status.is_success() {
            return Err(KeggError::Transport {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(resp.text()?)
    }
}

/// Reject responses without any content
pub(crate) fn ensure_content(cache_key: &str, text: &str) -> KeggResult<()> {
    if text.trim().is_empty() {
        return Err(KeggError::EmptyResponse(cache_key.to_string()));
    }
    Ok(())
}

impl TextFetcher for HttpFetcher {
    fn fetch_text(&self, url: &str, cache_key: &str, force_refresh: bool) -> KeggResult<String> {
        if !force_refresh {
            if let Some(text) = self.cache.get(cache_key)? {
                debug!("Cache hit for '{}'", cache_key);
                ensure_content(cache_key, &text)?;
                return Ok(text);
            }
        }

        info!("Downloading '{}' from KEGG at {}", cache_key, url);
        let text = self.download(url)?;
        ensure_content(cache_key, &text)?;
        self.cache.put(cache_key, &text)?;
        info!("Downloaded '{}' ({} bytes)", cache_key, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn offline_fetcher(dir: &TempDir) -> HttpFetcher {
        // Unroutable endpoint: any network access fails fast
        let config = KeggConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_cache_dir(dir.path())
            .with_timeout_secs(1);
        HttpFetcher::new(&config).unwrap()
    }

    #[test]
    fn test_cache_hit_skips_network() {
        let dir = TempDir::new().unwrap();
        let fetcher = offline_fetcher(&dir);
        fetcher.cache().put("ko_info", "ko  KEGG Orthology\n").unwrap();

        let text = fetcher
            .fetch_text("http://127.0.0.1:9/info/ko", "ko_info", false)
            .unwrap();
        assert_eq!(text, "ko  KEGG Orthology\n");
    }

    #[test]
    fn test_empty_cached_text_is_rejected() {
        let dir = TempDir::new().unwrap();
        let fetcher = offline_fetcher(&dir);
        fetcher.cache().put("empty", "\n").unwrap();

        let err = fetcher.fetch_text("http://127.0.0.1:9/x", "empty", false).unwrap_err();
        assert!(matches!(err, KeggError::EmptyResponse(key) if key == "empty"));
    }

    #[test]
    fn test_force_refresh_bypasses_cache() {
        let dir = TempDir::new().unwrap();
        let fetcher = offline_fetcher(&dir);
        fetcher.cache().put("ko_info", "cached\n").unwrap();

        let err = fetcher.fetch_text("http://127.0.0.1:9/info/ko", "ko_info", true);
        assert!(matches!(err, Err(KeggError::Http(_))));
    }
}
