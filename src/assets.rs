//! Asset URL resolution.
//!
//! With no remote host configured, asset paths are same-origin and returned
//! unchanged. With a host, the host is prepended by plain concatenation: no
//! slash collapsing, no detection of already-absolute URLs.

use crate::config::RemoteConfig;

/// Rewrites local asset paths for the configured host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetResolver {
    host: Option<String>,
}

impl AssetResolver {
    /// An empty host counts as no host.
    pub fn new(host: Option<String>) -> Self {
        Self {
            host: host.filter(|h| !h.is_empty()),
        }
    }

    pub fn from_config(remote: &RemoteConfig) -> Self {
        Self::new(remote.host().map(str::to_string))
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn resolve(&self, path: &str) -> String {
        match &self.host {
            Some(host) => format!("{host}{path}"),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: &[&str] = &[
        "/images/hero.png",
        "images/hero.png",
        "",
        "https://cdn.example.com/a.png",
        "/a b/ü.png?x=1#frag",
    ];

    #[test]
    fn no_host_is_identity() {
        let resolver = AssetResolver::new(None);
        for p in PATHS {
            assert_eq!(resolver.resolve(p), *p);
        }
    }

    #[test]
    fn empty_host_is_identity() {
        let resolver = AssetResolver::new(Some(String::new()));
        assert_eq!(resolver.host(), None);
        assert_eq!(resolver.resolve("/x.png"), "/x.png");
    }

    #[test]
    fn host_is_prefixed_naively() {
        let host = "https://cms.example.com";
        let resolver = AssetResolver::new(Some(host.to_string()));
        for p in PATHS {
            assert_eq!(resolver.resolve(p), format!("{host}{p}"));
        }
    }

    #[test]
    fn no_slash_normalization() {
        let resolver = AssetResolver::new(Some("https://cms.example.com/".to_string()));
        assert_eq!(
            resolver.resolve("/images/a.png"),
            "https://cms.example.com//images/a.png"
        );
    }

    #[test]
    fn path_already_containing_host_is_still_prefixed() {
        let host = "https://cms.example.com";
        let resolver = AssetResolver::new(Some(host.to_string()));
        let absolute = format!("{host}/images/a.png");
        assert_eq!(resolver.resolve(&absolute), format!("{host}{host}/images/a.png"));
    }

    #[test]
    fn from_config_uses_trimmed_host() {
        let remote = RemoteConfig {
            host: " https://cms.example.com ".into(),
            ..RemoteConfig::default()
        };
        let resolver = AssetResolver::from_config(&remote);
        assert_eq!(resolver.host(), Some("https://cms.example.com"));
    }
}
