//! Headless CMS backend over persisted queries.
//!
//! The CMS registers five persisted queries. Each content key is routed to
//! one of them, plus a path to its fragment inside the response:
//!
//! | Key prefix | Query | Fragment |
//! |------------|-------|----------|
//! | `hero` | `homepage` | `heroBanner` |
//! | `ctaBanner` | `homepage` | `ctaBanner` |
//! | `navigation` | `navigation` | (whole item) |
//! | `featureCards.items` | `feature-cards` | (whole list) |
//! | `latestNews.articles` | `latest-news` | (whole list) |
//! | `footer` | `footer` | (whole item) |
//!
//! ```text
//! hero.headingLine1  →  GET {host}{query_path}/{project}/homepage
//!                       then walk heroBanner.headingLine1
//! ```
//!
//! Keys no route covers fall back to a query named after their first
//! segment in kebab case (`clientLinks.title` → `client-links`).
//!
//! Responses arrive wrapped in the GraphQL envelope. A top-level `data`
//! member is removed, and so is a single `{name: {item | items: …}}` wrapper
//! beneath it, so `homepageByPath.item` becomes the item and
//! `newsArticleList.items` becomes the list itself.
//!
//! There is no cache: every resolution issues its own request.

use super::{
    ContentError, ContentKey, ContentSource, Record, SourceLoadError, UnavailableCause,
    collection_from, record_from, scalar_from, walk,
};
use crate::config::RemoteConfig;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP GET seam. Tests substitute an in-memory implementation.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<TransportResponse, TransportError>;
}

/// Production transport on reqwest's blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `timeout_secs = None` disables the client timeout entirely.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, SourceLoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| SourceLoadError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<TransportResponse, TransportError> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| TransportError(e.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}

// ============================================================================
// Query routing
// ============================================================================

/// Persisted queries registered on the CMS, in registration order.
pub const PERSISTED_QUERIES: [&str; 5] =
    ["homepage", "navigation", "feature-cards", "latest-news", "footer"];

/// Maps content keys starting with `prefix` onto a persisted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRoute {
    pub prefix: &'static [&'static str],
    pub query: &'static str,
    /// Path from the unwrapped response to the fragment the prefix names.
    pub fragment: &'static [&'static str],
}

const fn route(
    prefix: &'static [&'static str],
    query: &'static str,
    fragment: &'static [&'static str],
) -> QueryRoute {
    QueryRoute {
        prefix,
        query,
        fragment,
    }
}

pub const ROUTES: [QueryRoute; 6] = [
    route(&["hero"], "homepage", &["heroBanner"]),
    route(&["ctaBanner"], "homepage", &["ctaBanner"]),
    route(&["navigation"], "navigation", &[]),
    route(&["featureCards", "items"], "feature-cards", &[]),
    route(&["latestNews", "articles"], "latest-news", &[]),
    route(&["footer"], "footer", &[]),
];

/// A key's query and the path to walk inside its unwrapped response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTarget<'k> {
    pub query: String,
    pub path: Vec<&'k str>,
}

/// Route `key` by its longest matching prefix, or by its first segment.
pub fn target_for(key: &ContentKey) -> QueryTarget<'_> {
    let segments: Vec<&str> = key.segments().collect();
    let matched = ROUTES
        .iter()
        .filter(|r| segments.starts_with(r.prefix))
        .max_by_key(|r| r.prefix.len());
    match matched {
        Some(r) => QueryTarget {
            query: r.query.to_string(),
            path: r
                .fragment
                .iter()
                .copied()
                .chain(segments[r.prefix.len()..].iter().copied())
                .collect(),
        },
        None => QueryTarget {
            query: kebab_case(key.head()),
            path: key.rest().collect(),
        },
    }
}

fn query_url(host: &str, query_path: &str, project: &str, query: &str) -> String {
    format!("{host}{query_path}/{project}/{query}")
}

/// Request URL for a persisted query under the given remote settings.
pub fn persisted_query_url(remote: &RemoteConfig, query: &str) -> String {
    query_url(
        remote.host().unwrap_or_default(),
        &remote.query_path,
        &remote.project,
        query,
    )
}

// ============================================================================
// Source
// ============================================================================

/// Content fetched from a remote CMS over persisted queries.
pub struct RemoteSource<T> {
    host: String,
    query_path: String,
    project: String,
    auth_token: Option<String>,
    transport: T,
}

impl<T: Transport> RemoteSource<T> {
    pub fn new(config: &RemoteConfig, transport: T) -> Self {
        Self {
            host: config.host().unwrap_or_default().to_string(),
            query_path: config.query_path.clone(),
            project: config.project.clone(),
            auth_token: config.auth_token().map(str::to_string),
            transport,
        }
    }

    /// Full request URL for a key.
    pub fn url_for(&self, key: &ContentKey) -> String {
        query_url(&self.host, &self.query_path, &self.project, &target_for(key).query)
    }

    fn fetch(&self, key: &ContentKey, query: &str) -> Result<Value, UnavailableCause> {
        let url = query_url(&self.host, &self.query_path, &self.project, query);
        tracing::debug!(%url, key = %key, "fetching remote content");

        let response = self
            .transport
            .get(&url, self.auth_token.as_deref())
            .map_err(|e| UnavailableCause::Network(e.0))?;
        if !(200..300).contains(&response.status) {
            return Err(UnavailableCause::Status(response.status));
        }
        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| UnavailableCause::Malformed(e.to_string()))?;
        Ok(unwrap_envelope(body))
    }

    /// Fetch the key's query and walk the remaining segments.
    fn resolve_leaf<R>(
        &self,
        key: &ContentKey,
        shape: impl FnOnce(&Value) -> Result<R, ContentError>,
    ) -> Result<R, ContentError> {
        let unavailable = |cause| ContentError::Unavailable {
            key: key.to_string(),
            cause,
        };
        let target = target_for(key);
        let body = self.fetch(key, &target.query).map_err(unavailable)?;
        let leaf = walk(&body, target.path.iter().copied())
            .ok_or_else(|| unavailable(UnavailableCause::MissingField(key.to_string())))?;
        shape(leaf).map_err(|e| {
            let cause = UnavailableCause::Malformed(e.to_string());
            tracing::debug!(key = %key, %cause, "remote content has unexpected shape");
            unavailable(cause)
        })
    }
}

impl<T: Transport> ContentSource for RemoteSource<T> {
    fn resolve_scalar(&self, key: &ContentKey) -> Result<String, ContentError> {
        self.resolve_leaf(key, |v| scalar_from(v, key))
    }

    fn resolve_collection(&self, key: &ContentKey) -> Result<Vec<Record>, ContentError> {
        self.resolve_leaf(key, |v| collection_from(v, key))
    }

    fn resolve_record(&self, key: &ContentKey) -> Result<Record, ContentError> {
        self.resolve_leaf(key, |v| record_from(v, key))
    }

    fn describe(&self) -> String {
        format!("remote CMS {}{}", self.host, self.query_path)
    }
}

/// Strip `data` and a single `{name: {item|items: X}}` wrapper.
fn unwrap_envelope(body: Value) -> Value {
    let body = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => return other,
    };
    match body {
        Value::Object(map) if map.len() == 1 => {
            let (name, inner) = map.into_iter().next().unwrap_or_default();
            match inner {
                Value::Object(mut wrapper) if wrapper.len() == 1 => {
                    match wrapper.remove("item").or_else(|| wrapper.remove("items")) {
                        Some(fragment) => fragment,
                        None => rewrap(name, Value::Object(wrapper)),
                    }
                }
                other => rewrap(name, other),
            }
        }
        other => other,
    }
}

fn rewrap(name: String, value: Value) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(name, value);
    Value::Object(map)
}

/// `latestNews` → `latest-news`.
pub(crate) fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockTransport;
    use serde_json::json;

    fn key(raw: &str) -> ContentKey {
        ContentKey::parse(raw).unwrap()
    }

    fn config() -> RemoteConfig {
        RemoteConfig {
            host: "https://cms.example.com".into(),
            auth_token: "s3cret".into(),
            ..RemoteConfig::default()
        }
    }

    /// The homepage response as the CMS documents it.
    const HOMEPAGE_RESPONSE: &str = r#"{
      "data": {
        "homepageByPath": {
          "item": {
            "heroBanner": {
              "headingLine1": "Make your",
              "headingLine2": "money work",
              "headingAccent": "harder",
              "description": "Good habits means...",
              "backgroundImage": {
                "_dynamicUrl": "/adobe/dynamicmedia/deliver/dm-aid--abc123/hero.jpg",
                "width": 1920,
                "height": 800
              },
              "ctaLabel": "Discover more",
              "ctaUrl": "/advice"
            }
          }
        }
      }
    }"#;

    #[test]
    fn keys_route_to_registered_queries() {
        let source = RemoteSource::new(&config(), MockTransport::ok("{}"));
        let base = "https://cms.example.com/graphql/execute.json/site";
        for (raw, query) in [
            ("hero", "homepage"),
            ("hero.headingLine1", "homepage"),
            ("ctaBanner", "homepage"),
            ("navigation", "navigation"),
            ("featureCards.items", "feature-cards"),
            ("latestNews.articles", "latest-news"),
            ("footer.copyright", "footer"),
        ] {
            assert_eq!(source.url_for(&key(raw)), format!("{base}/{query}"), "{raw}");
        }
    }

    #[test]
    fn every_route_targets_a_registered_query() {
        for route in ROUTES {
            assert!(PERSISTED_QUERIES.contains(&route.query), "{}", route.query);
        }
    }

    #[test]
    fn unrouted_keys_fall_back_to_head() {
        let k = key("clientLinks.title");
        let target = target_for(&k);
        assert_eq!(target.query, "client-links");
        assert_eq!(target.path, vec!["title"]);
    }

    #[test]
    fn route_path_prepends_fragment() {
        let k = key("hero.backgroundImage._dynamicUrl");
        assert_eq!(
            target_for(&k).path,
            vec!["heroBanner", "backgroundImage", "_dynamicUrl"]
        );
        let k = key("latestNews.articles");
        assert!(target_for(&k).path.is_empty());
    }

    #[test]
    fn free_url_matches_source_url() {
        let source = RemoteSource::new(&config(), MockTransport::ok("{}"));
        assert_eq!(
            persisted_query_url(&config(), "feature-cards"),
            source.url_for(&key("featureCards.items"))
        );
    }

    #[test]
    fn hero_resolves_from_homepage_response() {
        let source = RemoteSource::new(&config(), MockTransport::ok(HOMEPAGE_RESPONSE));
        assert_eq!(
            source.resolve_scalar(&key("hero.headingAccent")).unwrap(),
            "harder"
        );
        let record = source.resolve_record(&key("hero")).unwrap();
        assert_eq!(record["ctaLabel"], json!("Discover more"));
        assert_eq!(
            record["backgroundImage"]["_dynamicUrl"],
            json!("/adobe/dynamicmedia/deliver/dm-aid--abc123/hero.jpg")
        );
    }

    #[test]
    fn cta_missing_from_homepage_is_missing_field() {
        let source = RemoteSource::new(&config(), MockTransport::ok(HOMEPAGE_RESPONSE));
        let err = source.resolve_record(&key("ctaBanner")).unwrap_err();
        assert_eq!(
            err.cause(),
            Some(&UnavailableCause::MissingField("ctaBanner".into()))
        );
    }

    #[test]
    fn news_list_resolves_as_collection() {
        let body = json!({"data": {"newsArticleList": {"items": [
            {"_path": "/content/dam/site/news/budget", "title": "Budget", "slug": "budget"},
            {"_path": "/content/dam/site/news/isa", "title": "ISA", "slug": "isa"},
        ]}}});
        let source = RemoteSource::new(&config(), MockTransport::ok(&body.to_string()));
        let records = source.resolve_collection(&key("latestNews.articles")).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Budget", "ISA"]);
    }

    #[test]
    fn feature_card_list_resolves_as_collection() {
        let body = json!({"data": {"featureCardList": {"items": [
            {"title": "Advice that lasts"},
            {"title": "Build your career"},
        ]}}});
        let source = RemoteSource::new(&config(), MockTransport::ok(&body.to_string()));
        let records = source.resolve_collection(&key("featureCards.items")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["title"], json!("Build your career"));
    }

    #[test]
    fn failure_causes_converge_on_unavailable() {
        let failures = [
            (MockTransport::status(500), UnavailableCause::Status(500)),
            (
                MockTransport::network("connection refused"),
                UnavailableCause::Network("connection refused".into()),
            ),
        ];
        for (transport, expected) in failures {
            let source = RemoteSource::new(&config(), transport);
            let err = source.resolve_scalar(&key("hero.headingLine1")).unwrap_err();
            assert!(err.is_unavailable());
            assert_eq!(err.cause(), Some(&expected));
        }

        let source = RemoteSource::new(&config(), MockTransport::ok("<html>oops</html>"));
        let err = source.resolve_scalar(&key("hero.headingLine1")).unwrap_err();
        assert!(matches!(err.cause(), Some(UnavailableCause::Malformed(_))));
    }

    #[test]
    fn missing_field_is_unavailable_not_key_not_found() {
        let source = RemoteSource::new(&config(), MockTransport::ok(r#"{"data": {"a": "b"}}"#));
        let err = source.resolve_scalar(&key("hero.headingLine1")).unwrap_err();
        assert_eq!(
            err.cause(),
            Some(&UnavailableCause::MissingField("hero.headingLine1".into()))
        );
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let transport = MockTransport::ok(r#"{"heroBanner": {"title": 7}}"#);
        let source = RemoteSource::new(&config(), transport);
        let err = source.resolve_scalar(&key("hero.title")).unwrap_err();
        assert!(matches!(err.cause(), Some(UnavailableCause::Malformed(_))));
    }

    #[test]
    fn sends_bearer_token() {
        let transport = MockTransport::ok("{}");
        let source = RemoteSource::new(&config(), transport.clone());
        let _ = source.resolve_record(&key("hero"));
        assert_eq!(transport.bearers(), vec![Some("s3cret".to_string())]);
    }

    #[test]
    fn no_token_when_unset() {
        let transport = MockTransport::ok("{}");
        let mut cfg = config();
        cfg.auth_token.clear();
        let source = RemoteSource::new(&cfg, transport.clone());
        let _ = source.resolve_record(&key("hero"));
        assert_eq!(transport.bearers(), vec![None]);
    }

    #[test]
    fn every_call_fetches_fresh() {
        let transport = MockTransport::ok(r#"{"heroBanner": {"headingLine1": "x"}}"#);
        let source = RemoteSource::new(&config(), transport.clone());
        source.resolve_scalar(&key("hero.headingLine1")).unwrap();
        source.resolve_scalar(&key("hero.headingLine1")).unwrap();
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn envelope_with_several_members_is_kept() {
        let body = json!({"data": {"a": {"item": 1}, "b": 2}});
        assert_eq!(unwrap_envelope(body), json!({"a": {"item": 1}, "b": 2}));
        let body = json!({"data": {"section": {"title": "t"}}});
        assert_eq!(unwrap_envelope(body), json!({"section": {"title": "t"}}));
    }

    #[test]
    fn kebab_case_names() {
        assert_eq!(kebab_case("latestNews"), "latest-news");
        assert_eq!(kebab_case("featureCards"), "feature-cards");
        assert_eq!(kebab_case("hero"), "hero");
        assert_eq!(kebab_case("ctaBanner"), "cta-banner");
    }
}
