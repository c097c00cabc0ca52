//! In-context editing seam.
//!
//! A visual page editor loads the rendered homepage with `?wcmmode=edit` (or
//! `preview`) and needs two things from it: a registry telling it which
//! component lives under which resource type, and markers on each component
//! root so it can overlay its editing chrome.
//!
//! Registration goes through the [`EditorBridge`] trait so the crate never
//! depends on a particular editor. [`ComponentRegistry`] is the in-process
//! implementation the build uses.
//!
//! ```text
//! register_home_components(&mut registry, "site")
//!   site/components/header        → Header
//!   site/components/hero-banner   → HeroBanner
//!   ...
//! ```
//!
//! Outside author mode the rendered markup carries no editor attributes at all.

use crate::content::Record;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Query parameter the editor sets on pages it loads.
pub const MODE_PARAM: &str = "wcmmode";

/// Label shown by the editor for a component with no content.
pub const DEFAULT_EMPTY_LABEL: &str = "Editable component";

/// True when the page query string asks for edit or preview mode.
///
/// A leading `?` is tolerated and any other parameters are ignored.
pub fn is_author_mode(query: &str) -> bool {
    let query = query.trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .any(|(name, value)| name == MODE_PARAM && matches!(value.as_ref(), "edit" | "preview"))
}

/// Every presentation component on the homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Header,
    HeroBanner,
    ClientLinksPanel,
    FeatureCard,
    LatestNews,
    CtaBanner,
    Footer,
}

impl ComponentKind {
    /// All components, in document order.
    pub const ALL: [ComponentKind; 7] = [
        Self::Header,
        Self::HeroBanner,
        Self::ClientLinksPanel,
        Self::FeatureCard,
        Self::LatestNews,
        Self::CtaBanner,
        Self::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::HeroBanner => "HeroBanner",
            Self::ClientLinksPanel => "ClientLinksPanel",
            Self::FeatureCard => "FeatureCard",
            Self::LatestNews => "LatestNews",
            Self::CtaBanner => "CTABanner",
            Self::Footer => "Footer",
        }
    }

    /// Resource-type suffix: `hero-banner`, `cta-banner`, ...
    pub fn slug(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::HeroBanner => "hero-banner",
            Self::ClientLinksPanel => "client-links-panel",
            Self::FeatureCard => "feature-card",
            Self::LatestNews => "latest-news",
            Self::CtaBanner => "cta-banner",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the editor presents a component.
#[derive(Debug, Clone)]
pub struct EditConfig {
    pub empty_label: String,
    /// Decides emptiness from the component's props, serialized camelCase.
    pub is_empty: fn(&Record) -> bool,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
            is_empty: is_blank,
        }
    }
}

impl EditConfig {
    pub fn labelled(empty_label: &str, is_empty: fn(&Record) -> bool) -> Self {
        Self {
            empty_label: empty_label.to_string(),
            is_empty,
        }
    }
}

/// Registration hook exposed by a page editor.
pub trait EditorBridge {
    fn register_editable_component(
        &mut self,
        resource_type: &str,
        component: ComponentKind,
        config: EditConfig,
    );
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub resource_type: String,
    pub component: ComponentKind,
    pub config: EditConfig,
}

/// Registered components, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: Vec<Registration>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every homepage component under `namespace`.
    pub fn for_home(namespace: &str) -> Self {
        let mut registry = Self::new();
        register_home_components(&mut registry, namespace);
        registry
    }

    pub fn get(&self, component: ComponentKind) -> Option<&Registration> {
        self.entries.iter().find(|r| r.component == component)
    }

    pub fn by_resource_type(&self, resource_type: &str) -> Option<&Registration> {
        self.entries.iter().find(|r| r.resource_type == resource_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EditorBridge for ComponentRegistry {
    /// Re-registering a resource type replaces the earlier entry in place.
    fn register_editable_component(
        &mut self,
        resource_type: &str,
        component: ComponentKind,
        config: EditConfig,
    ) {
        let registration = Registration {
            resource_type: resource_type.to_string(),
            component,
            config,
        };
        match self
            .entries
            .iter_mut()
            .find(|r| r.resource_type == resource_type)
        {
            Some(existing) => *existing = registration,
            None => self.entries.push(registration),
        }
    }
}

/// Register all seven homepage components as `{namespace}/components/{slug}`.
pub fn register_home_components(bridge: &mut dyn EditorBridge, namespace: &str) {
    for component in ComponentKind::ALL {
        let resource_type = format!("{namespace}/components/{}", component.slug());
        bridge.register_editable_component(&resource_type, component, edit_config_for(component));
    }
    tracing::debug!(namespace, count = ComponentKind::ALL.len(), "registered editable components");
}

fn edit_config_for(component: ComponentKind) -> EditConfig {
    match component {
        ComponentKind::HeroBanner => {
            EditConfig::labelled("Hero Banner", |r| is_blank_field(r, "headingLine1"))
        }
        ComponentKind::FeatureCard => {
            EditConfig::labelled("Feature Card", |r| is_blank_field(r, "title"))
        }
        ComponentKind::LatestNews => {
            EditConfig::labelled("Latest News", |r| is_blank_field(r, "articles"))
        }
        ComponentKind::CtaBanner => {
            EditConfig::labelled("CTA Banner", |r| is_blank_field(r, "heading"))
        }
        ComponentKind::ClientLinksPanel => {
            EditConfig::labelled("Client Links", |r| is_blank_field(r, "links"))
        }
        ComponentKind::Header | ComponentKind::Footer => EditConfig::default(),
    }
}

/// True when every field is null, an empty string, or an empty collection.
pub fn is_blank(record: &Record) -> bool {
    record.values().all(is_blank_value)
}

fn is_blank_field(record: &Record, field: &str) -> bool {
    record.get(field).is_none_or(is_blank_value)
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.values().all(is_blank_value),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

// ============================================================================
// Render-time markers
// ============================================================================

/// Editor attributes for one component root. All `None` outside author mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorAttrs<'a> {
    pub resource_type: Option<&'a str>,
    pub empty_label: Option<&'a str>,
    /// `Some("true")` only in author mode, for a component with no content.
    pub empty: Option<&'static str>,
}

/// Whether a render targets the editor, and with which registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorContext<'a> {
    registry: Option<&'a ComponentRegistry>,
}

impl<'a> EditorContext<'a> {
    /// A normal visitor render.
    pub fn live() -> Self {
        Self { registry: None }
    }

    pub fn author(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Author mode when the page query string says so.
    pub fn from_query(query: &str, registry: &'a ComponentRegistry) -> Self {
        if is_author_mode(query) {
            Self::author(registry)
        } else {
            Self::live()
        }
    }

    pub fn is_author(&self) -> bool {
        self.registry.is_some()
    }

    /// Attributes for `component`, judging emptiness from its props.
    pub fn attrs<P: Serialize>(&self, component: ComponentKind, props: &P) -> EditorAttrs<'a> {
        let Some(registration) = self.registry.and_then(|r| r.get(component)) else {
            return EditorAttrs::default();
        };
        let empty = match serde_json::to_value(props) {
            Ok(Value::Object(record)) => (registration.config.is_empty)(&record),
            _ => false,
        };
        EditorAttrs {
            resource_type: Some(registration.resource_type.as_str()),
            empty_label: Some(registration.config.empty_label.as_str()),
            empty: empty.then_some("true"),
        }
    }
}
