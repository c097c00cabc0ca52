//! Content models and their field mappers.
//!
//! Each content model is a fixed list of `(sourceField, targetProp, kind)`
//! triples plus a pure function that turns a raw [`Record`] into the prop
//! struct its presentation component renders. Mappers are total: a missing or
//! mistyped field leaves only its own prop empty, and unknown fields are
//! ignored.
//!
//! | Model | Mapper | Component |
//! |-------|--------|-----------|
//! | [`HeroBanner`] | [`HeroBanner::map`] | `components::hero` |
//! | [`FeatureCard`] | [`FeatureCard::map`] | `components::feature_card` |
//! | [`NewsArticle`] | [`NewsArticle::map`] | `components::latest_news` |
//! | [`CtaBanner`] | [`CtaBanner::map`] | `components::cta_banner` |
//! | [`Navigation`] | [`Navigation::map`] | `components::header` + `components::footer` |
//!
//! Value kinds follow one policy everywhere:
//!
//! - text is copied verbatim, never defaulted;
//! - image references go through the [`AssetResolver`];
//! - link lists become [`LinkItem`]s, with `#` for an entry without a href;
//! - nested models are reassembled from flat source fields (`ctaLabel` and
//!   `ctaUrl` become `cta.label` and `cta.href`).

mod cta_banner;
mod feature_card;
mod hero;
mod navigation;
mod news;

pub use cta_banner::{CtaBanner, CtaBannerProps};
pub use feature_card::{Decoration, FeatureCard, FeatureCardProps};
pub use hero::{HeroBanner, HeroBannerProps};
pub use navigation::{FooterSection, Navigation, NavigationProps};
pub use news::{NewsArticle, NewsArticleProps, parse_date};

use crate::assets::AssetResolver;
use crate::content::{Record, to_records};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Href given to links whose destination has not been wired yet.
pub const PLACEHOLDER_HREF: &str = "#";

/// How a source field's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Plain-string description copy.
    PlainText,
    ImageRef,
    Numeric,
    LinkList,
    /// Part of a nested model assembled from flat fields.
    Nested(&'static str),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::PlainText => f.write_str("plain text"),
            Self::ImageRef => f.write_str("image ref"),
            Self::Numeric => f.write_str("numeric"),
            Self::LinkList => f.write_str("link list"),
            Self::Nested(model) => write!(f, "nested {model}"),
        }
    }
}

/// One `(sourceField, targetProp, kind)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub source: &'static str,
    pub target: &'static str,
    pub kind: FieldKind,
}

pub(crate) const fn field(
    source: &'static str,
    target: &'static str,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        source,
        target,
        kind,
    }
}

/// A named content schema with its mapper.
pub trait ContentModel {
    /// Display name, e.g. "Hero Banner".
    const NAME: &'static str;
    /// Component that renders the mapped props.
    const TARGET: &'static str;
    const FIELDS: &'static [FieldSpec];
    type Props;

    fn map(raw: &Record, assets: &AssetResolver) -> Self::Props;
}

/// Static description of a model, for the `status` dashboard.
#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub name: &'static str,
    pub target: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ModelInfo {
    fn of<M: ContentModel>() -> Self {
        Self {
            name: M::NAME,
            target: M::TARGET,
            fields: M::FIELDS,
        }
    }
}

/// All content models, in the order the homepage composes them.
pub fn catalog() -> [ModelInfo; 5] {
    [
        ModelInfo::of::<Navigation>(),
        ModelInfo::of::<HeroBanner>(),
        ModelInfo::of::<FeatureCard>(),
        ModelInfo::of::<NewsArticle>(),
        ModelInfo::of::<CtaBanner>(),
    ]
}

/// A rendered link: label and destination, order significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkItem {
    pub label: String,
    pub href: String,
}

impl LinkItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Build from a `{label, href}` record. A missing or empty href becomes `#`.
    pub fn from_record(record: &Record) -> Self {
        Self {
            label: text(record, "label").unwrap_or_default(),
            href: text(record, "href")
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_HREF.to_string()),
        }
    }
}

/// Nested call-to-action, reassembled from flat `ctaLabel` / `ctaUrl` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: Option<String>,
    pub href: Option<String>,
}

impl CallToAction {
    pub(crate) fn from_flat(raw: &Record, label_field: &str, href_field: &str) -> Self {
        Self {
            label: text(raw, label_field),
            href: text(raw, href_field),
        }
    }
}

// ============================================================================
// Field extraction
// ============================================================================

/// A string field, verbatim. Any other JSON type counts as absent.
pub(crate) fn text(raw: &Record, field: &str) -> Option<String> {
    raw.get(field).and_then(Value::as_str).map(str::to_string)
}

/// A non-negative integer, given as a JSON number or a numeric string.
pub(crate) fn number(raw: &Record, field: &str) -> Option<u32> {
    match raw.get(field)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// An image reference resolved through the asset resolver.
///
/// Accepts a bare path or a DAM object carrying `_dynamicUrl` (or `_path`).
/// Empty paths count as absent so the component shows its fallback.
pub(crate) fn image(raw: &Record, field: &str, assets: &AssetResolver) -> Option<String> {
    let path = match raw.get(field)? {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj
            .get("_dynamicUrl")
            .or_else(|| obj.get("_path"))
            .and_then(Value::as_str)?,
        _ => return None,
    };
    (!path.is_empty()).then(|| assets.resolve(path))
}

/// A link list in any of its raw shapes, in source order.
pub(crate) fn links(raw: &Record, field: &str) -> Vec<LinkItem> {
    raw.get(field).map(links_from_value).unwrap_or_default()
}

pub(crate) fn links_from_value(value: &Value) -> Vec<LinkItem> {
    records(value).iter().map(LinkItem::from_record).collect()
}

/// Ordered records from an array or object value; malformed input yields none.
pub(crate) fn records(value: &Value) -> Vec<Record> {
    to_records(value).unwrap_or_default()
}
