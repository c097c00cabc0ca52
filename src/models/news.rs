use super::{ContentModel, FieldKind, FieldSpec, field, image, number, text};
use crate::assets::AssetResolver;
use crate::content::Record;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// One news article teaser.
pub struct NewsArticle;

/// Accepted article date formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %B %Y", "%d %b %Y"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticleProps {
    pub id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    /// Display string, verbatim.
    pub date: Option<String>,
    pub read_time: Option<u32>,
    pub image: Option<String>,
    pub href: Option<String>,
}

impl NewsArticleProps {
    /// Publication date, when `date` parses.
    pub fn published(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }
}

impl ContentModel for NewsArticle {
    const NAME: &'static str = "News Article";
    const TARGET: &'static str = "NewsCard";
    const FIELDS: &'static [FieldSpec] = &[
        field("_path", "id", FieldKind::Text),
        field("title", "title", FieldKind::Text),
        field("category", "category", FieldKind::Text),
        field("date", "date", FieldKind::Text),
        field("readTime", "readTime", FieldKind::Numeric),
        field("image", "image", FieldKind::ImageRef),
        field("slug", "href", FieldKind::Text),
    ];
    type Props = NewsArticleProps;

    fn map(raw: &Record, assets: &AssetResolver) -> NewsArticleProps {
        NewsArticleProps {
            id: text(raw, "_path"),
            title: text(raw, "title"),
            category: text(raw, "category"),
            date: text(raw, "date"),
            read_time: number(raw, "readTime"),
            image: image(raw, "image", assets),
            href: text(raw, "slug")
                .filter(|s| !s.is_empty())
                .map(|slug| format!("/news/{}", slug.trim_start_matches('/'))),
        }
    }
}

/// Parse an ISO date, a `14 March 2024` date, or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
