use super::{ContentModel, FieldKind, FieldSpec, LinkItem, field, image, links, text};
use crate::assets::AssetResolver;
use crate::content::Record;
use serde::Serialize;
use std::fmt;

/// A homepage feature card: copy, a link list, a CTA and an optional image.
pub struct FeatureCard;

/// Artwork drawn behind a feature card's image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    #[default]
    None,
    Starburst,
    Watercolour,
}

impl Decoration {
    /// Unknown values fall back to [`Decoration::None`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "starburst" => Self::Starburst,
            "watercolour" | "watercolor" => Self::Watercolour,
            _ => Self::None,
        }
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Starburst => "starburst",
            Self::Watercolour => "watercolour",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCardProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub links: Vec<LinkItem>,
    pub cta_text: Option<String>,
    pub cta_href: Option<String>,
    pub image_src: Option<String>,
    pub image_alt: Option<String>,
    pub decoration_type: Decoration,
}

impl ContentModel for FeatureCard {
    const NAME: &'static str = "Feature Card";
    const TARGET: &'static str = "FeatureCard";
    const FIELDS: &'static [FieldSpec] = &[
        field("title", "title", FieldKind::Text),
        field("description", "description", FieldKind::PlainText),
        field("links", "links", FieldKind::LinkList),
        field("ctaText", "ctaText", FieldKind::Text),
        field("ctaHref", "ctaHref", FieldKind::Text),
        field("imageSrc", "imageSrc", FieldKind::ImageRef),
        field("imageAlt", "imageAlt", FieldKind::Text),
        field("decorationType", "decorationType", FieldKind::Text),
    ];
    type Props = FeatureCardProps;

    fn map(raw: &Record, assets: &AssetResolver) -> FeatureCardProps {
        FeatureCardProps {
            title: text(raw, "title"),
            description: text(raw, "description"),
            links: links(raw, "links"),
            cta_text: text(raw, "ctaText"),
            cta_href: text(raw, "ctaHref"),
            image_src: image(raw, "imageSrc", assets),
            image_alt: text(raw, "imageAlt"),
            decoration_type: text(raw, "decorationType")
                .map(|d| Decoration::parse(&d))
                .unwrap_or_default(),
        }
    }
}
