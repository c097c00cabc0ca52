use super::{CallToAction, ContentModel, FieldKind, FieldSpec, field, image, text};
use crate::assets::AssetResolver;
use crate::content::Record;
use serde::Serialize;

/// The homepage hero: a three-part heading, copy, one CTA and a backdrop.
pub struct HeroBanner;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBannerProps {
    pub heading_line1: Option<String>,
    pub heading_line2: Option<String>,
    pub heading_accent: Option<String>,
    pub description: Option<String>,
    pub cta: CallToAction,
    /// Absent means the component shows its gradient fallback.
    pub background_image: Option<String>,
}

impl ContentModel for HeroBanner {
    const NAME: &'static str = "Hero Banner";
    const TARGET: &'static str = "HeroBanner";
    const FIELDS: &'static [FieldSpec] = &[
        field("headingLine1", "headingLine1", FieldKind::Text),
        field("headingLine2", "headingLine2", FieldKind::Text),
        field("headingAccent", "headingAccent", FieldKind::Text),
        field("description", "description", FieldKind::PlainText),
        field("ctaLabel", "cta.label", FieldKind::Nested("CallToAction")),
        field("ctaUrl", "cta.href", FieldKind::Nested("CallToAction")),
        field("backgroundImage", "backgroundImage", FieldKind::ImageRef),
    ];
    type Props = HeroBannerProps;

    fn map(raw: &Record, assets: &AssetResolver) -> HeroBannerProps {
        HeroBannerProps {
            heading_line1: text(raw, "headingLine1"),
            heading_line2: text(raw, "headingLine2"),
            heading_accent: text(raw, "headingAccent"),
            description: text(raw, "description"),
            cta: CallToAction::from_flat(raw, "ctaLabel", "ctaUrl"),
            background_image: image(raw, "backgroundImage", assets),
        }
    }
}
