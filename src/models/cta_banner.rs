use super::{CallToAction, ContentModel, FieldKind, FieldSpec, field, image, text};
use crate::assets::AssetResolver;
use crate::content::Record;
use serde::Serialize;

pub struct CtaBanner;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaBannerProps {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub cta: CallToAction,
    pub background_image: Option<String>,
}

impl ContentModel for CtaBanner {
    const NAME: &'static str = "CTA Banner";
    const TARGET: &'static str = "CTABanner";
    const FIELDS: &'static [FieldSpec] = &[
        field("heading", "heading", FieldKind::Text),
        field("description", "description", FieldKind::PlainText),
        field("ctaLabel", "cta.label", FieldKind::Nested("CallToAction")),
        field("ctaUrl", "cta.href", FieldKind::Nested("CallToAction")),
        field("backgroundImage", "backgroundImage", FieldKind::ImageRef),
    ];
    type Props = CtaBannerProps;

    fn map(raw: &Record, assets: &AssetResolver) -> CtaBannerProps {
        CtaBannerProps {
            heading: text(raw, "heading"),
            description: text(raw, "description"),
            cta: CallToAction::from_flat(raw, "ctaLabel", "ctaUrl"),
            background_image: image(raw, "backgroundImage", assets),
        }
    }
}
