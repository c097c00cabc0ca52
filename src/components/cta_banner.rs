use super::background_style;
use crate::editor::EditorAttrs;
use crate::models::CtaBannerProps;
use maud::{Markup, html};

/// Destination used when the banner's CTA has no href of its own.
pub const DEFAULT_CTA_HREF: &str = "/find-an-adviser";

pub fn render(props: &CtaBannerProps, editor: EditorAttrs<'_>) -> Markup {
    let href = props
        .cta
        .href
        .as_deref()
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_CTA_HREF);
    html! {
        section.cta-banner
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.cta-background style=[background_style(props.background_image.as_deref())] {}
            div.cta-overlay {}
            div.cta-content {
                @if let Some(heading) = &props.heading { h2.cta-heading { (heading) } }
                @if let Some(description) = &props.description { p.cta-description { (description) } }
                @if let Some(label) = &props.cta.label {
                    a.cta-banner-button href=(href) { (label) }
                }
            }
        }
    }
}
