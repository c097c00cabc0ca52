use super::{background_style, href_or_placeholder};
use crate::editor::EditorAttrs;
use crate::models::HeroBannerProps;
use maud::{Markup, html};

/// Full-bleed hero. Without a background image the CSS gradient shows through.
pub fn render(props: &HeroBannerProps, editor: EditorAttrs<'_>) -> Markup {
    html! {
        section.hero-banner
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.hero-background style=[background_style(props.background_image.as_deref())] {}
            div.hero-overlay {}
            div.hero-content {
                h1.hero-heading {
                    @if let Some(line) = &props.heading_line1 { span.heading-line { (line) } }
                    @if let Some(line) = &props.heading_line2 { span.heading-line { (line) } }
                    @if let Some(accent) = &props.heading_accent { span.heading-accent { (accent) } }
                }
                @if let Some(description) = &props.description {
                    p.hero-description { (description) }
                }
                @if let Some(label) = &props.cta.label {
                    a.hero-cta href=(href_or_placeholder(props.cta.href.as_deref())) { (label) }
                }
            }
        }
    }
}
