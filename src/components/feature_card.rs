use super::href_or_placeholder;
use crate::editor::EditorAttrs;
use crate::models::{Decoration, FeatureCardProps};
use maud::{Markup, html};

pub fn render(props: &FeatureCardProps, editor: EditorAttrs<'_>) -> Markup {
    html! {
        article.feature-card
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.feature-content {
                @if let Some(title) = &props.title { h2.feature-title { (title) } }
                @if let Some(description) = &props.description { p.feature-description { (description) } }
                @if !props.links.is_empty() {
                    ul.feature-links {
                        @for link in &props.links {
                            li { a href=(link.href) { (link.label) } }
                        }
                    }
                }
                @if let Some(text) = &props.cta_text {
                    a.feature-cta href=(href_or_placeholder(props.cta_href.as_deref())) { (text) }
                }
            }
            div.feature-image {
                @if props.decoration_type != Decoration::None {
                    div class={ "decoration " (props.decoration_type.to_string()) } {}
                }
                @match &props.image_src {
                    Some(src) => {
                        img src=(src) alt=(props.image_alt.as_deref().unwrap_or_default());
                    }
                    None => {
                        div.image-placeholder aria-hidden="true" {}
                    }
                }
            }
        }
    }
}
