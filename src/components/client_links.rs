use super::icons;
use crate::editor::EditorAttrs;
use crate::models::LinkItem;
use maud::{Markup, html};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientLinksProps {
    pub title: Option<String>,
    pub links: Vec<LinkItem>,
}

/// Quick links panel overlapping the hero.
pub fn render(props: &ClientLinksProps, editor: EditorAttrs<'_>) -> Markup {
    html! {
        aside.client-links
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.client-links-header {
                (icons::ARROW_CIRCLE)
                @if let Some(title) = &props.title { span.client-links-title { (title) } }
            }
            ul.client-links-list {
                @for link in &props.links {
                    li { a href=(link.href) { (link.label) } }
                }
            }
        }
    }
}
