use super::icons;
use crate::editor::EditorAttrs;
use crate::models::{FooterSection, LinkItem};
use maud::{Markup, html};
use serde::Serialize;

pub const FIND_ADVISER_HREF: &str = "/find-an-adviser";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterProps {
    pub sections: Vec<FooterSection>,
    pub legal_links: Vec<LinkItem>,
    pub follow_us: Option<String>,
    pub find_adviser: Option<String>,
    pub copyright: Option<String>,
}

pub fn render(props: &FooterProps, editor: EditorAttrs<'_>) -> Markup {
    html! {
        footer.site-footer
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.footer-container {
                div.footer-logo { span.logo { "St James's Place" } }
                div.footer-columns {
                    @for section in &props.sections {
                        div.footer-column {
                            @if let Some(title) = &section.title { h3.column-title { (title) } }
                            ul {
                                @for link in &section.links {
                                    li { a href=(link.href) { (link.label) } }
                                }
                            }
                        }
                    }
                }
                div.footer-social {
                    @if let Some(follow) = &props.follow_us { h3.column-title { (follow) } }
                    div.social-icons {
                        @for platform in icons::SOCIAL_PLATFORMS {
                            a.social-link href={ "#" (platform) } aria-label=(platform) {
                                span.social-icon { (icons::social(platform)) }
                            }
                        }
                    }
                    @if let Some(label) = &props.find_adviser {
                        a.find-adviser href=(FIND_ADVISER_HREF) {
                            (icons::SEARCH)
                            (label)
                        }
                    }
                }
            }
            div.legal-bar {
                @if let Some(copyright) = &props.copyright { span.copyright { (copyright) } }
                nav.legal-links aria-label="Legal links" {
                    @for (i, link) in props.legal_links.iter().enumerate() {
                        @if i > 0 { span.legal-separator { "|" } }
                        a href=(link.href) { (link.label) }
                    }
                }
            }
        }
    }
}
