//! Site header with the mobile menu toggle.
//!
//! The menu has two states and one transition:
//!
//! ```text
//!   Closed ──toggle──▶ Open
//!     ▲                  │
//!     └──────toggle──────┘
//! ```
//!
//! The server render reflects the state in `aria-expanded` on the hamburger
//! button and the `mobile-menu-open` class on the menu. The page's inline
//! script flips the same two markers in the browser.

use super::icons;
use crate::editor::EditorAttrs;
use crate::models::LinkItem;
use maud::{Markup, html};
use serde::Serialize;

pub const MOBILE_MENU_ID: &str = "mobile-menu";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggle(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    fn aria_expanded(self) -> &'static str {
        if self.is_open() { "true" } else { "false" }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderProps {
    pub main_nav: Vec<LinkItem>,
    pub utility_nav: Vec<LinkItem>,
    pub search: Option<String>,
    pub partner_area: Option<String>,
    pub client_sign_in: Option<String>,
    pub menu_label: Option<String>,
}

pub fn render(props: &HeaderProps, menu: MenuState, editor: EditorAttrs<'_>) -> Markup {
    let search = props.search.as_deref().unwrap_or_default();
    html! {
        header.site-header
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.top-bar {
                button.search-button type="button" aria-label=(search) {
                    (icons::SEARCH)
                    span { (search) }
                }
                nav aria-label="Utility navigation" {
                    ul.top-nav {
                        @for link in &props.utility_nav {
                            li { a.top-nav-link href=(link.href) { (link.label) } }
                        }
                    }
                }
            }
            hr.divider;
            div.main-bar {
                a.logo-link href="/" aria-label="Home" {
                    span.logo { "St. James's Place" }
                }
                nav.main-nav aria-label="Main navigation" {
                    ul {
                        @for link in &props.main_nav {
                            li { a.main-nav-link href=(link.href) { (link.label) } }
                        }
                    }
                }
                div.cta-buttons {
                    (sign_in_links(props, "cta-button"))
                }
                button.hamburger
                    type="button"
                    aria-expanded=(menu.aria_expanded())
                    aria-controls=(MOBILE_MENU_ID)
                    aria-label=[props.menu_label.as_deref()]
                {
                    (icons::HAMBURGER)
                    (icons::CLOSE)
                }
            }
            nav.mobile-menu.mobile-menu-open[menu.is_open()] id=(MOBILE_MENU_ID) aria-label="Mobile navigation" {
                button.mobile-search type="button" {
                    (icons::SEARCH)
                    span { (search) }
                }
                ul.mobile-nav {
                    @for link in &props.main_nav {
                        li { a href=(link.href) { (link.label) } }
                    }
                }
                ul.mobile-utility {
                    @for link in &props.utility_nav {
                        li { a href=(link.href) { (link.label) } }
                    }
                }
                div.mobile-ctas {
                    (sign_in_links(props, "mobile-cta"))
                }
            }
        }
    }
}

fn sign_in_links(props: &HeaderProps, class: &str) -> Markup {
    html! {
        a class=(class) href="/partner-area" {
            (icons::PERSON)
            @if let Some(label) = &props.partner_area { (label) }
        }
        a class=(class) href="/client-sign-in" {
            (icons::PERSON)
            @if let Some(label) = &props.client_sign_in { (label) }
        }
    }
}
