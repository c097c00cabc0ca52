//! Presentation components.
//!
//! Each component is a stateless maud function from its props (plus the
//! editor attributes for its root element) to [`Markup`](maud::Markup).
//! Components own their fallbacks: an absent image renders a placeholder or
//! a gradient, an absent CTA href renders `#`. Nothing here touches a
//! content source.
//!
//! | Component | Props | Root element |
//! |-----------|-------|--------------|
//! | [`header`] | [`HeaderProps`] + [`MenuState`] | `header.site-header` |
//! | [`hero`] | [`HeroBannerProps`](crate::models::HeroBannerProps) | `section.hero-banner` |
//! | [`client_links`] | [`ClientLinksProps`] | `aside.client-links` |
//! | [`feature_card`] | [`FeatureCardProps`](crate::models::FeatureCardProps) | `article.feature-card` |
//! | [`latest_news`] | [`LatestNewsProps`] | `section.latest-news` |
//! | [`cta_banner`] | [`CtaBannerProps`](crate::models::CtaBannerProps) | `section.cta-banner` |
//! | [`footer`] | [`FooterProps`] | `footer.site-footer` |

pub mod client_links;
pub mod cta_banner;
pub mod feature_card;
pub mod footer;
pub mod header;
pub mod hero;
mod icons;
pub mod latest_news;

pub use client_links::ClientLinksProps;
pub use footer::FooterProps;
pub use header::{HeaderProps, MenuState};
pub use latest_news::{BorderColor, LatestNewsProps};

use crate::models::PLACEHOLDER_HREF;

/// Href to render for an optional destination.
pub(crate) fn href_or_placeholder(href: Option<&str>) -> &str {
    href.filter(|h| !h.is_empty()).unwrap_or(PLACEHOLDER_HREF)
}

/// Inline `background-image` style, or nothing so the CSS gradient shows.
pub(crate) fn background_style(image: Option<&str>) -> Option<String> {
    image.map(|url| format!("background-image: url(\"{}\")", css_string(url)))
}

/// Escape a value for a double-quoted CSS string.
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}
