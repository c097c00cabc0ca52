//! Homepage composition.
//!
//! The composer resolves every content slot of the homepage, maps each raw
//! record through its content model, and renders the components in a fixed
//! document order:
//!
//! ```text
//! Header → Hero + ClientLinks → FeatureCards (rows of 2) → LatestNews (3) → CTABanner → Footer
//! ```
//!
//! Slots are independent, so they resolve in parallel with `rayon::join`.
//! Completion order never leaks into the output: results are joined back in
//! declaration order before anything is rendered.
//!
//! Resolution failures never abort a render. Each attempt produces a
//! [`SlotDiagnostic`]; a failed one leaves its props empty and the component
//! falls back to its own defaults.

use crate::assets::AssetResolver;
use crate::components::{
    self, ClientLinksProps, FooterProps, HeaderProps, LatestNewsProps, MenuState,
};
use crate::config::SiteConfig;
use crate::content::{ContentError, ContentKey, ContentSource, Record, UnavailableCause};
use crate::editor::{ComponentKind, EditorContext};
use crate::models::{
    ContentModel, CtaBanner, CtaBannerProps, FeatureCard, FeatureCardProps, HeroBanner,
    HeroBannerProps, Navigation, NavigationProps, NewsArticle, NewsArticleProps,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::cmp::Reverse;
use std::fmt;

/// Number of articles the LatestNews section shows.
pub const LATEST_NEWS_COUNT: usize = 3;

/// Feature cards per grid row.
pub const FEATURE_CARDS_PER_ROW: usize = 2;

const CSS: &str = include_str!("../static/style.css");
const MENU_JS: &str = include_str!("../static/menu.js");

/// Content keys read by the homepage.
pub mod keys {
    pub const NAVIGATION: &str = "navigation";
    pub const HEADER_SEARCH: &str = "header.search";
    pub const HEADER_PARTNER_AREA: &str = "header.partnerArea";
    pub const HEADER_CLIENT_SIGN_IN: &str = "header.clientSignIn";
    pub const HEADER_MENU_LABEL: &str = "header.menuLabel";
    pub const HERO: &str = "hero";
    pub const CLIENT_LINKS_TITLE: &str = "clientLinks.title";
    pub const FEATURE_CARDS: &str = "featureCards.items";
    pub const NEWS_ARTICLES: &str = "latestNews.articles";
    pub const NEWS_TITLE: &str = "latestNews.title";
    pub const NEWS_READ_ALL: &str = "latestNews.readAllNews";
    pub const NEWS_MINUTE_READ: &str = "latestNews.minuteRead";
    pub const CTA_BANNER: &str = "ctaBanner";
    pub const FOOTER_FOLLOW_US: &str = "footer.followUs";
    pub const FOOTER_FIND_ADVISER: &str = "footer.findAdviser";
    pub const FOOTER_COPYRIGHT: &str = "footer.copyright";
}

// ============================================================================
// Diagnostics
// ============================================================================

/// What happened when one slot was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Resolved,
    /// The static document has no such key.
    Missing,
    Unavailable(UnavailableCause),
    /// Bad key or wrong leaf shape.
    Invalid(String),
}

impl SlotOutcome {
    fn from_error(error: &ContentError) -> Self {
        match error {
            ContentError::KeyNotFound(_) => Self::Missing,
            ContentError::Unavailable { cause, .. } => Self::Unavailable(cause.clone()),
            ContentError::WrongKind { .. } | ContentError::InvalidKey(_) => {
                Self::Invalid(error.to_string())
            }
        }
    }
}

impl fmt::Display for SlotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => f.write_str("resolved"),
            Self::Missing => f.write_str("missing"),
            Self::Unavailable(cause) => write!(f, "unavailable ({cause})"),
            Self::Invalid(reason) => write!(f, "invalid ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDiagnostic {
    pub key: String,
    pub outcome: SlotOutcome,
}

impl SlotDiagnostic {
    /// Missing and unavailable content count as failures; invalid keys do not.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, SlotOutcome::Missing | SlotOutcome::Unavailable(_))
    }
}

/// A mapped value with the diagnostics of the slots it read.
type Logged<T> = (T, Vec<SlotDiagnostic>);

/// Resolves keys against a source, recording one diagnostic per attempt.
struct SlotLog<'s> {
    source: &'s dyn ContentSource,
    diagnostics: Vec<SlotDiagnostic>,
}

impl<'s> SlotLog<'s> {
    fn new(source: &'s dyn ContentSource) -> Self {
        Self {
            source,
            diagnostics: Vec::new(),
        }
    }

    fn attempt<T>(
        &mut self,
        raw_key: &str,
        resolve: impl FnOnce(&dyn ContentSource, &ContentKey) -> Result<T, ContentError>,
    ) -> Option<T> {
        let result = ContentKey::parse(raw_key).and_then(|key| resolve(self.source, &key));
        let (outcome, value) = match result {
            Ok(value) => (SlotOutcome::Resolved, Some(value)),
            Err(e) => (SlotOutcome::from_error(&e), None),
        };
        if outcome != SlotOutcome::Resolved {
            tracing::warn!(key = raw_key, %outcome, "content slot not resolved");
        }
        self.diagnostics.push(SlotDiagnostic {
            key: raw_key.to_string(),
            outcome,
        });
        value
    }

    fn scalar(&mut self, key: &str) -> Option<String> {
        self.attempt(key, |source, key| source.resolve_scalar(key))
    }

    fn record(&mut self, key: &str) -> Record {
        self.attempt(key, |source, key| source.resolve_record(key))
            .unwrap_or_default()
    }

    fn collection(&mut self, key: &str) -> Vec<Record> {
        self.attempt(key, |source, key| source.resolve_collection(key))
            .unwrap_or_default()
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Props for every homepage component, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeContent {
    pub header: HeaderProps,
    pub hero: HeroBannerProps,
    pub client_links: ClientLinksProps,
    pub feature_cards: Vec<FeatureCardProps>,
    pub latest_news: LatestNewsProps,
    pub cta_banner: CtaBannerProps,
    pub footer: FooterProps,
}

/// Resolved content plus the outcome of each slot, in composition order.
#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub content: HomeContent,
    pub diagnostics: Vec<SlotDiagnostic>,
}

impl ComposedPage {
    pub fn failures(&self) -> impl Iterator<Item = &SlotDiagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

struct HeaderLabels {
    search: Option<String>,
    partner_area: Option<String>,
    client_sign_in: Option<String>,
    menu_label: Option<String>,
}

struct FooterLabels {
    follow_us: Option<String>,
    find_adviser: Option<String>,
    copyright: Option<String>,
}

/// Builds the homepage's props from a content source.
pub struct PageComposer<'a> {
    source: &'a dyn ContentSource,
    assets: &'a AssetResolver,
}

impl<'a> PageComposer<'a> {
    pub fn new(source: &'a dyn ContentSource, assets: &'a AssetResolver) -> Self {
        Self { source, assets }
    }

    /// Resolve and map every slot.
    pub fn compose(&self) -> ComposedPage {
        let (((navigation, labels), (hero, client_title)), ((cards, news), (cta, footer))) =
            rayon::join(
                || rayon::join(|| self.navigation(), || self.hero()),
                || {
                    rayon::join(
                        || rayon::join(|| self.feature_cards(), || self.latest_news()),
                        || rayon::join(|| self.cta_banner(), || self.footer_labels()),
                    )
                },
            );

        let mut diagnostics = Vec::new();
        let navigation = collect(&mut diagnostics, navigation);
        let labels = collect(&mut diagnostics, labels);
        let hero = collect(&mut diagnostics, hero);
        let client_title = collect(&mut diagnostics, client_title);
        let feature_cards = collect(&mut diagnostics, cards);
        let latest_news = collect(&mut diagnostics, news);
        let cta_banner = collect(&mut diagnostics, cta);
        let footer = collect(&mut diagnostics, footer);

        let content = HomeContent {
            header: HeaderProps {
                main_nav: navigation.main_nav_items.clone(),
                utility_nav: navigation.utility_items.clone(),
                search: labels.search,
                partner_area: labels.partner_area,
                client_sign_in: labels.client_sign_in,
                menu_label: labels.menu_label,
            },
            hero,
            client_links: ClientLinksProps {
                title: client_title,
                links: navigation.client_links.clone(),
            },
            feature_cards,
            latest_news,
            cta_banner,
            footer: FooterProps {
                sections: navigation.footer_sections,
                legal_links: navigation.legal_links,
                follow_us: footer.follow_us,
                find_adviser: footer.find_adviser,
                copyright: footer.copyright,
            },
        };
        tracing::debug!(
            slots = diagnostics.len(),
            failed = diagnostics.iter().filter(|d| d.is_failure()).count(),
            "homepage composed"
        );
        ComposedPage {
            content,
            diagnostics,
        }
    }

    fn log(&self) -> SlotLog<'a> {
        SlotLog::new(self.source)
    }

    fn navigation(&self) -> (Logged<NavigationProps>, Logged<HeaderLabels>) {
        let mut log = self.log();
        let navigation = Navigation::map(&log.record(keys::NAVIGATION), self.assets);
        let nav = (navigation, log.diagnostics);

        let mut log = self.log();
        let labels = HeaderLabels {
            search: log.scalar(keys::HEADER_SEARCH),
            partner_area: log.scalar(keys::HEADER_PARTNER_AREA),
            client_sign_in: log.scalar(keys::HEADER_CLIENT_SIGN_IN),
            menu_label: log.scalar(keys::HEADER_MENU_LABEL),
        };
        (nav, (labels, log.diagnostics))
    }

    fn hero(&self) -> (Logged<HeroBannerProps>, Logged<Option<String>>) {
        let mut log = self.log();
        let hero = HeroBanner::map(&log.record(keys::HERO), self.assets);
        let hero = (hero, log.diagnostics);

        let mut log = self.log();
        let title = log.scalar(keys::CLIENT_LINKS_TITLE);
        (hero, (title, log.diagnostics))
    }

    fn feature_cards(&self) -> Logged<Vec<FeatureCardProps>> {
        let mut log = self.log();
        let cards = log
            .collection(keys::FEATURE_CARDS)
            .iter()
            .map(|raw| FeatureCard::map(raw, self.assets))
            .collect();
        (cards, log.diagnostics)
    }

    fn latest_news(&self) -> Logged<LatestNewsProps> {
        let mut log = self.log();
        let articles = log
            .collection(keys::NEWS_ARTICLES)
            .iter()
            .map(|raw| NewsArticle::map(raw, self.assets))
            .collect();
        let props = LatestNewsProps {
            title: log.scalar(keys::NEWS_TITLE),
            read_all_news: log.scalar(keys::NEWS_READ_ALL),
            minute_read: log.scalar(keys::NEWS_MINUTE_READ),
            articles: select_latest(articles, LATEST_NEWS_COUNT),
        };
        (props, log.diagnostics)
    }

    fn cta_banner(&self) -> Logged<CtaBannerProps> {
        let mut log = self.log();
        let props = CtaBanner::map(&log.record(keys::CTA_BANNER), self.assets);
        (props, log.diagnostics)
    }

    fn footer_labels(&self) -> Logged<FooterLabels> {
        let mut log = self.log();
        let labels = FooterLabels {
            follow_us: log.scalar(keys::FOOTER_FOLLOW_US),
            find_adviser: log.scalar(keys::FOOTER_FIND_ADVISER),
            copyright: log.scalar(keys::FOOTER_COPYRIGHT),
        };
        (labels, log.diagnostics)
    }
}

fn collect<T>(into: &mut Vec<SlotDiagnostic>, (value, diagnostics): Logged<T>) -> T {
    into.extend(diagnostics);
    value
}

/// The `count` most recent articles, newest first.
///
/// Undated or unparseable articles sort after all dated ones. The sort is
/// stable, so equal dates keep their source order.
pub fn select_latest(mut articles: Vec<NewsArticleProps>, count: usize) -> Vec<NewsArticleProps> {
    articles.sort_by_key(|a| {
        let published = a.published();
        (published.is_none(), Reverse(published))
    });
    articles.truncate(count);
    articles
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the homepage document.
pub fn render_home(
    content: &HomeContent,
    config: &SiteConfig,
    editor: &EditorContext<'_>,
    menu: MenuState,
) -> Markup {
    let body = html! {
        (components::header::render(
            &content.header,
            menu,
            editor.attrs(ComponentKind::Header, &content.header),
        ))
        main {
            div.hero-area {
                (components::hero::render(
                    &content.hero,
                    editor.attrs(ComponentKind::HeroBanner, &content.hero),
                ))
                (components::client_links::render(
                    &content.client_links,
                    editor.attrs(ComponentKind::ClientLinksPanel, &content.client_links),
                ))
            }
            section.feature-cards {
                @for row in content.feature_cards.chunks(FEATURE_CARDS_PER_ROW) {
                    div.feature-row {
                        @for card in row {
                            (components::feature_card::render(
                                card,
                                editor.attrs(ComponentKind::FeatureCard, card),
                            ))
                        }
                    }
                }
            }
            (components::latest_news::render(
                &content.latest_news,
                editor.attrs(ComponentKind::LatestNews, &content.latest_news),
            ))
            (components::cta_banner::render(
                &content.cta_banner,
                editor.attrs(ComponentKind::CtaBanner, &content.cta_banner),
            ))
        }
        (components::footer::render(
            &content.footer,
            editor.attrs(ComponentKind::Footer, &content.footer),
        ))
    };
    base_document(&config.title, &config.locale, editor.is_author(), body)
}

fn base_document(title: &str, locale: &str, author_mode: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body class=[author_mode.then_some("author-mode")] {
                (content)
                script { (PreEscaped(MENU_JS)) }
            }
        }
    }
}
