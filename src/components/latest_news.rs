use crate::editor::EditorAttrs;
use crate::models::{NewsArticleProps, PLACEHOLDER_HREF};
use maud::{Markup, html};
use serde::Serialize;

/// Section link to the full news listing.
pub const NEWS_INDEX_HREF: &str = "/news";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestNewsProps {
    pub title: Option<String>,
    pub read_all_news: Option<String>,
    /// Unit shown after the read time, e.g. "min read".
    pub minute_read: Option<String>,
    /// Already selected and ordered, newest first.
    pub articles: Vec<NewsArticleProps>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Teal,
    Orange,
}

impl BorderColor {
    /// Teal, orange, teal, ... by card position.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { Self::Teal } else { Self::Orange }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Teal => "teal",
            Self::Orange => "orange",
        }
    }
}

pub fn render(props: &LatestNewsProps, editor: EditorAttrs<'_>) -> Markup {
    html! {
        section.latest-news
            data-resource-type=[editor.resource_type]
            data-empty-label=[editor.empty_label]
            data-empty=[editor.empty]
        {
            div.latest-news-header {
                @if let Some(title) = &props.title { h2.section-title { (title) } }
                @if let Some(label) = &props.read_all_news {
                    a.read-all href=(NEWS_INDEX_HREF) { (label) }
                }
            }
            div.news-grid {
                @for (index, article) in props.articles.iter().enumerate() {
                    (news_card(
                        article,
                        BorderColor::for_index(index),
                        props.minute_read.as_deref(),
                    ))
                }
            }
        }
    }
}

pub fn news_card(
    article: &NewsArticleProps,
    border: BorderColor,
    minute_read: Option<&str>,
) -> Markup {
    let href = article.href.as_deref().unwrap_or(PLACEHOLDER_HREF);
    html! {
        a class={ "news-card " (border.class()) } href=(href) {
            div.news-image {
                @match &article.image {
                    Some(src) => {
                        img src=(src) alt="";
                    }
                    None => {
                        div.image-placeholder aria-hidden="true" {}
                    }
                }
            }
            div.news-body {
                div.news-meta {
                    @if let Some(category) = &article.category { span.category { (category) } }
                    @if let Some(minutes) = article.read_time {
                        span.read-time {
                            (minutes)
                            @if let Some(unit) = minute_read { " " (unit) }
                        }
                    }
                }
                @if let Some(title) = &article.title { h3.news-title { (title) } }
                @if let Some(date) = &article.date { time.news-date { (date) } }
            }
        }
    }
}
