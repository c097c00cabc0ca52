use super::{
    ContentModel, FieldKind, FieldSpec, LinkItem, field, links, links_from_value, records, text,
};
use crate::assets::AssetResolver;
use crate::content::Record;
use serde::Serialize;

/// Site navigation shared by the header, the client links panel and the footer.
pub struct Navigation;

/// One titled footer column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FooterSection {
    pub title: Option<String>,
    pub links: Vec<LinkItem>,
}

impl FooterSection {
    fn from_record(record: &Record) -> Self {
        Self {
            title: text(record, "title"),
            links: record
                .get("links")
                .map(links_from_value)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProps {
    pub main_nav_items: Vec<LinkItem>,
    pub utility_items: Vec<LinkItem>,
    pub footer_sections: Vec<FooterSection>,
    pub legal_links: Vec<LinkItem>,
    pub client_links: Vec<LinkItem>,
}

impl ContentModel for Navigation {
    const NAME: &'static str = "Navigation";
    const TARGET: &'static str = "Header/Footer";
    const FIELDS: &'static [FieldSpec] = &[
        field("mainNav", "mainNavItems", FieldKind::LinkList),
        field("utilityNav", "utilityItems", FieldKind::LinkList),
        field("footerColumns", "footerSections", FieldKind::Nested("FooterSection")),
        field("legalLinks", "legalLinks", FieldKind::LinkList),
        field("clientLinks", "clientLinks", FieldKind::LinkList),
    ];
    type Props = NavigationProps;

    fn map(raw: &Record, _assets: &AssetResolver) -> NavigationProps {
        NavigationProps {
            main_nav_items: links(raw, "mainNav"),
            utility_items: links(raw, "utilityNav"),
            footer_sections: raw
                .get("footerColumns")
                .map(|v| records(v).iter().map(FooterSection::from_record).collect())
                .unwrap_or_default(),
            legal_links: links(raw, "legalLinks"),
            client_links: links(raw, "clientLinks"),
        }
    }
}
