//! # Frontpage
//!
//! A static homepage generator for content that lives either in a bundled,
//! localized JSON document or behind a headless CMS. Every visible string,
//! link and image on the page is looked up through a content key; nothing
//! is hard-coded in the components.
//!
//! # Architecture: Resolve, Map, Render
//!
//! ```text
//! 1. Resolve  ContentKey  →  raw Record / collection / scalar   (ContentSource)
//! 2. Map      raw Record  →  typed component props              (ContentModel)
//! 3. Render   props       →  index.html + copied assets         (maud, generate)
//! ```
//!
//! - **Backends are interchangeable**: the static document and the remote CMS
//!   implement the same [`content::ContentSource`] trait, chosen once from
//!   configuration.
//! - **Failures stay local**: a slot that cannot be resolved leaves its
//!   component on defaults and is reported as a [`page::SlotDiagnostic`]; the
//!   rest of the page renders.
//! - **Mapping is pure**: content models are plain functions from a raw
//!   record and an [`assets::AssetResolver`] to props, so they are tested
//!   without any source at all.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, stock defaults, environment overrides, validation |
//! | [`content`] | Content keys, the `ContentSource` trait, static and remote backends |
//! | [`assets`] | Prefixes asset paths with the remote host when one is configured |
//! | [`models`] | Content models: field tables and raw-record → props mapping |
//! | [`components`] | Maud renderers for each homepage section |
//! | [`editor`] | Author-mode detection and editable component registration |
//! | [`page`] | Parallel slot resolution, diagnostics, homepage document |
//! | [`generate`] | Writes `index.html` and copies assets into the output directory |
//! | [`output`] | CLI output formatting for `build`, `check` and `status` |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! Components are Rust functions returning [`maud::Markup`]. Interpolation is
//! escaped by default, and a markup error is a compile error.
//!
//! ## No Caching
//!
//! The remote backend issues one request per resolution. Two builds against
//! a changing CMS see two different pages; freshness is the CMS's concern.
//!
//! ## Single Page
//!
//! The generator renders one document, the homepage. Client-side behaviour
//! is limited to the mobile menu toggle, inlined with the stylesheet.

pub mod assets;
pub mod components;
pub mod config;
pub mod content;
pub mod editor;
pub mod generate;
pub mod logging;
pub mod models;
pub mod output;
pub mod page;

#[cfg(test)]
pub(crate) mod test_helpers;
