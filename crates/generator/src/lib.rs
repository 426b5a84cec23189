// Static site generation with Leptos SSR

pub mod components;
pub mod pages;
pub mod seo;

use anyhow::{Context, Result};
use chrono::Datelike;
use components::Layout;
use folio_core::nav::is_active;
use folio_core::{Site, SiteConfig};
use leptos::prelude::*;
use pages::{AboutView, HomeView, ProjectsView};
use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Copyright year in the footer
    pub year: i32,
    /// Inject the live-reload script
    pub preview: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            year: chrono::Local::now().year(),
            preview: false,
        }
    }
}

/// Pages this site generates. `/blog` is linked from the header but is
/// served by a separately configured sibling site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Projects,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Projects];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Projects => "/projects",
        }
    }

    /// File written under the output directory
    pub fn output_path(self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::About => "about/index.html",
            Page::Projects => "projects/index.html",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        Page::ALL
            .into_iter()
            .find(|page| is_active(page.path(), path))
    }

    pub fn document_title(self, config: &SiteConfig) -> String {
        match self {
            Page::Home => config.site_title.clone(),
            Page::About => format!("About | {}", config.site_title),
            Page::Projects => format!("Projects | {}", config.site_title),
        }
    }

    pub fn has_footer(self) -> bool {
        self != Page::Projects
    }
}

/// Render every page and asset of a site rooted at `root`.
pub fn generate_site(site: &Site, root: &Path, options: &RenderOptions) -> Result<GeneratedSite> {
    let biography = load_biography(site, root)?;

    let pages = Page::ALL
        .into_iter()
        .map(|page| {
            let html = render_page(site, page, biography.clone(), options);
            (page.output_path().to_string(), html)
        })
        .collect();

    let manifest = manifest_json(&site.config).context("Failed to serialize web manifest")?;

    Ok(GeneratedSite {
        pages,
        assets: vec![("manifest.webmanifest".to_string(), manifest.into_bytes())],
    })
}

/// Render one page to a complete HTML document.
///
/// Each call renders under a fresh reactive owner, so header menu state is
/// never carried over from a previous render.
pub fn render_page(
    site: &Site,
    page: Page,
    biography_html: Option<String>,
    options: &RenderOptions,
) -> String {
    let config = Arc::new(site.config.clone());
    let navigation = site.navigation.clone();
    let about = site.about.clone();
    let projects = site.projects.clone();
    let options = options.clone();

    let owner = Owner::new();
    let html = owner.with(move || {
        let content = match page {
            Page::Home => view! { <HomeView config=config.clone() /> }.into_any(),
            Page::About => view! { <AboutView about=about biography_html=biography_html /> }.into_any(),
            Page::Projects => view! { <ProjectsView projects=projects /> }.into_any(),
        };

        view! {
            <Layout config=config navigation=navigation page=page options=options>
                {content}
            </Layout>
        }
        .to_html()
    });

    tracing::debug!(page = page.path(), bytes = html.len(), "rendered page");
    format!("<!DOCTYPE html>{}", html)
}

/// Read and render the about page biography. A missing file is not an error.
pub fn load_biography(site: &Site, root: &Path) -> Result<Option<String>> {
    let path = root.join(&site.about.biography);
    if !path.is_file() {
        tracing::warn!("biography not found: {}", path.display());
        return Ok(None);
    }
    let markdown = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(render_markdown(&markdown)))
}

pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[derive(Serialize)]
struct Manifest<'a> {
    name: &'a str,
    short_name: &'a str,
    description: &'a str,
    start_url: String,
    background_color: &'a str,
    theme_color: &'a str,
    display: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    icons: Vec<ManifestIcon>,
}

#[derive(Serialize)]
struct ManifestIcon {
    src: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    mime: Option<&'static str>,
}

/// `manifest.webmanifest` contents for the site
pub fn manifest_json(config: &SiteConfig) -> serde_json::Result<String> {
    let icons = config
        .site_logo
        .iter()
        .map(|logo| ManifestIcon {
            src: config.href(&logo.to_string_lossy()),
            mime: match logo.extension().and_then(|e| e.to_str()) {
                Some("png") => Some("image/png"),
                Some("jpg") | Some("jpeg") => Some("image/jpeg"),
                Some("svg") => Some("image/svg+xml"),
                _ => None,
            },
        })
        .collect();

    let manifest = Manifest {
        name: &config.site_title,
        short_name: &config.site_title_short,
        description: &config.site_description,
        start_url: config.href("/"),
        background_color: &config.background_color,
        theme_color: &config.theme_color,
        display: "minimal-ui",
        icons,
    };
    serde_json::to_string_pretty(&manifest)
}
