//! `<head>` metadata derived 1:1 from [`SiteConfig`]: title, description,
//! keywords, Open Graph and Twitter tags, JSON-LD and analytics.

use crate::Page;
use folio_core::SiteConfig;
use leptos::prelude::*;
use leptos::tachys::html::attribute::custom::custom_attribute;
use serde_json::json;
use std::sync::Arc;

#[component]
pub fn SeoHead(config: Arc<SiteConfig>, page: Page) -> impl IntoView {
    let title = page.document_title(&config);
    let url = config.absolute_url(page.path());

    view! {
        <meta charset="utf-8" />
        <meta name="viewport" content="width=device-width, initial-scale=1" />
        <title>{title.clone()}</title>
        <meta name="description" content=config.site_description.clone() />
        <meta name="keywords" content=config.keywords.join(", ") />
        <meta name="author" content=config.author.clone() />
        <meta name="theme-color" content=config.theme_color.clone() />
        <link rel="canonical" href=url.clone() />
        <link rel="manifest" href=config.href("/manifest.webmanifest") />
        <OpenGraph config=config.clone() title=title url=url.clone() />
        <script type="application/ld+json" inner_html=json_ld(&config, &url)></script>
        <Analytics id=config.google_analytics_id.clone() />
    }
}

#[component]
fn OpenGraph(config: Arc<SiteConfig>, title: String, url: String) -> impl IntoView {
    let image = config
        .logo_url()
        .map(|image| og_meta("og:image", image));
    let creator = config
        .twitter_handle
        .clone()
        .map(|handle| view! { <meta name="twitter:creator" content=handle /> });

    view! {
        {og_meta("og:locale", config.og_language.clone())}
        {og_meta("og:site_name", config.og_site_name.clone())}
        {og_meta("og:type", "website".to_string())}
        {og_meta("og:url", url)}
        {og_meta("og:title", title.clone())}
        {og_meta("og:description", config.site_description.clone())}
        {image}
        <meta name="twitter:card" content="summary" />
        <meta name="twitter:title" content=title />
        <meta name="twitter:description" content=config.site_description.clone() />
        {creator}
    }
}

/// `<meta property=...>`. `property` has no typed attribute in the `view!`
/// macro, so it is attached as a custom attribute.
fn og_meta(property: &'static str, content: String) -> impl IntoView {
    leptos::html::meta()
        .add_any_attr(custom_attribute("property", property))
        .content(content)
}

/// Tracking IDs look like `UA-78902575-1` or `G-XXXXXXX`; anything else is
/// dropped so the ID cannot escape the inline script.
fn is_analytics_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[component]
fn Analytics(id: Option<String>) -> impl IntoView {
    let id = id.filter(|id| {
        let valid = is_analytics_id(id);
        if !valid {
            tracing::warn!("ignoring malformed google_analytics_id '{}'", id);
        }
        valid
    });
    id.map(|id| {
        let src = format!("https://www.googletagmanager.com/gtag/js?id={}", id);
        let init = format!(
            "window.dataLayer = window.dataLayer || [];\
             function gtag(){{dataLayer.push(arguments);}}\
             gtag('js', new Date());\
             gtag('config', '{}');",
            id
        );
        view! {
            <script src=src></script>
            <script inner_html=init></script>
        }
    })
}

/// schema.org `WebSite` block with the author as a `Person`.
pub fn json_ld(config: &SiteConfig, url: &str) -> String {
    let mut author = json!({
        "@type": "Person",
        "name": config.author,
    });
    if !config.social_links.is_empty() {
        author["sameAs"] = json!(config.social_links.values().collect::<Vec<_>>());
    }

    let mut schema = json!({
        "@context": "http://schema.org",
        "@type": "WebSite",
        "url": url,
        "name": config.site_title,
        "alternateName": config.site_title_alt,
        "description": config.site_description,
        "inLanguage": config.site_language,
        "keywords": config.keywords.join(", "),
        "author": author,
    });
    if !config.organization.is_empty() {
        schema["publisher"] = json!({
            "@type": "Organization",
            "name": config.organization,
        });
    }
    if let Some(logo) = config.logo_url() {
        schema["image"] = json!(logo);
    }

    // A literal "</script>" inside a string value must not end the element
    schema.to_string().replace("</", "<\\/")
}
