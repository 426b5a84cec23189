use crate::seo::SeoHead;
use crate::{Page, RenderOptions};
use folio_core::{MenuState, Navigation, SiteConfig};
use leptos::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

const RELOAD_SCRIPT: &str = r#"
const eventSource = new EventSource('/_reload');
eventSource.onmessage = () => location.reload();
eventSource.onerror = () => eventSource.close();
"#;

/// Full HTML document shared by every page.
#[component]
pub fn Layout(
    config: Arc<SiteConfig>,
    navigation: Navigation,
    page: Page,
    options: RenderOptions,
    children: Children,
) -> impl IntoView {
    let footer = page
        .has_footer()
        .then(|| view! { <Footer config=config.clone() year=options.year /> });
    let reload = options
        .preview
        .then(|| view! { <script inner_html=RELOAD_SCRIPT></script> });

    view! {
        <html lang=config.site_language.clone()>
            <head>
                <SeoHead config=config.clone() page=page />
                <style inner_html=stylesheet(&config)></style>
            </head>
            <body>
                <Header
                    config=config.clone()
                    navigation=navigation
                    current_path=page.path().to_string()
                />
                <main class="container">{children()}</main>
                {footer}
                {reload}
            </body>
        </html>
    }
}

/// Site title plus one link per route. On narrow viewports the links
/// collapse behind a toggle that starts closed on every render.
#[component]
pub fn Header(config: Arc<SiteConfig>, navigation: Navigation, current_path: String) -> impl IntoView {
    let menu = RwSignal::new(MenuState::Closed);

    let links = navigation
        .links(&current_path)
        .into_iter()
        .map(|link| {
            let aria_current = link.active.then_some("page");
            view! {
                <a
                    href=config.href(&link.route.path)
                    class:active=link.active
                    aria-label=link.route.aria_label()
                    aria-current=aria_current
                >
                    {link.route.label.clone()}
                </a>
            }
        })
        .collect_view();

    view! {
        <header class="site-header">
            <nav class="container nav">
                <a href=config.href("/") class="brand" aria-label="go to homepage">
                    {config.site_title.clone()}
                </a>
                <button
                    class="nav-toggle"
                    type="button"
                    aria-label="Toggle navigation"
                    aria-expanded=move || menu.get().is_open().to_string()
                    on:click=move |_| menu.update(|state| *state = state.toggle())
                >
                    "☰"
                </button>
                <div class="nav-links" class:open=move || menu.get().is_open()>
                    {links}
                </div>
            </nav>
        </header>
    }
}

#[component]
pub fn Footer(config: Arc<SiteConfig>, year: i32) -> impl IntoView {
    view! {
        <footer class="site-footer">
            <div class="container">
                <SocialLinks links=config.social_links.clone() />
                <p class="copyright">{format!("© {} {}", year, config.author)}</p>
            </div>
        </footer>
    }
}

#[component]
pub fn SocialLinks(links: BTreeMap<String, String>) -> impl IntoView {
    let items = links
        .into_iter()
        .map(|(platform, url)| {
            let label = format!("{} profile", platform);
            view! {
                <li>
                    <a href=url target="_blank" rel="noopener noreferrer" aria-label=label>
                        {platform_name(&platform)}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! { <ul class="social">{items}</ul> }
}

/// "github" -> "GitHub"; unknown platforms are capitalized.
fn platform_name(platform: &str) -> String {
    match platform {
        "github" => "GitHub".to_string(),
        "linkedin" => "LinkedIn".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

fn stylesheet(config: &SiteConfig) -> String {
    format!(
        r#"
:root {{ --theme: {theme}; --background: {background}; }}
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    line-height: 1.6;
    color: #3e3e3e;
    display: flex;
    flex-direction: column;
    min-height: 100vh;
}}
.container {{ width: 100%; max-width: 720px; margin: 0 auto; padding: 2rem 1rem; }}
main.container {{ flex: 1; }}
h1, h3 {{ color: #3e3e3e; margin-bottom: 1rem; }}
p {{ margin-bottom: 1rem; }}
.site-header {{ background: var(--background); padding: 20px 0; }}
.site-header .container {{ padding-top: 0; padding-bottom: 0; }}
.nav {{ display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; }}
.nav a {{ color: white; text-decoration: none; }}
.nav-links {{ display: flex; align-items: center; font-size: 16px; line-height: 1.25; }}
.nav-links a {{ padding: 5px 10px; margin-right: 10px; border-radius: 5px; }}
.nav-links a:last-child {{ margin-right: 0; }}
.nav-links a:hover, .nav-links a.active {{ background: var(--theme); }}
.nav-toggle {{ display: none; background: none; border: none; color: white; font-size: 1.5rem; cursor: pointer; }}
.social {{ list-style: none; display: flex; gap: 1rem; margin-bottom: 1rem; }}
.social a {{ color: var(--theme); }}
.site-footer {{ border-top: 1px solid #eee; color: #999; font-size: 0.9rem; }}
@media (max-width: 640px) {{
    .nav-toggle {{ display: block; }}
    .nav-links {{ display: none; width: 100%; flex-direction: column; align-items: stretch; }}
    .nav-links.open {{ display: flex; }}
    .nav-links a {{ margin: 5px 0 0 0; }}
}}
"#,
        theme = config.theme_color,
        background = config.background_color,
    )
}
