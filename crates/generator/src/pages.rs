use crate::components::SocialLinks;
use folio_core::{AboutPage, Project, SiteConfig};
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn HomeView(config: Arc<SiteConfig>) -> impl IntoView {
    view! {
        <section class="hero">
            <h1>{config.site_title.clone()}</h1>
            <p class="lead">{config.site_description.clone()}</p>
            <SocialLinks links=config.social_links.clone() />
        </section>
    }
}

/// Greeting, biography rendered from markdown, then the skills list.
#[component]
pub fn AboutView(about: AboutPage, biography_html: Option<String>) -> impl IntoView {
    let biography = biography_html.map(|html| view! { <div class="biography" inner_html=html></div> });

    let skills = (!about.skills.is_empty()).then(|| {
        let groups = about
            .skills
            .iter()
            .map(|group| {
                view! {
                    <p class="skill-group">
                        <b>{format!("{}:", group.category)}</b>
                        {format!(" {}", group.joined())}
                    </p>
                }
            })
            .collect_view();
        view! {
            <h3 class="skills-heading">
                "My Skills "
                <span role="img" aria-label="biceps emoji">"💪"</span>
            </h3>
            {groups}
        }
    });

    view! {
        <h1>
            {format!("{} ", about.greeting)}
            <span role="img" aria-label="wave emoji">"👋"</span>
        </h1>
        {biography}
        {skills}
    }
}

#[component]
pub fn ProjectsView(projects: Vec<Project>) -> impl IntoView {
    let items = projects
        .into_iter()
        .map(|project| {
            let name = match project.url {
                Some(url) => view! { <a href=url>{project.name}</a> }.into_any(),
                None => view! { <span>{project.name}</span> }.into_any(),
            };
            let description = project.description.map(|text| view! { <p>{text}</p> });
            view! {
                <li class="project">
                    <h3>{name}</h3>
                    {description}
                </li>
            }
        })
        .collect_view();

    view! {
        <h1>"Projects"</h1>
        <ul class="projects">{items}</ul>
    }
}
