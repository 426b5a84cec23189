//! Navigation model: the fixed route set, active-route matching and the
//! mobile menu state.

use serde::{Deserialize, Serialize};

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub label: String,
}

impl Route {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    pub fn is_home(&self) -> bool {
        normalize_path(&self.path) == "/"
    }

    /// Accessible label, e.g. "View about page"
    pub fn aria_label(&self) -> String {
        if self.is_home() {
            "go to homepage".to_string()
        } else {
            format!("View {} page", self.label.to_lowercase())
        }
    }
}

/// Ordered, fixed set of routes shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    routes: Vec<Route>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            routes: vec![
                Route::new("/", "Home"),
                Route::new("/blog", "Blog"),
                Route::new("/projects", "Projects"),
                Route::new("/about", "About"),
            ],
        }
    }
}

/// A route paired with whether it is the page currently being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink<'a> {
    pub route: &'a Route,
    pub active: bool,
}

impl Navigation {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// One link per route; at most one of them is active.
    pub fn links<'a>(&'a self, current_path: &str) -> Vec<NavLink<'a>> {
        self.routes
            .iter()
            .map(|route| NavLink {
                route,
                active: is_active(&route.path, current_path),
            })
            .collect()
    }

    pub fn active_route(&self, current_path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| is_active(&route.path, current_path))
    }
}

/// Exact match between a route and the current page path.
///
/// Only normalization is applied: an empty path is `/` and a single trailing
/// slash is dropped from non-root paths. There is no prefix matching, so `/`
/// never matches `/about`.
pub fn is_active(route_path: &str, current_path: &str) -> bool {
    normalize_path(route_path) == normalize_path(current_path)
}

/// Canonical form of a route path as compared by [`is_active`].
pub fn normalize_path(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        return "/";
    }
    path.strip_suffix('/').unwrap_or(path)
}

/// Collapsed/expanded state of the header link list on narrow viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggle(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Per-render navigation state. Never shared between rendered instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_path: String,
    menu: MenuState,
}

impl NavigationState {
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
            menu: MenuState::Closed,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn toggle_menu(&mut self) {
        self.menu = self.menu.toggle();
    }

    /// Route change: always closes the menu.
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
        self.menu = MenuState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_paths(nav: &Navigation, current: &str) -> Vec<String> {
        nav.links(current)
            .into_iter()
            .filter(|link| link.active)
            .map(|link| link.route.path.clone())
            .collect()
    }

    #[test]
    fn test_about_is_the_only_active_link() {
        let nav = Navigation::default();
        assert_eq!(active_paths(&nav, "/about"), vec!["/about"]);
    }

    #[test]
    fn test_home_does_not_prefix_match() {
        let nav = Navigation::default();
        assert_eq!(active_paths(&nav, "/"), vec!["/"]);
        assert!(!is_active("/about", "/"));
        assert!(!is_active("/", "/about"));
    }

    #[test]
    fn test_no_partial_prefix_matching() {
        assert!(!is_active("/blog", "/blog/my-first-post"));
        assert!(!is_active("/projects", "/project"));
        assert!(!is_active("/about", "/about-me"));
    }

    #[test]
    fn test_normalization() {
        assert!(is_active("/", ""));
        assert!(is_active("/about", "/about/"));
        assert!(is_active("/about/", "/about"));
    }

    #[test]
    fn test_unknown_path_has_no_active_link() {
        let nav = Navigation::default();
        assert!(active_paths(&nav, "/contact").is_empty());
        assert!(nav.active_route("/contact").is_none());
    }

    #[test]
    fn test_links_cover_every_route() {
        let nav = Navigation::default();
        let links = nav.links("/projects");
        assert_eq!(links.len(), nav.routes().len());
        assert_eq!(nav.active_route("/projects").unwrap().label, "Projects");
    }

    #[test]
    fn test_aria_labels() {
        assert_eq!(Route::new("/about", "About").aria_label(), "View about page");
        assert_eq!(Route::new("/", "Home").aria_label(), "go to homepage");
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut state = NavigationState::new("/");
        assert_eq!(state.menu(), MenuState::Closed);
        state.toggle_menu();
        assert!(state.menu().is_open());
        state.toggle_menu();
        assert_eq!(state.menu(), MenuState::Closed);
    }

    #[test]
    fn test_navigate_resets_menu() {
        let mut state = NavigationState::new("/");
        state.toggle_menu();
        state.navigate("/about");
        assert_eq!(state.menu(), MenuState::Closed);
        assert_eq!(state.current_path(), "/about");

        // already closed stays closed
        state.navigate("/projects");
        assert_eq!(state.menu(), MenuState::Closed);
    }
}
