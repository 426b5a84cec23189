pub mod config;
pub mod error;
pub mod keywords;
pub mod nav;
pub mod types;

pub use config::parse_site_toml;
pub use error::{Error, Result};
pub use nav::{MenuState, NavLink, Navigation, NavigationState, Route};
pub use types::*;
