//! Application Context
//!
//! Current route plus navigation, provided via Leptos Context API.

use leptos::prelude::*;

/// Visible page. Plain view switching, no URL router: the backend owns all
/// persistent identity, so deep links are not part of this client.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Catalog,
    Create,
    Edit(String),
    Run(String),
    Statistics(String),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Currently visible page - read
    pub route: ReadSignal<Route>,
    /// Currently visible page - write
    set_route: WriteSignal<Route>,
}

impl AppContext {
    pub fn new(route: (ReadSignal<Route>, WriteSignal<Route>)) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
        }
    }

    /// Switch the visible page
    pub fn navigate(&self, route: Route) {
        self.set_route.set(route);
    }

    /// Back to the catalog
    pub fn go_home(&self) {
        self.set_route.set(Route::Catalog);
    }
}
