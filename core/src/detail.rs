//! Single-record view/edit lifecycle.
//!
//! `HeroDetail` owns at most one working copy of a hero. Its collaborators
//! are passed in as narrow capabilities: `RouteParams` to read the id being
//! viewed and `History` to navigate back.

use std::sync::Arc;

use crate::service::HeroService;
use crate::types::Hero;

/// Read access to the current navigation context.
pub trait RouteParams {
    fn param(&self, name: &str) -> Option<String>;
}

/// Navigation history.
pub trait History {
    fn back(&self);
}

impl<F: Fn(&str) -> Option<String>> RouteParams for F {
    fn param(&self, name: &str) -> Option<String> {
        self(name)
    }
}

pub struct HeroDetail<R, H> {
    service: Arc<HeroService>,
    route: R,
    history: H,
    hero: Option<Hero>,
}

impl<R: RouteParams, H: History> HeroDetail<R, H> {
    pub fn new(service: Arc<HeroService>, route: R, history: H) -> Self {
        Self {
            service,
            route,
            history,
            hero: None,
        }
    }

    /// Load the hero named by the `id` route parameter. An id that is missing
    /// or not a non-negative integer leaves the view empty.
    pub async fn init(&mut self) {
        self.hero = None;
        let raw = self.route.param("id");
        let Some(id) = raw.as_deref().and_then(|s| s.trim().parse::<u32>().ok()) else {
            tracing::warn!(id = ?raw, "route id missing or not an integer");
            return;
        };
        self.hero = self.service.get_hero(id).await;
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    /// Edit the working copy; no-op until a hero is loaded.
    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(hero) = self.hero.as_mut() {
            hero.name = name.into();
        }
    }

    /// Send the working copy, then navigate back whatever the outcome.
    pub async fn save(&mut self) {
        if let Some(hero) = &self.hero {
            self.service.update_hero(hero).await;
        }
        self.go_back();
    }

    pub fn go_back(&self) {
        self.history.back();
    }
}
