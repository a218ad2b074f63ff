//! In-memory stand-in for the remote hero endpoint.
//!
//! `InMemoryTransport` answers the same routes as the mock server from a
//! local list, with the same status codes, so `HeroService` behaves
//! identically whichever transport it is given. Every request is recorded
//! for inspection.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Hero, NewHero};

/// Fixture list served when no seed is given. Kept equal to
/// `mock_server::seed_heroes`; `core/tests/integration.rs` checks it.
pub fn default_heroes() -> Vec<Hero> {
    [
        (11, "Mr. Nice"),
        (12, "Narco"),
        (13, "Bombasto"),
        (14, "Celeritas"),
        (15, "Magneta"),
        (16, "RubberMan"),
        (17, "Dynama"),
        (18, "Dr IQ"),
        (19, "Magma"),
        (20, "Tornado"),
    ]
    .into_iter()
    .map(|(id, name)| Hero {
        id,
        name: name.to_string(),
    })
    .collect()
}

#[derive(Debug, Default)]
pub struct InMemoryTransport {
    heroes: Mutex<Vec<Hero>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl InMemoryTransport {
    pub fn new(heroes: Vec<Hero>) -> Self {
        Self {
            heroes: Mutex::new(heroes),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_heroes() -> Self {
        Self::new(default_heroes())
    }

    /// Snapshot of the stored records.
    pub fn heroes(&self) -> Vec<Hero> {
        lock(&self.heroes).clone()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    fn handle(&self, req: &HttpRequest) -> HttpResponse {
        let (path, query) = match req.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (req.path.as_str(), None),
        };
        let Some(idx) = path.rfind("/heroes") else {
            return HttpResponse::new(404, "");
        };
        let rest = path[idx + "/heroes".len()..].trim_start_matches('/');

        match (req.method, rest) {
            (HttpMethod::Get, "") => self.list(query),
            (HttpMethod::Put, "") => self.update(req.body.as_deref()),
            (HttpMethod::Post, "") => self.create(req.body.as_deref()),
            (HttpMethod::Get, id) => match id.parse::<u32>() {
                Ok(id) => self.get(id),
                Err(_) => HttpResponse::new(400, "invalid id"),
            },
            (HttpMethod::Delete, id) => match id.parse::<u32>() {
                Ok(id) => self.delete(id),
                Err(_) => HttpResponse::new(400, "invalid id"),
            },
            _ => HttpResponse::new(405, ""),
        }
    }

    fn list(&self, query: Option<&str>) -> HttpResponse {
        let heroes = lock(&self.heroes);
        let term = query.and_then(name_param);
        let matches: Vec<&Hero> = match &term {
            Some(term) => {
                let needle = term.to_lowercase();
                heroes
                    .iter()
                    .filter(|h| h.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => heroes.iter().collect(),
        };
        json_response(200, &matches)
    }

    fn get(&self, id: u32) -> HttpResponse {
        match lock(&self.heroes).iter().find(|h| h.id == id) {
            Some(hero) => json_response(200, hero),
            None => HttpResponse::new(404, ""),
        }
    }

    fn create(&self, body: Option<&str>) -> HttpResponse {
        let input: NewHero = match body.map(serde_json::from_str) {
            Some(Ok(input)) => input,
            _ => return HttpResponse::new(400, "invalid body"),
        };
        let mut heroes = lock(&self.heroes);
        let next = match heroes.iter().map(|h| h.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        let Some(id) = next else {
            return HttpResponse::new(507, "hero id space exhausted");
        };
        let hero = Hero {
            id,
            name: input.name,
        };
        heroes.push(hero.clone());
        json_response(201, &hero)
    }

    fn update(&self, body: Option<&str>) -> HttpResponse {
        let input: Hero = match body.map(serde_json::from_str) {
            Some(Ok(input)) => input,
            _ => return HttpResponse::new(400, "invalid body"),
        };
        let mut heroes = lock(&self.heroes);
        match heroes.iter_mut().find(|h| h.id == input.id) {
            Some(stored) => {
                stored.name = input.name;
                json_response(200, &*stored)
            }
            None => HttpResponse::new(404, ""),
        }
    }

    fn delete(&self, id: u32) -> HttpResponse {
        let mut heroes = lock(&self.heroes);
        match heroes.iter().position(|h| h.id == id) {
            Some(pos) => {
                let hero = heroes.remove(pos);
                json_response(200, &hero)
            }
            None => HttpResponse::new(404, ""),
        }
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.handle(&request);
        lock(&self.requests).push(request);
        Ok(response)
    }
}

fn name_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "name")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

fn json_response<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> HttpResponse {
    match serde_json::to_string(value) {
        Ok(body) => HttpResponse::new(status, body),
        Err(e) => HttpResponse::new(500, e.to_string()),
    }
}

// A poisoned store is still structurally valid; keep serving it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HeroClient;

    fn client() -> HeroClient {
        HeroClient::new("memory://local")
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let transport = InMemoryTransport::with_default_heroes();
        let response = transport
            .execute(client().build_search_heroes("MA"))
            .await
            .unwrap();
        let heroes = client().parse_search_heroes(response).unwrap();
        let names: Vec<&str> = heroes.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Magneta", "RubberMan", "Dynama", "Magma"]);
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let transport = InMemoryTransport::with_default_heroes();
        let req = client().build_add_hero(&NewHero::new("Nova")).unwrap();
        let response = transport.execute(req).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(client().parse_add_hero(response).unwrap().id, 21);
    }

    #[tokio::test]
    async fn create_in_empty_store_starts_at_one() {
        let transport = InMemoryTransport::default();
        let req = client().build_add_hero(&NewHero::new("First")).unwrap();
        let hero = client()
            .parse_add_hero(transport.execute(req).await.unwrap())
            .unwrap();
        assert_eq!(hero.id, 1);
    }

    #[tokio::test]
    async fn create_past_max_id_is_rejected() {
        let transport = InMemoryTransport::new(vec![Hero {
            id: u32::MAX,
            name: "Last".to_string(),
        }]);
        let req = client().build_add_hero(&NewHero::new("Next")).unwrap();
        let response = transport.execute(req).await.unwrap();
        assert_eq!(response.status, 507);
        assert_eq!(transport.heroes().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let transport = InMemoryTransport::default();
        let hero = Hero {
            id: 5,
            name: "Ghost".to_string(),
        };
        let req = client().build_update_hero(&hero).unwrap();
        assert_eq!(transport.execute(req).await.unwrap().status, 404);
    }

    #[tokio::test]
    async fn delete_removes_and_returns_record() {
        let transport = InMemoryTransport::with_default_heroes();
        let response = transport
            .execute(client().build_delete_hero(12))
            .await
            .unwrap();
        assert_eq!(client().parse_delete_hero(response).unwrap().name, "Narco");
        assert!(transport.heroes().iter().all(|h| h.id != 12));

        let response = transport
            .execute(client().build_delete_hero(12))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let transport = InMemoryTransport::default();
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: "memory://local/heroes/abc".to_string(),
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(transport.execute(req).await.unwrap().status, 400);
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let transport = InMemoryTransport::default();
        transport.execute(client().build_list_heroes()).await.unwrap();
        let recorded = transport.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].path, "memory://local/heroes");
    }
}
