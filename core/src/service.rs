//! Fail-open data access for hero records.
//!
//! # Design
//! `HeroService` drives `HeroClient` through a `Transport` and never returns
//! an error. Every settled call appends exactly one entry to the
//! `MessageLog`: a success message, or `"<operation> failed: <error>"`
//! together with an `error!` event. Failures degrade to an empty list or
//! `None`. The entry is written after the call settles, never before.

use std::sync::Arc;

use crate::client::HeroClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::messages::MessageLog;
use crate::transport::Transport;
use crate::types::{Hero, HeroRef, NewHero};

pub const DEFAULT_SERVICE_NAME: &str = "HeroService";

pub struct HeroService {
    name: String,
    client: HeroClient,
    transport: Arc<dyn Transport>,
    messages: MessageLog,
}

impl std::fmt::Debug for HeroService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroService")
            .field("name", &self.name)
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl HeroService {
    pub fn new(client: HeroClient, transport: Arc<dyn Transport>, messages: MessageLog) -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            client,
            transport,
            messages,
        }
    }

    /// Override the name prefixed to log entries.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub async fn list_heroes(&self) -> Vec<Hero> {
        let request = self.client.build_list_heroes();
        match self.send(Ok(request), HeroClient::parse_list_heroes).await {
            Ok(heroes) => {
                self.log("fetched heroes");
                heroes
            }
            Err(e) => self.fail("list_heroes", e, Vec::new()),
        }
    }

    /// `None` when the id is unknown (404) or the call fails.
    pub async fn get_hero(&self, id: u32) -> Option<Hero> {
        let request = self.client.build_get_hero(id);
        match self.send(Ok(request), HeroClient::parse_get_hero).await {
            Ok(hero) => {
                self.log(format!("fetched hero id={id}"));
                Some(hero)
            }
            Err(e) => self.fail(&format!("get_hero id={id}"), e, None),
        }
    }

    /// Replaces the stored record; the acknowledgement is the record as the
    /// server now holds it.
    pub async fn update_hero(&self, hero: &Hero) -> Option<Hero> {
        let request = self.client.build_update_hero(hero);
        match self.send(request, HeroClient::parse_update_hero).await {
            Ok(updated) => {
                self.log(format!("updated hero id={}", hero.id));
                Some(updated)
            }
            Err(e) => self.fail("update_hero", e, None),
        }
    }

    pub async fn add_hero(&self, hero: &NewHero) -> Option<Hero> {
        let request = self.client.build_add_hero(hero);
        match self.send(request, HeroClient::parse_add_hero).await {
            Ok(created) => {
                self.log(format!("added hero w/ id={}", created.id));
                Some(created)
            }
            Err(e) => self.fail("add_hero", e, None),
        }
    }

    /// Accepts a bare id or a record; returns the deleted record.
    pub async fn delete_hero(&self, target: impl Into<HeroRef>) -> Option<Hero> {
        let id = target.into().id();
        let request = self.client.build_delete_hero(id);
        match self.send(Ok(request), HeroClient::parse_delete_hero).await {
            Ok(deleted) => {
                self.log(format!("deleted hero id={id}"));
                Some(deleted)
            }
            Err(e) => self.fail("delete_hero", e, None),
        }
    }

    /// Blank terms return an empty list without a remote call or log entry.
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let request = self.client.build_search_heroes(term);
        match self.send(Ok(request), HeroClient::parse_search_heroes).await {
            Ok(heroes) => {
                if heroes.is_empty() {
                    self.log(format!("no heroes matching \"{term}\""));
                } else {
                    self.log(format!("found heroes matching \"{term}\""));
                }
                heroes
            }
            Err(e) => self.fail("search_heroes", e, Vec::new()),
        }
    }

    async fn send<T>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&HeroClient, HttpResponse) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let request = request?;
        tracing::debug!(service = %self.name, method = %request.method, path = %request.path, "dispatching");
        let response = self.transport.execute(request).await?;
        parse(&self.client, response)
    }

    fn log(&self, message: impl std::fmt::Display) {
        self.messages.add(format!("{}: {message}", self.name));
    }

    fn fail<T>(&self, operation: &str, error: ApiError, fallback: T) -> T {
        tracing::error!(service = %self.name, operation, error = %error, "remote call failed");
        self.log(format!("{operation} failed: {error}"));
        fallback
    }
}
