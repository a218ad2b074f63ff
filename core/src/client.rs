//! Stateless HTTP request builder and response parser for the hero API.
//!
//! # Design
//! `HeroClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! A `Transport` executes the round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Hero, NewHero};

/// Stateless client for the hero API.
#[derive(Debug, Clone)]
pub struct HeroClient {
    base_url: String,
}

impl HeroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_heroes(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, format!("{}/heroes", self.base_url))
    }

    pub fn build_get_hero(&self, id: u32) -> HttpRequest {
        self.bodyless(HttpMethod::Get, format!("{}/heroes/{id}", self.base_url))
    }

    /// The term is sent as given; blank terms are filtered by the caller.
    pub fn build_search_heroes(&self, term: &str) -> HttpRequest {
        let term = urlencoding::encode(term);
        self.bodyless(
            HttpMethod::Get,
            format!("{}/heroes/?name={term}", self.base_url),
        )
    }

    pub fn build_add_hero(&self, input: &NewHero) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, format!("{}/heroes", self.base_url), input)
    }

    /// The full record replaces the stored one; the id travels in the body.
    pub fn build_update_hero(&self, hero: &Hero) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("{}/heroes", self.base_url), hero)
    }

    pub fn build_delete_hero(&self, id: u32) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, format!("{}/heroes/{id}", self.base_url))
    }

    pub fn parse_list_heroes(&self, response: HttpResponse) -> Result<Vec<Hero>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_search_heroes(&self, response: HttpResponse) -> Result<Vec<Hero>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_add_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        parse_json(response, 200)
    }

    fn bodyless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
