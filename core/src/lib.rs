//! Client core for the hero API.
//!
//! # Overview
//! Lists, loads, searches, creates, updates and deletes hero records against
//! a REST-like JSON endpoint, or against an in-memory stand-in. Every
//! operation is recorded in a shared `MessageLog`.
//!
//! # Design
//! - `HeroClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`.
//! - A `Transport` executes the round-trip: `UreqTransport` over HTTP,
//!   `InMemoryTransport` from a local list.
//! - `HeroService` never fails; errors become a log entry and a fallback.
//! - `HeroDetail` drives one record's view/edit lifecycle.
//! - `HeroApp` is the composition root.

pub mod app;
pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod http;
pub mod in_memory;
pub mod messages;
pub mod service;
pub mod transport;
pub mod types;

pub use app::HeroApp;
pub use client::HeroClient;
pub use config::{ClientConfig, ConfigError};
pub use detail::{HeroDetail, History, RouteParams};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use in_memory::InMemoryTransport;
pub use messages::MessageLog;
pub use service::HeroService;
pub use transport::{Transport, UreqTransport};
pub use types::{Hero, HeroRef, NewHero};
