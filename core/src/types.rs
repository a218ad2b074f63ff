//! Domain DTOs for the hero API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single hero record returned by the API. The `id` is assigned by the
/// server on creation and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hero {
    pub id: u32,
    pub name: String,
}

/// Request payload for creating a new hero. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Target of a delete: either a bare id or a full record whose id is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroRef {
    ById(u32),
    ByRecord(Hero),
}

impl HeroRef {
    pub fn id(&self) -> u32 {
        match self {
            HeroRef::ById(id) => *id,
            HeroRef::ByRecord(hero) => hero.id,
        }
    }
}

impl From<u32> for HeroRef {
    fn from(id: u32) -> Self {
        HeroRef::ById(id)
    }
}

impl From<Hero> for HeroRef {
    fn from(hero: Hero) -> Self {
        HeroRef::ByRecord(hero)
    }
}

impl From<&Hero> for HeroRef {
    fn from(hero: &Hero) -> Self {
        HeroRef::ByRecord(hero.clone())
    }
}
