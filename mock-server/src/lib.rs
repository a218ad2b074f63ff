use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewHero {
    pub name: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

pub type Db = Arc<RwLock<BTreeMap<u32, Hero>>>;

pub fn seed_heroes() -> Vec<Hero> {
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

/// Router over the seed list.
pub fn app() -> Router {
    app_with(seed_heroes())
}

pub fn app_with(heroes: Vec<Hero>) -> Router {
    let db: Db = Arc::new(RwLock::new(heroes.into_iter().map(|h| (h.id, h)).collect()));
    Router::new()
        .route("/heroes", get(list_heroes).post(create_hero).put(update_hero))
        .route("/heroes/", get(list_heroes))
        .route("/heroes/{id}", get(get_hero).delete(delete_hero))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, heroes: Vec<Hero>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(heroes)).await
}

/// Without `name` returns every hero; with it, a case-insensitive substring match.
async fn list_heroes(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Hero>> {
    let heroes = db.read().await;
    let found = match params.name {
        Some(term) => {
            let needle = term.to_lowercase();
            heroes
                .values()
                .filter(|h| h.name.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        None => heroes.values().cloned().collect(),
    };
    Json(found)
}

async fn create_hero(
    State(db): State<Db>,
    Json(input): Json<NewHero>,
) -> Result<(StatusCode, Json<Hero>), (StatusCode, &'static str)> {
    let mut heroes = db.write().await;
    let next = match heroes.keys().next_back() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    };
    let id = next.ok_or((StatusCode::INSUFFICIENT_STORAGE, "hero id space exhausted"))?;
    let hero = Hero {
        id,
        name: input.name,
    };
    heroes.insert(id, hero.clone());
    tracing::debug!(id, "hero created");
    Ok((StatusCode::CREATED, Json(hero)))
}

async fn get_hero(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Hero>, StatusCode> {
    let heroes = db.read().await;
    heroes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_hero(
    State(db): State<Db>,
    Json(input): Json<Hero>,
) -> Result<Json<Hero>, StatusCode> {
    let mut heroes = db.write().await;
    let hero = heroes.get_mut(&input.id).ok_or(StatusCode::NOT_FOUND)?;
    hero.name = input.name;
    Ok(Json(hero.clone()))
}

async fn delete_hero(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<Hero>, StatusCode> {
    let mut heroes = db.write().await;
    let hero = heroes.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(id, "hero deleted");
    Ok(Json(hero))
}
