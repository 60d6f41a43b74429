use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    services::catalog::{Profile, SpeciesWithAuthor},
    state::SharedState,
};

const SPECIES_NOT_FOUND: &str = "Species not found";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeciesList {
    pub count: usize,
    pub species: Vec<SpeciesWithAuthor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub count: usize,
    pub users: Vec<Profile>,
}

pub async fn search_species_handler(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<SpeciesList> {
    let species: Vec<SpeciesWithAuthor> = state
        .catalog
        .search(params.q.as_deref().unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();

    Json(SpeciesList { count: species.len(), species })
}

pub async fn get_species_handler(
    State(state): State<SharedState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SpeciesWithAuthor>, AppError> {
    // A non-numeric id can't name a species.
    let Ok(Path(id)) = id else {
        return Err(AppError::NotFound(SPECIES_NOT_FOUND));
    };
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound(SPECIES_NOT_FOUND))
}

pub async fn list_users_handler(State(state): State<SharedState>) -> Json<UserList> {
    let users = state.catalog.profiles().to_vec();
    Json(UserList { count: users.len(), users })
}
