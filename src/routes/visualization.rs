use axum::{Json, extract::State};
use tracing::error;

use crate::{
    error::AppError,
    services::animal_speeds::{AnimalSpeed, load_animal_speeds},
    state::SharedState,
};

pub async fn animal_speeds_handler(
    State(state): State<SharedState>,
) -> Result<Json<Vec<AnimalSpeed>>, AppError> {
    let rows = load_animal_speeds(&state.animals_csv_path)
        .await
        .map_err(|err| {
            error!(path = %state.animals_csv_path.display(), error = %err, "error loading animal data");
            AppError::DataUnavailable {
                public: "Failed to load animal data",
                cause: err.to_string(),
            }
        })?;
    Ok(Json(rows))
}
