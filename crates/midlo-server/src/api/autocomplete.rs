//! Address autocomplete proxy.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{map_upstream_error, ApiError, ApiResponse, AppState, GoogleBackend, ResponseMeta};
use crate::middleware::RequestId;
use crate::mock;

/// Below this length predictions are noise; return nothing, not an error.
const MIN_INPUT_LEN: usize = 3;

/// Upper bound on suggestions handed to the client.
const MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteSuggestion {
    pub place_id: String,
    pub description: String,
}

pub async fn autocomplete(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<AutocompleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    let input = params.input.trim();
    if input.len() < MIN_INPUT_LEN {
        return Ok(Json(ApiResponse {
            data: Vec::new(),
            meta: ResponseMeta::new(req_id.0),
        }));
    }

    let data = match state.google_backend(&req_id.0)? {
        GoogleBackend::Live(client) => client
            .autocomplete(input)
            .await
            .map_err(|e| map_upstream_error(req_id.0.clone(), "Autocomplete", &e))?
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|s| AutocompleteSuggestion {
                place_id: s.place_id,
                description: s.description,
            })
            .collect(),
        GoogleBackend::Mock => mock::mock_suggestions(input),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
