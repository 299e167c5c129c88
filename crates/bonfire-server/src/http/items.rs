// SPDX-License-Identifier: Apache-2.0

//! The five catalog handlers. One generic handler per verb serves every
//! `(title, category)` pair; the pair is parsed from the path against the
//! closed enums and drives schema lookup, so no per-category routes exist.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::{error, info};

use bonfire_api::ApiError;
use bonfire_model::{
    item_schema, strip_server_fields, validate_create, Category, Document, ItemId, Title,
    GAME_FIELD, ID_FIELD,
};

use crate::http::handlers::{api_error_response, propagated_request_id, with_request_id};
use crate::store::StoreError;
use crate::AppState;

// Metric labels use the route template, never the concrete path.
const LIST_ROUTE: &str = "/{title}/{category}";
const ITEM_ROUTE: &str = "/{title}/{category}/{id}";

fn parse_catalog_route(title: &str, category: &str) -> Result<(Title, Category), ApiError> {
    let title = Title::parse(title).map_err(|e| ApiError::not_found(e.to_string()))?;
    let category = Category::parse(category).map_err(|e| ApiError::not_found(e.to_string()))?;
    Ok((title, category))
}

fn parse_object_body(body: &Bytes) -> Result<Document, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(ApiError::invalid_payload(
            "request body must be a JSON object",
        )),
    }
}

/// Shared failure arm: the reason goes to the log and the failure counter,
/// the client gets the fixed storage envelope.
async fn storage_failure_response(
    state: &AppState,
    route: &'static str,
    request_id: &str,
    started: Instant,
    err: &StoreError,
) -> Response {
    error!(request_id = %request_id, route, backend = state.store.backend_tag(), "storage failure: {err}");
    state.metrics.observe_storage_failure();
    let resp = api_error_response(StatusCode::INTERNAL_SERVER_ERROR, ApiError::storage());
    state
        .metrics
        .observe_request(route, StatusCode::INTERNAL_SERVER_ERROR, started.elapsed())
        .await;
    with_request_id(resp, request_id)
}

pub(crate) async fn list_items_handler(
    State(state): State<AppState>,
    Path((title, category)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let (title, category) = match parse_catalog_route(&title, &category) {
        Ok(parsed) => parsed,
        Err(err) => {
            let resp = api_error_response(StatusCode::NOT_FOUND, err);
            state
                .metrics
                .observe_request(LIST_ROUTE, StatusCode::NOT_FOUND, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let schema = item_schema(title, category);
    match state
        .store
        .find(
            category.collection(),
            Some(title.game_tag()),
            Some(schema.projection),
        )
        .await
    {
        Ok(documents) => {
            let body = Value::Array(documents.into_iter().map(Value::Object).collect());
            let resp = (StatusCode::OK, Json(body)).into_response();
            state
                .metrics
                .observe_request(LIST_ROUTE, StatusCode::OK, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(err) => storage_failure_response(&state, LIST_ROUTE, &request_id, started, &err).await,
    }
}

pub(crate) async fn create_item_handler(
    State(state): State<AppState>,
    Path((title, category)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let (title, category) = match parse_catalog_route(&title, &category) {
        Ok(parsed) => parsed,
        Err(err) => {
            let resp = api_error_response(StatusCode::NOT_FOUND, err);
            state
                .metrics
                .observe_request(LIST_ROUTE, StatusCode::NOT_FOUND, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let mut payload = match parse_object_body(&body) {
        Ok(payload) => payload,
        Err(err) => {
            let resp = api_error_response(StatusCode::BAD_REQUEST, err);
            state
                .metrics
                .observe_request(LIST_ROUTE, StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    strip_server_fields(&mut payload);
    if let Err(reason) = validate_create(title, category, &payload) {
        let resp = api_error_response(
            StatusCode::BAD_REQUEST,
            ApiError::invalid_payload(reason.to_string()),
        );
        state
            .metrics
            .observe_request(LIST_ROUTE, StatusCode::BAD_REQUEST, started.elapsed())
            .await;
        return with_request_id(resp, &request_id);
    }
    // The tag comes from the path, after the client copy was stripped.
    payload.insert(
        GAME_FIELD.to_string(),
        Value::String(title.game_tag().to_string()),
    );
    let fields = payload.clone();
    match state.store.insert_one(category.collection(), payload).await {
        Ok(id) => {
            info!(request_id = %request_id, collection = category.collection(), id = %id, "item created");
            let mut stored = fields;
            stored.insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
            let resp = (StatusCode::CREATED, Json(Value::Object(stored))).into_response();
            state
                .metrics
                .observe_request(LIST_ROUTE, StatusCode::CREATED, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(err) => storage_failure_response(&state, LIST_ROUTE, &request_id, started, &err).await,
    }
}

pub(crate) async fn get_item_handler(
    State(state): State<AppState>,
    Path((title, category, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let (_, category) = match parse_catalog_route(&title, &category) {
        Ok(parsed) => parsed,
        Err(err) => {
            let resp = api_error_response(StatusCode::NOT_FOUND, err);
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::NOT_FOUND, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let item_id = match ItemId::parse(&id) {
        Ok(parsed) => parsed,
        Err(_) => {
            let resp = api_error_response(StatusCode::BAD_REQUEST, ApiError::invalid_id(&id));
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    // Id lookups search the whole category collection: an id minted under
    // one title resolves through any title's path. Only lists scope by tag.
    match state.store.find_one(category.collection(), &item_id).await {
        Ok(Some(document)) => {
            let resp = (StatusCode::OK, Json(Value::Object(document))).into_response();
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::OK, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Ok(None) => {
            let resp =
                api_error_response(StatusCode::NOT_FOUND, ApiError::not_found("item not found"));
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::NOT_FOUND, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(err) => storage_failure_response(&state, ITEM_ROUTE, &request_id, started, &err).await,
    }
}

pub(crate) async fn update_item_handler(
    State(state): State<AppState>,
    Path((title, category, id)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let (_, category) = match parse_catalog_route(&title, &category) {
        Ok(parsed) => parsed,
        Err(err) => {
            let resp = api_error_response(StatusCode::NOT_FOUND, err);
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::NOT_FOUND, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let item_id = match ItemId::parse(&id) {
        Ok(parsed) => parsed,
        Err(_) => {
            let resp = api_error_response(StatusCode::BAD_REQUEST, ApiError::invalid_id(&id));
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    // Updates skip create-time validation on purpose; the inherited
    // contract only strips the server-managed fields.
    let mut fields = match parse_object_body(&body) {
        Ok(payload) => payload,
        Err(err) => {
            let resp = api_error_response(StatusCode::BAD_REQUEST, err);
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    strip_server_fields(&mut fields);
    match state
        .store
        .update_one(category.collection(), &item_id, fields)
        .await
    {
        Ok(()) => {
            info!(request_id = %request_id, collection = category.collection(), id = %item_id, "item updated");
            let resp = StatusCode::NO_CONTENT.into_response();
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::NO_CONTENT, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(err) => storage_failure_response(&state, ITEM_ROUTE, &request_id, started, &err).await,
    }
}

pub(crate) async fn delete_item_handler(
    State(state): State<AppState>,
    Path((title, category, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let (_, category) = match parse_catalog_route(&title, &category) {
        Ok(parsed) => parsed,
        Err(err) => {
            let resp = api_error_response(StatusCode::NOT_FOUND, err);
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::NOT_FOUND, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    let item_id = match ItemId::parse(&id) {
        Ok(parsed) => parsed,
        Err(_) => {
            let resp = api_error_response(StatusCode::BAD_REQUEST, ApiError::invalid_id(&id));
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::BAD_REQUEST, started.elapsed())
                .await;
            return with_request_id(resp, &request_id);
        }
    };
    match state
        .store
        .delete_one(category.collection(), &item_id)
        .await
    {
        Ok(()) => {
            info!(request_id = %request_id, collection = category.collection(), id = %item_id, "item deleted");
            let resp = StatusCode::NO_CONTENT.into_response();
            state
                .metrics
                .observe_request(ITEM_ROUTE, StatusCode::NO_CONTENT, started.elapsed())
                .await;
            with_request_id(resp, &request_id)
        }
        Err(err) => storage_failure_response(&state, ITEM_ROUTE, &request_id, started, &err).await,
    }
}
