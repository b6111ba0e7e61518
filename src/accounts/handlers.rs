//! Account route handlers.
//!
//! Every handler runs the same linear sequence: decode, validate, one store
//! call, map the outcome. Any failure ends the request.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::accounts::requests::{
    AccountIdRequest, CreateAccountRequest, ListAccountsRequest, UpdateAccountRequest,
};
use crate::http::response::{AccountResponse, AccountsResponse, ApiError, MessageResponse};
use crate::http::server::AppState;
use crate::store::{CreateAccountParams, ListAccountsParams};

/// `POST /accounts`
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(req) = payload?;
    state.validator.validate(&req)?;

    let account = state
        .store
        .create_account(CreateAccountParams {
            owner: req.owner,
            balance: 0,
            currency: req.currency,
        })
        .await?;

    tracing::info!(account_id = account.id, currency = %account.currency, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            message: "Account is created successfully!",
            account,
        }),
    ))
}

/// `GET /accounts/{id}`
pub async fn get_account(
    State(state): State<AppState>,
    path: Result<Path<AccountIdRequest>, PathRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Path(req) = path?;
    state.validator.validate(&req)?;

    let account = state.store.get_account(req.id).await?;

    Ok((
        StatusCode::FOUND,
        Json(AccountResponse {
            message: "Account is found!",
            account,
        }),
    ))
}

/// `GET /accounts?page_id=..&page_size=..`
pub async fn list_accounts(
    State(state): State<AppState>,
    query: Result<Query<ListAccountsRequest>, QueryRejection>,
) -> Result<(StatusCode, Json<AccountsResponse>), ApiError> {
    let Query(req) = query?;
    state.validator.validate(&req)?;

    let accounts = state
        .store
        .list_accounts(ListAccountsParams {
            limit: req.limit(),
            offset: req.offset(),
        })
        .await?;

    tracing::debug!(
        page_id = ?req.page_id,
        page_size = ?req.page_size,
        returned = accounts.len(),
        "Accounts listed"
    );

    Ok((
        StatusCode::FOUND,
        Json(AccountsResponse {
            message: "Accounts are found!",
            accounts,
        }),
    ))
}

/// `PUT /accounts`
pub async fn update_account(
    State(state): State<AppState>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(req) = payload?;
    state.validator.validate(&req)?;

    let account = state.store.update_account(req.params()).await?;

    tracing::info!(account_id = account.id, balance = account.balance, "Account updated");

    Ok((
        StatusCode::FOUND,
        Json(AccountResponse {
            message: "Account is updated!",
            account,
        }),
    ))
}

/// `DELETE /accounts/{id}`
pub async fn delete_account(
    State(state): State<AppState>,
    path: Result<Path<AccountIdRequest>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(req) = path?;
    state.validator.validate(&req)?;

    state.store.delete_account(req.id).await?;

    tracing::info!(account_id = req.id, "Account deleted");

    Ok(Json(MessageResponse {
        message: "Account is deleted!",
    }))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
