// ABOUTME: Route handlers for the provisioning HTTP API
// ABOUTME: Thin adapters between axum extractors and the provisioning pipeline

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;

use super::error::ApiError;
use super::AppState;
use crate::provision::{
    ApplyReport, ConfigureReport, GenerateReport, PlanReport, ProvisioningParams,
};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateReport>, ApiError> {
    let params = ProvisioningParams::from_body(&body)?;
    Ok(Json(state.provisioner.generate(&params)?))
}

pub async fn plan(State(state): State<AppState>) -> Result<Json<PlanReport>, ApiError> {
    Ok(Json(state.provisioner.plan().await?))
}

pub async fn apply(State(state): State<AppState>) -> Result<Json<ApplyReport>, ApiError> {
    Ok(Json(state.provisioner.apply().await?))
}

pub async fn configure(State(state): State<AppState>) -> Result<Json<ConfigureReport>, ApiError> {
    Ok(Json(state.provisioner.configure().await?))
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "API is running",
    })
}
