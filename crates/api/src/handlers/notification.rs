use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::notification::{
        CreateTemplateRequest, NotificationTemplate, RenderTemplateRequest, RenderedMessage,
    },
    template,
    validation::{validate_not_blank, ValidationResult},
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    handlers::{body_rejection, insert_failure},
    middleware::error_handling::AppError,
    ApiState,
};

async fn load_template(state: &ApiState, id: Uuid) -> Result<NotificationTemplate, AppError> {
    let row = state
        .templates
        .get_template_by_id(id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Notification template with ID {} not found", id)))?;

    Ok(NotificationTemplate::try_from(row)?)
}

/// Stores a new template after checking that subject and body parse.
#[axum::debug_handler]
pub async fn create_template(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NotificationTemplate>), AppError> {
    let Json(request) = payload.map_err(body_rejection)?;

    validate_not_blank("Template name", &request.name).into_result()?;
    if request.subject.is_empty() && request.body.is_empty() {
        ValidationResult::invalid("Template subject and body cannot both be empty").into_result()?;
    }

    let subject_vars = template::placeholders(&request.subject)?;
    let body_vars = template::placeholders(&request.body)?;
    debug!(
        "Template '{}' uses subject variables {:?} and body variables {:?}",
        request.name, subject_vars, body_vars
    );

    let duplicate = || format!("A notification template named '{}' already exists", request.name);

    let existing = state
        .templates
        .get_template_by_name(&request.name)
        .await
        .map_err(ClinicError::Database)?;
    if existing.is_some() {
        return Err(AppError(ClinicError::Conflict(duplicate())));
    }

    let row = state
        .templates
        .create_template(&request)
        .await
        .map_err(|err| insert_failure(err, duplicate))?;
    let created = NotificationTemplate::try_from(row)?;

    info!("Created notification template {} ('{}')", created.id, created.name);

    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
pub async fn get_template(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationTemplate>, AppError> {
    Ok(Json(load_template(&state, id).await?))
}

/// Renders a stored template's subject and body with the supplied variables.
///
/// Placeholders without a variable are returned verbatim. Inactive templates
/// are refused so retired wording is never sent out.
#[axum::debug_handler]
pub async fn render_template(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RenderTemplateRequest>, JsonRejection>,
) -> Result<Json<RenderedMessage>, AppError> {
    let Json(request) = payload.map_err(body_rejection)?;
    let stored = load_template(&state, id).await?;

    if !stored.is_active {
        return Err(AppError(ClinicError::Validation(format!(
            "Notification template '{}' is inactive",
            stored.name
        ))));
    }

    let message = template::render_message(&stored, &request.variables)?;

    debug!(
        "Rendered template {} with {} variable(s)",
        stored.id,
        request.variables.len()
    );

    Ok(Json(message))
}
