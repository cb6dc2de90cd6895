use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::notification::NotificationView;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub label: String,
    /// `primary`, `secondary` or `danger`.
    pub variant: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub message: String,
    /// `success`, `error`, `warning`, `info` or `confirm`.
    pub severity: String,
    /// Auto-dismiss delay. Absent for notifications that wait for the user.
    pub duration_ms: Option<u64>,
    pub actions: Vec<ActionResponse>,
}

impl From<NotificationView> for NotificationResponse {
    fn from(view: NotificationView) -> Self {
        NotificationResponse {
            id: view.id,
            message: view.message,
            severity: view.severity.as_str().to_string(),
            duration_ms: view
                .duration
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            actions: view
                .actions
                .into_iter()
                .map(|(label, variant)| ActionResponse {
                    label,
                    variant: variant.as_str().to_string(),
                })
                .collect(),
        }
    }
}

/// GET /notifications
///
/// Visible notifications, oldest first.
#[utoipa::path(
    get,
    path = "/notifications",
    responses(
        (status = 200, description = "Visible notifications", body = [NotificationResponse]),
    ),
    tag = "notifications"
)]
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    let body: Vec<NotificationResponse> = state
        .notifications
        .list()
        .into_iter()
        .map(NotificationResponse::from)
        .collect();
    HttpResponse::Ok().json(body)
}

/// DELETE /notifications/{id}
#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    params(
        ("id" = Uuid, Path, description = "Notification id"),
    ),
    responses(
        (status = 204, description = "Dismissed, or already gone"),
    ),
    tag = "notifications"
)]
pub async fn dismiss(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !state.notifications.remove(id) {
        log::debug!("notification {} already gone", id);
    }
    Ok(HttpResponse::NoContent().finish())
}

/// POST /notifications/{id}/actions/{label}
///
/// Runs the action's callback and dismisses the notification.
#[utoipa::path(
    post,
    path = "/notifications/{id}/actions/{label}",
    params(
        ("id" = Uuid, Path, description = "Notification id"),
        ("label" = String, Path, description = "Action label, e.g. Confirm"),
    ),
    responses(
        (status = 204, description = "Action invoked"),
        (status = 404, description = "No such notification or action"),
    ),
    tag = "notifications"
)]
pub async fn invoke_action(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, label) = path.into_inner();
    state.notifications.invoke(id, &label)?;
    Ok(HttpResponse::NoContent().finish())
}
