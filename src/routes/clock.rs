use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::lookup_dto::{VirtualClockPayload, VirtualClockResponse},
    error::Result,
    middleware::auth::ActingAs,
    utils::time,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/virtualClock",
    responses((status = 200, description = "Virtual time, if set, and the effective now", body = VirtualClockResponse))
)]
#[axum::debug_handler]
pub async fn get_clock(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let clock = state.clock_service.get().await?;
    let virtual_time = clock.map(|c| c.virtual_time);
    Ok(Json(VirtualClockResponse {
        active: virtual_time.is_some(),
        virtual_time,
        now: virtual_time.unwrap_or_else(time::now),
    }))
}

#[utoipa::path(
    put,
    path = "/api/virtualClock",
    request_body = VirtualClockPayload,
    responses(
        (status = 200, description = "Virtual time set", body = VirtualClockResponse),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn set_clock(
    State(state): State<AppState>,
    actor: ActingAs,
    payload: std::result::Result<Json<VirtualClockPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let clock = state.clock_service.set(payload.virtual_time).await?;
    tracing::info!(?actor, "virtual clock moved");
    Ok(Json(VirtualClockResponse {
        active: true,
        virtual_time: Some(clock.virtual_time),
        now: clock.virtual_time,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/virtualClock",
    responses(
        (status = 204, description = "Back to wall-clock time"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn reset_clock(
    State(state): State<AppState>,
    actor: ActingAs,
) -> Result<impl IntoResponse> {
    let cleared = state.clock_service.delete().await?;
    tracing::info!(?actor, cleared, "virtual clock reset");
    Ok(StatusCode::NO_CONTENT)
}
