use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::proposal_dto::{
        InsertProposalPayload, OpenProposalsQuery, ProposalFilterPayload, ProposalSummary,
    },
    error::Result,
    middleware::auth::ActingAs,
    services::proposal_filter::ProposalFilter,
    utils::{ids::parse_id, time::parse_date},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/ProposalsList",
    responses(
        (status = 200, description = "Proposals that are not archived", body = [ThesisProposal]),
        (status = 503, description = "Storage unavailable")
    )
)]
#[axum::debug_handler]
pub async fn list_proposals(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let proposals = state
        .proposal_service
        .search(&ProposalFilter::default())
        .await?;
    Ok(Json(proposals))
}

#[utoipa::path(
    get,
    path = "/api/ProposalsList/{id}",
    params(
        ("id" = i32, Path, description = "Thesis proposal id")
    ),
    responses(
        (status = 200, description = "Thesis proposal", body = ThesisProposal),
        (status = 404, description = "Thesis proposal not found"),
        (status = 422, description = "Id is not a positive integer")
    )
)]
#[axum::debug_handler]
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw_id, "proposal id")?;
    let proposal = state.proposal_service.get_by_id(id).await?;
    Ok(Json(proposal))
}

#[utoipa::path(
    post,
    path = "/api/ProposalsList/filter",
    request_body = ProposalFilterPayload,
    responses(
        (status = 200, description = "Proposals matching every supplied field", body = [ThesisProposal]),
        (status = 422, description = "Invalid filter")
    )
)]
#[axum::debug_handler]
pub async fn filter_proposals(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProposalFilterPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let filter = payload.into_filter()?;
    let proposals = state.proposal_service.search(&filter).await?;
    tracing::debug!(hits = proposals.len(), "proposal search");
    Ok(Json(proposals))
}

/// Proposals still open on `date`, or on the virtual clock's today.
#[utoipa::path(
    get,
    path = "/api/thesis/open",
    params(
        ("date" = Option<String>, Query, description = "Day to check, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Proposals not archived and not expired", body = [ThesisProposal]),
        (status = 422, description = "Malformed date")
    )
)]
#[axum::debug_handler]
pub async fn list_open_proposals(
    State(state): State<AppState>,
    Query(query): Query<OpenProposalsQuery>,
) -> Result<impl IntoResponse> {
    let day = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => state.clock_service.today().await?,
    };
    let proposals = state.proposal_service.get_not_expired(day).await?;
    Ok(Json(proposals))
}

#[utoipa::path(
    get,
    path = "/api/teacher/ProposalsList",
    responses(
        (status = 200, description = "The teacher's active proposals", body = [ProposalSummary]),
        (status = 401, description = "Not authenticated as a teacher")
    )
)]
#[axum::debug_handler]
pub async fn teacher_proposals(
    State(state): State<AppState>,
    actor: ActingAs,
) -> Result<impl IntoResponse> {
    let teacher_id = actor.teacher_id()?;
    let proposals = state
        .proposal_service
        .get_active_by_teacher_id(teacher_id)
        .await?;
    let summaries: Vec<ProposalSummary> =
        proposals.into_iter().map(ProposalSummary::from).collect();
    Ok(Json(summaries))
}

#[utoipa::path(
    post,
    path = "/api/teacher/insertProposal",
    request_body = InsertProposalPayload,
    responses(
        (status = 201, description = "Thesis proposal created", body = ThesisProposal),
        (status = 401, description = "Not authenticated as a teacher"),
        (status = 422, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn insert_proposal(
    State(state): State<AppState>,
    actor: ActingAs,
    payload: std::result::Result<Json<InsertProposalPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let teacher_id = actor.teacher_id()?;
    let Json(payload) = payload?;
    payload.validate()?;
    let proposal = state
        .proposal_service
        .add_thesis_proposal(payload.into_new(teacher_id)?)
        .await?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

#[utoipa::path(
    patch,
    path = "/api/teacher/proposals/{id}/archive",
    params(
        ("id" = i32, Path, description = "Thesis proposal id")
    ),
    responses(
        (status = 200, description = "Thesis proposal archived", body = ThesisProposal),
        (status = 401, description = "Not the owner of the proposal"),
        (status = 404, description = "Thesis proposal not found")
    )
)]
#[axum::debug_handler]
pub async fn archive_proposal(
    State(state): State<AppState>,
    actor: ActingAs,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw_id, "proposal id")?;
    let proposal = state.proposal_service.archive(&actor, id).await?;
    Ok(Json(proposal))
}

#[utoipa::path(
    get,
    path = "/api/thesis/types",
    responses((status = 200, description = "Distinct proposal types", body = [String]))
)]
#[axum::debug_handler]
pub async fn list_types(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.proposal_service.get_types().await?))
}

#[utoipa::path(
    get,
    path = "/api/thesis/keywords",
    responses((status = 200, description = "Distinct proposal keywords", body = [String]))
)]
#[axum::debug_handler]
pub async fn list_keywords(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.proposal_service.get_keywords().await?))
}

#[utoipa::path(
    get,
    path = "/api/thesis/groups",
    responses((status = 200, description = "Distinct research groups named by proposals", body = [String]))
)]
#[axum::debug_handler]
pub async fn list_groups(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.proposal_service.get_groups().await?))
}
