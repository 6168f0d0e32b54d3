pub mod applications;
pub mod auth;
pub mod clock;
pub mod docs;
pub mod health;
pub mod lookup;
pub mod people;
pub mod proposals;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::AuthStrategy,
    error::Result,
    middleware::{
        cors::frontend_cors,
        rate_limit::{rps_middleware, RateLimiter},
    },
    AppState,
};

/// Full HTTP surface with its layers. Anonymous routes share one rate limiter.
pub fn app(state: AppState) -> Result<Router> {
    let config = state.config.clone();

    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    let mut public_api = Router::new()
        .route("/api/ProposalsList", get(proposals::list_proposals))
        .route("/api/ProposalsList/filter", post(proposals::filter_proposals))
        .route("/api/ProposalsList/:id", get(proposals::get_proposal))
        .route("/api/thesis/open", get(proposals::list_open_proposals))
        .route("/api/thesis/types", get(proposals::list_types))
        .route("/api/thesis/keywords", get(proposals::list_keywords))
        .route("/api/thesis/groups", get(proposals::list_groups))
        .route("/api/teacher/list", get(people::list_teachers))
        .route("/api/departments", get(lookup::list_departments))
        .route("/api/degrees", get(lookup::list_degrees))
        .route("/api/groups", get(lookup::list_research_groups));
    if config.auth_strategy == AuthStrategy::Local {
        public_api = public_api.route("/api/sessions", post(auth::login));
    }
    let public_api = public_api.layer(axum::middleware::from_fn_with_state(
        RateLimiter::new(config.public_rps),
        rps_middleware,
    ));

    let session_api = Router::new()
        .route("/api/sessions/current", get(auth::current_session))
        .route(
            "/api/virtualClock",
            get(clock::get_clock)
                .put(clock::set_clock)
                .delete(clock::reset_clock),
        );

    let teacher_api = Router::new()
        .route("/api/teacher/details", get(people::teacher_details))
        .route(
            "/api/teacher/ApplicationsList",
            get(applications::teacher_applications),
        )
        .route(
            "/api/teacher/applicationDetail/:id",
            get(applications::application_detail).patch(applications::decide_application),
        )
        .route("/api/teacher/ProposalsList", get(proposals::teacher_proposals))
        .route("/api/teacher/insertProposal", post(proposals::insert_proposal))
        .route(
            "/api/teacher/proposals/:id/archive",
            patch(proposals::archive_proposal),
        );

    let student_api = Router::new()
        .route("/api/student/details", get(people::student_details))
        .route(
            "/api/student/ApplicationsList",
            get(applications::student_applications),
        )
        .route("/api/student/applyProposal", post(applications::apply_proposal));

    let app = base_routes
        .merge(public_api)
        .merge(session_api)
        .merge(teacher_api)
        .merge(student_api)
        .with_state(state)
        .layer(frontend_cors(config.frontend_origin.as_deref())?)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
