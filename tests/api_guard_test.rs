mod common;

use common::{bearer, offline_app, request, send};
use serde_json::json;
use thesis_management::{config::AuthStrategy, middleware::auth::ActingAs};

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = offline_app(AuthStrategy::Local);

    for (method, uri) in [
        ("GET", "/api/teacher/ApplicationsList"),
        ("GET", "/api/student/ApplicationsList"),
        ("GET", "/api/teacher/ProposalsList"),
        ("GET", "/api/sessions/current"),
        ("DELETE", "/api/virtualClock"),
    ] {
        let (status, body) = send(&app, request(method, uri, None, None)).await;
        assert_eq!(status, 401, "{} {}", method, uri);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = offline_app(AuthStrategy::Local);
    let (status, body) = send(
        &app,
        request(
            "GET",
            "/api/teacher/ApplicationsList",
            Some("Bearer not.a.jwt"),
            None,
        ),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn wrong_role_is_unauthorized() {
    let app = offline_app(AuthStrategy::Local);
    let student = bearer(ActingAs::Student(7));
    let teacher = bearer(ActingAs::Teacher(3));

    let (status, _) = send(
        &app,
        request("GET", "/api/teacher/ApplicationsList", Some(&student), None),
    )
    .await;
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/student/applyProposal",
            Some(&teacher),
            Some(json!({ "proposal_id": 1 })),
        ),
    )
    .await;
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/teacher/applicationDetail/1",
            Some(&student),
            Some(json!({ "status": true })),
        ),
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn current_session_echoes_the_token_capability() {
    let app = offline_app(AuthStrategy::Saml);
    let (status, body) = send(
        &app,
        request(
            "GET",
            "/api/sessions/current",
            Some(&bearer(ActingAs::Teacher(12))),
            None,
        ),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "role": "teacher", "id": 12 }));
}

#[tokio::test]
async fn malformed_input_is_unprocessable() {
    let app = offline_app(AuthStrategy::Local);
    let teacher = bearer(ActingAs::Teacher(3));
    let student = bearer(ActingAs::Student(7));

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/ProposalsList/filter",
            None,
            Some(json!({ "date": "31/12/2024" })),
        ),
    )
    .await;
    assert_eq!(status, 422);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/ProposalsList/filter",
            None,
            Some(json!({ "level": 3 })),
        ),
    )
    .await;
    assert_eq!(status, 422);
    assert_eq!(body["errors"][0]["field"], "level");

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/teacher/applicationDetail/5",
            Some(&teacher),
            Some(json!({ "status": "yes" })),
        ),
    )
    .await;
    assert_eq!(status, 422);

    let (status, _) = send(
        &app,
        request("GET", "/api/teacher/applicationDetail/abc", Some(&teacher), None),
    )
    .await;
    assert_eq!(status, 422);

    let (status, _) = send(&app, request("GET", "/api/ProposalsList/-4", None, None)).await;
    assert_eq!(status, 422);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/student/applyProposal",
            Some(&student),
            Some(json!({ "proposal_id": 0 })),
        ),
    )
    .await;
    assert_eq!(status, 422);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/ProposalsList/filter",
            None,
            Some(json!({ "date": "2024-3-1" })),
        ),
    )
    .await;
    assert_eq!(status, 422);

    let (status, _) = send(&app, request("GET", "/api/thesis/open?date=2024-13-01", None, None)).await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn insert_proposal_validates_before_touching_storage() {
    let app = offline_app(AuthStrategy::Local);
    let body = json!({
        "title": " ",
        "supervisor": "not-an-email",
        "keywords": ["AI"],
        "type": "Research",
        "groups": ["G1"],
        "description": "desc",
        "expiration": "2099-12-31",
        "level": 3,
        "programmes": ["LM-32"]
    });
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/teacher/insertProposal",
            Some(&bearer(ActingAs::Teacher(3))),
            Some(body),
        ),
    )
    .await;
    assert_eq!(status, 422);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors list")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"level"));
    assert!(fields.contains(&"supervisor"));
}

#[tokio::test]
async fn unreachable_storage_is_service_unavailable() {
    let app = offline_app(AuthStrategy::Local);

    let (status, body) = send(&app, request("GET", "/api/ProposalsList", None, None)).await;
    assert_eq!(status, 503);
    assert_eq!(body["error"], "Database error, please retry later");

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, 503);
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn login_route_follows_the_auth_strategy() {
    let payload = json!({ "username": "not-an-email", "password": "x" });

    let local = offline_app(AuthStrategy::Local);
    let (status, _) = send(
        &local,
        request("POST", "/api/sessions", None, Some(payload.clone())),
    )
    .await;
    assert_eq!(status, 422);

    let saml = offline_app(AuthStrategy::Saml);
    let (status, _) = send(&saml, request("POST", "/api/sessions", None, Some(payload))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn openapi_document_lists_the_routes() {
    let app = offline_app(AuthStrategy::Local);
    let (status, body) = send(&app, request("GET", "/api-docs/openapi.json", None, None)).await;
    assert_eq!(status, 200);
    let paths = body["paths"].as_object().expect("paths");
    for path in [
        "/api/ProposalsList/filter",
        "/api/teacher/applicationDetail/{id}",
        "/api/student/applyProposal",
        "/api/virtualClock",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}
