use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        analytics, audit, auth, cart, faq, game, health, library, news, order, payment, review,
        support, upload, user,
    },
    state::AppState,
};

/// Body limit for avatar and cover image uploads.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Registers the Keycloak bearer token scheme referenced by authenticated paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Keycloak access token from POST /api/auth/login"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    info(
        title = "Forja API",
        description = "Storefront, library and publishing API behind the Forja launcher."
    ),
    paths(
        auth::register,
        auth::login,
        auth::refresh,
        auth::logout,
        auth::me,
        health::health,
        user::get_me,
        user::update_me,
        user::set_avatar,
        user::get_profile,
        user::list_users,
        user::delete_user,
        user::follow,
        user::unfollow,
        user::followers,
        user::following,
        game::list_games,
        game::get_game,
        game::create_game,
        game::update_game,
        game::publish_game,
        game::unpublish_game,
        game::delete_game,
        game::set_cover,
        game::list_versions,
        game::latest_version,
        game::download_version,
        review::list_reviews,
        review::create_review,
        review::update_review,
        review::delete_review,
        cart::get_cart,
        cart::add_item,
        cart::remove_item,
        cart::clear_cart,
        order::checkout,
        order::list_orders,
        order::get_order,
        order::cancel_order,
        order::list_all_orders,
        payment::create_payment,
        payment::confirm_payment,
        payment::fail_payment,
        payment::refund_payment,
        payment::get_payment,
        library::list_library,
        library::get_library_entry,
        library::add_play_time,
        upload::create_upload,
        upload::upload_chunk,
        upload::get_upload,
        upload::complete_upload,
        upload::abort_upload,
        support::create_ticket,
        support::list_tickets,
        support::get_ticket,
        support::add_message,
        support::update_status,
        support::assign_ticket,
        support::delete_ticket,
        faq::list_faq,
        faq::get_faq,
        faq::create_faq,
        faq::update_faq,
        faq::delete_faq,
        news::list_news,
        news::get_news,
        news::create_news,
        news::update_news,
        news::publish_news,
        news::delete_news,
        analytics::start_session,
        analytics::end_session,
        analytics::track_events,
        analytics::search_events,
        analytics::summary,
        audit::list_audit_logs,
    ),
    tags(
        (name = "auth", description = "Registration and Keycloak token exchange"),
        (name = "health", description = "Service health"),
        (name = "user", description = "Profiles, avatars and follows"),
        (name = "game", description = "Catalog, versions and downloads"),
        (name = "review", description = "Game reviews"),
        (name = "cart", description = "Shopping cart"),
        (name = "order", description = "Checkout and orders"),
        (name = "payment", description = "Order payments"),
        (name = "library", description = "Owned games and play time"),
        (name = "upload", description = "Chunked game build uploads"),
        (name = "support", description = "Support tickets"),
        (name = "faq", description = "Frequently asked questions"),
        (name = "news", description = "Store news"),
        (name = "analytics", description = "Client sessions and events"),
        (name = "audit", description = "Audit trail of privileged actions"),
    )
)]
pub struct ApiDoc;

/// Builds every API route plus the Swagger UI at `/docs`.
///
/// # Arguments
/// - `max_chunk_size` - Body limit for upload chunk requests in bytes
pub fn router(max_chunk_size: usize) -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/users", get(user::list_users))
        .route("/api/users/me", get(user::get_me).put(user::update_me))
        .route(
            "/api/users/me/avatar",
            put(user::set_avatar).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE)),
        )
        .route(
            "/api/users/{id}",
            get(user::get_profile).delete(user::delete_user),
        )
        .route(
            "/api/users/{id}/follow",
            post(user::follow).delete(user::unfollow),
        )
        .route("/api/users/{id}/followers", get(user::followers))
        .route("/api/users/{id}/following", get(user::following))
        .route("/api/games", get(game::list_games).post(game::create_game))
        .route(
            "/api/games/{id}",
            get(game::get_game)
                .put(game::update_game)
                .delete(game::delete_game),
        )
        .route("/api/games/{id}/publish", post(game::publish_game))
        .route("/api/games/{id}/unpublish", post(game::unpublish_game))
        .route(
            "/api/games/{id}/cover",
            put(game::set_cover).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE)),
        )
        .route("/api/games/{id}/versions", get(game::list_versions))
        .route("/api/games/{id}/versions/latest", get(game::latest_version))
        .route(
            "/api/games/{id}/versions/{version_id}/download",
            get(game::download_version),
        )
        .route(
            "/api/games/{id}/reviews",
            get(review::list_reviews).post(review::create_review),
        )
        .route(
            "/api/reviews/{id}",
            put(review::update_review).delete(review::delete_review),
        )
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route("/api/cart/items/{game_id}", delete(cart::remove_item))
        .route(
            "/api/orders",
            get(order::list_orders).post(order::checkout),
        )
        .route("/api/orders/{id}", get(order::get_order))
        .route("/api/orders/{id}/cancel", post(order::cancel_order))
        .route("/api/admin/orders", get(order::list_all_orders))
        .route("/api/payments", post(payment::create_payment))
        .route("/api/payments/{id}", get(payment::get_payment))
        .route("/api/payments/{id}/confirm", post(payment::confirm_payment))
        .route("/api/payments/{id}/fail", post(payment::fail_payment))
        .route("/api/payments/{id}/refund", post(payment::refund_payment))
        .route("/api/library", get(library::list_library))
        .route("/api/library/{game_id}", get(library::get_library_entry))
        .route(
            "/api/library/{game_id}/playtime",
            post(library::add_play_time),
        )
        .route("/api/uploads", post(upload::create_upload))
        .route(
            "/api/uploads/{id}",
            get(upload::get_upload).delete(upload::abort_upload),
        )
        .route(
            "/api/uploads/{id}/chunks/{index}",
            put(upload::upload_chunk).layer(DefaultBodyLimit::max(max_chunk_size)),
        )
        .route("/api/uploads/{id}/complete", post(upload::complete_upload))
        .route(
            "/api/support-tickets",
            get(support::list_tickets).post(support::create_ticket),
        )
        .route(
            "/api/support-tickets/{id}",
            get(support::get_ticket).delete(support::delete_ticket),
        )
        .route(
            "/api/support-tickets/{id}/messages",
            post(support::add_message),
        )
        .route(
            "/api/support-tickets/{id}/status",
            put(support::update_status),
        )
        .route(
            "/api/support-tickets/{id}/assign",
            put(support::assign_ticket),
        )
        .route("/api/faq", get(faq::list_faq).post(faq::create_faq))
        .route(
            "/api/faq/{id}",
            get(faq::get_faq)
                .put(faq::update_faq)
                .delete(faq::delete_faq),
        )
        .route("/api/news", get(news::list_news).post(news::create_news))
        .route(
            "/api/news/{id}",
            get(news::get_news)
                .put(news::update_news)
                .delete(news::delete_news),
        )
        .route("/api/news/{id}/publish", post(news::publish_news))
        .route(
            "/api/analytics/sessions",
            post(analytics::start_session),
        )
        .route(
            "/api/analytics/sessions/{id}/end",
            post(analytics::end_session),
        )
        .route(
            "/api/analytics/events",
            get(analytics::search_events).post(analytics::track_events),
        )
        .route("/api/analytics/summary", get(analytics::summary))
        .route("/api/audit-logs", get(audit::list_audit_logs))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use test_utils::builder::TestBuilder;
    use tower::ServiceExt;

    use crate::{
        model::{api::ErrorDto, health::HealthDto},
        server::test_support::{claims, TestApp, TEST_MAX_CHUNK_SIZE},
    };

    async fn app() -> (TestApp, Router, test_utils::context::TestContext) {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let app = TestApp::new(test.db.as_ref().unwrap().clone());
        let router = router(TEST_MAX_CHUNK_SIZE).with_state(app.state.clone());

        (app, router, test)
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(body).unwrap()
    }

    /// Tests the health endpoint against a reachable database.
    ///
    /// Expected: 200 with status "ok"
    #[tokio::test]
    async fn health_reports_ok() {
        let (_app, router, _test) = app().await;

        let response = router
            .oneshot(request(Method::GET, "/api/health", None, Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthDto = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert!(health.database);
    }

    /// Tests that authenticated routes refuse requests without a token.
    ///
    /// Expected: 401
    #[tokio::test]
    async fn requires_token() {
        let (_app, router, _test) = app().await;

        let response = router
            .oneshot(request(Method::GET, "/api/cart", None, Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Tests that validation failures come back as 400 with an error body.
    ///
    /// Expected: 400 with a non-empty error message
    #[tokio::test]
    async fn rejects_blank_faq_question() {
        let (app, router, _test) = app().await;
        app.identity
            .add_token("root", claims("kc-root", "root", &["admin"]));

        let body = serde_json::json!({ "question": "", "answer": "Yes", "sort_order": 0 });
        let response = router
            .oneshot(request(
                Method::POST,
                "/api/faq",
                Some("root"),
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ErrorDto = serde_json::from_slice(&body).unwrap();
        assert!(!error.error.is_empty());
    }

    /// Tests that non-admins cannot manage the FAQ.
    ///
    /// Expected: 403
    #[tokio::test]
    async fn faq_requires_admin() {
        let (app, router, _test) = app().await;
        app.identity
            .add_token("player", claims("kc-player", "player", &[]));

        let body = serde_json::json!({ "question": "Refunds?", "answer": "Yes", "sort_order": 0 });
        let response = router
            .oneshot(request(
                Method::POST,
                "/api/faq",
                Some("player"),
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    /// Tests deleting a ticket that does not exist.
    ///
    /// Expected: 404
    #[tokio::test]
    async fn delete_missing_ticket() {
        let (app, router, _test) = app().await;
        app.identity
            .add_token("player", claims("kc-player", "player", &[]));

        let response = router
            .oneshot(request(
                Method::DELETE,
                "/api/support-tickets/999",
                Some("player"),
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests that chunks above the configured size are refused before reaching the handler.
    ///
    /// Expected: 413
    #[tokio::test]
    async fn rejects_oversized_chunk() {
        let (app, router, _test) = app().await;
        app.identity
            .add_token("dev", claims("kc-dev", "dev", &["developer"]));

        let response = router
            .oneshot(request(
                Method::PUT,
                "/api/uploads/some-upload/chunks/0",
                Some("dev"),
                Body::from(vec![0u8; TEST_MAX_CHUNK_SIZE * 2]),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    /// Tests that the OpenAPI document registers the bearer scheme.
    ///
    /// Expected: "bearer" security scheme and the health path present
    #[test]
    fn openapi_document() {
        let doc = ApiDoc::openapi();

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
        assert!(doc.paths.paths.contains_key("/api/health"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/uploads/{id}/chunks/{index}"));
    }
}
