//! Authentication handlers.

use actix_web::cookie::{Cookie, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, web};

use bookvault_core::TokenPair;
use bookvault_core::domain::{SignInInput, SignUpInput};
use bookvault_shared::dto::{MeResponse, SignInRequest, SignUpRequest, TokenResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Name of the refresh-token cookie, scoped to the `/auth` routes.
const REFRESH_COOKIE: &str = "refresh-token";

/// POST /auth/sign-up
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input before it reaches the token service
    if req.name.trim().len() < 2 {
        return Err(AppError::BadRequest(
            "Name must be at least 2 characters".to_string(),
        ));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    state
        .tokens
        .sign_up(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "status": "ok" })))
}

/// POST /auth/sign-in
///
/// Returns the access token in the body; the refresh token travels only in
/// an HttpOnly cookie.
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let pair = state
        .tokens
        .sign_in(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(token_response(&state, pair))
}

/// POST /auth/refresh
///
/// Redeems the refresh cookie for a new token pair and rotates the cookie.
pub async fn refresh(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let cookie = req.cookie(REFRESH_COOKIE).ok_or(AppError::Unauthorized)?;

    let pair = state.tokens.refresh_tokens(cookie.value()).await?;

    Ok(token_response(&state, pair))
}

/// GET /api/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MeResponse {
        user_id: identity.user_id,
    }))
}

fn token_response(state: &AppState, pair: TokenPair) -> HttpResponse {
    let cookie = refresh_cookie(state, pair.refresh);

    HttpResponse::Ok().cookie(cookie).json(TokenResponse {
        access_token: pair.access,
        token_type: state.auth_scheme.clone(),
        expires_in: state.tokens.access_ttl_seconds() as u64,
    })
}

fn refresh_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/auth")
        .http_only(true)
        .secure(state.cookie_secure)
        .max_age(CookieDuration::days(state.refresh_ttl_days))
        .finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};

    use bookvault_infra::database::{InMemoryCredentialStore, InMemorySessionStore};

    use super::*;
    use crate::config::AuthConfig;
    use crate::handlers::configure_routes;

    fn test_state() -> AppState {
        AppState::with_stores(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemorySessionStore::new()),
            &AuthConfig {
                jwt_secret: "test-secret".to_string(),
                password_salt: "test-salt".to_string(),
                access_ttl_minutes: 15,
                refresh_ttl_days: 30,
                auth_scheme: "Bearer".to_string(),
                cookie_secure: false,
            },
        )
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn sign_up_req() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/auth/sign-up")
            .set_json(SignUpRequest {
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
    }

    fn sign_in_req(password: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/auth/sign-in")
            .set_json(SignInRequest {
                email: "a@x.com".to_string(),
                password: password.to_string(),
            })
    }

    #[actix_web::test]
    async fn sign_up_validates_and_rejects_duplicates() {
        let state = test_state();
        let app = test_app!(state);

        let short_password = test::TestRequest::post()
            .uri("/auth/sign-up")
            .set_json(SignUpRequest {
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
                password: "nope".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, short_password).await;
        assert_eq!(resp.status(), 400);

        let resp = test::call_service(&app, sign_up_req().to_request()).await;
        assert_eq!(resp.status(), 201);

        let resp = test::call_service(&app, sign_up_req().to_request()).await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn sign_in_failure_is_generic_bad_request() {
        let state = test_state();
        let app = test_app!(state);

        test::call_service(&app, sign_up_req().to_request()).await;

        let resp = test::call_service(&app, sign_in_req("wrong-pass").to_request()).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn sign_in_sets_refresh_cookie_and_returns_access_token() {
        let state = test_state();
        let app = test_app!(state);

        test::call_service(&app, sign_up_req().to_request()).await;

        let resp = test::call_service(&app, sign_in_req("secret1").to_request()).await;
        assert_eq!(resp.status(), 200);

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_COOKIE)
            .expect("refresh cookie missing")
            .into_owned();
        assert_eq!(cookie.path(), Some("/auth"));
        assert_eq!(cookie.http_only(), Some(true));

        let body: TokenResponse = test::read_body_json(resp).await;
        assert!(!body.access_token.is_empty());
        assert_eq!(body.token_type, "Bearer");

        // The access token authenticates the protected route.
        let me = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {}", body.access_token)))
            .to_request();
        let resp = test::call_service(&app, me).await;
        assert_eq!(resp.status(), 200);
        let me_body: MeResponse = test::read_body_json(resp).await;
        assert_eq!(me_body.user_id, 1);
    }

    #[actix_web::test]
    async fn me_requires_a_valid_token() {
        let state = test_state();
        let app = test_app!(state);

        let bare = test::TestRequest::get().uri("/api/me").to_request();
        assert_eq!(test::call_service(&app, bare).await.status(), 401);

        let garbage = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        assert_eq!(test::call_service(&app, garbage).await.status(), 401);

        let wrong_scheme = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", "Token abc"))
            .to_request();
        assert_eq!(test::call_service(&app, wrong_scheme).await.status(), 401);
    }

    #[actix_web::test]
    async fn refresh_rotates_the_cookie_exactly_once() {
        let state = test_state();
        let app = test_app!(state);

        test::call_service(&app, sign_up_req().to_request()).await;
        let resp = test::call_service(&app, sign_in_req("secret1").to_request()).await;
        let first = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_COOKIE)
            .unwrap()
            .into_owned();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/refresh")
                .cookie(first.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let rotated = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_COOKIE)
            .unwrap()
            .into_owned();
        assert_ne!(rotated.value(), first.value());

        // The first token was consumed by its redemption.
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/refresh")
                .cookie(first)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn refresh_without_cookie_is_unauthorized() {
        let state = test_state();
        let app = test_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/auth/refresh").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 401);
    }
}
