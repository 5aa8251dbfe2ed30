//! Authentication middleware and extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};

use bookvault_core::AuthError;
use bookvault_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require a valid access token:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
}

/// Error type for authentication failures at the extractor.
#[derive(Debug)]
pub enum AuthenticationError {
    MissingHeader,
    BadScheme,
    Token(AuthError),
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationError::MissingHeader => write!(f, "missing authorization header"),
            AuthenticationError::BadScheme => write!(f, "unexpected authorization scheme"),
            AuthenticationError::Token(e) => write!(f, "{}", e),
        }
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        // One generic body for every failure mode; no hints about what
        // exactly was wrong with the token.
        let error = ErrorResponse::unauthorized()
            .with_detail("Please provide a valid access token in the Authorization header.");

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<actix_web::web::Data<AppState>>() {
            Some(state) => state,
            None => {
                tracing::error!("AppState not found in app data");
                return ready(Err(AuthenticationError::Token(AuthError::InvalidToken)));
            }
        };

        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => return ready(Err(AuthenticationError::MissingHeader)),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => return ready(Err(AuthenticationError::BadScheme)),
        };

        // Parse "<scheme> <token>" against the configured scheme.
        let token = match auth_str.split_once(' ') {
            Some((scheme, token)) if scheme == state.auth_scheme => token,
            _ => return ready(Err(AuthenticationError::BadScheme)),
        };

        match state.tokens.parse_token(token) {
            Ok(user_id) => ready(Ok(Identity { user_id })),
            Err(e) => ready(Err(AuthenticationError::Token(e))),
        }
    }
}
