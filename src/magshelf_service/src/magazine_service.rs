use std::path::Path;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request,
    },
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
};
use magshelf_adapters::{
    AppState, RequestAuthenticator,
    config::AllowedOrigins,
    http::{
        require_authentication,
        routes::{
            add_comment, current_user, delete_magazine, forgot_password, google_callback,
            google_login, list_magazines, login, logout, register, reset_password, toggle_like,
            update_magazine, upload_file, upload_magazine, user_magazines, verify_otp,
        },
    },
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Upper bound for a single multipart upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// All magshelf routes behind one router
pub struct MagazineService {
    router: Router,
}

impl MagazineService {
    /// # Arguments
    /// * `state` - Adapters and auth configuration shared by every route
    /// * `uploads_dir` - Directory served under `/uploads`
    /// * `assets_dir` - Frontend build served for every unmatched path
    pub fn new(state: AppState, uploads_dir: impl AsRef<Path>, assets_dir: impl AsRef<Path>) -> Self {
        let assets_dir = assets_dir.as_ref();
        let assets_service =
            ServeDir::new(assets_dir).fallback(ServeFile::new(assets_dir.join("index.html")));

        let guard = from_fn_with_state(
            state.authenticator.clone(),
            require_authentication::<RequestAuthenticator>,
        );

        // Everything here needs a live session cookie
        let guarded = Router::new()
            .route("/auth/user", get(current_user))
            .route("/auth/logout", post(logout))
            .route(
                "/upload",
                post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
            )
            .route("/magazines/upload", post(upload_magazine))
            .route("/magazines/user-magazines", get(user_magazines))
            .route("/magazines/{id}/like", post(toggle_like))
            .route("/magazines/{id}/comment", post(add_comment))
            .route("/magazines/{id}", put(update_magazine).delete(delete_magazine))
            .route_layer(guard);

        let router = Router::new()
            .route("/health", get(health))
            .route("/auth/register", post(register))
            .route("/auth/verify-otp", post(verify_otp))
            .route("/auth/login", post(login))
            .route("/auth/google", get(google_login))
            .route("/auth/google/callback", get(google_callback))
            .route("/auth/forgot-password", post(forgot_password))
            .route("/auth/reset-password", post(reset_password))
            .route("/magazines", get(list_magazines))
            .merge(guarded)
            .with_state(state)
            .nest_service("/uploads", ServeDir::new(uploads_dir))
            .fallback_service(assets_service);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Magazine service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
