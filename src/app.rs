use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
};
use sha2::{Digest, Sha512};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer, cookie::Key};

use crate::{
    config::{self, AppConfig, MailBackend, MailConfig, SecurityConfig, StoreConfig},
    database,
    error::{AppError, Result},
    middleware::allowed_hosts_middleware,
    routes,
    services::email_service::{ConsoleMailer, Mailer, SesMailer},
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub mailer: Arc<dyn Mailer>,
    pub mail: Arc<MailConfig>,
    pub store: Arc<StoreConfig>,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    pub fn new(db: PgPool, mailer: Arc<dyn Mailer>, config: &AppConfig) -> Self {
        Self {
            db,
            mailer,
            mail: Arc::new(config.mail.clone()),
            store: Arc::new(config.store.clone()),
            security: Arc::new(config.security.clone()),
        }
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    let mailer = build_mailer(&config.mail).await?;
    let state = AppState::new(pool, mailer, config);

    router(state, config)
}

async fn build_mailer(mail: &MailConfig) -> Result<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match mail.backend {
        MailBackend::Ses => Arc::new(SesMailer::new(config::load_ses_client(mail).await?)),
        MailBackend::Console => {
            tracing::info!("Using console mail backend; order emails are only logged");
            Arc::new(ConsoleMailer)
        }
    };

    Ok(mailer)
}

/// Assembles routes and layers around an already-built state.
pub fn router(state: AppState, config: &AppConfig) -> Result<Router> {
    let key = Key::from(Sha512::digest(config.security.secret_key.as_bytes()).as_slice());
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(!config.security.debug)
        .with_signed(key);

    let mut app = routes::create_router(state.clone())
        .layer(sessions)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            allowed_hosts_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TraceLayer::new_for_http());

    if !config.cors.allowed_origins.is_empty() {
        let allowed_origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_origin(allowed_origins)
            .allow_credentials(true);

        app = app.layer(cors);
    }

    Ok(app.with_state(state))
}
