//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{
    BlogRepository, ContentSanitizer, PasswordService, TokenService, UserRepository,
};
use inkwell_core::services::{
    AuthGate, AuthService, BlogService, InteractionEngine, ProfileService,
};
use inkwell_infra::{
    AmmoniaSanitizer, Argon2PasswordService, InMemoryBlogRepository, InMemoryUserRepository,
    JwtTokenService,
};

use crate::config::AppConfig;
use crate::session::SessionConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub gate: Arc<AuthGate>,
    pub profiles: Arc<ProfileService>,
    pub blogs: Arc<BlogService>,
    pub interactions: Arc<InteractionEngine>,
    pub session: SessionConfig,
}

/// Adapters the services are built from.
pub struct Ports {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub sanitizer: Arc<dyn ContentSanitizer>,
}

impl Ports {
    /// In-memory stores with the production token, hashing and sanitizing
    /// adapters.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            blogs: Arc::new(InMemoryBlogRepository::new()),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            sanitizer: Arc::new(AmmoniaSanitizer::new()),
        }
    }
}

impl AppState {
    /// Wire every service from explicit adapters.
    pub fn from_ports(ports: Ports, secure_cookies: bool) -> Self {
        let session = SessionConfig::for_tokens(ports.tokens.as_ref(), secure_cookies);
        let Ports {
            users,
            blogs,
            tokens,
            passwords,
            sanitizer,
        } = ports;

        Self {
            auth: Arc::new(AuthService::new(users.clone(), passwords, tokens.clone())),
            gate: Arc::new(AuthGate::new(tokens, users.clone())),
            profiles: Arc::new(ProfileService::new(users.clone())),
            blogs: Arc::new(BlogService::new(blogs.clone(), users.clone(), sanitizer)),
            interactions: Arc::new(InteractionEngine::new(blogs, users)),
            session,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let ports = stores(config, Ports::in_memory(tokens)).await?;

        tracing::info!("Application state initialized");

        Ok(Self::from_ports(ports, config.secure_cookies))
    }
}

/// With `DATABASE_URL` set the PostgreSQL stores replace the in-memory ones.
#[cfg(feature = "postgres")]
async fn stores(config: &AppConfig, mut ports: Ports) -> anyhow::Result<Ports> {
    use migration::{Migrator, MigratorTrait};

    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok(ports);
    };

    let db = inkwell_infra::database::connect(db_config).await?;
    if config.auto_migrate {
        Migrator::up(&db, None).await?;
        tracing::info!("Database migrations applied");
    }

    ports.users = Arc::new(inkwell_infra::PostgresUserRepository::new(db.clone()));
    ports.blogs = Arc::new(inkwell_infra::PostgresBlogRepository::new(db));
    Ok(ports)
}

#[cfg(not(feature = "postgres"))]
async fn stores(_config: &AppConfig, ports: Ports) -> anyhow::Result<Ports> {
    tracing::info!("Running without postgres feature - using in-memory stores");
    Ok(ports)
}
