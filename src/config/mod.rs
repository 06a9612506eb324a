mod app_config;
mod ses_config;

pub use app_config::{
    AppConfig, CorsConfig, DatabaseConfig, MailBackend, MailConfig, SecurityConfig, ServerConfig,
    StoreConfig, default_log_level,
};
pub use ses_config::*;
