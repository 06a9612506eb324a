use crate::error::{AppError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub security: SecurityConfig,
    pub mail: MailConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    Ses,
    Console,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub backend: MailBackend,
    pub from_email: String,
    pub notify_email: String,
    pub aws_region: String,
    pub invoice_pdf: bool,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub whatsapp_number: String,
    pub media_url: String,
    pub order_prefix: String,
}

const DEFAULT_SECRET_KEY: &str = "unsafe-dev-secret-key";

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let security = SecurityConfig {
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
            debug: parse_bool("DEBUG", &env::var("DEBUG").unwrap_or_else(|_| "false".to_string()))?,
            allowed_hosts: parse_list(&env::var("ALLOWED_HOSTS").unwrap_or_else(|_| "*".to_string())),
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.trim().is_empty()),
        };

        if security.secret_key == DEFAULT_SECRET_KEY && !security.debug {
            tracing::warn!("SECRET_KEY is not set; session cookies are signed with the development key");
        }

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
                max_body_size: env::var("MAX_BODY_SIZE")
                    .unwrap_or_else(|_| "1048576".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid MAX_BODY_SIZE value".to_string()))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| AppError::ConfigError("DATABASE_URL not set".to_string()))?,
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::ConfigError("Invalid DB_MAX_CONNECTIONS value".to_string())
                    })?,
                acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::ConfigError("Invalid DB_ACQUIRE_TIMEOUT_SECS value".to_string())
                    })?,
            },
            cors: CorsConfig {
                allowed_origins: parse_list(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default()),
            },
            mail: MailConfig {
                backend: parse_mail_backend(
                    &env::var("MAIL_BACKEND").unwrap_or_else(|_| "console".to_string()),
                )?,
                from_email: env::var("FROM_EMAIL")
                    .unwrap_or_else(|_| "orders@localhost".to_string()),
                notify_email: env::var("ORDER_NOTIFY_EMAIL")
                    .unwrap_or_else(|_| "operator@localhost".to_string()),
                aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                invoice_pdf: parse_bool(
                    "INVOICE_PDF",
                    &env::var("INVOICE_PDF").unwrap_or_else(|_| "true".to_string()),
                )?,
            },
            store: StoreConfig {
                name: env::var("STORE_NAME").unwrap_or_else(|_| "Storefront".to_string()),
                phone: env::var("STORE_PHONE").unwrap_or_default(),
                email: env::var("STORE_EMAIL").unwrap_or_default(),
                whatsapp_number: env::var("WHATSAPP_NUMBER").unwrap_or_default(),
                media_url: env::var("MEDIA_URL")
                    .unwrap_or_else(|_| "/media".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                order_prefix: env::var("ORDER_PREFIX").unwrap_or_else(|_| "RS".to_string()),
            },
            security,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl SecurityConfig {
    /// `*` anywhere in the list disables the host check.
    pub fn allows_host(&self, host: &str) -> bool {
        let host = strip_port(host);

        self.allowed_hosts.iter().any(|allowed| {
            allowed == "*"
                || allowed.eq_ignore_ascii_case(host)
                || allowed
                    .strip_prefix('.')
                    .is_some_and(|suffix| host.ends_with(&format!(".{}", suffix)) || host == suffix)
        })
    }
}

/// `host:port` and `[v6]:port` down to the host part; brackets are kept.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Default log level for the `DEBUG` flag, parsed the same way as the config.
pub fn default_log_level(debug: &str) -> Result<&'static str> {
    Ok(if parse_bool("DEBUG", debug)? { "debug" } else { "info" })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::ConfigError(format!("Invalid {} value", name))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_mail_backend(value: &str) -> Result<MailBackend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ses" => Ok(MailBackend::Ses),
        "console" => Ok(MailBackend::Console),
        other => Err(AppError::ConfigError(format!(
            "Unknown MAIL_BACKEND '{}', expected 'ses' or 'console'",
            other
        ))),
    }
}
