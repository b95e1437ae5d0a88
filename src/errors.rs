use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LivescoreError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    /// Non-2xx answer from an upstream HTTP service; the status is kept so it
    /// can be relayed to the caller.
    Upstream { status: u16, message: String },
    Network(String),
    Serialization(String),
    Storage(String),
    FileOperation(String),
    PasswordHash(String),
}

impl LivescoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            LivescoreError::DatabaseConfig(_) => "E001",
            LivescoreError::DatabaseConnection(_) => "E002",
            LivescoreError::DatabaseOperation(_) => "E003",
            LivescoreError::Validation(_) => "E004",
            LivescoreError::NotFound(_) => "E005",
            LivescoreError::Unauthorized(_) => "E006",
            LivescoreError::Forbidden(_) => "E007",
            LivescoreError::Upstream { .. } => "E008",
            LivescoreError::Network(_) => "E009",
            LivescoreError::Serialization(_) => "E010",
            LivescoreError::Storage(_) => "E011",
            LivescoreError::FileOperation(_) => "E012",
            LivescoreError::PasswordHash(_) => "E013",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LivescoreError::DatabaseConfig(_) => "Database Configuration Error",
            LivescoreError::DatabaseConnection(_) => "Database Connection Error",
            LivescoreError::DatabaseOperation(_) => "Database Operation Error",
            LivescoreError::Validation(_) => "Validation Error",
            LivescoreError::NotFound(_) => "Resource Not Found",
            LivescoreError::Unauthorized(_) => "Unauthorized",
            LivescoreError::Forbidden(_) => "Forbidden",
            LivescoreError::Upstream { .. } => "Upstream API Error",
            LivescoreError::Network(_) => "Network Error",
            LivescoreError::Serialization(_) => "Serialization Error",
            LivescoreError::Storage(_) => "Object Storage Error",
            LivescoreError::FileOperation(_) => "File Operation Error",
            LivescoreError::PasswordHash(_) => "Password Hash Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LivescoreError::DatabaseConfig(msg)
            | LivescoreError::DatabaseConnection(msg)
            | LivescoreError::DatabaseOperation(msg)
            | LivescoreError::Validation(msg)
            | LivescoreError::NotFound(msg)
            | LivescoreError::Unauthorized(msg)
            | LivescoreError::Forbidden(msg)
            | LivescoreError::Network(msg)
            | LivescoreError::Serialization(msg)
            | LivescoreError::Storage(msg)
            | LivescoreError::FileOperation(msg)
            | LivescoreError::PasswordHash(msg) => msg,
            LivescoreError::Upstream { message, .. } => message,
        }
    }

    /// HTTP status used when this error reaches an API boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            LivescoreError::Validation(_) => StatusCode::BAD_REQUEST,
            LivescoreError::NotFound(_) => StatusCode::NOT_FOUND,
            LivescoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LivescoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            // Upstream 4xx passes through; anything else is a bad gateway
            LivescoreError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            LivescoreError::Network(_) | LivescoreError::Storage(_) => StatusCode::BAD_GATEWAY,
            LivescoreError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Colored output for server mode
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// Compact output for CLI mode
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LivescoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LivescoreError::Upstream { status, message } => {
                write!(f, "{} ({}): {}", self.error_type(), status, message)
            }
            _ => write!(f, "{}", self.format_simple()),
        }
    }
}

impl std::error::Error for LivescoreError {}

impl LivescoreError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LivescoreError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LivescoreError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LivescoreError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LivescoreError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LivescoreError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LivescoreError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        LivescoreError::Forbidden(msg.into())
    }

    pub fn upstream<T: Into<String>>(status: u16, msg: T) -> Self {
        LivescoreError::Upstream {
            status,
            message: msg.into(),
        }
    }

    pub fn network<T: Into<String>>(msg: T) -> Self {
        LivescoreError::Network(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LivescoreError::Serialization(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        LivescoreError::Storage(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LivescoreError::FileOperation(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        LivescoreError::PasswordHash(msg.into())
    }
}

impl From<sea_orm::DbErr> for LivescoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        LivescoreError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LivescoreError {
    fn from(err: std::io::Error) -> Self {
        LivescoreError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LivescoreError {
    fn from(err: serde_json::Error) -> Self {
        LivescoreError::Serialization(err.to_string())
    }
}

impl From<ureq::Error> for LivescoreError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => {
                LivescoreError::upstream(status, format!("HTTP error! status: {}", status))
            }
            other => LivescoreError::Network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LivescoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_keeps_client_status() {
        let err = LivescoreError::upstream(429, "Too many requests");
        assert_eq!(err.http_status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.code(), "E008");
    }

    #[test]
    fn test_upstream_with_odd_status_maps_to_bad_gateway() {
        let err = LivescoreError::upstream(302, "redirected");
        assert_eq!(err.http_status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_status() {
        let err = LivescoreError::not_found("advertisement 7");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "advertisement 7");
    }

    #[test]
    fn test_display_includes_upstream_status() {
        let err = LivescoreError::upstream(500, "boom");
        assert_eq!(err.to_string(), "Upstream API Error (500): boom");
    }

    #[test]
    fn test_format_simple() {
        let err = LivescoreError::validation("name is required");
        assert_eq!(err.format_simple(), "Validation Error: name is required");
    }
}
