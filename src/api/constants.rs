//! Route prefixes shared by the router and the auth middleware

/// Back-office API root
pub const ADMIN_PREFIX: &str = "/admin";

/// The only back-office path reachable without a token
pub const LOGIN_PATH: &str = "/admin/v1/auth/login";

/// Largest accepted image upload
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
