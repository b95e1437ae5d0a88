pub mod case;
pub mod password;
pub mod slug;
pub mod url_validator;

pub use slug::create_slug;

/// Random alphanumeric string, used for generated secrets and upload names
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}
