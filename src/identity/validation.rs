//! Username validation
//!
//! ASCII usernames: letters, digits and `.`, `@`, `+`, `-`, `_`.

/// Longest username accepted
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Returns true when `username` can name an identity directory.
///
/// `.` and `..` are made of allowed characters but resolve to the data root
/// and its parent, so they are refused.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LENGTH
        && username != "."
        && username != ".."
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}
