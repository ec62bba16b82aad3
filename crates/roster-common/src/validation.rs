/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Structural check on an email address: exactly one `@` separating a
/// non-empty local part from a dotted domain, no whitespace anywhere.
/// Deliverability is not our problem; obvious garbage is.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
}
