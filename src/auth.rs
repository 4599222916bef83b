use crate::db::Store;
use rusqlite::OptionalExtension;

/// Exact, case-sensitive match on both fields. Passwords are stored and
/// compared in clear text to stay compatible with existing `school.db` files.
pub fn authenticate(store: &Store, username: &str, password: &str) -> anyhow::Result<bool> {
    let found: Option<i64> = store
        .conn()
        .query_row(
            "SELECT 1 FROM users WHERE username = ? AND password = ?",
            (username, password),
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_credential_authenticates() {
        let store = Store::open_in_memory().expect("open store");
        assert!(authenticate(&store, "admin", "admin").expect("auth"));
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        let store = Store::open_in_memory().expect("open store");
        assert!(!authenticate(&store, "admin", "wrong").expect("auth"));
        assert!(!authenticate(&store, "nouser", "x").expect("auth"));
        assert!(!authenticate(&store, "", "").expect("auth"));
    }

    #[test]
    fn comparison_is_case_sensitive_and_untrimmed() {
        let store = Store::open_in_memory().expect("open store");
        assert!(!authenticate(&store, "Admin", "admin").expect("auth"));
        assert!(!authenticate(&store, "admin", "ADMIN").expect("auth"));
        assert!(!authenticate(&store, " admin", "admin").expect("auth"));
        assert!(!authenticate(&store, "admin", "admin ").expect("auth"));
    }

    #[test]
    fn quotes_in_input_are_bound_not_interpolated() {
        let store = Store::open_in_memory().expect("open store");
        assert!(!authenticate(&store, "admin' --", "anything").expect("auth"));
        assert!(!authenticate(&store, "admin", "' OR '1'='1").expect("auth"));
    }
}
