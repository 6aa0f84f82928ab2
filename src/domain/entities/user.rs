/// Name used when a sender has neither a username nor a first name
pub const FALLBACK_NAME: &str = "User";

/// Represents the sender of a message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_first_name(mut self, first: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self
    }

    /// Name shown after the `@` in replies: username, then first name, then "User".
    /// Empty strings count as missing.
    pub fn handle(&self) -> &str {
        [&self.username, &self.first_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or(FALLBACK_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_prefers_username() {
        let user = User::new(1).with_username("alice").with_first_name("Alice");
        assert_eq!(user.handle(), "alice");
    }

    #[test]
    fn handle_falls_back_to_first_name() {
        let user = User::new(1).with_first_name("Bob");
        assert_eq!(user.handle(), "Bob");
    }

    #[test]
    fn handle_skips_empty_values() {
        let user = User::new(1).with_username("").with_first_name("");
        assert_eq!(user.handle(), FALLBACK_NAME);

        let user = User::new(1).with_username("").with_first_name("Carol");
        assert_eq!(user.handle(), "Carol");
    }

    #[test]
    fn handle_defaults_to_user() {
        assert_eq!(User::new(42).handle(), "User");
    }
}
