use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object representing a normalized email address
///
/// # Invariants
/// - Surrounding whitespace is trimmed and the address is lowercased
/// - Exactly one '@' with a non-empty local part and domain
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use mallrats_api::domain::user::Email;
    ///
    /// let email = Email::new("  Shopper@Example.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "shopper@example.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, String> {
        let normalized = email.as_ref().trim().to_lowercase();
        if Self::is_valid(&normalized) {
            Ok(Email(normalized))
        } else {
            Err(format!("Invalid email: {}", email.as_ref()))
        }
    }

    fn is_valid(email: &str) -> bool {
        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !email.contains(char::is_whitespace)
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("shopper@mallrats.test").is_ok());
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new(" Admin@MallRats.Test").unwrap();
        assert_eq!(email.as_str(), "admin@mallrats.test");
    }

    #[test]
    fn invalid_email_no_at_symbol() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn invalid_email_missing_parts() {
        assert!(Email::new("@mallrats.test").is_err());
        assert!(Email::new("admin@").is_err());
    }

    #[test]
    fn invalid_email_two_at_symbols() {
        assert!(Email::new("a@b@c").is_err());
    }

    #[test]
    fn invalid_email_inner_whitespace() {
        assert!(Email::new("ad min@mallrats.test").is_err());
    }

    #[test]
    fn email_display() {
        let email = Email::new("shopper@mallrats.test").unwrap();
        assert_eq!(format!("{}", email), "shopper@mallrats.test");
    }
}
