use crate::domain::ports::AdminAuthenticator;

/// Admin credential pair taken from configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredAdmin {
    email: String,
    password: String,
}

impl ConfiguredAdmin {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl AdminAuthenticator for ConfiguredAdmin {
    fn verify(&self, email: &str, password: &str) -> bool {
        !self.password.is_empty()
            && self.email.eq_ignore_ascii_case(email.trim())
            && self.password == password
    }
}
