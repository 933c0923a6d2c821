/// Credentials for one dashboard session.
///
/// Handed to [`BillingApiClient::new`](crate::client::api::BillingApiClient::new)
/// when the session starts; the client owns it until
/// [`end_session`](crate::client::api::BillingApiClient::end_session).
#[derive(Clone)]
pub struct Session {
    api_key: String,
    environment_id: Option<String>,
}

impl Session {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment_id: None,
        }
    }

    pub fn with_environment(mut self, environment_id: impl Into<String>) -> Self {
        self.environment_id = Some(environment_id.into());
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn environment_id(&self) -> Option<&str> {
        self.environment_id.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api_key", &mask_key(&self.api_key))
            .field("environment_id", &self.environment_id)
            .finish()
    }
}

fn mask_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}****", key.chars().take(4).collect::<String>())
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_key() {
        let session = Session::new("sk_live_abcdef123456").with_environment("env_prod");
        let printed = format!("{:?}", session);
        assert!(printed.contains("sk_l****"));
        assert!(!printed.contains("abcdef123456"));
        assert!(printed.contains("env_prod"));
    }

    #[test]
    fn short_keys_fully_masked() {
        assert_eq!(mask_key("abc"), "****");
    }
}
