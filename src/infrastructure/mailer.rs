use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::VerificationMailer;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// Sends verification codes through the EmailJS REST API.
///
/// Without configuration every send reports failure, which makes callers
/// fall back to logging the code.
#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    client: reqwest::Client,
    config: Option<EmailJsConfig>,
    endpoint: String,
}

impl EmailJsMailer {
    pub fn new(config: Option<EmailJsConfig>) -> Self {
        Self::with_endpoint(config, EMAILJS_ENDPOINT)
    }

    pub fn with_endpoint(config: Option<EmailJsConfig>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl VerificationMailer for EmailJsMailer {
    async fn send_verification_code(&self, email: &str, name: &str, code: &str) -> bool {
        let Some(config) = &self.config else {
            log::warn!("EmailJS is not configured; set EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID and EMAILJS_PUBLIC_KEY");
            return false;
        };

        let body = json!({
            "service_id": config.service_id,
            "template_id": config.template_id,
            "user_id": config.public_key,
            "template_params": {
                "to_email": email,
                "to_name": name,
                "code": code,
            }
        });

        match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                log::error!("EmailJS rejected message to {}: {}", email, resp.status());
                false
            }
            Err(e) => {
                log::error!("sending email to {} failed: {}", email, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_mailer_reports_failure() {
        let mailer = EmailJsMailer::new(None);
        assert!(!mailer.send_verification_code("a@b.c", "A", "123456").await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_failure() {
        let mailer = EmailJsMailer::with_endpoint(
            Some(EmailJsConfig {
                service_id: "svc".into(),
                template_id: "tpl".into(),
                public_key: "key".into(),
            }),
            "http://127.0.0.1:9/send",
        );
        assert!(!mailer.send_verification_code("a@b.c", "A", "123456").await);
    }
}
