//! SMTP message dispatcher built on lettre.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use ev_core::services::verification::{mask_email, EmailEnvelope, MessageDispatcher};

use crate::InfrastructureError;

/// SMTP transport configuration, environment-sourced.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// `"starttls"` (default) or `"tls"`
    pub encryption: String,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| InfrastructureError::Config("SMTP_HOST not set".to_string()))?;
        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| InfrastructureError::Config("invalid SMTP_PORT".to_string()))?;
        let username = std::env::var("SMTP_USERNAME")
            .map_err(|_| InfrastructureError::Config("SMTP_USERNAME not set".to_string()))?;
        let password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| InfrastructureError::Config("SMTP_PASSWORD not set".to_string()))?;
        let encryption =
            std::env::var("SMTP_ENCRYPTION").unwrap_or_else(|_| "starttls".to_string());

        Ok(Self {
            host,
            port,
            username,
            password,
            encryption,
        })
    }
}

/// Dispatcher sending plain-text messages over async SMTP.
pub struct SmtpDispatcher {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpDispatcher {
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = match config.encryption.to_lowercase().as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| InfrastructureError::Email(format!("SMTP relay: {}", e)))?,
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| InfrastructureError::Email(format!("SMTP starttls: {}", e)))?,
        };

        let mailer = builder.port(config.port).credentials(credentials).build();
        Ok(Self { mailer })
    }
}

#[async_trait]
impl MessageDispatcher for SmtpDispatcher {
    async fn send(
        &self,
        subject: &str,
        body: &str,
        envelope: &EmailEnvelope,
    ) -> Result<String, String> {
        let message = Message::builder()
            .from(
                envelope
                    .from
                    .parse()
                    .map_err(|e| format!("invalid sender address: {}", e))?,
            )
            .to(envelope
                .to
                .parse()
                .map_err(|e| format!("invalid recipient address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("failed to build message: {}", e))?;

        let response = self.mailer.send(message).await.map_err(|e| e.to_string())?;

        info!(
            to = %mask_email(&envelope.to),
            event = "email_sent",
            "Verification message accepted by relay"
        );
        Ok(response.code().to_string())
    }
}
