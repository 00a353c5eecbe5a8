//! Transactional email for the DevMeet platform
//!
//! This crate wraps the Brevo transactional email HTTP API and provides the
//! HTML templates used by the services. When Brevo credentials are not
//! configured the mailer logs emails instead of sending them, which is the
//! mode used in development and tests.

pub mod templates;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

/// Brevo transactional email endpoint
const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Custom error type for email dispatch
#[derive(Error, Debug)]
pub enum MailerError {
    /// Mailer configuration error
    #[error("Mailer configuration error: {0}")]
    Configuration(String),

    /// Error reaching the email provider
    #[error("Email request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider returned a non-success status
    #[error("Email provider rejected the request ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Type alias for Result with MailerError
pub type MailerResult<T> = Result<T, MailerError>;

/// Mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Brevo API key; emails are logged instead of sent when absent
    pub api_key: Option<String>,
    /// Sender email address
    pub sender_email: Option<String>,
    /// Sender display name
    pub sender_name: String,
}

impl MailerConfig {
    /// Create a new MailerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BREVO_API_KEY`: Brevo API key
    /// - `EMAIL_FROM`: Sender email address
    /// - `EMAIL_FROM_NAME`: Sender display name (default: "DevMeet")
    pub fn from_env() -> MailerResult<Self> {
        let api_key = std::env::var("BREVO_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let sender_email = std::env::var("EMAIL_FROM").ok().filter(|s| !s.is_empty());

        let sender_name =
            std::env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "DevMeet".to_string());

        Ok(Self {
            api_key,
            sender_email,
            sender_name,
        })
    }
}

/// Sender or recipient block in a Brevo send request
#[derive(Serialize)]
struct BrevoParty<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

/// Payload for the Brevo transactional send endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendRequest<'a> {
    sender: BrevoParty<'a>,
    to: Vec<BrevoParty<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Clone)]
enum Transport {
    /// Production transport hitting the Brevo HTTP API
    Brevo {
        client: reqwest::Client,
        api_key: String,
        sender_email: String,
    },
    /// Development transport that logs instead of sending
    Console,
}

/// Transactional email client
#[derive(Clone)]
pub struct Mailer {
    transport: Transport,
    sender_name: String,
}

impl Mailer {
    /// Create a new Mailer from configuration
    ///
    /// Falls back to the console transport when Brevo credentials are
    /// missing, so local development works without an API key.
    pub fn new(config: MailerConfig) -> Self {
        let transport = match (config.api_key, config.sender_email) {
            (Some(api_key), Some(sender_email)) => Transport::Brevo {
                client: reqwest::Client::new(),
                api_key,
                sender_email,
            },
            _ => {
                warn!("BREVO_API_KEY or EMAIL_FROM not set, emails will be logged instead of sent");
                Transport::Console
            }
        };

        Mailer {
            transport,
            sender_name: config.sender_name,
        }
    }

    /// Create a Mailer that logs emails instead of sending them
    pub fn console() -> Self {
        Mailer {
            transport: Transport::Console,
            sender_name: "DevMeet".to_string(),
        }
    }

    /// Send a transactional email
    ///
    /// # Arguments
    /// * `to` - Recipient email address
    /// * `subject` - Email subject line
    /// * `html_content` - HTML body of the email
    pub async fn send(&self, to: &str, subject: &str, html_content: &str) -> MailerResult<()> {
        match &self.transport {
            Transport::Brevo {
                client,
                api_key,
                sender_email,
            } => {
                let request = BrevoSendRequest {
                    sender: BrevoParty {
                        name: Some(&self.sender_name),
                        email: sender_email,
                    },
                    to: vec![BrevoParty {
                        name: None,
                        email: to,
                    }],
                    subject,
                    html_content,
                };

                let response = client
                    .post(BREVO_SEND_URL)
                    .header("api-key", api_key)
                    .json(&request)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    error!("Brevo rejected email to {}: {} {}", to, status, body);
                    return Err(MailerError::Rejected { status, body });
                }

                info!("Email sent to {}: {}", to, subject);
                Ok(())
            }
            Transport::Console => {
                info!("Email (console transport) to {}: {}", to, subject);
                Ok(())
            }
        }
    }
}
