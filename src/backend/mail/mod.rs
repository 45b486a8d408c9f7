//! Mail Module
//!
//! Outgoing email delivery. The backend sends exactly one kind of email
//! today (password reset codes), but delivery is kept behind [`Mailer`] so
//! handlers do not care where the message goes.
//!
//! # Delivery Modes
//!
//! - **`Smtp`** - lettre async SMTP transport (STARTTLS relay with credentials)
//! - **`Log`** - No relay configured: the message is written to the log
//! - **`Outbox`** - Messages are kept in memory, for tests
//!
//! # Example
//!
//! ```rust
//! use notes_backend::backend::mail::{Mailer, OutgoingEmail};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mailer = Mailer::outbox("noreply@example.com");
//! mailer.send(OutgoingEmail {
//!     to: "user@example.com".into(),
//!     subject: "Hello".into(),
//!     text: "Hi there".into(),
//!     html: None,
//! }).await?;
//! assert_eq!(mailer.sent().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::shared::{AppConfig, SmtpConfig};

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A message ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    /// Optional HTML alternative to `text`
    pub html: Option<String>,
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outgoing mail transport
#[derive(Clone)]
pub enum Mailer {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    Log {
        from: String,
    },
    Outbox {
        from: String,
        sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    },
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smtp { from, .. } => f.debug_struct("Smtp").field("from", &from.to_string()).finish(),
            Self::Log { from } => f.debug_struct("Log").field("from", from).finish(),
            Self::Outbox { from, .. } => f.debug_struct("Outbox").field("from", from).finish(),
        }
    }
}

impl Mailer {
    /// Select the mailer for the configuration
    ///
    /// No `smtp` section means messages are only logged.
    pub fn from_config(config: &AppConfig) -> Result<Self, MailError> {
        match &config.smtp {
            Some(smtp) => Self::smtp(smtp, &config.default_from_email),
            None => {
                tracing::warn!("SMTP_HOST not set. Emails will be written to the log only.");
                Ok(Self::Log {
                    from: config.default_from_email.clone(),
                })
            }
        }
    }

    /// Build an SMTP mailer
    pub fn smtp(smtp: &SmtpConfig, from: &str) -> Result<Self, MailError> {
        let from: Mailbox = from.parse()?;

        let mut builder = if smtp.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        };
        builder = builder.port(smtp.port).timeout(Some(SMTP_TIMEOUT));

        if let (Some(username), Some(password)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!("SMTP mailer configured for {}:{}", smtp.host, smtp.port);

        Ok(Self::Smtp {
            transport: builder.build(),
            from,
        })
    }

    /// In-memory mailer whose messages can be read back with [`Mailer::sent`]
    pub fn outbox(from: impl Into<String>) -> Self {
        Self::Outbox {
            from: from.into(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Deliver a message
    pub async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        match self {
            Self::Smtp { transport, from } => {
                let message = build_message(from.clone(), &email)?;
                transport.send(message).await?;
                tracing::info!("Email '{}' sent to {}", email.subject, email.to);
            }
            Self::Log { from } => {
                // Validate like the SMTP path would
                let _: Mailbox = email.to.parse()?;
                tracing::info!(
                    from = %from,
                    to = %email.to,
                    subject = %email.subject,
                    "Email not sent (no SMTP relay configured):\n{}",
                    email.text
                );
            }
            Self::Outbox { sent, .. } => {
                let _: Mailbox = email.to.parse()?;
                sent.lock().unwrap_or_else(PoisonError::into_inner).push(email);
            }
        }
        Ok(())
    }

    /// Messages delivered to the outbox so far
    ///
    /// Always empty for the other modes.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        match self {
            Self::Outbox { sent, .. } => sent.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            _ => Vec::new(),
        }
    }
}

fn build_message(from: Mailbox, email: &OutgoingEmail) -> Result<Message, MailError> {
    let builder = Message::builder()
        .from(from)
        .to(email.to.parse()?)
        .subject(email.subject.clone());

    let message = match &email.html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(email.text.clone(), html.clone()))?,
        None => builder.body(email.text.clone())?,
    };

    Ok(message)
}
