use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::AppArgs;

const OTP_SUBJECT: &str = "Email Verification OTP";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Outgoing mail collaborator. Without a configured relay the code only
/// shows up in the log, which is enough for local development.
#[derive(Clone)]
pub enum Mailer {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    Log,
}

impl Mailer {
    pub fn from_args(args: &AppArgs) -> Result<Self, MailError> {
        let Some(host) = args.smtp_host.as_deref() else {
            return Ok(Self::Log);
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?;

        if let (Some(username), Some(password)) =
            (args.smtp_username.clone(), args.smtp_password.clone())
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self::Smtp {
            transport: builder.build(),
            from: args.mail_from.parse()?,
        })
    }

    pub async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailError> {
        match self {
            Self::Smtp { transport, from } => {
                let message = Message::builder()
                    .from(from.clone())
                    .to(to.parse()?)
                    .subject(OTP_SUBJECT)
                    .header(ContentType::TEXT_PLAIN)
                    .body(format!("Your OTP for email verification is: {code}"))?;

                transport.send(message).await?;

                Ok(())
            }
            Self::Log => {
                tracing::info!(to, code, "no smtp relay configured, logging otp instead");
                Ok(())
            }
        }
    }
}
