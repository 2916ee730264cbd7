//! Email service for OTP delivery and account notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::enums::OtpPurpose,
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a one-time verification code
    pub async fn send_otp_code(&self, to: &str, code: &str, purpose: OtpPurpose) -> AppResult<()> {
        let subject = match purpose {
            OtpPurpose::Login => "Your Veranda Login Code",
            OtpPurpose::PasswordReset => "Your Veranda Password Reset Code",
        };
        let context = match purpose {
            OtpPurpose::Login => "complete your login",
            OtpPurpose::PasswordReset => "reset your password",
        };
        let body = format!(
            r#"
Your verification code is: {code}

Use this code to {context}. It will expire in 5 minutes.

If you didn't request this code, please ignore this email.
"#,
            code = code,
            context = context
        );

        self.send_email(to, subject, &body).await
    }

    /// Send the welcome email for a newly provisioned employee account
    pub async fn send_welcome(&self, to: &str, firstname: &str) -> AppResult<()> {
        let subject = "Welcome to Veranda";
        let body = format!(
            r#"
Hello {firstname},

An account has been created for you on the Veranda hotel management system.
Sign in with this email address and the password you were given; you will
receive a verification code by email each time you log in.

"#,
            firstname = firstname
        );

        self.send_email(to, subject, &body).await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self.config.smtp_from_name.as_deref().unwrap_or("Veranda");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
