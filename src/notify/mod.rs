use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::Config;
use crate::models::Article;

/// Send one HTML email for an article over a fresh SMTP-TLS session.
/// Authentication or delivery failure propagates and aborts the run.
pub async fn send_article(config: &Config, article: &Article) -> Result<()> {
    let message = build_message(config, article)?;
    let mailer = build_mailer(config)?;

    mailer
        .send(message)
        .await
        .with_context(|| format!("Failed to send email for {}", article.title))?;

    info!("Successfully sent email for {}", article.title);
    Ok(())
}

fn build_message(config: &Config, article: &Article) -> Result<Message> {
    let from: Mailbox = config
        .email_from
        .parse()
        .context("Invalid from email address")?;
    let to: Mailbox = config.email_to.parse().context("Invalid to email address")?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(article.title.clone())
        .header(ContentType::TEXT_HTML)
        .body(article.content.clone())
        .context("Failed to build email message")
}

fn build_mailer(config: &Config) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let creds = Credentials::new(config.email_user.clone(), config.email_password.clone());

    // Implicit TLS on the configured port, one connection per message.
    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.email_smtp)
        .context("Failed to create SMTP transport")?
        .port(config.email_smtp_port)
        .credentials(creds)
        .build();

    Ok(mailer)
}
