use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client as SesClient,
    primitives::Blob,
    types::{Body, Content, Destination, EmailContent, Message, RawMessage},
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachment: Option<Attachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

pub struct SesMailer {
    client: SesClient,
}

impl SesMailer {
    pub fn new(client: SesClient) -> Self {
        Self { client }
    }

    fn simple_content(email: &OutboundEmail) -> Result<EmailContent> {
        let subject = Content::builder()
            .data(&email.subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| AppError::MailError(format!("Failed to build subject: {}", e)))?;

        let text_body = Content::builder()
            .data(&email.text)
            .charset("UTF-8")
            .build()
            .map_err(|e| AppError::MailError(format!("Failed to build body: {}", e)))?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text_body).build())
            .build();

        Ok(EmailContent::builder().simple(message).build())
    }

    fn raw_content(email: &OutboundEmail) -> Result<EmailContent> {
        let boundary = format!("----=_Part_{}", uuid::Uuid::new_v4().simple());
        let mime = build_mime_message(email, &boundary);

        let raw = RawMessage::builder()
            .data(Blob::new(mime.into_bytes()))
            .build()
            .map_err(|e| AppError::MailError(format!("Failed to build raw message: {}", e)))?;

        Ok(EmailContent::builder().raw(raw).build())
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let content = if email.attachment.is_some() {
            Self::raw_content(email)?
        } else {
            Self::simple_content(email)?
        };

        let destination = Destination::builder().to_addresses(&email.to).build();

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send email: {:?}", e);
                AppError::MailError(format!("SES rejected message '{}'", email.subject))
            })?;

        Ok(())
    }
}

/// Logs outgoing mail instead of delivering it.
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        tracing::info!(
            to = %email.to,
            from = %email.from,
            subject = %email.subject,
            attachment = email.attachment.as_ref().map(|a| a.filename.as_str()),
            "Email (console backend):\n{}",
            email.text
        );

        Ok(())
    }
}

/// Builds a `multipart/mixed` message with a text part and the attachment in base64.
pub fn build_mime_message(email: &OutboundEmail, boundary: &str) -> String {
    let mut mime = String::new();

    mime.push_str(&format!("From: {}\r\n", email.from));
    mime.push_str(&format!("To: {}\r\n", email.to));
    mime.push_str(&format!("Subject: {}\r\n", email.subject));
    mime.push_str("MIME-Version: 1.0\r\n");
    mime.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{}\"\r\n\r\n",
        boundary
    ));

    mime.push_str(&format!("--{}\r\n", boundary));
    mime.push_str("Content-Type: text/plain; charset=UTF-8\r\n");
    mime.push_str("Content-Transfer-Encoding: 8bit\r\n\r\n");
    mime.push_str(&email.text.replace('\n', "\r\n"));
    mime.push_str("\r\n");

    if let Some(attachment) = &email.attachment {
        mime.push_str(&format!("--{}\r\n", boundary));
        mime.push_str(&format!(
            "Content-Type: {}; name=\"{}\"\r\n",
            attachment.content_type, attachment.filename
        ));
        mime.push_str("Content-Transfer-Encoding: base64\r\n");
        mime.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
            attachment.filename
        ));

        let encoded = STANDARD.encode(&attachment.data);
        for chunk in encoded.as_bytes().chunks(76) {
            mime.push_str(&String::from_utf8_lossy(chunk));
            mime.push_str("\r\n");
        }
    }

    mime.push_str(&format!("--{}--\r\n", boundary));
    mime
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(attachment: Option<Attachment>) -> OutboundEmail {
        OutboundEmail {
            from: "orders@shop.test".to_string(),
            to: "owner@shop.test".to_string(),
            subject: "Order Confirmation: RS-10001".to_string(),
            text: "Hello\nWorld".to_string(),
            attachment,
        }
    }

    #[test]
    fn mime_message_carries_headers_and_closing_boundary() {
        let mime = build_mime_message(&email(None), "b1");

        assert!(mime.starts_with("From: orders@shop.test\r\nTo: owner@shop.test\r\n"));
        assert!(mime.contains("Subject: Order Confirmation: RS-10001\r\n"));
        assert!(mime.contains("Hello\r\nWorld"));
        assert!(mime.ends_with("--b1--\r\n"));
    }

    #[test]
    fn attachment_is_base64_in_short_lines() {
        let attachment = Attachment {
            filename: "Invoice_RS-10001.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![7u8; 300],
        };
        let mime = build_mime_message(&email(Some(attachment)), "b2");

        assert!(mime.contains("filename=\"Invoice_RS-10001.pdf\""));
        assert!(mime.contains("Content-Transfer-Encoding: base64"));

        let encoded_part = mime
            .split("\r\n\r\n")
            .last()
            .unwrap();
        assert!(encoded_part.lines().all(|line| line.len() <= 76));

        let joined: String = encoded_part
            .lines()
            .filter(|line| !line.starts_with("--"))
            .collect();
        assert_eq!(STANDARD.decode(joined).unwrap(), vec![7u8; 300]);
    }

    #[tokio::test]
    async fn console_mailer_always_succeeds() {
        assert!(ConsoleMailer.send(&email(None)).await.is_ok());
    }
}
