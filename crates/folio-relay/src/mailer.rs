use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use base64::Engine as _;
use chrono::DateTime;
use chrono::Utc;

use crate::contracts::ContactSubmission;
use crate::error::RelayError;

pub const SENDER_DISPLAY_NAME: &str = "Portfolio Contact";

/// Raw bytes per RFC 2047 encoded-word; 45 bytes of base64 plus the
/// `=?utf-8?B?...?=` wrapper stays under the 75 character word limit.
const ENCODED_WORD_BYTES: usize = 45;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
    pub date: DateTime<Utc>,
}

impl MailMessage {
    /// Renders the message as an RFC 5322 document. Header values have CR
    /// and LF removed; a non-ASCII subject is written as RFC 2047
    /// encoded-words so every header line stays 7-bit.
    pub fn to_rfc5322(&self) -> String {
        let headers = [
            ("Date", self.date.to_rfc2822()),
            (
                "From",
                format!("\"{SENDER_DISPLAY_NAME}\" <{}>", header_value(&self.from)),
            ),
            ("To", header_value(&self.to)),
            ("Reply-To", header_value(&self.reply_to)),
            ("Subject", encode_unstructured(&header_value(&self.subject))),
            ("MIME-Version", "1.0".to_string()),
            ("Content-Type", "text/html; charset=utf-8".to_string()),
            ("Content-Transfer-Encoding", "8bit".to_string()),
        ];
        let mut out = String::new();
        for (name, value) in headers {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&value);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        out.push_str(&self.html_body);
        out
    }
}

fn header_value(value: &str) -> String {
    value.chars().filter(|ch| *ch != '\r' && *ch != '\n').collect()
}

/// Encodes an unstructured header value as folded `=?utf-8?B?...?=` words
/// when it is not plain ASCII. Words never split a character.
fn encode_unstructured(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }
    let mut words = Vec::new();
    let mut chunk = String::new();
    for ch in value.chars() {
        if chunk.len() + ch.len_utf8() > ENCODED_WORD_BYTES {
            words.push(encoded_word(&chunk));
            chunk.clear();
        }
        chunk.push(ch);
    }
    if !chunk.is_empty() {
        words.push(encoded_word(&chunk));
    }
    words.join("\r\n ")
}

fn encoded_word(text: &str) -> String {
    format!(
        "=?utf-8?B?{}?=",
        base64::engine::general_purpose::STANDARD.encode(text)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub id: String,
}

pub trait MailTransport {
    fn deliver(&self, message: &MailMessage) -> Result<DeliveryReceipt, RelayError>;
}

/// Drops one `.eml` file per message into a directory a local MTA picks up.
#[derive(Debug)]
pub struct SpoolMailTransport {
    dir: PathBuf,
    seq: AtomicU64,
}

impl SpoolMailTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MailTransport for SpoolMailTransport {
    fn deliver(&self, message: &MailMessage) -> Result<DeliveryReceipt, RelayError> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let id = format!("{}-{seq:04}", message.date.format("%Y%m%dT%H%M%S%.3fZ"));
        let path = self.dir.join(format!("{id}.eml"));
        let spool_err = |source| RelayError::Spool {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(spool_err)?;
        std::fs::write(&path, message.to_rfc5322()).map_err(spool_err)?;
        tracing::info!(path = %path.display(), "contact mail spooled");
        Ok(DeliveryReceipt { id })
    }
}

/// Keeps delivered messages in memory. Clones share one mailbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailTransport {
    mailbox: Arc<Mutex<Vec<MailMessage>>>,
    reject_with: Option<String>,
}

impl MemoryMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that refuses every message.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            mailbox: Arc::default(),
            reject_with: Some(reason.into()),
        }
    }

    pub fn messages(&self) -> Vec<MailMessage> {
        match self.mailbox.lock() {
            Ok(mailbox) => mailbox.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl MailTransport for MemoryMailTransport {
    fn deliver(&self, message: &MailMessage) -> Result<DeliveryReceipt, RelayError> {
        if let Some(reason) = &self.reject_with {
            return Err(RelayError::Rejected(reason.clone()));
        }
        let mut mailbox = self
            .mailbox
            .lock()
            .map_err(|_| RelayError::Rejected("mailbox lock poisoned".to_string()))?;
        mailbox.push(message.clone());
        Ok(DeliveryReceipt {
            id: format!("memory-{}", mailbox.len()),
        })
    }
}

impl<T: MailTransport + ?Sized> MailTransport for Box<T> {
    fn deliver(&self, message: &MailMessage) -> Result<DeliveryReceipt, RelayError> {
        (**self).deliver(message)
    }
}

pub fn compose_contact_email(
    submission: &ContactSubmission,
    sender: &str,
    recipient: &str,
    received_at: DateTime<Utc>,
) -> MailMessage {
    let name = submission.name.trim();
    let email = submission.email.trim();
    let date = received_at.format("%A, %B %-d, %Y");
    let time = received_at.format("%I:%M %p UTC");
    let subject_line = submission
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|subject| !subject.is_empty())
        .map(|subject| {
            format!(
                "<p style=\"margin: 0 0 12px; color: #6b7280;\">Subject: {}</p>\n",
                escape_html(subject)
            )
        })
        .unwrap_or_default();

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>New Contact Message</title></head>
<body style="margin: 0; background-color: #f3f4f6; font-family: Helvetica, Arial, sans-serif;">
<div style="max-width: 600px; margin: 40px auto; background-color: #ffffff;">
<h1 style="background-color: #f59e0b; color: #ffffff; padding: 30px 40px;">New Portfolio Inquiry</h1>
<div style="padding: 40px;">
<p><strong>From</strong><br>{name}</p>
<p><strong>Email Address</strong><br><a href="mailto:{email}">{email}</a></p>
<p><strong>Date Received</strong><br>{date} at {time}</p>
{subject_line}<div style="border-left: 4px solid #f59e0b; padding: 20px;">
<p style="margin: 0 0 10px;">MESSAGE:</p>
<p style="margin: 0; white-space: pre-wrap;">{message}</p>
</div>
<p><a href="mailto:{email}?subject=Re: Portfolio Inquiry">Reply to {name}</a></p>
</div>
<p style="text-align: center; color: #9ca3af;">This email was sent from your portfolio contact form.</p>
</div>
</body>
</html>
"#,
        name = escape_html(name),
        email = escape_html(email),
        message = escape_html(&submission.message),
    );

    MailMessage {
        from: sender.to_string(),
        to: recipient.to_string(),
        reply_to: email.to_string(),
        subject: format!("New Inquiry from {name}"),
        html_body,
        date: received_at,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
