//! Email collaborator.
//!
//! The framework never talks SMTP directly; [`Mailer`] appends fully
//! assembled messages to a spool file that an external delivery agent picks
//! up. Outside production mode messages are logged and dropped so local runs
//! never email anyone.

use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{info, warn};

/// A message assembled by [`Mailer::prepare`] and handed to [`Mailer::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: Option<String>,
    pub reply_to: Option<String>,
    pub body: String,
}

/// Spool-file mail sender.
#[derive(Debug, Clone)]
pub struct Mailer {
    spool_path: PathBuf,
    production: bool,
}

impl Mailer {
    pub fn new(spool_path: impl Into<PathBuf>, production: bool) -> Self {
        Self {
            spool_path: spool_path.into(),
            production,
        }
    }

    /// Assemble a message ready for sending.
    pub fn prepare(
        &self,
        body: &str,
        subject: Option<&str>,
        reply_to: Option<&str>,
        to: &str,
    ) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: subject.map(str::to_string),
            reply_to: reply_to.map(str::to_string),
            body: body.to_string(),
        }
    }

    /// Syntactic address validation. Deliberately loose: one `@`, non-empty
    /// local part, dotted domain.
    pub fn validate_address(&self, address: &str) -> bool {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("failed to compile address regex")
        });
        re.is_match(address)
    }

    /// Deliver a message to the spool. Returns whether delivery succeeded;
    /// the caller decides whether a failure is worth logging.
    pub fn send(&self, message: &EmailMessage) -> bool {
        if !self.production {
            info!(to = %message.to, subject = ?message.subject, "email suppressed outside production");
            return true;
        }

        let entry = format!(
            "To: {}\nSubject: {}\nReply-To: {}\n\n{}\n---\n",
            message.to,
            message.subject.as_deref().unwrap_or(""),
            message.reply_to.as_deref().unwrap_or(""),
            message.body
        );

        let result = self
            .spool_path
            .parent()
            .map(std::fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.spool_path)
            })
            .and_then(|mut f| f.write_all(entry.as_bytes()));

        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(to = %message.to, error = %err, "email delivery failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_validation() {
        let mailer = Mailer::new("/tmp/spool", false);
        assert!(mailer.validate_address("user@example.com"));
        assert!(!mailer.validate_address("not-an-address"));
        assert!(!mailer.validate_address("two@@example.com"));
        assert!(!mailer.validate_address("user@nodot"));
    }

    #[test]
    fn non_production_send_is_a_successful_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let spool = dir.path().join("outbox");
        let mailer = Mailer::new(&spool, false);
        let msg = mailer.prepare("hello", Some("subj"), None, "user@example.com");
        assert!(mailer.send(&msg));
        assert!(!spool.exists());
    }

    #[test]
    fn production_send_appends_to_spool() {
        let dir = tempfile::tempdir().unwrap();
        let spool = dir.path().join("outbox");
        let mailer = Mailer::new(&spool, true);
        let msg = mailer.prepare("hello", Some("subj"), Some("reply@example.com"), "user@example.com");
        assert!(mailer.send(&msg));

        let contents = std::fs::read_to_string(&spool).unwrap();
        assert!(contents.contains("To: user@example.com"));
        assert!(contents.contains("hello"));
    }
}
