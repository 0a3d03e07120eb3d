//! Top-level error handling.
//!
//! Storage, configuration, and other unrecovered errors propagate out of the
//! dispatch pipeline as [`FrameworkError`] values. The [`ErrorHandler`] is
//! the single place they land: it writes one structured line to the
//! exception or error log, sends a notification email in production, and
//! produces the static friendly page shown to the user. It never retries;
//! every propagated failure is terminal for the request.

use crate::config::AppConfig;
use crate::email::Mailer;
use crate::error::FrameworkError;
use crate::logger::{build_log_message, LogFile, Logger};
use std::sync::Arc;
use tracing::error;

pub struct ErrorHandler {
    logger: Logger,
    mailer: Mailer,
    config: Arc<AppConfig>,
}

impl ErrorHandler {
    pub fn new(logger: Logger, mailer: Mailer, config: Arc<AppConfig>) -> Self {
        Self {
            logger,
            mailer,
            config,
        }
    }

    /// Log the error, notify in production, and return the friendly page.
    pub fn handle(&self, err: &FrameworkError) -> String {
        let code = err.code().to_string();
        let message = err.to_string();
        let log_msg = build_log_message([("message", message.as_str()), ("code", code.as_str())]);

        let file = if err.is_recoverable() {
            LogFile::Error
        } else {
            LogFile::Exception
        };
        self.logger.write(&log_msg, "exception", file);
        error!(code = %code, message = %message, "unhandled framework error");

        if self.config.production {
            let subject = format!("{} Fatal Error", self.config.domain_name);
            let body = format!("Encountered fatal error: {log_msg}");
            let email = self.mailer.prepare(
                &body,
                Some(&subject),
                Some(&self.config.email_address),
                &self.config.email_address,
            );
            // Notification failure is already logged by the mailer; nothing
            // more to do for this request.
            let _ = self.mailer.send(&email);
        }

        self.friendly_page()
    }

    /// Static page pointing at the configured error location. Deliberately
    /// free of any detail from the failure.
    fn friendly_page(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>Something went wrong</title>\n\
             </head>\n<body>\n<h1>Something went wrong</h1>\n\
             <p>The page could not be served. Please try again later.</p>\n\
             <p><a href=\"{}\">More information</a></p>\n</body>\n</html>\n",
            self.config.error_page_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(dir: &std::path::Path, production: bool) -> ErrorHandler {
        let config = Arc::new(AppConfig {
            log_dir: dir.to_path_buf(),
            production,
            ..AppConfig::default()
        });
        ErrorHandler::new(
            Logger::new(true, dir),
            Mailer::new(dir.join("outbox"), production),
            config,
        )
    }

    #[test]
    fn handle_logs_message_and_code() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path(), false);

        let err = FrameworkError::BooleanConversion {
            value: "maybe".into(),
        };
        let page = handler.handle(&err);

        assert!(page.contains("Something went wrong"));
        let log =
            std::fs::read_to_string(dir.path().join(LogFile::Exception.file_name())).unwrap();
        assert!(log.contains("code => 1003"));
        assert!(log.contains("message => "));
    }

    #[test]
    fn production_failure_sends_notification() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path(), true);

        let err = FrameworkError::StorageFileMissing {
            path: "/data/navigation.json".into(),
        };
        handler.handle(&err);

        let outbox = std::fs::read_to_string(dir.path().join("outbox")).unwrap();
        assert!(outbox.contains("Fatal Error"));
        assert!(outbox.contains("navigation.json"));
    }

    #[test]
    fn friendly_page_carries_no_error_detail() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(dir.path(), false);
        let err = FrameworkError::UnknownDispatch("secret detail".into());
        let page = handler.handle(&err);
        assert!(!page.contains("secret detail"));
    }
}
