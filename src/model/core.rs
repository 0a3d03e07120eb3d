use crate::email::{EmailMessage, Mailer};
use crate::error::FrameworkError;
use crate::keygen::{KeyClass, KeyGenerator};
use crate::logger::{build_log_message, LogFile, Logger};
use crate::storage::{string_as_bool, Storage};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Placeholder database handle.
///
/// The framework stores data in flat files; this exists so deployments that
/// do attach a database get a per-request handle wired through the factory.
/// It intentionally exposes nothing beyond its connection string.
#[derive(Debug, Clone)]
pub struct Database {
    dsn: String,
}

impl Database {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self { dsn: dsn.into() }
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }
}

/// Base model: one storage adapter plus shared collaborators.
pub struct Model {
    storage: Box<dyn Storage>,
    logger: Logger,
    db: Option<Database>,
    key_gen: KeyGenerator,
    mailer: Option<Mailer>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("logger", &self.logger)
            .field("db", &self.db)
            .field("key_gen", &self.key_gen)
            .field("mailer", &self.mailer)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Build a model and eagerly load every `storage`-format file from
    /// `data_dir`.
    ///
    /// An unreadable directory propagates as
    /// [`FrameworkError::DirectoryUnreadable`]; a file that exists but fails
    /// to decode propagates its decode error. Nothing is swallowed.
    pub fn new(
        storage: Box<dyn Storage>,
        logger: Logger,
        db: Option<Database>,
        data_dir: &Path,
    ) -> Result<Self, FrameworkError> {
        let mut model = Self {
            storage,
            logger,
            db,
            key_gen: KeyGenerator::new(),
            mailer: None,
        };
        model.load_directory(data_dir)?;
        Ok(model)
    }

    /// Load every file in `dir` whose extension matches the storage adapter,
    /// keyed by file base name.
    pub fn load_directory(&mut self, dir: &Path) -> Result<(), FrameworkError> {
        let extension = self.storage.extension();
        let entries =
            std::fs::read_dir(dir).map_err(|source| FrameworkError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut loaded = 0usize;
        for entry in entries {
            let entry = entry.map_err(|source| FrameworkError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == extension);
            if !matches_ext {
                continue;
            }

            let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };
            self.storage.load_file(&path, &key)?;
            loaded += 1;
        }

        info!(dir = %dir.display(), format = extension, files = loaded, "data directory loaded");
        Ok(())
    }

    /// One record by key.
    pub fn record(&self, key: &str) -> Option<&Value> {
        self.storage.record(key)
    }

    /// Every loaded record.
    pub fn all_records(&self) -> &BTreeMap<String, Value> {
        self.storage.all_records()
    }

    /// Encode a value in the storage format.
    pub fn encode(&self, value: &Value) -> Result<String, FrameworkError> {
        self.storage.encode(value)
    }

    /// Convert a stored `"true"`/`"false"` string to a boolean.
    pub fn bool_from_str(&self, value: &str) -> Result<bool, FrameworkError> {
        string_as_bool(value)
    }

    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    /// Write one tagged line to a named log file.
    pub fn write_log(&self, msg: &str, kind: &str, file: LogFile) -> bool {
        self.logger.write(msg, kind, file)
    }

    /// Assemble a `field => value` log message from ordered pairs.
    pub fn build_log_message<'a, I>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        build_log_message(fields)
    }

    /// Random key of `length` characters drawn from `classes`.
    pub fn generate_key(&self, length: usize, classes: &[KeyClass]) -> String {
        self.key_gen.generate_standard(length, classes)
    }

    /// Strip HTML tags from untrusted text. A defense against injected
    /// markup, not a full sanitizer.
    pub fn sanitize(&self, data: &str) -> String {
        strip_tags(data)
    }

    /// Attach the email collaborator. Passthroughs fail soft until this is
    /// called.
    pub fn enable_email(&mut self, mailer: Mailer) {
        self.mailer = Some(mailer);
    }

    /// Assemble a message via the attached mailer.
    pub fn prepare_email(
        &self,
        body: &str,
        subject: Option<&str>,
        reply_to: Option<&str>,
        to: &str,
    ) -> Option<EmailMessage> {
        self.mailer
            .as_ref()
            .map(|m| m.prepare(body, subject, reply_to, to))
    }

    /// Validate an address via the attached mailer.
    pub fn validate_email(&self, address: &str) -> bool {
        self.mailer
            .as_ref()
            .is_some_and(|m| m.validate_address(address))
    }

    /// Send a prepared message, logging a structured failure line to the
    /// email log when delivery fails.
    pub fn send_email(&self, message: &EmailMessage) -> bool {
        let Some(mailer) = self.mailer.as_ref() else {
            return false;
        };

        let sent = mailer.send(message);
        if !sent {
            let subject = message.subject.as_deref().unwrap_or("");
            let msg = self.build_log_message([
                ("to", message.to.as_str()),
                ("subject", subject),
                ("body", message.body.as_str()),
            ]);
            self.write_log(&msg, "email", LogFile::Email);
        }
        sent
    }
}

/// Remove anything between `<` and `>` inclusive.
pub(crate) fn strip_tags(input: &str) -> String {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| regex::Regex::new(r"<[^>]*>").expect("failed to compile tag regex"));
    re.replace_all(input, "").into_owned()
}
