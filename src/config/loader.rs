//! Configuration loader
//!
//! Reads a JSON configuration file, resolves every [`PathField`] present in
//! it against the tests directory, then serves read-only lookups. A lookup
//! of an unknown key is reported through the attached [`LogSink`] before the
//! error is returned.
//!
//! [`LogSink`]: crate::logging::LogSink

use crate::config::types::{PathField, json_type_name};
use crate::error::{ConfigError, ConfigResult};
use crate::logging::{LogRecord, SharedLogSink};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Logger name used for every record the loader emits
pub const LOG_TARGET: &str = "clientsim_config::config";

/// Source name reported for documents parsed from memory
const IN_MEMORY_SOURCE: &str = "<string>";

/// Immutable view over a loaded configuration document
pub struct ConfigLoader {
    source: PathBuf,
    tests_directory: PathBuf,
    conf: Map<String, Value>,
    sink: SharedLogSink,
}

impl ConfigLoader {
    /// Load `config_path` and resolve its path fields against `tests_directory`.
    pub fn load(
        config_path: impl AsRef<Path>,
        tests_directory: impl AsRef<Path>,
        sink: SharedLogSink,
    ) -> ConfigResult<Self> {
        let path = config_path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::build(path, &content, tests_directory.as_ref(), sink)
    }

    /// Same as [`ConfigLoader::load`], from an in-memory JSON document
    pub fn from_json_str(
        json: &str,
        tests_directory: impl AsRef<Path>,
        sink: SharedLogSink,
    ) -> ConfigResult<Self> {
        Self::build(
            Path::new(IN_MEMORY_SOURCE),
            json,
            tests_directory.as_ref(),
            sink,
        )
    }

    fn build(
        source: &Path,
        content: &str,
        tests_directory: &Path,
        sink: SharedLogSink,
    ) -> ConfigResult<Self> {
        let document: Value =
            serde_json::from_str(content).map_err(|source_err| ConfigError::Parse {
                path: source.to_path_buf(),
                source: source_err,
            })?;

        let mut conf = match document {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::NotAnObject {
                    path: source.to_path_buf(),
                    found: json_type_name(&other),
                });
            }
        };

        let resolved = resolve_path_fields(&mut conf, tests_directory)?;

        let loader = Self {
            source: source.to_path_buf(),
            tests_directory: tests_directory.to_path_buf(),
            conf,
            sink,
        };

        loader.log(
            Level::DEBUG,
            format!(
                "Loaded configuration {} ({} entries, {} path fields resolved against {})",
                loader.source.display(),
                loader.conf.len(),
                resolved,
                loader.tests_directory.display()
            ),
        );

        Ok(loader)
    }

    /// Look up `key`.
    ///
    /// An unknown key emits one error record naming it, then fails with
    /// [`ConfigError::KeyNotFound`].
    pub fn get(&self, key: &str) -> ConfigResult<&Value> {
        match self.conf.get(key) {
            Some(value) => Ok(value),
            None => {
                let err = ConfigError::KeyNotFound {
                    key: key.to_string(),
                };
                self.log(Level::ERROR, err.to_string());
                Err(err)
            }
        }
    }

    /// Look up `key` and require a JSON string
    pub fn get_str(&self, key: &str) -> ConfigResult<&str> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: "string",
            found: json_type_name(value),
        })
    }

    /// Resolved path of a path field
    pub fn get_path(&self, field: PathField) -> ConfigResult<PathBuf> {
        self.get_str(field.key()).map(PathBuf::from)
    }

    /// Presence check. Never logs.
    pub fn contains_key(&self, key: &str) -> bool {
        self.conf.contains_key(key)
    }

    /// Keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.conf.keys().map(String::as_str)
    }

    /// Every path field present in the document, with its resolved value
    pub fn resolved_paths(&self) -> impl Iterator<Item = (PathField, &str)> {
        PathField::ALL.into_iter().filter_map(|field| {
            self.conf
                .get(field.key())
                .and_then(Value::as_str)
                .map(|path| (field, path))
        })
    }

    pub fn len(&self) -> usize {
        self.conf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conf.is_empty()
    }

    /// Directory the path fields were resolved against
    pub fn tests_directory(&self) -> &Path {
        &self.tests_directory
    }

    /// File the document was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The whole resolved document
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.conf
    }

    fn log(&self, level: Level, message: String) {
        self.sink.emit(&LogRecord::new(level, LOG_TARGET, message));
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("source", &self.source)
            .field("tests_directory", &self.tests_directory)
            .field("conf", &self.conf)
            .finish_non_exhaustive()
    }
}

/// Join every path field present in `conf` onto `tests_directory`.
///
/// Returns how many fields were rewritten. Absent fields are skipped.
fn resolve_path_fields(
    conf: &mut Map<String, Value>,
    tests_directory: &Path,
) -> ConfigResult<usize> {
    let mut resolved = 0;

    for field in PathField::ALL {
        let Some(value) = conf.get_mut(field.key()) else {
            continue;
        };

        let Some(relative) = value.as_str() else {
            return Err(ConfigError::InvalidPathField {
                field: field.key().to_string(),
                found: json_type_name(value),
            });
        };

        let joined = tests_directory
            .join(relative)
            .into_os_string()
            .into_string()
            .map_err(|raw| ConfigError::NonUtf8Path {
                field: field.key().to_string(),
                path: PathBuf::from(raw),
            })?;
        *value = Value::String(joined);
        resolved += 1;
    }

    Ok(resolved)
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
