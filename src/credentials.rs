//! Census API key lookup.
//!
//! Keys come from a fixed precedence chain of [`CredentialSource`]s: the
//! explicit flag, then the environment, then the file written by `login`.
//! Business logic only ever sees the resolved key.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::CENSUS_API_KEY_ENV;
use crate::error::QueryError;

const CONFIG_DIR_NAME: &str = "acs-cli";
const CONFIG_FILE_NAME: &str = "config";

pub trait CredentialSource {
    fn name(&self) -> &'static str;
    /// `None` when this source has no usable (non-blank) key.
    fn lookup(&self) -> Option<String>;
}

/// Key passed on the command line.
#[derive(Debug, Clone)]
pub struct ExplicitKey(pub Option<String>);

impl CredentialSource for ExplicitKey {
    fn name(&self) -> &'static str {
        "--api-key"
    }

    fn lookup(&self) -> Option<String> {
        non_blank(self.0.as_deref())
    }
}

/// Key from an environment variable, `.env` included once dotenvy has run.
#[derive(Debug, Clone)]
pub struct EnvKey {
    pub var: &'static str,
}

impl Default for EnvKey {
    fn default() -> Self {
        Self {
            var: CENSUS_API_KEY_ENV,
        }
    }
}

impl CredentialSource for EnvKey {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn lookup(&self) -> Option<String> {
        non_blank(std::env::var(self.var).ok().as_deref())
    }
}

/// Key persisted by `login`.
#[derive(Debug, Clone)]
pub struct FileKey {
    pub path: PathBuf,
}

impl CredentialSource for FileKey {
    fn name(&self) -> &'static str {
        "config file"
    }

    fn lookup(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => non_blank(Some(&contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("Could not read {}: {}", self.path.display(), err);
                None
            }
        }
    }
}

#[derive(Default)]
pub struct CredentialChain {
    sources: Vec<Box<dyn CredentialSource + Send + Sync>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl CredentialSource + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// The standard chain: flag, `CENSUS_API_KEY`, then the config file when
    /// a location is known.
    pub fn standard(explicit: Option<String>, config_path: Option<PathBuf>) -> Self {
        let chain = Self::new().with(ExplicitKey(explicit)).with(EnvKey::default());
        match config_path {
            Some(path) => chain.with(FileKey { path }),
            None => chain,
        }
    }

    pub fn resolve(&self) -> Result<String, QueryError> {
        for source in &self.sources {
            if let Some(key) = source.lookup() {
                tracing::debug!("Using Census API key from {}", source.name());
                return Ok(key);
            }
        }
        Err(QueryError::MissingCredential)
    }
}

impl std::fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("CredentialChain").field("sources", &names).finish()
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `$XDG_CONFIG_HOME/acs-cli/config`, else `$HOME/.config/acs-cli/config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Writes the trimmed key to `path`, creating parent directories. The file
/// is readable by the owner only on Unix.
pub fn save_api_key(path: &Path, key: &str) -> Result<()> {
    let key = key.trim();
    anyhow::ensure!(!key.is_empty(), "API key is empty");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating config directory {}", parent.display()))?;
    }
    fs::write(path, key).with_context(|| format!("Failed writing {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed restricting permissions on {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    impl CredentialSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn lookup(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn first_source_with_a_key_wins() {
        let chain = CredentialChain::new()
            .with(ExplicitKey(None))
            .with(Fixed(Some("second")))
            .with(Fixed(Some("third")));
        assert_eq!(chain.resolve().unwrap(), "second");
    }

    #[test]
    fn explicit_key_beats_everything() {
        let chain = CredentialChain::new()
            .with(ExplicitKey(Some(" flag-key ".to_string())))
            .with(Fixed(Some("other")));
        assert_eq!(chain.resolve().unwrap(), "flag-key");
    }

    #[test]
    fn exhausted_chain_is_missing_credential() {
        let chain = CredentialChain::new()
            .with(ExplicitKey(Some("   ".to_string())))
            .with(Fixed(None));
        assert!(matches!(chain.resolve(), Err(QueryError::MissingCredential)));
    }

    #[test]
    fn saved_key_is_trimmed_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        save_api_key(&path, "  my-secret-key\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "my-secret-key");

        let source = FileKey { path: path.clone() };
        assert_eq!(source.lookup().as_deref(), Some("my-secret-key"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn missing_or_blank_file_has_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        assert_eq!(FileKey { path: path.clone() }.lookup(), None);
        fs::write(&path, "\n").unwrap();
        assert_eq!(FileKey { path }.lookup(), None);
    }

    #[test]
    fn empty_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_api_key(&dir.path().join("config"), "  ").is_err());
    }
}
