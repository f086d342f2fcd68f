use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::constants::CENSUS_KEY_SIGNUP_URL;
use crate::credentials::save_api_key;

/// Saves `key`, or a key read from `input` when none was given, to
/// `config_path`. Returns the path written.
pub fn run<R: BufRead>(config_path: Option<&Path>, key: Option<&str>, mut input: R) -> Result<PathBuf> {
    let path = config_path
        .map(Path::to_path_buf)
        .context("Cannot locate a config directory; pass --config-path")?;

    let key = match key {
        Some(key) => key.to_string(),
        None => {
            eprintln!("Get a free key at: {CENSUS_KEY_SIGNUP_URL}");
            eprint!("Census API key: ");
            std::io::stderr().flush().ok();
            let mut line = String::new();
            input.read_line(&mut line).context("Failed reading API key from stdin")?;
            line
        }
    };

    save_api_key(&path, &key)?;
    eprintln!("API key saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_key_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acs-cli").join("config");
        let saved = run(Some(path.as_path()), Some("abc123"), std::io::empty()).unwrap();
        assert_eq!(saved, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc123");
    }

    #[test]
    fn prompted_key_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        run(Some(path.as_path()), None, "  typed-key \n".as_bytes()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "typed-key");
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        assert!(run(Some(path.as_path()), None, "\n".as_bytes()).is_err());
        assert!(!path.exists());
    }
}
