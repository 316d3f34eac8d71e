use std::env;
use std::path::PathBuf;

pub const PROMPT: &str = "ccsh>";
pub const HISTORY_FILE: &str = "history.txt";

/// Settings fixed at startup and owned by the shell session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute, so a later `cd` does not move where history is saved.
    pub history_path: PathBuf,
    pub prompt: String,
    pub debug: bool,
    pub persist_history: bool,
}

impl Config {
    /// Defaults plus `CCSH_HISTORY` and `CCSH_DEBUG` from the environment.
    pub fn from_env() -> Self {
        let history_path = env::var_os("CCSH_HISTORY")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(HISTORY_FILE));

        Self {
            history_path: absolute(history_path),
            prompt: PROMPT.to_string(),
            debug: env::var("CCSH_DEBUG").is_ok_and(|v| is_truthy(&v)),
            persist_history: true,
        }
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tests::cwd_lock;

    #[test]
    fn test_truthy_values() {
        for v in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(is_truthy(v), "{v}");
        }
        for v in ["", "0", "false", "off", "debug"] {
            assert!(!is_truthy(v), "{v}");
        }
    }

    #[test]
    fn test_relative_history_path_is_anchored_at_startup_dir() {
        let _guard = cwd_lock();
        let cwd = env::current_dir().unwrap();
        assert_eq!(absolute(PathBuf::from(HISTORY_FILE)), cwd.join(HISTORY_FILE));
        assert_eq!(absolute(PathBuf::from("/tmp/h.json")), PathBuf::from("/tmp/h.json"));
    }
}
