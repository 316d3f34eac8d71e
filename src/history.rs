use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// On-disk shape of the history file: `{"entry": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryRecord {
    entry: Vec<String>,
}

/// Lines entered this session plus whatever was loaded at startup.
///
/// With no file path the history lives in memory only.
pub struct History {
    commands: Vec<String>,
    file_path: Option<PathBuf>,
}

impl History {
    pub fn in_memory() -> Self {
        Self {
            commands: Vec::new(),
            file_path: None,
        }
    }

    /// Load from `path`. A missing or empty file is an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ShellError> {
        let file_path = path.into();
        let commands = Self::load_from_file(&file_path)?;
        Ok(Self {
            commands,
            file_path: Some(file_path),
        })
    }

    fn load_from_file(path: &Path) -> Result<Vec<String>, ShellError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ShellError::HistoryIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let record: HistoryRecord =
            serde_json::from_str(&contents).map_err(|source| ShellError::HistoryFormat {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(record.entry)
    }

    pub fn add(&mut self, command: &str) {
        let command = command.trim();
        if command.is_empty() {
            return;
        }
        self.commands.push(command.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.commands
    }

    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Rewrite the history file with every entry. No-op for in-memory history.
    ///
    /// The record goes to a sibling `.tmp` file first and is renamed over the
    /// old one, so a failed write never leaves a truncated history behind.
    pub fn save(&self) -> Result<(), ShellError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let tmp_path = Self::tmp_path(path);

        let result = self.write_record(&tmp_path).and_then(|()| fs::rename(&tmp_path, path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result.map_err(|source| ShellError::HistoryIo {
            path: path.clone(),
            source,
        })
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_record(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let record = HistoryRecord {
            entry: self.commands.clone(),
        };
        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    pub fn list(&self, out: &mut impl Write) -> io::Result<()> {
        for cmd in &self.commands {
            writeln!(out, "{}", cmd)?;
        }
        Ok(())
    }
}
