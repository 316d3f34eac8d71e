use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can go wrong between reading a line and finishing it.
///
/// Only the history variants can be fatal, and only at startup. The rest are
/// reported by the read loop, which then prompts again.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to create pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("{program}: failed to start: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program}: {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("{program}: failed to wait: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cd: {path}: {source}")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("history file {}: {source}", path.display())]
    HistoryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("history file {} is not valid JSON: {source}", path.display())]
    HistoryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
