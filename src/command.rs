use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::ShellError;
use crate::parser::Pipeline;

/// What the shell does with one parsed line.
///
/// Built-ins are picked by the first stage's name; any stages after a
/// built-in are ignored. Everything else runs as an external pipeline.
#[derive(Debug, PartialEq)]
pub enum Action {
    Cd(Option<String>),
    Pwd,
    Exit,
    History,
    External(Pipeline),
}

impl Action {
    /// `None` for an empty pipeline.
    pub fn from_pipeline(pipeline: Pipeline) -> Option<Self> {
        let first = pipeline.first()?;

        let action = match first.name() {
            "cd" => Action::Cd(first.arguments().first().cloned()),
            "pwd" => Action::Pwd,
            "exit" => Action::Exit,
            "history" => Action::History,
            _ => Action::External(pipeline),
        };
        Some(action)
    }
}

/// `cd` target resolution: no argument means `home`, an empty one means `.`.
/// An unset home also falls back to `.`.
pub fn cd_target(arg: Option<&str>, home: Option<String>) -> String {
    match arg {
        Some("") => ".".to_string(),
        Some(path) => path.to_string(),
        None => home.filter(|h| !h.is_empty()).unwrap_or_else(|| ".".to_string()),
    }
}

/// Change the process working directory. Spawned stages inherit it.
pub fn change_dir(arg: Option<&str>) -> Result<PathBuf, ShellError> {
    let target = cd_target(arg, env::var("HOME").ok());

    env::set_current_dir(&target).map_err(|source| ShellError::ChangeDir {
        path: target.clone(),
        source,
    })?;

    env::current_dir().map_err(|source| ShellError::ChangeDir {
        path: target,
        source,
    })
}

pub fn print_working_dir(out: &mut impl Write) -> io::Result<()> {
    let path = env::current_dir()?;
    writeln!(out, "{}", path.display())
}
