use std::io::{self, BufRead};
use std::time::Instant;

use crate::command::{change_dir, print_working_dir, Action};
use crate::config::Config;
use crate::error::ShellError;
use crate::history::History;
use crate::parser::parse_pipeline;
use crate::pipes::run_pipeline;
use crate::prompt::Prompt;

/// Whether the read loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive session: the prompt, the history and the settings it
/// was started with. The working directory is the process's own.
pub struct Shell {
    config: Config,
    prompt: Prompt,
    history: History,
}

impl Shell {
    /// Fails only if an existing history file cannot be read.
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let start = Instant::now();
        let history = if config.persist_history {
            History::load(&config.history_path)?
        } else {
            History::in_memory()
        };
        debug_log!(
            "loaded {} history entries from {:?} in {:?}",
            history.entries().len(),
            history.path(),
            start.elapsed()
        );

        Ok(Self {
            prompt: Prompt::new(config.prompt.as_str()),
            config,
            history,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock())
    }

    /// Prompt, read and handle lines until `exit` or end of input.
    pub fn run_with(&mut self, mut input: impl BufRead) -> io::Result<()> {
        let mut line = String::new();

        loop {
            self.prompt.display(&mut io::stdout())?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    println!();
                    debug_log!("end of input");
                    self.exit();
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    report!("Error reading input: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            }

            if self.handle_line(&line) == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Parse one raw line and dispatch it.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let Some(action) = Action::from_pipeline(parse_pipeline(line)) else {
            println!("No commands found.");
            return Flow::Continue;
        };
        debug_log!("dispatch: {:?}", action);

        match action {
            Action::Exit => {
                self.exit();
                return Flow::Exit;
            }
            Action::Cd(arg) => match change_dir(arg.as_deref()) {
                Ok(dir) => debug_log!("cwd is now {}", dir.display()),
                Err(e) => report!("{}", e),
            },
            Action::Pwd => {
                if let Err(e) = print_working_dir(&mut io::stdout()) {
                    report!("pwd: {}", e);
                }
            }
            Action::History => {
                if let Err(e) = self.history.list(&mut io::stdout()) {
                    report!("history: {}", e);
                }
            }
            Action::External(pipeline) => {
                if let Err(e) = run_pipeline(&pipeline) {
                    debug_log!("pipeline `{}` failed: {}", pipeline, e);
                    report!("Unknown command");
                }
            }
        }

        self.history.add(line);
        Flow::Continue
    }

    /// Save history before leaving. A failed save is reported, not fatal.
    fn exit(&mut self) {
        if !self.config.persist_history {
            return;
        }
        match self.history.save() {
            Ok(()) => debug_log!("saved {} history entries", self.history.entries().len()),
            Err(e) => report!("Error saving history: {}", e),
        }
    }
}
