use std::fmt;

/// One stage of a pipeline: a program name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    arguments: Vec<String>,
}

impl Command {
    pub fn new<I, S>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.arguments {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The stages of one input line, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    commands: Vec<Command>,
}

impl Pipeline {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn first(&self) -> Option<&Command> {
        self.commands.first()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Parse user input into pipeline stages
/// e.g., "ls -l | grep rshell | wc -l" -> three commands
///
/// A blank line, or a blank segment between pipes, yields an empty pipeline.
pub fn parse_pipeline(input: &str) -> Pipeline {
    input
        .split('|')
        .map(parse_stage)
        .collect::<Option<Vec<_>>>()
        .map(Pipeline::new)
        .unwrap_or_default()
}

fn parse_stage(segment: &str) -> Option<Command> {
    let mut tokens = segment.split_whitespace();
    let name = tokens.next()?;
    Some(Command::new(name, tokens))
}
