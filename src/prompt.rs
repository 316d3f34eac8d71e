use std::io::{self, Write};

pub struct Prompt {
    prefix: String,
}

impl Prompt {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Print the prompt without a newline and flush so it shows up before input.
    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", self.prefix)?;
        out.flush()
    }
}
