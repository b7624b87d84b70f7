//! Line-oriented console I/O.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use dbquiz_core::model::Question;
use dbquiz_core::quiz::AnswerSource;

/// Prompts and messages over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` without a newline and read one line.
    ///
    /// Returns `Ok(None)` once input is exhausted. The line terminator is
    /// stripped; other whitespace is left for the caller.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> AnswerSource for Console<R, W> {
    fn answer(
        &mut self,
        question: &Question,
        _position: usize,
        _total: usize,
    ) -> io::Result<Option<String>> {
        self.say(format_args!("\nQuestion: {}", question.text))?;
        for (label, text) in question.labeled_options() {
            self.say(format_args!("{label}. {text}"))?;
        }
        self.prompt("Enter your answer (A/B/C/D): ")
    }
}
