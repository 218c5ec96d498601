use std::io::{self, BufRead, Write};

use anyhow::Result;
use calc_rs::{new_interpreter, Engine, Value, VariableStore};
use tracing::debug;

const PROMPT: &str = "> ";
const CONTINUATION_PROMPT: &str = "";

#[derive(Debug, PartialEq)]
pub enum Line {
    Statement(String),
    Quit,
    Pending,
}

/// Collects input lines until one of them terminates a statement.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    source: String,
}

impl StatementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> Line {
        if !self.source.is_empty() {
            self.source.push('\n');
        }
        self.source.push_str(line);

        if terminates_statement(line) {
            Line::Statement(std::mem::take(&mut self.source))
        } else if strip_comment(line).trim().eq_ignore_ascii_case("quit") {
            self.source.clear();
            Line::Quit
        } else {
            Line::Pending
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// A `;` ends the statement unless it sits inside a line comment.
fn terminates_statement(line: &str) -> bool {
    match (line.find(';'), line.find("//")) {
        (Some(semi), Some(comment)) => semi < comment,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(comment) => &line[..comment],
        None => line,
    }
}

pub fn start() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut engine = new_interpreter();
    run_session(engine.as_mut(), stdin.lock(), stdout.lock(), true)
}

pub fn run_session(
    engine: &mut dyn Engine,
    input: impl BufRead,
    mut output: impl Write,
    interactive: bool,
) -> Result<()> {
    let mut buffer = StatementBuffer::new();

    if interactive {
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line?;

        match buffer.push_line(&line) {
            Line::Statement(source) => {
                if !run_statement(engine, &source, &mut output)? {
                    debug!("quit command received");
                    return Ok(());
                }
            }
            Line::Quit => return Ok(()),
            Line::Pending => {}
        }

        if interactive {
            let prompt = if buffer.is_empty() {
                PROMPT
            } else {
                CONTINUATION_PROMPT
            };
            write!(output, "{}", prompt)?;
            output.flush()?;
        }
    }

    Ok(())
}

/// Returns `false` once the statement asked the session to end.
fn run_statement(engine: &mut dyn Engine, source: &str, output: &mut impl Write) -> Result<bool> {
    match engine.run(source) {
        Ok(Value::Quit) => Ok(false),
        Ok(value) => {
            writeln!(output, "{}", value)?;
            Ok(true)
        }
        Err(err) => {
            writeln!(output, "error: {}", err)?;
            Ok(true)
        }
    }
}

/// Prints every variable of the session as `name = value`, sorted by name.
pub fn dump_store(store: &VariableStore, mut output: impl Write) -> Result<()> {
    let mut variables: Vec<(&str, &Value)> = store.iter().collect();
    variables.sort_by(|(left, _), (right, _)| left.cmp(right));
    for (name, value) in variables {
        writeln!(output, "{} = {}", name, value)?;
    }
    Ok(())
}
