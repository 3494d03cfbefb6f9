//! Terminal I/O utilities for CLI.
//!
//! Provides TTY detection and user prompting.

use std::io::{self, BufRead, IsTerminal, Write};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn is_stdout_tty() -> bool {
    io::stdout().is_terminal()
}

pub fn require_tty_for_interactive() -> bool {
    is_stdin_tty() && is_stdout_tty()
}

pub fn prompt(message: &str) -> argo_scaffold::Result<String> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    let read = stdin.lock().read_line(&mut line).map_err(|e| {
        argo_scaffold::Error::new(
            argo_scaffold::ErrorCode::InternalIoError,
            format!("Failed to read input: {}", e),
            serde_json::Value::Null,
        )
    })?;
    if read == 0 {
        return Err(argo_scaffold::Error::internal_io(
            "stdin closed before an answer was given",
            Some("read prompt answer".to_string()),
        ));
    }

    Ok(line.trim().to_string())
}

/// Numbered menu on stderr. Re-asks until a listed number is entered.
pub fn choose<T: Copy>(question: &str, options: &[(T, &str)]) -> argo_scaffold::Result<T> {
    eprintln!("{}", question);
    for (index, (_, label)) in options.iter().enumerate() {
        eprintln!("  {}) {}", index + 1, label);
    }

    loop {
        let answer = prompt(&format!("Select 1-{}: ", options.len()))?;
        if let Some(choice) = parse_choice(&answer, options.len()) {
            return Ok(options[choice].0);
        }
        eprintln!("Please enter a number between 1 and {}", options.len());
    }
}

fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let number: usize = answer.trim().parse().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}
