use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};

pub(crate) fn prompt_row_count() -> Result<u64> {
    let mut stdin = io::stdin().lock();
    let mut stderr = io::stderr().lock();
    read_row_count(
        &mut stdin,
        &mut stderr,
        "How many rows to generate? ",
        "Try again!",
    )
}

pub(crate) fn prompt_file_name() -> Result<String> {
    let mut stdin = io::stdin().lock();
    let mut stderr = io::stderr().lock();
    read_file_name(&mut stdin, &mut stderr, "Name of file to generate: ")
}

/// Validate-and-reprompt loop for a whole number. Invalid input gets the
/// reminder and another prompt; a closed input stream is a terminal
/// failure rather than an endless loop.
pub(crate) fn read_row_count(
    input: &mut impl BufRead,
    prompts: &mut impl Write,
    prompt: &str,
    reminder: &str,
) -> Result<u64> {
    loop {
        write!(prompts, "{prompt}")?;
        prompts.flush()?;

        let mut line = String::new();
        let n = input.read_line(&mut line).context("read row count")?;
        if n == 0 {
            return Err(anyhow!("input closed before a row count was entered"));
        }

        match line.trim().parse::<u64>() {
            Ok(rows) => return Ok(rows),
            Err(_) => {
                writeln!(prompts, "not a valid whole number: {}", line.trim())?;
                writeln!(prompts, "{reminder}")?;
            }
        }
    }
}

/// Free text, no validation; only the line break is stripped.
pub(crate) fn read_file_name(
    input: &mut impl BufRead,
    prompts: &mut impl Write,
    prompt: &str,
) -> Result<String> {
    write!(prompts, "{prompt}")?;
    prompts.flush()?;

    let mut line = String::new();
    let n = input.read_line(&mut line).context("read file name")?;
    if n == 0 {
        return Err(anyhow!("input closed before a file name was entered"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
