use std::io::{BufRead, Write};

use crate::error::{MosaicError, Result};

/// Parse a 1-based menu answer into an index into `len` candidates.
pub(crate) fn parse_choice(input: &str, len: usize) -> Result<usize> {
    let choice = input
        .trim()
        .parse::<usize>()
        .map_err(|_| MosaicError::Selection("Invalid input".to_string()))?;
    if choice == 0 || choice > len {
        return Err(MosaicError::Selection("Invalid choice".to_string()));
    }
    Ok(choice - 1)
}

/// Print a numbered menu of `candidates` and read answers from `input` until
/// one is valid. Invalid answers reprompt.
pub(crate) fn choose<R, W>(title: &str, candidates: &[String], input: &mut R, out: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    if candidates.is_empty() {
        return Err(MosaicError::input(format!("nothing to choose from: {title}")));
    }
    let io_err = |e: std::io::Error| MosaicError::input(format!("terminal error: {e}"));
    writeln!(out, "{title}").map_err(io_err)?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(out, "{}: {}", i + 1, candidate).map_err(io_err)?;
    }
    loop {
        write!(out, "Enter choice: ").map_err(io_err)?;
        out.flush().map_err(io_err)?;
        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(MosaicError::input(format!("no choice made: {title}")));
        }
        match parse_choice(&line, candidates.len()) {
            Ok(index) => return Ok(index),
            Err(err @ MosaicError::Selection(_)) => writeln!(out, "{err}").map_err(io_err)?,
            Err(err) => return Err(err),
        }
    }
}

/// Pick a candidate by exact name, or ask interactively on stdin when no
/// name is given.
pub(crate) fn select(title: &str, candidates: &[String], preset: Option<&str>) -> Result<usize> {
    match preset {
        Some(name) => candidates
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MosaicError::input(format!("{name} is not one of the candidates"))),
        None => choose(
            title,
            candidates,
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
        ),
    }
}
