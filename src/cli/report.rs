//! Terminal error reporter.
//!
//! The only place that ends the process with a failure status.

use std::{
    fmt,
    io::{self, IsTerminal, Write},
    process,
};

use super::formatting::format_error;

/// Exit status used for every failed invocation.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Writes the error's text as a single line.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn write_error(w: &mut dyn Write, error: &dyn fmt::Display, styled: bool) -> io::Result<()> {
    let message = error.to_string();

    if styled {
        writeln!(w, "{}", format_error(&message))
    } else {
        writeln!(w, "{message}")
    }
}

/// Prints the error to standard error and exits with [`FAILURE_EXIT_CODE`].
///
/// Styling is applied only when standard error is a terminal.
pub fn quit_to_stderr(error: &dyn fmt::Display) -> ! {
    let stderr = io::stderr();
    let styled = stderr.is_terminal();
    let mut handle = stderr.lock();

    // Nothing left to report to if stderr itself is gone.
    let _ = write_error(&mut handle, error, styled);
    let _ = handle.flush();

    process::exit(FAILURE_EXIT_CODE)
}
