//! Console output sink for completion handlers.

use std::io::{self, Write};

use crate::http::HttpResponse;

/// Write one line describing `response` to `out`.
pub fn write_response<W: Write>(out: &mut W, response: &HttpResponse) -> io::Result<()> {
    writeln!(out, "{response}")
}

/// Completion handler that logs the raw response to stdout.
pub fn log_to_console(response: HttpResponse) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = write_response(&mut out, &response) {
        tracing::warn!(error = %err, "failed to write response to stdout");
    }
}
