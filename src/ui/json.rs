use std::io::{self, Write};

/// Write one NDJSON event line.
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    writeln!(out, "{}", event)?;
    out.flush()
}

/// Write one NDJSON event line to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}
