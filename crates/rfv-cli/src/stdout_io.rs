use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_to(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_to(&mut io::stdout().lock(), text, true)
}

/// A closed reader (`rfv segment x.csv | head`) is not a failure.
fn write_to(writer: &mut dyn Write, text: &str, newline: bool) -> io::Result<()> {
    let written = writer.write_all(text.as_bytes()).and_then(|()| {
        if newline {
            writer.write_all(b"\n")?;
        }
        writer.flush()
    });
    match written {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
