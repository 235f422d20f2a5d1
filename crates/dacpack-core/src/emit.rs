//! C header emission
//!
//! Renders an [`OutputTable`] as a `const uint16_t` array with inclusion
//! guards and size macros, then writes it in one step: the text goes to a
//! temporary file next to the target which is renamed over it only once
//! fully flushed. A failed run leaves no partial header behind.

use crate::error::{DacPackError, Result};
use crate::types::{AudioStreamDescriptor, OutputTable};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use tracing::debug;

/// Inclusion guard of the generated header
pub const HEADER_GUARD: &str = "PREFORMATTED_AUDIO_DATA_H";

/// Array values written per line
pub const VALUES_PER_LINE: usize = 12;

/// Everything the header needs besides the samples
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    /// Base name of the input file, quoted in the leading comment
    pub source_name: &'a str,
    /// Emitted as `AUDIO_SAMPLE_RATE`
    pub sample_rate: u32,
    /// Name of the array
    pub variable_name: &'a str,
}

impl<'a> HeaderContext<'a> {
    /// Context for a table decoded from `descriptor`
    pub fn new(source_name: &'a str, descriptor: &AudioStreamDescriptor, variable_name: &'a str) -> Self {
        Self {
            source_name,
            sample_rate: descriptor.sample_rate,
            variable_name,
        }
    }
}

/// Render the complete header text
pub fn render_header(table: &OutputTable, ctx: &HeaderContext<'_>) -> String {
    let count = table.len();
    // "0xXXXX, " per value plus line breaks and the fixed preamble
    let mut out = String::with_capacity(count * 8 + count / VALUES_PER_LINE * 5 + 512);

    // Writing into a String cannot fail
    let _ = writeln!(out, "// Generated from {}", ctx.source_name);
    out.push_str(
        "// Contains audio data pre-formatted for DAC output (12-bit data + control bits).\n\n",
    );
    let _ = writeln!(out, "#ifndef {HEADER_GUARD}");
    let _ = writeln!(out, "#define {HEADER_GUARD}\n");
    out.push_str("#include <stdint.h>\n\n");
    let _ = writeln!(out, "#define AUDIO_SAMPLE_RATE {}", ctx.sample_rate);
    let _ = writeln!(out, "#define NUM_AUDIO_SAMPLES {count}\n");

    let _ = write!(
        out,
        "const uint16_t {}[NUM_AUDIO_SAMPLES] = {{\n    ",
        ctx.variable_name
    );
    for (i, sample) in table.iter().enumerate() {
        let _ = write!(out, "0x{sample:04X}");
        let last = i + 1 == count;
        if !last {
            out.push_str(", ");
            if (i + 1) % VALUES_PER_LINE == 0 {
                out.push_str("\n    ");
            }
        }
    }
    out.push_str("\n};\n\n");
    let _ = writeln!(out, "#endif // {HEADER_GUARD}");

    out
}

/// Mode requested for a header that does not exist yet, before the umask
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Atomically replace `path` with `contents`
///
/// An existing header keeps its permissions. A new one gets the same mode a
/// plain `File::create` would give it.
///
/// # Errors
///
/// Returns `Io` if the directory is not writable or the rename fails. The
/// temporary file is removed on every failure path.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = staging_file(dir).map_err(|e| DacPackError::io(path, e))?;
    debug!("Staging header in {}", tmp.path().display());

    match fs::metadata(path) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| DacPackError::io(path, e))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(DacPackError::io(path, e)),
    }

    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| DacPackError::io(path, e))?;

    tmp.persist(path).map_err(|e| DacPackError::io(path, e.error))?;
    Ok(())
}

fn staging_file(dir: &Path) -> io::Result<tempfile::NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".dacpack");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    builder.tempfile_in(dir)
}

/// Render and write the header for `table`
pub fn emit_header(table: &OutputTable, ctx: &HeaderContext<'_>, path: &Path) -> Result<()> {
    let text = render_header(table, ctx);
    write_atomic(path, &text)
}
