/// File I/O for the `r`, `R`, `w`, `W` commands, plus whole-document
/// read/write for the driver. All reads slurp the full file into memory;
/// srek has no streaming mode.
use crate::buffer::Buffer;
use crate::engine;
use crate::error::{Result, SrekError};
use crate::interval::IntervalList;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads an entire file (or stdin, for `path == "-"`) into memory.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        use std::io::Read;
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|source| SrekError::ReadFailed {
                path: PathBuf::from("-"),
                source,
            })?;
        Ok(buf)
    } else {
        fs::read(path).map_err(|source| SrekError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `r/file/`: read `file` fully and use its content to replace every
/// current selection (equivalent to `c` with the file content as the
/// replacement text; srek has no line-oriented insertion).
pub fn read(buffer: &mut Buffer, sels: &mut IntervalList, filename: &str) -> Result<()> {
    let content = fs::read(filename).map_err(|source| SrekError::ReadFailed {
        path: PathBuf::from(filename),
        source,
    })?;
    engine::change(buffer, sels, &content);
    Ok(())
}

/// `R/file/`: read `file` fully and append its content after every current
/// selection.
pub fn read_append(buffer: &mut Buffer, sels: &mut IntervalList, filename: &str) -> Result<()> {
    let content = fs::read(filename).map_err(|source| SrekError::ReadFailed {
        path: PathBuf::from(filename),
        source,
    })?;
    engine::sub(buffer, sels, None, Some("$"), &content);
    Ok(())
}

/// `w/file/sep/` and `W/file/sep/`: write every selection's bytes to
/// `file`, joined by `sep` (an absent `sep` is treated as empty, so no
/// separator is written between selections), truncating or appending
/// depending on `append`.
pub fn write(
    buffer: &Buffer,
    sels: &IntervalList,
    filename: &str,
    separator: Option<&str>,
    append: bool,
) -> Result<()> {
    let sep = separator.unwrap_or("").as_bytes();
    let bytes = buffer.as_bytes();

    let mut out = Vec::new();
    for (i, sel) in sels.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(sep);
        }
        out.extend_from_slice(sel.as_slice(bytes));
    }

    let result = if append {
        use std::io::Write;
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(filename)
            .and_then(|mut f| f.write_all(&out))
    } else {
        fs::write(filename, &out)
    };

    result.map_err(|source| SrekError::WriteFailed {
        path: PathBuf::from(filename),
        source,
    })
}
