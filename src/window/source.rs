//! Reading log files into raw line sequences.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;
use std::str::from_utf8;

/// Read `path` into raw lines with their terminators still attached.
///
/// The file is decoded as UTF-8; invalid byte sequences are dropped rather
/// than failing the read.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(split_raw_lines(&decode_lossy(&bytes)))
}

/// Decode UTF-8, removing invalid sequences and keeping every valid run.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(valid) = from_utf8(bytes) {
        return Cow::Borrowed(valid);
    }

    let mut decoded = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match from_utf8(rest) {
            Ok(valid) => {
                decoded.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, invalid) = rest.split_at(e.valid_up_to());
                decoded.push_str(from_utf8(valid).unwrap_or_default());
                // A truncated sequence at the end has no error length
                let skip = e.error_len().unwrap_or(invalid.len());
                rest = &invalid[skip..];
            }
        }
    }
    Cow::Owned(decoded)
}

/// Split text into lines, each keeping its trailing `\n`.
pub fn split_raw_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
