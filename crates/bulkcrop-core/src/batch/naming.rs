//! Destination file names for cropped outputs.

use crate::encode::OutputFormat;

/// Marker appended to every cropped file's stem.
pub const CROPPED_SUFFIX: &str = "_cropped";

/// Name without its final extension.
///
/// A leading dot (`.hidden`) or a missing dot leaves the name untouched.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// `<stem>_cropped.<ext>` for a source name and chosen output format.
///
/// Path separators in the stem become `_` so an entry can never escape the
/// archive's top-level folder.
pub fn output_filename(source_name: &str, format: OutputFormat) -> String {
    let stem: String = file_stem(source_name)
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{stem}{CROPPED_SUFFIX}.{}", format.extension())
}

/// Insert `_<n>` before the extension: `photo_cropped.jpg` -> `photo_cropped_3.jpg`.
pub fn with_sequence(filename: &str, n: usize) -> String {
    let stem = file_stem(filename);
    match filename.get(stem.len()..) {
        Some(ext) if !ext.is_empty() => format!("{stem}_{n}{ext}"),
        _ => format!("{filename}_{n}"),
    }
}
