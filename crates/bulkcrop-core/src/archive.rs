//! ZIP packaging of successful crop results.
//!
//! Every archive has one top-level folder holding one entry per successful
//! [`CropResult`]. Failures contribute nothing. Entries get a fixed
//! timestamp so identical inputs produce an identical container layout.
//!
//! # Collision Policy
//!
//! The first result keeps its suggested name. A later result whose name is
//! already taken gets its 1-based batch position inserted before the
//! extension (`photo_cropped_3.jpg`); if that is taken too, `_2`, `_3`, ...
//! follow until the name is unique.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::batch::{with_sequence, CropResult};
use crate::options::{DEFAULT_ARCHIVE_NAME, DEFAULT_FOLDER_NAME};

/// Errors raised while writing or finalizing the container.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The ZIP writer rejected an entry or failed to finish.
    #[error("Failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing entry content failed.
    #[error("Failed to write archive entry {name}: {source}")]
    Entry {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A finalized, immutable archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArchive {
    file_name: String,
    folder: String,
    entries: Vec<String>,
    bytes: Vec<u8>,
}

impl ExportArchive {
    /// File name the archive is offered for download under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Top-level folder inside the archive.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Full entry paths (`<folder>/<file>`) in insertion order, folder excluded.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encoded ZIP container.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builds an [`ExportArchive`] from batch results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archiver {
    folder: String,
    file_name: String,
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER_NAME, DEFAULT_ARCHIVE_NAME)
    }
}

impl Archiver {
    pub fn new(folder: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            file_name: file_name.into(),
        }
    }

    /// Package every successful result into a finalized ZIP.
    ///
    /// An input with no successes yields a valid archive that contains only
    /// the top-level folder.
    pub fn build(&self, results: &[CropResult]) -> Result<ExportArchive, ArchiveError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.add_directory(format!("{}/", self.folder), options)?;

        let mut taken = HashSet::new();
        let mut entries = Vec::new();

        for (index, result) in results.iter().enumerate() {
            let CropResult::Success {
                suggested_filename,
                bytes,
                ..
            } = result
            else {
                continue;
            };

            let filename = unique_name(suggested_filename, index + 1, &mut taken);
            let path = format!("{}/{}", self.folder, filename);

            writer.start_file(path.clone(), options)?;
            writer
                .write_all(bytes)
                .map_err(|source| ArchiveError::Entry {
                    name: path.clone(),
                    source,
                })?;

            debug!(entry = %path, size = bytes.len(), "Added archive entry");
            entries.push(path);
        }

        let bytes = writer.finish()?.into_inner();

        Ok(ExportArchive {
            file_name: self.file_name.clone(),
            folder: self.folder.clone(),
            entries,
            bytes,
        })
    }
}

/// Claim a unique file name for the item at 1-based `position`.
fn unique_name(suggested: &str, position: usize, taken: &mut HashSet<String>) -> String {
    if taken.insert(suggested.to_string()) {
        return suggested.to_string();
    }

    let base = with_sequence(suggested, position);
    let mut candidate = base.clone();
    let mut attempt = 2;
    while !taken.insert(candidate.clone()) {
        candidate = with_sequence(&base, attempt);
        attempt += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{PixelRect, RasterError};
    use std::io::Read;
    use zip::ZipArchive;

    fn success(id: &str, filename: &str, content: &[u8]) -> CropResult {
        CropResult::Success {
            source_id: id.to_string(),
            bytes: content.to_vec(),
            mime_type: "image/png".to_string(),
            suggested_filename: filename.to_string(),
            rect: PixelRect::new(0, 0, 1, 1),
        }
    }

    fn failure(id: &str) -> CropResult {
        CropResult::Failure {
            source_id: id.to_string(),
            reason: RasterError::DimensionUnknown {
                source_id: id.to_string(),
            },
        }
    }

    /// File entry names (directories excluded) read back from the container.
    fn file_names(archive: &ExportArchive) -> Vec<String> {
        let mut zip = ZipArchive::new(Cursor::new(archive.bytes().to_vec())).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .filter(|name| !name.ends_with('/'))
            .collect()
    }

    #[test]
    fn test_only_successes_become_entries() {
        let results = vec![
            success("1", "a_cropped.png", b"a"),
            failure("2"),
            success("3", "c_cropped.jpg", b"c"),
        ];
        let archive = Archiver::default().build(&results).unwrap();

        assert_eq!(
            archive.entries(),
            ["cropped_images/a_cropped.png", "cropped_images/c_cropped.jpg"]
        );
        assert_eq!(file_names(&archive), archive.entries());
    }

    #[test]
    fn test_entry_content_round_trips() {
        let results = vec![success("1", "a_cropped.png", b"pixels go here")];
        let archive = Archiver::default().build(&results).unwrap();

        let mut zip = ZipArchive::new(Cursor::new(archive.into_bytes())).unwrap();
        let mut content = Vec::new();
        zip.by_name("cropped_images/a_cropped.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"pixels go here");
    }

    #[test]
    fn test_distinct_extensions_do_not_collide() {
        let results = vec![
            success("1", "photo_cropped.jpg", b"1"),
            success("2", "photo_cropped.png", b"2"),
        ];
        let archive = Archiver::default().build(&results).unwrap();
        assert_eq!(
            archive.entries(),
            ["cropped_images/photo_cropped.jpg", "cropped_images/photo_cropped.png"]
        );
    }

    #[test]
    fn test_collisions_get_batch_position() {
        let results = vec![
            success("1", "photo_cropped.jpg", b"1"),
            failure("2"),
            success("3", "photo_cropped.jpg", b"3"),
            success("4", "photo_cropped.jpg", b"4"),
        ];
        let archive = Archiver::default().build(&results).unwrap();

        assert_eq!(
            archive.entries(),
            [
                "cropped_images/photo_cropped.jpg",
                "cropped_images/photo_cropped_3.jpg",
                "cropped_images/photo_cropped_4.jpg",
            ]
        );
        assert_eq!(file_names(&archive).len(), 3);
    }

    #[test]
    fn test_collision_with_existing_sequenced_name() {
        // The third item's sequenced name is already used by the second
        let results = vec![
            success("1", "x_cropped.png", b"1"),
            success("2", "x_cropped_3.png", b"2"),
            success("3", "x_cropped.png", b"3"),
        ];
        let archive = Archiver::default().build(&results).unwrap();

        assert_eq!(
            archive.entries(),
            [
                "cropped_images/x_cropped.png",
                "cropped_images/x_cropped_3.png",
                "cropped_images/x_cropped_3_2.png",
            ]
        );
    }

    #[test]
    fn test_all_failed_is_valid_empty_archive() {
        let archive = Archiver::default().build(&[failure("1"), failure("2")]).unwrap();

        assert!(archive.is_empty());
        let zip = ZipArchive::new(Cursor::new(archive.bytes().to_vec())).unwrap();
        assert_eq!(zip.len(), 1); // just the folder
        assert!(file_names(&archive).is_empty());
    }

    #[test]
    fn test_custom_names() {
        let archive = Archiver::new("out", "mine.zip")
            .build(&[success("1", "a_cropped.png", b"a")])
            .unwrap();
        assert_eq!(archive.file_name(), "mine.zip");
        assert_eq!(archive.folder(), "out");
        assert_eq!(archive.entries(), ["out/a_cropped.png"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let results = vec![
            success("1", "a_cropped.png", b"aaaa"),
            success("2", "a_cropped.png", b"bbbb"),
        ];
        let first = Archiver::default().build(&results).unwrap();
        let second = Archiver::default().build(&results).unwrap();
        assert_eq!(first, second);
    }
}
