//! Container unpacking: named entries out of a zip-based package.
//!
//! All three zip-backed formats (document, presentation, note bundle) share
//! this layer. Single-target formats select their payload by exact entry
//! name; presentations select every entry matching the slide name pattern.
//!
//! ## Why iterate by index, not `file_names()`?
//!
//! Slide order is defined as zip *central-directory order*, and that order
//! is observable only by walking indices: the zip crate's `file_names()`
//! iterates a lookup map whose order is unspecified. Numeric suffixes in
//! slide names are deliberately not consulted — an archive written as
//! `slide1, slide3, slide2` extracts in exactly that order.

use crate::error::ExtractError;
use regex::Regex;
use std::io::{Read, Seek};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// A zip-based document container over a random-access byte source.
///
/// Entries are opened with scoped acquisition: the handle returned by
/// [`Container::open_entry`] borrows the container and is released on every
/// exit path when it drops.
#[derive(Debug)]
pub struct Container<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Container<R> {
    /// Open a container, reading the zip central directory.
    ///
    /// # Errors
    /// [`ExtractError::Archive`] if the directory is corrupt or uses an
    /// unsupported layout; [`ExtractError::Io`] if the source fails.
    pub fn open(source: R) -> Result<Self, ExtractError> {
        let archive = ZipArchive::new(source).map_err(zip_error)?;
        debug!("opened container with {} entries", archive.len());
        Ok(Self { archive })
    }

    /// Number of entries in the container.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// True when the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Entry names in central-directory order.
    pub fn entry_names(&mut self) -> Result<Vec<String>, ExtractError> {
        let mut names = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let entry = self.archive.by_index(i).map_err(zip_error)?;
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    /// Open one entry by exact name as a byte stream.
    ///
    /// # Errors
    /// [`ExtractError::EntryNotFound`] if no entry has that name.
    pub fn open_entry(&mut self, name: &str) -> Result<impl Read + '_, ExtractError> {
        self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => ExtractError::EntryNotFound {
                name: name.to_string(),
            },
            other => zip_error(other),
        })
    }

    /// Read one entry by exact name into memory.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ExtractError> {
        let mut buf = Vec::new();
        self.open_entry(name)?.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Names of entries matching `pattern`, in central-directory order.
    pub fn matching_entry_names(
        &mut self,
        pattern: &Regex,
    ) -> Result<Vec<String>, ExtractError> {
        let names = self.entry_names()?;
        Ok(names
            .into_iter()
            .filter(|name| pattern.is_match(name))
            .collect())
    }
}

fn zip_error(e: ZipError) -> ExtractError {
    match e {
        ZipError::Io(io) => ExtractError::Io(io),
        ZipError::FileNotFound => ExtractError::Archive {
            detail: "entry disappeared from directory".to_string(),
        },
        other => ExtractError::Archive {
            detail: other.to_string(),
        },
    }
}
