//! File storage
//!
//! Loading reads one format; saving always writes both. Every file is written to a sibling
//! `<file>.tmp` first and renamed over the target once flushed, so a failed save leaves the
//! previous file untouched.
use crate::codec::Codec;
use crate::codec::json::Json;
use crate::codec::xml::Xml;
use crate::errors::{StorageError, UnknownFormat};
use crate::registry::{Library, Summary};
use core::fmt;
use core::str::FromStr;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

pub const JSON_FILE: &str = "data.json";
pub const XML_FILE: &str = "data.xml";

/// One of the two supported file formats.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    pub const ALL: [Self; 2] = [Self::Json, Self::Xml];

    #[must_use]
    #[inline]
    pub const fn codec(self) -> &'static dyn Codec {
        match self {
            Self::Json => &Json,
            Self::Xml => &Xml,
        }
    }
}

impl fmt::Display for Format {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Xml => "xml",
        })
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    #[inline]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if value.eq_ignore_ascii_case("xml") {
            Ok(Self::Xml)
        } else {
            Err(UnknownFormat(value.to_owned()))
        }
    }
}

/// Locations of the two data files.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    pub json: PathBuf,
    pub xml: PathBuf,
}

impl LibraryPaths {
    #[must_use]
    #[inline]
    pub fn new(json: impl Into<PathBuf>, xml: impl Into<PathBuf>) -> Self {
        Self {
            json: json.into(),
            xml: xml.into(),
        }
    }

    /// `data.json` and `data.xml` inside `dir`.
    #[must_use]
    #[inline]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(JSON_FILE), dir.join(XML_FILE))
    }

    #[must_use]
    #[inline]
    pub fn path(&self, format: Format) -> &Path {
        match format {
            Format::Json => &self.json,
            Format::Xml => &self.xml,
        }
    }
}

/// Outcome of a dual-format save, one result per file.
#[non_exhaustive]
#[derive(Debug)]
pub struct SaveReport {
    pub json: Result<(), StorageError>,
    pub xml: Result<(), StorageError>,
}

impl SaveReport {
    #[must_use]
    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.json.is_ok() && self.xml.is_ok()
    }

    /// The formats that failed, with their errors.
    #[inline]
    pub fn failures(&self) -> impl Iterator<Item = (Format, &StorageError)> {
        [(Format::Json, &self.json), (Format::Xml, &self.xml)]
            .into_iter()
            .filter_map(|(format, result)| result.as_ref().err().map(|error| (format, error)))
    }
}

/// Replaces the contents of `library` with the document stored in `format`. On any failure the
/// library is left exactly as it was.
/// # Errors
/// Fails if the file cannot be read or its document cannot be decoded
#[inline]
pub fn load(
    library: &mut Library,
    format: Format,
    paths: &LibraryPaths,
) -> Result<Summary, StorageError> {
    let path = paths.path(format);
    let source = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = format
        .codec()
        .decode(&source)
        .map_err(|source| StorageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    *library = loaded;

    let summary = library.summary();
    log::info!("Loaded {summary} from {}", path.display());
    Ok(summary)
}

/// Writes `library` to both files. A failure of one format does not prevent the other from
/// being written.
#[inline]
pub fn save_all(library: &Library, paths: &LibraryPaths) -> SaveReport {
    let save = |format: Format| -> Result<(), StorageError> {
        let encoded = format.codec().encode(library)?;
        let path = paths.path(format);
        write_atomic(path, &encoded)?;
        log::info!("Saved {} to {}", library.summary(), path.display());
        Ok(())
    };

    let report = SaveReport {
        json: save(Format::Json),
        xml: save(Format::Xml),
    };
    for (format, error) in report.failures() {
        log::warn!("Saving {format} failed: {error}");
    }
    report
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(ToOwned::to_owned)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), StorageError> {
    let temporary = temporary_path(path);
    let written = File::create(&temporary).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(source) = written {
        discard(&temporary);
        return Err(StorageError::Io {
            path: temporary,
            source,
        });
    }
    fs::rename(&temporary, path).map_err(|source| {
        discard(&temporary);
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn discard(temporary: &Path) {
    if let Err(cleanup) = fs::remove_file(temporary) {
        log::debug!("Could not remove {}: {cleanup}", temporary.display());
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use crate::errors::CodecError;
    use crate::test_support::sample_library;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("JSON".parse::<Format>(), Ok(Format::Json));
        assert_eq!(" xml ".parse::<Format>(), Ok(Format::Xml));
        assert_eq!(
            "yaml".parse::<Format>(),
            Err(UnknownFormat("yaml".to_owned()))
        );
        assert_eq!(Format::Xml.to_string(), "xml");
    }

    #[test]
    fn save_writes_both_formats_and_each_loads_back() {
        let dir = tempdir().unwrap();
        let paths = LibraryPaths::in_dir(dir.path());
        let library = sample_library();

        let report = save_all(&library, &paths);
        assert!(report.is_ok());
        assert!(!temporary_path(&paths.json).exists());
        assert!(!temporary_path(&paths.xml).exists());

        for format in Format::ALL {
            let mut loaded = Library::new();
            let summary = load(&mut loaded, format, &paths).unwrap();
            assert_eq!(summary, library.summary());
            assert!(loaded.find_book_by_isbn("111").is_some());
        }
    }

    #[test]
    fn missing_file_leaves_library_untouched() {
        let dir = tempdir().unwrap();
        let paths = LibraryPaths::in_dir(dir.path());
        let mut library = sample_library();
        let before = library.clone();

        let error = load(&mut library, Format::Json, &paths).unwrap_err();
        assert!(matches!(error, StorageError::Io { ref path, .. } if *path == paths.json));
        assert_eq!(library, before);
    }

    #[test]
    fn broken_document_reports_decode_error() {
        let dir = tempdir().unwrap();
        let paths = LibraryPaths::in_dir(dir.path());
        fs::write(&paths.xml, "<Library>").unwrap();
        let mut library = sample_library();
        let before = library.summary();

        let error = load(&mut library, Format::Xml, &paths).unwrap_err();
        assert!(matches!(
            error,
            StorageError::Decode {
                source: CodecError::Xml(_),
                ..
            }
        ));
        assert_eq!(library.summary(), before);
    }

    #[test]
    fn failed_rename_removes_temporary_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        // A non-empty directory cannot be replaced by a file.
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let error = write_atomic(&target, "contents").unwrap_err();
        assert!(matches!(error, StorageError::Io { ref path, .. } if *path == target));
        assert!(!temporary_path(&target).exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn failed_save_keeps_previous_file_and_other_format() {
        let dir = tempdir().unwrap();
        let paths = LibraryPaths::in_dir(dir.path());
        fs::write(&paths.json, "previous").unwrap();
        // A directory in place of the temporary file makes the JSON write fail.
        fs::create_dir(temporary_path(&paths.json)).unwrap();

        let report = save_all(&sample_library(), &paths);
        assert!(matches!(report.json, Err(StorageError::Io { .. })));
        assert!(report.xml.is_ok());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(fs::read_to_string(&paths.json).unwrap(), "previous");
        assert!(fs::read_to_string(&paths.xml).unwrap().contains("<Library>"));
    }
}
