use crate::errors::CommandError;
use bibliotheca_core::{Format, Library, LibraryPaths, storage};
use std::path::Path;

/// Everything a command works on: where the data lives and the library loaded from it
pub struct AppState {
    pub paths: LibraryPaths,
    pub format: Format,
    pub library: Library,
}

impl AppState {
    /// Loads the library from `format` inside `data_dir`.
    pub fn open(data_dir: &Path, format: Format) -> Result<Self, CommandError> {
        let paths = LibraryPaths::in_dir(data_dir);
        let mut library = Library::new();
        storage::load(&mut library, format, &paths)?;
        Ok(Self {
            paths,
            format,
            library,
        })
    }

    /// Writes both data files; reports every format that failed.
    pub fn persist(&self) -> Result<(), CommandError> {
        let report = storage::save_all(&self.library, &self.paths);
        if report.is_ok() {
            return Ok(());
        }
        let failed = report
            .failures()
            .map(|(format, error)| format!("{format} ({error})"))
            .collect::<Vec<_>>()
            .join(", ");
        Err(CommandError::Save(failed))
    }
}
