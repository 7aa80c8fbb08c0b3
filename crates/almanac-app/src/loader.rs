//! Reads calendar, module and chronology documents from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use almanac_chronology::{ChronologyDefinition, ChronologyRegistry};
use almanac_spec::{CalendarSpecification, InMemoryCatalog, ModuleSpecification};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// One document, discriminated by its `kind` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Calendar(CalendarSpecification),
    Module(ModuleSpecification),
    Chronology(ChronologyDefinition),
}

/// A file holds either a single document or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Many(Vec<Document>),
    One(Box<Document>),
}

/// Everything loaded from a catalog directory.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    pub catalog: InMemoryCatalog,
    pub chronologies: Vec<ChronologyDefinition>,
}

impl LoadedDocuments {
    /// ## Summary
    /// Adds documents, rejecting duplicate identifiers.
    ///
    /// ## Errors
    /// Returns `DuplicateId` for a repeated calendar or module identifier and
    /// `AlreadyRegistered` for a repeated chronology identifier.
    pub fn extend(&mut self, documents: Vec<Document>) -> AppResult<()> {
        for document in documents {
            match document {
                Document::Calendar(calendar) => self.catalog.insert_calendar(calendar)?,
                Document::Module(module) => self.catalog.insert_module(module)?,
                Document::Chronology(definition) => {
                    if self.chronologies.iter().any(|known| known.id == definition.id) {
                        return Err(almanac_chronology::ChronologyError::AlreadyRegistered(
                            definition.id,
                        )
                        .into());
                    }
                    self.chronologies.push(definition);
                }
            }
        }
        Ok(())
    }

    /// ## Summary
    /// Registers every loaded chronology, compiling its leap-year formula.
    ///
    /// ## Errors
    /// Returns the first registration error.
    pub fn register_chronologies(&self, registry: &ChronologyRegistry) -> AppResult<()> {
        for definition in &self.chronologies {
            registry.register_definition(definition)?;
            tracing::info!(calendar_system = %definition.id, "Registered chronology");
        }
        Ok(())
    }
}

/// ## Summary
/// Parses the contents of one document file.
///
/// ## Errors
/// Returns `Parse` naming `path` if the JSON is malformed or a document does
/// not match its kind.
pub fn parse_documents(path: &Path, text: &str) -> AppResult<Vec<Document>> {
    let file: DocumentFile = serde_json::from_str(text).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match file {
        DocumentFile::Many(documents) => documents,
        DocumentFile::One(document) => vec![*document],
    })
}

/// ## Summary
/// Loads every `*.json` file in `dir`, in file-name order.
///
/// ## Errors
/// Returns an error if the directory or a file cannot be read, a file does
/// not parse, or an identifier is repeated.
#[tracing::instrument]
pub fn load_directory(dir: &Path) -> AppResult<LoadedDocuments> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| AppError::Io { path, source }
    };

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<_, _>>()
        .map_err(io_error(dir))?;
    files.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"));
    files.sort();

    let mut loaded = LoadedDocuments::default();
    for path in &files {
        let text = fs::read_to_string(path).map_err(io_error(path))?;
        let documents = parse_documents(path, &text)?;
        tracing::debug!(path = %path.display(), documents = documents.len(), "Loaded document file");
        loaded.extend(documents)?;
    }

    tracing::info!(
        files = files.len(),
        calendars = loaded.catalog.calendar_ids().count(),
        modules = loaded.catalog.module_ids().count(),
        chronologies = loaded.chronologies.len(),
        "Catalog loaded"
    );
    Ok(loaded)
}
