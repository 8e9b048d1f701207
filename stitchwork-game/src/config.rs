//! Configuration documents and the store that caches them.
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{PARTS_DOCUMENT, TITLES_DOCUMENT};
use crate::effect::{EffectRecord, Stats};
use crate::error::ForgeError;
use crate::jsonc::parse_jsonc;

const DEFAULT_PARTS_DATA: &str = include_str!("../data/parts.jsonc");
const DEFAULT_TITLES_DATA: &str = include_str!("../data/titles.jsonc");

/// Trait for abstracting where raw configuration text comes from.
pub trait ResourceSource {
    /// Read the raw text of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::ResourceNotFound`] when the document does not
    /// exist, or [`ForgeError::Io`] when it exists but cannot be read.
    fn read_document(&self, document: &str) -> Result<String, ForgeError>;
}

impl<T: ResourceSource + ?Sized> ResourceSource for &T {
    fn read_document(&self, document: &str) -> Result<String, ForgeError> {
        (**self).read_document(document)
    }
}

/// The catalogs bundled with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl ResourceSource for EmbeddedSource {
    fn read_document(&self, document: &str) -> Result<String, ForgeError> {
        match document {
            PARTS_DOCUMENT => Ok(DEFAULT_PARTS_DATA.to_string()),
            TITLES_DOCUMENT => Ok(DEFAULT_TITLES_DATA.to_string()),
            _ => Err(ForgeError::ResourceNotFound {
                document: document.to_string(),
            }),
        }
    }
}

/// Reads `<root>/<document>.jsonc`, falling back to `<root>/<document>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, document: &str) -> [PathBuf; 2] {
        [
            self.root.join(format!("{document}.jsonc")),
            self.root.join(format!("{document}.json")),
        ]
    }
}

impl ResourceSource for DirectorySource {
    fn read_document(&self, document: &str) -> Result<String, ForgeError> {
        for path in self.candidates(document) {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!("read `{document}` from {}", path.display());
                    return Ok(text);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(ForgeError::Io {
                        document: document.to_string(),
                        source,
                    });
                }
            }
        }
        Err(ForgeError::ResourceNotFound {
            document: document.to_string(),
        })
    }
}

/// In-memory documents keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, document: &str, text: &str) -> Self {
        self.insert(document, text);
        self
    }

    pub fn insert(&mut self, document: &str, text: &str) {
        self.documents
            .insert(document.to_string(), text.to_string());
    }
}

impl ResourceSource for MemorySource {
    fn read_document(&self, document: &str) -> Result<String, ForgeError> {
        self.documents
            .get(document)
            .cloned()
            .ok_or_else(|| ForgeError::ResourceNotFound {
                document: document.to_string(),
            })
    }
}

/// Socket capacities of a part template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketCapacity {
    pub female: u32,
    pub male: u32,
}

/// A parts catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartTemplate {
    pub base_stats: Stats,
    pub sockets: SocketCapacity,
    pub slots: u32,
}

/// A titles catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleTemplate {
    pub effects: Vec<EffectRecord>,
}

/// Loads configuration documents once and shares the parsed result.
///
/// The store is constructed by the caller and passed by reference; the
/// first successful load of a document is the only write to its cache.
#[derive(Debug)]
pub struct ConfigStore<S> {
    source: S,
    cache: RwLock<HashMap<String, Arc<Value>>>,
}

impl Default for ConfigStore<EmbeddedSource> {
    fn default() -> Self {
        Self::new(EmbeddedSource)
    }
}

impl<S: ResourceSource> ConfigStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load and parse `document`, returning the cached value on later calls.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::ResourceNotFound`] or [`ForgeError::Io`] from the
    /// source, or [`ForgeError::ConfigParse`] when the text is not valid jsonc.
    pub fn load(&self, document: &str) -> Result<Arc<Value>, ForgeError> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(document)
        {
            return Ok(Arc::clone(cached));
        }

        log::debug!("loading configuration document `{document}`");
        let text = self.source.read_document(document)?;
        let parsed = Arc::new(parse_jsonc(document, &text)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.entry(document.to_string()).or_insert(parsed);
        Ok(Arc::clone(entry))
    }

    /// Whether `document` has already been loaded.
    #[must_use]
    pub fn is_cached(&self, document: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(document)
    }

    /// Look up a part template by name.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::UnknownPart`] when `name` is not in the catalog,
    /// [`ForgeError::InvalidTemplate`] when its entry has the wrong shape, or
    /// any error from [`ConfigStore::load`].
    pub fn part_template(&self, name: &str) -> Result<PartTemplate, ForgeError> {
        self.template(PARTS_DOCUMENT, name)?
            .ok_or_else(|| ForgeError::UnknownPart {
                name: name.to_string(),
            })
    }

    /// Look up a title template by name.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::UnknownTitle`] when `name` is not in the catalog,
    /// [`ForgeError::InvalidTemplate`] when its entry has the wrong shape, or
    /// any error from [`ConfigStore::load`].
    pub fn title_template(&self, name: &str) -> Result<TitleTemplate, ForgeError> {
        self.template(TITLES_DOCUMENT, name)?
            .ok_or_else(|| ForgeError::UnknownTitle {
                name: name.to_string(),
            })
    }

    /// Names of every entry in `document`, sorted.
    ///
    /// # Errors
    ///
    /// Returns any error from [`ConfigStore::load`].
    pub fn entry_names(&self, document: &str) -> Result<Vec<String>, ForgeError> {
        let value = self.load(document)?;
        Ok(value
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn template<T: DeserializeOwned>(
        &self,
        document: &str,
        name: &str,
    ) -> Result<Option<T>, ForgeError> {
        let value = self.load(document)?;
        let Some(entry) = value.get(name) else {
            return Ok(None);
        };
        T::deserialize(entry)
            .map(Some)
            .map_err(|err| ForgeError::invalid_template(document, name, &err))
    }
}
