//! RON race loader

use crate::error::{Error, Result};
use crate::schema::RaceDef;
use evolve_core::{RaceId, RaceTemplate};
use indexmap::IndexMap;
use ron::value::RawValue;
use std::fs;
use std::path::Path;

/// A race (or file) that failed to load
#[derive(Debug)]
pub struct Rejection {
    /// Race name, or the file path when the whole file failed
    pub source: String,
    /// Why it was rejected
    pub error: Error,
}

/// Loaded race templates
#[derive(Debug, Default)]
pub struct RaceDefs {
    /// Race templates by ID, in load order
    pub races: IndexMap<RaceId, RaceTemplate>,
    /// Races and files that were skipped
    pub rejected: Vec<Rejection>,
}

impl RaceDefs {
    /// Create empty race definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a race template
    pub fn get_race(&self, id: &RaceId) -> Option<&RaceTemplate> {
        self.races.get(id)
    }

    /// Iterate templates in load order
    pub fn iter(&self) -> impl Iterator<Item = &RaceTemplate> {
        self.races.values()
    }

    /// Number of loaded races
    pub fn len(&self) -> usize {
        self.races.len()
    }

    /// Check if no race was loaded
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    fn insert(&mut self, template: RaceTemplate) -> Result<()> {
        let id = template.id().clone();
        if self.races.contains_key(&id) {
            return Err(Error::DuplicateDefinition(id.to_string()));
        }
        self.races.insert(id, template);
        Ok(())
    }
}

/// Loader for RON race files
pub struct Loader {
    defs: RaceDefs,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: RaceDefs::new(),
        }
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
    }

    /// Load a single RON file
    ///
    /// A file with a top-level `races:` map may declare several races;
    /// otherwise the file is one race named after its stem.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct FileShape {
            #[serde(default)]
            races: Option<serde::de::IgnoredAny>,
        }

        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let shape: FileShape = Self::options().from_str(&content)?;
        if shape.races.is_some() {
            self.load_races_str(&content)
        } else {
            let name = path
                .file_stem()
                .and_then(|n| n.to_str())
                .ok_or_else(|| Error::MissingField(format!("race name for {:?}", path)))?;
            self.load_race_str(name, &content)
        }
    }

    /// Load a `races: { "Name": (...) }` map from a RON string
    ///
    /// Each race is parsed and validated on its own: a race with a wrong
    /// field type, a failed check or a name already loaded is skipped and
    /// recorded in [`RaceDefs::rejected`], and the others still load. Only a
    /// syntax error fails the whole call.
    pub fn load_races_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        struct RaceFile {
            races: IndexMap<String, Box<RawValue>>,
        }

        let file: RaceFile = Self::options().from_str(content)?;
        for (name, raw) in file.races {
            let loaded = Self::options()
                .from_str::<RaceDef>(raw.get_ron())
                .map_err(Error::from)
                .and_then(|def| def.into_template(&name))
                .and_then(|template| {
                    tracing::debug!(race = %template.id(), levels = template.levels().len(), "Loaded race");
                    self.defs.insert(template)
                });
            if let Err(error) = loaded {
                tracing::warn!(race = %name, %error, "Skipping race");
                self.defs.rejected.push(Rejection {
                    source: name,
                    error,
                });
            }
        }
        Ok(())
    }

    /// Load a single race definition from a RON string
    pub fn load_race_str(&mut self, name: &str, content: &str) -> Result<()> {
        let def: RaceDef = Self::options().from_str(content)?;
        let template = def.into_template(name)?;
        tracing::debug!(race = %template.id(), levels = template.levels().len(), "Loaded race");
        self.defs.insert(template)
    }

    /// Load all RON files from a directory, recursively
    ///
    /// A file that fails to load is recorded in [`RaceDefs::rejected`] and
    /// does not stop the others.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                if let Err(error) = self.load_file(&file_path) {
                    tracing::warn!(file = %file_path.display(), %error, "Skipping race file");
                    self.defs.rejected.push(Rejection {
                        source: file_path.display().to_string(),
                        error,
                    });
                }
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the race definitions
    pub fn finish(self) -> RaceDefs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &RaceDefs {
        &self.defs
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
