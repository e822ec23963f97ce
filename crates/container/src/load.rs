//! Definition-file loaders.
//!
//! Two document shapes populate a container from configuration, both
//! producing definitions at the default singleton lifecycle:
//!
//! - **section/key-value** (TOML): top-level tables are organizational
//!   sections and are otherwise ignored; every `key = "impl"` string pair
//!   inside any section is one definition.
//! - **flat key-value** (YAML): a single string-to-string mapping.
//!
//! Name resolution goes through a [`Catalog`]; any name the catalog can not
//! resolve fails the whole load. Errors are typed ([`LoadError`]) and keep
//! their cause; the `try_from_path` wrappers restore the historical
//! "caller checks for absence" ergonomics by logging and discarding it.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::catalog::Catalog;
use crate::container::Container;
use crate::errors::LoadError;

/// Loader for the section/key-value definitions format.
pub struct TomlContainer;

impl TomlContainer {
    pub fn from_path(catalog: &Catalog, path: impl AsRef<Path>) -> Result<Container, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(catalog, &text)
    }

    pub fn from_reader(
        catalog: &Catalog,
        mut reader: impl Read,
    ) -> Result<Container, LoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Reader { source })?;
        Self::from_str(catalog, &text)
    }

    pub fn from_str(catalog: &Catalog, text: &str) -> Result<Container, LoadError> {
        let document: toml::Table =
            toml::from_str(text).map_err(|source| LoadError::Toml { source })?;

        let container = Container::new();
        for (section, entries) in &document {
            let entries = entries.as_table().ok_or_else(|| LoadError::Malformed {
                detail: format!("`{section}` is not a section of key/implementation pairs"),
            })?;
            for (key_name, implementation) in entries {
                let impl_name = implementation.as_str().ok_or_else(|| LoadError::Malformed {
                    detail: format!(
                        "`{section}.{key_name}` must name an implementation type as a string"
                    ),
                })?;
                catalog.apply(&container, key_name, impl_name)?;
            }
        }
        Ok(container)
    }

    /// Absence-style convenience: the cause is logged and discarded.
    pub fn try_from_path(catalog: &Catalog, path: impl AsRef<Path>) -> Option<Container> {
        match Self::from_path(catalog, path) {
            Ok(container) => Some(container),
            Err(error) => {
                warn!("definitions load failed: {:#}", anyhow::Error::from(error));
                None
            }
        }
    }
}

/// Loader for the flat key-value definitions format.
pub struct YamlContainer;

impl YamlContainer {
    pub fn from_path(catalog: &Catalog, path: impl AsRef<Path>) -> Result<Container, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(catalog, &text)
    }

    pub fn from_reader(
        catalog: &Catalog,
        mut reader: impl Read,
    ) -> Result<Container, LoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Reader { source })?;
        Self::from_str(catalog, &text)
    }

    pub fn from_str(catalog: &Catalog, text: &str) -> Result<Container, LoadError> {
        let document: BTreeMap<String, String> =
            serde_yaml::from_str(text).map_err(|source| LoadError::Yaml { source })?;

        let container = Container::new();
        for (key_name, impl_name) in &document {
            catalog.apply(&container, key_name, impl_name)?;
        }
        Ok(container)
    }

    /// Absence-style convenience: the cause is logged and discarded.
    pub fn try_from_path(catalog: &Catalog, path: impl AsRef<Path>) -> Option<Container> {
        match Self::from_path(catalog, path) {
            Ok(container) => Some(container),
            Err(error) => {
                warn!("definitions load failed: {:#}", anyhow::Error::from(error));
                None
            }
        }
    }
}
