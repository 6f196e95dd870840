use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use tracing::info;

use crate::error::CatalogError;
use crate::pipeline::types::{RegionLabel, StyleOption};

type StyleTable = IndexMap<String, Vec<StyleOption>>;

/// Region -> style name -> options, in the order they appear in the source file.
///
/// Built once and read-only afterwards; share it by reference or `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StyleCatalog {
    regions: IndexMap<RegionLabel, StyleTable>,
}

impl StyleCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Style catalog loaded from {} with {} region types and {} styles",
            path.display(),
            catalog.regions.len(),
            catalog.styles().len()
        );
        Ok(catalog)
    }

    /// Options for exactly `(region, style)`; empty when either key is absent.
    pub fn options_for(&self, region: RegionLabel, style: &str) -> &[StyleOption] {
        self.regions
            .get(&region)
            .and_then(|table| table.get(style))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Regions present in the catalog, in file order.
    pub fn regions(&self) -> impl Iterator<Item = RegionLabel> + '_ {
        self.regions.keys().copied()
    }

    /// Distinct style names, in first-seen order.
    pub fn styles(&self) -> IndexSet<&str> {
        self.regions
            .values()
            .flat_map(|table| table.keys().map(String::as_str))
            .collect()
    }

    pub fn style_exists(&self, style: &str) -> bool {
        self.regions
            .values()
            .any(|table| table.get(style).is_some_and(|options| !options.is_empty()))
    }

    /// Every region offering `style`, with its options.
    pub fn recommendations_for_style(&self, style: &str) -> IndexMap<RegionLabel, &[StyleOption]> {
        self.regions
            .iter()
            .filter_map(|(region, table)| {
                table
                    .get(style)
                    .filter(|options| !options.is_empty())
                    .map(|options| (*region, options.as_slice()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
