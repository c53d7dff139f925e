//! A complete DELTA dataset: characters, items and optional specifications.

use std::fmt;
use std::path::PathBuf;

use crate::catalog::{CharacterCatalog, ItemCatalog, SpecificationCatalog};
use crate::parser::errors::{Diagnostic, ErrorCode, Result};
use crate::parser::ParseOptions;

/// Locations of the files making up a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub characters: PathBuf,
    pub items: PathBuf,
    pub specifications: Option<PathBuf>,
}

impl DatasetPaths {
    pub fn new(characters: impl Into<PathBuf>, items: impl Into<PathBuf>) -> Self {
        Self {
            characters: characters.into(),
            items: items.into(),
            specifications: None,
        }
    }

    pub fn with_specifications(mut self, path: impl Into<PathBuf>) -> Self {
        self.specifications = Some(path.into());
        self
    }
}

/// Owner of the three catalogs, loaded in dependency order.
#[derive(Debug)]
pub struct Dataset {
    characters: CharacterCatalog,
    items: ItemCatalog,
    specifications: Option<SpecificationCatalog>,
    diagnostics: Vec<Diagnostic>,
}

impl Dataset {
    /// Load and parse the files named by `paths`.
    pub fn open(paths: &DatasetPaths, options: &ParseOptions) -> Result<Self> {
        Self::load(
            CharacterCatalog::from_path(&paths.characters),
            ItemCatalog::from_path(&paths.items),
            paths
                .specifications
                .as_ref()
                .map(SpecificationCatalog::from_path),
            options,
        )
    }

    /// Parse a dataset whose files are already in memory.
    pub fn from_text(
        characters: &str,
        items: &str,
        specifications: Option<&str>,
        options: &ParseOptions,
    ) -> Result<Self> {
        Self::load(
            CharacterCatalog::from_text("characters", characters),
            ItemCatalog::from_text("items", items),
            specifications.map(|text| SpecificationCatalog::from_text("specifications", text)),
            options,
        )
    }

    fn load(
        mut characters: CharacterCatalog,
        items: ItemCatalog,
        specifications: Option<SpecificationCatalog>,
        options: &ParseOptions,
    ) -> Result<Self> {
        characters.parse()?;

        let mut items = items.with_options(options.clone());
        items.parse()?;

        let specifications = match specifications {
            Some(specs) => {
                let mut specs = specs.with_options(options.clone());
                specs.parse(&mut characters)?;
                Some(specs)
            }
            None => None,
        };

        let mut dataset = Self {
            characters,
            items,
            specifications,
            diagnostics: Vec::new(),
        };
        dataset.check_attribute_characters();
        tracing::debug!("loaded dataset: {dataset}");
        Ok(dataset)
    }

    /// Report attributes naming characters the characters file lacks.
    fn check_attribute_characters(&mut self) {
        let count = self.characters.char_count();
        for item in self.items.items() {
            for attribute in item.attributes() {
                let character = attribute.character();
                if character == 0 || character > count {
                    let message = format!(
                        "item {} ({}) describes unknown character {character}",
                        item.number(),
                        item.plain_name()
                    );
                    tracing::warn!("{message}");
                    self.diagnostics
                        .push(Diagnostic::warning(ErrorCode::E0404, message));
                }
            }
        }
    }

    pub fn characters(&self) -> &CharacterCatalog {
        &self.characters
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn specifications(&self) -> Option<&SpecificationCatalog> {
        self.specifications.as_ref()
    }

    /// Every non-fatal report from loading, across all catalogs.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.characters
            .diagnostics()
            .iter()
            .chain(
                self.specifications
                    .iter()
                    .flat_map(|specs| specs.diagnostics()),
            )
            .chain(&self.diagnostics)
            .collect()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.characters, self.items)?;
        if let Some(specs) = &self.specifications {
            write!(f, ", {specs}")?;
        }
        Ok(())
    }
}
