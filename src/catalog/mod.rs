//! In-memory catalogs built from the three DELTA files.
//!
//! - [`CharacterCatalog`]: characters with their states or unit
//! - [`ItemCatalog`]: items with their attributes, plus the identification
//!   queries (`first_matching`, `next_matching`, `matches`)
//! - [`SpecificationCatalog`]: character types, implicit values and
//!   character dependencies
//!
//! Load characters first: the specification catalog checks character
//! numbers against it and retypes characters in place.

mod characters;
mod description;
mod items;
mod matching;
mod specs;

pub use characters::{Character, CharacterCatalog, CharacterType};
pub use items::{Item, ItemCatalog};
pub use matching::MatchOptions;
pub use specs::{
    CHARACTER_TYPES, CharacterDependency, DEPENDENT_CHARACTERS, IMPLICIT_VALUES, ImplicitValue,
    SpecificationCatalog,
};
