//! Loading complete datasets from disk and from memory.

mod helpers;

use helpers::dataset_helpers::{violet_files, violets, write_file};
use helpers::source_fixtures::{VIOLET_CHARACTERS, VIOLET_ITEMS};
use rstest::rstest;
use taxodelta::parser::ErrorCode;
use taxodelta::{CharacterType, Dataset, DatasetPaths, DeltaError, ParseOptions};
use tempfile::TempDir;

// ============================================================================
// Characters and items
// ============================================================================

#[rstest]
#[case(1, CharacterType::UnorderedMultistate)]
#[case(2, CharacterType::UnorderedMultistate)]
#[case(3, CharacterType::RealNumeric)]
#[case(4, CharacterType::UnorderedMultistate)]
#[case(5, CharacterType::RealNumeric)]
#[case(6, CharacterType::UnorderedMultistate)]
#[case(7, CharacterType::Text)]
fn test_character_types_after_specifications(#[case] n: usize, #[case] kind: CharacterType) {
    let dataset = violets();
    assert_eq!(dataset.characters().kind(n), Some(kind));
}

#[test]
fn test_character_descriptions() {
    let dataset = violets();
    let characters = dataset.characters();

    assert_eq!(characters.char_count(), 7);
    assert_eq!(characters.feature(1), "<habit>plant <life form>");
    assert_eq!(characters.feature(6), "scent of flowers");
    assert_eq!(characters.state_count(4), 3);
    assert_eq!(characters.state(4, 2), "violet");
    assert_eq!(characters.unit(3), "cm");
    assert_eq!(characters.unit(4), "");
    assert_eq!(characters.state(3, 1), "");
    assert_eq!(characters.directives().len(), 1);
}

#[test]
fn test_item_names_and_attributes() {
    let dataset = violets();
    let items = dataset.items();

    assert_eq!(items.item_count(), 4);
    assert_eq!(items.name(1, true), "Viola odorata <sweet violet>");
    assert_eq!(items.name(1, false), "Viola odorata");
    assert_eq!(items.name(3, false), "Viola palustris");
    assert_eq!(items.name(9, false), "");

    assert_eq!(items.attribute_count(1), 6);
    assert_eq!(items.attribute(1, 4), "4,2/1<rarely>");
    assert_eq!(items.attribute(1, 5), "5,(3-)5-7(-8)");
    assert_eq!(items.attribute_count(3), 7);
    assert_eq!(items.attribute(3, 7), "7<bogs and fens>,U");
    assert_eq!(items.attribute(3, 8), "");
}

// ============================================================================
// Specifications
// ============================================================================

#[rstest]
#[case(1, 1, 2)]
#[case(1, 2, 0)]
#[case(6, 1, 1)]
#[case(2, 1, 0)]
#[case(8, 1, 0)]
#[case(1, 3, 0)]
fn test_implicit_values(#[case] character: usize, #[case] iv_type: u8, #[case] expected: i32) {
    let dataset = violets();
    let specs = dataset.specifications().expect("specifications loaded");
    assert_eq!(specs.implicit_value(character, iv_type), expected);
}

#[test]
fn test_dependencies() {
    let dataset = violets();
    let specs = dataset.specifications().expect("specifications loaded");

    assert!(specs.is_dependent(5, 4, 2));
    assert!(specs.is_dependent(6, 4, 3));
    assert!(!specs.is_dependent(5, 4, 1));
    assert!(!specs.is_dependent(3, 4, 2));

    assert_eq!(specs.dependent_count(4, 2), 2);
    assert_eq!(specs.dependent_count(4, 1), 0);
    assert_eq!(specs.dependent(4, 3, 1), 5);
    assert_eq!(specs.dependent(4, 3, 2), 6);
    assert_eq!(specs.dependent(4, 3, 3), 0);

    let records: Vec<String> = specs.dependencies().map(ToString::to_string).collect();
    assert_eq!(records, ["4,2/3:5:6"]);
}

#[test]
fn test_clean_dataset_has_no_diagnostics() {
    let dataset = violets();
    assert!(dataset.diagnostics().is_empty(), "{:?}", dataset.diagnostics());
    assert_eq!(
        dataset.to_string(),
        "7 characters, 4 items, 4 specifications"
    );
}

#[test]
fn test_incompatible_retype_is_reported() {
    let dataset = Dataset::from_text(
        VIOLET_CHARACTERS,
        VIOLET_ITEMS,
        Some("*CHARACTER TYPES 1,RN 3,OM"),
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(dataset.characters().kind(1), Some(CharacterType::UnorderedMultistate));
    assert_eq!(dataset.characters().kind(3), Some(CharacterType::IntegerNumeric));
    let codes: Vec<ErrorCode> = dataset.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E0403, ErrorCode::E0403]);
}

#[test]
fn test_malformed_dependency_fails() {
    let err = Dataset::from_text(
        VIOLET_CHARACTERS,
        VIOLET_ITEMS,
        Some("*DEPENDENT CHARACTERS 4,0:5"),
        &ParseOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DeltaError::MalformedDirective { .. }), "{err}");
}

#[test]
fn test_unknown_attribute_character_is_reported() {
    let dataset = Dataset::from_text(
        VIOLET_CHARACTERS,
        "#Viola mystica/ 1,2 9,1",
        None,
        &ParseOptions::default(),
    )
    .unwrap();

    let diagnostics = dataset.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0404);
    assert!(diagnostics[0].message.contains("Viola mystica"));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_open_from_files() {
    let (_dir, paths) = violet_files();
    let dataset = Dataset::open(&paths, &ParseOptions::default()).unwrap();

    assert_eq!(dataset.characters().char_count(), 7);
    assert_eq!(dataset.items().item_count(), 4);
    assert_eq!(
        dataset.specifications().map(|specs| specs.implicit_value(1, 1)),
        Some(2)
    );
}

#[test]
fn test_open_without_specifications() {
    let (_dir, paths) = violet_files();
    let paths = DatasetPaths::new(paths.characters, paths.items);
    let dataset = Dataset::open(&paths, &ParseOptions::default()).unwrap();

    assert!(dataset.specifications().is_none());
    assert_eq!(dataset.characters().kind(3), Some(CharacterType::IntegerNumeric));
}

#[test]
fn test_missing_characters_file() {
    let (dir, paths) = violet_files();
    let paths = DatasetPaths::new(dir.path().join("nowhere"), paths.items);
    let err = Dataset::open(&paths, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, DeltaError::MissingResource { .. }), "{err}");
}

#[test]
fn test_missing_specifications_file() {
    let (dir, paths) = violet_files();
    let paths = paths.with_specifications(dir.path().join("nowhere"));
    let err = Dataset::open(&paths, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, DeltaError::MissingResource { .. }), "{err}");
}

#[test]
fn test_latin1_item_names() {
    let dir = TempDir::new().unwrap();
    let characters = write_file(dir.path(), "chars", "#1. habit/ 1. annual/ 2. perennial/\n");
    let items = write_file(dir.path(), "items", b"#Viola \xe9l\xe9gans/ 1,2\n");
    let dataset =
        Dataset::open(&DatasetPaths::new(characters, items), &ParseOptions::default()).unwrap();

    assert_eq!(dataset.items().name(1, false), "Viola élégans");
}

#[test]
fn test_text_attributes_need_option() {
    let items = "#Viola odorata/ 7<scented woodland>";
    let err = Dataset::from_text(VIOLET_CHARACTERS, items, None, &ParseOptions::default())
        .unwrap_err();
    assert!(matches!(err, DeltaError::MissingAlternatives { .. }), "{err}");

    let options = ParseOptions {
        allow_text_attributes: true,
        ..ParseOptions::default()
    };
    let dataset = Dataset::from_text(VIOLET_CHARACTERS, items, None, &options).unwrap();
    assert_eq!(dataset.items().attribute(1, 1), "7<scented woodland>");
}
