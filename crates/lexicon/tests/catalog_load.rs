//! Integration tests for loading catalogs from disk.

use std::fs;
use std::path::{Path, PathBuf};

use lexicon::{Catalog, IncludeError, LoadError, LoadOptions, args};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// End to End
// =========================================================================

#[test]
fn fixture_resolves_every_case() {
    let catalog = Catalog::load(fixture("translations.yml")).unwrap();
    assert!(catalog.errors().is_empty(), "{:?}", catalog.errors());
    assert!(catalog.include_errors().is_empty(), "{:?}", catalog.include_errors());

    let cases: &[(&str, &str, &str, Vec<lexicon::Value>)] = &[
        ("en", "hello", "Hello", args![]),
        ("lv", "hello", "Sveiki", args![]),
        ("en", "plural.demo", "One item", args![]),
        ("en", "plural.demo", "5 items", args![5]),
        ("lv", "plural.demo", "5 lietas", args![5]),
        ("en", "sub.hello", "Sub Hello", args![]),
        ("lv", "sub.hello", "Sub Sveiki", args![]),
        ("en", "sub3.hello", "Sub3 Hello", args![]),
        ("lv", "sub3.hello", "Sub3 Sveiki", args![]),
        (
            "en",
            "Same English text from Key",
            "Same English text from Key",
            args![],
        ),
        (
            "lv",
            "Same English text from Key",
            "Tas pats teksts no key",
            args![],
        ),
        ("en", "params", "1=1, 2=2.02 3=three", args![1, 2.02, "three"]),
        ("en", "EMPTY", "(en.EMPTY)", args![]),
        (
            "en",
            "haiku",
            "An old silent pond\nA frog jumps into the pond—\nSplash! Silence again.\n",
            args![],
        ),
    ];

    for (lang, key, expected, params) in cases {
        assert_eq!(
            &catalog.get(lang, key, params),
            expected,
            "lookup of {lang}.{key}"
        );
    }
}

#[test]
fn fixture_summary() {
    let catalog = Catalog::load(fixture("translations.yml")).unwrap();
    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.languages().collect::<Vec<_>>(), ["en", "lv"]);
    assert!(!catalog.contains_key("include"));
    assert!(catalog.describe().contains("Languages:     2 [en, lv]"));
    assert!(catalog.describe().contains("Translations:  7"));
}

#[test]
fn load_or_abort_returns_valid_catalog() {
    let catalog = Catalog::load_or_abort(fixture("translations.yml"));
    assert_eq!(catalog.get("lv", "hello", &[]), "Sveiki");
}

// =========================================================================
// Top-Level Failures
// =========================================================================

#[test]
fn missing_file_is_a_read_error() {
    let err = Catalog::load("/nonexistent/path/translations.yml").unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/path/translations.yml"));
}

#[test]
fn broken_yaml_is_a_syntax_error() {
    let err = Catalog::load(fixture("broken.yml")).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { .. }), "{err}");
    assert!(err.to_string().contains("broken.yml"));
}

#[test]
fn nested_mapping_translation_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.yml", "hello:\n  en:\n    deep: value\n");

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }), "{err}");
}

// =========================================================================
// Includes
// =========================================================================

#[test]
fn included_keys_are_merged() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.yml", "K:\n  en: From B\n");
    let base = write(
        &dir,
        "base.yml",
        "include:\n  b: [b.yml]\nhello:\n  en: Hello\n",
    );

    let catalog = Catalog::load(&base).unwrap();
    assert_eq!(catalog.get("en", "K", &[]), "From B");
    assert_eq!(catalog.get("en", "hello", &[]), "Hello");
}

#[test]
fn later_include_wins_on_collision() {
    let dir = TempDir::new().unwrap();
    write(&dir, "first.yml", "K:\n  en: First\n  lv: Pirmais\n");
    write(&dir, "second.yml", "K:\n  en: Second\n");
    let base = write(
        &dir,
        "base.yml",
        "include:\n  one: [first.yml]\n  two: [second.yml]\n",
    );

    let catalog = Catalog::load(&base).unwrap();
    assert_eq!(catalog.get("en", "K", &[]), "Second");
    // The whole key is replaced, not merged per language.
    assert_eq!(catalog.get("lv", "K", &[]), "(lv.K)");
}

#[test]
fn include_overrides_key_of_including_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "override.yml", "hello:\n  en: Overridden\n");
    let base = write(
        &dir,
        "base.yml",
        "hello:\n  en: Original\ninclude:\n  o: [override.yml]\n",
    );

    let catalog = Catalog::load(&base).unwrap();
    assert_eq!(catalog.get("en", "hello", &[]), "Overridden");
}

#[test]
fn include_paths_are_relative_to_including_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "deep/leaf.yml", "leaf:\n  en: Leaf\n");
    write(&dir, "deep/mid.yml", "include:\n  l: [leaf.yml]\nmid:\n  en: Mid\n");
    let base = write(&dir, "base.yml", "include:\n  m: [deep/mid.yml]\n");

    let catalog = Catalog::load(&base).unwrap();
    assert_eq!(catalog.get("en", "leaf", &[]), "Leaf");
    assert_eq!(catalog.get("en", "mid", &[]), "Mid");
}

#[test]
fn failed_include_is_skipped_and_recorded() {
    let dir = TempDir::new().unwrap();
    write(&dir, "broken.yml", "x: [unclosed\n");
    let base = write(
        &dir,
        "base.yml",
        "include:\n  a: [missing.yml]\n  b: [broken.yml]\nhello:\n  en: Hello\n",
    );

    let catalog = Catalog::load(&base).unwrap();
    assert_eq!(catalog.get("en", "hello", &[]), "Hello");

    let errors = catalog.include_errors();
    assert_eq!(errors.len(), 2);
    match &errors[0] {
        IncludeError::Load { source, .. } => assert!(matches!(**source, LoadError::Read { .. })),
        other => panic!("expected load error, got {other}"),
    }
    match &errors[1] {
        IncludeError::Load { source, .. } => {
            assert!(matches!(**source, LoadError::Syntax { .. }));
        }
        other => panic!("expected load error, got {other}"),
    }
    assert!(catalog.describe().contains("Includes failed: 2"));
}

#[test]
fn include_cycle_is_broken() {
    let catalog = Catalog::load(fixture("cycle_a.yml")).unwrap();
    assert_eq!(catalog.get("en", "from.a", &[]), "A");
    assert_eq!(catalog.get("en", "from.b", &[]), "B");

    let errors = catalog.include_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], IncludeError::Cycle { .. }), "{}", errors[0]);
}

#[test]
fn include_depth_is_limited() {
    let dir = TempDir::new().unwrap();
    write(&dir, "c.yml", "c:\n  en: C\n");
    write(&dir, "b.yml", "include:\n  c: [c.yml]\nb:\n  en: B\n");
    let base = write(&dir, "a.yml", "include:\n  b: [b.yml]\na:\n  en: A\n");

    let options = LoadOptions::builder().max_include_depth(1).build();
    let catalog = Catalog::load_with(&base, &options).unwrap();
    assert_eq!(catalog.get("en", "b", &[]), "B");
    assert_eq!(catalog.get("en", "c", &[]), "(en.c)");
    assert!(matches!(
        catalog.include_errors(),
        [IncludeError::DepthExceeded { max_depth: 1, .. }]
    ));
}

#[test]
fn languages_from_includes_are_registered() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ru.yml", "hello:\n  ru: Привет\n");
    let base = write(&dir, "base.yml", "include:\n  r: [ru.yml]\nbye:\n  en: Bye\n");

    let mut catalog = Catalog::load(&base).unwrap();
    assert_eq!(catalog.languages().collect::<Vec<_>>(), ["en", "ru"]);
    assert!(catalog.set_formatter("RU", |t: &str, _: &[lexicon::Value]| t.to_uppercase()).is_ok());
    assert_eq!(catalog.get("ru", "hello", &[]), "ПРИВЕТ");
}

// =========================================================================
// Loading From Strings
// =========================================================================

#[test]
fn load_str_resolves_includes_against_base_dir() {
    let dir = TempDir::new().unwrap();
    write(&dir, "extra.yml", "extra:\n  en: Extra\n");

    let catalog = Catalog::load_str("include:\n  e: [extra.yml]\n", dir.path()).unwrap();
    assert_eq!(catalog.get("en", "extra", &[]), "Extra");
}

#[test]
fn load_str_errors_name_the_string_source() {
    let err = Catalog::load_str("- not\n- a mapping\n", ".").unwrap_err();
    assert!(err.to_string().starts_with("<string>:"), "{err}");
}
