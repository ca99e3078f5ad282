//! Persistence tests.

use anyhow::Result;
use repofolio::{ProjectRecord, store};
use std::fs;
use tempfile::TempDir;

fn record(repo: &str) -> ProjectRecord {
    ProjectRecord {
        repo: repo.to_string(),
        link: format!("https://github.com/ana/{}", repo),
        description: Some("Gestão de biblioteca".to_string()),
        title: Some("Biblioteca".to_string()),
        description_html: Some("<p>Empréstimos</p>".to_string()),
    }
}

#[test]
fn test_save_and_load_round_trip() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("projects.json");
    let mut partial = record("parcial");
    partial.title = None;
    partial.description_html = None;
    let records = vec![record("biblioteca"), partial];

    // Act
    store::save(&path, &records)?;
    let loaded = store::load(&path);

    // Assert
    assert_eq!(loaded, records);
    Ok(())
}

#[test]
fn test_save_writes_indented_unescaped_json() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("projects.json");

    // Act
    store::save(&path, &[record("biblioteca")])?;

    // Assert
    let content = fs::read_to_string(&path)?;
    assert!(content.starts_with("[\n"), "{}", content);
    assert!(content.contains("  {"), "{}", content);
    assert!(content.contains("Gestão de biblioteca"), "{}", content);
    assert!(content.contains("<p>Empréstimos</p>"), "{}", content);
    assert!(!content.contains("\\u00"), "{}", content);
    Ok(())
}

#[test]
fn test_save_omits_absent_fields() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("projects.json");
    let mut bare = record("sem-readme");
    bare.description = None;
    bare.title = None;
    bare.description_html = None;

    // Act
    store::save(&path, &[bare])?;

    // Assert
    let content = fs::read_to_string(&path)?;
    assert!(content.contains("\"repo\""));
    assert!(content.contains("\"link\""));
    assert!(!content.contains("description"));
    assert!(!content.contains("title"));
    Ok(())
}

#[test]
fn test_save_creates_parent_directories() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("data").join("nested").join("projects.json");

    // Act
    store::save(&path, &[])?;

    // Assert
    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path)?, "[]");
    Ok(())
}

#[test]
fn test_save_overwrites_existing_file() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("projects.json");
    store::save(&path, &[record("antigo"), record("outro")])?;

    // Act
    store::save(&path, &[record("novo")])?;

    // Assert
    let loaded = store::load(&path);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].repo, "novo");
    Ok(())
}

#[test]
fn test_load_missing_file_is_empty() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;

    // Act
    let loaded = store::load(temp.path().join("missing.json"));

    // Assert
    assert!(loaded.is_empty());
    Ok(())
}

#[test]
fn test_load_invalid_file_is_empty() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("projects.json");
    fs::write(&path, "{ not an array")?;

    // Act
    let loaded = store::load(&path);

    // Assert
    assert!(loaded.is_empty());
    Ok(())
}

#[test]
fn test_load_accepts_records_missing_optional_fields() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let path = temp.path().join("projects.json");
    fs::write(
        &path,
        r#"[{"repo":"a","link":"https://github.com/x/a","description_html":"<p>A</p>"}]"#,
    )?;

    // Act
    let loaded = store::load(&path);

    // Assert
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, None);
    assert_eq!(loaded[0].description_html.as_deref(), Some("<p>A</p>"));
    Ok(())
}
