//! Catalog assembly tests over an in-memory source.

mod common;

use anyhow::Result;
use common::FakeSource;
use repofolio::{CatalogBuilder, Config, SkipReason, renormalize, store};
use std::time::Duration;
use tempfile::TempDir;

const PROJECT_README: &str = "# Gestor de Tarefas\n\
    \n\
    Aplicação para organizar tarefas.\n\
    ## Funcionalidades\n\
    - Criar tarefas\n\
    - Remover tarefas\n";

fn config(repositories: &[&str], temp: &TempDir) -> Config {
    Config {
        repositories: repositories.iter().map(|r| r.to_string()).collect(),
        output: temp.path().join("data").join("github_projects.json"),
        pause: Duration::ZERO,
        ..Config::default()
    }
}

#[test]
fn test_complete_record() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let source = FakeSource::new()
        .with_metadata("ana/tarefas", Some("Gestor de tarefas"), Some("main"))
        .with_readme("ana/tarefas", PROJECT_README);
    let builder = CatalogBuilder::new(&source, &config(&[], &temp));

    // Act
    let record = builder
        .process_location("https://github.com/ana/tarefas")
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Assert
    assert_eq!(record.repo, "tarefas");
    assert_eq!(record.link, "https://github.com/ana/tarefas");
    assert_eq!(record.description.as_deref(), Some("Gestor de tarefas"));
    assert_eq!(record.title.as_deref(), Some("Gestor de Tarefas"));

    let html = record.description_html.as_deref().unwrap_or_default();
    assert!(html.contains("<p>Aplicação para organizar tarefas.</p>"), "{}", html);
    assert!(html.contains("<li>Criar tarefas</li>"), "{}", html);
    assert!(!html.contains("Gestor de Tarefas"), "{}", html);

    assert_eq!(
        source.readme_calls(),
        vec![("ana/tarefas".to_string(), Some("main".to_string()))]
    );
    Ok(())
}

#[test]
fn test_metadata_failure_keeps_readme_fields() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let source = FakeSource::new().with_readme("ana/tarefas", PROJECT_README);
    let builder = CatalogBuilder::new(&source, &config(&[], &temp));

    // Act
    let record = builder
        .process_location("https://github.com/ana/tarefas")
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Assert
    assert_eq!(record.description, None);
    assert_eq!(record.title.as_deref(), Some("Gestor de Tarefas"));
    assert!(record.description_html.is_some());
    assert_eq!(source.readme_calls(), vec![("ana/tarefas".to_string(), None)]);
    Ok(())
}

#[test]
fn test_readme_failure_keeps_metadata_fields() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let source = FakeSource::new().with_metadata("ana/vazio", None, Some("main"));
    let builder = CatalogBuilder::new(&source, &config(&[], &temp));

    // Act
    let record = builder
        .process_location("https://github.com/ana/vazio")
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Assert
    assert_eq!(record.description.as_deref(), Some(""));
    assert_eq!(record.title, None);
    assert_eq!(record.description_html, None);
    Ok(())
}

#[test]
fn test_readme_without_heading_has_empty_title() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let source = FakeSource::new()
        .with_metadata("ana/notas", Some("Notas"), None)
        .with_readme("ana/notas", "Apenas texto.\n");
    let builder = CatalogBuilder::new(&source, &config(&[], &temp));

    // Act
    let record = builder
        .process_location("ana/notas")
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Assert
    assert_eq!(record.title.as_deref(), Some(""));
    assert_eq!(record.description_html.as_deref(), Some("<p>Apenas texto.</p>"));
    Ok(())
}

#[test]
fn test_malformed_location_is_skipped() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let source = FakeSource::new();
    let builder = CatalogBuilder::new(&source, &config(&[], &temp));

    // Act
    let result = builder.process_location("project");

    // Assert
    assert_eq!(
        result,
        Err(SkipReason::MalformedReference("project".to_string()))
    );
    Ok(())
}

#[test]
fn test_fetch_all_preserves_order_and_skips_malformed() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let source = FakeSource::new()
        .with_metadata("ana/zeta", Some("Z"), None)
        .with_metadata("ana/alfa", Some("A"), None);
    let builder = CatalogBuilder::new(&source, &config(&[], &temp)).with_pause(Duration::ZERO);

    // Act
    let records = builder.fetch_all([
        "https://github.com/ana/zeta",
        "nonsense",
        "https://github.com/ana/alfa",
        "https://github.com/ana/sem-dados",
    ]);

    // Assert
    let names: Vec<&str> = records.iter().map(|r| r.repo.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alfa", "sem-dados"]);
    assert_eq!(records[2].description, None);
    assert_eq!(records[2].title, None);
    Ok(())
}

#[test]
fn test_run_writes_output() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let config = config(
        &["https://github.com/ana/tarefas", "https://github.com/ana/vazio"],
        &temp,
    );
    let source = FakeSource::new()
        .with_metadata("ana/tarefas", Some("Gestor de tarefas"), Some("main"))
        .with_readme("ana/tarefas", PROJECT_README)
        .with_metadata("ana/vazio", None, None);

    // Act
    let summary = repofolio::run(&source, &config)?;

    // Assert
    assert_eq!(summary.records, 2);
    assert_eq!(summary.changed, 0);
    assert_eq!(summary.output, config.output);

    let stored = store::load(&config.output);
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].repo, "tarefas");
    assert_eq!(stored[1].repo, "vazio");
    assert_eq!(stored[1].description.as_deref(), Some(""));
    assert_eq!(stored[1].description_html, None);

    let raw = std::fs::read_to_string(&config.output)?;
    assert!(raw.contains("Aplicação"));
    assert!(!raw.contains("\"title\": null"));
    Ok(())
}

#[test]
fn test_run_output_is_fixed_point_of_renormalization() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let config = config(&["https://github.com/ana/lista"], &temp);
    let readme = "# Lista\n\
        [![build](https://img.shields.io/badge/build-ok-green.svg)](https://ci)\n\
        \n\
        Itens:\n\
        - Criar conta - Entrar - Sair\n\
        - **Perfil** - **Definições**\n";
    let source = FakeSource::new()
        .with_metadata("ana/lista", Some("Lista"), None)
        .with_readme("ana/lista", readme);
    repofolio::run(&source, &config)?;
    let mut stored = store::load(&config.output);
    let before = stored.clone();

    // Act
    let changed = renormalize(&mut stored);

    // Assert
    assert_eq!(changed, 0);
    assert_eq!(stored, before);

    let html = stored[0].description_html.as_deref().unwrap_or_default();
    assert!(!html.contains("shields.io"), "{}", html);
    assert!(html.contains("<li>Criar conta</li>"), "{}", html);
    assert!(html.contains("<li>Entrar</li>"), "{}", html);
    assert!(html.contains("<li><strong>Definições</strong></li>"), "{}", html);
    Ok(())
}

#[test]
fn test_run_replaces_previous_output() -> Result<()> {
    // Arrange
    let temp = TempDir::new()?;
    let config = config(&["https://github.com/ana/novo"], &temp);
    std::fs::create_dir_all(temp.path().join("data"))?;
    std::fs::write(&config.output, r#"[{"repo":"antigo","link":"x"}]"#)?;
    let source = FakeSource::new().with_metadata("ana/novo", Some("Novo"), None);

    // Act
    repofolio::run(&source, &config)?;

    // Assert
    let stored = store::load(&config.output);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].repo, "novo");
    Ok(())
}
