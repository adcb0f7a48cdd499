//! End-to-end tests over the engine surface: config roots, discovery,
//! prompt rendering, and scaffold instantiation working together.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use forgekit_core::{
    ForgeConfig, ForgeError, PromptLibrary, RenderContext, ScaffoldManager, TemplateDefinition,
    TemplateKind, TemplateMetadata,
};

fn ctx(pairs: &[(&str, &str)]) -> RenderContext {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write_scaffold(templates_dir: &Path) {
    let tpl = templates_dir.join("py-service");
    fs::create_dir_all(tpl.join("files/src")).unwrap();
    fs::write(
        tpl.join("template.json"),
        r#"{
  "name": "py-service",
  "description": "Minimal Python service",
  "category": "project",
  "version": "0.1.0",
  "author": "forgekit contributors",
  "tags": ["python"],
  "variables": {"project_name": "Project name", "service_port": "TCP port"}
}"#,
    )
    .unwrap();
    fs::write(
        tpl.join("files/src/{{ project_name }}.py"),
        "PORT = {{ service_port }}\n",
    )
    .unwrap();
    fs::write(tpl.join("files/README.md"), "# {{ project_name }}\n").unwrap();
}

fn write_prompt(prompts_dir: &Path, file: &str, name: &str, category: &str) {
    let json = format!(
        r#"{{
  "metadata": {{
    "name": "{name}",
    "description": "greeting",
    "category": "{category}",
    "version": "1.0.0",
    "author": "forgekit contributors",
    "tags": ["greeting"],
    "variables": {{"name": "Who to greet"}}
  }},
  "content": "Hello {{{{ name }}}}!"
}}"#
    );
    fs::write(prompts_dir.join(file), json).unwrap();
}

#[test]
fn full_scaffold_flow() {
    let base = tempfile::tempdir().unwrap();
    let config = ForgeConfig::under(base.path());
    config.ensure_roots().unwrap();
    write_scaffold(&config.templates_dir);

    let mut manager = ScaffoldManager::new(&config.templates_dir);
    let report = manager.discover().unwrap();
    assert_eq!(report.loaded, 1);

    let target = config.output_dir.join("my-service");
    let context = ctx(&[("project_name", "billing"), ("service_port", "8080")]);
    let created = manager.instantiate("py-service", &target, &context).unwrap();
    assert!(!created.is_empty());
    assert_eq!(
        fs::read_to_string(target.join("src/billing.py")).unwrap(),
        "PORT = 8080\n"
    );
    assert_eq!(
        fs::read_to_string(target.join("README.md")).unwrap(),
        "# billing\n"
    );

    // Idempotent re-instantiation into the now-existing target
    manager.instantiate("py-service", &target, &context).unwrap();
    assert_eq!(
        fs::read_to_string(target.join("src/billing.py")).unwrap(),
        "PORT = 8080\n"
    );
}

#[test]
fn scaffold_aborts_cleanly_on_missing_variable() {
    let base = tempfile::tempdir().unwrap();
    let config = ForgeConfig::under(base.path());
    config.ensure_roots().unwrap();
    write_scaffold(&config.templates_dir);

    let mut manager = ScaffoldManager::new(&config.templates_dir);
    manager.discover().unwrap();

    let target = config.output_dir.join("half-baked");
    let err = manager
        .instantiate("py-service", &target, &ctx(&[("project_name", "billing")]))
        .unwrap_err();
    match err {
        ForgeError::MissingVariable { variable } => assert_eq!(variable, "service_port"),
        other => panic!("expected MissingVariable, got {other:?}"),
    }
    assert!(!target.exists());
    // Nothing staged left behind in the output root either
    assert_eq!(fs::read_dir(&config.output_dir).unwrap().count(), 0);
}

#[test]
fn prompt_library_flow() {
    let base = tempfile::tempdir().unwrap();
    let config = ForgeConfig::under(base.path());
    config.ensure_roots().unwrap();
    write_prompt(&config.prompts_dir, "hello_system.json", "hello-system", "system");
    write_prompt(&config.prompts_dir, "hello_user.json", "hello-user", "user");
    fs::write(config.prompts_dir.join("broken.json"), "{").unwrap();

    let mut library = PromptLibrary::new(&config.prompts_dir);
    let report = library.discover().unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 1);

    assert_eq!(library.list(Some(TemplateKind::System)), ["hello-system"]);
    assert_eq!(
        library.render("hello-user", &ctx(&[("name", "User")])).unwrap(),
        "Hello User!"
    );

    // Save a new prompt and use it without rediscovery
    let metadata = TemplateMetadata::new("farewell", "goodbye", TemplateKind::System, "1.0.0")
        .unwrap()
        .with_author("forgekit contributors")
        .with_tag("greeting")
        .with_variable("name", "Who to send off");
    let farewell = TemplateDefinition::prompt(metadata, "Goodbye {{ name }}.");
    library.save(&farewell).unwrap();
    assert_eq!(
        library.render("farewell", &ctx(&[("name", "User")])).unwrap(),
        "Goodbye User."
    );

    // A later discovery pass over the same root picks the saved prompt up
    let mut second = PromptLibrary::new(&config.prompts_dir);
    second.discover().unwrap();
    assert!(second.get("farewell").is_some());
}

#[test]
fn metadata_validation_is_advisory() {
    let metadata = TemplateMetadata::new("incomplete", "no tags", TemplateKind::System, "1.0.0")
        .unwrap()
        .with_author("someone")
        .with_variable("x", "a variable");
    let def = TemplateDefinition::prompt(metadata, "{{ x }}");
    // Construction succeeded, validation reports the gap
    assert!(!def.validate());
    assert_eq!(def.validation_errors().len(), 1);

    let variables: BTreeMap<String, String> = def.metadata.variables.clone();
    assert!(variables.contains_key("x"));
}
