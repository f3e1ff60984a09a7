use miette::{Context, IntoDiagnostic, Result};
use mimicry::codegen::{generate_mocks, generate_types, write_to_disk};
use mimicry::fetch::fetch_document;
use mimicry::parse::{Document, OverrideSchemas};
use tracing_subscriber::EnvFilter;

mod config;

use self::config::{Command, Generate, Main};

fn main() -> Result<()> {
    let Ok(main) = Main::parse().map_err(|err| err.exit());

    let default_level = if main.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match main.command {
        Command::Generate(command) => generate(command),
    }
}

fn generate(command: Generate) -> Result<()> {
    let doc = load_document(&command.input)?;
    let overrides = load_overrides(command.overrides.as_deref())?;

    let schema_count = doc
        .schemas()
        .into_diagnostic()
        .context("Failed to detect the document version")?
        .len();
    println!("Generating {schema_count} schema types...");

    let types = generate_types(&doc, &overrides).into_diagnostic()?;
    let mocks = generate_mocks(&doc, &overrides, &command.types_path).into_diagnostic()?;

    println!(
        "Writing generated code to `{}`...",
        command.output.display()
    );
    write_to_disk(&command.output, &command.types_file, &types)?;
    write_to_disk(&command.output, &command.mocks_file, &mocks)?;

    println!("Generation complete");
    Ok(())
}

fn load_document(input: &str) -> Result<Document> {
    if input.starts_with("http://") || input.starts_with("https://") {
        fetch_document(input)
            .into_diagnostic()
            .with_context(|| format!("Failed to fetch `{input}`"))
    } else {
        let source = std::fs::read_to_string(input)
            .into_diagnostic()
            .with_context(|| format!("Failed to read `{input}`"))?;
        Document::from_yaml(&source)
            .into_diagnostic()
            .context("Failed to parse the schema document")
    }
}

fn load_overrides(path: Option<&std::path::Path>) -> Result<OverrideSchemas> {
    let Some(path) = path else {
        return Ok(OverrideSchemas::default());
    };
    let contents = std::fs::read_to_string(path)
        .into_diagnostic()
        .with_context(|| format!("Failed to read `{}`", path.display()))?;
    serde_json::from_str(&contents)
        .into_diagnostic()
        .with_context(|| format!("Failed to parse `{}`", path.display()))
}
