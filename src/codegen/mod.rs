use std::path::Path;

use miette::{Context, IntoDiagnostic};

mod entropy;
mod mocks;
mod naming;
mod types;
mod walk;

pub use entropy::{MockRng, hashed_string};
pub use mocks::{generate_mocks, render_factory, render_mocks};
pub use naming::{article, factory_name, import_list, type_name};
pub use types::{generate_types, render_enum, render_interface};
pub use walk::{EmitContext, Property, PropertyEmitter, emit_properties};

/// Writes one generated artifact as `<file_name>.ts` under `folder`,
/// creating the directory if absent.
pub fn write_to_disk(folder: &Path, file_name: &str, contents: &str) -> miette::Result<()> {
    std::fs::create_dir_all(folder)
        .into_diagnostic()
        .with_context(|| format!("Failed to create directory `{}`", folder.display()))?;
    let path = folder.join(format!("{file_name}.ts"));
    std::fs::write(&path, contents)
        .into_diagnostic()
        .with_context(|| format!("Failed to write `{}`", path.display()))?;
    Ok(())
}
