use std::{
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

use clap::{
    CommandFactory, FromArgMatches,
    error::{ErrorKind as ClapErrorKind, Result as ClapResult},
};
use serde::Deserialize;

const DEFAULT_TYPES_FILE: &str = "types";
const DEFAULT_MOCKS_FILE: &str = "mocks";
const DEFAULT_TYPES_PATH: &str = "./types";

#[derive(Debug)]
pub struct Main {
    pub verbose: bool,
    pub command: Command,
}

impl Main {
    /// Parses command-line arguments, resolving generated-file options
    /// against an optional `.mimicry.toml` in the output directory.
    /// Command-line values win over the config file.
    pub fn parse() -> ClapResult<Main> {
        let mut cmd = MainArgs::command();
        let mut matches = cmd
            .try_get_matches_from_mut(std::env::args_os())
            .map_err(|err| err.format(&mut cmd))?;
        let args =
            MainArgs::from_arg_matches_mut(&mut matches).map_err(|err| err.format(&mut cmd))?;

        let command = match args.command {
            CommandArgs::Generate(GenerateArgs {
                input,
                output,
                files,
                overrides,
            }) => {
                let file = match ConfigFile::from_output_dir(&output) {
                    Ok(file) => file,
                    Err(ConfigFileError::Parse(path, err)) => {
                        return Err(cmd.error(
                            ClapErrorKind::ValueValidation,
                            format!("Failed to parse `{}`: {err}", path.display()),
                        ));
                    }
                    Err(ConfigFileError::Io(path, err)) => {
                        return Err(cmd.error(
                            ClapErrorKind::Io,
                            format!("Failed to read `{}`: {err}", path.display()),
                        ));
                    }
                };
                let file = file.unwrap_or_default();

                Command::Generate(Generate {
                    input,
                    output,
                    types_file: files
                        .types_file
                        .or(file.types_file)
                        .unwrap_or_else(|| DEFAULT_TYPES_FILE.to_owned()),
                    mocks_file: files
                        .mocks_file
                        .or(file.mocks_file)
                        .unwrap_or_else(|| DEFAULT_MOCKS_FILE.to_owned()),
                    types_path: files
                        .types_path
                        .or(file.types_path)
                        .unwrap_or_else(|| DEFAULT_TYPES_PATH.to_owned()),
                    overrides,
                })
            }
        };

        Ok(Main {
            verbose: args.verbose,
            command,
        })
    }
}

#[derive(Debug)]
pub enum Command {
    Generate(Generate),
}

#[derive(Debug)]
pub struct Generate {
    /// A file path or an `http(s)` URL.
    pub input: String,
    pub output: PathBuf,
    pub types_file: String,
    pub mocks_file: String,
    pub types_path: String,
    pub overrides: Option<PathBuf>,
}

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct MainArgs {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: CommandArgs,
}

#[derive(Debug, clap::Subcommand)]
enum CommandArgs {
    /// Generate TypeScript types and mock factories from an OpenAPI document.
    Generate(GenerateArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// The OpenAPI document: a `.yaml`/`.json` path, or an `http(s)` URL.
    input: String,

    /// The output directory for the generated files.
    output: PathBuf,

    #[command(flatten)]
    files: GenerateFileArgs,

    /// A JSON file with override schemas: an ordered list of single-entry
    /// `{name: schema}` objects that replace the document's definitions.
    #[arg(long)]
    overrides: Option<PathBuf>,
}

#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Generated file options")]
struct GenerateFileArgs {
    /// File name (without extension) for the type declarations.
    /// Defaults to the `.mimicry.toml` value, or `types`.
    #[arg(long)]
    types_file: Option<String>,

    /// File name (without extension) for the mock factories.
    /// Defaults to the `.mimicry.toml` value, or `mocks`.
    #[arg(long)]
    mocks_file: Option<String>,

    /// Module path the mocks file imports the generated types from.
    /// Defaults to the `.mimicry.toml` value, or `./types`.
    #[arg(long)]
    types_path: Option<String>,
}

/// An optional `.mimicry.toml` next to the generated output.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConfigFile {
    #[serde(default)]
    types_file: Option<String>,
    #[serde(default)]
    mocks_file: Option<String>,
    #[serde(default)]
    types_path: Option<String>,
}

enum ConfigFileError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl ConfigFile {
    fn from_output_dir(output: &Path) -> Result<Option<Self>, ConfigFileError> {
        let path = output.join(".mimicry.toml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .map(Some)
                .map_err(|err| ConfigFileError::Parse(path, err)),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigFileError::Io(path, err)),
        }
    }
}
