#[derive(Debug, thiserror::Error)]
pub enum SerdeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    JsonWithPath(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    YamlWithPath(#[from] serde_path_to_error::Error<serde_yaml::Error>),
}

/// The document matches neither the Swagger 2 nor the OpenAPI 3 shape.
///
/// This is the only fatal error in the generator core; everything else is
/// recovered inline as placeholder text in the generated source.
#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error(
    "document matches neither `swagger: 2.*` + `definitions` nor `openapi: 3.*` + `components`"
)]
pub struct UnsupportedVersionError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
