use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpedienteError {
    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("invalid track '{0}': expected ordinario, despido or administrativo")]
    InvalidTrack(String),

    #[error("case not found: {0}")]
    CaseNotFound(i64),

    #[error("record store returned {status}: {body}")]
    Store { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExpedienteError>;
