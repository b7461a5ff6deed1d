use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("cannot read {path}: {source}")]
    StartupIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} line {line}: {message}")]
    DataFormat {
        table: &'static str,
        line: usize,
        message: String,
    },

    #[error("event '{0}' not found in budget table")]
    LookupNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
