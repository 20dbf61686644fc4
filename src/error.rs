use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuinticError {
    /// Rejected search parameters. Reported once, before any table is built.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error from the reporting side.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
