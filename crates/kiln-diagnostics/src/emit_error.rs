//! Errors raised while serializing a resolved, analyzed program to `PNGB`.

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("shader data_id {data_id} has no corresponding fragment")]
    MissingShaderFragment { data_id: u16 },

    #[error("data_id count {count} exceeds the u16 id space")]
    TooManyShaders { count: usize },

    #[error("{0}")]
    Emitter(String),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
