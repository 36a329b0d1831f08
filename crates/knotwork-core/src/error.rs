pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] knotwork_layout::Error),

    #[error("Unknown restore type: {restore_type}")]
    UnknownRestoreType { restore_type: String },

    #[error("Malformed restore record ({restore_type}): {message}")]
    MalformedRestore {
        restore_type: String,
        message: String,
    },

    #[error("Edge would connect node {node_id} to itself")]
    SelfLoop { node_id: String },

    #[error("Invalid settings: {message}")]
    Settings { message: String },
}
