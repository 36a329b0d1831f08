#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },

    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
