//! Error types for graph construction and partitioning.

use crate::VertexId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {0} does not belong to this graph")]
    UnknownVertex(VertexId),

    #[error("vertices {0} and {1} are already adjacent")]
    DuplicateEdge(VertexId, VertexId),

    #[error("no paths between source and sink, nothing to saturate")]
    EmptyPathSet,

    #[error("edge weights were consumed by a previous saturation run, call reset_weights first")]
    StaleWeightState,
}

pub type Result<T> = std::result::Result<T, GraphError>;
