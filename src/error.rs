use thiserror::Error;

/// Every way reading, building or classifying a graph can fail.
///
/// None of these are recoverable: the caller is expected to stop processing
/// the stream and report the message.
#[derive(Error, Debug)]
pub enum PlanarCodeError {
    // =============== framing ===============

    #[error("can't read header: stream holds fewer than 13 bytes")]
    HeaderTooShort,

    #[error("no planar code header detected (found {found:?})")]
    MissingHeader { found: String },

    #[error("interior header is not terminated by '<<'")]
    UnterminatedHeader,

    #[error("problems with header: single '<' followed by {found:#04x}")]
    SingleHeaderDelimiter { found: u8 },

    #[error("unexpected end of stream while reading vertex {vertex}")]
    UnexpectedEof { vertex: usize },

    #[error("vertex {vertex} lists neighbour {neighbour}, but the graph has only {vertex_count} vertices")]
    NeighbourOutOfRange {
        vertex: usize,
        neighbour: usize,
        vertex_count: usize,
    },

    // =============== bounds ===============

    #[error("vertex count {count} is outside 1..={max}")]
    VertexCountOutOfRange { count: usize, max: usize },

    #[error("vertex {vertex} has more than {max} neighbours")]
    DegreeTooLarge { vertex: usize, max: usize },

    // =============== consistency ===============

    #[error("error while looking for edge from {from} to {to}")]
    InverseNotFound { from: usize, to: usize },

    #[error("cluster sizes {frequencies:?} do not form a partition of 12")]
    UnknownPartition { frequencies: [u8; 12] },

    #[error("there is no partition with number {ordinal} (valid numbers are 0..{count})")]
    PartitionOrdinalOutOfRange { ordinal: usize, count: usize },

    #[error("graph {graph} has {vertex_count} vertices; only pentagonal adjacency graphs of fullerenes (12 vertices) are supported")]
    NotTwelveVertices { graph: usize, vertex_count: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanarCodeError>;
