//! The error type that is shared by all of the passes in this crate. Every
//! failure is fatal for the computation that raised it: no pass returns a
//! partial layout.

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("malformed input: the {phase} ran out of ready nodes after {done} of {total} nodes (is the graph cyclic?)")]
    MalformedInput {
        phase: &'static str,
        done: usize,
        total: usize,
    },

    #[error("invalid layer width {0}, the width must be at least 1")]
    InvalidWidth(usize),

    #[error("the edge {from} -> {to} refers to a node outside of 0..{num_nodes}")]
    InvalidNode {
        from: usize,
        to: usize,
        num_nodes: usize,
    },

    #[error("layer optimization failed: {0}")]
    Solver(String),

    #[error("bad GraphML input: {0}")]
    GraphMl(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
