/// Frame sinks: in-memory capture and PNG sequences.
pub mod sink;
