//! File-level collaborators of the YARS-PG codec: RDF text formats and
//! compression filters. Everything works on whole in-memory buffers.

pub mod compress;
pub mod error;
pub mod rdf;

pub use compress::{compress, decompress, Compression};
pub use error::{IoError, Result};
pub use rdf::{read_graph, write_graph, RdfFormat};
