//! Result persistence
//!
//! Writes fetched records to timestamped JSON and CSV files. JSON keeps
//! full fidelity; CSV flattens a fixed column set, joining list-valued
//! creative fields with a delimiter.

mod writer;

pub use writer::{
    joined_field, text_field, write_csv, write_json, ExportConfig, ExportPaths, Exporter,
};
