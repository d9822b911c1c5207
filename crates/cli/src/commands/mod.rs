//! One module per tool family, mirroring the subcommand tree.

pub mod bigquery;
pub mod firestore;
pub mod looker;
pub mod tools;
