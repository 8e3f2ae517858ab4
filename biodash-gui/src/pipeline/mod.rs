//! Background fetch workers.

mod fetch;

pub use fetch::{fetch_measurements_worker, fetch_metadata_worker, load_names_worker};
