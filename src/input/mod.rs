//! Input processing module
//! Handles CSV reading, raw records, and dataset management

pub mod csv_reader;
pub mod manager;
pub mod raw_record;

pub use manager::DatasetManager;
pub use raw_record::RawRecord;
