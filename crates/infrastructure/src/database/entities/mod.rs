pub mod scan_records;
pub mod sessions;
