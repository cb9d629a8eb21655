mod csv_export;

pub use csv_export::{detail_csv, write_detail_csv};
