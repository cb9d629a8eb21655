mod attributes;
mod device_id;
mod entity;
mod filter;
mod grade;
mod repository;

pub use attributes::{
    DEFAULT_STATUS, NOT_APPLICABLE, NormalizedAttributes, ScanAttributes, UNKNOWN, or_placeholder,
};
pub use device_id::DeviceId;
pub use entity::{NewScan, ScanListing, ScanRecord, scan_confirmation};
pub use filter::ScanFilter;
pub use grade::Grade;
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockScanRepository;
pub use repository::ScanRepository;
