mod recorder;
mod request;

pub use recorder::{RecordedScan, ScanRecorder};
pub use request::ScanRequest;
