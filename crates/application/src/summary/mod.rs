mod service;

pub use service::SummaryService;
