mod fleet;
mod frequency;

pub use fleet::{CrossTab, FleetReport};
pub use frequency::FrequencyTable;
