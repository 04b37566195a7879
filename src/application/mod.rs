pub mod ports;
pub mod records;
pub mod usecases;

pub use ports::*;
pub use records::RecordStore;
