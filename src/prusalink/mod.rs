pub mod classifier;
pub mod client;
pub mod family;
pub mod printer;
pub mod snapshot;
pub mod state;
pub mod types;

pub use classifier::{classify, Classification};
pub use client::{ClientConfig, EndpointClient};
pub use family::FirmwareFamily;
pub use printer::Printer;
