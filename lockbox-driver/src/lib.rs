#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Driver of the lockbox ramp and linearizer modules: segment allocation, table encoding and the register operations.

/// Data written to the device.
pub mod datagram;
mod device;
/// Error type of the driver.
pub mod error;
/// Calibration tables of the linearizer module.
pub mod linearizer;
/// Register writes and reads of the modules.
pub mod operation;
/// Segment tables of the ramp module.
pub mod ramp;

pub use device::Device;
