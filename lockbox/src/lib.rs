#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Lockbox: encodes piecewise-linear ramps and calibration curves into the segment tables of the
//! FPGA ramp and linearizer modules.

/// [`Controller`] module.
pub mod controller;
/// Error module.
pub mod error;
/// Commonly used types.
pub mod prelude;

pub use lockbox_driver as driver;

#[cfg(feature = "emulator")]
#[cfg_attr(docsrs, doc(cfg(feature = "emulator")))]
pub use lockbox_emulator as emulator;

pub use controller::Controller;
