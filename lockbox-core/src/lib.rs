#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Core types for the lockbox FPGA modules: the fixed-point codec, register fields and the device configuration.

/// Breakpoint lists describing piecewise-linear curves.
pub mod breakpoint;
/// Immutable configuration of the ramp and linearizer modules.
pub mod config;
/// Common constants.
pub mod defined;
/// Fixed-point encoding of register fields.
pub mod fixed_point;
/// Register fields, register files and transactions.
pub mod register;
