#![warn(missing_docs)]

//! Emulator of the lockbox FPGA: a register memory with fault injection and behavioural models of
//! the ramp and linearizer modules.

mod linearizer;
mod memory;
mod ramp;

pub use linearizer::LinearizerEmulator;
pub use memory::RegisterMemory;
pub use ramp::RampEmulator;
