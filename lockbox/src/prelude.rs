pub use crate::{
    controller::{Controller, ControllerBuilder},
    error::LockboxError,
};

pub use lockbox_core::{
    breakpoint::{Breakpoint, Breakpoints},
    config::{LinearizerConfig, RampConfig},
    register::RegisterFile,
};

pub use lockbox_driver::{
    datagram::{Datagram, LinearizerFunction, RampControl, RampFunction},
    error::LockboxDriverError,
    linearizer::{LinearizerSegment, LinearizerTable},
    ramp::{
        allocator::{DirectScan, RatioSearch, SegmentAllocator},
        IdleConfiguration, RampSegment, RampTable,
    },
    Device,
};

#[cfg(feature = "emulator")]
pub use lockbox_emulator::{LinearizerEmulator, RampEmulator, RegisterMemory};
