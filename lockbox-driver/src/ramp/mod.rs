/// Strategies choosing the step count, increment and time step of a segment.
pub mod allocator;
mod control;
mod decoder;
mod encoder;
mod segment;
mod table;

pub use control::IdleConfiguration;
pub use decoder::{decode, decode_segments};
pub use encoder::RampEncoder;
pub use segment::RampSegment;
pub use table::RampTable;
