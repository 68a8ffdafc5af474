use thiserror::Error;

#[derive(Error, Debug, PartialEq, Copy, Clone)]
/// An error produced by validating a breakpoint list.
pub enum BreakpointError {
    /// Fewer breakpoints than required.
    #[error("At least {0} breakpoints are required, but {1} are given")]
    TooFew(usize, usize),
    /// Abscissa and ordinate lists differ in length.
    #[error("Length of x ({0}) and y ({1}) must be the same")]
    LengthMismatch(usize, usize),
    /// A coordinate is NaN or infinite.
    #[error("Breakpoint {0} ({1}, {2}) is not finite")]
    NotFinite(usize, f64, f64),
    /// A time is negative.
    #[error("Time of breakpoint {0} ({1}) must not be negative")]
    NegativeTime(usize, f64),
    /// An abscissa does not strictly increase.
    #[error("Breakpoint {0} ({1}) must be greater than the previous one ({2})")]
    NotIncreasing(usize, f64, f64),
}
