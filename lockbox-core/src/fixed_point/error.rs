use thiserror::Error;

#[derive(Error, Debug, PartialEq, Copy, Clone)]
/// An error produced by the fixed-point codec.
pub enum FixedPointError {
    /// Value is out of the representable range.
    #[error("Value ({0}) is out of range ([{1}, {2}])")]
    Overflow(f64, f64, f64),
    /// Value is NaN or infinite.
    #[error("Value ({0}) is not finite")]
    NotFinite(f64),
}
