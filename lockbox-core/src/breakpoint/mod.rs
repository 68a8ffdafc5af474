mod error;

pub use error::BreakpointError;

use derive_more::Deref;
use derive_new::new;

/// An anchor point of a piecewise-linear curve.
///
/// For a ramp, `x` is the time in seconds and `y` the output value.
/// For a linearizer, `x` is the input and `y` the output.
#[derive(Clone, Copy, Debug, PartialEq, Default, new)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    /// Abscissa.
    pub x: f64,
    /// Ordinate.
    pub y: f64,
}

impl From<(f64, f64)> for Breakpoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An ordered list of [`Breakpoint`]s.
#[derive(Clone, Debug, PartialEq, Default, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    /// Creates a new [`Breakpoints`] without validation.
    #[must_use]
    pub const fn new(points: Vec<Breakpoint>) -> Self {
        Self(points)
    }

    /// Creates a new [`Breakpoints`] from separate abscissa and ordinate lists.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, BreakpointError> {
        if x.len() != y.len() {
            return Err(BreakpointError::LengthMismatch(x.len(), y.len()));
        }
        Ok(x.iter().zip(y.iter()).map(|(&x, &y)| (x, y)).collect())
    }

    /// Abscissae.
    pub fn x(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.x)
    }

    /// Ordinates.
    pub fn y(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.y)
    }

    /// Splits into separate abscissa and ordinate lists.
    #[must_use]
    pub fn into_xy(self) -> (Vec<f64>, Vec<f64>) {
        self.0.into_iter().map(|p| (p.x, p.y)).unzip()
    }

    /// Consumes and returns the inner list.
    #[must_use]
    pub fn into_inner(self) -> Vec<Breakpoint> {
        self.0
    }

    /// Checks that the list describes a waveform over time: at least one point, all coordinates
    /// finite, times non-negative and strictly increasing.
    pub fn validate_timeline(&self) -> Result<(), BreakpointError> {
        self.validate_increasing(1)?;
        match self.0.first() {
            Some(p) if p.x < 0.0 => Err(BreakpointError::NegativeTime(0, p.x)),
            _ => Ok(()),
        }
    }

    /// Checks that the list describes a function: at least `min_len` points, all coordinates
    /// finite and abscissae strictly increasing.
    pub fn validate_increasing(&self, min_len: usize) -> Result<(), BreakpointError> {
        if self.0.len() < min_len {
            return Err(BreakpointError::TooFew(min_len, self.0.len()));
        }
        if let Some((i, p)) = self
            .0
            .iter()
            .enumerate()
            .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(BreakpointError::NotFinite(i, p.x, p.y));
        }
        self.0
            .windows(2)
            .enumerate()
            .try_for_each(|(i, w)| match w {
                [a, b] if b.x <= a.x => Err(BreakpointError::NotIncreasing(i + 1, b.x, a.x)),
                _ => Ok(()),
            })
    }
}

impl FromIterator<Breakpoint> for Breakpoints {
    fn from_iter<T: IntoIterator<Item = Breakpoint>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<(f64, f64)> for Breakpoints {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(Breakpoint::from).collect())
    }
}

impl<P: Into<Breakpoint>> From<Vec<P>> for Breakpoints {
    fn from(points: Vec<P>) -> Self {
        Self(points.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<Breakpoint>, const N: usize> From<[P; N]> for Breakpoints {
    fn from(points: [P; N]) -> Self {
        Self(points.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Breakpoints {
    type Item = Breakpoint;
    type IntoIter = std::vec::IntoIter<Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
