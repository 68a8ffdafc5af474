/// Output of the ramp module while it waits for a trigger after the function has completed.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdleConfiguration {
    /// Keep the default value.
    #[default]
    DefaultValue = 0,
    /// Return to the value at the start of the function.
    Start = 1,
    /// Keep the value at the end of the function.
    End = 2,
    /// Play the function backwards, finishing at the start value.
    InverseRamp = 3,
}

impl IdleConfiguration {
    /// Converts the two bits of the control word.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::DefaultValue,
            1 => Self::Start,
            2 => Self::End,
            _ => Self::InverseRamp,
        }
    }

    /// Converts into the two bits of the control word.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}
