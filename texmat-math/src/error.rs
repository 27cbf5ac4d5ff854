/// Error categories.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A vector that must be normalized has zero length.
    #[error("Cannot normalize zero-length {vector} vector")]
    ZeroLength { vector: &'static str },

    /// More than one rotation axis was selected.
    #[error("Ambiguous rotation axis: {count} axes selected, exactly one required")]
    AmbiguousAxis { count: u8 },
}

impl MathError {
    pub fn zero_length(vector: &'static str) -> Self {
        Self::ZeroLength { vector }
    }

    pub fn ambiguous_axis(count: u8) -> Self {
        Self::AmbiguousAxis { count }
    }
}
