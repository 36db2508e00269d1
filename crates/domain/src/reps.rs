/// Reps per set, either a fixed count (`"10"`) or a range (`"8-12"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepScheme {
    pub min: u32,
    pub max: u32,
    pub is_range: bool,
}

impl RepScheme {
    /// Ranges are not checked for `min <= max`, a reversed range is kept as given.
    pub fn parse(token: &str) -> Result<Self, RepSchemeError> {
        let invalid = || RepSchemeError::Invalid(token.to_string());

        if let Some((min, max)) = token.split_once('-') {
            let min = min.trim().parse::<u32>().map_err(|_| invalid())?;
            let max = max.trim().parse::<u32>().map_err(|_| invalid())?;
            return Ok(Self {
                min,
                max,
                is_range: true,
            });
        }

        let reps = token.trim().parse::<u32>().map_err(|_| invalid())?;

        Ok(Self {
            min: reps,
            max: reps,
            is_range: false,
        })
    }
}

impl TryFrom<&str> for RepScheme {
    type Error = RepSchemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        RepScheme::parse(value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepSchemeError {
    #[error("invalid rep scheme \"{0}\"")]
    Invalid(String),
}
