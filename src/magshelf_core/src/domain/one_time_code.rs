use rand::Rng;
use thiserror::Error;

const CODE_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OneTimeCodeError {
    #[error("OTP must be a 6-digit number")]
    InvalidFormat,
}

/// Six-digit numeric code mailed to prove control of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    pub fn new() -> Self {
        let value: u32 = rand::rng().random_range(100_000..=999_999);
        Self(value.to_string())
    }

    pub fn parse(code: impl AsRef<str>) -> Result<Self, OneTimeCodeError> {
        let code = code.as_ref().trim();
        if code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(code.to_owned()))
        } else {
            Err(OneTimeCodeError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OneTimeCode {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OneTimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
