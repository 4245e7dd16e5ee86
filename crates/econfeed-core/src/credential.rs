use std::fmt::{Debug, Formatter};

use crate::ValidationError;

const GUEST_SENTINEL: &str = "guest";
const GUEST_CREDENTIAL: &str = "guest:guest";
const SEPARATOR: char = ':';

/// API credential in `<identity>:<secret>` form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate a credential string. The bare `guest` sentinel maps to guest access.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed == GUEST_SENTINEL {
            return Ok(Self::guest());
        }
        if !trimmed.contains(SEPARATOR) {
            return Err(ValidationError::CredentialMissingSeparator);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn guest() -> Self {
        Self(String::from(GUEST_CREDENTIAL))
    }

    pub fn is_guest(&self) -> bool {
        self.0 == GUEST_CREDENTIAL
    }

    pub fn identity(&self) -> &str {
        self.0.split_once(SEPARATOR).map_or(self.0.as_str(), |(id, _)| id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential({}:***)", self.identity())
    }
}

impl TryFrom<&str> for Credential {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Credential {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
