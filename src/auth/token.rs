use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Bearer token and the expiry the server declared for it.
///
/// Replaced wholesale on refresh. `expires_at == None` means the expiry
/// could not be determined and the token counts as already expired.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Empty,
    Valid,
    Expired,
}

impl Token {
    pub fn new(value: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { value, expires_at }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Valid iff non-empty and `now + skew < expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        self.state_at(now, skew) == TokenState::Valid
    }

    pub fn state_at(&self, now: DateTime<Utc>, skew: Duration) -> TokenState {
        if self.value.is_empty() {
            return TokenState::Empty;
        }
        match self.expires_at {
            Some(expires_at) if now + skew < expires_at => TokenState::Valid,
            _ => TokenState::Expired,
        }
    }
}

// token values never end up in logs
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &if self.value.is_empty() { "" } else { "<redacted>" })
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
