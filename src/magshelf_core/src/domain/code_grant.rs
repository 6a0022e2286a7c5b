use chrono::{DateTime, Duration, Utc};

use super::one_time_code::OneTimeCode;

/// How long an issued code stays usable.
pub const CODE_TTL_MINUTES: i64 = 10;

/// A one-time code together with the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGrant {
    code: OneTimeCode,
    expires_at: DateTime<Utc>,
}

impl CodeGrant {
    pub fn issue(now: DateTime<Utc>) -> Self {
        Self {
            code: OneTimeCode::new(),
            expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
        }
    }

    pub fn from_parts(code: OneTimeCode, expires_at: DateTime<Utc>) -> Self {
        Self { code, expires_at }
    }

    pub fn code(&self) -> &OneTimeCode {
        &self.code
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    pub fn matches(&self, candidate: &OneTimeCode, now: DateTime<Utc>) -> bool {
        &self.code == candidate && self.is_live(now)
    }
}
