//! Plain-text bodies for the one-time-code mails.

use askama::Template;
use magshelf_core::{CODE_TTL_MINUTES, OneTimeCode};

pub const REGISTRATION_SUBJECT: &str = "Your OTP for Registration";
pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset OTP";

#[derive(Template)]
#[template(
    source = "Your OTP is {{ code }}. It is valid for {{ ttl_minutes }} minutes.",
    ext = "txt"
)]
struct RegistrationCodeEmail<'a> {
    code: &'a str,
    ttl_minutes: i64,
}

#[derive(Template)]
#[template(
    source = "Your OTP for password reset is {{ code }}. It is valid for {{ ttl_minutes }} minutes.",
    ext = "txt"
)]
struct PasswordResetCodeEmail<'a> {
    code: &'a str,
    ttl_minutes: i64,
}

pub fn registration_body(code: &OneTimeCode) -> Result<String, askama::Error> {
    RegistrationCodeEmail {
        code: code.as_str(),
        ttl_minutes: CODE_TTL_MINUTES,
    }
    .render()
}

pub fn password_reset_body(code: &OneTimeCode) -> Result<String, askama::Error> {
    PasswordResetCodeEmail {
        code: code.as_str(),
        ttl_minutes: CODE_TTL_MINUTES,
    }
    .render()
}
