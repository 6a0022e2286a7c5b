pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const SETTINGS_ENV_PREFIX: &str = "MAGSHELF";
    pub const SETTINGS_ENV_SEPARATOR: &str = "__";
}

pub const SESSION_COOKIE_NAME: &str = "connect.sid";
pub const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";
pub const OAUTH_STATE_TTL_SECONDS: i64 = 600;
pub const CONFIG_DIR: &str = "config";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@magshelf.app";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
