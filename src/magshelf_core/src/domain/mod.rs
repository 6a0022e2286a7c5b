pub mod account;
pub mod code_grant;
pub mod email;
pub mod ids;
pub mod magazine;
pub mod one_time_code;
pub mod password;
pub mod session;
pub mod upload;
