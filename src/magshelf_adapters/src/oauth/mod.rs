pub mod google_identity_provider;

pub use google_identity_provider::{GoogleEndpoints, GoogleIdentityProvider};
