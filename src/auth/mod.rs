//! Login: credentials in, session out

pub mod credentials;
pub mod login;

pub use credentials::Credentials;
pub use login::Authenticator;
