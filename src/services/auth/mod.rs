pub mod authenticator;
pub mod claims;
pub mod context;
pub mod error;
pub mod factory;
pub mod keys;
pub mod locator;
pub mod parser;
pub mod revocation;
pub mod verifier;

pub use authenticator::Authenticator;
pub use context::AuthenticatedContext;
pub use error::AuthError;
pub use factory::build_authenticator;
pub use keys::{PublicKeySource, RsaPublicKey};
pub use revocation::AccessTokenRepository;
