pub mod access_token_repo;
pub mod error;

pub use access_token_repo::PgAccessTokenRepo;
