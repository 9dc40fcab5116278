pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod gpg;
pub mod migrate;
pub mod record;
pub mod store;

#[cfg(feature = "keyring-store")]
pub mod keyring;
