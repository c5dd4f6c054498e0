//! Signing and verification for the attesta property-authentication
//! protocol: the ECDSA/EdDSA signature provider, the Privacy and Package
//! auth modes, and the issuance/verification validation chains.

pub mod error;
pub mod issuance;
pub mod keys;
pub mod verification;

pub use error::*;
pub use issuance::*;
pub use keys::*;
pub use verification::*;
