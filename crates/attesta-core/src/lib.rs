//! Core of the attesta property-authentication protocol: the property
//! model, deterministic encoding, hashing, and Merkle aggregation that both
//! the issuing and verifying sides are defined over.

pub mod encoding;
pub mod error;
pub mod hash;
pub mod merkle;
pub mod traits;
pub mod types;

pub use encoding::*;
pub use error::*;
pub use hash::*;
pub use merkle::*;
pub use traits::*;
pub use types::*;
