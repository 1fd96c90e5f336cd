#![doc = include_str!("../README.md")]

pub mod common;
pub mod curve_arithmetic;
pub mod random_oracle;

pub mod pedersen_commitment;

pub mod params;

pub mod dlrep;
pub mod sigma;

pub mod proofs;

pub mod credential;
pub mod revocation;

pub mod encoding;
pub mod serialization;

pub mod error;

pub use error::{Error, InvalidArtifact, InvalidWitness, ParameterError, SerializationError};

// This is here so that derive-macro-expanded code inside this crate (if any
// is added later) can refer to `uprove_zkp::` uniformly.
#[doc(hidden)]
extern crate self as uprove_zkp;
