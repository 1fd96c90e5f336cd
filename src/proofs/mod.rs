//! The compound proof engine (components C6-C9): set-membership,
//! bit-decomposition, range, and (in)equality proofs. Each one composes
//! the equality-of-exponents engine ([`crate::sigma`]) plus auxiliary
//! Pedersen commitments.

pub mod bit_decomposition;
pub mod equality;
pub mod range;
pub mod set_membership;
