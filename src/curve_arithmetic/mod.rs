//! Prime-order group and scalar field arithmetic (component C1).
//!
//! A `Curve` is generic over its `Scalar` field, exposes the group
//! operations every higher layer needs (`plus_point`, `mul_by_scalar`,
//! `multi_exp`, ...), and a canonical byte encoding used both for wire
//! serialization and for absorption into the Fiat-Shamir transcript.
//!
//! The concrete instance shipped here is Ristretto over Curve25519
//! (`curve25519-dalek-ng`), a prime-order group with a matching scalar
//! field and no cofactor leakage.

mod ristretto;

use crate::common::{Deserial, Serial};
use crate::error::ParameterError;
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;
use zeroize::Zeroize;

pub use ristretto::RistrettoCurve;

/// The scalar field `F_q` associated with a [`Curve`]. `Zeroize` so that
/// a secret exponent wrapped in [`crate::common::Secret`] can be wiped on
/// drop.
pub trait Field: Copy + Clone + Sized + PartialEq + Eq + Debug + Send + Sync + Serial + Deserial + Zeroize + 'static {
    /// Length in bytes of the canonical encoding.
    const BYTE_LENGTH: usize;

    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool { *self == Self::zero() }
    fn add(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self { self.add(&other.neg()) }
    fn neg(&self) -> Self;
    fn mul(&self, other: &Self) -> Self;
    /// `None` only for `self == 0`.
    fn inverse(&self) -> Option<Self>;

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self;

    /// Sample a uniformly random nonzero element.
    fn random_nonzero<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let x = Self::random(rng);
            if !x.is_zero() {
                return x;
            }
        }
    }

    /// Interpret `digest` as a big-endian unsigned integer and reduce it
    /// modulo the field order.
    fn from_digest_be(digest: &[u8]) -> Self;

    fn to_bytes(&self) -> Vec<u8>;
    fn from_bytes(bytes: &[u8]) -> Result<Self, ParameterError>;

    fn from_u64(x: u64) -> Self;
}

/// A prime-order group, together with its scalar field.
pub trait Curve: Copy + Clone + Sized + Send + Sync + Debug + PartialEq + Eq + Serial + Deserial + 'static {
    type Scalar: Field;

    const GROUP_ELEMENT_LENGTH: usize;
    const SCALAR_LENGTH: usize = Self::Scalar::BYTE_LENGTH;

    fn zero_point() -> Self;
    /// The distinguished generator `g_0`.
    fn one_point() -> Self;
    fn is_zero_point(&self) -> bool;
    fn plus_point(&self, other: &Self) -> Self;
    fn minus_point(&self, other: &Self) -> Self { self.plus_point(&other.inverse_point()) }
    fn inverse_point(&self) -> Self;
    fn double_point(&self) -> Self { self.plus_point(self) }
    fn mul_by_scalar(&self, scalar: &Self::Scalar) -> Self;

    /// `prod b_i^{s_i}`, computed by an efficient multi-exponentiation
    /// algorithm rather than `k` independent scalar multiplications.
    /// Accepts empty slices and returns the identity.
    fn multi_exp(bases: &[Self], scalars: &[Self::Scalar]) -> Self;

    fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self;
    fn generate_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Self::Scalar::random(rng)
    }
    fn generate_non_zero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Self::Scalar::random_nonzero(rng)
    }

    /// Deterministically derive a group element from arbitrary bytes
    /// (used to generate the `g_1..g_n` attribute bases from a domain
    /// string, so they carry no known discrete log relative to `g_0`).
    fn hash_to_curve(input: &[u8]) -> Self;

    fn to_bytes(&self) -> Vec<u8>;
    fn from_bytes(bytes: &[u8]) -> Result<Self, ParameterError>;
}

/// Wires a concrete [`Field`] implementation into the [`crate::common`]
/// `Serial`/`Deserial` framework. Implemented per concrete type (not as a
/// blanket `impl<F: Field>`) because a blanket impl here would overlap, as
/// far as the coherence checker is concerned, with the analogous blanket
/// impl a [`Curve`] would need.
macro_rules! impl_serial_for_field {
    ($ty:ty, $what:expr) => {
        impl crate::common::Serial for $ty {
            fn serial<B: crate::common::Buffer>(&self, out: &mut B) { self.to_bytes().serial(out) }
        }

        impl crate::common::Deserial for $ty {
            fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
                let bytes = <Vec<u8> as crate::common::Deserial>::deserial(source)?;
                <$ty as Field>::from_bytes(&bytes).map_err(|e| crate::error::SerializationError::WrongEncoding {
                    field:  $what,
                    reason: e.to_string(),
                })
            }
        }
    };
}

/// Wires a concrete [`Curve`] implementation into the [`crate::common`]
/// `Serial`/`Deserial` framework; see [`impl_serial_for_field`] for why this
/// is per concrete type rather than a blanket impl.
macro_rules! impl_serial_for_curve {
    ($ty:ty, $what:expr) => {
        impl crate::common::Serial for $ty {
            fn serial<B: crate::common::Buffer>(&self, out: &mut B) { self.to_bytes().serial(out) }
        }

        impl crate::common::Deserial for $ty {
            fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
                let bytes = <Vec<u8> as crate::common::Deserial>::deserial(source)?;
                <$ty as Curve>::from_bytes(&bytes).map_err(|e| crate::error::SerializationError::WrongEncoding {
                    field:  $what,
                    reason: e.to_string(),
                })
            }
        }
    };
}

pub(crate) use impl_serial_for_curve;
pub(crate) use impl_serial_for_field;

/// Evaluate `prod b_i^{s_i}` the naive way; used by [`Curve`] impls that
/// have no better multi-exponentiation algorithm and as a spec-level
/// reference against which a `multi_exp` override can be tested.
pub fn multi_exp_naive<C: Curve>(bases: &[C], scalars: &[C::Scalar]) -> C {
    bases
        .iter()
        .zip(scalars.iter())
        .fold(C::zero_point(), |acc, (b, s)| acc.plus_point(&b.mul_by_scalar(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn multi_exp_matches_naive() {
        let mut rng = thread_rng();
        for k in 0..6 {
            let bases: Vec<RistrettoCurve> = (0..k).map(|_| RistrettoCurve::generate(&mut rng)).collect();
            let scalars: Vec<_> = (0..k)
                .map(|_| RistrettoCurve::generate_scalar(&mut rng))
                .collect();
            assert_eq!(RistrettoCurve::multi_exp(&bases, &scalars), multi_exp_naive(&bases, &scalars));
        }
    }

    #[test]
    fn multi_exp_of_empty_is_identity() {
        let out: RistrettoCurve = Curve::multi_exp(&[], &[]);
        assert!(out.is_zero_point());
    }
}
