//! [`Curve`]/[`Field`] implementation over the Ristretto group on
//! Curve25519, via `curve25519-dalek-ng`.

use super::{Curve, Field};
use crate::error::ParameterError;
use curve25519_dalek_ng::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::RistrettoPoint,
    scalar::Scalar as DalekScalar,
    traits::VartimeMultiscalarMul,
};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use sha2::Sha512;
use std::fmt;
use zeroize::Zeroize;

/// A wrapper around `curve25519-dalek-ng`'s `Scalar`, giving it the
/// [`Field`] contract expected by every proof above the algebra layer.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct RistrettoScalar(pub(crate) DalekScalar);

impl fmt::Debug for RistrettoScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RistrettoScalar({})", hex::encode(self.0.as_bytes()))
    }
}

fn order_as_biguint() -> BigUint {
    // The order of the Ristretto/Curve25519 scalar field, l =
    // 2^252 + 27742317777372353535851937790883648493, encoded
    // little-endian by `curve25519-dalek-ng`'s basepoint-order constant.
    BigUint::from_bytes_le(&curve25519_dalek_ng::constants::BASEPOINT_ORDER.to_bytes())
}

impl Field for RistrettoScalar {
    const BYTE_LENGTH: usize = 32;

    fn zero() -> Self { RistrettoScalar(DalekScalar::zero()) }

    fn one() -> Self { RistrettoScalar(DalekScalar::one()) }

    fn add(&self, other: &Self) -> Self { RistrettoScalar(self.0 + other.0) }

    fn neg(&self) -> Self { RistrettoScalar(-self.0) }

    fn mul(&self, other: &Self) -> Self { RistrettoScalar(self.0 * other.0) }

    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(RistrettoScalar(self.0.invert()))
        }
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        RistrettoScalar(DalekScalar::random(rng))
    }

    fn from_digest_be(digest: &[u8]) -> Self {
        let value = BigUint::from_bytes_be(digest) % order_as_biguint();
        let mut le = value.to_bytes_le();
        le.resize(32, 0);
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&le);
        RistrettoScalar(DalekScalar::from_bits(buf))
    }

    fn to_bytes(&self) -> Vec<u8> { self.0.to_bytes().to_vec() }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ParameterError> {
        if bytes.len() != 32 {
            return Err(ParameterError::MismatchedLengths {
                bases:     32,
                exponents: bytes.len(),
            });
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        match DalekScalar::from_canonical_bytes(buf) {
            Some(s) => Ok(RistrettoScalar(s)),
            None => Err(ParameterError::InvalidEncoding { context: "scalar" }),
        }
    }

    fn from_u64(x: u64) -> Self { RistrettoScalar(DalekScalar::from(x)) }
}

impl From<DalekScalar> for RistrettoScalar {
    fn from(s: DalekScalar) -> Self { RistrettoScalar(s) }
}

impl Zeroize for RistrettoScalar {
    fn zeroize(&mut self) { self.0 = DalekScalar::zero(); }
}

super::impl_serial_for_field!(RistrettoScalar, "scalar");

/// The [`Curve`] implementation used by default throughout this crate.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct RistrettoCurve(pub(crate) RistrettoPoint);

impl fmt::Debug for RistrettoCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RistrettoCurve({})", hex::encode(self.0.compress().to_bytes()))
    }
}

impl Curve for RistrettoCurve {
    type Scalar = RistrettoScalar;

    const GROUP_ELEMENT_LENGTH: usize = 32;

    fn zero_point() -> Self { RistrettoCurve(RistrettoPoint::default()) }

    fn one_point() -> Self { RistrettoCurve(RISTRETTO_BASEPOINT_POINT) }

    fn is_zero_point(&self) -> bool { self.0 == RistrettoPoint::default() }

    fn plus_point(&self, other: &Self) -> Self { RistrettoCurve(self.0 + other.0) }

    fn inverse_point(&self) -> Self { RistrettoCurve(-self.0) }

    fn mul_by_scalar(&self, scalar: &Self::Scalar) -> Self { RistrettoCurve(self.0 * scalar.0) }

    fn multi_exp(bases: &[Self], scalars: &[Self::Scalar]) -> Self {
        let points = bases.iter().map(|b| b.0);
        let factors = scalars.iter().map(|s| s.0);
        RistrettoCurve(RistrettoPoint::vartime_multiscalar_mul(factors, points))
    }

    fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        RistrettoCurve(RistrettoPoint::random(rng))
    }

    fn hash_to_curve(input: &[u8]) -> Self {
        RistrettoCurve(RistrettoPoint::hash_from_bytes::<Sha512>(input))
    }

    fn to_bytes(&self) -> Vec<u8> { self.0.compress().to_bytes().to_vec() }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ParameterError> {
        if bytes.len() != 32 {
            return Err(ParameterError::MismatchedLengths {
                bases:     32,
                exponents: bytes.len(),
            });
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        curve25519_dalek_ng::ristretto::CompressedRistretto(buf)
            .decompress()
            .map(RistrettoCurve)
            .ok_or(ParameterError::InvalidEncoding { context: "group element" })
    }
}

super::impl_serial_for_curve!(RistrettoCurve, "group element");

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn scalar_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let s = RistrettoScalar::random(&mut rng);
            assert_eq!(RistrettoScalar::from_bytes(&s.to_bytes()).unwrap(), s);
        }
    }

    #[test]
    fn point_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let p = RistrettoCurve::generate(&mut rng);
            assert_eq!(RistrettoCurve::from_bytes(&p.to_bytes()).unwrap(), p);
        }
    }

    #[test]
    fn inverse_cancels() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let s = RistrettoScalar::random_nonzero(&mut rng);
            let inv = s.inverse().unwrap();
            assert_eq!(s.mul(&inv), RistrettoScalar::one());
        }
    }

    #[test]
    fn zero_has_no_inverse() { assert!(RistrettoScalar::zero().inverse().is_none()); }

    #[test]
    fn from_digest_is_deterministic_and_reduced() {
        let digest = [0xffu8; 64];
        let a = RistrettoScalar::from_digest_be(&digest);
        let b = RistrettoScalar::from_digest_be(&digest);
        assert_eq!(a, b);
    }
}
