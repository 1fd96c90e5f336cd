use std::ops::Deref;
use std::rc::Rc;

use crate::common::{Buffer, Deserial, Secret, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::error::SerializationError;

use super::value::Value;

/// The blinding exponent `r` used in a Pedersen commitment `g_0^r * g_i^v`.
/// An `Rc<Secret<C::Scalar>>` that `Deref`s to the underlying scalar, and
/// converts freely to/from [`Value`] since both are ultimately just
/// exponents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Randomness<C: Curve>(Rc<Secret<C::Scalar>>);

impl<C: Curve> Deref for Randomness<C> {
    type Target = C::Scalar;

    fn deref(&self) -> &C::Scalar { self.0.expose() }
}

impl<C: Curve> AsRef<C::Scalar> for Randomness<C> {
    fn as_ref(&self) -> &C::Scalar { self.0.expose() }
}

impl<C: Curve> Randomness<C> {
    pub fn new(x: C::Scalar) -> Self { Randomness(Rc::new(Secret::new(x))) }

    pub fn as_value_ref(&self) -> &C::Scalar { self.0.expose() }

    pub fn as_value(&self) -> Value<C> { Value::new(*self.0.expose()) }

    pub fn from_value(x: &Value<C>) -> Self { Randomness::new(*x.as_ref()) }

    pub fn from_u64(x: u64) -> Self { Randomness::new(C::Scalar::from_u64(x)) }

    pub fn zero() -> Self { Randomness::new(C::Scalar::zero()) }

    pub fn generate<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self { Randomness::new(C::generate_scalar(rng)) }

    pub fn generate_non_zero<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self {
        Randomness::new(C::generate_non_zero_scalar(rng))
    }
}

impl<C: Curve> Serial for Randomness<C> {
    fn serial<B: Buffer>(&self, out: &mut B) { self.0.expose().serial(out) }
}

impl<C: Curve> Deserial for Randomness<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        Ok(Randomness::new(C::Scalar::deserial(source)?))
    }
}
