use std::ops::Deref;
use std::rc::Rc;

use crate::common::{Buffer, Deserial, Secret, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::error::SerializationError;

/// The exponent a Pedersen commitment is taken to (an attribute value, a
/// blinding factor being committed to in its own right, ...). Secret by
/// default: wrapped in [`Secret`] so it is wiped on drop and does not
/// appear in `Debug` output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value<C: Curve>(Rc<Secret<C::Scalar>>);

impl<C: Curve> Deref for Value<C> {
    type Target = C::Scalar;

    fn deref(&self) -> &C::Scalar { self.0.expose() }
}

impl<C: Curve> AsRef<C::Scalar> for Value<C> {
    fn as_ref(&self) -> &C::Scalar { self.0.expose() }
}

impl<C: Curve> Value<C> {
    pub fn new(x: C::Scalar) -> Self { Value(Rc::new(Secret::new(x))) }

    pub fn zero() -> Self { Value::new(C::Scalar::zero()) }

    pub fn from_u64(x: u64) -> Self { Value::new(C::Scalar::from_u64(x)) }

    pub fn generate<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self { Value::new(C::generate_scalar(rng)) }
}

impl<C: Curve> Serial for Value<C> {
    fn serial<B: Buffer>(&self, out: &mut B) { self.0.expose().serial(out) }
}

impl<C: Curve> Deserial for Value<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        Ok(Value::new(C::Scalar::deserial(source)?))
    }
}
