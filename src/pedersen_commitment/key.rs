use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::Curve;
use crate::error::SerializationError;

use super::{randomness::Randomness, value::Value};

/// The two generators a Pedersen commitment is taken against: `g0`, the
/// committed value's base (exponent 0), and `g1`, the opening's base
/// (exponent 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentKey<C: Curve> {
    pub g0: C,
    pub g1: C,
}

impl<C: Curve> CommitmentKey<C> {
    pub fn new(g0: C, g1: C) -> Self { CommitmentKey { g0, g1 } }

    /// Sample a fresh, unrelated pair of generators. Useful for tests;
    /// production statements draw their key from a
    /// [`crate::params::CryptoParams`] bundle instead (see
    /// [`crate::params::CryptoParams::pedersen_key`]) so that every
    /// commitment in a presentation shares the same two bases.
    pub fn generate<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self {
        CommitmentKey {
            g0: C::generate(rng),
            g1: C::generate(rng),
        }
    }

    pub fn commit(&self, value: &Value<C>, randomness: &Randomness<C>) -> super::Commitment<C> {
        let point = C::multi_exp(&[self.g0, self.g1], &[*value.as_ref(), *randomness.as_value_ref()]);
        super::Commitment(point)
    }
}

impl<C: Curve> Serial for CommitmentKey<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        self.g0.serial(out);
        self.g1.serial(out);
    }
}

impl<C: Curve> Deserial for CommitmentKey<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        let g0 = C::deserial(source)?;
        let g1 = C::deserial(source)?;
        Ok(CommitmentKey { g0, g1 })
    }
}
