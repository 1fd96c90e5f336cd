use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::Curve;
use crate::error::SerializationError;

/// A Pedersen commitment: a single group element, public by construction
/// (it is the point the prover and verifier both see).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment<C: Curve>(pub(super) C);

impl<C: Curve> Commitment<C> {
    pub fn point(&self) -> C { self.0 }

    /// Wrap a group element that is already known to be a well-formed
    /// commitment point, such as one derived homomorphically from other
    /// commitments (`A * B^-1`) rather than computed via
    /// [`super::CommitmentKey::commit`].
    pub fn from_point(point: C) -> Self { Commitment(point) }
}

impl<C: Curve> Serial for Commitment<C> {
    fn serial<B: Buffer>(&self, out: &mut B) { self.0.serial(out) }
}

impl<C: Curve> Deserial for Commitment<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        Ok(Commitment(C::deserial(source)?))
    }
}
