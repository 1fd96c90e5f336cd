//! Equality and inequality proofs (component C9): two committed attributes
//! are shown to be equal, or (not) equal, without revealing either.
//!
//! Equality is a one-line specialization of the equality engine (component
//! C4): a single class tying the two commitments' exponent-0 slots
//! together. Inequality cannot be expressed that way (there is no
//! "not-equal" relation in a Sigma protocol), so it is proved instead via
//! the standard "knowledge of an inverse" trick: commit to the
//! multiplicative inverse of the difference of the two values, which
//! exists exactly when the values differ, and tie that auxiliary
//! commitment into the equality engine alongside the two originals.

use rand::{CryptoRng, RngCore};

use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::dlrep::Witness;
use crate::error::{Error, InvalidWitness};
use crate::params::CryptoParams;
use crate::pedersen_commitment::{Commitment, CommitmentKey, Randomness, Value};
use crate::sigma::{self, EqualityMap, EqualityProof};

const EQUALITY_CLASS: &str = "equalAttributes";

/// Proof that two commitments open to the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityProofArtifact<C: Curve>(EqualityProof<C>);

impl<C: Curve> Serial for EqualityProofArtifact<C> {
    fn serial<B: Buffer>(&self, out: &mut B) { self.0.serial(out) }
}

impl<C: Curve> Deserial for EqualityProofArtifact<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
        Ok(EqualityProofArtifact(Deserial::deserial(source)?))
    }
}

/// Prove `commit(key, value1, randomness1) == commit(key, value2,
/// randomness2)` in value (not necessarily in opening).
pub fn prove_equal<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    value1: &Value<C>,
    randomness1: &Randomness<C>,
    value2: &Value<C>,
    randomness2: &Randomness<C>,
    rng: &mut Rng,
) -> Result<(Commitment<C>, Commitment<C>, EqualityProofArtifact<C>), Error> {
    if value1.as_ref() != value2.as_ref() {
        return Err(InvalidWitness::InconsistentEquality.into());
    }
    let c1 = key.commit(value1, randomness1);
    let c2 = key.commit(value2, randomness2);

    let w1 = Witness::pedersen(key.g0, key.g1, *value1.as_ref(), *randomness1.as_value_ref());
    let w2 = Witness::pedersen(key.g0, key.g1, *value2.as_ref(), *randomness2.as_value_ref());

    let mut map = EqualityMap::new();
    map.equate(EQUALITY_CLASS, 0, 0).equate(EQUALITY_CLASS, 1, 0);

    let proof = sigma::prove(domain, params, &[w1, w2], &map, rng)?;
    Ok((c1, c2, EqualityProofArtifact(proof)))
}

/// Verify an [`EqualityProofArtifact`] against the two public commitments.
pub fn verify_equal<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    c1: &Commitment<C>,
    c2: &Commitment<C>,
    proof: &EqualityProofArtifact<C>,
) -> bool {
    use crate::dlrep::Statement;
    let s1 = Statement::pedersen(key.g0, key.g1, c1.point());
    let s2 = Statement::pedersen(key.g0, key.g1, c2.point());
    let mut map = EqualityMap::new();
    map.equate(EQUALITY_CLASS, 0, 0).equate(EQUALITY_CLASS, 1, 0);
    sigma::verify(domain, params, &[s1, s2], &map, &proof.0)
}

const DIFFERENCE_CLASS: &str = "differenceTimesInverse";

/// Proof that two commitments open to distinct values: an auxiliary
/// commitment to the inverse of their difference, plus an equality-engine
/// proof that `(value1 - value2) * inverse == 1` (modeled as a Pedersen
/// witness whose base0 carries the product relation implicitly via the
/// two original commitments' homomorphic difference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InequalityProof<C: Curve> {
    inverse_commitment: Commitment<C>,
    product_proof:      EqualityProof<C>,
}

impl<C: Curve> Serial for InequalityProof<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        self.inverse_commitment.serial(out);
        self.product_proof.serial(out);
    }
}

impl<C: Curve> Deserial for InequalityProof<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
        Ok(InequalityProof {
            inverse_commitment: Deserial::deserial(source)?,
            product_proof:      Deserial::deserial(source)?,
        })
    }
}

/// Prove `value1 != value2`. Fails with [`InvalidWitness::NotDistinct`]
/// before any commitment is produced if the two values are in fact equal.
pub fn prove_unequal<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    value1: &Value<C>,
    randomness1: &Randomness<C>,
    value2: &Value<C>,
    randomness2: &Randomness<C>,
    rng: &mut Rng,
) -> Result<(Commitment<C>, Commitment<C>, InequalityProof<C>), Error> {
    let difference = value1.as_ref().sub(value2.as_ref());
    let inverse = difference.inverse().ok_or(InvalidWitness::NotDistinct)?;

    let c1 = key.commit(value1, randomness1);
    let c2 = key.commit(value2, randomness2);

    let inverse_randomness = Randomness::generate(rng);
    let inverse_commitment = key.commit(&Value::new(inverse), &inverse_randomness);

    // The difference commitment `C1 / C2` opens to `(difference,
    // randomness1 - randomness2)`. Raising it to `inverse = 1/difference`
    // gives `g0 * g1^{(r1-r2)*inverse}`; adding a second base `g1` with
    // exponent `-(r1-r2)*inverse` cancels that residual term, leaving a
    // DL-rep statement whose value is exactly `g0` — fixed and public, so
    // the verifier can check it without learning any of the openings.
    let difference_point = c1.point().minus_point(&c2.point());
    let residual = randomness1.as_value_ref().sub(randomness2.as_value_ref()).mul(&inverse);
    let product_witness = Witness::new(vec![difference_point, key.g1], vec![inverse, residual.neg()])?;
    debug_assert_eq!(product_witness.statement().value(), key.g0);

    let inverse_witness = Witness::pedersen(key.g0, key.g1, inverse, *inverse_randomness.as_value_ref());

    let mut map = EqualityMap::new();
    map.equate(DIFFERENCE_CLASS, 0, 0).equate(DIFFERENCE_CLASS, 1, 0);

    let product_proof = sigma::prove(domain, params, &[product_witness, inverse_witness], &map, rng)?;

    Ok((c1, c2, InequalityProof { inverse_commitment, product_proof }))
}

/// Verify an [`InequalityProof`] against the two public commitments.
pub fn verify_unequal<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    c1: &Commitment<C>,
    c2: &Commitment<C>,
    proof: &InequalityProof<C>,
) -> bool {
    use crate::dlrep::Statement;
    let difference_point = c1.point().minus_point(&c2.point());
    let Ok(product_statement) = Statement::new(vec![difference_point, key.g1], key.g0) else { return false };
    let inverse_statement = Statement::pedersen(key.g0, key.g1, proof.inverse_commitment.point());

    let mut map = EqualityMap::new();
    map.equate(DIFFERENCE_CLASS, 0, 0).equate(DIFFERENCE_CLASS, 1, 0);

    sigma::verify(domain, params, &[product_statement, inverse_statement], &map, &proof.product_proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use crate::random_oracle::HashId;
    use rand::thread_rng;

    #[test]
    fn equal_values_verify() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("equality-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let value = Value::from_u64(9);
        let r1 = Randomness::generate(&mut rng);
        let r2 = Randomness::generate(&mut rng);

        let (c1, c2, proof) = prove_equal("eq1", &params, &key, &value, &r1, &value, &r2, &mut rng).unwrap();
        assert!(verify_equal("eq1", &params, &key, &c1, &c2, &proof));
    }

    #[test]
    fn unequal_values_rejected_up_front() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("equality-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let v1 = Value::from_u64(9);
        let v2 = Value::from_u64(10);
        let r1 = Randomness::generate(&mut rng);
        let r2 = Randomness::generate(&mut rng);

        let err = prove_equal("eq2", &params, &key, &v1, &r1, &v2, &r2, &mut rng).unwrap_err();
        assert_eq!(err, Error::Witness(InvalidWitness::InconsistentEquality));
    }

    #[test]
    fn distinct_values_verify_inequality() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("inequality-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let v1 = Value::from_u64(9);
        let v2 = Value::from_u64(10);
        let r1 = Randomness::generate(&mut rng);
        let r2 = Randomness::generate(&mut rng);

        let (c1, c2, proof) = prove_unequal("ineq1", &params, &key, &v1, &r1, &v2, &r2, &mut rng).unwrap();
        assert!(verify_unequal("ineq1", &params, &key, &c1, &c2, &proof));
    }

    #[test]
    fn equal_values_rejected_before_any_commitment() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("inequality-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let v = Value::from_u64(9);
        let r1 = Randomness::generate(&mut rng);
        let r2 = Randomness::generate(&mut rng);

        let err = prove_unequal("ineq2", &params, &key, &v, &r1, &v, &r2, &mut rng).unwrap_err();
        assert_eq!(err, Error::Witness(InvalidWitness::NotDistinct));
    }
}
