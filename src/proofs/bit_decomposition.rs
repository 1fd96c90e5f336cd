//! Bit-decomposition proof (component C7): a commitment `C` opens to `v`,
//! and `v = sum 2^i * b_i` for committed bits `B_i`, each `b_i in {0,1}`.
//!
//! Built from one set-membership proof (component C6) per bit against
//! `{0,1}`, plus one run of the equality engine (component C4) tying `C`'s
//! committed value to the weighted sum of bit openings.

use rand::{CryptoRng, RngCore};

use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::dlrep::{Statement, Witness};
use crate::error::{Error, InvalidWitness};
use crate::params::CryptoParams;
use crate::pedersen_commitment::{Commitment, CommitmentKey, Randomness, Value};
use crate::sigma::{self, EqualityMap, EqualityProof};

use super::set_membership::{self, SetMembershipProof};

const EQUALITY_CLASS: &str = "bitDecompositionValue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitDecompositionProof<C: Curve> {
    pub bit_commitments: Vec<Commitment<C>>,
    pub bit_proofs:      Vec<SetMembershipProof<C>>,
    pub equality_proof:  EqualityProof<C>,
}

impl<C: Curve> Serial for BitDecompositionProof<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        self.bit_commitments.serial(out);
        self.bit_proofs.serial(out);
        self.equality_proof.serial(out);
    }
}

impl<C: Curve> Deserial for BitDecompositionProof<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
        Ok(BitDecompositionProof {
            bit_commitments: Vec::deserial(source)?,
            bit_proofs:      Vec::deserial(source)?,
            equality_proof:  Deserial::deserial(source)?,
        })
    }
}

fn weighted_sum<C: Curve>(bits: &[C::Scalar]) -> C::Scalar {
    let two = C::Scalar::one().add(&C::Scalar::one());
    let mut pow = C::Scalar::one();
    let mut acc = C::Scalar::zero();
    for b in bits {
        acc = acc.add(&pow.mul(b));
        pow = pow.mul(&two);
    }
    acc
}

/// Prove that `value` (opened by `randomness` under `key`) decomposes into
/// the given bits, least-significant first. Fails with
/// [`InvalidWitness::OutOfRange`] before any commitment is produced if the
/// weighted sum of `bits` does not equal `value`.
pub fn prove<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    value: &Value<C>,
    randomness: &Randomness<C>,
    bits: &[bool],
    rng: &mut Rng,
) -> Result<(Commitment<C>, BitDecompositionProof<C>), Error> {
    let (commitment, proof, _bit_randomness) = prove_with_randomness(domain, params, key, value, randomness, bits, rng)?;
    Ok((commitment, proof))
}

/// As [`prove`], but also returns the per-bit openings. Used internally by
/// the range proof (component C8), which needs those openings to keep its
/// own helper commitments (`AdivB[i]`, `D[i]`, `X[i]`, `E[i]`) consistent
/// with the bits committed here, instead of sampling fresh, unrelated
/// randomness for them.
pub(crate) fn prove_with_randomness<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    value: &Value<C>,
    randomness: &Randomness<C>,
    bits: &[bool],
    rng: &mut Rng,
) -> Result<(Commitment<C>, BitDecompositionProof<C>, Vec<Randomness<C>>), Error> {
    let bit_scalars: Vec<C::Scalar> = bits.iter().map(|&b| if b { C::Scalar::one() } else { C::Scalar::zero() }).collect();
    if weighted_sum::<C>(&bit_scalars) != *value.as_ref() {
        return Err(InvalidWitness::OutOfRange.into());
    }

    let commitment = key.commit(value, randomness);

    let set01 = [C::Scalar::zero(), C::Scalar::one()];
    let mut bit_commitments = Vec::with_capacity(bits.len());
    let mut bit_proofs = Vec::with_capacity(bits.len());
    let mut bit_randomness = Vec::with_capacity(bits.len());
    for &is_set in bit_scalars.iter() {
        let v = Value::<C>::new(is_set);
        let r = Randomness::generate(rng);
        let (c_i, proof_i) = set_membership::prove(domain, params, key, &set01, &v, &r, rng)?;
        bit_commitments.push(c_i);
        bit_proofs.push(proof_i);
        bit_randomness.push(r);
    }

    let weighted_randomness = weighted_sum::<C>(&bit_randomness.iter().map(|r| *r.as_value_ref()).collect::<Vec<_>>());

    let c_witness = Witness::pedersen(key.g0, key.g1, *value.as_ref(), *randomness.as_ref());
    let b_witness = Witness::pedersen(key.g0, key.g1, *value.as_ref(), weighted_randomness);

    let mut map = EqualityMap::new();
    map.equate(EQUALITY_CLASS, 0, 0);
    map.equate(EQUALITY_CLASS, 1, 0);

    let equality_proof = sigma::prove(domain, params, &[c_witness, b_witness], &map, rng)?;

    Ok((commitment, BitDecompositionProof { bit_commitments, bit_proofs, equality_proof }, bit_randomness))
}

/// Verify a [`BitDecompositionProof`] against the public commitment.
pub fn verify<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    commitment: &Commitment<C>,
    bit_count: usize,
    proof: &BitDecompositionProof<C>,
) -> bool {
    if proof.bit_commitments.len() != bit_count || proof.bit_proofs.len() != bit_count {
        return false;
    }
    let set01 = [C::Scalar::zero(), C::Scalar::one()];
    for i in 0..bit_count {
        if !set_membership::verify(domain, params, key, &set01, &proof.bit_commitments[i], &proof.bit_proofs[i]) {
            return false;
        }
    }

    let two = C::Scalar::one().add(&C::Scalar::one());
    let mut pow = C::Scalar::one();
    let mut weighted_point = C::zero_point();
    for bit_commitment in &proof.bit_commitments {
        weighted_point = weighted_point.plus_point(&bit_commitment.point().mul_by_scalar(&pow));
        pow = pow.mul(&two);
    }

    let c_statement = Statement::pedersen(key.g0, key.g1, commitment.point());
    let b_statement = Statement::pedersen(key.g0, key.g1, weighted_point);

    let mut map = EqualityMap::new();
    map.equate(EQUALITY_CLASS, 0, 0);
    map.equate(EQUALITY_CLASS, 1, 0);

    sigma::verify(domain, params, &[c_statement, b_statement], &map, &proof.equality_proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use crate::random_oracle::HashId;
    use rand::thread_rng;

    #[test]
    fn decomposition_of_an_honest_value_verifies() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("bit-decomp-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let value = Value::from_u64(0b1011);
        let randomness = Randomness::generate(&mut rng);
        let bits = [true, true, false, true]; // 1 + 2 + 0 + 8 = 11

        let (commitment, proof) = prove("bd1", &params, &key, &value, &randomness, &bits, &mut rng).unwrap();
        assert!(verify("bd1", &params, &key, &commitment, bits.len(), &proof));
    }

    #[test]
    fn wrong_bits_are_rejected_before_any_commitment() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("bit-decomp-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let value = Value::from_u64(5);
        let randomness = Randomness::generate(&mut rng);
        let bits = [false, false]; // weighted sum 0 != 5

        let err = prove("bd2", &params, &key, &value, &randomness, &bits, &mut rng).unwrap_err();
        assert_eq!(err, Error::Witness(InvalidWitness::OutOfRange));
    }
}
