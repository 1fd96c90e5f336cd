//! Set-membership proof (component C6): a non-interactive OR of `k`
//! single-element equality proofs, proving a committed value lies in a
//! public scalar set without revealing which member it is.
//!
//! Built on the Cramer-Damgard-Schoenmakers OR-proof construction: the
//! simulate-all-but-one-branch pattern generalizes the usual single-branch
//! Sigma-protocol layout (sample randomizers, derive one Fiat-Shamir
//! challenge, respond) to `k` branches instead of one.

use rand::{CryptoRng, RngCore};

use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::error::{Error, InvalidWitness, ParameterError};
use crate::params::CryptoParams;
use crate::pedersen_commitment::{Commitment, CommitmentKey, Randomness, Value};

/// `(a[k], c[k-1], r[k])`: one commitment per branch, one sub-challenge per
/// branch but the last, one response per branch. The final sub-challenge
/// is never transmitted; the verifier recovers it as `c_total - sum(c)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMembershipProof<C: Curve> {
    pub a: Vec<C>,
    pub c: Vec<C::Scalar>,
    pub r: Vec<C::Scalar>,
}

impl<C: Curve> Serial for SetMembershipProof<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        self.a.serial(out);
        self.c.serial(out);
        self.r.serial(out);
    }
}

impl<C: Curve> Deserial for SetMembershipProof<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
        Ok(SetMembershipProof {
            a: Vec::deserial(source)?,
            c: Vec::deserial(source)?,
            r: Vec::deserial(source)?,
        })
    }
}

fn challenge<C: Curve>(domain: &str, params: &CryptoParams<C>, key: &CommitmentKey<C>, set: &[C::Scalar], x: C, a: &[C]) -> C::Scalar {
    let mut ro = params.transcript(domain);
    ro.append_message(b"g", &key.g0);
    ro.append_message(b"h", &key.g1);
    ro.append_message(b"set", &set.to_vec());
    ro.append_message(b"x", &x);
    ro.append_message(b"a", &a.to_vec());
    ro.result_to_scalar::<C>()
}

/// Prove that `value` (opened by `randomness` under `key`) is a member of
/// `set`. Fails with [`InvalidWitness::NotAMember`] before any commitment
/// is produced if it is not.
pub fn prove<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    set: &[C::Scalar],
    value: &Value<C>,
    randomness: &Randomness<C>,
    rng: &mut Rng,
) -> Result<(Commitment<C>, SetMembershipProof<C>), Error> {
    if set.is_empty() {
        return Err(ParameterError::EmptySet.into());
    }
    let real_index = set
        .iter()
        .position(|s| *s == *value.as_ref())
        .ok_or(InvalidWitness::NotAMember)?;

    let commitment = key.commit(value, randomness);
    let x = commitment.point();
    let k = set.len();

    let mut a = vec![C::zero_point(); k];
    let mut c = vec![C::Scalar::zero(); k];
    let mut r = vec![C::Scalar::zero(); k];
    let mut challenge_sum = C::Scalar::zero();

    for (j, sj) in set.iter().enumerate() {
        if j == real_index {
            continue;
        }
        let cj = C::generate_scalar(rng);
        let rj = C::generate_scalar(rng);
        // a_j = h^{rj} * g^{sj*cj} * X^{-cj}
        let g_term = key.g0.mul_by_scalar(&sj.mul(&cj));
        let x_term = x.mul_by_scalar(&cj).inverse_point();
        a[j] = key.g1.mul_by_scalar(&rj).plus_point(&g_term).plus_point(&x_term);
        c[j] = cj;
        r[j] = rj;
        challenge_sum = challenge_sum.add(&cj);
    }

    let w = C::generate_scalar(rng);
    a[real_index] = key.g1.mul_by_scalar(&w);

    let total_challenge = challenge(domain, params, key, set, x, &a);
    let real_c = total_challenge.sub(&challenge_sum);
    let real_r = real_c.mul(randomness.as_value_ref()).add(&w);
    c[real_index] = real_c;
    r[real_index] = real_r;

    // Drop the last sub-challenge; the verifier recomputes it.
    c.pop();

    Ok((commitment, SetMembershipProof { a, c, r }))
}

/// Verify a [`SetMembershipProof`] against the public commitment `x` and
/// set. Total on adversarial input.
pub fn verify<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    set: &[C::Scalar],
    commitment: &Commitment<C>,
    proof: &SetMembershipProof<C>,
) -> bool {
    let k = set.len();
    if k == 0 || proof.a.len() != k || proof.c.len() + 1 != k || proof.r.len() != k {
        return false;
    }

    let x = commitment.point();
    let total_challenge = challenge(domain, params, key, set, x, &proof.a);
    let last_c = total_challenge.sub(&proof.c.iter().fold(C::Scalar::zero(), |acc, c| acc.add(c)));

    for j in 0..k {
        let cj = if j + 1 == k { last_c } else { proof.c[j] };
        let lhs = key.g1.mul_by_scalar(&proof.r[j]);
        let rhs = x
            .mul_by_scalar(&cj)
            .plus_point(&key.g0.mul_by_scalar(&set[j].mul(&cj)).inverse_point())
            .plus_point(&proof.a[j]);
        if lhs != rhs {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use crate::random_oracle::HashId;
    use rand::thread_rng;

    #[test]
    fn membership_of_zero_in_bit_set_verifies() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("set-membership-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let set = vec![Field::zero(), Field::one()];
        let value = Value::from_u64(0);
        let randomness = Randomness::generate(&mut rng);

        let (commitment, proof) = prove("s1", &params, &key, &set, &value, &randomness, &mut rng).unwrap();
        assert!(verify("s1", &params, &key, &set, &commitment, &proof));
    }

    #[test]
    fn non_member_is_rejected_before_any_commitment() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("set-membership-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let set = vec![Field::zero(), Field::one()];
        let value = Value::from_u64(7);
        let randomness = Randomness::generate(&mut rng);

        let err = prove("s1", &params, &key, &set, &value, &randomness, &mut rng).unwrap_err();
        assert_eq!(err, Error::Witness(InvalidWitness::NotAMember));
    }

    #[test]
    fn empty_set_is_rejected() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("set-membership-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let value = Value::from_u64(0);
        let randomness = Randomness::generate(&mut rng);
        let err = prove::<RistrettoCurve, _>("s1", &params, &key, &[], &value, &randomness, &mut rng).unwrap_err();
        assert_eq!(err, Error::Parameter(ParameterError::EmptySet));
    }

    #[test]
    fn mutating_a_response_breaks_verification() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("set-membership-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let set = vec![Field::zero(), Field::one()];
        let value = Value::from_u64(1);
        let randomness = Randomness::generate(&mut rng);
        let (commitment, mut proof) = prove("s1", &params, &key, &set, &value, &randomness, &mut rng).unwrap();
        proof.r[0] = RistrettoCurve::generate_scalar(&mut rng);
        assert!(!verify("s1", &params, &key, &set, &commitment, &proof));
    }
}
