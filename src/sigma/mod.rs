//! The equality-of-exponents Sigma protocol (component C4): the reusable
//! engine every proof above it composes. Proves that named exponents are
//! shared across several discrete-log representations without revealing
//! any of them.
//!
//! Built around a `prove(&mut RandomOracle, &prover, secret, csprng)` /
//! `verify(&mut RandomOracle, &prover, &proof)` free-function shape, the
//! same commitment/challenge/response triple any concrete Sigma protocol
//! assembles end to end.

use std::collections::BTreeMap;

use rand::{CryptoRng, RngCore};

use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::dlrep::{Statement, Witness};
use crate::error::{Error, InvalidWitness, ParameterError, SerializationError};
use crate::params::CryptoParams;

/// A relation over `(statementIndex, exponentIndex)` pairs, partitioning
/// some of them into named equivalence classes. A `BTreeMap<String, _>`
/// gives a stable canonical ordering of names for free, rather than
/// needing a separate sorted index alongside a flat array of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EqualityMap {
    classes: BTreeMap<String, Vec<(usize, usize)>>,
}

impl EqualityMap {
    pub fn new() -> Self { EqualityMap::default() }

    /// Place `(statement, exponent)` into the named class, creating it if
    /// necessary. Members of a class are kept sorted so that
    /// [`EqualityMap::digest_bytes`] does not depend on insertion order
    /// (Testable Property 4).
    pub fn equate(&mut self, name: impl Into<String>, statement: usize, exponent: usize) -> &mut Self {
        let members = self.classes.entry(name.into()).or_default();
        let pair = (statement, exponent);
        if !members.contains(&pair) {
            members.push(pair);
            members.sort_unstable();
        }
        self
    }

    pub fn class_count(&self) -> usize { self.classes.len() }

    fn class_of(&self, statement: usize, exponent: usize) -> Option<&str> {
        self.classes
            .iter()
            .find(|(_, members)| members.contains(&(statement, exponent)))
            .map(|(name, _)| name.as_str())
    }

    fn free_count(&self, widths: &[usize]) -> usize {
        let total: usize = widths.iter().sum();
        let mapped: usize = self.classes.values().map(Vec::len).sum();
        total - mapped
    }

    fn validate(&self, widths: &[usize]) -> Result<(), ParameterError> {
        for members in self.classes.values() {
            for &(s, e) in members {
                let width = widths.get(s).ok_or(ParameterError::StatementOutOfRange(s))?;
                if e >= *width {
                    return Err(ParameterError::ExponentOutOfRange { statement: s, exponent: e });
                }
            }
        }
        Ok(())
    }

    /// A byte string deterministic in the equivalence classes but not in
    /// insertion order: classes sorted by name (free, from `BTreeMap`),
    /// indices sorted inside each class.
    pub fn digest_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, members) in &self.classes {
            (name.len() as u32).serial(&mut out);
            out.extend_from_slice(name.as_bytes());
            (members.len() as u32).serial(&mut out);
            for &(s, e) in members {
                (s as u32).serial(&mut out);
                (e as u32).serial(&mut out);
            }
        }
        out
    }
}

/// `(b[], respEq[], respNe[])`: per-statement commitments, responses for
/// exponents named in an equality class, and responses for exponents that
/// are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityProof<C: Curve> {
    pub commitments:   Vec<C>,
    pub responses_eq:  Vec<C::Scalar>,
    pub responses_ne:  Vec<C::Scalar>,
}

impl<C: Curve> Serial for EqualityProof<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        self.commitments.serial(out);
        self.responses_eq.serial(out);
        self.responses_ne.serial(out);
    }
}

impl<C: Curve> Deserial for EqualityProof<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        Ok(EqualityProof {
            commitments:  Vec::deserial(source)?,
            responses_eq: Vec::deserial(source)?,
            responses_ne: Vec::deserial(source)?,
        })
    }
}

fn transcript_for<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    statements: &[&Statement<C>],
    map: &EqualityMap,
    commitments: &[C],
) -> crate::random_oracle::RandomOracle {
    let mut ro = params.transcript(domain);
    ro.append_message(b"map", &map.digest_bytes());
    for statement in statements {
        ro.append_message(b"statement", *statement);
    }
    ro.append_message(b"commitments", &commitments.to_vec());
    ro
}

/// Run the equality-of-exponents Sigma protocol honestly: sample
/// randomizers (one per class, one per free exponent), commit, derive the
/// Fiat-Shamir challenge from the statements and the map, and respond.
///
/// Aborts with [`InvalidWitness::InconsistentEquality`] before emitting
/// any commitment if two exponents placed in the same class by `map`
/// disagree in the given witnesses, so an inconsistent witness set is
/// rejected before it can leak anything through a commitment.
pub fn prove<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    witnesses: &[Witness<C>],
    map: &EqualityMap,
    rng: &mut Rng,
) -> Result<EqualityProof<C>, Error> {
    let widths: Vec<usize> = witnesses.iter().map(Witness::width).collect();
    map.validate(&widths)?;

    for members in map.classes.values() {
        if let Some(&(s0, e0)) = members.first() {
            let expected = witnesses[s0].exponent(e0);
            for &(s, e) in &members[1..] {
                if witnesses[s].exponent(e) != expected {
                    return Err(InvalidWitness::InconsistentEquality.into());
                }
            }
        }
    }

    let class_randoms: BTreeMap<String, C::Scalar> =
        map.classes.keys().map(|name| (name.clone(), C::generate_scalar(rng))).collect();

    let mut free_randoms = Vec::with_capacity(map.free_count(&widths));
    let mut r_vectors = Vec::with_capacity(witnesses.len());
    for (s, w) in witnesses.iter().enumerate() {
        let mut r_vec = Vec::with_capacity(w.width());
        for e in 0..w.width() {
            let r = match map.class_of(s, e) {
                Some(name) => class_randoms[name],
                None => {
                    let r = C::generate_scalar(rng);
                    free_randoms.push(r);
                    r
                }
            };
            r_vec.push(r);
        }
        r_vectors.push(r_vec);
    }

    let commitments = witnesses
        .iter()
        .zip(r_vectors.iter())
        .map(|(w, r)| w.compute_commitment(r))
        .collect::<Result<Vec<_>, _>>()?;

    let statements: Vec<&Statement<C>> = witnesses.iter().map(Witness::statement).collect();
    let challenge = transcript_for(domain, params, &statements, map, &commitments).result_to_scalar::<C>();

    let responses_eq = map
        .classes
        .iter()
        .map(|(_, members)| {
            let &(s, e) = members.first().expect("class is never empty");
            witnesses[s].compute_response(challenge, r_vectors[s][e], e)
        })
        .collect();

    let mut responses_ne = Vec::with_capacity(free_randoms.len());
    let mut free_idx = 0;
    for (s, w) in witnesses.iter().enumerate() {
        for e in 0..w.width() {
            if map.class_of(s, e).is_none() {
                responses_ne.push(w.compute_response(challenge, free_randoms[free_idx], e));
                free_idx += 1;
            }
        }
    }

    Ok(EqualityProof { commitments, responses_eq, responses_ne })
}

/// Verify an [`EqualityProof`] against the given statements and map. Total
/// on adversarial input: any shape mismatch fails rather than panics.
pub fn verify<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    statements: &[Statement<C>],
    map: &EqualityMap,
    proof: &EqualityProof<C>,
) -> bool {
    let widths: Vec<usize> = statements.iter().map(Statement::width).collect();
    if map.validate(&widths).is_err() {
        return false;
    }
    if proof.commitments.len() != statements.len() {
        return false;
    }
    if proof.responses_eq.len() != map.class_count() {
        return false;
    }
    if proof.responses_ne.len() != map.free_count(&widths) {
        return false;
    }

    let refs: Vec<&Statement<C>> = statements.iter().collect();
    let challenge = transcript_for(domain, params, &refs, map, &proof.commitments).result_to_scalar::<C>();

    let mut responses_per_statement: Vec<Vec<C::Scalar>> =
        widths.iter().map(|w| vec![C::Scalar::zero(); *w]).collect();

    for (class_idx, members) in map.classes.values().enumerate() {
        for &(s, e) in members {
            responses_per_statement[s][e] = proof.responses_eq[class_idx];
        }
    }

    let mut free_idx = 0;
    for (s, width) in widths.iter().enumerate() {
        for e in 0..*width {
            if map.class_of(s, e).is_none() {
                responses_per_statement[s][e] = proof.responses_ne[free_idx];
                free_idx += 1;
            }
        }
    }

    statements
        .iter()
        .enumerate()
        .all(|(s, statement)| statement.verify(proof.commitments[s], challenge, &responses_per_statement[s]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use crate::random_oracle::HashId;
    use rand::thread_rng;

    fn params(rng: &mut impl RngCore) -> CryptoParams<RistrettoCurve> {
        CryptoParams::generate("sigma-test", 4, HashId::Sha3_512).unwrap()
    }

    #[test]
    fn equal_attribute_across_two_pedersen_commitments_verifies() {
        let mut rng = thread_rng();
        let p = params(&mut rng);
        let shared = RistrettoCurve::generate_scalar(&mut rng);
        let o1 = RistrettoCurve::generate_scalar(&mut rng);
        let o2 = RistrettoCurve::generate_scalar(&mut rng);
        let w1 = Witness::pedersen(p.base(), p.attribute_generator(1).unwrap(), shared, o1);
        let w2 = Witness::pedersen(p.base(), p.attribute_generator(2).unwrap(), shared, o2);

        let mut map = EqualityMap::new();
        map.equate("shared", 0, 0).equate("shared", 1, 0);

        let proof = prove(
            "test-equality",
            &p,
            &[w1.clone(), w2.clone()],
            &map,
            &mut rng,
        )
        .unwrap();

        let statements = vec![w1.statement().clone(), w2.statement().clone()];
        assert!(verify("test-equality", &p, &statements, &map, &proof));
    }

    #[test]
    fn inconsistent_witnesses_are_rejected_before_any_commitment() {
        let mut rng = thread_rng();
        let p = params(&mut rng);
        let x1 = RistrettoCurve::generate_scalar(&mut rng);
        let x2 = RistrettoCurve::generate_scalar(&mut rng);
        let o1 = RistrettoCurve::generate_scalar(&mut rng);
        let o2 = RistrettoCurve::generate_scalar(&mut rng);
        let w1 = Witness::pedersen(p.base(), p.attribute_generator(1).unwrap(), x1, o1);
        let w2 = Witness::pedersen(p.base(), p.attribute_generator(2).unwrap(), x2, o2);

        let mut map = EqualityMap::new();
        map.equate("shared", 0, 0).equate("shared", 1, 0);

        let err = prove("test-equality", &p, &[w1, w2], &map, &mut rng).unwrap_err();
        assert_eq!(err, Error::Witness(InvalidWitness::InconsistentEquality));
    }

    #[test]
    fn mutating_a_response_breaks_verification() {
        let mut rng = thread_rng();
        let p = params(&mut rng);
        let x = RistrettoCurve::generate_scalar(&mut rng);
        let o = RistrettoCurve::generate_scalar(&mut rng);
        let w = Witness::pedersen(p.base(), p.attribute_generator(1).unwrap(), x, o);
        let map = EqualityMap::new();
        let mut proof = prove("test-mutate", &p, &[w.clone()], &map, &mut rng).unwrap();
        proof.responses_ne[0] = RistrettoCurve::generate_scalar(&mut rng);
        let statements = vec![w.statement().clone()];
        assert!(!verify("test-mutate", &p, &statements, &map, &proof));
    }

    #[test]
    fn map_digest_is_order_independent() {
        let mut m1 = EqualityMap::new();
        m1.equate("a", 0, 0).equate("b", 1, 1).equate("a", 2, 0);

        let mut m2 = EqualityMap::new();
        m2.equate("b", 1, 1).equate("a", 2, 0).equate("a", 0, 0);

        assert_eq!(m1.digest_bytes(), m2.digest_bytes());
    }
}
