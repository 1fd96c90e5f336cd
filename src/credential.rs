//! Credential binding (component C10): adapters turning a presentation's
//! per-attribute commitments into the witnesses and statements every proof
//! above it is built against.
//!
//! A verifier is handed a list of attribute commitments and a prover the
//! matching openings; this module reduces that exchange to two operations:
//! binding a target attribute index to an open Pedersen witness, and
//! constructing the token statement that models a credential's public key
//! as a Schnorr-style discrete-log representation (component C3's
//! [`crate::dlrep::StatementKind::Token`] variant).
//!
//! A bare [`Presentation`] carries no provenance: a verifier who only sees
//! attribute commitments cannot tell when the presentation was produced or
//! reject one built for some other relying party. [`PresentationMetadata`]
//! and [`PresentedCredential`] wrap a presentation the way `ProofMetadata`
//! wraps a `CredentialProof` — a creation timestamp, the credential's
//! issuance date, and an issuer/scope identity a verifier checks before it
//! looks at any zero-knowledge content at all.

use chrono::{DateTime, Duration, Utc};

use crate::curve_arithmetic::{Curve, Field};
use crate::dlrep::{Statement, Witness};
use crate::error::{Error, InvalidWitness, ParameterError};
use crate::params::CryptoParams;
use crate::pedersen_commitment::{Commitment, Randomness, Value};

/// One attribute's public commitment and its private opening, as handed
/// over by the credential-presentation protocol this crate does not
/// itself implement.
#[derive(Debug, Clone)]
pub struct AttributeCommitment<C: Curve> {
    pub commitment: Commitment<C>,
    pub opening:    Randomness<C>,
}

/// The commitments carried by a single credential presentation, indexed
/// zero-based internally but addressed one-based externally.
#[derive(Debug, Clone, Default)]
pub struct Presentation<C: Curve> {
    pub attribute_commitments: Vec<AttributeCommitment<C>>,
}

impl<C: Curve> Presentation<C> {
    pub fn new(attribute_commitments: Vec<AttributeCommitment<C>>) -> Self { Presentation { attribute_commitments } }

    fn attribute(&self, index: usize) -> Result<&AttributeCommitment<C>, ParameterError> {
        if index == 0 {
            return Err(ParameterError::ZeroAttributeIndex);
        }
        self.attribute_commitments
            .get(index - 1)
            .ok_or(ParameterError::StatementOutOfRange(index))
    }
}

/// Provenance attached to a presentation: when it was produced, when the
/// underlying credential was issued, and who it identifies as issuer and
/// relying-party scope. None of this is zero-knowledge content; it is
/// plaintext the verifier reads before ever constructing a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationMetadata {
    pub created:       DateTime<Utc>,
    pub issuance_date: DateTime<Utc>,
    pub issuer:        String,
    pub scope:         String,
}

/// A [`Presentation`] paired with its [`PresentationMetadata`]. Verifiers
/// call [`PresentedCredential::check_freshness`] before binding any
/// attribute, so a stale or out-of-scope presentation is rejected without
/// touching the commitments at all.
#[derive(Debug, Clone)]
pub struct PresentedCredential<C: Curve> {
    pub metadata:     PresentationMetadata,
    pub presentation: Presentation<C>,
}

impl<C: Curve> PresentedCredential<C> {
    pub fn new(metadata: PresentationMetadata, presentation: Presentation<C>) -> Self {
        PresentedCredential { metadata, presentation }
    }

    /// Rejects the presentation if its `scope` is not `expected_scope`, or
    /// if `now - metadata.created` exceeds `max_age`. `now` is supplied by
    /// the caller rather than read from the clock, so verification stays
    /// deterministic and testable.
    pub fn check_freshness(
        &self,
        now: DateTime<Utc>,
        max_age: Duration,
        expected_scope: &str,
    ) -> Result<(), ParameterError> {
        if self.metadata.scope != expected_scope {
            return Err(ParameterError::ScopeMismatch {
                expected: expected_scope.to_owned(),
                found:    self.metadata.scope.clone(),
            });
        }
        let age = now.signed_duration_since(self.metadata.created);
        if age > max_age {
            return Err(ParameterError::PresentationStale {
                age_secs:     age.num_seconds(),
                max_age_secs: max_age.num_seconds(),
            });
        }
        Ok(())
    }
}

/// Reconstruct the open Pedersen witness for attribute `index` (one-based):
/// `(g0, g1, attribute_value, opening)`, where `attribute_value` is the
/// canonical scalar encoding of the attribute, computed by the external
/// credential layer and supplied here directly. Fails with
/// [`InvalidWitness::AttributeMismatch`] before
/// returning anything if `attribute_value` does not actually open the
/// presentation's commitment at `index`.
pub fn bind_attribute<C: Curve>(
    params: &CryptoParams<C>,
    presentation: &Presentation<C>,
    index: usize,
    attribute_value: &Value<C>,
) -> Result<Witness<C>, Error> {
    let entry = presentation.attribute(index)?;
    let key = params.pedersen_key();
    if key.commit(attribute_value, &entry.opening) != entry.commitment {
        return Err(InvalidWitness::AttributeMismatch.into());
    }
    Ok(Witness::pedersen(key.g0, key.g1, *attribute_value.as_ref(), *entry.opening.as_value_ref()))
}

/// The verifier-side counterpart of [`bind_attribute`]: the closed
/// statement for attribute `index`, built from the presentation's public
/// commitment alone (no opening required).
pub fn attribute_statement<C: Curve>(
    params: &CryptoParams<C>,
    presentation: &Presentation<C>,
    index: usize,
) -> Result<Statement<C>, Error> {
    let entry = presentation.attribute(index).map_err(Error::from)?;
    let key = params.pedersen_key();
    Ok(Statement::pedersen(key.g0, key.g1, entry.commitment.point()))
}

/// The token witness modelling a credential's public key `h = g0^privateKey
/// * prod gi^xi`: exponent 0 is the private key, the remaining exponents
/// are the attribute values it hides. `attributes` must list exactly
/// `params.attribute_capacity()` values, one per one-based attribute index
/// in order. The returned witness recomputes `h` itself (see
/// [`Witness::token`]), so it is always self-consistent; compare
/// `witness.statement().value()` against a previously-issued public key to
/// confirm this witness opens that specific credential.
pub fn token_witness<C: Curve>(
    params: &CryptoParams<C>,
    attributes: &[Value<C>],
    private_key: &C::Scalar,
) -> Result<Witness<C>, Error> {
    if attributes.len() != params.attribute_capacity() {
        return Err(ParameterError::MismatchedLengths {
            bases:     params.attribute_capacity(),
            exponents: attributes.len(),
        }
        .into());
    }
    if private_key.is_zero() {
        return Err(ParameterError::ZeroPrivateKey.into());
    }
    let mut exponents = Vec::with_capacity(attributes.len() + 1);
    exponents.push(*private_key);
    for x in attributes {
        exponents.push(*x.as_ref());
    }
    Witness::token(params.generators().to_vec(), exponents).map_err(Error::from)
}

/// The verifier-side counterpart of [`token_witness`]: the closed token
/// statement for a credential's public key.
pub fn token_statement<C: Curve>(params: &CryptoParams<C>, public_key: C) -> Statement<C> {
    // `generators()` is never empty (CryptoParams::new rejects fewer than
    // two), so Statement::token cannot fail here.
    Statement::token(params.generators().to_vec(), public_key).expect("crypto params always carry at least one generator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use crate::random_oracle::HashId;
    use chrono::TimeZone;
    use rand::thread_rng;

    fn params() -> CryptoParams<RistrettoCurve> {
        CryptoParams::generate("credential-test", 3, HashId::Sha256).unwrap()
    }

    #[test]
    fn bind_attribute_round_trips_through_commit_and_open() {
        let mut rng = thread_rng();
        let p = params();
        let key = p.pedersen_key();
        let value = Value::<RistrettoCurve>::from_u64(77);
        let opening = Randomness::generate(&mut rng);
        let commitment = key.commit(&value, &opening);
        let presentation = Presentation::new(vec![AttributeCommitment { commitment, opening }]);

        let witness = bind_attribute(&p, &presentation, 1, &value).unwrap();
        assert_eq!(witness.statement().value(), commitment.point());
    }

    #[test]
    fn wrong_attribute_value_is_rejected() {
        let mut rng = thread_rng();
        let p = params();
        let key = p.pedersen_key();
        let value = Value::<RistrettoCurve>::from_u64(77);
        let opening = Randomness::generate(&mut rng);
        let commitment = key.commit(&value, &opening);
        let presentation = Presentation::new(vec![AttributeCommitment { commitment, opening }]);

        let wrong_value = Value::<RistrettoCurve>::from_u64(78);
        let err = bind_attribute(&p, &presentation, 1, &wrong_value).unwrap_err();
        assert_eq!(err, Error::Witness(InvalidWitness::AttributeMismatch));
    }

    #[test]
    fn fresh_presentation_in_scope_passes() {
        let metadata = PresentationMetadata {
            created:       Utc.ymd(2026, 7, 28).and_hms(12, 0, 0),
            issuance_date: Utc.ymd(2026, 1, 1).and_hms(0, 0, 0),
            issuer:        "issuer-1".to_owned(),
            scope:         "relying-party-a".to_owned(),
        };
        let presented = PresentedCredential::new(metadata, Presentation::<RistrettoCurve>::new(vec![]));

        let now = Utc.ymd(2026, 7, 28).and_hms(12, 4, 0);
        assert!(presented.check_freshness(now, Duration::minutes(10), "relying-party-a").is_ok());
    }

    #[test]
    fn stale_presentation_is_rejected() {
        let metadata = PresentationMetadata {
            created:       Utc.ymd(2026, 7, 28).and_hms(12, 0, 0),
            issuance_date: Utc.ymd(2026, 1, 1).and_hms(0, 0, 0),
            issuer:        "issuer-1".to_owned(),
            scope:         "relying-party-a".to_owned(),
        };
        let presented = PresentedCredential::new(metadata, Presentation::<RistrettoCurve>::new(vec![]));

        let now = Utc.ymd(2026, 7, 28).and_hms(12, 11, 0);
        let err = presented.check_freshness(now, Duration::minutes(10), "relying-party-a").unwrap_err();
        assert_eq!(err, ParameterError::PresentationStale { age_secs: 660, max_age_secs: 600 });
    }

    #[test]
    fn wrong_scope_is_rejected() {
        let metadata = PresentationMetadata {
            created:       Utc.ymd(2026, 7, 28).and_hms(12, 0, 0),
            issuance_date: Utc.ymd(2026, 1, 1).and_hms(0, 0, 0),
            issuer:        "issuer-1".to_owned(),
            scope:         "relying-party-a".to_owned(),
        };
        let presented = PresentedCredential::new(metadata, Presentation::<RistrettoCurve>::new(vec![]));

        let now = Utc.ymd(2026, 7, 28).and_hms(12, 1, 0);
        let err = presented.check_freshness(now, Duration::minutes(10), "relying-party-b").unwrap_err();
        assert_eq!(err, ParameterError::ScopeMismatch {
            expected: "relying-party-b".to_owned(),
            found:    "relying-party-a".to_owned(),
        });
    }

    #[test]
    fn token_witness_verifies_against_token_statement() {
        let mut rng = thread_rng();
        let p = params();
        let private_key = RistrettoCurve::generate_scalar(&mut rng);
        let attributes: Vec<Value<RistrettoCurve>> =
            (0..p.attribute_capacity()).map(|i| Value::from_u64(i as u64 + 1)).collect();

        let witness = token_witness(&p, &attributes, &private_key).unwrap();
        let public_key = witness.statement().value();
        let statement = token_statement(&p, public_key);
        assert_eq!(witness.statement(), &statement);

        let r: Vec<_> = (0..witness.width()).map(|_| RistrettoCurve::generate_scalar(&mut rng)).collect();
        let commitment = witness.compute_commitment(&r).unwrap();
        let challenge = RistrettoCurve::generate_scalar(&mut rng);
        let responses: Vec<_> = (0..witness.width()).map(|i| witness.compute_response(challenge, r[i], i)).collect();
        assert!(statement.verify(commitment, challenge, &responses));
    }

    #[test]
    fn shared_attribute_across_two_presentations_proves_equal() {
        use crate::proofs::equality::{prove_equal, verify_equal};

        let mut rng = thread_rng();
        let p = params();
        let key = p.pedersen_key();
        let shared = Value::<RistrettoCurve>::from_u64(2024);

        let opening_a = Randomness::generate(&mut rng);
        let commitment_a = key.commit(&shared, &opening_a);
        let presentation_a = Presentation::new(vec![
            AttributeCommitment { commitment: key.commit(&Value::from_u64(1), &Randomness::generate(&mut rng)), opening: Randomness::generate(&mut rng) },
            AttributeCommitment { commitment: key.commit(&Value::from_u64(2), &Randomness::generate(&mut rng)), opening: Randomness::generate(&mut rng) },
            AttributeCommitment { commitment: commitment_a, opening: opening_a.clone() },
        ]);

        let opening_b = Randomness::generate(&mut rng);
        let commitment_b = key.commit(&shared, &opening_b);
        let presentation_b = Presentation::new(vec![AttributeCommitment { commitment: commitment_b, opening: opening_b.clone() }]);

        let witness_a = bind_attribute(&p, &presentation_a, 3, &shared).unwrap();
        let witness_b = bind_attribute(&p, &presentation_b, 1, &shared).unwrap();
        assert_eq!(witness_a.statement().value(), commitment_a.point());
        assert_eq!(witness_b.statement().value(), commitment_b.point());

        let (c1, c2, proof) = prove_equal("cred-eq", &p, &key, &shared, &opening_a, &shared, &opening_b, &mut rng).unwrap();
        assert!(verify_equal("cred-eq", &p, &key, &c1, &c2, &proof));

        let mutated = Value::<RistrettoCurve>::from_u64(2025);
        assert!(bind_attribute(&p, &presentation_a, 3, &mutated).is_err());
    }

    #[test]
    fn zero_private_key_is_rejected() {
        let p = params();
        let attributes: Vec<Value<RistrettoCurve>> =
            (0..p.attribute_capacity()).map(|i| Value::from_u64(i as u64)).collect();
        let zero = <RistrettoCurve as Curve>::Scalar::zero();
        let err = token_witness(&p, &attributes, &zero).unwrap_err();
        assert_eq!(err, Error::Parameter(ParameterError::ZeroPrivateKey));
    }
}
