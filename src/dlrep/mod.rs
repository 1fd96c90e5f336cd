//! Discrete-log representation objects (component C3): the open (witness)
//! and closed (statement) forms of `V = prod b_i^x_i`, and the three
//! operations (`compute_commitment`, `compute_response`, `verify`) every
//! higher proof is built against.
//!
//! Three statement shapes (a plain representation, a Pedersen commitment,
//! a U-Prove token) share the same three operations; rather than an
//! inheritance hierarchy of closed-proof types, each shape is a
//! discriminant of one tagged [`StatementKind`] enum: one struct, one
//! enum, no trait object dispatch. All three evaluate `compute_commitment`/
//! `verify` identically (`prod b_i^{r_i}`, `commit ?= prod b_i^{resp_i} *
//! V^c`); the tag exists so callers and serialized data can tell the
//! shapes apart, not because the algebra differs between them.

use crate::common::{Buffer, Deserial, Secret, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::error::{ParameterError, SerializationError};

/// Which of the three statement shapes a [`Statement`] is. `Plain` is a
/// bare DL-rep; `Pedersen` is the two-base specialization (component C5);
/// `Token` is the U-Prove credential-public-key variant (component C10),
/// whose exponent 0 is the credential's private key and whose remaining
/// exponents are the attribute values it hides. A `Token` statement is
/// evaluated exactly like `Plain` — the tag only distinguishes it for
/// callers and serialized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Plain,
    Pedersen,
    Token,
}

/// The closed (statement) form: bases and the target value, exponents
/// unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<C: Curve> {
    kind:  StatementKind,
    bases: Vec<C>,
    value: C,
}

impl<C: Curve> Statement<C> {
    pub fn new(bases: Vec<C>, value: C) -> Result<Self, ParameterError> {
        if bases.is_empty() {
            return Err(ParameterError::EmptyBases);
        }
        Ok(Statement { kind: StatementKind::Plain, bases, value })
    }

    pub fn pedersen(g0: C, g1: C, value: C) -> Self {
        Statement { kind: StatementKind::Pedersen, bases: vec![g0, g1], value }
    }

    /// `bases = [g0, g1, ..., gt]`, `value` = the credential public key
    /// `h = prod b_i^{x_i}` (exponent 0 the private key, the rest the
    /// hidden attribute values).
    pub fn token(bases: Vec<C>, public_key: C) -> Result<Self, ParameterError> {
        if bases.is_empty() {
            return Err(ParameterError::EmptyBases);
        }
        Ok(Statement { kind: StatementKind::Token, bases, value: public_key })
    }

    pub fn kind(&self) -> StatementKind { self.kind }

    pub fn bases(&self) -> &[C] { &self.bases }

    pub fn value(&self) -> C { self.value }

    pub fn width(&self) -> usize { self.bases.len() }

    /// `prod b_i^{r_i}`.
    pub fn compute_commitment(&self, r: &[C::Scalar]) -> Result<C, ParameterError> {
        if r.len() != self.bases.len() {
            return Err(ParameterError::MismatchedLengths { bases: self.bases.len(), exponents: r.len() });
        }
        Ok(C::multi_exp(&self.bases, r))
    }

    /// `commit ?= prod b_i^{resp_i} * V^c`.
    pub fn verify(&self, commitment: C, challenge: C::Scalar, responses: &[C::Scalar]) -> bool {
        if responses.len() != self.bases.len() {
            return false;
        }
        let rhs = C::multi_exp(&self.bases, responses).plus_point(&self.value.mul_by_scalar(&challenge));
        commitment == rhs
    }
}

impl<C: Curve> Serial for Statement<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        (self.kind as u32).serial(out);
        self.bases.serial(out);
        self.value.serial(out);
    }
}

impl<C: Curve> Deserial for Statement<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        let kind = match u32::deserial(source)? {
            0 => StatementKind::Plain,
            1 => StatementKind::Pedersen,
            2 => StatementKind::Token,
            other => {
                return Err(SerializationError::WrongEncoding {
                    field:  "statement kind",
                    reason: format!("unknown discriminant {}", other),
                })
            }
        };
        let bases = Vec::<C>::deserial(source)?;
        let value = C::deserial(source)?;
        Ok(Statement { kind, bases, value })
    }
}

/// The open (witness) form: bases, exponents, and the value they produce.
/// Exponents are wrapped in [`Secret`] so they are wiped once the witness
/// is dropped.
#[derive(Debug, Clone)]
pub struct Witness<C: Curve> {
    statement: Statement<C>,
    exponents: Vec<Secret<C::Scalar>>,
}

impl<C: Curve> Witness<C> {
    /// Builds the witness and recomputes `V = prod b_i^x_i` from the given
    /// bases and exponents, so the statement is always consistent with
    /// the witness that produced it.
    pub fn new(bases: Vec<C>, exponents: Vec<C::Scalar>) -> Result<Self, ParameterError> {
        if bases.is_empty() {
            return Err(ParameterError::EmptyBases);
        }
        if bases.len() != exponents.len() {
            return Err(ParameterError::MismatchedLengths { bases: bases.len(), exponents: exponents.len() });
        }
        let value = C::multi_exp(&bases, &exponents);
        let statement = Statement { kind: StatementKind::Plain, bases, value };
        Ok(Witness { statement, exponents: exponents.into_iter().map(Secret::new).collect() })
    }

    pub fn pedersen(g0: C, g1: C, x: C::Scalar, o: C::Scalar) -> Self {
        let value = C::multi_exp(&[g0, g1], &[x, o]);
        Witness {
            statement: Statement { kind: StatementKind::Pedersen, bases: vec![g0, g1], value },
            exponents: vec![Secret::new(x), Secret::new(o)],
        }
    }

    /// `bases = [g0, ..., gt]`, `exponents = [private_key, x1, ..., xt]`.
    /// Recomputes `h = prod b_i^{x_i}` from the given bases and exponents,
    /// same as [`Witness::new`], so the statement is always consistent
    /// with the witness that produced it.
    pub fn token(bases: Vec<C>, exponents: Vec<C::Scalar>) -> Result<Self, ParameterError> {
        if bases.is_empty() {
            return Err(ParameterError::EmptyBases);
        }
        if bases.len() != exponents.len() {
            return Err(ParameterError::MismatchedLengths { bases: bases.len(), exponents: exponents.len() });
        }
        let value = C::multi_exp(&bases, &exponents);
        Ok(Witness {
            statement: Statement { kind: StatementKind::Token, bases, value },
            exponents: exponents.into_iter().map(Secret::new).collect(),
        })
    }

    pub fn statement(&self) -> &Statement<C> { &self.statement }

    pub fn width(&self) -> usize { self.exponents.len() }

    pub fn exponent(&self, i: usize) -> C::Scalar { *self.exponents[i].expose() }

    pub fn compute_commitment(&self, r: &[C::Scalar]) -> Result<C, ParameterError> {
        self.statement.compute_commitment(r)
    }

    /// `r - c * x_i`.
    pub fn compute_response(&self, challenge: C::Scalar, r: C::Scalar, i: usize) -> C::Scalar {
        r.sub(&challenge.mul(&self.exponent(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use rand::thread_rng;

    #[test]
    fn plain_witness_honest_transcript_verifies() {
        let mut rng = thread_rng();
        let b0 = RistrettoCurve::generate(&mut rng);
        let b1 = RistrettoCurve::generate(&mut rng);
        let x0 = RistrettoCurve::generate_scalar(&mut rng);
        let x1 = RistrettoCurve::generate_scalar(&mut rng);
        let witness = Witness::new(vec![b0, b1], vec![x0, x1]).unwrap();

        let r0 = RistrettoCurve::generate_scalar(&mut rng);
        let r1 = RistrettoCurve::generate_scalar(&mut rng);
        let commitment = witness.compute_commitment(&[r0, r1]).unwrap();
        let challenge = RistrettoCurve::generate_scalar(&mut rng);
        let resp = vec![
            witness.compute_response(challenge, r0, 0),
            witness.compute_response(challenge, r1, 1),
        ];
        assert!(witness.statement().verify(commitment, challenge, &resp));
    }

    #[test]
    fn token_witness_honest_transcript_verifies() {
        let mut rng = thread_rng();
        let g0 = RistrettoCurve::generate(&mut rng);
        let g1 = RistrettoCurve::generate(&mut rng);
        let g2 = RistrettoCurve::generate(&mut rng);
        let private_key = RistrettoCurve::generate_scalar(&mut rng);
        let x1 = RistrettoCurve::generate_scalar(&mut rng);
        let x2 = RistrettoCurve::generate_scalar(&mut rng);
        let witness = Witness::token(vec![g0, g1, g2], vec![private_key, x1, x2]).unwrap();

        let r: Vec<_> = (0..3).map(|_| RistrettoCurve::generate_scalar(&mut rng)).collect();
        let commitment = witness.compute_commitment(&r).unwrap();
        let challenge = RistrettoCurve::generate_scalar(&mut rng);
        let resp: Vec<_> = (0..3).map(|i| witness.compute_response(challenge, r[i], i)).collect();
        assert!(witness.statement().verify(commitment, challenge, &resp));
    }

    #[test]
    fn wrong_length_exponents_is_rejected() {
        let mut rng = thread_rng();
        let b0 = RistrettoCurve::generate(&mut rng);
        let x0 = RistrettoCurve::generate_scalar(&mut rng);
        assert_eq!(
            Witness::<RistrettoCurve>::new(vec![b0], vec![x0, x0]).unwrap_err(),
            ParameterError::MismatchedLengths { bases: 1, exponents: 2 }
        );
    }

    #[test]
    fn statement_round_trips() {
        use crate::common::{from_bytes, to_bytes};
        let mut rng = thread_rng();
        let g0 = RistrettoCurve::generate(&mut rng);
        let g1 = RistrettoCurve::generate(&mut rng);
        let v = RistrettoCurve::generate(&mut rng);
        let statement = Statement::pedersen(g0, g1, v);
        let bytes = to_bytes(&statement);
        let back: Statement<RistrettoCurve> = from_bytes(&bytes).unwrap();
        assert_eq!(statement, back);
    }
}
