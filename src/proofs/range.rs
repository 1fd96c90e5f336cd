//! Range proof (component C8): prove an order relation between two
//! committed integers, both bounded to a public interval.
//!
//! Built from a helper-commitment construction: bit decompositions of both
//! operands (component C7), the `D[i]`/`X[i]`/`E[i]` recurrence that encodes
//! the sign of each bit-prefix comparison, one equality-engine run
//! (component C4) tying the recurrence together, and a terminal
//! set-membership proof (component C6) on the final sign bit.

use rand::{CryptoRng, RngCore};

use crate::common::{Buffer, Deserial, Serial};
use crate::curve_arithmetic::{Curve, Field};
use crate::dlrep::{Statement, Witness};
use crate::error::{Error, ParameterError};
use crate::params::CryptoParams;
use crate::pedersen_commitment::{Commitment, CommitmentKey, Randomness, Value};
use crate::sigma::{self, EqualityMap, EqualityProof};

use super::bit_decomposition::{self, BitDecompositionProof};
use super::set_membership::{self, SetMembershipProof};

/// The supported order relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    /// `D[m-1]` is required to open to one of these values for the
    /// comparison to hold.
    fn terminal_set<C: Curve>(self) -> Vec<C::Scalar> {
        let one = C::Scalar::one();
        let minus_one = one.neg();
        let zero = C::Scalar::zero();
        match self {
            Comparison::Greater => vec![one],
            Comparison::GreaterOrEqual => vec![zero, one],
            Comparison::Less => vec![minus_one],
            Comparison::LessOrEqual => vec![zero, minus_one],
        }
    }
}

/// The maximum supported width of `maxV - minV`.
pub const MAX_RANGE_BITS: u32 = 30;

fn bit_length(range_width: u64) -> u32 {
    if range_width == 0 { 1 } else { 64 - range_width.leading_zeros() }
}

/// A single bounded integer witness: its value, commitment opening, and
/// little-endian bit decomposition (already shifted so `0` represents the
/// range's `minV`).
pub struct BoundedWitness<C: Curve> {
    pub value:      Value<C>,
    pub randomness: Randomness<C>,
    pub bits:       Vec<bool>,
}

impl<C: Curve> BoundedWitness<C> {
    /// Build a witness for `raw_value - min_v`, deriving its bit
    /// decomposition from the shifted unsigned integer. `raw_value` and
    /// `min_v` are ordinary `u64`s because the quantities this crate runs
    /// range proofs over (dates, small counters) always fit comfortably
    /// under [`MAX_RANGE_BITS`]; the committed scalar is derived from the
    /// shifted integer via [`crate::curve_arithmetic::Field::from_u64`].
    pub fn new<R: RngCore + CryptoRng>(raw_value: u64, min_v: u64, bit_count: u32, rng: &mut R) -> Result<Self, ParameterError> {
        if raw_value < min_v {
            return Err(ParameterError::MinExceedsMax { min: min_v as i64, max: raw_value as i64 });
        }
        let shifted = raw_value - min_v;
        let bits = (0..bit_count).map(|i| (shifted >> i) & 1 == 1).collect();
        Ok(BoundedWitness {
            value:      Value::from_u64(shifted),
            randomness: Randomness::generate(rng),
            bits,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeProof<C: Curve> {
    comparison:      Comparison,
    bit_count:       usize,
    a_decomposition: BitDecompositionProof<C>,
    b_decomposition: BitDecompositionProof<C>,
    a_div_b:         Vec<Commitment<C>>,
    d:               Vec<Commitment<C>>,
    x:               Vec<Commitment<C>>,
    e:               Vec<Commitment<C>>,
    equality_proof:  EqualityProof<C>,
    terminal:        SetMembershipProof<C>,
}

impl<C: Curve> Serial for RangeProof<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        (self.comparison as u32).serial(out);
        (self.bit_count as u32).serial(out);
        self.a_decomposition.serial(out);
        self.b_decomposition.serial(out);
        self.a_div_b.serial(out);
        self.d.serial(out);
        self.x.serial(out);
        self.e.serial(out);
        self.equality_proof.serial(out);
        self.terminal.serial(out);
    }
}

impl<C: Curve> Deserial for RangeProof<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, crate::error::SerializationError> {
        use crate::error::SerializationError;
        let comparison = match u32::deserial(source)? {
            0 => Comparison::Less,
            1 => Comparison::LessOrEqual,
            2 => Comparison::Greater,
            3 => Comparison::GreaterOrEqual,
            other => return Err(SerializationError::WrongEncoding { field: "comparison", reason: format!("{}", other) }),
        };
        let bit_count = u32::deserial(source)? as usize;
        let a_decomposition = Deserial::deserial(source)?;
        let b_decomposition = Deserial::deserial(source)?;
        let a_div_b = Vec::deserial(source)?;
        let d = Vec::deserial(source)?;
        let x = Vec::deserial(source)?;
        let e = Vec::deserial(source)?;
        let equality_proof = Deserial::deserial(source)?;
        let terminal = Deserial::deserial(source)?;
        Ok(RangeProof { comparison, bit_count, a_decomposition, b_decomposition, a_div_b, d, x, e, equality_proof, terminal })
    }
}

/// Combine two Pedersen commitments sharing the same `(g0, g1)` key into
/// their homomorphic difference: `A * B^-1` commits to `a - b` under
/// opening `opening_a - opening_b`.
fn sub_commitments<C: Curve>(a: &Commitment<C>, b: &Commitment<C>) -> C { a.point().minus_point(&b.point()) }

/// Prove `a` compares to `b` under `comparison`, both already shifted so
/// `0` represents the range's `minV` and both decomposed into exactly
/// `max_width`'s bit length bits.
pub fn prove<C: Curve, Rng: RngCore + CryptoRng>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    comparison: Comparison,
    max_width: u64,
    a: &BoundedWitness<C>,
    b: &BoundedWitness<C>,
    rng: &mut Rng,
) -> Result<(Commitment<C>, Commitment<C>, RangeProof<C>), Error> {
    let m = bit_length(max_width) as usize;
    if m as u32 > MAX_RANGE_BITS {
        return Err(ParameterError::RangeTooWide { width: max_width, limit: MAX_RANGE_BITS }.into());
    }
    if a.bits.len() != m || b.bits.len() != m {
        return Err(ParameterError::MismatchedLengths { bases: m, exponents: a.bits.len().max(b.bits.len()) }.into());
    }

    let (a_commitment, a_decomposition, a_bit_randomness) =
        bit_decomposition::prove_with_randomness(domain, params, key, &a.value, &a.randomness, &a.bits, rng)?;
    let (b_commitment, b_decomposition, b_bit_randomness) =
        bit_decomposition::prove_with_randomness(domain, params, key, &b.value, &b.randomness, &b.bits, rng)?;

    let diff_bits: Vec<C::Scalar> = (0..m)
        .map(|i| {
            let ai = if a.bits[i] { C::Scalar::one() } else { C::Scalar::zero() };
            let bi = if b.bits[i] { C::Scalar::one() } else { C::Scalar::zero() };
            ai.sub(&bi)
        })
        .collect();
    // AdivB[i] is the homomorphic difference of the two bit commitments,
    // so its opening is forced: it is not free randomness.
    let adivb_randomness: Vec<C::Scalar> = (0..m)
        .map(|i| a_bit_randomness[i].as_value_ref().sub(b_bit_randomness[i].as_value_ref()))
        .collect();
    let a_div_b_points: Vec<C> = a_decomposition
        .bit_commitments
        .iter()
        .zip(b_decomposition.bit_commitments.iter())
        .map(sub_commitments)
        .collect();

    let mut d_values = vec![C::Scalar::zero(); m];
    d_values[0] = diff_bits[0];
    for i in 1..m {
        let prev = d_values[i - 1];
        let diff = diff_bits[i];
        d_values[i] = prev.sub(&prev.mul(&diff).mul(&diff)).add(&diff);
    }
    let d_randomness: Vec<C::Scalar> = (0..m).map(|_| C::generate_scalar(rng)).collect();
    let d_commitments: Vec<Commitment<C>> = (0..m)
        .map(|i| key.commit(&Value::new(d_values[i]), &Randomness::new(d_randomness[i])))
        .collect();

    // x[i], e[i] for i in 1..m, stored at vector index i-1.
    let mut x_witnesses = Vec::with_capacity(m - 1);
    let mut e_witnesses = Vec::with_capacity(m - 1);
    let mut x_commitment_points = Vec::with_capacity(m - 1);
    let mut e_commitment_points = Vec::with_capacity(m - 1);

    for i in 1..m {
        let diff = diff_bits[i];
        let x_base0 = a_div_b_points[i];
        let x_opening = C::generate_scalar(rng);
        let x_witness = Witness::new(vec![x_base0, key.g1], vec![diff, x_opening])?;
        x_commitment_points.push(x_witness.statement().value());
        x_witnesses.push(x_witness);

        // e_opening is the unique value making `e_witness`'s
        // auto-computed statement value equal
        // `D[i] - D[i-1] - AdivB[i]`, per the module documentation's
        // worked derivation.
        let e_opening = d_randomness[i]
            .sub(&d_randomness[i - 1])
            .sub(&adivb_randomness[i])
            .add(&adivb_randomness[i].mul(&diff).mul(&d_values[i - 1]))
            .add(&d_values[i - 1].mul(&x_opening));
        let e_base0 = x_commitment_points[i - 1].inverse_point();
        let e_witness = Witness::new(vec![e_base0, key.g1], vec![d_values[i - 1], e_opening])?;
        e_commitment_points.push(e_witness.statement().value());
        e_witnesses.push(e_witness);
    }

    // Assemble the full statement list for one equality-engine run:
    //   [0, m)        AdivB[i]
    //   [m, 2m)       D[i]
    //   [2m, 3m-1)    X[i], i in 1..m
    //   [3m-1, 4m-2)  E[i], i in 1..m
    let mut witnesses = Vec::with_capacity(4 * m - 2);
    for i in 0..m {
        witnesses.push(Witness::pedersen(key.g0, key.g1, diff_bits[i], adivb_randomness[i]));
    }
    for i in 0..m {
        witnesses.push(Witness::pedersen(key.g0, key.g1, d_values[i], d_randomness[i]));
    }
    witnesses.extend(x_witnesses);
    witnesses.extend(e_witnesses);

    let map = delta_chi_map(m);
    let equality_proof = sigma::prove(domain, params, &witnesses, &map, rng)?;

    let terminal_set = comparison.terminal_set::<C>();
    let terminal_value = Value::new(d_values[m - 1]);
    let terminal_randomness = Randomness::new(d_randomness[m - 1]);
    let (_terminal_commitment, terminal) =
        set_membership::prove(domain, params, key, &terminal_set, &terminal_value, &terminal_randomness, rng)?;

    let a_div_b = (0..m).map(|i| Commitment::from_point(a_div_b_points[i])).collect();
    let x = x_commitment_points.into_iter().map(Commitment::from_point).collect();
    let e = e_commitment_points.into_iter().map(Commitment::from_point).collect();

    Ok((
        a_commitment,
        b_commitment,
        RangeProof {
            comparison,
            bit_count: m,
            a_decomposition,
            b_decomposition,
            a_div_b,
            d: d_commitments,
            x,
            e,
            equality_proof,
            terminal,
        },
    ))
}

/// The `delta_i`/`chi_i` equivalence classes shared by [`prove`] and
/// [`verify`]: `delta_i` ties `D[i]`'s committed value to `E[i+1]`'s (both
/// equal `d_i`); `chi_i` ties `AdivB[i]`'s committed value to `X[i]`'s
/// (both equal `a_i - b_i`).
fn delta_chi_map(m: usize) -> EqualityMap {
    let mut map = EqualityMap::new();
    for i in 0..m.saturating_sub(1) {
        let d_i_stmt = m + i;
        let e_i1_stmt = 2 * m + (m - 1) + i;
        map.equate(format!("delta{}", i), d_i_stmt, 0);
        map.equate(format!("delta{}", i), e_i1_stmt, 0);

        let adivb_stmt = i + 1;
        let x_stmt = 2 * m + i;
        map.equate(format!("chi{}", i + 1), adivb_stmt, 0);
        map.equate(format!("chi{}", i + 1), x_stmt, 0);
    }
    map
}

/// Verify a [`RangeProof`] against the two public commitments.
pub fn verify<C: Curve>(
    domain: &str,
    params: &CryptoParams<C>,
    key: &CommitmentKey<C>,
    a_commitment: &Commitment<C>,
    b_commitment: &Commitment<C>,
    proof: &RangeProof<C>,
) -> bool {
    let m = proof.bit_count;
    if m == 0 || proof.a_div_b.len() != m || proof.d.len() != m {
        return false;
    }
    if proof.x.len() + 1 != m || proof.e.len() + 1 != m {
        return false;
    }

    if !bit_decomposition::verify(domain, params, key, a_commitment, m, &proof.a_decomposition) {
        return false;
    }
    if !bit_decomposition::verify(domain, params, key, b_commitment, m, &proof.b_decomposition) {
        return false;
    }

    for i in 0..m {
        let recomputed = sub_commitments(&proof.a_decomposition.bit_commitments[i], &proof.b_decomposition.bit_commitments[i]);
        if recomputed != proof.a_div_b[i].point() {
            return false;
        }
    }

    let mut statements = Vec::with_capacity(4 * m - 2);
    for c in &proof.a_div_b {
        statements.push(Statement::pedersen(key.g0, key.g1, c.point()));
    }
    for c in &proof.d {
        statements.push(Statement::pedersen(key.g0, key.g1, c.point()));
    }
    for i in 1..m {
        let base0 = proof.a_div_b[i].point();
        let Ok(s) = Statement::new(vec![base0, key.g1], proof.x[i - 1].point()) else { return false };
        statements.push(s);
    }
    for i in 1..m {
        let value = proof.d[i].point().minus_point(&proof.d[i - 1].point()).minus_point(&proof.a_div_b[i].point());
        let base0 = proof.x[i - 1].point().inverse_point();
        let Ok(s) = Statement::new(vec![base0, key.g1], value) else { return false };
        statements.push(s);
    }

    let map = delta_chi_map(m);
    if !sigma::verify(domain, params, &statements, &map, &proof.equality_proof) {
        return false;
    }

    let terminal_set = proof.comparison.terminal_set::<C>();
    set_membership::verify(domain, params, key, &terminal_set, &proof.d[m - 1], &proof.terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use crate::random_oracle::HashId;
    use rand::thread_rng;

    #[test]
    fn forty_two_is_greater_or_equal_to_twenty() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("range-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let a = BoundedWitness::<RistrettoCurve>::new(42, 0, 7, &mut rng).unwrap();
        let b = BoundedWitness::<RistrettoCurve>::new(20, 0, 7, &mut rng).unwrap();

        let (ca, cb, proof) = prove("range1", &params, &key, Comparison::GreaterOrEqual, 127, &a, &b, &mut rng).unwrap();

        assert!(verify("range1", &params, &key, &ca, &cb, &proof));
    }

    #[test]
    fn twenty_is_not_greater_than_forty_two() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("range-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let a = BoundedWitness::<RistrettoCurve>::new(20, 0, 7, &mut rng).unwrap();
        let b = BoundedWitness::<RistrettoCurve>::new(42, 0, 7, &mut rng).unwrap();

        let (ca, cb, proof) = prove("range2", &params, &key, Comparison::Greater, 127, &a, &b, &mut rng).unwrap();

        assert!(!verify("range2", &params, &key, &ca, &cb, &proof));
    }

    #[test]
    fn only_the_true_relations_verify_for_an_ordered_pair() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("range-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let a = BoundedWitness::<RistrettoCurve>::new(20, 0, 7, &mut rng).unwrap();
        let b = BoundedWitness::<RistrettoCurve>::new(42, 0, 7, &mut rng).unwrap();

        let expected = [
            (Comparison::Less, true),
            (Comparison::LessOrEqual, true),
            (Comparison::Greater, false),
            (Comparison::GreaterOrEqual, false),
        ];
        for (comparison, should_hold) in expected {
            let domain = format!("range-monotonicity-{:?}", comparison);
            let result = prove(&domain, &params, &key, comparison, 127, &a, &b, &mut rng)
                .map(|(ca, cb, proof)| verify(&domain, &params, &key, &ca, &cb, &proof));
            assert_eq!(result.unwrap_or(false), should_hold, "comparison {:?}", comparison);
        }
    }

    #[test]
    fn width_past_the_bit_cap_is_rejected() {
        let mut rng = thread_rng();
        let params = CryptoParams::<RistrettoCurve>::generate("range-test", 2, HashId::Sha256).unwrap();
        let key = params.pedersen_key();
        let a = BoundedWitness::<RistrettoCurve>::new(1, 0, 1, &mut rng).unwrap();
        let b = BoundedWitness::<RistrettoCurve>::new(0, 0, 1, &mut rng).unwrap();

        let err = prove(
            "range3",
            &params,
            &key,
            Comparison::GreaterOrEqual,
            1u64 << 31,
            &a,
            &b,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, Error::Parameter(ParameterError::RangeTooWide { width: 1u64 << 31, limit: MAX_RANGE_BITS }));
    }
}
