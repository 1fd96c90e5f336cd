//! The public parameter bundle shared between a prover and a verifier
//! (component C2): a group, a list of generators, and the hash identifier
//! used to derive Fiat-Shamir challenges.
//!
//! A curve, plus a shared commitment key known to every party, generalized
//! from a single Pedersen key to the arbitrary-length generator list
//! `g_0..g_n` that every dlrep/Pedersen/token statement in this crate is
//! built against.

use crate::common::{to_bytes, Buffer, Deserial, Serial};
use crate::curve_arithmetic::Curve;
use crate::error::{ParameterError, SerializationError};
use crate::random_oracle::{HashId, RandomOracle};

/// `{G, generators = [g_0, ..., g_n], hashId}`.
///
/// `generators[0]` is the distinguished base used for plain discrete-log
/// statements; `generators[1..]` are the per-attribute bases `g_1..g_n`. At
/// least two generators are required: one base, one attribute, the
/// minimum needed for a single Pedersen commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoParams<C: Curve> {
    generators: Vec<C>,
    hash_id:    HashId,
}

impl<C: Curve> CryptoParams<C> {
    /// Build a parameter bundle from an explicit generator list. Fails if
    /// fewer than two generators are supplied.
    pub fn new(generators: Vec<C>, hash_id: HashId) -> Result<Self, ParameterError> {
        if generators.len() < 2 {
            return Err(ParameterError::TooFewGenerators);
        }
        Ok(CryptoParams { generators, hash_id })
    }

    /// Deterministically derive `n + 1` generators from a domain string
    /// (so that no party knows a discrete-log relation between any two of
    /// them) via a domain-separated hash-to-curve, rather than a
    /// multi-party generation ceremony this crate has no genesis process
    /// for.
    pub fn generate<B: AsRef<[u8]>>(domain: B, attribute_count: usize, hash_id: HashId) -> Result<Self, ParameterError> {
        let domain = domain.as_ref();
        let generators = (0..=attribute_count)
            .map(|i| {
                let mut label = domain.to_vec();
                label.extend_from_slice(&(i as u32).to_be_bytes());
                C::hash_to_curve(&label)
            })
            .collect();
        Self::new(generators, hash_id)
    }

    /// The distinguished base `g_0`.
    pub fn base(&self) -> C { self.generators[0] }

    /// The full generator list, `[g_0, g_1, ..., g_n]`.
    pub fn generators(&self) -> &[C] { &self.generators }

    /// `g_i`, for `i` in `1..=n` (one-based attribute indexing).
    pub fn attribute_generator(&self, i: usize) -> Result<C, ParameterError> {
        if i == 0 {
            return Err(ParameterError::ZeroAttributeIndex);
        }
        self.generators
            .get(i)
            .copied()
            .ok_or(ParameterError::StatementOutOfRange(i))
    }

    /// The maximum one-based attribute index these parameters support.
    pub fn attribute_capacity(&self) -> usize { self.generators.len() - 1 }

    pub fn hash_id(&self) -> HashId { self.hash_id }

    /// The two fixed bases `(g0, g1)` every Pedersen commitment in a
    /// presentation is taken against, regardless of which attribute index
    /// it commits to.
    pub fn pedersen_key(&self) -> crate::pedersen_commitment::CommitmentKey<C> {
        crate::pedersen_commitment::CommitmentKey::new(self.generators[0], self.generators[1])
    }

    /// Start a fresh Fiat-Shamir transcript under a proof-specific domain
    /// string, using this bundle's hash function, and bind it to the
    /// parameters themselves so two bundles with different generators can
    /// never be confused for one another.
    pub fn transcript(&self, domain: &str) -> RandomOracle {
        let mut ro = RandomOracle::domain(self.hash_id, domain);
        ro.append_message(b"generators", &self.generators);
        ro
    }
}

impl<C: Curve> Serial for CryptoParams<C> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        self.generators.serial(out);
        (self.hash_id.name().as_bytes()).serial(out);
    }
}

impl<C: Curve> Deserial for CryptoParams<C> {
    fn deserial<R: std::io::Read>(source: &mut R) -> Result<Self, SerializationError> {
        let generators = Vec::<C>::deserial(source)?;
        let hash_id_bytes = Vec::<u8>::deserial(source)?;
        let hash_id_name = String::from_utf8(hash_id_bytes)
            .map_err(|_| SerializationError::WrongEncoding { field: "hashId", reason: "not utf8".into() })?;
        let hash_id = HashId::parse(&hash_id_name)
            .map_err(|e| SerializationError::WrongEncoding { field: "hashId", reason: e.to_string() })?;
        CryptoParams::new(generators, hash_id)
            .map_err(|e| SerializationError::WrongEncoding { field: "generators", reason: e.to_string() })
    }
}
