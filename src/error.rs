//! The error taxonomy used throughout the crate.
//!
//! Four kinds of failure are distinguished: misuse at construction time
//! ([`ParameterError`]),
//! a prover whose witnesses do not satisfy the claim it is asked to prove
//! ([`InvalidWitness`]), a proof that fails verification
//! ([`InvalidArtifact`]), and malformed serialized data
//! ([`SerializationError`]). None of these are retried by the crate; all of
//! them propagate to the caller.

use thiserror::Error;

/// Misuse detected eagerly at construction time: null/empty inputs,
/// mismatched array lengths, out-of-range indices, bases from the wrong
/// group, or other structurally invalid input. Never the result of an
/// adversarial proof.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParameterError {
    #[error("a crypto parameter bundle needs at least two generators")]
    TooFewGenerators,
    #[error("the hash identifier must not be empty")]
    EmptyHashId,
    #[error("unrecognized hash identifier: {0}")]
    UnknownHashId(String),
    #[error("statement has {bases} bases but {exponents} exponents")]
    MismatchedLengths { bases: usize, exponents: usize },
    #[error("a discrete-log representation needs at least one base")]
    EmptyBases,
    #[error("attribute index must be one-based (nonzero)")]
    ZeroAttributeIndex,
    #[error("minimum value {min} exceeds maximum value {max}")]
    MinExceedsMax { min: i64, max: i64 },
    #[error("range width {width} exceeds the supported limit of {limit} bits")]
    RangeTooWide { width: u64, limit: u32 },
    #[error("equality map references statement {0}, which does not exist")]
    StatementOutOfRange(usize),
    #[error("equality map references exponent {exponent} of statement {statement}, which does not exist")]
    ExponentOutOfRange { statement: usize, exponent: usize },
    #[error("the scalar set for a membership proof must not be empty")]
    EmptySet,
    #[error("a credential private key must be nonzero")]
    ZeroPrivateKey,
    #[error("attribute is not currently in the revoked set")]
    AttributeNotRevoked,
    #[error("invalid {context} encoding")]
    InvalidEncoding { context: &'static str },
    #[error("presentation scope '{found}' does not match the expected scope '{expected}'")]
    ScopeMismatch { expected: String, found: String },
    #[error("presentation was created {age_secs}s ago, exceeding the {max_age_secs}s freshness window")]
    PresentationStale { age_secs: i64, max_age_secs: i64 },
}

/// The prover's own witnesses do not satisfy the claim being proved: a wrong
/// committed value, a wrong opening, an attribute that is not a member of
/// the claimed set, an out-of-range integer, or a revocation attribute equal
/// to `-delta`. Raised before any commitment is emitted, so constructing (and
/// failing) a proof never leaks information about the witness.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvalidWitness {
    #[error("two exponents placed in the same equality class do not agree")]
    InconsistentEquality,
    #[error("the committed value is not a member of the claimed set")]
    NotAMember,
    #[error("the committed value is outside the claimed range")]
    OutOfRange,
    #[error("the two committed values are required to differ but are equal")]
    NotDistinct,
    #[error("the revocation attribute coincides with -delta; it cannot be accumulated")]
    RevocationAttributeIsNegativeDelta,
    #[error("the revocation attribute is currently revoked")]
    AttributeIsRevoked,
    #[error("the requested comparison does not hold between the two witnesses")]
    ComparisonDoesNotHold,
    #[error("the supplied attribute value does not open the presentation's commitment")]
    AttributeMismatch,
}

/// Verification failed. A single, non-specific variant by design: the
/// verifier must not distinguish sub-cases (mismatched challenge vs.
/// failing sub-proof vs. `Y != X^delta`) to avoid turning verification
/// into an oracle for an attacker.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("the proof, or the accumulator artifact, did not verify")]
pub struct InvalidArtifact;

/// A serialized value could not be parsed or finished.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SerializationError {
    #[error("missing mandatory field: {0}")]
    MissingField(&'static str),
    #[error("field {field} had the wrong encoding: {reason}")]
    WrongEncoding { field: &'static str, reason: String },
    #[error("finishDeserialize was called before the primary parse completed")]
    NotYetParsed,
    #[error("the payload carries no group descriptor and none was supplied as a fallback")]
    NoGroupAvailable,
    #[error("unknown field '{0}' present under strict mode")]
    UnknownFieldStrict(String),
}

/// The crate-wide error type. Composes the four taxonomy members above via
/// `#[from]`, so a narrow error can be returned anywhere `Result<_, Error>`
/// is expected without an explicit conversion at the call site.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Witness(#[from] InvalidWitness),
    #[error(transparent)]
    Artifact(#[from] InvalidArtifact),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

pub type Result<T> = std::result::Result<T, Error>;
