//! The two-generator Pedersen commitment scheme (component C5): `key.rs`
//! holds the commitment key, `value.rs`/`randomness.rs` the two exponents
//! being committed to, `commitment.rs` the group element itself.
//!
//! The key here is drawn directly from a [`crate::params::CryptoParams`]
//! bundle's `(g_0, g_i)` pair rather than a standalone two-generator struct,
//! since this crate never commits outside the context of an attribute index.

mod commitment;
mod key;
mod randomness;
mod value;

pub use commitment::Commitment;
pub use key::CommitmentKey;
pub use randomness::Randomness;
pub use value::Value;

use crate::curve_arithmetic::Curve;

/// `C = g_0^r * g_i^v`, the commitment to `v` under randomness `r` and key
/// `(g_0, g_i)`.
pub fn commit<C: Curve>(key: &CommitmentKey<C>, value: &Value<C>, randomness: &Randomness<C>) -> Commitment<C> {
    key.commit(value, randomness)
}

/// Check `commitment == commit(key, value, randomness)`, in constant time
/// with respect to `value`/`randomness` (the comparison itself is a group
/// equality check, not a bit-by-bit scan of secret material).
pub fn open<C: Curve>(
    key: &CommitmentKey<C>,
    commitment: &Commitment<C>,
    value: &Value<C>,
    randomness: &Randomness<C>,
) -> bool {
    key.commit(value, randomness) == *commitment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_arithmetic::RistrettoCurve;
    use rand::thread_rng;

    #[test]
    fn commit_then_open_succeeds() {
        let mut rng = thread_rng();
        let key = CommitmentKey::<RistrettoCurve>::generate(&mut rng);
        let value = Value::generate(&mut rng);
        let randomness = Randomness::generate(&mut rng);
        let c = commit(&key, &value, &randomness);
        assert!(open(&key, &c, &value, &randomness));
    }

    #[test]
    fn opening_with_the_wrong_value_fails() {
        let mut rng = thread_rng();
        let key = CommitmentKey::<RistrettoCurve>::generate(&mut rng);
        let value = Value::generate(&mut rng);
        let wrong_value = Value::generate(&mut rng);
        let randomness = Randomness::generate(&mut rng);
        let c = commit(&key, &value, &randomness);
        assert!(!open(&key, &c, &wrong_value, &randomness));
    }
}
