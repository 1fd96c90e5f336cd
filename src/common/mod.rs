//! Common types and operations used throughout the crate: the internal
//! wire-serialization traits ([`Serial`]/[`Deserial`]/[`Buffer`]) and the
//! [`Secret`] wrapper used to keep witness material out of `Debug` output
//! and wipe it on drop.
//!
//! A `Buffer` trait implemented by hashers and byte vectors alike lets
//! the same `Serial` impl feed both a wire encoding and a hash
//! transcript without duplicating code.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};
use zeroize::Zeroize;

use crate::error::SerializationError;

/// Anything that bytes can be written into: a `Vec<u8>`, or an incremental
/// hasher absorbing a transcript. Implemented by [`crate::random_oracle::RandomOracle`].
pub trait Buffer: Write {}

impl Buffer for Vec<u8> {}

/// Canonical binary encoding, used both for the `Serial::to_bytes` round
/// trip (Testable Property 3) and to feed values into a hash transcript.
pub trait Serial {
    fn serial<B: Buffer>(&self, out: &mut B);
}

pub trait Deserial: Sized {
    fn deserial<R: Read>(source: &mut R) -> Result<Self, SerializationError>;
}

pub fn to_bytes<S: Serial>(x: &S) -> Vec<u8> {
    let mut out = Vec::new();
    x.serial(&mut out);
    out
}

pub fn from_bytes<D: Deserial>(bytes: &[u8]) -> Result<D, SerializationError> {
    let mut cursor = Cursor::new(bytes);
    D::deserial(&mut cursor)
}

impl Serial for u8 {
    fn serial<B: Buffer>(&self, out: &mut B) { out.write_u8(*self).expect("writing to buffer cannot fail"); }
}

impl Deserial for u8 {
    fn deserial<R: Read>(source: &mut R) -> Result<Self, SerializationError> {
        source
            .read_u8()
            .map_err(|_| SerializationError::MissingField("u8"))
    }
}

impl Serial for u32 {
    fn serial<B: Buffer>(&self, out: &mut B) {
        out.write_u32::<BigEndian>(*self).expect("writing to buffer cannot fail");
    }
}

impl Deserial for u32 {
    fn deserial<R: Read>(source: &mut R) -> Result<Self, SerializationError> {
        source
            .read_u32::<BigEndian>()
            .map_err(|_| SerializationError::MissingField("u32"))
    }
}

impl Serial for u64 {
    fn serial<B: Buffer>(&self, out: &mut B) {
        out.write_u64::<BigEndian>(*self).expect("writing to buffer cannot fail");
    }
}

impl Deserial for u64 {
    fn deserial<R: Read>(source: &mut R) -> Result<Self, SerializationError> {
        source
            .read_u64::<BigEndian>()
            .map_err(|_| SerializationError::MissingField("u64"))
    }
}

/// Length-prefixed byte string: a 4-byte big-endian length followed by the
/// bytes themselves, so that two differently-shaped absorbed elements can
/// never collide to the same transcript bytes.
impl Serial for [u8] {
    fn serial<B: Buffer>(&self, out: &mut B) {
        (self.len() as u32).serial(out);
        out.write_all(self).expect("writing to buffer cannot fail");
    }
}

impl Serial for Vec<u8> {
    fn serial<B: Buffer>(&self, out: &mut B) { self.as_slice().serial(out) }
}

impl Deserial for Vec<u8> {
    fn deserial<R: Read>(source: &mut R) -> Result<Self, SerializationError> {
        let len = u32::deserial(source)? as usize;
        let mut buf = vec![0u8; len];
        source
            .read_exact(&mut buf)
            .map_err(|_| SerializationError::MissingField("byte string"))?;
        Ok(buf)
    }
}

impl<T: Serial> Serial for Vec<T> {
    fn serial<B: Buffer>(&self, out: &mut B) {
        (self.len() as u32).serial(out);
        for item in self {
            item.serial(out);
        }
    }
}

impl<T: Deserial> Deserial for Vec<T> {
    fn deserial<R: Read>(source: &mut R) -> Result<Self, SerializationError> {
        let len = u32::deserial(source)? as usize;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(T::deserial(source)?);
        }
        Ok(out)
    }
}

/// Base64 helpers for the external structured representation, where group
/// elements and scalars are encoded using the group's canonical byte
/// encoding.
pub fn base64_encode(bytes: &[u8]) -> String { base64::encode(bytes) }

pub fn base64_decode(s: &str) -> Result<Vec<u8>, SerializationError> {
    base64::decode(s).map_err(|e| SerializationError::WrongEncoding {
        field:  "base64",
        reason: e.to_string(),
    })
}

/// A value that must not appear in logs or debug output and is wiped from
/// memory when dropped, so that a randomizer or private key never
/// outlives the call that used it.
#[derive(Clone)]
pub struct Secret<T: Zeroize + Clone>(T);

impl<T: Zeroize + Clone> Secret<T> {
    pub fn new(value: T) -> Self { Secret(value) }

    pub fn expose(&self) -> &T { &self.0 }
}

impl<T: Zeroize + Clone> std::fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Secret(..)") }
}

impl<T: Zeroize + Clone + PartialEq> PartialEq for Secret<T> {
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}
impl<T: Zeroize + Clone + Eq> Eq for Secret<T> {}

impl<T: Zeroize + Clone> Drop for Secret<T> {
    fn drop(&mut self) { self.0.zeroize(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_round_trips() {
        for x in [0u32, 1, 255, 65536, u32::MAX] {
            let bytes = to_bytes(&x);
            assert_eq!(from_bytes::<u32>(&bytes).unwrap(), x);
        }
    }

    #[test]
    fn vec_round_trips() {
        let v: Vec<u8> = vec![1, 2, 3, 4, 5];
        let bytes = to_bytes(&v);
        assert_eq!(from_bytes::<Vec<u8>>(&bytes).unwrap(), v);
    }

    #[test]
    fn base64_round_trips() {
        let data = b"some canonical group element bytes";
        let encoded = base64_encode(data);
        assert_eq!(base64_decode(&encoded).unwrap(), data);
    }
}
