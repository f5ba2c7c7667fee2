//! Strict conversion between arkworks objects and octet strings.
//!
//! Encoding always uses the compressed canonical form. Decoding validates the object (points must be on the
//! curve and in the prime order subgroup, field elements must be canonical) and rejects any input that has
//! bytes left over after the object, so that a truncated or padded octet string never decodes.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::vec::Vec;

/// Compressed canonical encoding of `obj`
pub fn to_octets<T: CanonicalSerialize>(obj: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::with_capacity(obj.compressed_size());
    obj.serialize_compressed(&mut bytes)?;
    Ok(bytes)
}

/// Decode an object from its compressed canonical encoding. All of `bytes` must be consumed.
pub fn from_octets<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T, SerializationError> {
    let mut reader = bytes;
    let obj = T::deserialize_compressed(&mut reader)?;
    if !reader.is_empty() {
        return Err(SerializationError::InvalidData);
    }
    Ok(obj)
}

pub fn to_octets_list<T: CanonicalSerialize>(objs: &[T]) -> Result<Vec<Vec<u8>>, SerializationError> {
    objs.iter().map(to_octets).collect()
}

pub fn from_octets_list<T: CanonicalDeserialize>(
    octets: &[Vec<u8>],
) -> Result<Vec<T>, SerializationError> {
    octets.iter().map(|o| from_octets(o)).collect()
}
