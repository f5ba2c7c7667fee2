//! Serde serialization for `arkworks-rs` objects as they don't implement serde themselves. The object is
//! written as the byte array of its compressed canonical encoding and read back as strictly as
//! [`from_octets`], so padded or truncated arrays are rejected.

use crate::octets::from_octets;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Use as `#[serde_as(as = "ArkObjectBytes")]` on a field holding an arkworks object
pub struct ArkObjectBytes;

impl<T: CanonicalSerialize> SerializeAs<T> for ArkObjectBytes {
    fn serialize_as<S>(obj: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut bytes = Vec::with_capacity(obj.compressed_size());
        obj.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;
        Serialize::serialize(&bytes, serializer)
    }
}

impl<'de, T: CanonicalDeserialize> DeserializeAs<'de, T> for ArkObjectBytes {
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        from_octets(&bytes).map_err(serde::de::Error::custom)
    }
}
