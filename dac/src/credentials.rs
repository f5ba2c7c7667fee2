//! Delegation chain of Groth signatures.
//!
//! `signatures[i]` is issued at level `i` and certifies the attributes `attributes[i]` together with the
//! public key of the next holder in the chain. A signature has one `ts` element per signed message.
//!
//! Two details are fixed by the issuance protocol rather than by this crate, so both are configurable through
//! `CredentialsFormat`: whether the chain also carries the root issuer's key (`KeyChainLayout`) and whether the
//! certified key is one of the signed messages (`SignedMessages`). Every decoder rejects a chain that fits no
//! format.

use crate::{
    error::DacError,
    group::{
        elements_from_octets, elements_to_octets, nested_elements_from_octets,
        nested_elements_to_octets, GroupElement,
    },
};
use ark_ec::pairing::Pairing;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
};
use ark_std::vec::Vec;
use dac_utils::octets::{from_octets, to_octets};
use serde::{Deserialize, Deserializer, Serialize};

/// Signature `(r, s, ts)` on a vector of group elements. `r` is in the group other than the messages' and
/// `s`, `ts` are in the messages' group.
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct GrothSignature<E: Pairing> {
    pub r: GroupElement<E>,
    pub s: GroupElement<E>,
    pub ts: Vec<GroupElement<E>>,
}

/// How `Credentials::public_keys` lines up with `Credentials::signatures`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyChainLayout {
    /// One key per level, `signatures[i]` certifies `public_keys[i]`
    OneKeyPerLevel,
    /// `public_keys[0]` is the root issuer's key and `signatures[i]` certifies `public_keys[i + 1]`
    WithRootKey,
}

/// Messages covered by the signature of a level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignedMessages {
    /// Only the attributes, `ts.len() == attributes[i].len()`
    Attributes,
    /// The certified key followed by the attributes, `ts.len() == attributes[i].len() + 1`
    KeyAndAttributes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CredentialsFormat {
    pub keys: KeyChainLayout,
    pub signed: SignedMessages,
}

#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, Serialize)]
#[serde(bound = "")]
pub struct Credentials<E: Pairing> {
    pub signatures: Vec<GrothSignature<E>>,
    pub attributes: Vec<Vec<GroupElement<E>>>,
    pub public_keys: Vec<GroupElement<E>>,
}

/// Serde form of `Credentials` before its structure is checked
#[derive(Deserialize)]
#[serde(bound = "")]
struct UncheckedCredentials<E: Pairing> {
    signatures: Vec<GrothSignature<E>>,
    attributes: Vec<Vec<GroupElement<E>>>,
    public_keys: Vec<GroupElement<E>>,
}

#[derive(CanonicalSerialize, CanonicalDeserialize)]
struct GrothSignatureOctets {
    r: Vec<u8>,
    s: Vec<u8>,
    ts: Vec<Vec<u8>>,
}

#[derive(CanonicalSerialize, CanonicalDeserialize)]
struct CredentialsOctets {
    signatures: Vec<GrothSignatureOctets>,
    attributes: Vec<Vec<Vec<u8>>>,
    public_keys: Vec<Vec<u8>>,
}

impl<E: Pairing> GrothSignature<E> {
    /// Number of messages signed
    pub fn message_count(&self) -> usize {
        self.ts.len()
    }

    fn to_octet_record(&self) -> Result<GrothSignatureOctets, DacError> {
        Ok(GrothSignatureOctets {
            r: self.r.to_octets()?,
            s: self.s.to_octets()?,
            ts: elements_to_octets(&self.ts)?,
        })
    }

    fn from_octet_record(record: &GrothSignatureOctets) -> Result<Self, DacError> {
        Ok(Self {
            r: GroupElement::from_octets(&record.r)?,
            s: GroupElement::from_octets(&record.s)?,
            ts: elements_from_octets(&record.ts)?,
        })
    }
}

impl KeyChainLayout {
    /// Number of public keys in a chain of `levels` signatures
    pub fn key_count(&self, levels: usize) -> usize {
        match self {
            Self::OneKeyPerLevel => levels,
            Self::WithRootKey => levels + 1,
        }
    }
}

impl SignedMessages {
    /// Size of `ts` for a level with `attribute_count` attributes
    pub fn message_count(&self, attribute_count: usize) -> usize {
        match self {
            Self::Attributes => attribute_count,
            Self::KeyAndAttributes => attribute_count + 1,
        }
    }
}

impl CredentialsFormat {
    /// Every supported format, in the order `Credentials::format` tries them
    pub const ALL: [Self; 4] = [
        Self::new(KeyChainLayout::OneKeyPerLevel, SignedMessages::Attributes),
        Self::new(KeyChainLayout::OneKeyPerLevel, SignedMessages::KeyAndAttributes),
        Self::new(KeyChainLayout::WithRootKey, SignedMessages::Attributes),
        Self::new(KeyChainLayout::WithRootKey, SignedMessages::KeyAndAttributes),
    ];

    pub const fn new(keys: KeyChainLayout, signed: SignedMessages) -> Self {
        Self { keys, signed }
    }
}

impl Default for CredentialsFormat {
    fn default() -> Self {
        Self::new(KeyChainLayout::OneKeyPerLevel, SignedMessages::Attributes)
    }
}

impl<E: Pairing> Default for Credentials<E> {
    fn default() -> Self {
        Self {
            signatures: Vec::new(),
            attributes: Vec::new(),
            public_keys: Vec::new(),
        }
    }
}

impl<E: Pairing> Credentials<E> {
    pub fn new(
        signatures: Vec<GrothSignature<E>>,
        attributes: Vec<Vec<GroupElement<E>>>,
        public_keys: Vec<GroupElement<E>>,
        format: CredentialsFormat,
    ) -> Result<Self, DacError> {
        let creds = Self {
            signatures,
            attributes,
            public_keys,
        };
        creds.validate_dimensions(format)?;
        Ok(creds)
    }

    /// Chain that so far only has the root issuer's key, for `KeyChainLayout::WithRootKey`
    pub fn with_root_key(root_public_key: GroupElement<E>) -> Self {
        let mut creds = Self::default();
        creds.public_keys.push(root_public_key);
        creds
    }

    /// Extend the chain by one level where `signature` certifies `public_key` and `attributes`. The signature
    /// must have as many messages as `signed` requires.
    pub fn push_level(
        &mut self,
        signature: GrothSignature<E>,
        attributes: Vec<GroupElement<E>>,
        public_key: GroupElement<E>,
        signed: SignedMessages,
    ) -> Result<(), DacError> {
        let level = self.levels();
        check_signature_size(level, &signature, &attributes, signed)?;
        self.signatures.push(signature);
        self.attributes.push(attributes);
        self.public_keys.push(public_key);
        Ok(())
    }

    /// Number of delegation levels
    pub fn levels(&self) -> usize {
        self.signatures.len()
    }

    /// The format the chain is valid in, if any. Only a chain without levels is valid in more than one format
    /// and then this is the first of `CredentialsFormat::ALL`.
    pub fn format(&self) -> Option<CredentialsFormat> {
        self.check_structure().ok()
    }

    /// Public key certified by the signature at `level`
    pub fn certified_key(&self, level: usize, layout: KeyChainLayout) -> Option<&GroupElement<E>> {
        if level >= self.levels() {
            return None;
        }
        match layout {
            KeyChainLayout::OneKeyPerLevel => self.public_keys.get(level),
            KeyChainLayout::WithRootKey => self.public_keys.get(level + 1),
        }
    }

    /// One attribute list per signature, as many keys as `format.keys` requires and as many messages in each
    /// signature as `format.signed` requires
    pub fn validate_dimensions(&self, format: CredentialsFormat) -> Result<(), DacError> {
        if self.attributes.len() != self.signatures.len() {
            return Err(DacError::UnequalSizeOfSequence(
                self.attributes.len(),
                self.signatures.len(),
            ));
        }
        let expected_keys = format.keys.key_count(self.levels());
        if self.public_keys.len() != expected_keys {
            return Err(DacError::UnequalSizeOfSequence(
                self.public_keys.len(),
                expected_keys,
            ));
        }
        for (level, (sig, attrs)) in self.signatures.iter().zip(self.attributes.iter()).enumerate() {
            check_signature_size(level, sig, attrs, format.signed)?;
        }
        Ok(())
    }

    /// The first format the chain is valid in, else the error for the first format tried
    pub fn check_structure(&self) -> Result<CredentialsFormat, DacError> {
        let mut first_error = None;
        for format in CredentialsFormat::ALL {
            match self.validate_dimensions(format) {
                Ok(()) => return Ok(format),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or(DacError::UnequalSizeOfSequence(
            self.public_keys.len(),
            self.levels(),
        )))
    }

    /// Encode the chain. A chain valid in no format is not encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DacError> {
        self.check_structure()?;
        Ok(to_octets(&self.to_octet_record()?)?)
    }

    /// Decode credentials in any format. Fails on malformed or truncated input and when the chain is valid in
    /// no format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DacError> {
        let creds = Self::decode(bytes)?;
        creds.check_structure()?;
        Ok(creds)
    }

    /// Decode credentials that must be in the given format
    pub fn from_bytes_with_format(
        bytes: &[u8],
        format: CredentialsFormat,
    ) -> Result<Self, DacError> {
        let creds = Self::decode(bytes)?;
        creds.validate_dimensions(format)?;
        Ok(creds)
    }

    fn to_octet_record(&self) -> Result<CredentialsOctets, DacError> {
        Ok(CredentialsOctets {
            signatures: self
                .signatures
                .iter()
                .map(|s| s.to_octet_record())
                .collect::<Result<Vec<_>, _>>()?,
            attributes: nested_elements_to_octets(&self.attributes)?,
            public_keys: elements_to_octets(&self.public_keys)?,
        })
    }

    fn decode(bytes: &[u8]) -> Result<Self, DacError> {
        let record: CredentialsOctets = from_octets(bytes)?;
        Ok(Self {
            signatures: record
                .signatures
                .iter()
                .map(GrothSignature::from_octet_record)
                .collect::<Result<Vec<_>, _>>()?,
            attributes: nested_elements_from_octets(&record.attributes)?,
            public_keys: elements_from_octets(&record.public_keys)?,
        })
    }
}

impl<E: Pairing> Valid for Credentials<E> {
    fn check(&self) -> Result<(), SerializationError> {
        self.signatures.check()?;
        self.attributes.check()?;
        self.public_keys.check()?;
        self.check_structure()
            .map(|_| ())
            .map_err(|_| SerializationError::InvalidData)
    }
}

impl<E: Pairing> CanonicalDeserialize for Credentials<E> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let creds = Self {
            signatures: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            attributes: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            public_keys: CanonicalDeserialize::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?,
        };
        if let Validate::Yes = validate {
            creds
                .check_structure()
                .map_err(|_| SerializationError::InvalidData)?;
        }
        Ok(creds)
    }
}

impl<'de, E: Pairing> Deserialize<'de> for Credentials<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let c = UncheckedCredentials::<E>::deserialize(deserializer)?;
        let creds = Self {
            signatures: c.signatures,
            attributes: c.attributes,
            public_keys: c.public_keys,
        };
        creds
            .check_structure()
            .map_err(|e| serde::de::Error::custom(format_args!("invalid credentials: {:?}", e)))?;
        Ok(creds)
    }
}

fn check_signature_size<E: Pairing>(
    level: usize,
    signature: &GrothSignature<E>,
    attributes: &[GroupElement<E>],
    signed: SignedMessages,
) -> Result<(), DacError> {
    let messages = signed.message_count(attributes.len());
    if signature.message_count() != messages {
        return Err(DacError::IncompatibleSignatureSize(
            level,
            messages,
            signature.message_count(),
        ));
    }
    Ok(())
}
