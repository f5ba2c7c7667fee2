use ark_serialize::SerializationError;

#[derive(Debug)]
pub enum DacError {
    /// `g*r - y*c != t` for the credential request's proof of knowledge of the secret key
    InvalidCredRequest,
    /// `pk_nym*c + commitment != g*res_sk + h*res_sk_nym`
    InvalidNymSignature,
    /// Length of an octet string that matches neither the compressed G1 nor the compressed G2 encoding
    UnrecognizedGroupElementEncoding(usize),
    /// The curve's compressed G1 and G2 encodings have the same size so an octet string can't identify its group
    AmbiguousGroupEncoding(usize),
    /// An object that must live entirely in one group has elements from both
    MixedGroups,
    Serialization(SerializationError),
    UnequalSizeOfSequence(usize, usize),
    /// Level, number of `res_t` and number of `res_a` at that level
    UnequalAttributeResponses(usize, usize, usize),
    /// Level, expected number of attributes, found
    IncompatibleAttributeCount(usize, usize, usize),
    /// Level, number of signed messages (the certified key and the attributes), number of `ts` in the signature
    IncompatibleSignatureSize(usize, usize, usize),
    DuplicateIndex(usize, usize),
    DuplicatePairingCell(usize, usize),
    /// A pairing argument needs one element of G1 and one of G2
    PairingArgumentNeedsBothGroups,
}

/// Coarse classification of `DacError`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The proof or signature does not verify. Reject it.
    Verification,
    /// Malformed or truncated bytes
    Decoding,
    /// Lists have lengths that violate the structure of the object
    DimensionMismatch,
}

impl DacError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredRequest | Self::InvalidNymSignature => ErrorKind::Verification,
            Self::UnrecognizedGroupElementEncoding(_)
            | Self::AmbiguousGroupEncoding(_)
            | Self::MixedGroups
            | Self::Serialization(_) => ErrorKind::Decoding,
            Self::UnequalSizeOfSequence(..)
            | Self::UnequalAttributeResponses(..)
            | Self::IncompatibleAttributeCount(..)
            | Self::IncompatibleSignatureSize(..)
            | Self::DuplicateIndex(..)
            | Self::DuplicatePairingCell(..)
            | Self::PairingArgumentNeedsBothGroups => ErrorKind::DimensionMismatch,
        }
    }
}

impl From<SerializationError> for DacError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
