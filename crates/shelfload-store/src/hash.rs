//! Blake3 hashing for record document paths

/// Number of hex characters of the id hash used in document file names.
pub const DOC_HASH_LEN: usize = 16;

/// Hash raw bytes with blake3.
pub fn hash_bytes(data: &[u8]) -> blake3::Hash {
    blake3::hash(data)
}

/// Hex file stem for a record id: the first [`DOC_HASH_LEN`] characters of
/// blake3(id).
pub fn doc_hash(id: &str) -> String {
    hash_bytes(id.as_bytes()).to_hex()[..DOC_HASH_LEN].to_string()
}
