/// Blob storage data models
use uuid::Uuid;

/// Extension appended to every stored blob name
pub const STORED_EXTENSION: &str = ".pdf";

/// A blob freshly written by [`super::BlobStore::put`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Identifier the name was derived from
    pub id: Uuid,
    /// `{id}.pdf`
    pub stored_name: String,
    /// Backend-resolved location
    pub location: String,
    pub size: u64,
}

/// Build the stored name for an id
pub fn stored_name_for(id: &Uuid) -> String {
    format!("{}{}", id.hyphenated(), STORED_EXTENSION)
}

/// Parse a stored name back into its id.
///
/// Only names of the exact form `{uuid}.pdf` are accepted, which keeps path
/// separators and `..` out of backend paths.
pub fn parse_stored_name(name: &str) -> Option<Uuid> {
    let stem = name.strip_suffix(STORED_EXTENSION)?;
    let id = Uuid::parse_str(stem).ok()?;
    // Reject alternate renderings (braced, urn:, upper-case)
    (stored_name_for(&id) == name).then_some(id)
}
