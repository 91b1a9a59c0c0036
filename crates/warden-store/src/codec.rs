//! Guild document codec.
//!
//! Documents are stored as JSON. Every encoded document carries `schema_version`;
//! decoding rejects versions newer than this build understands and upgrades
//! unversioned documents in place.

use std::borrow::Cow;

use warden_core::{DomainError, GuildDocument, Snowflake, SCHEMA_VERSION};

/// Encode a document for storage
pub fn encode(document: &GuildDocument) -> Result<Vec<u8>, DomainError> {
    let document = if document.schema_version == SCHEMA_VERSION {
        Cow::Borrowed(document)
    } else {
        let mut upgraded = document.clone();
        upgraded.schema_version = SCHEMA_VERSION;
        Cow::Owned(upgraded)
    };

    serde_json::to_vec(document.as_ref()).map_err(|e| DomainError::Encode(e.to_string()))
}

/// Decode the document stored under `guild_id`.
///
/// Corrupt input is an error; it is never replaced by an empty document. A document
/// whose `id` is not `guild_id` counts as corrupt.
pub fn decode(guild_id: Snowflake, bytes: &[u8]) -> Result<GuildDocument, DomainError> {
    let mut document: GuildDocument =
        serde_json::from_slice(bytes).map_err(|e| DomainError::Decode(e.to_string()))?;

    if document.id != guild_id {
        return Err(DomainError::Decode(format!(
            "document for guild {} stored under guild {guild_id}",
            document.id
        )));
    }

    if document.schema_version > SCHEMA_VERSION {
        return Err(DomainError::UnsupportedSchema {
            found: document.schema_version,
            supported: SCHEMA_VERSION,
        });
    }

    if document.schema_version < SCHEMA_VERSION {
        tracing::debug!(
            guild_id = %document.id,
            from = document.schema_version,
            to = SCHEMA_VERSION,
            "Upgrading guild document schema"
        );
        document.schema_version = SCHEMA_VERSION;
    }

    Ok(document)
}
