//! Textual codecs shared by the identifier types.
//!
//! Crockford Base32 for compact sortable forms, lowercase hex for GUIDs and
//! tokens. The raw routines are crate-internal; the public surface is the
//! `encode_*`/`decode_*`/`Display`/`FromStr` methods on the ID types.

pub(crate) mod crockford;
pub(crate) mod hex;
