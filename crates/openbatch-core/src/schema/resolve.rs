//! Local `$ref` pointer resolution.
//!
//! Schema generators emit references of the form `#/definitions/User` that
//! address a subtree of the same document.  [`resolve_ref`] walks such a
//! pointer against the document root; it is the only lookup the rewrite in
//! [`super::strict`] ever needs.

use serde_json::Value;

use crate::error::SchemaError;

/// Resolve a local reference such as `#/definitions/User` against `root`.
///
/// Only document-local pointers are supported: the string must start with
/// `#/`, and the remainder is walked one `/`-separated segment at a time
/// through object maps.  Segments are matched as plain strings; the JSON
/// Pointer escape sequences `~0` and `~1` are *not* interpreted, so keys
/// containing `/` or `~` cannot be addressed.  Schema generators do not
/// emit such keys.
///
/// The returned value may be any JSON value, including a scalar.  Callers
/// that need an object must check the shape themselves.
///
/// # Errors
///
/// * [`SchemaError::MalformedReference`] – `reference` does not start with `#/`.
/// * [`SchemaError::ReferenceNotFound`] – a path segment does not exist, or an
///   intermediate value cannot be indexed into.
pub fn resolve_ref<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, SchemaError> {
    let Some(pointer) = reference.strip_prefix("#/") else {
        return Err(SchemaError::MalformedReference {
            reference: reference.to_string(),
        });
    };

    let mut current = root;
    for segment in pointer.split('/') {
        current = current
            .as_object()
            .and_then(|object| object.get(segment))
            .ok_or_else(|| SchemaError::ReferenceNotFound {
                reference: reference.to_string(),
                segment: segment.to_string(),
            })?;
    }

    Ok(current)
}
