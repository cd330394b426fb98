//! Namespace extraction
//!
//! An engine configured with a namespace (base path) only ever sees the
//! subtree of the decoded mapping at that path. Extraction never fails:
//! an absent subtree, or a bare scalar sitting where the namespace points,
//! both read as "no data".

use urlstate_core::{get_at_path, KeyPath, QueryMapping, Value};

/// Extract the sub-mapping belonging to `namespace`.
///
/// With no namespace (or the root path) the whole mapping is returned
/// unchanged. Otherwise the value at the namespace path is returned when it
/// is object-shaped, and an empty mapping when it is absent or anything
/// else.
pub fn scoped_data(mapping: QueryMapping, namespace: Option<&KeyPath>) -> QueryMapping {
    let path = match namespace {
        Some(path) if !path.is_root() => path,
        _ => return mapping,
    };

    let root = Value::Object(mapping);
    match get_at_path(&root, path) {
        Some(Value::Object(map)) => map.clone(),
        _ => QueryMapping::new(),
    }
}
