//! Circular reference markers.
//!
//! A serializer that meets an object it is already inside writes
//! `{"$ref": "#/path/to/ancestor"}` instead. On the way back in, the parser
//! swaps such a marker for the live ancestor container, which is only
//! possible while that ancestor is still open on the parse stack.

use crate::pointer::parse_pointer;
use crate::value::{Map, Value};

/// Reserved key of a reference marker.
pub const REF_KEY: &str = "$ref";

/// One open container on the parse stack.
pub(crate) struct StackEntry {
    /// Handle to the container being filled.
    pub container: Value,
    /// Key or index currently being parsed inside `container`.
    pub segment: String,
}

/// Path string of a mapping shaped like a reference marker: exactly one
/// member, named [`REF_KEY`], holding a string.
pub(crate) fn marker_reference(map: &Map) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get(REF_KEY)?.as_str()
}

/// Find the open ancestor a marker points to.
///
/// `stack` must hold only the marker's strict ancestors. Every segment of
/// the path has to match the segment recorded on the stack at the same
/// depth; the result is the container one level below the last match.
pub(crate) fn resolve(stack: &[StackEntry], reference: &str) -> Option<Value> {
    let path = parse_pointer(reference)?;
    let on_stack = path
        .iter()
        .enumerate()
        .all(|(depth, segment)| stack.get(depth).is_some_and(|e| e.segment == *segment));
    if !on_stack {
        return None;
    }
    stack.get(path.len()).map(|e| e.container.clone())
}
