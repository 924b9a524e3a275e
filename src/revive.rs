//! Post-parse rewriting of a value tree.

use crate::value::{Array, Object, Value};

/// Walk `value` depth-first, children before their parent, and replace
/// every member with what `reviver` returns for it.
///
/// The reviver receives the member's key (array indices as decimal text,
/// `""` for the root) and the member itself. Returning `None` removes an
/// object member; for array elements it stores `Null` so later indices do
/// not shift. The result is the reviver's answer for the root.
///
/// Containers are updated in place. A container that is already being
/// walked further up (a resolved circular reference) is passed to the
/// reviver as is, without walking it again.
///
/// ```
/// use refjson::{parse, revive, Value};
///
/// let value = parse(r#"{"keep": 1, "drop": 2}"#).unwrap();
/// let revived = revive(value, |key, v| (key != "drop").then_some(v)).unwrap();
/// assert!(revived.get("drop").is_none());
/// assert!(revived.get("keep").is_some());
/// ```
pub fn revive<F>(value: Value, mut reviver: F) -> Option<Value>
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    let mut walker = Walker {
        reviver: &mut reviver,
        active: Vec::new(),
    };
    walker.visit("", value)
}

struct Walker<'f, F> {
    reviver: &'f mut F,
    active: Vec<*const ()>,
}

impl<F> Walker<'_, F>
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    fn visit(&mut self, key: &str, value: Value) -> Option<Value> {
        if let Some(ptr) = value.container_ptr() {
            if !self.active.contains(&ptr) {
                self.active.push(ptr);
                match &value {
                    Value::Array(array) => self.visit_array(array),
                    Value::Object(object) => self.visit_object(object),
                    _ => {}
                }
                self.active.pop();
            }
        }
        (self.reviver)(key, value)
    }

    fn visit_object(&mut self, object: &Object) {
        let keys: Vec<String> = object.borrow().keys().cloned().collect();
        for key in keys {
            let member = object.borrow().get(&key).cloned();
            let Some(member) = member else {
                continue;
            };
            match self.visit(&key, member) {
                Some(revived) => {
                    object.borrow_mut().insert(key, revived);
                }
                None => {
                    object.borrow_mut().shift_remove(&key);
                }
            }
        }
    }

    fn visit_array(&mut self, array: &Array) {
        let mut index = 0;
        loop {
            let element = array.borrow().get(index).cloned();
            let Some(element) = element else {
                break;
            };
            let revived = self.visit(&index.to_string(), element).unwrap_or(Value::Null);
            if let Some(slot) = array.borrow_mut().get_mut(index) {
                *slot = revived;
            }
            index += 1;
        }
    }
}
