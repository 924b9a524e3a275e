//! Parsed value tree.
//!
//! Containers are shared handles (`Rc<RefCell<..>>`) so a resolved circular
//! reference is the very same container as the ancestor it points to, not a
//! copy. A graph with cycles keeps itself alive; call [`Value::unlink`] when
//! it is no longer needed.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::number::Number;

/// Keyed mapping contents, in insertion order.
pub type Map = IndexMap<String, Value>;

/// Shared handle to a keyed mapping.
pub type Object = Rc<RefCell<Map>>;

/// Shared handle to an ordered sequence.
pub type Array = Rc<RefCell<Vec<Value>>>;

type Ptr = *const ();

/// A parsed value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    /// Number literal, kept as text.
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    /// Build an object from key/value pairs. Later duplicates win.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::Object(Rc::new(RefCell::new(map)))
    }

    /// Build an array from values.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Short name of the value's type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Member of an object, as a new handle.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Self> {
        self.as_object()?.borrow().get(key).cloned()
    }

    /// Element of an array, as a new handle.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<Self> {
        self.as_array()?.borrow().get(index).cloned()
    }

    /// Whether both values are handles to the same container.
    #[must_use]
    pub fn same_container(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Empty every container reachable from this value.
    ///
    /// Breaks the reference cycles created by circular references so the
    /// graph can be freed.
    pub fn unlink(&self) {
        let mut seen: HashSet<Ptr> = HashSet::new();
        let mut pending = vec![self.clone()];
        let mut containers = Vec::new();

        while let Some(value) = pending.pop() {
            let Some(ptr) = value.container_ptr() else {
                continue;
            };
            if !seen.insert(ptr) {
                continue;
            }
            match &value {
                Self::Array(a) => pending.extend(a.borrow().iter().cloned()),
                Self::Object(o) => pending.extend(o.borrow().values().cloned()),
                _ => {}
            }
            containers.push(value);
        }

        for value in &containers {
            match value {
                Self::Array(a) => a.borrow_mut().clear(),
                Self::Object(o) => o.borrow_mut().clear(),
                _ => {}
            }
        }
    }

    pub(crate) fn container_ptr(&self) -> Option<Ptr> {
        match self {
            Self::Array(a) => Some(Rc::as_ptr(a).cast()),
            Self::Object(o) => Some(Rc::as_ptr(o).cast()),
            _ => None,
        }
    }
}

/// Structural equality. Pairs of containers already under comparison are
/// assumed equal, so cyclic graphs compare in finite time.
fn equal(a: &Value, b: &Value, assumed: &mut Vec<(Ptr, Ptr)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let pair = (Rc::as_ptr(x).cast(), Rc::as_ptr(y).cast());
            if assumed.contains(&pair) {
                return true;
            }
            assumed.push(pair);
            let (x, y) = (x.borrow(), y.borrow());
            let result =
                x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| equal(p, q, assumed));
            assumed.pop();
            result
        }
        (Value::Object(x), Value::Object(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let pair = (Rc::as_ptr(x).cast(), Rc::as_ptr(y).cast());
            if assumed.contains(&pair) {
                return true;
            }
            assumed.push(pair);
            let (x, y) = (x.borrow(), y.borrow());
            let result = x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| equal(v, w, assumed)));
            assumed.pop();
            result
        }
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other, &mut Vec::new())
    }
}

/// Debug adapter that prints `<circular>` for a container that is already
/// being printed further up.
struct Tracked<'a> {
    value: &'a Value,
    active: &'a RefCell<Vec<Ptr>>,
}

impl Tracked<'_> {
    const fn child<'b>(&'b self, value: &'b Value) -> Tracked<'b> {
        Tracked {
            value,
            active: self.active,
        }
    }
}

impl fmt::Debug for Tracked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ptr) = self.value.container_ptr() {
            if self.active.borrow().contains(&ptr) {
                return f.write_str("<circular>");
            }
            self.active.borrow_mut().push(ptr);
        }

        let result = match self.value {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(a) => f
                .debug_list()
                .entries(a.borrow().iter().map(|v| self.child(v)))
                .finish(),
            Value::Object(o) => f
                .debug_map()
                .entries(o.borrow().iter().map(|(k, v)| (k, self.child(v))))
                .finish(),
        };

        if self.value.container_ptr().is_some() {
            self.active.borrow_mut().pop();
        }
        result
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = RefCell::new(Vec::new());
        fmt::Debug::fmt(
            &Tracked {
                value: self,
                active: &active,
            },
            f,
        )
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
