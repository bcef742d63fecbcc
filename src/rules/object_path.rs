//! Member path lookup in arbitrary values
//!
//! Bound value is serialized with serde once, its shape is then walked by dotted paths like
//! `user.address.city`. Object members are looked up by name, arrays by numeric index: `tags.0`.
//!
//! Resolved paths are compiled into accessors and cached per rule instance. Cache is keyed by
//! path string and belongs to a single [`Comparison`] mode, it is dropped when a context with
//! another mode comes in.
//!
//! Null member carries no shape, so segments below it cannot be checked. Such paths are accepted
//! and produce empty string, but they are resolved again on every call instead of being cached.

use std::{borrow::Cow, collections::HashMap, error::Error, fmt, sync::Arc};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use crate::{utils::eq_ignore_case, Comparison, Context, Rule};

#[derive(Debug)]
pub enum CreationError {
    /// Value serialized into nothing, for example `None` or `()`
    NullValue,
    Serialization(serde_json::Error),
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::NullValue => write!(f, "bound value must not be null"),
            CreationError::Serialization(err) => write!(f, "serializing bound value: {err}"),
        }
    }
}

impl Error for CreationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CreationError::NullValue => None,
            CreationError::Serialization(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Member(String),
    Index(usize),
}

/// Compiled member path. Member names are stored as found in value so evaluation does not
/// compare strings again
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Accessor {
    steps: Vec<Step>,
    /// Some trailing segments went below null member and were not checked
    unchecked_tail: bool,
}

impl Accessor {
    /// Checks every segment of `path` against shape of `root`
    ///
    /// Segments after a null value cannot be checked, they are accepted as is and fail during
    /// [`Accessor::evaluate`]
    fn resolve(root: &Value, path: &str, comparison: Comparison) -> Option<Self> {
        if path.is_empty() {
            return None;
        }

        let mut steps = Vec::new();
        let mut current = root;
        let mut unchecked_tail = false;

        for segment in path.split('.') {
            if segment.is_empty() {
                return None;
            }

            if unchecked_tail || current.is_null() {
                unchecked_tail = true;
                steps.push(Step::Member(segment.to_owned()));
                continue;
            }

            let (step, next) = Self::lookup(current, segment, comparison)?;

            steps.push(step);
            current = next;
        }

        Some(Self {
            steps,
            unchecked_tail,
        })
    }

    fn lookup<'v>(
        value: &'v Value,
        segment: &str,
        comparison: Comparison,
    ) -> Option<(Step, &'v Value)> {
        match value {
            Value::Object(members) => {
                if let Some(member) = members.get(segment) {
                    return Some((Step::Member(segment.to_owned()), member));
                }

                match comparison {
                    Comparison::CaseSensitive => None,
                    Comparison::IgnoreCase => members
                        .iter()
                        .find(|(name, _)| eq_ignore_case(name, segment))
                        .map(|(name, member)| (Step::Member(name.clone()), member)),
                }
            }
            Value::Array(items) => {
                let index = segment.parse::<usize>().ok()?;

                items.get(index).map(|item| (Step::Index(index), item))
            }
            _ => None,
        }
    }

    /// Returns `None` if some value on the way is null or has unexpected shape
    pub(crate) fn evaluate<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.steps
            .iter()
            .try_fold(root, |current, step| match (step, current) {
                (Step::Member(name), Value::Object(members)) => members.get(name),
                (Step::Index(index), Value::Array(items)) => items.get(*index),
                _ => None,
            })
    }
}

/// Natural string form of value: strings without quotes, null as empty string, containers as
/// compact json
fn display(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[derive(Debug, Default)]
struct PathCache {
    comparison: Comparison,
    accessors: HashMap<String, Arc<Accessor>>,
}

/// Replaces dotted member path with value found in bound object
///
/// Paths below a null member cannot be checked against value shape: if `address` is null then
/// both `address.city` and `address.typo` are accepted and replaced with empty string. Rules that
/// should win for such tokens must be placed before this one.
///
/// ```rust
/// use stencil::{rules::ObjectPath, Engine};
///
/// #[derive(serde::Serialize)]
/// struct Order {
///     id: u32,
///     customer: Customer,
/// }
///
/// #[derive(serde::Serialize)]
/// struct Customer {
///     name: String,
/// }
///
/// let order = Order {
///     id: 42,
///     customer: Customer {
///         name: "Ann".to_owned(),
///     },
/// };
///
/// let mut engine = Engine::new("{", "}").unwrap();
/// engine.rules_mut().push(ObjectPath::new_boxed(&order).unwrap());
///
/// assert_eq!(
///     engine.process("Order #{id} for {customer.name}"),
///     "Order #42 for Ann"
/// );
/// ```
#[derive(Debug)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(try_from = "Value")
)]
pub struct ObjectPath {
    value: Value,
    cache: RwLock<PathCache>,
}

impl ObjectPath {
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self, CreationError> {
        Self::try_from(serde_json::to_value(value).map_err(CreationError::Serialization)?)
    }

    pub fn new_boxed<T: Serialize + ?Sized>(value: &T) -> Result<Box<Self>, CreationError> {
        Ok(Box::new(Self::new(value)?))
    }

    /// Serialized form of bound value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns cached accessor or resolves a new one. Only fully checked accessors are cached
    fn accessor(&self, path: &str, comparison: Comparison) -> Option<Arc<Accessor>> {
        {
            let cache = self.cache.read();

            if cache.comparison == comparison {
                if let Some(accessor) = cache.accessors.get(path) {
                    return Some(Arc::clone(accessor));
                }
            }
        }

        let accessor = Arc::new(Accessor::resolve(&self.value, path, comparison)?);

        if accessor.unchecked_tail {
            log::trace!("path {path:?} goes below null member, not caching");

            return Some(accessor);
        }

        let mut cache = self.cache.write();

        if cache.comparison != comparison {
            log::debug!(
                "comparison changed to {comparison:?}, dropping {} cached paths",
                cache.accessors.len()
            );

            cache.accessors.clear();
            cache.comparison = comparison;
        }

        cache
            .accessors
            .insert(path.to_owned(), Arc::clone(&accessor));

        Some(accessor)
    }
}

impl TryFrom<Value> for ObjectPath {
    type Error = CreationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if value.is_null() {
            return Err(CreationError::NullValue);
        }

        Ok(Self {
            value,
            cache: RwLock::default(),
        })
    }
}

// cache is not shared with clones
impl Clone for ObjectPath {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            cache: RwLock::default(),
        }
    }
}

#[cfg_attr(feature = "deserialize", typetag::deserialize)]
impl Rule for ObjectPath {
    fn can_process(&self, ctx: &Context) -> bool {
        self.accessor(ctx.trimmed_text(), ctx.comparison()).is_some()
    }

    fn process<'rule, 'ctx: 'rule>(&'rule self, ctx: &Context<'ctx>) -> Cow<'rule, str> {
        let path = ctx.trimmed_text();

        let Some(accessor) = self.accessor(path, ctx.comparison()) else {
            log::debug!("path {path:?} does not exist in bound value");

            return Cow::Borrowed("");
        };

        match accessor.evaluate(&self.value) {
            Some(value) => display(value),
            None => {
                log::trace!("path {path:?} goes through null value");

                Cow::Borrowed("")
            }
        }
    }
}
