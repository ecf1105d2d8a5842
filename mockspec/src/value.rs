// vim: tw=80
//! Dynamically typed values passed between the front-end, the builder and the
//! matching engine.
//!
//! Argument values are compared by value, receivers by identity.  The two are
//! kept apart on purpose: a [`Val`] is anything that implements `PartialEq`,
//! while a [`Target`] is any object at all, compared only by address.

use downcast::*;
use std::{fmt, sync::Arc};

/// The textual form of the wildcard, as written in a method name slot.
pub const WILDCARD: &str = "_";

/// A dynamically typed argument, count, or result value.
///
/// Implemented for every `'static` type that is `PartialEq + Debug + Send +
/// Sync`, so user types need no extra work.
pub trait Value: Any + fmt::Debug + Send + Sync {
    /// Value equality across the type erasure boundary.  Values of different
    /// concrete types are never equal, so `1i32` does not equal `1i64`.
    fn eq_value(&self, other: &dyn Value) -> bool;

    /// Name of the concrete type, for diagnostics.
    fn value_type(&self) -> &'static str;
}
downcast!(dyn Value);

impl<T> Value for T
    where T: PartialEq + fmt::Debug + Send + Sync + 'static
{
    fn eq_value(&self, other: &dyn Value) -> bool {
        other.downcast_ref::<T>()
            .map(|o| self == o)
            .unwrap_or(false)
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A shared, type-erased [`Value`].
pub type Val = Arc<dyn Value>;

/// The receiver of an invocation.  Only ever compared by identity.
pub type Target = Arc<dyn std::any::Any + Send + Sync>;

/// Wrap a plain value as a [`Val`].
pub fn val<T: Value>(t: T) -> Val {
    Arc::new(t)
}

/// Wrap an object as a [`Target`].
pub fn target<T: std::any::Any + Send + Sync>(t: T) -> Target {
    Arc::new(t)
}

/// Are two receivers the very same object?
pub fn same_target(a: &Target, b: &Target) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// A builder input that may be left unconstrained.
///
/// `Slot::Wildcard` is the only way to say "don't care".  No argument value,
/// however it compares, is ever mistaken for it.
#[derive(Clone, Debug)]
pub enum Slot<T> {
    Wildcard,
    Given(T),
}

impl<T> Slot<T> {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Slot::Wildcard)
    }

    /// The constrained value, if any.
    pub fn given(self) -> Option<T> {
        match self {
            Slot::Wildcard => None,
            Slot::Given(t) => Some(t)
        }
    }

    pub fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Wildcard => Slot::Wildcard,
            Slot::Given(t) => Slot::Given(t)
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Wildcard
    }
}

impl Slot<Val> {
    /// Shortcut for `Slot::Given(val(t))`.
    pub fn value<T: Value>(t: T) -> Self {
        Slot::Given(val(t))
    }
}

impl Slot<Target> {
    /// Constrain a receiver slot to exactly this object.
    pub fn target(t: &Target) -> Self {
        Slot::Given(Arc::clone(t))
    }
}

impl Slot<String> {
    /// Interpret text emitted by the front-end, where [`WILDCARD`] stands for
    /// "any name".
    pub fn from_text(text: &str) -> Self {
        if text == WILDCARD {
            Slot::Wildcard
        } else {
            Slot::Given(text.to_owned())
        }
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn eq_value_same_type() {
        assert!(val(5u32).eq_value(&5u32));
        assert!(!val(5u32).eq_value(&6u32));
    }

    #[test]
    fn eq_value_different_types() {
        assert!(!val(5u32).eq_value(&5i64));
        assert!(!val(String::from("_")).eq_value(&"_"));
    }

    #[test]
    fn identity_not_equality() {
        let a = target(String::from("mock"));
        let b = target(String::from("mock"));
        assert!(same_target(&a, &a.clone()));
        assert!(!same_target(&a, &b));
    }

    #[test]
    fn wildcard_text() {
        assert!(Slot::from_text("_").is_wildcard());
        assert_eq!(Some("foo".to_owned()), Slot::from_text("foo").given());
        assert_eq!(Some("__".to_owned()), Slot::from_text("__").given());
    }

    #[test]
    fn value_type() {
        assert!(val(String::new()).value_type().ends_with("String"));
    }
}
