// vim: tw=80
//! Constraints on a single argument of an invocation.

use crate::Value;
use fragile::Fragile;
use predicates::{
    Predicate,
    reflection::{Case, Child, PredicateReflection, Product}
};
use std::{any::TypeId, fmt, sync::Arc};

/// A caller-supplied argument matcher.
///
/// The predicate is called synchronously from the match test.  If it panics,
/// the panic propagates to whoever asked for the match; it is never turned
/// into a silent non-match.
pub type ArgPredicate = Arc<dyn Fn(&dyn Value) -> bool + Send + Sync>;

/// Wrap a closure that isn't `Send` as an [`ArgPredicate`].
///
/// It is a runtime error to evaluate (or drop) the predicate from a different
/// thread than the one that created it.
pub fn predicate_st<F>(f: F) -> ArgPredicate
    where F: Fn(&dyn Value) -> bool + 'static
{
    let fragile = Fragile::new(f);
    Arc::new(move |v: &dyn Value| (fragile.get())(v))
}

#[derive(Clone)]
enum Accepts {
    Exact(TypeId, fn(&dyn Value) -> bool),
    Custom(ArgPredicate)
}

fn is_exactly<T: Value>(v: &dyn Value) -> bool {
    v.is::<T>()
}

/// A runtime type that an argument may be narrowed to.
///
/// Rust has no subtyping between concrete types, so [`ArgType::of`] accepts
/// exactly one type.  Wider families, like "any integer", can be described
/// with [`ArgType::new`].
#[derive(Clone)]
pub struct ArgType {
    name: String,
    accepts: Accepts
}

impl ArgType {
    /// Accept values whose concrete type is exactly `T`.
    pub fn of<T: Value>() -> Self {
        ArgType {
            name: std::any::type_name::<T>().to_owned(),
            accepts: Accepts::Exact(TypeId::of::<T>(), is_exactly::<T>)
        }
    }

    /// Accept values for which `accepts` returns true.
    pub fn new<F>(name: impl Into<String>, accepts: F) -> Self
        where F: Fn(&dyn Value) -> bool + Send + Sync + 'static
    {
        ArgType {
            name: name.into(),
            accepts: Accepts::Custom(Arc::new(accepts))
        }
    }

    pub fn accepts(&self, v: &dyn Value) -> bool {
        match &self.accepts {
            Accepts::Exact(_, f) => f(v),
            Accepts::Custom(f) => f(v)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ArgType {
    fn eq(&self, other: &Self) -> bool {
        match (&self.accepts, &other.accepts) {
            (Accepts::Exact(a, _), Accepts::Exact(b, _)) => a == b,
            (Accepts::Custom(a), Accepts::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false
        }
    }
}

impl fmt::Debug for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ArgType").field(&self.name).finish()
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What a single argument must look like.
#[derive(Clone)]
pub enum ArgConstraint {
    /// Always satisfied.
    Any,
    /// Satisfied by an argument that compares equal to the value.
    Equal(crate::Val),
    /// Satisfied when the predicate returns true.
    Custom(ArgPredicate),
    /// Satisfied when the argument has the given type and the inner
    /// constraint holds.  The type is checked first.
    Typed(ArgType, Box<ArgConstraint>),
    /// Satisfied when the inner constraint is not.
    Negated(Box<ArgConstraint>),
}

impl ArgConstraint {
    pub fn is_satisfied_by(&self, arg: &dyn Value) -> bool {
        match self {
            ArgConstraint::Any => true,
            ArgConstraint::Equal(v) => v.eq_value(arg),
            ArgConstraint::Custom(f) => f(arg),
            ArgConstraint::Typed(ty, inner) =>
                ty.accepts(arg) && inner.is_satisfied_by(arg),
            ArgConstraint::Negated(inner) => !inner.is_satisfied_by(arg)
        }
    }

    pub(crate) fn typed(self, ty: ArgType) -> Self {
        ArgConstraint::Typed(ty, Box::new(self))
    }

    pub(crate) fn negated(self) -> Self {
        ArgConstraint::Negated(Box::new(self))
    }
}

impl Default for ArgConstraint {
    fn default() -> Self {
        ArgConstraint::Any
    }
}

/// Structural equality.  Custom predicates are equal only when they are the
/// same closure.
impl PartialEq for ArgConstraint {
    fn eq(&self, other: &Self) -> bool {
        use ArgConstraint::*;
        match (self, other) {
            (Any, Any) => true,
            (Equal(a), Equal(b)) => a.eq_value(&**b),
            (Custom(a), Custom(b)) => Arc::ptr_eq(a, b),
            (Typed(ta, a), Typed(tb, b)) => ta == tb && a == b,
            (Negated(a), Negated(b)) => a == b,
            _ => false
        }
    }
}

impl fmt::Debug for ArgConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgConstraint::Any => f.write_str("Any"),
            ArgConstraint::Equal(v) => f.debug_tuple("Equal").field(v).finish(),
            ArgConstraint::Custom(_) => f.write_str("Custom(..)"),
            ArgConstraint::Typed(ty, inner) =>
                f.debug_tuple("Typed").field(ty).field(inner).finish(),
            ArgConstraint::Negated(inner) =>
                f.debug_tuple("Negated").field(inner).finish(),
        }
    }
}

impl fmt::Display for ArgConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgConstraint::Any => f.write_str("_"),
            ArgConstraint::Equal(v) => write!(f, "var == {v:?}"),
            ArgConstraint::Custom(_) => f.write_str("{ code }"),
            ArgConstraint::Typed(ty, inner) => write!(f, "({ty}) {inner}"),
            ArgConstraint::Negated(inner) => write!(f, "!({inner})"),
        }
    }
}

impl PredicateReflection for ArgConstraint {
    fn children<'a>(&'a self) -> Box<dyn Iterator<Item = Child<'a>> + 'a> {
        match self {
            ArgConstraint::Typed(_, inner) | ArgConstraint::Negated(inner) => {
                let inner: &dyn PredicateReflection = inner.as_ref();
                Box::new(std::iter::once(Child::new("inner", inner)))
            },
            _ => Box::new(std::iter::empty())
        }
    }
}

impl Predicate<dyn Value> for ArgConstraint {
    fn eval(&self, arg: &(dyn Value + 'static)) -> bool {
        self.is_satisfied_by(arg)
    }

    fn find_case<'a>(&'a self, expected: bool, arg: &(dyn Value + 'static))
        -> Option<Case<'a>>
    {
        let result = self.eval(arg);
        if result != expected {
            return None;
        }
        let case = Case::new(Some(self), result);
        let case = match self {
            ArgConstraint::Any | ArgConstraint::Custom(_) => case,
            ArgConstraint::Equal(_) =>
                case.add_product(Product::new("var", format!("{arg:?}"))),
            ArgConstraint::Typed(ty, inner) => {
                if ty.accepts(arg) {
                    match inner.find_case(expected, arg) {
                        Some(c) => case.add_child(c),
                        None => case
                    }
                } else {
                    case.add_product(Product::new("var type", arg.value_type()))
                }
            },
            ArgConstraint::Negated(inner) => {
                match inner.find_case(!expected, arg) {
                    Some(c) => case.add_child(c),
                    None => case
                }
            }
        };
        Some(case)
    }
}
