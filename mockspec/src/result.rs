// vim: tw=80
//! Result generators: what a matched interaction hands back to the mock.

use crate::{Invocation, Val, Value};
use fragile::Fragile;
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering}
    }
};

/// A caller-supplied result function.  It is invoked with the matched
/// invocation on every trigger; `None` means "no value".  A panic raised here
/// propagates to the matching engine.
pub type ResultFn = Arc<dyn Fn(&Invocation) -> Option<Val> + Send + Sync>;

/// Wrap a closure that isn't `Send` as a [`ResultFn`].
///
/// It is a runtime error to call (or drop) the function from a different
/// thread than the one that created it.
pub fn result_fn_st<F>(f: F) -> ResultFn
    where F: Fn(&Invocation) -> Option<Val> + 'static
{
    let fragile = Fragile::new(f);
    Arc::new(move |inv: &Invocation| (fragile.get())(inv))
}

/// What one trigger of a [`ResultGenerator`] produced.
#[derive(Clone, Debug)]
pub enum Reply {
    /// The absence of a value.
    Nothing,
    /// The framework's placeholder for the declared return type.  The
    /// matching engine decides what that is.
    Dummy,
    Value(Val),
}

impl Reply {
    pub fn value(&self) -> Option<&(dyn Value + 'static)> {
        match self {
            Reply::Value(v) => Some(&**v),
            _ => None
        }
    }

    /// The produced value, if it is a `T`.
    pub fn value_as<T: Value>(&self) -> Option<&T> {
        self.value()?.downcast_ref::<T>().ok()
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Reply::Nothing)
    }
}

/// Iterates through a fixed sequence, then keeps repeating its last element.
pub struct Cycle {
    values: Vec<Val>,
    next: AtomicUsize
}

impl Cycle {
    pub(crate) fn new(values: Vec<Val>) -> Self {
        Cycle { values, next: AtomicUsize::new(0) }
    }

    fn next(&self) -> Option<Val> {
        let len = self.values.len();
        let i = self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed,
                          |i| (i + 1 < len).then_some(i + 1))
            .unwrap_or_else(|i| i);
        self.values.get(i).cloned()
    }

    pub fn values(&self) -> &[Val] {
        &self.values
    }
}

/// The source of an interaction's results.  Exactly one is active; setting a
/// new one replaces the old.
#[derive(Default)]
pub enum ResultGenerator {
    /// Produce no value at all.
    #[default]
    None,
    Dummy,
    Constant(Val),
    Computed(ResultFn),
    Cyclic(Cycle),
}

impl ResultGenerator {
    /// Produce the result for one matched invocation.
    pub fn produce(&self, inv: &Invocation) -> Reply {
        match self {
            ResultGenerator::None => Reply::Nothing,
            ResultGenerator::Dummy => Reply::Dummy,
            ResultGenerator::Constant(v) => Reply::Value(Arc::clone(v)),
            ResultGenerator::Computed(f) =>
                f(inv).map_or(Reply::Nothing, Reply::Value),
            ResultGenerator::Cyclic(c) =>
                c.next().map_or(Reply::Nothing, Reply::Value)
        }
    }
}

/// Structural equality, ignoring how far a cyclic generator has advanced.
impl PartialEq for ResultGenerator {
    fn eq(&self, other: &Self) -> bool {
        use ResultGenerator::*;
        match (self, other) {
            (None, None) | (Dummy, Dummy) => true,
            (Constant(a), Constant(b)) => a.eq_value(&**b),
            (Computed(a), Computed(b)) => Arc::ptr_eq(a, b),
            (Cyclic(a), Cyclic(b)) =>
                a.values.len() == b.values.len() &&
                a.values.iter().zip(&b.values).all(|(x, y)| x.eq_value(&**y)),
            _ => false
        }
    }
}

impl fmt::Debug for ResultGenerator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResultGenerator::None => f.write_str("None"),
            ResultGenerator::Dummy => f.write_str("Dummy"),
            ResultGenerator::Constant(v) =>
                f.debug_tuple("Constant").field(v).finish(),
            ResultGenerator::Computed(_) => f.write_str("Computed(..)"),
            ResultGenerator::Cyclic(c) =>
                f.debug_tuple("Cyclic").field(&c.values).finish(),
        }
    }
}
