// vim: tw=80
//! Invocation count bounds

use crate::{Diagnostic, Error, Result, Value};
use std::fmt;

/// How many times an interaction may be invoked: `min..=max`, where a `max` of
/// `None` means unbounded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CountRange {
    min: usize,
    max: Option<usize>
}

impl CountRange {
    /// Any number of calls, including none.  This is the default.
    pub const ANY: CountRange = CountRange { min: 0, max: None };

    /// Exactly `n` calls.
    pub fn exactly(n: usize) -> Self {
        CountRange { min: n, max: Some(n) }
    }

    /// At least `min` calls, at most `max` if given.  Returns `None` if the
    /// bounds are inverted.
    pub fn new(min: usize, max: Option<usize>) -> Option<Self> {
        match max {
            Some(max) if min > max => None,
            _ => Some(CountRange { min, max })
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    /// The inclusive upper bound, or `None` if unbounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Does `n` calls fall within the range?
    pub fn contains(&self, n: usize) -> bool {
        self.is_satisfied_by(n) && !self.is_exceeded_by(n)
    }

    /// Is it required that the interaction be called an exact number of
    /// times?
    pub fn is_exact(&self) -> bool {
        self.max == Some(self.min)
    }

    /// Would `n` calls go over the upper bound?
    pub fn is_exceeded_by(&self, n: usize) -> bool {
        self.max.map_or(false, |max| n > max)
    }

    /// Have `n` calls reached the lower bound?
    pub fn is_satisfied_by(&self, n: usize) -> bool {
        n >= self.min
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

impl Default for CountRange {
    fn default() -> Self {
        CountRange::ANY
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, unbounded)", self.min)
        }
    }
}

/// Interpret a front-end supplied count.
///
/// Any primitive number is accepted; floats are truncated toward zero.  An
/// exclusive bound is pulled in by one before the sign check, so "fewer than
/// 0" is as much an error as "-1".
pub(crate) fn convert_count(count: &dyn Value, inclusive: bool,
                            diagnostic: &Diagnostic) -> Result<usize>
{
    let mut n = as_integer(count).ok_or_else(|| Error::CountNotNumeric {
        diagnostic: diagnostic.clone(),
        found: format!("{count:?}")
    })?;
    if !inclusive {
        n = n.saturating_sub(1);
    }
    if n < 0 {
        return Err(Error::CountNegative {
            diagnostic: diagnostic.clone(),
            count: n
        });
    }
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

fn as_integer(count: &dyn Value) -> Option<i128> {
    macro_rules! integer {
        ($($t:ty),*) => {
            $(
                if let Ok(n) = count.downcast_ref::<$t>() {
                    return Some(i128::try_from(*n).unwrap_or(i128::MAX));
                }
            )*
        }
    }
    macro_rules! float {
        ($($t:ty),*) => {
            $(
                if let Ok(x) = count.downcast_ref::<$t>() {
                    return x.is_finite().then(|| x.trunc() as i128);
                }
            )*
        }
    }
    integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
    float!(f32, f64);
    None
}
