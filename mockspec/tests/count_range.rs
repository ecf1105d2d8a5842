// vim: tw=80
//! Invocation counts, fixed and ranged.

use mockspec::{CountRange, Diagnostic, Error, InteractionBuilder, Slot};
use proptest::prelude::*;

fn builder() -> InteractionBuilder {
    InteractionBuilder::new(1, 1, "n * foo.bar()")
}

fn built<F>(f: F) -> mockspec::Result<CountRange>
    where F: FnOnce(&mut InteractionBuilder)
        -> mockspec::Result<&mut InteractionBuilder>
{
    let mut b = builder();
    f(&mut b)?;
    Ok(b.build()?.count_range())
}

proptest! {
    #[test]
    fn fixed_count_is_exact(c in 0u32..100_000) {
        let r = built(|b| b.set_fixed_count(Slot::value(c))).unwrap();
        prop_assert_eq!(CountRange::exactly(c as usize), r);
        prop_assert!(r.contains(c as usize));
        prop_assert!(r.is_exceeded_by(c as usize + 1));
    }

    #[test]
    fn inclusive_range(lo in 0i64..1000, span in 0i64..1000) {
        let hi = lo + span;
        let r = built(|b| b.set_range_count(Slot::value(lo), Slot::value(hi),
                                            true)).unwrap();
        prop_assert_eq!(lo as usize, r.min());
        prop_assert_eq!(Some(hi as usize), r.max());
    }

    #[test]
    fn negative_fixed_count(c in i32::MIN..0) {
        let e = built(|b| b.set_fixed_count(Slot::value(c))).unwrap_err();
        let negative = matches!(e, Error::CountNegative { .. });
        prop_assert!(negative, "unexpected error {:?}", e);
    }
}

mod fixed {
    use super::*;

    #[test]
    fn default_is_any() {
        assert_eq!(CountRange::ANY, built(|b| Ok(b)).unwrap());
    }

    #[test]
    fn wildcard() {
        let r = built(|b| b.set_fixed_count(Slot::Wildcard)).unwrap();
        assert_eq!(0, r.min());
        assert!(r.is_unbounded());
        assert_eq!("[0, unbounded)", r.to_string());
    }

    #[test]
    fn float_truncates() {
        let r = built(|b| b.set_fixed_count(Slot::value(2.7f64))).unwrap();
        assert_eq!(CountRange::exactly(2), r);
    }

    #[test]
    fn not_numeric() {
        let e = built(|b| b.set_fixed_count(Slot::value("once")))
            .unwrap_err();
        assert!(matches!(e, Error::CountNotNumeric { .. }));
        assert!(e.to_string().contains("\"once\""));
    }

    #[test]
    fn minus_one() {
        let e = built(|b| b.set_fixed_count(Slot::value(-1))).unwrap_err();
        assert!(matches!(e, Error::CountNegative { count: -1, .. }));
        assert_eq!(&Diagnostic::new(1, 1, "n * foo.bar()"), e.diagnostic());
    }

    #[test]
    fn last_write_wins() {
        let r = built(|b| b.set_fixed_count(Slot::value(1))?
                          .set_fixed_count(Slot::value(4))).unwrap();
        assert_eq!(CountRange::exactly(4), r);
    }
}

mod range {
    use super::*;

    #[test]
    fn inclusive() {
        let r = built(|b| b.set_range_count(Slot::value(2), Slot::value(5),
                                            true)).unwrap();
        assert_eq!("[2, 5]", r.to_string());
    }

    #[test]
    fn exclusive() {
        let r = built(|b| b.set_range_count(Slot::value(2), Slot::value(5),
                                            false)).unwrap();
        assert_eq!(CountRange::new(2, Some(4)), Some(r));
    }

    #[test]
    fn wildcard_bounds() {
        let r = built(|b| b.set_range_count(Slot::Wildcard, Slot::value(3),
                                            true)).unwrap();
        assert_eq!(CountRange::new(0, Some(3)), Some(r));
        let r = built(|b| b.set_range_count(Slot::value(3), Slot::Wildcard,
                                            false)).unwrap();
        assert_eq!(CountRange::new(3, None), Some(r));
        assert!(r.is_satisfied_by(3));
        assert!(!r.is_satisfied_by(2));
    }

    #[test]
    fn inverted() {
        let e = built(|b| b.set_range_count(Slot::value(5), Slot::value(2),
                                            true)).unwrap_err();
        assert!(matches!(e, Error::InvertedRange { min: 5, max: 2, .. }));
    }

    /// `2..2` is empty once the upper bound is excluded.
    #[test]
    fn empty_exclusive() {
        let e = built(|b| b.set_range_count(Slot::value(2), Slot::value(2),
                                            false)).unwrap_err();
        assert!(matches!(e, Error::InvertedRange { min: 2, max: 1, .. }));
    }

    #[test]
    fn exclusive_zero() {
        let e = built(|b| b.set_range_count(Slot::Wildcard, Slot::value(0u8),
                                            false)).unwrap_err();
        assert!(matches!(e, Error::CountNegative { .. }));
    }

    #[test]
    fn negative_min() {
        let e = built(|b| b.set_range_count(Slot::value(-2), Slot::Wildcard,
                                            true)).unwrap_err();
        assert!(matches!(e, Error::CountNegative { count: -2, .. }));
    }
}
