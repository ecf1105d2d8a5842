// vim: tw=80
//! Constraints on the receiver, the method name and the argument list.

use mockspec::*;

fn builder() -> InteractionBuilder {
    InteractionBuilder::new(10, 1, "foo.bar()")
}

fn call(t: &Target, method: &str) -> Invocation {
    Invocation::positional(t.clone(), method, vec![])
}

mod target {
    use super::*;

    #[test]
    fn wildcard_matches_any_receiver() {
        let mut b = builder();
        b.add_equal_target(Slot::Wildcard).unwrap();
        let i = b.build().unwrap();
        assert!(i.constraints().is_empty());
        assert!(i.matches(&call(&target(1), "bar")));
        assert!(i.matches(&call(&target("other"), "baz")));
    }

    #[test]
    fn identity_not_equality() {
        let a = target(String::from("list"));
        let twin = target(String::from("list"));
        let mut b = builder();
        b.add_equal_target(Slot::target(&a)).unwrap();
        let i = b.build().unwrap();
        assert!(i.matches(&call(&a, "bar")));
        assert!(i.matches(&call(&a.clone(), "bar")));
        assert!(!i.matches(&call(&twin, "bar")));
    }

    /// Repeated target constraints accumulate.
    #[test]
    fn two_targets() {
        let a = target(());
        let other = target(());
        let mut b = builder();
        b.add_equal_target(Slot::target(&a))
            .unwrap()
            .add_equal_target(Slot::target(&other))
            .unwrap();
        let i = b.build().unwrap();
        assert!(!i.matches(&call(&a, "bar")));
        assert!(!i.matches(&call(&other, "bar")));
    }
}

mod method_name {
    use super::*;

    #[test]
    fn equal() {
        let t = target(());
        let mut b = builder();
        b.add_equal_method_name("size").unwrap();
        let i = b.build().unwrap();
        assert!(i.matches(&call(&t, "size")));
        assert!(!i.matches(&call(&t, "sizes")));
    }

    #[test]
    fn wildcard() {
        let t = target(());
        let mut b = builder();
        b.add_equal_method_name(WILDCARD).unwrap();
        let i = b.build().unwrap();
        assert!(i.constraints().is_empty());
        assert!(i.matches(&call(&t, "anything")));
    }

    #[test]
    fn regex_whole_name() {
        let t = target(());
        let mut b = builder();
        b.add_regex_method_name("set.*").unwrap();
        let i = b.build().unwrap();
        assert!(i.matches(&call(&t, "setName")));
        assert!(i.matches(&call(&t, "set")));
        assert!(!i.matches(&call(&t, "reset")));
        assert!(!i.matches(&call(&t, "getName")));
    }

    #[test]
    fn regex_invalid() {
        let mut b = builder();
        let e = b.add_regex_method_name("set[").unwrap_err();
        assert!(matches!(e, Error::InvalidMethodPattern { .. }));
        assert!(e.to_string().starts_with("`foo.bar()` at 10:1: "));
    }

    /// The wildcard text is an ordinary pattern for regex names.
    #[test]
    fn regex_underscore() {
        let t = target(());
        let mut b = builder();
        b.add_regex_method_name("_").unwrap();
        let i = b.build().unwrap();
        assert!(i.matches(&call(&t, "_")));
        assert!(!i.matches(&call(&t, "bar")));
    }
}

mod named {
    use super::*;

    fn named_interaction() -> Interaction {
        let mut b = builder();
        b.set_arg_list_kind(false)
            .unwrap()
            .add_arg_name("width")
            .unwrap()
            .add_equal_arg(Slot::value(3))
            .unwrap()
            .add_arg_name("height")
            .unwrap()
            .add_equal_arg(Slot::Wildcard)
            .unwrap();
        b.build().unwrap()
    }

    fn named_call<const N: usize>(args: [(&str, Val); N]) -> Invocation {
        Invocation::named(target(()), "resize", args)
    }

    #[test]
    fn order_independent() {
        let i = named_interaction();
        assert!(i.matches(&named_call([("height", val(0)),
                                       ("width", val(3))])));
    }

    #[test]
    fn extra_arguments_allowed() {
        let i = named_interaction();
        assert!(i.matches(&named_call([("width", val(3)),
                                       ("height", val(1)),
                                       ("depth", val(9))])));
    }

    #[test]
    fn missing_name() {
        let i = named_interaction();
        assert!(!i.matches(&named_call([("width", val(3))])));
    }

    #[test]
    fn wrong_value() {
        let i = named_interaction();
        assert!(!i.matches(&named_call([("width", val(4)),
                                        ("height", val(1))])));
    }

    #[test]
    fn never_matches_positional() {
        let i = named_interaction();
        let inv = Invocation::positional(target(()), "resize",
                                         vec![val(3), val(1)]);
        assert!(!i.matches(&inv));
    }

    #[test]
    fn positional_never_matches_named() {
        let mut b = builder();
        b.set_arg_list_kind(true).unwrap();
        let i = b.build().unwrap();
        assert!(!i.matches(&named_call([])));
    }

    /// A modifier after a new name must not reach back to the previous
    /// name's constraint.
    #[test]
    fn modifier_before_named_constraint() {
        let mut b = builder();
        b.set_arg_list_kind(false)
            .unwrap()
            .add_arg_name("width")
            .unwrap()
            .add_equal_arg(Slot::value(3))
            .unwrap()
            .add_arg_name("height")
            .unwrap();
        let e = b.negate_last_arg().unwrap_err();
        assert!(matches!(e, Error::NoArgumentConstraint {
            op: "negate_last_arg", ..
        }));
        let e = b.type_last_arg(ArgType::of::<i32>()).unwrap_err();
        assert!(matches!(e, Error::NoArgumentConstraint {
            op: "type_last_arg", ..
        }));
        b.add_equal_arg(Slot::value(4))
            .unwrap()
            .negate_last_arg()
            .unwrap();
        let i = b.build().unwrap();
        assert!(i.matches(&named_call([("width", val(3)),
                                       ("height", val(5))])));
        assert!(!i.matches(&named_call([("width", val(3)),
                                        ("height", val(4))])));
    }

    #[test]
    fn name_on_positional() {
        let mut b = builder();
        b.set_arg_list_kind(true).unwrap();
        let e = b.add_arg_name("width").unwrap_err();
        assert!(matches!(e, Error::ArgumentNameOnPositional { .. }));
    }

    #[test]
    fn name_without_list() {
        let mut b = builder();
        let e = b.add_arg_name("width").unwrap_err();
        assert!(matches!(e, Error::NoArgumentList { op: "add_arg_name", .. }));
    }

    #[test]
    fn names_out_of_step() {
        let mut b = builder();
        b.set_arg_list_kind(false)
            .unwrap()
            .add_arg_name("width")
            .unwrap()
            .add_arg_name("height")
            .unwrap()
            .add_equal_arg(Slot::value(1))
            .unwrap();
        let e = b.build().unwrap_err();
        assert!(matches!(e, Error::ArgumentNamesOutOfStep {
            names: 2, constraints: 1, ..
        }));
    }
}

mod mismatch {
    use super::*;

    #[test]
    fn matching_has_no_explanation() {
        let t = target(());
        let mut b = builder();
        b.add_equal_method_name("bar").unwrap();
        let i = b.build().unwrap();
        assert_eq!(None, i.mismatch(&call(&t, "bar")));
    }

    #[test]
    fn names_failing_constraints() {
        let mut b = builder();
        b.add_equal_method_name("bar")
            .unwrap()
            .set_arg_list_kind(true)
            .unwrap()
            .add_equal_arg(Slot::value(5))
            .unwrap()
            .add_equal_arg(Slot::Wildcard)
            .unwrap();
        let i = b.build().unwrap();
        let inv = Invocation::positional(target(()), "bar",
                                         vec![val(6), val(0)]);
        let why = i.mismatch(&inv).unwrap();
        assert!(why.contains("(var == 5, _)"), "{why}");
        assert!(why.contains("var == 5"), "{why}");
        assert!(why.contains("var: 6"), "{why}");
        assert!(!why.contains("method == bar"), "{why}");
    }

    #[test]
    fn wrong_arity() {
        let mut b = builder();
        b.set_arg_list_kind(true)
            .unwrap()
            .add_equal_arg(Slot::value(5))
            .unwrap();
        let i = b.build().unwrap();
        let inv = Invocation::positional(target(()), "bar", vec![]);
        let why = i.mismatch(&inv).unwrap();
        assert!(why.contains("expected arguments: 1"), "{why}");
        assert!(why.contains("actual arguments: 0"), "{why}");
    }

    #[test]
    fn missing_named_argument() {
        let mut b = builder();
        b.set_arg_list_kind(false)
            .unwrap()
            .add_arg_name("width")
            .unwrap()
            .add_equal_arg(Slot::value(3))
            .unwrap();
        let i = b.build().unwrap();
        let inv = Invocation::named(target(()), "bar", [("height", val(3))]);
        let why = i.mismatch(&inv).unwrap();
        assert!(why.contains("(width: var == 3)"), "{why}");
        assert!(why.contains("missing argument: width"), "{why}");
    }
}
