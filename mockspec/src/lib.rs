// vim: tw=80
//! The constraint and result model behind declarative mock interactions.
//!
//! A test framework front-end parses declarations such as
//!
//! ```text
//! (1..3) * list.add(_ as String, !"foo") >> true
//! ```
//!
//! and, for each one, drives an [`InteractionBuilder`] through a series of
//! calls.  The builder checks the calls as they come and finally produces an
//! immutable [`Interaction`].  The matching engine then asks the interaction
//! whether an [`Invocation`] matches, and asks it to produce a [`Reply`].
//!
//! # Builder protocol
//!
//! Calls must arrive in this order, though each step may be repeated or
//! skipped:
//!
//! 1. Count: [`set_fixed_count`] or [`set_range_count`].  Without either, any
//!    number of calls is allowed.
//! 2. Target: [`add_equal_target`].
//! 3. Method name: [`add_equal_method_name`] or [`add_regex_method_name`].
//! 4. Argument list: [`set_arg_list_kind`], at most once.
//! 5. Arguments: [`add_equal_arg`], [`add_code_arg`], [`add_arg_name`],
//!    [`type_last_arg`] and [`negate_last_arg`].
//! 6. Result: [`set_dummy_result`], [`set_constant_result`],
//!    [`set_code_result`] or [`set_iterable_result`].  The last one wins.
//! 7. [`build`], exactly once.
//!
//! Any violation is reported as an [`Error`] carrying the [`Diagnostic`] of the
//! declaration.
//!
//! # Wildcards
//!
//! Every slot that a front-end may leave unconstrained takes a [`Slot`].
//! [`Slot::Wildcard`] is distinct from every argument value, so a test may
//! still expect a literal `"_"` as an argument.  Method names arrive as text,
//! where [`WILDCARD`] means "any name".
//!
//! # Examples
//!
//! Expect between one and three calls of any method named `get...` on one
//! particular object, with a single argument that is a `String` other than
//! `"foo"`, and return `true` the first time and `false` thereafter.
//!
//! ```
//! # use mockspec::*;
//! let obj = target(());
//! let mut b = InteractionBuilder::new(7, 9, r#"(1..3) * obj./get.*/(!"x")"#);
//! b.set_range_count(Slot::value(1), Slot::value(3), true)?
//!     .add_equal_target(Slot::target(&obj))?
//!     .add_regex_method_name("get.*")?
//!     .set_arg_list_kind(true)?
//!     .arg_equal(Slot::value(String::from("foo")))?
//!     .negate()
//!     .of_type(ArgType::of::<String>())
//!     .done()
//!     .set_iterable_result([val(true), val(false)])?;
//! let interaction = b.build()?;
//!
//! let call = |arg: &str| Invocation::positional(obj.clone(), "getItem",
//!                                               vec![val(arg.to_owned())]);
//! assert!(interaction.matches(&call("bar")));
//! assert!(!interaction.matches(&call("foo")));
//! assert_eq!(Some(&true), interaction.produce(&call("bar")).value_as());
//! assert_eq!(Some(&false), interaction.produce(&call("bar")).value_as());
//! assert_eq!(Some(&false), interaction.produce(&call("bar")).value_as());
//! # Ok::<(), mockspec::Error>(())
//! ```
//!
//! # Crate features
//!
//! * `tracing` (default): emit [`tracing`](https://docs.rs/tracing) events.
//!   Every builder step is a `TRACE` event, every finished interaction a
//!   `DEBUG` event, and every match test a `TRACE` event.
//!
//! [`add_arg_name`]: InteractionBuilder::add_arg_name
//! [`add_code_arg`]: InteractionBuilder::add_code_arg
//! [`add_equal_arg`]: InteractionBuilder::add_equal_arg
//! [`add_equal_method_name`]: InteractionBuilder::add_equal_method_name
//! [`add_equal_target`]: InteractionBuilder::add_equal_target
//! [`add_regex_method_name`]: InteractionBuilder::add_regex_method_name
//! [`build`]: InteractionBuilder::build
//! [`negate_last_arg`]: InteractionBuilder::negate_last_arg
//! [`set_arg_list_kind`]: InteractionBuilder::set_arg_list_kind
//! [`set_code_result`]: InteractionBuilder::set_code_result
//! [`set_constant_result`]: InteractionBuilder::set_constant_result
//! [`set_dummy_result`]: InteractionBuilder::set_dummy_result
//! [`set_fixed_count`]: InteractionBuilder::set_fixed_count
//! [`set_iterable_result`]: InteractionBuilder::set_iterable_result
//! [`set_range_count`]: InteractionBuilder::set_range_count
//! [`type_last_arg`]: InteractionBuilder::type_last_arg

#[macro_use]
mod trace;

mod argument;
mod builder;
mod call;
mod constraint;
mod count;
mod error;
mod interaction;
mod invocation;
mod result;
mod value;

pub use argument::{ArgConstraint, ArgPredicate, ArgType, predicate_st};
pub use builder::{ArgRef, InteractionBuilder};
pub use call::BuilderCall;
pub use constraint::{InvocationConstraint, MethodPattern};
pub use count::CountRange;
pub use error::{Error, Result};
pub use interaction::{Diagnostic, Interaction};
pub use invocation::{Arguments, Invocation};
pub use predicates::prelude::Predicate;
pub use result::{Cycle, Reply, ResultFn, ResultGenerator, result_fn_st};
pub use value::{Slot, Target, Val, Value, WILDCARD, same_target, target, val};
