// vim: tw=80
//! The staged interaction builder.
//!
//! The front-end drives an [`InteractionBuilder`] through a fixed grammar:
//! count, target, method name, argument list kind, arguments, result, and
//! finally [`build`](InteractionBuilder::build).  Every step is checked as it
//! happens, and the first violation is returned as an [`Error`].

use crate::{
    ArgConstraint,
    ArgPredicate,
    ArgType,
    BuilderCall,
    CountRange,
    Diagnostic,
    Error,
    Interaction,
    InvocationConstraint,
    Invocation,
    MethodPattern,
    Result,
    ResultFn,
    ResultGenerator,
    Slot,
    Target,
    Val,
    Value,
    argument::predicate_st,
    count::convert_count,
    result::{Cycle, result_fn_st},
};
use std::{fmt, mem, sync::Arc};

/// Position in the builder grammar.  Operations may repeat within a stage but
/// never go back to an earlier one.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum Stage {
    Fresh,
    Count,
    Target,
    Name,
    ArgKind,
    Args,
    Result,
    Built,
}

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Stage::Fresh => "nothing",
            Stage::Count => "the invocation count",
            Stage::Target => "the target",
            Stage::Name => "the method name",
            Stage::ArgKind => "the argument list kind",
            Stage::Args => "the arguments",
            Stage::Result => "the result",
            Stage::Built => "build",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ArgKind {
    Positional,
    Named
}

/// Accumulates one interaction.
///
/// # Examples
/// ```
/// # use mockspec::*;
/// let list = target(Vec::<u32>::new());
/// let mut b = InteractionBuilder::new(12, 5, "1 * list.add(42)");
/// b.set_fixed_count(Slot::value(1))?
///     .add_equal_target(Slot::target(&list))?
///     .add_equal_method_name("add")?
///     .set_arg_list_kind(true)?
///     .add_equal_arg(Slot::value(42u32))?
///     .set_constant_result(Slot::value(true))?;
/// let interaction = b.build()?;
///
/// let call = Invocation::positional(list.clone(), "add", vec![val(42u32)]);
/// assert!(interaction.matches(&call));
/// assert_eq!(Some(&true), interaction.produce(&call).value_as::<bool>());
/// # Ok::<(), mockspec::Error>(())
/// ```
pub struct InteractionBuilder {
    diagnostic: Diagnostic,
    stage: Stage,
    count: CountRange,
    constraints: Vec<InvocationConstraint>,
    arg_kind: Option<ArgKind>,
    arg_names: Vec<String>,
    args: Vec<ArgConstraint>,
    result: ResultGenerator,
}

impl InteractionBuilder {
    pub const SET_FIXED_COUNT: &'static str = "set_fixed_count";
    pub const SET_RANGE_COUNT: &'static str = "set_range_count";
    pub const ADD_EQUAL_TARGET: &'static str = "add_equal_target";
    pub const ADD_EQUAL_METHOD_NAME: &'static str = "add_equal_method_name";
    pub const ADD_REGEX_METHOD_NAME: &'static str = "add_regex_method_name";
    pub const SET_ARG_LIST_KIND: &'static str = "set_arg_list_kind";
    pub const ADD_ARG_NAME: &'static str = "add_arg_name";
    pub const ADD_EQUAL_ARG: &'static str = "add_equal_arg";
    pub const ADD_CODE_ARG: &'static str = "add_code_arg";
    pub const TYPE_LAST_ARG: &'static str = "type_last_arg";
    pub const NEGATE_LAST_ARG: &'static str = "negate_last_arg";
    pub const SET_DUMMY_RESULT: &'static str = "set_dummy_result";
    pub const SET_CONSTANT_RESULT: &'static str = "set_constant_result";
    pub const SET_CODE_RESULT: &'static str = "set_code_result";
    pub const SET_ITERABLE_RESULT: &'static str = "set_iterable_result";
    pub const BUILD: &'static str = "build";

    /// Start a new interaction declared at `line`:`column` as `text`.
    pub fn new(line: u32, column: u32, text: impl Into<String>) -> Self {
        Self::with_diagnostic(Diagnostic::new(line, column, text))
    }

    pub fn with_diagnostic(diagnostic: Diagnostic) -> Self {
        InteractionBuilder {
            diagnostic,
            stage: Stage::Fresh,
            count: CountRange::default(),
            constraints: Vec::new(),
            arg_kind: None,
            arg_names: Vec::new(),
            args: Vec::new(),
            result: ResultGenerator::default(),
        }
    }

    /// Build an interaction from a whole call script.
    pub fn replay<I>(diagnostic: Diagnostic, calls: I) -> Result<Interaction>
        where I: IntoIterator<Item = BuilderCall>
    {
        let mut builder = Self::with_diagnostic(diagnostic);
        for call in calls {
            builder.apply(call)?;
        }
        builder.build()
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Perform one scripted call.
    pub fn apply(&mut self, call: BuilderCall) -> Result<&mut Self> {
        match call {
            BuilderCall::SetFixedCount(count) => self.set_fixed_count(count),
            BuilderCall::SetRangeCount { min, max, inclusive } =>
                self.set_range_count(min, max, inclusive),
            BuilderCall::AddEqualTarget(t) => self.add_equal_target(t),
            BuilderCall::AddEqualMethodName(name) =>
                self.add_equal_method_name(&name),
            BuilderCall::AddRegexMethodName(pattern) =>
                self.add_regex_method_name(&pattern),
            BuilderCall::SetArgListKind { positional } =>
                self.set_arg_list_kind(positional),
            BuilderCall::AddArgName(name) => self.add_arg_name(name),
            BuilderCall::AddEqualArg(value) => self.add_equal_arg(value),
            BuilderCall::AddCodeArg(p) => {
                self.push_arg(Self::ADD_CODE_ARG, ArgConstraint::Custom(p))?;
                Ok(self)
            },
            BuilderCall::TypeLastArg(ty) => self.type_last_arg(ty),
            BuilderCall::NegateLastArg => self.negate_last_arg(),
            BuilderCall::SetDummyResult => self.set_dummy_result(),
            BuilderCall::SetConstantResult(value) =>
                self.set_constant_result(value),
            BuilderCall::SetCodeResult(f) =>
                self.set_result(Self::SET_CODE_RESULT,
                                ResultGenerator::Computed(f)),
            BuilderCall::SetIterableResult(values) =>
                self.set_iterable_result(values),
        }
    }

    /// Check that `op` may happen now, run it, and move on to `stage`.
    fn step<F>(&mut self, op: &'static str, stage: Stage, f: F)
        -> Result<&mut Self>
        where F: FnOnce(&mut Self) -> Result<()>
    {
        self.check_stage(op, stage)?;
        f(self)?;
        self.stage = stage;
        trace_event!(line = self.diagnostic.line,
                     column = self.diagnostic.column,
                     op,
                     "interaction builder");
        Ok(self)
    }

    fn check_stage(&self, op: &'static str, stage: Stage) -> Result<()> {
        if self.stage == Stage::Built {
            return Err(Error::AlreadyBuilt {
                diagnostic: self.diagnostic.clone()
            });
        }
        if stage < self.stage {
            return Err(Error::OutOfOrder {
                diagnostic: self.diagnostic.clone(),
                op,
                after: self.stage.name()
            });
        }
        Ok(())
    }

    /// Expect exactly `count` calls, or any number for a wildcard.
    pub fn set_fixed_count(&mut self, count: Slot<Val>) -> Result<&mut Self> {
        self.step(Self::SET_FIXED_COUNT, Stage::Count, |b| {
            b.count = match count {
                Slot::Wildcard => CountRange::ANY,
                Slot::Given(c) => CountRange::exactly(
                    convert_count(&*c, true, &b.diagnostic)?)
            };
            Ok(())
        })
    }

    /// Expect between `min` and `max` calls.  A wildcard `min` means zero; a
    /// wildcard `max` means unbounded.  When `max_inclusive` is false, `max`
    /// itself is excluded.
    pub fn set_range_count(&mut self, min: Slot<Val>, max: Slot<Val>,
                           max_inclusive: bool) -> Result<&mut Self>
    {
        self.step(Self::SET_RANGE_COUNT, Stage::Count, |b| {
            let lo = match min {
                Slot::Wildcard => 0,
                Slot::Given(c) => convert_count(&*c, true, &b.diagnostic)?
            };
            let hi = match max {
                Slot::Wildcard => None,
                Slot::Given(c) =>
                    Some(convert_count(&*c, max_inclusive, &b.diagnostic)?)
            };
            b.count = CountRange::new(lo, hi).ok_or_else(|| {
                Error::InvertedRange {
                    diagnostic: b.diagnostic.clone(),
                    min: lo,
                    max: hi.unwrap_or(usize::MAX)
                }
            })?;
            Ok(())
        })
    }

    /// Require the receiver to be this very object.  A wildcard adds nothing.
    pub fn add_equal_target(&mut self, target: Slot<Target>)
        -> Result<&mut Self>
    {
        self.step(Self::ADD_EQUAL_TARGET, Stage::Target, |b| {
            if let Slot::Given(t) = target {
                b.constraints.push(InvocationConstraint::IdenticalTarget(t));
            }
            Ok(())
        })
    }

    /// Require this method name.  The wildcard text `_` adds nothing.
    pub fn add_equal_method_name(&mut self, name: &str) -> Result<&mut Self> {
        self.step(Self::ADD_EQUAL_METHOD_NAME, Stage::Name, |b| {
            if let Slot::Given(name) = Slot::from_text(name) {
                b.constraints.push(InvocationConstraint::EqualMethodName(name));
            }
            Ok(())
        })
    }

    /// Require the method name to match `pattern` in full.
    pub fn add_regex_method_name(&mut self, pattern: &str)
        -> Result<&mut Self>
    {
        self.step(Self::ADD_REGEX_METHOD_NAME, Stage::Name, |b| {
            let pattern = MethodPattern::new(pattern, &b.diagnostic)?;
            b.constraints.push(InvocationConstraint::RegexMethodName(pattern));
            Ok(())
        })
    }

    /// Establish whether arguments are matched by position or by name.  This
    /// may only happen once.
    pub fn set_arg_list_kind(&mut self, is_positional: bool)
        -> Result<&mut Self>
    {
        self.step(Self::SET_ARG_LIST_KIND, Stage::ArgKind, |b| {
            if b.arg_kind.is_some() {
                return Err(Error::ArgumentListAlreadySet {
                    diagnostic: b.diagnostic.clone()
                });
            }
            b.arg_kind = Some(if is_positional {
                ArgKind::Positional
            } else {
                ArgKind::Named
            });
            Ok(())
        })
    }

    /// Name the next argument of a named argument list.
    pub fn add_arg_name(&mut self, name: impl Into<String>)
        -> Result<&mut Self>
    {
        let name = name.into();
        self.step(Self::ADD_ARG_NAME, Stage::Args, |b| {
            match b.arg_kind {
                None => Err(Error::NoArgumentList {
                    diagnostic: b.diagnostic.clone(),
                    op: Self::ADD_ARG_NAME
                }),
                Some(ArgKind::Positional) => Err(
                    Error::ArgumentNameOnPositional {
                        diagnostic: b.diagnostic.clone()
                    }),
                Some(ArgKind::Named) => {
                    b.arg_names.push(name);
                    Ok(())
                }
            }
        })
    }

    /// Append a constraint and return its index.
    fn push_arg(&mut self, op: &'static str, constraint: ArgConstraint)
        -> Result<usize>
    {
        self.step(op, Stage::Args, |b| {
            b.require_arg_list(op)?;
            b.args.push(constraint);
            Ok(())
        })?;
        Ok(self.args.len() - 1)
    }

    fn require_arg_list(&self, op: &'static str) -> Result<()> {
        match self.arg_kind {
            Some(_) => Ok(()),
            None => Err(Error::NoArgumentList {
                diagnostic: self.diagnostic.clone(),
                op
            })
        }
    }

    /// Replace the last argument constraint with `f` applied to it.
    fn modify_last<F>(&mut self, op: &'static str, f: F) -> Result<&mut Self>
        where F: FnOnce(ArgConstraint) -> ArgConstraint
    {
        self.step(op, Stage::Args, |b| {
            b.require_arg_list(op)?;
            // A pending name has no constraint of its own yet.
            let pending = b.arg_kind == Some(ArgKind::Named) &&
                b.arg_names.len() > b.args.len();
            let last = b.args.last_mut()
                .filter(|_| !pending)
                .ok_or_else(|| Error::NoArgumentConstraint {
                    diagnostic: b.diagnostic.clone(),
                    op
                })?;
            *last = f(mem::take(last));
            Ok(())
        })
    }

    /// Append an equality constraint, or an unconstrained argument for a
    /// wildcard.
    pub fn add_equal_arg(&mut self, value: Slot<Val>) -> Result<&mut Self> {
        self.arg_equal(value).map(ArgRef::done)
    }

    /// Append a caller-supplied argument predicate.
    pub fn add_code_arg<F>(&mut self, f: F) -> Result<&mut Self>
        where F: Fn(&dyn Value) -> bool + Send + Sync + 'static
    {
        self.arg_code(f).map(ArgRef::done)
    }

    /// Single-threaded version of [`add_code_arg`](#method.add_code_arg), for
    /// predicates that aren't `Send`.
    ///
    /// It is a runtime error to evaluate the interaction from a different
    /// thread than the one that called this method.
    pub fn add_code_arg_st<F>(&mut self, f: F) -> Result<&mut Self>
        where F: Fn(&dyn Value) -> bool + 'static
    {
        let p = predicate_st(f);
        self.push_arg(Self::ADD_CODE_ARG, ArgConstraint::Custom(p))?;
        Ok(self)
    }

    /// Like [`add_equal_arg`](#method.add_equal_arg), but return a handle to
    /// the new constraint so it can be decorated.
    pub fn arg_equal(&mut self, value: Slot<Val>) -> Result<ArgRef<'_>> {
        let constraint = match value {
            Slot::Wildcard => ArgConstraint::Any,
            Slot::Given(v) => ArgConstraint::Equal(v)
        };
        let index = self.push_arg(Self::ADD_EQUAL_ARG, constraint)?;
        Ok(ArgRef { builder: self, index })
    }

    /// Like [`add_code_arg`](#method.add_code_arg), but return a handle to the
    /// new constraint so it can be decorated.
    pub fn arg_code<F>(&mut self, f: F) -> Result<ArgRef<'_>>
        where F: Fn(&dyn Value) -> bool + Send + Sync + 'static
    {
        let p: ArgPredicate = Arc::new(f);
        let index = self.push_arg(Self::ADD_CODE_ARG,
                                  ArgConstraint::Custom(p))?;
        Ok(ArgRef { builder: self, index })
    }

    /// Narrow the most recently added argument constraint to `ty`.
    pub fn type_last_arg(&mut self, ty: ArgType) -> Result<&mut Self> {
        self.modify_last(Self::TYPE_LAST_ARG, |c| c.typed(ty))
    }

    /// Negate the most recently added argument constraint.
    pub fn negate_last_arg(&mut self) -> Result<&mut Self> {
        self.modify_last(Self::NEGATE_LAST_ARG, ArgConstraint::negated)
    }

    fn set_result(&mut self, op: &'static str, result: ResultGenerator)
        -> Result<&mut Self>
    {
        self.step(op, Stage::Result, |b| {
            b.result = result;
            Ok(())
        })
    }

    /// Return the framework's placeholder value for the method's return
    /// type.
    pub fn set_dummy_result(&mut self) -> Result<&mut Self> {
        self.set_result(Self::SET_DUMMY_RESULT, ResultGenerator::Dummy)
    }

    /// Return `value` on every call.  A wildcard leaves the current result
    /// generator in place.
    pub fn set_constant_result(&mut self, value: Slot<Val>)
        -> Result<&mut Self>
    {
        match value {
            Slot::Wildcard => self.step(Self::SET_CONSTANT_RESULT,
                                        Stage::Result, |_| Ok(())),
            Slot::Given(v) => self.set_result(Self::SET_CONSTANT_RESULT,
                                              ResultGenerator::Constant(v))
        }
    }

    /// Compute the result from the matched invocation on every call.
    pub fn set_code_result<F>(&mut self, f: F) -> Result<&mut Self>
        where F: Fn(&Invocation) -> Option<Val> + Send + Sync + 'static
    {
        let f: ResultFn = Arc::new(f);
        self.set_result(Self::SET_CODE_RESULT, ResultGenerator::Computed(f))
    }

    /// Single-threaded version of [`set_code_result`](#method.set_code_result),
    /// for functions that aren't `Send`.
    pub fn set_code_result_st<F>(&mut self, f: F) -> Result<&mut Self>
        where F: Fn(&Invocation) -> Option<Val> + 'static
    {
        let f = result_fn_st(f);
        self.set_result(Self::SET_CODE_RESULT, ResultGenerator::Computed(f))
    }

    /// Return the elements of `values` in order, then keep returning the last
    /// one.
    pub fn set_iterable_result<I>(&mut self, values: I) -> Result<&mut Self>
        where I: IntoIterator<Item = Val>
    {
        let cycle = Cycle::new(values.into_iter().collect());
        self.set_result(Self::SET_ITERABLE_RESULT,
                        ResultGenerator::Cyclic(cycle))
    }

    /// Freeze everything accumulated so far into an [`Interaction`].
    ///
    /// The builder is spent afterward: every further call, including another
    /// `build`, fails with [`Error::AlreadyBuilt`].
    pub fn build(&mut self) -> Result<Interaction> {
        self.check_stage(Self::BUILD, Stage::Built)?;
        if self.arg_kind == Some(ArgKind::Named) &&
            self.arg_names.len() != self.args.len()
        {
            return Err(Error::ArgumentNamesOutOfStep {
                diagnostic: self.diagnostic.clone(),
                names: self.arg_names.len(),
                constraints: self.args.len()
            });
        }
        let mut constraints = mem::take(&mut self.constraints);
        match self.arg_kind {
            Some(ArgKind::Positional) => constraints.push(
                InvocationConstraint::PositionalArguments(
                    mem::take(&mut self.args))),
            Some(ArgKind::Named) => constraints.push(
                InvocationConstraint::NamedArguments(
                    mem::take(&mut self.arg_names),
                    mem::take(&mut self.args))),
            None => ()
        }
        self.stage = Stage::Built;
        let interaction = Interaction::new(self.diagnostic.clone(),
                                           self.count,
                                           constraints,
                                           mem::take(&mut self.result));
        debug_event!(line = self.diagnostic.line,
                     column = self.diagnostic.column,
                     text = %self.diagnostic.text,
                     count = %interaction.count_range(),
                     constraints = interaction.constraints().len(),
                     "built interaction");
        Ok(interaction)
    }
}

impl fmt::Debug for InteractionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InteractionBuilder")
            .field("diagnostic", &self.diagnostic)
            .field("stage", &self.stage)
            .field("count", &self.count)
            .field("constraints", &self.constraints)
            .field("arg_kind", &self.arg_kind)
            .field("arg_names", &self.arg_names)
            .field("args", &self.args)
            .field("result", &self.result)
            .finish()
    }
}

/// A handle to one argument constraint, returned by
/// [`arg_equal`](InteractionBuilder::arg_equal) and
/// [`arg_code`](InteractionBuilder::arg_code).
///
/// Decorations always apply to the constraint the handle was created for.
/// While the handle lives the builder is borrowed, so no other constraint can
/// slip in between.
pub struct ArgRef<'b> {
    builder: &'b mut InteractionBuilder,
    index: usize
}

impl<'b> ArgRef<'b> {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn decorate<F>(self, op: &'static str, f: F) -> Self
        where F: FnOnce(ArgConstraint) -> ArgConstraint
    {
        let slot = &mut self.builder.args[self.index];
        *slot = f(mem::take(slot));
        trace_event!(line = self.builder.diagnostic.line,
                     column = self.builder.diagnostic.column,
                     op,
                     index = self.index,
                     "interaction builder");
        self
    }

    /// Narrow this argument to `ty`.
    pub fn of_type(self, ty: ArgType) -> Self {
        self.decorate(InteractionBuilder::TYPE_LAST_ARG, |c| c.typed(ty))
    }

    /// Negate this argument's constraint.
    pub fn negate(self) -> Self {
        self.decorate(InteractionBuilder::NEGATE_LAST_ARG,
                      ArgConstraint::negated)
    }

    /// The constraint as decorated so far.
    pub fn constraint(&self) -> &ArgConstraint {
        &self.builder.args[self.index]
    }

    /// Release the handle and continue with the builder.
    pub fn done(self) -> &'b mut InteractionBuilder {
        self.builder
    }
}
