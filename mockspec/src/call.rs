// vim: tw=80
//! A builder call as data, so that front-ends can record the calls for one
//! declaration and replay them later.

use crate::{ArgPredicate, ArgType, InteractionBuilder, ResultFn, Slot, Target,
            Val};
use std::fmt;

/// One operation on an [`InteractionBuilder`].
///
/// Feed these to [`InteractionBuilder::apply`] one at a time, or to
/// [`InteractionBuilder::replay`] all at once.
#[derive(Clone)]
pub enum BuilderCall {
    SetFixedCount(Slot<Val>),
    SetRangeCount { min: Slot<Val>, max: Slot<Val>, inclusive: bool },
    AddEqualTarget(Slot<Target>),
    AddEqualMethodName(String),
    AddRegexMethodName(String),
    SetArgListKind { positional: bool },
    AddArgName(String),
    AddEqualArg(Slot<Val>),
    AddCodeArg(ArgPredicate),
    TypeLastArg(ArgType),
    NegateLastArg,
    SetDummyResult,
    SetConstantResult(Slot<Val>),
    SetCodeResult(ResultFn),
    SetIterableResult(Vec<Val>),
}

impl BuilderCall {
    /// The name of the builder method this call stands for.
    pub fn name(&self) -> &'static str {
        match self {
            BuilderCall::SetFixedCount(_) =>
                InteractionBuilder::SET_FIXED_COUNT,
            BuilderCall::SetRangeCount { .. } =>
                InteractionBuilder::SET_RANGE_COUNT,
            BuilderCall::AddEqualTarget(_) =>
                InteractionBuilder::ADD_EQUAL_TARGET,
            BuilderCall::AddEqualMethodName(_) =>
                InteractionBuilder::ADD_EQUAL_METHOD_NAME,
            BuilderCall::AddRegexMethodName(_) =>
                InteractionBuilder::ADD_REGEX_METHOD_NAME,
            BuilderCall::SetArgListKind { .. } =>
                InteractionBuilder::SET_ARG_LIST_KIND,
            BuilderCall::AddArgName(_) => InteractionBuilder::ADD_ARG_NAME,
            BuilderCall::AddEqualArg(_) => InteractionBuilder::ADD_EQUAL_ARG,
            BuilderCall::AddCodeArg(_) => InteractionBuilder::ADD_CODE_ARG,
            BuilderCall::TypeLastArg(_) => InteractionBuilder::TYPE_LAST_ARG,
            BuilderCall::NegateLastArg => InteractionBuilder::NEGATE_LAST_ARG,
            BuilderCall::SetDummyResult => InteractionBuilder::SET_DUMMY_RESULT,
            BuilderCall::SetConstantResult(_) =>
                InteractionBuilder::SET_CONSTANT_RESULT,
            BuilderCall::SetCodeResult(_) =>
                InteractionBuilder::SET_CODE_RESULT,
            BuilderCall::SetIterableResult(_) =>
                InteractionBuilder::SET_ITERABLE_RESULT,
        }
    }
}

impl fmt::Debug for BuilderCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut t = f.debug_tuple(self.name());
        match self {
            BuilderCall::SetFixedCount(c) => t.field(c),
            BuilderCall::SetRangeCount { min, max, inclusive } =>
                t.field(min).field(max).field(inclusive),
            BuilderCall::AddEqualTarget(Slot::Wildcard) => t.field(&"_"),
            BuilderCall::AddEqualTarget(Slot::Given(target)) =>
                t.field(&std::sync::Arc::as_ptr(target)),
            BuilderCall::AddEqualMethodName(s)
            | BuilderCall::AddRegexMethodName(s)
            | BuilderCall::AddArgName(s) => t.field(s),
            BuilderCall::SetArgListKind { positional } => t.field(positional),
            BuilderCall::AddEqualArg(v) | BuilderCall::SetConstantResult(v) =>
                t.field(v),
            BuilderCall::AddCodeArg(_) | BuilderCall::SetCodeResult(_) =>
                t.field(&format_args!("..")),
            BuilderCall::TypeLastArg(ty) => t.field(ty),
            BuilderCall::NegateLastArg | BuilderCall::SetDummyResult => &mut t,
            BuilderCall::SetIterableResult(values) => t.field(values),
        };
        t.finish()
    }
}
