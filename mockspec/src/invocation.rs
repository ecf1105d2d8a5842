// vim: tw=80
//! Invocation records, as produced by the mock proxy for every real call.

use crate::{Target, Val, Value};

/// The arguments of a recorded call.
#[derive(Clone, Debug)]
pub enum Arguments {
    Positional(Vec<Val>),
    Named(Vec<(String, Val)>),
}

/// One real call on a mock object.
#[derive(Clone, Debug)]
pub struct Invocation {
    target: Target,
    method: String,
    args: Arguments
}

impl Invocation {
    /// A call with positional arguments.
    pub fn positional(target: Target, method: impl Into<String>,
                      args: Vec<Val>) -> Self
    {
        let args = Arguments::Positional(args);
        Invocation { target, method: method.into(), args }
    }

    /// A call with named arguments.
    pub fn named<N>(target: Target, method: impl Into<String>,
                    args: impl IntoIterator<Item = (N, Val)>) -> Self
        where N: Into<String>
    {
        let args = args.into_iter()
            .map(|(n, v)| (n.into(), v))
            .collect();
        let args = Arguments::Named(args);
        Invocation { target, method: method.into(), args }
    }

    /// The receiver of the call.
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> &Arguments {
        &self.args
    }

    /// Look up a named argument.  If the name was passed more than once, the
    /// first occurrence wins.
    pub fn named_arg(&self, name: &str) -> Option<&(dyn Value + 'static)> {
        match &self.args {
            Arguments::Named(args) => args.iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_ref()),
            Arguments::Positional(_) => None
        }
    }
}
