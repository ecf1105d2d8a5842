// vim: tw=80
//! Constraints on a whole invocation: who was called, which method, and with
//! what arguments.

use crate::{
    ArgConstraint,
    Arguments,
    Diagnostic,
    Error,
    Invocation,
    Result,
    Target,
    same_target
};
use predicates::{
    Predicate,
    reflection::{Case, Child, PredicateReflection, Product},
    str::RegexPredicate
};
use std::fmt;

/// A method name pattern.  The pattern must match the whole name.
pub struct MethodPattern {
    source: String,
    regex: RegexPredicate
}

impl MethodPattern {
    pub(crate) fn new(pattern: &str, diagnostic: &Diagnostic) -> Result<Self> {
        let regex = predicates::str::is_match(format!("^(?:{pattern})$"))
            .map_err(|e| Error::InvalidMethodPattern {
                diagnostic: diagnostic.clone(),
                pattern: pattern.to_owned(),
                reason: e.to_string()
            })?;
        Ok(MethodPattern { source: pattern.to_owned(), regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.eval(name)
    }
}

/// A predicate over a whole [`Invocation`].  An interaction matches when every
/// one of its constraints does.
pub enum InvocationConstraint {
    /// The receiver must be the very same object.
    IdenticalTarget(Target),
    EqualMethodName(String),
    RegexMethodName(MethodPattern),
    /// Arguments are matched by position.  The invocation must have exactly
    /// as many arguments as there are constraints.
    PositionalArguments(Vec<ArgConstraint>),
    /// Arguments are matched by name.  Every constrained name must be present
    /// and satisfy its constraint; other arguments are ignored.
    NamedArguments(Vec<String>, Vec<ArgConstraint>),
}

impl InvocationConstraint {
    pub fn is_satisfied_by(&self, inv: &Invocation) -> bool {
        match self {
            InvocationConstraint::IdenticalTarget(t) =>
                same_target(t, inv.target()),
            InvocationConstraint::EqualMethodName(name) =>
                name == inv.method(),
            InvocationConstraint::RegexMethodName(pattern) =>
                pattern.is_match(inv.method()),
            InvocationConstraint::PositionalArguments(constraints) =>
                match inv.arguments() {
                    Arguments::Positional(args) =>
                        args.len() == constraints.len() &&
                        constraints.iter()
                            .zip(args)
                            .all(|(c, a)| c.is_satisfied_by(&**a)),
                    Arguments::Named(_) => false
                },
            InvocationConstraint::NamedArguments(names, constraints) =>
                match inv.arguments() {
                    Arguments::Named(_) => names.iter()
                        .zip(constraints)
                        .all(|(n, c)| inv.named_arg(n)
                             .map_or(false, |a| c.is_satisfied_by(a))),
                    Arguments::Positional(_) => false
                }
        }
    }

    /// Does this constraint govern the argument list?
    pub fn is_argument_list(&self) -> bool {
        matches!(self, InvocationConstraint::PositionalArguments(_)
                     | InvocationConstraint::NamedArguments(..))
    }
}

/// Structural equality.  Targets compare by identity, patterns by source.
impl PartialEq for InvocationConstraint {
    fn eq(&self, other: &Self) -> bool {
        use InvocationConstraint::*;
        match (self, other) {
            (IdenticalTarget(a), IdenticalTarget(b)) => same_target(a, b),
            (EqualMethodName(a), EqualMethodName(b)) => a == b,
            (RegexMethodName(a), RegexMethodName(b)) =>
                a.as_str() == b.as_str(),
            (PositionalArguments(a), PositionalArguments(b)) => a == b,
            (NamedArguments(na, a), NamedArguments(nb, b)) =>
                na == nb && a == b,
            _ => false
        }
    }
}

impl fmt::Debug for InvocationConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use InvocationConstraint::*;
        match self {
            IdenticalTarget(t) => f.debug_tuple("IdenticalTarget")
                .field(&std::sync::Arc::as_ptr(t))
                .finish(),
            EqualMethodName(n) => f.debug_tuple("EqualMethodName")
                .field(n)
                .finish(),
            RegexMethodName(p) => f.debug_tuple("RegexMethodName")
                .field(&p.as_str())
                .finish(),
            PositionalArguments(c) => f.debug_tuple("PositionalArguments")
                .field(c)
                .finish(),
            NamedArguments(n, c) => f.debug_tuple("NamedArguments")
                .field(n)
                .field(c)
                .finish(),
        }
    }
}

impl fmt::Display for InvocationConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvocationConstraint::IdenticalTarget(t) =>
                write!(f, "target is {:p}", std::sync::Arc::as_ptr(t)),
            InvocationConstraint::EqualMethodName(n) =>
                write!(f, "method == {n}"),
            InvocationConstraint::RegexMethodName(p) =>
                write!(f, "method =~ /{}/", p.as_str()),
            InvocationConstraint::PositionalArguments(constraints) => {
                f.write_str("(")?;
                for (i, c) in constraints.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            },
            InvocationConstraint::NamedArguments(names, constraints) => {
                f.write_str("(")?;
                for (i, (n, c)) in names.iter().zip(constraints).enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{n}: {c}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl PredicateReflection for InvocationConstraint {
    fn children<'a>(&'a self) -> Box<dyn Iterator<Item = Child<'a>> + 'a> {
        match self {
            InvocationConstraint::PositionalArguments(constraints) =>
                Box::new(constraints.iter().map(|c| Child::new("arg", c))),
            InvocationConstraint::NamedArguments(names, constraints) =>
                Box::new(names.iter()
                    .zip(constraints)
                    .map(|(n, c)| Child::new(n.as_str(), c))),
            _ => Box::new(std::iter::empty())
        }
    }
}

impl Predicate<Invocation> for InvocationConstraint {
    fn eval(&self, inv: &Invocation) -> bool {
        self.is_satisfied_by(inv)
    }

    fn find_case<'a>(&'a self, expected: bool, inv: &Invocation)
        -> Option<Case<'a>>
    {
        let result = self.eval(inv);
        if result != expected {
            return None;
        }
        let case = Case::new(Some(self), result);
        let case = match (self, inv.arguments()) {
            (InvocationConstraint::IdenticalTarget(_), _) => case,
            (InvocationConstraint::EqualMethodName(_), _)
            | (InvocationConstraint::RegexMethodName(_), _) =>
                case.add_product(Product::new("method",
                                              inv.method().to_owned())),
            (InvocationConstraint::PositionalArguments(constraints),
             Arguments::Positional(args)) =>
            {
                if args.len() == constraints.len() {
                    constraints.iter()
                        .zip(args)
                        .filter_map(|(c, a)| c.find_case(expected, &**a))
                        .fold(case, |case, c| case.add_child(c))
                } else {
                    case.add_product(Product::new("expected arguments",
                                                  constraints.len()))
                        .add_product(Product::new("actual arguments",
                                                  args.len()))
                }
            },
            (InvocationConstraint::NamedArguments(names, constraints),
             Arguments::Named(_)) =>
            {
                let mut case = case;
                for (n, c) in names.iter().zip(constraints) {
                    let Some(a) = inv.named_arg(n) else {
                        case = case.add_product(
                            Product::new("missing argument", n.clone()));
                        continue;
                    };
                    if let Some(child) = c.find_case(expected, a) {
                        case = case.add_child(child);
                    }
                }
                case
            },
            (InvocationConstraint::PositionalArguments(_), Arguments::Named(_))
                => case.add_product(Product::new("actual arguments", "named")),
            (InvocationConstraint::NamedArguments(..), Arguments::Positional(_))
                => case.add_product(Product::new("actual arguments",
                                                 "positional")),
        };
        Some(case)
    }
}
