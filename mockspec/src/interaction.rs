// vim: tw=80
//! The built, immutable interaction.

use crate::{
    CountRange,
    Invocation,
    InvocationConstraint,
    Reply,
    ResultGenerator
};
use predicates::{
    Predicate,
    reflection::{Case, Child, PredicateReflection}
};
use predicates_tree::CaseTreeExt;
use std::fmt;

/// Where an interaction was declared, for failure messages.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub column: u32,
    /// The declaration's source text.
    pub text: String
}

impl Diagnostic {
    pub fn new(line: u32, column: u32, text: impl Into<String>) -> Self {
        Diagnostic { line, column, text: text.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "`{}` at {}:{}", self.text, self.line, self.column)
    }
}

/// One expected interaction with a mock.
///
/// Built once by an [`InteractionBuilder`](crate::InteractionBuilder) and never
/// changed afterward.  The matching engine asks it whether an invocation
/// [`matches`](Interaction::matches), asks it to
/// [`produce`](Interaction::produce) a result, and at the end of the test
/// checks the recorded call count against its
/// [`count_range`](Interaction::count_range).
pub struct Interaction {
    diagnostic: Diagnostic,
    count: CountRange,
    constraints: Vec<InvocationConstraint>,
    result: ResultGenerator
}

impl Interaction {
    pub(crate) fn new(diagnostic: Diagnostic, count: CountRange,
                      constraints: Vec<InvocationConstraint>,
                      result: ResultGenerator) -> Self
    {
        Interaction { diagnostic, count, constraints, result }
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn count_range(&self) -> CountRange {
        self.count
    }

    pub fn constraints(&self) -> &[InvocationConstraint] {
        &self.constraints
    }

    pub fn result_generator(&self) -> &ResultGenerator {
        &self.result
    }

    /// Does `inv` satisfy every constraint of this interaction?
    ///
    /// Custom argument predicates run synchronously; if one panics, so does
    /// this.
    pub fn matches(&self, inv: &Invocation) -> bool {
        let matched = self.constraints.iter().all(|c| c.is_satisfied_by(inv));
        trace_event!(line = self.diagnostic.line,
                     column = self.diagnostic.column,
                     method = inv.method(),
                     matched,
                     "match test");
        matched
    }

    /// Explain why `inv` does not match, as a tree of the failing constraints.
    /// Returns `None` if it does match.
    pub fn mismatch(&self, inv: &Invocation) -> Option<String> {
        self.find_case(false, inv)
            .map(|case| case.tree().to_string())
    }

    /// Produce the next result for a matched invocation.
    pub fn produce(&self, inv: &Invocation) -> Reply {
        self.result.produce(inv)
    }
}

/// Structural equality: same diagnostic, count range, constraints and result
/// generator.
impl PartialEq for Interaction {
    fn eq(&self, other: &Self) -> bool {
        self.diagnostic == other.diagnostic &&
            self.count == other.count &&
            self.constraints == other.constraints &&
            self.result == other.result
    }
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("diagnostic", &self.diagnostic)
            .field("count", &self.count)
            .field("constraints", &self.constraints)
            .field("result", &self.result)
            .finish()
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.diagnostic, self.count)
    }
}

impl PredicateReflection for Interaction {
    fn children<'a>(&'a self) -> Box<dyn Iterator<Item = Child<'a>> + 'a> {
        Box::new(self.constraints.iter().map(|c| Child::new("constraint", c)))
    }
}

impl Predicate<Invocation> for Interaction {
    fn eval(&self, inv: &Invocation) -> bool {
        self.matches(inv)
    }

    fn find_case<'a>(&'a self, expected: bool, inv: &Invocation)
        -> Option<Case<'a>>
    {
        let result = self.eval(inv);
        if result != expected {
            return None;
        }
        let case = self.constraints.iter()
            .filter_map(|c| c.find_case(expected, inv))
            .fold(Case::new(Some(self), result), |case, c| case.add_child(c));
        Some(case)
    }
}
