use crate::{Literal, Variable};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// An ordered list of literals.
///
/// Used for cores, solutions and atomic sets alike. The order is the one the
/// literals were produced in and is kept when printing.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Assignment(Vec<Literal>);

impl Assignment {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self(literals)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.0.contains(&literal)
    }

    /// The variables of all literals, in literal order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.iter().map(|literal| literal.unsigned_abs())
    }

    /// Flips the sign of every literal.
    pub fn negate(&self) -> Self {
        self.0.iter().map(|literal| -literal).collect()
    }

    /// Keeps the literals whose negation occurs in `other`.
    ///
    /// For the cores under `+v` and `-v` this yields the literals that flip together with `v`.
    pub fn retain_all_negated(&self, other: &Assignment) -> Self {
        self.0
            .iter()
            .copied()
            .filter(|literal| other.contains(-literal))
            .collect()
    }

    /// Literals that are positive.
    pub fn positive(&self) -> Self {
        self.0.iter().copied().filter(|l| l.is_positive()).collect()
    }

    /// Literals that are negative.
    pub fn negative(&self) -> Self {
        self.0.iter().copied().filter(|l| l.is_negative()).collect()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromIterator<Literal> for Assignment {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Literal>> for Assignment {
    fn from(value: Vec<Literal>) -> Self {
        Self(value)
    }
}

impl From<Assignment> for Vec<Literal> {
    fn from(value: Assignment) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::Assignment;

    #[test]
    fn retain_negated() {
        let first = Assignment::from(vec![1, 2, -3, 4]);
        let second = Assignment::from(vec![-1, -2, -3, 5]);

        assert_eq!(first.retain_all_negated(&second), Assignment::from(vec![1, 2]));
        assert!(first.retain_all_negated(&Assignment::default()).is_empty());
    }

    #[test]
    fn polarity_split() {
        let core = Assignment::from(vec![3, -1, 7, -5]);

        assert_eq!(core.positive(), Assignment::from(vec![3, 7]));
        assert_eq!(core.negative(), Assignment::from(vec![-1, -5]));
        assert_eq!(core.negate(), Assignment::from(vec![-3, 1, -7, 5]));
        assert_eq!(core.variables().collect::<Vec<_>>(), vec![3, 1, 7, 5]);
    }

    #[test]
    fn display() {
        assert_eq!(Assignment::from(vec![1, -2, 3]).to_string(), "1 -2 3");
        assert_eq!(Assignment::default().to_string(), "");
    }
}
