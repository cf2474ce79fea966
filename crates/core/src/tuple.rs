//! Tuple structure for Sluice.
//!
//! A `Tuple` is the unit of data flowing between operators: an ordered,
//! fixed-arity sequence of integers. Its text form (`1,200,50`) is the same
//! as one line of a stored relation.

use crate::error::{Error, Result};
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// An immutable row of integer values, addressed by position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tuple {
    values: Vec<i64>,
}

impl Tuple {
    /// Creates a new tuple from its values.
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Gets the value at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Returns the number of values in this tuple.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this tuple has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Creates a new tuple holding `self`'s values followed by `other`'s.
    pub fn concat(&self, other: &Tuple) -> Tuple {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);
        Tuple { values }
    }

    /// Creates a new tuple from the values at `indices`, in that order.
    /// Indices may repeat. Returns `None` if any index is out of range.
    pub fn project(&self, indices: &[usize]) -> Option<Tuple> {
        indices
            .iter()
            .map(|&i| self.get(i))
            .collect::<Option<Vec<_>>>()
            .map(Tuple::new)
    }
}

impl From<Vec<i64>> for Tuple {
    fn from(values: Vec<i64>) -> Self {
        Tuple::new(values)
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl FromStr for Tuple {
    type Err = Error;

    /// Parses the storage line format. The returned error has no path or
    /// line information; readers add it.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return Err(Error::malformed_tuple("", 0, "empty line"));
        }
        let values = line
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<i64>()
                    .map_err(|_| Error::malformed_tuple("", 0, format!("invalid integer {:?}", token)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Tuple { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_tuple_get_value() {
        let tuple = Tuple::new(vec![1, 200, 50]);
        assert_eq!(tuple.len(), 3);
        assert_eq!(tuple.get(0), Some(1));
        assert_eq!(tuple.get(2), Some(50));
        assert_eq!(tuple.get(3), None);
    }

    #[test]
    fn test_tuple_equality() {
        let t1 = Tuple::new(vec![1, 2]);
        let t2 = Tuple::new(vec![1, 2]);
        let t3 = Tuple::new(vec![2, 1]);
        assert_eq!(t1, t2);
        assert_ne!(t1, t3);
    }

    #[test]
    fn test_tuple_concat() {
        let left = Tuple::new(vec![3, 100, 105]);
        let right = Tuple::new(vec![3, 102]);
        let joined = left.concat(&right);
        assert_eq!(joined.values(), &[3, 100, 105, 3, 102]);
        // inputs are untouched
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn test_tuple_project_reorders_and_repeats() {
        let tuple = Tuple::new(vec![10, 20, 30]);
        assert_eq!(tuple.project(&[2, 0, 0]), Some(Tuple::new(vec![30, 10, 10])));
        assert_eq!(tuple.project(&[3]), None);
    }

    #[test]
    fn test_tuple_text_format() {
        let tuple: Tuple = "1,200,50".parse().unwrap();
        assert_eq!(tuple.values(), &[1, 200, 50]);
        assert_eq!(tuple.to_string(), "1,200,50");

        let tuple: Tuple = " -4 , 7\r".parse().unwrap();
        assert_eq!(tuple.values(), &[-4, 7]);
        assert_eq!(tuple.to_string(), "-4,7");
    }

    #[test]
    fn test_tuple_parse_errors() {
        assert!(matches!("".parse::<Tuple>(), Err(Error::MalformedTuple { .. })));
        assert!(matches!("1,x,3".parse::<Tuple>(), Err(Error::MalformedTuple { .. })));
        assert!(matches!("1,,3".parse::<Tuple>(), Err(Error::MalformedTuple { .. })));
    }
}
