//! WHERE clause conjunct analysis.

use crate::ast::{BinaryOp, Expr};
use sluice_core::schema::Schema;
use sluice_core::{Error, Result};

/// A FROM-list entry as seen by conjunct classification.
#[derive(Clone, Debug)]
pub struct FromTable {
    /// Alias if one was given, else the table name.
    pub qualifier: String,
    /// Schema qualified by `qualifier`.
    pub schema: Schema,
}

/// Where a conjunct is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Selection on the scan of the table at this FROM position.
    Selection(usize),
    /// Join predicate spanning the FROM positions `first..=last`.
    Join { first: usize, last: usize },
}

/// Splits a predicate into its top-level AND conjuncts, left to right.
/// Parenthesized conjunctions are split too.
pub fn split_conjuncts(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOp::And,
            right,
        } => {
            split_conjuncts(left, out);
            split_conjuncts(right, out);
        }
        Expr::Nested(inner) if is_conjunction(inner) => split_conjuncts(inner, out),
        other => out.push(other.clone()),
    }
}

fn is_conjunction(expr: &Expr) -> bool {
    match expr {
        Expr::BinaryOp { op: BinaryOp::And, .. } => true,
        Expr::Nested(inner) => is_conjunction(inner),
        _ => false,
    }
}

/// Returns the sorted FROM positions a conjunct references.
///
/// A qualified column must name a FROM entry that has the column. An
/// unqualified column belongs to the first FROM entry that has it.
pub fn referenced_tables(expr: &Expr, from: &[FromTable]) -> Result<Vec<usize>> {
    let mut positions = Vec::new();
    for col in expr.columns() {
        let position = match col.table() {
            Some(qualifier) => {
                let position = from
                    .iter()
                    .position(|t| t.qualifier == qualifier)
                    .ok_or_else(|| Error::table_not_found(qualifier))?;
                from[position].schema.index_of(Some(qualifier), &col.column)?;
                position
            }
            None => from
                .iter()
                .position(|t| t.schema.index_of(None, &col.column).is_ok())
                .ok_or_else(|| Error::column_not_found(None, col.column.as_str()))?,
        };
        if !positions.contains(&position) {
            positions.push(position);
        }
    }
    positions.sort_unstable();
    Ok(positions)
}

/// Decides where a conjunct is evaluated. Conjuncts without column
/// references are placed on the first table.
pub fn classify(expr: &Expr, from: &[FromTable]) -> Result<Placement> {
    let tables = referenced_tables(expr, from)?;
    Ok(match tables.as_slice() {
        [] => Placement::Selection(0),
        [only] => Placement::Selection(*only),
        [first, .., last] => Placement::Join {
            first: *first,
            last: *last,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ColumnRef;

    fn from_list() -> Vec<FromTable> {
        vec![
            FromTable {
                qualifier: "S".into(),
                schema: Schema::for_table("S", ["A", "B", "C"]),
            },
            FromTable {
                qualifier: "R".into(),
                schema: Schema::for_table("R", ["G", "H"]),
            },
            FromTable {
                qualifier: "B".into(),
                schema: Schema::for_table("B", ["D", "E", "F"]),
            },
        ]
    }

    fn bare(name: &str) -> Expr {
        Expr::Column(ColumnRef::bare(name))
    }

    #[test]
    fn test_split_conjuncts() {
        let a = Expr::eq(Expr::column("S", "A"), Expr::literal(1));
        let b = Expr::eq(Expr::column("R", "G"), Expr::literal(2));
        let c = Expr::eq(Expr::column("B", "D"), Expr::literal(3));
        let expr = Expr::and(Expr::nested(Expr::and(a.clone(), b.clone())), c.clone());

        let mut out = Vec::new();
        split_conjuncts(&expr, &mut out);
        assert_eq!(out, vec![a, b, c]);
    }

    #[test]
    fn test_split_keeps_nested_comparison() {
        let expr = Expr::nested(Expr::lt(Expr::literal(1), Expr::literal(2)));
        let mut out = Vec::new();
        split_conjuncts(&expr, &mut out);
        assert_eq!(out, vec![expr]);
    }

    #[test]
    fn test_classify() {
        let from = from_list();
        let sel = Expr::ge(Expr::column("S", "B"), Expr::column("S", "C"));
        assert_eq!(classify(&sel, &from).unwrap(), Placement::Selection(0));

        let join = Expr::eq(Expr::column("B", "D"), Expr::column("S", "A"));
        assert_eq!(
            classify(&join, &from).unwrap(),
            Placement::Join { first: 0, last: 2 }
        );

        let constant = Expr::eq(Expr::literal(1), Expr::literal(1));
        assert_eq!(classify(&constant, &from).unwrap(), Placement::Selection(0));
    }

    #[test]
    fn test_unqualified_columns() {
        let from = from_list();
        assert_eq!(
            classify(&Expr::gt(bare("H"), Expr::literal(100)), &from).unwrap(),
            Placement::Selection(1)
        );
        assert_eq!(
            classify(&Expr::eq(bare("A"), bare("E")), &from).unwrap(),
            Placement::Join { first: 0, last: 2 }
        );
        assert!(matches!(
            classify(&Expr::eq(bare("Z"), Expr::literal(1)), &from),
            Err(Error::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_qualifier() {
        let from = from_list();
        let expr = Expr::eq(Expr::column("Sailors", "A"), Expr::literal(1));
        assert!(matches!(classify(&expr, &from), Err(Error::TableNotFound { .. })));

        let expr = Expr::eq(Expr::column("S", "G"), Expr::literal(1));
        assert!(matches!(classify(&expr, &from), Err(Error::ColumnNotFound { .. })));
    }
}
