//! Query planner.
//!
//! Turns a SELECT statement into a tree of physical operators:
//!
//! 1. Every FROM and JOIN table gets a scan, in the order written. Aliases
//!    are registered in the catalog first.
//! 2. WHERE and ON conditions are split into AND conjuncts. A conjunct that
//!    references one table becomes a selection directly above that table's
//!    scan. A conjunct that references several tables becomes a join
//!    predicate at the first join where all of them are available.
//! 3. Scans are folded left to right into a left-deep nested loop join
//!    tree, then wrapped in Project, Sort and DuplicateElimination as the
//!    statement requires.

use crate::ast::{Expr, FromItem, SelectStatement, SetOperator, Statement, TableRef};
use crate::executor::{
    DuplicateEliminationExecutor, NestedLoopJoin, Operator, ProjectExecutor, SelectExecutor, SortExecutor,
    TableScanExecutor,
};
use crate::planner::conjunct::{classify, split_conjuncts, FromTable, Placement};
use sluice_core::{Error, Result};
use sluice_storage::Catalog;
use tracing::debug;

/// Builds operator trees against a catalog.
///
/// The planner borrows the catalog mutably because FROM-clause aliases are
/// registered in it while planning.
pub struct QueryPlanner<'a> {
    catalog: &'a mut Catalog,
}

/// A multi-table conjunct waiting for its join step.
struct PendingJoin {
    expr: Expr,
    last: usize,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a planner over `catalog`.
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &*self.catalog
    }

    /// Plans a statement. Nothing is read from storage until the returned
    /// operator is pulled.
    pub fn plan(&mut self, statement: &Statement) -> Result<Box<dyn Operator>> {
        match statement {
            Statement::Select(select) => self.plan_select(select),
            Statement::SetOperation { op, .. } => Err(Error::unsupported(match op {
                SetOperator::Union => "UNION",
                SetOperator::Intersect => "INTERSECT",
                SetOperator::Except => "EXCEPT",
            })),
        }
    }

    fn plan_select(&mut self, select: &SelectStatement) -> Result<Box<dyn Operator>> {
        let tables = from_tables(select)?;

        let mut from = Vec::with_capacity(tables.len());
        for table in &tables {
            let qualifier = table.qualifier();
            if from.iter().any(|t: &FromTable| t.qualifier == qualifier) {
                return Err(Error::duplicate_table(qualifier));
            }
            if let Some(alias) = &table.alias {
                self.catalog.register_alias(alias, &table.name);
            }
            from.push(FromTable {
                qualifier: qualifier.to_string(),
                schema: self.catalog.schema_for(qualifier)?,
            });
        }

        let mut conjuncts = Vec::new();
        if let Some(selection) = &select.selection {
            split_conjuncts(selection, &mut conjuncts);
        }
        for join in &select.joins {
            if let Some(on) = &join.on {
                split_conjuncts(on, &mut conjuncts);
            }
        }

        let mut selections: Vec<Vec<Expr>> = vec![Vec::new(); from.len()];
        let mut pending = Vec::new();
        for conjunct in conjuncts {
            match classify(&conjunct, &from)? {
                Placement::Selection(position) => {
                    debug!(conjunct = %conjunct, table = %from[position].qualifier, "selection conjunct");
                    selections[position].push(conjunct);
                }
                Placement::Join { first, last } => {
                    debug!(
                        conjunct = %conjunct,
                        first = %from[first].qualifier,
                        last = %from[last].qualifier,
                        "join conjunct"
                    );
                    pending.push(PendingJoin { expr: conjunct, last });
                }
            }
        }

        let mut inputs = Vec::with_capacity(from.len());
        for (table, conjuncts) in from.iter().zip(selections) {
            let scan: Box<dyn Operator> = Box::new(TableScanExecutor::new(&*self.catalog, &table.qualifier)?);
            let input: Box<dyn Operator> = match Expr::conjunction(conjuncts) {
                Some(predicate) => Box::new(SelectExecutor::new(scan, predicate)?),
                None => scan,
            };
            inputs.push(input);
        }

        let mut root = fold_joins(inputs, &from, pending)?;

        root = Box::new(ProjectExecutor::new(root, &select.items)?);
        if !select.order_by.is_empty() {
            root = Box::new(SortExecutor::new(root, &select.order_by)?);
        }
        if select.distinct {
            // an ORDER BY sort already breaks ties on every column
            if select.order_by.is_empty() {
                root = Box::new(SortExecutor::full_schema(root));
            }
            root = Box::new(DuplicateEliminationExecutor::new(root));
        }
        Ok(root)
    }
}

/// Collects the FROM and JOIN tables in the order written.
fn from_tables(select: &SelectStatement) -> Result<Vec<&TableRef>> {
    std::iter::once(&select.from)
        .chain(select.joins.iter().map(|join| &join.right))
        .map(|item| match item {
            FromItem::Table(table) => Ok(table),
            FromItem::Subquery { .. } => Err(Error::unsupported("subquery in FROM")),
        })
        .collect()
}

/// Folds the per-table inputs into a left-deep join tree. Join step `i`
/// joins the tree built so far with input `i` and evaluates every pending
/// conjunct whose tables all lie at positions `<= i`.
fn fold_joins(
    inputs: Vec<Box<dyn Operator>>,
    from: &[FromTable],
    mut pending: Vec<PendingJoin>,
) -> Result<Box<dyn Operator>> {
    let mut inputs = inputs.into_iter();
    let mut root = inputs.next().ok_or_else(|| Error::unsupported("SELECT without FROM"))?;

    for (step, right) in inputs.enumerate().map(|(i, op)| (i + 1, op)) {
        let (ready, rest): (Vec<_>, Vec<_>) = pending.into_iter().partition(|p| p.last <= step);
        pending = rest;
        let predicate = Expr::conjunction(ready.into_iter().map(|p| p.expr));
        if let Some(predicate) = &predicate {
            debug!(predicate = %predicate, table = %from[step].qualifier, "join predicate attached");
        }
        root = Box::new(NestedLoopJoin::new(root, right, predicate)?);
    }

    match pending.into_iter().next() {
        Some(left_over) => Err(Error::unsatisfiable_predicate(left_over.expr.to_string())),
        None => Ok(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, JoinItem, SelectItem};
    use crate::executor::explain;
    use sluice_core::Tuple;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Sailors"), "1,200,50\n2,200,200\n3,100,105\n4,100,50\n").unwrap();
        fs::write(dir.path().join("Reserves"), "1,101\n1,102\n2,101\n3,102\n4,104\n").unwrap();
        fs::write(dir.path().join("Boats"), "101,2,3\n102,3,4\n104,5,6\n").unwrap();
        let mut catalog = Catalog::new(dir.path());
        catalog.load("Sailors A B C\nReserves G H\nBoats D E F\n".as_bytes()).unwrap();
        (dir, catalog)
    }

    fn rows(op: &mut Box<dyn Operator>) -> Vec<Vec<i64>> {
        op.collect_tuples()
            .unwrap()
            .into_iter()
            .map(|t| t.values().to_vec())
            .collect()
    }

    #[test]
    fn test_plan_single_table_selection() {
        let (_dir, mut catalog) = setup();
        let stmt = SelectStatement::new(FromItem::table("Sailors"))
            .filter(Expr::ge(Expr::column("Sailors", "B"), Expr::column("Sailors", "C")));
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        assert_eq!(
            explain(plan.as_ref()),
            "Project [*]\n  Select [Sailors.B >= Sailors.C]\n    TableScan Sailors\n"
        );
        assert_eq!(
            rows(&mut plan),
            vec![vec![1, 200, 50], vec![2, 200, 200], vec![4, 100, 50]]
        );
    }

    #[test]
    fn test_plan_pushdown_and_join() {
        let (_dir, mut catalog) = setup();
        let stmt = SelectStatement::new(FromItem::aliased("Sailors", "S"))
            .join(JoinItem::cross(FromItem::aliased("Reserves", "R")))
            .filter(Expr::and(
                Expr::eq(Expr::column("S", "A"), Expr::column("R", "G")),
                Expr::gt(Expr::column("S", "C"), Expr::column("S", "B")),
            ))
            .order_by(vec![ColumnRef::new("S", "A")]);
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        assert_eq!(
            explain(plan.as_ref()),
            "Sort [S.A]\n\
             \x20\x20Project [*]\n\
             \x20\x20\x20\x20NestedLoopJoin [S.A = R.G]\n\
             \x20\x20\x20\x20\x20\x20Select [S.C > S.B]\n\
             \x20\x20\x20\x20\x20\x20\x20\x20TableScan Sailors AS S\n\
             \x20\x20\x20\x20\x20\x20TableScan Reserves AS R\n"
        );
        assert_eq!(rows(&mut plan), vec![vec![3, 100, 105, 3, 102]]);
        assert_eq!(catalog.resolve("S"), "Sailors");
    }

    #[test]
    fn test_plan_three_way_join_attach_step() {
        let (_dir, mut catalog) = setup();
        // S.A = B.E only becomes evaluable once Boats is joined
        let stmt = SelectStatement::new(FromItem::aliased("Sailors", "S"))
            .join(JoinItem::cross(FromItem::aliased("Reserves", "R")))
            .join(JoinItem::on(
                FromItem::aliased("Boats", "B"),
                Expr::eq(Expr::column("R", "H"), Expr::column("B", "D")),
            ))
            .filter(Expr::and(
                Expr::eq(Expr::column("S", "A"), Expr::column("R", "G")),
                Expr::eq(Expr::column("S", "A"), Expr::column("B", "E")),
            ))
            .items(vec![SelectItem::column("S", "A"), SelectItem::column("B", "D")]);
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        let text = explain(plan.as_ref());
        assert!(text.contains("NestedLoopJoin [S.A = B.E AND R.H = B.D]"), "{}", text);
        assert!(text.contains("NestedLoopJoin [S.A = R.G]"), "{}", text);
        // (2, 101): Sailor 2 reserved boat 101 whose E is 2
        // (3, 102): Sailor 3 reserved boat 102 whose E is 3
        assert_eq!(rows(&mut plan), vec![vec![2, 101], vec![3, 102]]);
    }

    #[test]
    fn test_plan_projection_and_distinct() {
        let (_dir, mut catalog) = setup();
        let stmt = SelectStatement::new(FromItem::table("Reserves"))
            .items(vec![SelectItem::column("Reserves", "H")])
            .distinct(true);
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        assert!(explain(plan.as_ref()).starts_with("DuplicateElimination\n  Sort [Reserves.H]\n"));
        assert_eq!(rows(&mut plan), vec![vec![101], vec![102], vec![104]]);
    }

    #[test]
    fn test_plan_distinct_with_order_by() {
        let (_dir, mut catalog) = setup();
        let stmt = SelectStatement::new(FromItem::table("Reserves"))
            .items(vec![SelectItem::column("Reserves", "G")])
            .order_by(vec![ColumnRef::new("Reserves", "G")])
            .distinct(true);
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        assert_eq!(plan.children().len(), 1);
        assert_eq!(plan.children()[0].label(), "Sort [Reserves.G]");
        assert_eq!(rows(&mut plan), vec![vec![1], vec![2], vec![3], vec![4]]);
    }

    #[test]
    fn test_plan_constant_conjunct_on_first_table() {
        let (_dir, mut catalog) = setup();
        let stmt = SelectStatement::new(FromItem::table("Sailors"))
            .join(JoinItem::cross(FromItem::table("Reserves")))
            .filter(Expr::gt(Expr::literal(2), Expr::literal(3)));
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        assert!(explain(plan.as_ref()).contains("Select [2 > 3]\n      TableScan Sailors\n"));
        assert_eq!(plan.next().unwrap(), None);
    }

    #[test]
    fn test_plan_errors() {
        let (_dir, mut catalog) = setup();
        let mut planner = QueryPlanner::new(&mut catalog);

        let unknown = SelectStatement::new(FromItem::table("Ships"));
        assert!(matches!(planner.plan(&unknown.into()), Err(Error::TableNotFound { .. })));

        let twice = SelectStatement::new(FromItem::table("Sailors"))
            .join(JoinItem::cross(FromItem::table("Sailors")));
        assert!(matches!(planner.plan(&twice.into()), Err(Error::DuplicateTable { .. })));

        let subquery = SelectStatement::new(FromItem::Subquery {
            query: Box::new(SelectStatement::new(FromItem::table("Sailors")).into()),
            alias: Some("T".into()),
        });
        assert!(matches!(planner.plan(&subquery.into()), Err(Error::Unsupported { .. })));

        let union = Statement::SetOperation {
            op: SetOperator::Union,
            left: Box::new(SelectStatement::new(FromItem::table("Sailors")).into()),
            right: Box::new(SelectStatement::new(FromItem::table("Sailors")).into()),
        };
        assert!(matches!(planner.plan(&union), Err(Error::Unsupported { .. })));

        let arithmetic_where = SelectStatement::new(FromItem::table("Sailors"))
            .filter(Expr::add(Expr::column("Sailors", "A"), Expr::literal(1)));
        assert!(matches!(
            planner.plan(&arithmetic_where.into()),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_plan_is_replayable() {
        let (_dir, mut catalog) = setup();
        let stmt = SelectStatement::new(FromItem::aliased("Sailors", "S"))
            .join(JoinItem::cross(FromItem::aliased("Reserves", "R")))
            .filter(Expr::eq(Expr::column("S", "A"), Expr::column("R", "G")));
        let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt.into()).unwrap();
        let first = plan.collect_tuples().unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first[0], Tuple::new(vec![1, 200, 50, 1, 101]));
        plan.reset().unwrap();
        assert_eq!(plan.collect_tuples().unwrap(), first);
    }
}
