//! Statement AST definitions.

use crate::ast::expr::{ColumnRef, Expr};

/// A table named in FROM or JOIN, with its optional alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates an unaliased table reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Creates an aliased table reference.
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Returns the name columns of this table are qualified by: the alias
    /// if present, else the table name.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// An item of the FROM list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FromItem {
    /// A stored relation.
    Table(TableRef),
    /// A derived table `(SELECT ...) AS alias`.
    Subquery {
        query: Box<Statement>,
        alias: Option<String>,
    },
}

impl FromItem {
    /// Creates a table FROM item.
    pub fn table(name: impl Into<String>) -> Self {
        FromItem::Table(TableRef::new(name))
    }

    /// Creates an aliased table FROM item.
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        FromItem::Table(TableRef::aliased(name, alias))
    }
}

/// A JOIN item: its right-hand side and optional ON condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinItem {
    pub right: FromItem,
    pub on: Option<Expr>,
}

impl JoinItem {
    /// Creates a join item without condition (comma join or CROSS JOIN).
    pub fn cross(right: FromItem) -> Self {
        Self { right, on: None }
    }

    /// Creates an inner join item with an ON condition.
    pub fn on(right: FromItem, condition: Expr) -> Self {
        Self {
            right,
            on: Some(condition),
        }
    }
}

/// A SELECT list item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// Any expression. Only column references can be projected.
    Expr(Expr),
}

impl SelectItem {
    /// Creates a column select item.
    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Self {
        SelectItem::Expr(Expr::column(table, column))
    }
}

/// A single SELECT block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectStatement {
    pub distinct: bool,
    pub items: Vec<SelectItem>,
    pub from: FromItem,
    pub joins: Vec<JoinItem>,
    pub selection: Option<Expr>,
    pub order_by: Vec<ColumnRef>,
}

impl SelectStatement {
    /// Creates `SELECT * FROM <from>`.
    pub fn new(from: FromItem) -> Self {
        Self {
            distinct: false,
            items: vec![SelectItem::Wildcard],
            from,
            joins: Vec::new(),
            selection: None,
            order_by: Vec::new(),
        }
    }

    /// Sets the SELECT list.
    pub fn items(mut self, items: Vec<SelectItem>) -> Self {
        self.items = items;
        self
    }

    /// Appends a JOIN item.
    pub fn join(mut self, join: JoinItem) -> Self {
        self.joins.push(join);
        self
    }

    /// Sets the WHERE clause.
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.selection = Some(predicate);
        self
    }

    /// Sets the ORDER BY list.
    pub fn order_by(mut self, columns: Vec<ColumnRef>) -> Self {
        self.order_by = columns;
        self
    }

    /// Sets the DISTINCT flag.
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }
}

/// Set operators combining two queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// A query statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// A single SELECT block.
    Select(Box<SelectStatement>),
    /// Two queries combined by a set operator.
    SetOperation {
        op: SetOperator,
        left: Box<Statement>,
        right: Box<Statement>,
    },
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Statement::Select(Box::new(select))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_qualifier() {
        assert_eq!(TableRef::new("Sailors").qualifier(), "Sailors");
        assert_eq!(TableRef::aliased("Sailors", "S").qualifier(), "S");
    }

    #[test]
    fn test_select_builder() {
        let stmt = SelectStatement::new(FromItem::aliased("Sailors", "S"))
            .join(JoinItem::cross(FromItem::aliased("Reserves", "R")))
            .filter(Expr::eq(Expr::column("S", "A"), Expr::column("R", "G")))
            .order_by(vec![ColumnRef::new("S", "A")])
            .distinct(true);

        assert!(stmt.distinct);
        assert_eq!(stmt.items, vec![SelectItem::Wildcard]);
        assert_eq!(stmt.joins.len(), 1);
        assert!(stmt.selection.is_some());
        assert_eq!(stmt.order_by.len(), 1);
    }
}
