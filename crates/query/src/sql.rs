//! SQL front-end.
//!
//! Parses SQL text with `sqlparser` and lowers the result into the closed
//! [`crate::ast`] types. Anything the engine cannot run is rejected here
//! with `Error::Unsupported`, except set operations and derived tables,
//! which are lowered so the plan builder can report them.

use crate::ast::{
    BinaryOp, ColumnRef, Expr, FromItem, JoinItem, SelectItem, SelectStatement, SetOperator, Statement,
    TableRef,
};
use sluice_core::{Error, Result};
use sqlparser::ast as sql;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Parses a single SQL query.
pub fn parse(text: &str) -> Result<Statement> {
    let mut statements = Parser::parse_sql(&GenericDialect {}, text).map_err(|e| Error::parse(e.to_string()))?;
    if statements.len() != 1 {
        return Err(Error::parse(format!(
            "expected exactly one statement, found {}",
            statements.len()
        )));
    }
    match statements.remove(0) {
        sql::Statement::Query(query) => lower_query(&query),
        other => Err(Error::unsupported(format!("statement: {}", first_word(&other.to_string())))),
    }
}

fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or(text)
}

fn lower_query(query: &sql::Query) -> Result<Statement> {
    if query.with.is_some() {
        return Err(Error::unsupported("WITH"));
    }
    if query.limit.is_some() {
        return Err(Error::unsupported("LIMIT"));
    }
    if query.offset.is_some() {
        return Err(Error::unsupported("OFFSET"));
    }
    if query.fetch.is_some() {
        return Err(Error::unsupported("FETCH"));
    }
    if !query.locks.is_empty() {
        return Err(Error::unsupported("locking clause"));
    }

    let mut statement = lower_set_expr(&query.body)?;
    if !query.order_by.is_empty() {
        let Statement::Select(select) = &mut statement else {
            return Err(Error::unsupported("ORDER BY on a set operation"));
        };
        select.order_by = query
            .order_by
            .iter()
            .map(lower_order_by)
            .collect::<Result<_>>()?;
    }
    Ok(statement)
}

fn lower_set_expr(body: &sql::SetExpr) -> Result<Statement> {
    match body {
        sql::SetExpr::Select(select) => Ok(Statement::from(lower_select(select)?)),
        sql::SetExpr::Query(query) => lower_query(query),
        sql::SetExpr::SetOperation { op, left, right, .. } => {
            let op = match op {
                sql::SetOperator::Union => SetOperator::Union,
                sql::SetOperator::Intersect => SetOperator::Intersect,
                sql::SetOperator::Except => SetOperator::Except,
            };
            Ok(Statement::SetOperation {
                op,
                left: Box::new(lower_set_expr(left)?),
                right: Box::new(lower_set_expr(right)?),
            })
        }
        sql::SetExpr::Values(_) => Err(Error::unsupported("VALUES")),
        other => Err(Error::unsupported(format!("query body: {}", other))),
    }
}

fn lower_select(select: &sql::Select) -> Result<SelectStatement> {
    let distinct = match &select.distinct {
        None => false,
        Some(sql::Distinct::Distinct) => true,
        Some(sql::Distinct::On(_)) => return Err(Error::unsupported("DISTINCT ON")),
    };
    if select.top.is_some() {
        return Err(Error::unsupported("TOP"));
    }
    if select.into.is_some() {
        return Err(Error::unsupported("SELECT INTO"));
    }
    match &select.group_by {
        sql::GroupByExpr::Expressions(exprs) if exprs.is_empty() => {}
        _ => return Err(Error::unsupported("GROUP BY")),
    }
    if select.having.is_some() {
        return Err(Error::unsupported("HAVING"));
    }

    let mut from_items = Vec::new();
    for table in &select.from {
        from_items.push(JoinItem::cross(lower_table_factor(&table.relation)?));
        for join in &table.joins {
            from_items.push(lower_join(join)?);
        }
    }
    if from_items.is_empty() {
        return Err(Error::unsupported("SELECT without FROM"));
    }
    let first = from_items.remove(0);

    let items = select
        .projection
        .iter()
        .map(lower_select_item)
        .collect::<Result<Vec<_>>>()?;

    let mut statement = SelectStatement::new(first.right).items(items).distinct(distinct);
    for join in from_items {
        statement = statement.join(join);
    }
    if let Some(selection) = &select.selection {
        statement = statement.filter(lower_expr(selection)?);
    }
    Ok(statement)
}

fn lower_table_factor(factor: &sql::TableFactor) -> Result<FromItem> {
    match factor {
        sql::TableFactor::Table { name, alias, args, .. } => {
            if args.is_some() {
                return Err(Error::unsupported("table-valued function"));
            }
            let name = object_name(name)?;
            let table = match alias {
                Some(alias) => {
                    if !alias.columns.is_empty() {
                        return Err(Error::unsupported("column aliases in FROM"));
                    }
                    TableRef::aliased(name, alias.name.value.clone())
                }
                None => TableRef::new(name),
            };
            Ok(FromItem::Table(table))
        }
        sql::TableFactor::Derived { subquery, alias, .. } => Ok(FromItem::Subquery {
            query: Box::new(lower_query(subquery)?),
            alias: alias.as_ref().map(|a| a.name.value.clone()),
        }),
        other => Err(Error::unsupported(format!("FROM item: {}", other))),
    }
}

fn lower_join(join: &sql::Join) -> Result<JoinItem> {
    let right = lower_table_factor(&join.relation)?;
    match &join.join_operator {
        sql::JoinOperator::CrossJoin => Ok(JoinItem::cross(right)),
        sql::JoinOperator::Inner(constraint) => match constraint {
            sql::JoinConstraint::On(expr) => Ok(JoinItem::on(right, lower_expr(expr)?)),
            sql::JoinConstraint::None => Ok(JoinItem::cross(right)),
            sql::JoinConstraint::Using(_) => Err(Error::unsupported("JOIN ... USING")),
            sql::JoinConstraint::Natural => Err(Error::unsupported("NATURAL JOIN")),
        },
        sql::JoinOperator::LeftOuter(_) | sql::JoinOperator::RightOuter(_) | sql::JoinOperator::FullOuter(_) => {
            Err(Error::unsupported("outer join"))
        }
        _ => Err(Error::unsupported("join type")),
    }
}

fn object_name(name: &sql::ObjectName) -> Result<String> {
    match name.0.as_slice() {
        [ident] => Ok(ident.value.clone()),
        _ => Err(Error::unsupported(format!("qualified table name {}", name))),
    }
}

fn lower_select_item(item: &sql::SelectItem) -> Result<SelectItem> {
    match item {
        sql::SelectItem::Wildcard(_) => Ok(SelectItem::Wildcard),
        sql::SelectItem::UnnamedExpr(expr) => Ok(SelectItem::Expr(lower_expr(expr)?)),
        sql::SelectItem::ExprWithAlias { .. } => Err(Error::unsupported("column alias in SELECT list")),
        sql::SelectItem::QualifiedWildcard(name, _) => {
            Err(Error::unsupported(format!("qualified wildcard {}.*", name)))
        }
    }
}

fn lower_order_by(item: &sql::OrderByExpr) -> Result<ColumnRef> {
    if item.asc == Some(false) {
        return Err(Error::unsupported("ORDER BY ... DESC"));
    }
    if item.nulls_first.is_some() {
        return Err(Error::unsupported("NULLS FIRST/LAST"));
    }
    match lower_expr(&item.expr)? {
        Expr::Column(col) => Ok(col),
        other => Err(Error::unsupported(format!("ORDER BY expression {}", other))),
    }
}

fn lower_expr(expr: &sql::Expr) -> Result<Expr> {
    match expr {
        sql::Expr::Identifier(ident) => Ok(Expr::Column(ColumnRef::bare(ident.value.clone()))),
        sql::Expr::CompoundIdentifier(idents) => match idents.as_slice() {
            [table, column] => Ok(Expr::column(table.value.clone(), column.value.clone())),
            _ => Err(Error::unsupported(format!("column reference {}", expr))),
        },
        sql::Expr::Value(value) => lower_literal(value, false),
        sql::Expr::Nested(inner) => Ok(Expr::nested(lower_expr(inner)?)),
        sql::Expr::UnaryOp { op, expr: inner } => match (op, inner.as_ref()) {
            (sql::UnaryOperator::Minus, sql::Expr::Value(value)) => lower_literal(value, true),
            (sql::UnaryOperator::Minus, _) => Ok(Expr::sub(Expr::literal(0), lower_expr(inner)?)),
            (sql::UnaryOperator::Plus, _) => lower_expr(inner),
            (sql::UnaryOperator::Not, _) => Err(Error::unsupported("NOT")),
            _ => Err(Error::unsupported(format!("unary operator {}", op))),
        },
        sql::Expr::BinaryOp { left, op, right } => {
            let op = match op {
                sql::BinaryOperator::Plus => BinaryOp::Add,
                sql::BinaryOperator::Minus => BinaryOp::Sub,
                sql::BinaryOperator::Multiply => BinaryOp::Mul,
                sql::BinaryOperator::Divide => BinaryOp::Div,
                sql::BinaryOperator::Eq => BinaryOp::Eq,
                sql::BinaryOperator::NotEq => BinaryOp::Ne,
                sql::BinaryOperator::Lt => BinaryOp::Lt,
                sql::BinaryOperator::LtEq => BinaryOp::Le,
                sql::BinaryOperator::Gt => BinaryOp::Gt,
                sql::BinaryOperator::GtEq => BinaryOp::Ge,
                sql::BinaryOperator::And => BinaryOp::And,
                sql::BinaryOperator::Or => return Err(Error::unsupported("OR")),
                other => return Err(Error::unsupported(format!("operator {}", other))),
            };
            Ok(Expr::binary(lower_expr(left)?, op, lower_expr(right)?))
        }
        sql::Expr::Function(func) => Err(Error::unsupported(format!("function {}", func.name))),
        sql::Expr::Subquery(_) | sql::Expr::Exists { .. } | sql::Expr::InSubquery { .. } => {
            Err(Error::unsupported("subquery in expression"))
        }
        other => Err(Error::unsupported(format!("expression {}", other))),
    }
}

fn lower_literal(value: &sql::Value, negate: bool) -> Result<Expr> {
    match value {
        sql::Value::Number(text, _) => {
            let text = if negate { format!("-{}", text) } else { text.clone() };
            text.parse::<i64>()
                .map(Expr::literal)
                .map_err(|_| Error::unsupported(format!("non-integer literal {}", text)))
        }
        other => Err(Error::unsupported(format!("literal {}", other))),
    }
}
