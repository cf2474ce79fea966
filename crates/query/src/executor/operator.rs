//! Operator trait for query execution.

use sluice_core::schema::Schema;
use sluice_core::{Error, Result, Tuple};
use std::io;

/// A pull-based physical operator.
///
/// Every operator fixes its output schema at construction and owns its
/// children. Tuples are produced one at a time on demand; `reset` rewinds
/// the operator so the next drain yields the same tuples again.
pub trait Operator {
    /// Returns the output schema.
    fn schema(&self) -> &Schema;

    /// Returns the next tuple, or `None` once the operator is exhausted.
    fn next(&mut self) -> Result<Option<Tuple>>;

    /// Rewinds the operator to its initial state.
    fn reset(&mut self) -> Result<()>;

    /// One-line description used by [`explain`].
    fn label(&self) -> String;

    /// Child operators, left to right.
    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }

    /// Drains the operator into `sink`, one tuple per line in storage
    /// format. Returns the number of tuples written.
    fn dump(&mut self, sink: &mut dyn io::Write) -> Result<usize> {
        let mut count = 0;
        while let Some(tuple) = self.next()? {
            writeln!(sink, "{}", tuple).map_err(|e| Error::io("<output>", e.to_string()))?;
            count += 1;
        }
        sink.flush().map_err(|e| Error::io("<output>", e.to_string()))?;
        Ok(count)
    }

    /// Drains the operator into a vector.
    fn collect_tuples(&mut self) -> Result<Vec<Tuple>> {
        let mut tuples = Vec::new();
        while let Some(tuple) = self.next()? {
            tuples.push(tuple);
        }
        Ok(tuples)
    }
}

impl<O: Operator + ?Sized> Operator for Box<O> {
    fn schema(&self) -> &Schema {
        (**self).schema()
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        (**self).next()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn label(&self) -> String {
        (**self).label()
    }

    fn children(&self) -> Vec<&dyn Operator> {
        (**self).children()
    }
}

/// Renders an operator tree, one node per line, children indented below
/// their parent.
pub fn explain(root: &dyn Operator) -> String {
    let mut out = String::new();
    explain_node(root, 0, &mut out);
    out
}

fn explain_node(node: &dyn Operator, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&node.label());
    out.push('\n');
    for child in node.children() {
        explain_node(child, depth + 1, out);
    }
}
