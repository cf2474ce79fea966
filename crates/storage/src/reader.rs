//! Line-oriented relation reader.

use sluice_core::{Error, Result, Tuple};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Reads a relation file one tuple per line.
///
/// Every error carries the file path; decoding errors also carry the 1-based
/// line number.
pub struct TupleReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    /// Expected field count, checked on every line when set.
    arity: Option<usize>,
}

impl TupleReader {
    /// Opens a relation file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::open(&path).map_err(|e| Error::io(path.display().to_string(), e.to_string()))?;
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
            arity: None,
        })
    }

    /// Requires every tuple to have exactly `arity` fields.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads and decodes the next line, or returns `None` at end of file.
    pub fn next_tuple(&mut self) -> Result<Option<Tuple>> {
        let Some(line) = self.lines.next() else {
            return Ok(None);
        };
        self.line_no += 1;
        let line = line.map_err(|e| Error::io(self.path.display().to_string(), e.to_string()))?;

        let tuple: Tuple = line.parse().map_err(|err| match err {
            Error::MalformedTuple { message, .. } => self.malformed(message),
            other => other,
        })?;

        if let Some(arity) = self.arity {
            if tuple.len() != arity {
                return Err(self.malformed(format!("expected {} fields, got {}", arity, tuple.len())));
            }
        }
        Ok(Some(tuple))
    }

    fn malformed(&self, message: String) -> Error {
        Error::malformed_tuple(self.path.display().to_string(), self.line_no, message)
    }
}

impl Iterator for TupleReader {
    type Item = Result<Tuple>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tuple().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reader_reads_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Sailors", "1,200,50\n2,200,200\n3,100,105\n");

        let tuples: Vec<Tuple> = TupleReader::open(&path)
            .unwrap()
            .with_arity(3)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(tuples.len(), 3);
        assert_eq!(tuples[0], Tuple::new(vec![1, 200, 50]));
        assert_eq!(tuples[2], Tuple::new(vec![3, 100, 105]));
    }

    #[test]
    fn test_reader_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "T", "1,2\r\n3,4");

        let tuples: Vec<Tuple> = TupleReader::open(&path).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(tuples, vec![Tuple::new(vec![1, 2]), Tuple::new(vec![3, 4])]);
    }

    #[test]
    fn test_reader_reports_line_of_bad_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "T", "1,2\n3,four\n");

        let mut reader = TupleReader::open(&path).unwrap();
        assert!(reader.next_tuple().unwrap().is_some());
        match reader.next_tuple() {
            Err(Error::MalformedTuple { path: p, line, .. }) => {
                assert_eq!(line, 2);
                assert!(p.ends_with("T"));
            }
            other => panic!("expected MalformedTuple, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_checks_arity() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "T", "1,2,3\n1,2\n");

        let mut reader = TupleReader::open(&path).unwrap().with_arity(3);
        assert!(reader.next_tuple().is_ok());
        assert!(matches!(reader.next_tuple(), Err(Error::MalformedTuple { line: 2, .. })));
    }

    #[test]
    fn test_reader_blank_line_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "T", "1,2\n\n3,4\n");

        let result: Result<Vec<Tuple>> = TupleReader::open(&path).unwrap().collect();
        assert!(matches!(result, Err(Error::MalformedTuple { line: 2, .. })));
    }

    #[test]
    fn test_reader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TupleReader::open(dir.path().join("missing"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
