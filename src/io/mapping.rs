/*!
# Mapping

Persistence for the raw↔dense bijection, the side file that bridges a
conversion run and a later analysis run.

One line per node in dense order, `raw dense`, optionally preceded by a
comment line. Loading is strict: every non-comment line must contain exactly
two parseable ids, dense ids must be positive, and the pair set must be a
bijection — the inverse step is only correct if the mapping is exact.
*/

use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use super::*;
use crate::{
    io::{invalid_line, parse_token},
    mapper::DenseMapper,
    node::{DenseNode, RawNode},
};

/// A writer for mapping files.
#[derive(Debug, Clone, Default)]
pub struct MappingWriter {
    /// Written as a `#`-prefixed first line if set
    comment: Option<String>,
}

impl MappingWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a comment line to be written before the mappings.
    pub fn comment<S: Into<String>>(mut self, comment: S) -> MappingWriter {
        self.comment = Some(comment.into());
        self
    }

    /// Writes the mapper's entries in dense order to a given writer.
    pub fn try_write<W: Write>(&self, mapper: &DenseMapper, mut writer: W) -> Result<()> {
        if let Some(comment) = &self.comment {
            writeln!(writer, "# {comment}")?;
        }

        for (raw, dense) in mapper.entries() {
            writeln!(writer, "{raw} {dense}")?;
        }

        Ok(())
    }

    /// Writes the mapper's entries to a file.
    pub fn try_write_file<P: AsRef<Path>>(&self, mapper: &DenseMapper, path: P) -> Result<()> {
        self.try_write(mapper, BufWriter::new(File::create(path)?))
    }
}

/// A reader for mapping files.
#[derive(Debug, Clone)]
pub struct MappingReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for MappingReader {
    fn default() -> Self {
        Self {
            comment_identifier: "#".to_string(),
        }
    }
}

impl MappingReader {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier.
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> MappingReader {
        self.comment_identifier = c.into();
        self
    }

    /// Reads a mapper back from a given reader.
    ///
    /// Fails on any malformed line and on duplicate raw or dense ids.
    pub fn try_read<R: BufRead>(&self, reader: R) -> Result<DenseMapper> {
        let mut pairs: Vec<(RawNode, DenseNode)> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(self.comment_identifier.as_str()) {
                continue;
            }
            let line_no = idx + 1;

            let mut tokens = line.split_ascii_whitespace();
            let raw: RawNode = parse_token!(tokens, line_no, "original id");
            let dense: DenseNode = parse_token!(tokens, line_no, "dense id");
            if tokens.next().is_some() {
                return Err(invalid_line!(line_no, "expected exactly two ids"));
            }
            if dense == 0 {
                return Err(invalid_line!(line_no, "dense id must be positive"));
            }

            pairs.push((raw, dense));
        }

        DenseMapper::from_pairs(pairs)
    }

    /// Reads a mapper back from a file.
    pub fn try_read_file<P: AsRef<Path>>(&self, path: P) -> Result<DenseMapper> {
        self.try_read(open_input(path)?)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::error::Error;

    fn roundtrip(mapper: &DenseMapper) -> DenseMapper {
        let mut buffer = Cursor::new(Vec::new());
        MappingWriter::new().try_write(mapper, &mut buffer).unwrap();
        MappingReader::new()
            .try_read(Cursor::new(buffer.into_inner()))
            .unwrap()
    }

    #[test]
    fn writes_dense_order() {
        let mapper = DenseMapper::from_nodes([42u64, 7, 1000]);

        let mut buffer = Cursor::new(Vec::new());
        MappingWriter::new().try_write(&mapper, &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer.into_inner()).unwrap(),
            "7 1\n42 2\n1000 3\n"
        );
    }

    #[test]
    fn comment_line_roundtrip() {
        let mapper = DenseMapper::from_nodes([5u64, 9]);

        let mut buffer = Cursor::new(Vec::new());
        MappingWriter::new()
            .comment("original dense")
            .try_write(&mapper, &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(text.starts_with("# original dense\n"));

        let back = MappingReader::new().try_read(Cursor::new(text)).unwrap();
        assert_eq!(back.entries().collect::<Vec<_>>(), vec![(5, 1), (9, 2)]);
    }

    #[test]
    fn roundtrip_preserves_the_bijection() {
        let mapper = DenseMapper::from_nodes([3u64, 5, 7, 100, 2]);
        let back = roundtrip(&mapper);

        assert_eq!(back.number_of_nodes(), mapper.number_of_nodes());
        assert_eq!(
            back.entries().collect::<Vec<_>>(),
            mapper.entries().collect::<Vec<_>>()
        );
    }

    #[test]
    fn malformed_line_is_fatal() {
        let err = MappingReader::new()
            .try_read(Cursor::new("7 1\nnope 2\n"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLine { line_no: 2, .. }));
    }

    #[test]
    fn missing_dense_id_is_fatal() {
        let err = MappingReader::new().try_read(Cursor::new("7\n")).unwrap_err();
        assert!(matches!(err, Error::InvalidLine { line_no: 1, .. }));
    }

    #[test]
    fn extra_tokens_are_fatal() {
        let err = MappingReader::new()
            .try_read(Cursor::new("7 1 9\n"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLine { line_no: 1, .. }));
    }

    #[test]
    fn zero_dense_id_is_fatal() {
        let err = MappingReader::new()
            .try_read(Cursor::new("7 0\n"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLine { line_no: 1, .. }));
    }

    #[test]
    fn duplicate_ids_are_fatal() {
        let err = MappingReader::new()
            .try_read(Cursor::new("7 1\n7 2\n"))
            .unwrap_err();
        assert!(matches!(err, Error::NotABijection { side: "original", .. }));

        let err = MappingReader::new()
            .try_read(Cursor::new("7 1\n9 1\n"))
            .unwrap_err();
        assert!(matches!(err, Error::NotABijection { side: "dense", .. }));
    }
}
