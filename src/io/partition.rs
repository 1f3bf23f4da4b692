//! # Partition Assignments
//!
//! Reader for the external partitioner's output: exactly one partition id per
//! line, line `i` holding the assignment of dense node `i`. This is a
//! structural input, so every line must parse; blank lines are rejected.

use std::{io::BufRead, path::Path};

use super::*;
use crate::{
    io::{invalid_line, parse_token},
    node::PartitionId,
};

/// A reader for partition-assignment files.
#[derive(Debug, Clone, Default)]
pub struct PartitionReader;

impl PartitionReader {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }

    /// Reads the assignment in dense order from a given reader.
    pub fn try_read<R: BufRead>(&self, reader: R) -> Result<Vec<PartitionId>> {
        let mut assignment = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            let mut tokens = line.split_ascii_whitespace();
            let partition: PartitionId = parse_token!(tokens, line_no, "partition id");
            if tokens.next().is_some() {
                return Err(invalid_line!(line_no, "expected exactly one partition id"));
            }

            assignment.push(partition);
        }

        Ok(assignment)
    }

    /// Reads the assignment from a file.
    pub fn try_read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PartitionId>> {
        self.try_read(open_input(path)?)
    }
}
