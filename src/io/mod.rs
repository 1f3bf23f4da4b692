/*!
# IO

Readers and writers for the three file formats surrounding a conversion run:

- **Metis**: the adjacency file consumed by the external partitioner
  ([`MetisWriter`] / [`MetisReader`]).
- **Mapping**: the `raw dense` side file that makes a conversion reversible
  ([`MappingWriter`] / [`MappingReader`]).
- **Partition**: the partitioner's output, one partition id per dense node
  ([`PartitionReader`]).

All three are structural formats: unlike edge-list ingestion, a malformed line
here is fatal. Each reader/writer offers a stream-based `try_read`/`try_write`
and a `_file` convenience wrapper.
*/

pub mod mapping;
pub mod metis;
pub mod partition;

use std::{
    fs::File,
    io::{BufReader, ErrorKind},
    path::Path,
};

use crate::error::{Error, Result};

pub use mapping::*;
pub use metis::*;
pub use partition::*;

/// Opens an input file, turning `NotFound` into the dedicated error that
/// batch processing reports per dataset.
pub(crate) fn open_input<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::MissingFile {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Shorthand for creating an [`Error::InvalidLine`]
macro_rules! invalid_line {
    ($line_no:expr, $($arg:tt)*) => {
        $crate::error::Error::InvalidLine {
            line_no: $line_no,
            what: format!($($arg)*),
        }
    };
}

/// Tries to parse the next token of a line and returns early if it fails
macro_rules! parse_token {
    ($iterator:expr, $line_no:expr, $name:expr) => {{
        let token = $iterator.next().ok_or_else(|| {
            invalid_line!($line_no, "premature end of line when parsing {}", $name)
        })?;
        token
            .parse()
            .map_err(|_| invalid_line!($line_no, "cannot parse {} from {:?}", $name, token))?
    }};
}

pub(crate) use invalid_line;
pub(crate) use parse_token;
