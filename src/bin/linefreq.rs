//! linefreq: count how often each distinct line occurs in the input.
//!
//! A driver for `ChainedTable` exercising the lookup-then-insert upsert
//! pattern: for every trimmed input line, a hit bumps the stored count in
//! place, a miss inserts a fresh record with count 1. At end of input the
//! whole table is dumped. Reads stdin and writes stdout unless file paths
//! are given.

use anyhow::{Context, Result};
use chained_table::ChainedTable;
use clap::Parser;
use std::borrow::Borrow;
use std::fs::File;
use std::hash::{BuildHasher, Hash, Hasher};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const SLOT_COUNT: usize = 64;

#[derive(Parser)]
#[command(name = "linefreq", about = "Count how often each input line occurs")]
struct Args {
    /// Input file; stdin when omitted.
    input: Option<PathBuf>,
    /// Output file; stdout when omitted.
    output: Option<PathBuf>,
}

/// One counted line. Hashing, equality, and the borrowed query form are all
/// keyed on `line` alone so that `count` can be updated through `get_mut`
/// without moving the record.
struct LineRecord {
    line: String,
    count: u64,
}

impl Hash for LineRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
    }
}

impl PartialEq for LineRecord {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
    }
}

impl Eq for LineRecord {}

impl Borrow<str> for LineRecord {
    fn borrow(&self) -> &str {
        &self.line
    }
}

/// Multiplicative string hash: the number of bytes written times the
/// wrapping product of their values, in 32-bit arithmetic. Deterministic,
/// so the dump order is stable from run to run.
struct ProductHasher {
    len: u32,
    product: u32,
}

impl Default for ProductHasher {
    fn default() -> Self {
        Self { len: 0, product: 1 }
    }
}

impl Hasher for ProductHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.product = self.product.wrapping_mul(u32::from(b));
        }
        self.len = self.len.wrapping_add(bytes.len() as u32);
    }

    fn finish(&self) -> u64 {
        u64::from(self.len.wrapping_mul(self.product))
    }
}

#[derive(Clone, Default)]
struct ProductState;

impl BuildHasher for ProductState {
    type Hasher = ProductHasher;
    fn build_hasher(&self) -> ProductHasher {
        ProductHasher::default()
    }
}

fn run(args: Args) -> Result<()> {
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Can't open '{}' for input", path.display())
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Can't open '{}' for output", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let mut table: ChainedTable<LineRecord, ProductState> =
        ChainedTable::with_slots_and_hasher(SLOT_COUNT, ProductState)?;

    for line in input.lines() {
        let line = line.context("reading input")?;
        match table.get_mut(line.as_str()) {
            Some(record) => {
                record.count += 1;
                writeln!(output, "Found old record '{}', count={}", record.line, record.count)?;
            }
            None => {
                writeln!(output, "Inserted new record '{line}'")?;
                table.insert(LineRecord { line, count: 1 })?;
            }
        }
    }

    for record in &table {
        writeln!(output, "Record: '{}', count={}", record.line, record.count)?;
    }
    output.flush().context("flushing output")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version print to stdout and succeed; anything
            // else is a usage error.
            if err.use_stderr() {
                eprint!("{err}");
                return ExitCode::FAILURE;
            }
            print!("{err}");
            return ExitCode::SUCCESS;
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("linefreq: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the hasher is deterministic and keyed on content.
    #[test]
    fn product_hash_is_deterministic() {
        let s = ProductState;
        assert_eq!(s.hash_one("hello"), s.hash_one("hello"));
        assert_ne!(s.hash_one("hello"), s.hash_one("world"));
    }

    /// Invariant: a record and its borrowed query hash identically, so the
    /// table routes both to the same slot.
    #[test]
    fn record_and_query_hash_agree() {
        let s = ProductState;
        let record = LineRecord {
            line: "some line".to_string(),
            count: 3,
        };
        assert_eq!(s.hash_one(&record), s.hash_one("some line"));
    }

    /// The upsert flow the driver runs, end to end against the table.
    #[test]
    fn counts_repeated_lines() {
        let mut table: ChainedTable<LineRecord, ProductState> =
            ChainedTable::with_slots_and_hasher(SLOT_COUNT, ProductState).unwrap();

        for line in ["a", "b", "a", "a", "c", "b"] {
            match table.get_mut(line) {
                Some(record) => record.count += 1,
                None => table
                    .insert(LineRecord {
                        line: line.to_string(),
                        count: 1,
                    })
                    .unwrap(),
            }
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("a").unwrap().count, 3);
        assert_eq!(table.get("b").unwrap().count, 2);
        assert_eq!(table.get("c").unwrap().count, 1);
    }
}
