//! Plain-text game records: one move per line in `row,col->row,col/row,col`
//! notation, side A's moves on even lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::amazons_move::{AmazonsMove, MoveParseError};
use crate::board::side::Side;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("could not write record: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {error}")]
    Parse { line: usize, error: MoveParseError },
}

pub struct MoveRecorder<W: Write> {
    writer: W,
    recorded: usize,
}

impl MoveRecorder<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> MoveRecorder<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            recorded: 0,
        }
    }

    /// Appends a move and flushes so the record survives an abrupt exit.
    pub fn record(&mut self, amazons_move: &AmazonsMove) -> Result<(), RecordError> {
        writeln!(self.writer, "{}", amazons_move.to_notation())?;
        self.writer.flush()?;
        self.recorded += 1;
        Ok(())
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads a record back. Sides alternate starting from `first_side`; blank
/// lines are skipped.
pub fn read_record(contents: &str, first_side: Side) -> Result<Vec<AmazonsMove>, RecordError> {
    let mut side = first_side;
    let mut moves = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let amazons_move = AmazonsMove::parse(side, line).map_err(|error| RecordError::Parse {
            line: index + 1,
            error,
        })?;
        moves.push(amazons_move);
        side = side.opposite();
    }
    Ok(moves)
}
