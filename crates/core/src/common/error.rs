//! Error types for the scheduler's boundary operations.
//!
//! The scheduler itself is total over well-formed input (see
//! [`crate::core::scheduler::Scheduler::run`]): once a program has loaded and
//! `run` starts, nothing in the issue/execute/write-back loop can fail. The
//! only fallible operations in this crate are parsing an instruction file and
//! opening the files the CLI is handed, both of which happen before `run` is
//! ever called.

use std::io;

/// Errors that can occur while loading a program or opening I/O for it.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// An instruction file or trace file could not be opened, read, or
    /// written to.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line of the instruction file did not parse as `op dest src1 src2`
    /// with a recognized opcode and well-formed operands.
    #[error("line {line}: malformed instruction {text:?}")]
    Parse {
        /// 1-based line number in the instruction file.
        line: usize,
        /// The raw line text, for diagnostics.
        text: String,
    },
}
