//! Instruction-file loading.
//!
//! Parses the one-instruction-per-line text format (`op dest src1 src2`)
//! into decoded [`Instruction`] records, registering any new register name
//! it encounters in a [`RegisterFile`] built up as the file is read.

use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use crate::common::error::SchedulerError;
use crate::core::instruction::Instruction;
use crate::core::opcode::{Opcode, Operand};
use crate::core::register::RegisterFile;

/// A loaded program: the decoded instructions plus the register file their
/// operands were resolved against.
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub registers: RegisterFile,
}

/// Reads and parses an instruction file from `reader`, resolving register
/// operands against a fresh register file sized per `arch_registers`/
/// `register_init`.
///
/// Every line must be exactly four whitespace-separated tokens: an opcode
/// and three operands. Blank lines and comments are not part of the
/// grammar and are rejected with a line-numbered [`SchedulerError::Parse`].
pub fn load_program(
    reader: impl Read,
    arch_registers: usize,
    register_init: i64,
) -> Result<Program, SchedulerError> {
    let registers = RegisterFile::new(arch_registers, register_init);
    let mut instructions = Vec::new();

    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(malformed(line_no, &line));
        }

        let opcode = Opcode::from_str(tokens[0]).map_err(|()| malformed(line_no, &line))?;
        let dest = registers
            .find(tokens[1])
            .ok_or_else(|| malformed(line_no, &line))?;

        let src1 = if opcode.is_memory() {
            let literal: i64 = tokens[2]
                .parse()
                .map_err(|_| malformed(line_no, &line))?;
            Operand::Imm(literal)
        } else {
            let reg = registers
                .find(tokens[2])
                .ok_or_else(|| malformed(line_no, &line))?;
            Operand::Reg(reg)
        };

        let src2 = registers
            .find(tokens[3])
            .ok_or_else(|| malformed(line_no, &line))?;

        instructions.push(Instruction::new(opcode, dest, src1, src2));
    }

    Ok(Program {
        instructions,
        registers,
    })
}

fn malformed(line: usize, text: &str) -> SchedulerError {
    SchedulerError::Parse {
        line,
        text: text.to_string(),
    }
}
