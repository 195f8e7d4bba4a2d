//! Per-cycle and completion trace formatting.
//!
//! Kept as free functions over borrowed scheduler state rather than methods,
//! so the formatting can be unit-tested against a bare `RegisterFile`
//! without constructing a whole [`crate::core::scheduler::Scheduler`].

use std::io::{self, Write};

use crate::core::instruction::{InstrId, Instruction};
use crate::core::opcode::Operand;
use crate::core::register::RegisterFile;

/// Renders one instruction as `op dest src1 src2`, resolving register
/// indices back to their names and printing `lw`/`sw` literals as plain
/// integers.
pub fn format_instruction(registers: &RegisterFile, instr: &Instruction) -> String {
    let dest = registers.get(instr.dest).name.clone();
    let src1 = match instr.src1 {
        Operand::Reg(r) => registers.get(r).name.clone(),
        Operand::Imm(v) => v.to_string(),
    };
    let src2 = registers.get(instr.src2).name.clone();
    format!("{} {} {} {}", instr.opcode, dest, src1, src2)
}

fn producer_label(producer: Option<InstrId>) -> String {
    match producer {
        Some(id) => format!("instr #{}", id.0),
        None => "-".to_string(),
    }
}

/// Writes the full per-cycle block: cycle number, the issued/executing/
/// completed instruction lists, and the register table.
pub fn write_cycle(
    sink: &mut impl Write,
    cycle: u64,
    issued: &[String],
    executing: &[String],
    completed: &[String],
    registers: &RegisterFile,
) -> io::Result<()> {
    writeln!(sink, "== cycle {cycle} ==")?;
    write_named_list(sink, "issued", issued)?;
    write_named_list(sink, "executing", executing)?;
    write_named_list(sink, "completed", completed)?;
    writeln!(sink, "registers:")?;
    for reg in registers.iter() {
        writeln!(
            sink,
            "  {:<4} value={:<8} read_busy={:<5} write_busy={:<5} producer={}",
            reg.name,
            reg.value,
            reg.read_busy,
            reg.write_busy,
            producer_label(reg.producer),
        )?;
    }
    Ok(())
}

fn write_named_list(sink: &mut impl Write, label: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        writeln!(sink, "{label}: none")
    } else {
        writeln!(sink, "{label}: {}", items.join(", "))
    }
}

/// Writes the final line once `run` finishes, naming the total cycle count.
pub fn write_completion(sink: &mut impl Write, total_cycles: u64) -> io::Result<()> {
    writeln!(sink, "run complete after {total_cycles} cycles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instruction::Instruction;
    use crate::core::opcode::Opcode;
    use crate::core::register::RegId;

    #[test]
    fn formats_alu_instruction_by_name() {
        let registers = RegisterFile::new(4, 1);
        let instr = Instruction::new(
            Opcode::Add,
            registers.find("F0").unwrap(),
            Operand::Reg(registers.find("F1").unwrap()),
            registers.find("F2").unwrap(),
        );
        assert_eq!(format_instruction(&registers, &instr), "add F0 F1 F2");
    }

    #[test]
    fn formats_memory_instruction_with_literal() {
        let registers = RegisterFile::new(4, 1);
        let instr = Instruction::new(
            Opcode::Sw,
            registers.find("F0").unwrap(),
            Operand::Imm(4),
            registers.find("F1").unwrap(),
        );
        assert_eq!(format_instruction(&registers, &instr), "sw F0 4 F1");
    }

    #[test]
    fn empty_lists_print_none() {
        let registers = RegisterFile::new(1, 0);
        let mut buf = Vec::new();
        write_cycle(&mut buf, 1, &[], &[], &[], &registers).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("issued: none"));
        assert!(text.contains("executing: none"));
        assert!(text.contains("completed: none"));
    }

    #[test]
    fn producer_label_formats_index() {
        assert_eq!(producer_label(Some(InstrId(3))), "instr #3");
        assert_eq!(producer_label(None), "-");
    }
}
