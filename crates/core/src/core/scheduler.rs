//! The three-stage Tomasulo scheduler: issue, execute, write-back.

use std::io::{self, Write};

use crate::config::Config;
use crate::core::instruction::{InstrId, Instruction};
use crate::core::memory::Memory;
use crate::core::opcode::{Opcode, Operand, UnitCategory};
use crate::core::register::{RegId, RegisterFile};
use crate::core::rename::RenameMap;
use crate::core::trace;
use crate::core::unit::UnitPool;

/// Owns every piece of scheduler state and drives the per-cycle pipeline.
pub struct Scheduler {
    instructions: Vec<Instruction>,
    add_units: UnitPool,
    mul_units: UnitPool,
    sw_units: UnitPool,
    registers: RegisterFile,
    rename: RenameMap,
    memory: Memory,
    cycle: u64,
}

impl Scheduler {
    /// Builds a scheduler over `program`, resolved against `registers`
    /// (typically the [`RegisterFile`] the loader resolved operand names
    /// against), with unit pools and memory sized per `config`.
    pub fn new(program: Vec<Instruction>, registers: RegisterFile, config: &Config) -> Self {
        Self {
            instructions: program,
            add_units: UnitPool::new(UnitCategory::Add, config.add_units, config.add_latency),
            mul_units: UnitPool::new(UnitCategory::Mul, config.mul_units, config.mul_latency),
            sw_units: UnitPool::new(UnitCategory::Sw, config.sw_units, config.sw_latency),
            registers,
            rename: RenameMap::new(),
            memory: Memory::new(config.memory_size, config.memory_init),
            cycle: 0,
        }
    }

    /// Read-only access to the register file, for tests and trace callers.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Read-only access to memory, for tests.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// True once every instruction has completed.
    pub fn is_done(&self) -> bool {
        self.instructions.iter().all(|i| i.completed)
    }

    /// True when no functional unit, in any pool, is currently holding an
    /// instruction.
    pub fn all_units_free(&self) -> bool {
        [UnitCategory::Add, UnitCategory::Mul, UnitCategory::Sw]
            .into_iter()
            .all(|category| self.pool(category).units.iter().all(|u| !u.busy))
    }

    fn pool(&self, category: UnitCategory) -> &UnitPool {
        match category {
            UnitCategory::Add => &self.add_units,
            UnitCategory::Mul => &self.mul_units,
            UnitCategory::Sw => &self.sw_units,
        }
    }

    fn pool_mut(&mut self, category: UnitCategory) -> &mut UnitPool {
        match category {
            UnitCategory::Add => &mut self.add_units,
            UnitCategory::Mul => &mut self.mul_units,
            UnitCategory::Sw => &mut self.sw_units,
        }
    }

    /// Advances exactly one cycle (issue, execute, write-back), without
    /// emitting a trace. No-op once [`Scheduler::is_done`].
    pub fn step(&mut self) {
        if self.is_done() {
            return;
        }
        self.cycle += 1;
        self.issue();
        self.execute();
        self.write_back();
    }

    /// The current cycle number.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Invariant 2 from the testable-properties list: every register with a
    /// busy bit set must carry a producer referencing a not-yet-completed
    /// instruction.
    pub fn busy_registers_reference_live_producers(&self) -> bool {
        self.registers.iter().all(|r| {
            if !r.is_busy() {
                return true;
            }
            match r.producer {
                Some(id) => !self.instructions[id.0].completed,
                None => false,
            }
        })
    }

    /// Advances the clock until every instruction has completed, emitting a
    /// trace block to `sink` after every cycle. Returns the total number of
    /// cycles elapsed.
    pub fn run(&mut self, sink: &mut impl Write) -> io::Result<u64> {
        if self.instructions.is_empty() {
            self.cycle = 1;
            self.emit_trace(sink)?;
            trace::write_completion(sink, self.cycle)?;
            return Ok(self.cycle);
        }

        while !self.is_done() {
            self.step();
            self.emit_trace(sink)?;
        }
        trace::write_completion(sink, self.cycle)?;
        Ok(self.cycle)
    }

    /// Issue stage: see module docs and the component-design writeup this
    /// crate's design notes are grounded on.
    fn issue(&mut self) {
        let prefix = (self.cycle as usize).min(self.instructions.len());

        for i in 0..prefix {
            if self.instructions[i].completed || self.instructions[i].executing {
                continue;
            }

            if !self.instructions[i].issued {
                self.instructions[i].issued = true;
                continue;
            }

            let category = self.instructions[i].opcode.category();
            let Some(unit_idx) = self.pool(category).find_free() else {
                continue;
            };

            if !self.resolve_destination(i) {
                continue;
            }

            let dest = self.instructions[i].dest;
            let src1_blocked = match self.instructions[i].src1 {
                Operand::Reg(r) => self.registers.get(r).write_busy,
                Operand::Imm(_) => false,
            };
            let src2 = self.instructions[i].src2;
            let src2_blocked = self.registers.get(src2).write_busy;
            if src1_blocked || src2_blocked {
                continue;
            }

            self.commit_issue(i, category, unit_idx, dest, src2);
        }
    }

    /// Step 4 of issue: renames the destination if it is currently busy.
    /// Returns `false` if a rename was needed but no rename-pool slot is
    /// free (the instruction stalls this cycle).
    fn resolve_destination(&mut self, i: usize) -> bool {
        let dest = self.instructions[i].dest;
        if !self.registers.get(dest).is_busy() {
            return true;
        }

        let Some(new_id) = self.registers.find_free_rename_slot() else {
            return false;
        };

        let origin = self.rename.resolve(dest).unwrap_or(dest);
        self.rename.insert(new_id, origin);

        for instr in &mut self.instructions[i..] {
            if instr.dest == dest {
                instr.dest = new_id;
            }
            if instr.src1 == Operand::Reg(dest) {
                instr.src1 = Operand::Reg(new_id);
            }
            if instr.src2 == dest {
                instr.src2 = new_id;
            }
        }
        true
    }

    /// Step 5 of issue: claims the unit and sets every scoreboard bit.
    fn commit_issue(&mut self, i: usize, category: UnitCategory, unit_idx: usize, dest: RegId, src2: RegId) {
        let instr_id = InstrId(i);
        let latency = self.pool(category).units[unit_idx].latency;
        self.pool_mut(category).occupy(unit_idx, instr_id);

        let instr = &mut self.instructions[i];
        instr.executing = true;
        instr.remaining = latency;
        let src1 = instr.src1;

        let d = self.registers.get_mut(dest);
        d.write_busy = true;
        d.producer = Some(instr_id);

        let s2 = self.registers.get_mut(src2);
        s2.read_busy = true;
        s2.producer = Some(instr_id);

        if let Operand::Reg(r1) = src1 {
            let s1 = self.registers.get_mut(r1);
            s1.read_busy = true;
            s1.producer = Some(instr_id);
        }
    }

    /// Execute stage: ticks every busy unit's countdown in fixed pool order.
    fn execute(&mut self) {
        for category in [UnitCategory::Add, UnitCategory::Mul, UnitCategory::Sw] {
            let len = self.pool(category).units.len();
            for unit_idx in 0..len {
                let Some(instr_id) = self.pool(category).units[unit_idx].current else {
                    continue;
                };
                let instr = &mut self.instructions[instr_id.0];
                if !instr.executing {
                    continue;
                }
                instr.remaining -= 1;
                if instr.remaining == 0 {
                    instr.executing = false;
                }
            }
        }
    }

    /// Write-back stage: retires any unit whose instruction finished
    /// executing this cycle, in fixed pool order.
    fn write_back(&mut self) {
        for category in [UnitCategory::Add, UnitCategory::Mul, UnitCategory::Sw] {
            let len = self.pool(category).units.len();
            for unit_idx in 0..len {
                self.write_back_unit(category, unit_idx);
            }
        }
    }

    fn write_back_unit(&mut self, category: UnitCategory, unit_idx: usize) {
        let Some(instr_id) = self.pool(category).units[unit_idx].current else {
            return;
        };
        let i = instr_id.0;
        if self.instructions[i].executing || self.instructions[i].completed {
            return;
        }

        self.instructions[i].completed = true;
        self.pool_mut(category).release(unit_idx);

        let opcode = self.instructions[i].opcode;
        let dest = self.instructions[i].dest;
        let src1 = self.instructions[i].src1;
        let src2 = self.instructions[i].src2;

        if opcode.is_memory() {
            let Operand::Imm(literal) = src1 else {
                unreachable!("lw/sw source-1 is always an immediate")
            };
            let base = self.registers.get(src2).value;
            let address = literal.wrapping_add(base);
            match opcode {
                Opcode::Sw => {
                    let value = self.registers.get(dest).value;
                    self.memory.store(address, value);
                }
                Opcode::Lw => {
                    let value = self.memory.load(address);
                    self.registers.get_mut(dest).value = value;
                }
                _ => unreachable!("memory category only holds lw/sw"),
            }
        } else {
            let Operand::Reg(src1_reg) = src1 else {
                unreachable!("alu source-1 is always a register")
            };
            let v1 = self.registers.get(src1_reg).value;
            let v2 = self.registers.get(src2).value;
            self.registers.get_mut(dest).value = apply(opcode, v1, v2);
        }

        let d = self.registers.get_mut(dest);
        d.write_busy = false;
        d.producer = None;

        let s2 = self.registers.get_mut(src2);
        s2.read_busy = false;
        s2.producer = None;

        if let Operand::Reg(r1) = src1 {
            let s1 = self.registers.get_mut(r1);
            s1.read_busy = false;
            s1.producer = None;
        }

        if let Some(origin) = self.rename.take(dest) {
            for instr in &mut self.instructions {
                if instr.dest == dest {
                    instr.dest = origin;
                }
                if instr.src1 == Operand::Reg(dest) {
                    instr.src1 = Operand::Reg(origin);
                }
                if instr.src2 == dest {
                    instr.src2 = origin;
                }
            }
        }
    }

    fn emit_trace(&self, sink: &mut impl Write) -> io::Result<()> {
        let issued: Vec<String> = self
            .instructions
            .iter()
            .filter(|i| i.issued)
            .map(|i| trace::format_instruction(&self.registers, i))
            .collect();
        let executing: Vec<String> = self
            .instructions
            .iter()
            .filter(|i| i.executing)
            .map(|i| trace::format_instruction(&self.registers, i))
            .collect();
        let completed: Vec<String> = self
            .instructions
            .iter()
            .filter(|i| i.completed)
            .map(|i| trace::format_instruction(&self.registers, i))
            .collect();

        trace::write_cycle(sink, self.cycle, &issued, &executing, &completed, &self.registers)
    }
}

/// Applies an ALU opcode over two values, host-wrapping on overflow and
/// treating division by zero as yielding `0` rather than panicking.
fn apply(opcode: Opcode, a: i64, b: i64) -> i64 {
    match opcode {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Div => a.checked_div(b).unwrap_or(0),
        Opcode::Lw | Opcode::Sw => unreachable!("memory opcodes never reach apply"),
    }
}
