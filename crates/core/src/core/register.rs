//! The unified register file: architectural half plus rename-pool half.
//!
//! Registers are held in one owning `Vec` on the [`RegisterFile`], looked up
//! by name through a map built once at construction (`HashMap<String,
//! RegId>`), rather than the reference's linear scan on every access.

use std::collections::HashMap;

use crate::core::instruction::InstrId;

/// Stable index into [`RegisterFile`]'s register vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegId(pub usize);

/// One architectural or rename-pool register.
#[derive(Debug, Clone)]
pub struct Register {
    pub name: String,
    pub value: i64,
    pub read_busy: bool,
    pub write_busy: bool,
    /// The instruction currently holding this register, if any. Weak: this
    /// never implies ownership, only association — see module docs.
    pub producer: Option<InstrId>,
}

impl Register {
    fn new(name: String, value: i64) -> Self {
        Self {
            name,
            value,
            read_busy: false,
            write_busy: false,
            producer: None,
        }
    }

    /// True if either busy bit is set.
    pub fn is_busy(&self) -> bool {
        self.read_busy || self.write_busy
    }
}

/// Owns every register and the name→index map used to look them up.
///
/// The first `arch_count` entries are the architectural registers
/// `F0..F{arch_count-1}`; the next `arch_count` entries are the rename pool
/// `R0..R{arch_count-1}`. `rename_pool_start` is the index of `R0`.
pub struct RegisterFile {
    registers: Vec<Register>,
    by_name: HashMap<String, RegId>,
    rename_pool_start: usize,
}

impl RegisterFile {
    /// Builds a register file with `arch_count` architectural registers and
    /// an equal-sized rename pool, every entry initialized to `init_value`.
    pub fn new(arch_count: usize, init_value: i64) -> Self {
        let mut registers = Vec::with_capacity(arch_count * 2);
        let mut by_name = HashMap::with_capacity(arch_count * 2);

        for i in 0..arch_count {
            let name = format!("F{i}");
            by_name.insert(name.clone(), RegId(registers.len()));
            registers.push(Register::new(name, init_value));
        }
        let rename_pool_start = registers.len();
        for i in 0..arch_count {
            let name = format!("R{i}");
            by_name.insert(name.clone(), RegId(registers.len()));
            registers.push(Register::new(name, init_value));
        }

        Self {
            registers,
            by_name,
            rename_pool_start,
        }
    }

    /// Looks up a register by its architectural or rename-pool name.
    pub fn find(&self, name: &str) -> Option<RegId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: RegId) -> &Register {
        &self.registers[id.0]
    }

    pub fn get_mut(&mut self, id: RegId) -> &mut Register {
        &mut self.registers[id.0]
    }

    /// All registers, in storage order (architectural half first).
    pub fn iter(&self) -> impl Iterator<Item = &Register> {
        self.registers.iter()
    }

    /// Scans the rename pool from its first slot upward for an entry with
    /// both busy bits clear. Used by issue-stage false-dependency handling.
    pub fn find_free_rename_slot(&self) -> Option<RegId> {
        self.registers[self.rename_pool_start..]
            .iter()
            .position(|r| !r.is_busy())
            .map(|offset| RegId(self.rename_pool_start + offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_halves() {
        let rf = RegisterFile::new(4, 1);
        assert_eq!(rf.find("F0"), Some(RegId(0)));
        assert_eq!(rf.find("F3"), Some(RegId(3)));
        assert_eq!(rf.find("R0"), Some(RegId(4)));
        assert_eq!(rf.find("R3"), Some(RegId(7)));
        assert_eq!(rf.find("F4"), None);
        assert_eq!(rf.iter().count(), 8);
    }

    #[test]
    fn all_registers_start_at_init_value() {
        let rf = RegisterFile::new(2, 7);
        for r in rf.iter() {
            assert_eq!(r.value, 7);
            assert!(!r.is_busy());
        }
    }

    #[test]
    fn free_rename_slot_scans_from_first() {
        let mut rf = RegisterFile::new(2, 0);
        assert_eq!(rf.find_free_rename_slot(), Some(RegId(2)));
        rf.get_mut(RegId(2)).write_busy = true;
        assert_eq!(rf.find_free_rename_slot(), Some(RegId(3)));
        rf.get_mut(RegId(3)).read_busy = true;
        assert_eq!(rf.find_free_rename_slot(), None);
    }
}
