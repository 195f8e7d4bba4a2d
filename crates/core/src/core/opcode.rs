//! Opcode and operand tagging.

use std::fmt;
use std::str::FromStr;

use crate::core::register::RegId;

/// The six recognized opcodes, grouped into the three functional-unit
/// categories by [`Opcode::category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    Lw,
    Sw,
}

/// Which functional-unit pool an opcode is dispatched to at issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    Add,
    Mul,
    Sw,
}

impl Opcode {
    /// The functional-unit pool this opcode is issued to.
    pub fn category(self) -> UnitCategory {
        match self {
            Opcode::Add | Opcode::Sub => UnitCategory::Add,
            Opcode::Mul | Opcode::Div => UnitCategory::Mul,
            Opcode::Lw | Opcode::Sw => UnitCategory::Sw,
        }
    }

    /// True for `lw`/`sw`, whose first operand is an immediate offset
    /// rather than a register.
    pub fn is_memory(self) -> bool {
        matches!(self, Opcode::Lw | Opcode::Sw)
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Opcode::Add),
            "sub" => Ok(Opcode::Sub),
            "mul" => Ok(Opcode::Mul),
            "div" => Ok(Opcode::Div),
            "lw" => Ok(Opcode::Lw),
            "sw" => Ok(Opcode::Sw),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Lw => "lw",
            Opcode::Sw => "sw",
        };
        f.write_str(s)
    }
}

/// A source or destination operand: either a register, or — for the
/// literal offset of `lw`/`sw` — an immediate. Avoids the reference's
/// throwaway "aux" register allocation for memory literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(RegId),
    Imm(i64),
}

impl Operand {
    /// The register this operand refers to, if any.
    pub fn reg(self) -> Option<RegId> {
        match self {
            Operand::Reg(r) => Some(r),
            Operand::Imm(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_dispatch() {
        assert_eq!(Opcode::Add.category(), UnitCategory::Add);
        assert_eq!(Opcode::Sub.category(), UnitCategory::Add);
        assert_eq!(Opcode::Mul.category(), UnitCategory::Mul);
        assert_eq!(Opcode::Div.category(), UnitCategory::Mul);
        assert_eq!(Opcode::Lw.category(), UnitCategory::Sw);
        assert_eq!(Opcode::Sw.category(), UnitCategory::Sw);
    }

    #[test]
    fn parse_roundtrip() {
        for op in ["add", "sub", "mul", "div", "lw", "sw"] {
            let parsed: Opcode = op.parse().unwrap();
            assert_eq!(parsed.to_string(), op);
        }
    }

    #[test]
    fn unknown_opcode_rejected() {
        assert!("xor".parse::<Opcode>().is_err());
    }

    #[test]
    fn is_memory() {
        assert!(Opcode::Lw.is_memory());
        assert!(Opcode::Sw.is_memory());
        assert!(!Opcode::Add.is_memory());
    }
}
