use std::fmt;

use self::mnemonic::Mnemonic;
use self::opcode::OPCODE_MAPPING;
use self::operand::Operand;

/// Mnemonics for the full instruction set.
pub mod mnemonic;

/// Mapping between mnemonics and opcode values.
pub mod opcode;

/// The operand model: raw and validated values, resolution, rendering.
pub mod operand;

/// Operand shapes and their encoded widths.
pub mod operand_kind;

/// One decoded instruction: its byte offset within the method body, the
/// operation performed, and the single operand attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub offset: u32,
    pub mnemonic: Mnemonic,
    pub operand: Operand,
}

impl Instruction {
    pub fn new(offset: u32, mnemonic: Mnemonic, operand: Operand) -> Instruction {
        Instruction {
            offset,
            mnemonic,
            operand,
        }
    }

    /// Size of instruction opcode + operand in bytes.
    pub fn size(&self) -> usize {
        let (opcode, _) = OPCODE_MAPPING
            .find_opcode(self.mnemonic)
            .unwrap_or_else(|| panic!("no opcode for mnemonic: {}", self.mnemonic));
        opcode.size() + self.operand.size()
    }

    /// Offset label of this instruction, e.g. `IL_002A`.
    pub fn label(&self) -> String {
        format!("IL_{:04X}", self.offset)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.value().is_some() {
            write!(f, "{} {}", self.mnemonic, self.operand)
        } else {
            write!(f, "{}", self.mnemonic)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::operand_kind::OperandKind;
    use super::*;
    use crate::metadata::resolver::TableResolver;
    use crate::metadata::MetadataContext;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_size_and_display() {
        let context = Arc::new(MetadataContext::new("demo".to_string()));
        let resolver = TableResolver::new();

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineNone)
            .assign(super::operand::RawValue::None, &resolver)
            .unwrap();
        let instruction = Instruction::new(0, Mnemonic::Ret, operand);
        assert_eq!(instruction.size(), 1);
        assert_eq!(instruction.to_string(), "ret");
        assert_eq!(instruction.label(), "IL_0000");

        let operand = Operand::new(Arc::clone(&context), OperandKind::ShortInlineI)
            .assign(super::operand::RawValue::Int8(42), &resolver)
            .unwrap();
        let instruction = Instruction::new(0x2a, Mnemonic::LdcI4S, operand);
        assert_eq!(instruction.size(), 2);
        assert_eq!(instruction.to_string(), "ldc.i4.s 42");
        assert_eq!(instruction.label(), "IL_002A");

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineVar)
            .assign(super::operand::RawValue::UInt16(3), &resolver)
            .unwrap();
        let instruction = Instruction::new(0x10, Mnemonic::Ldloc, operand);
        // Two-byte opcode plus a two-byte slot index.
        assert_eq!(instruction.size(), 4);
        assert_eq!(instruction.to_string(), "ldloc 3");
    }
}
