use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::instruction::mnemonic::Mnemonic;
use crate::instruction::operand_kind::OperandKind;

/// First byte of the two-byte opcode page.
pub const PREFIX: u8 = 0xfe;

/// Encoded opcode value.
///
/// One-byte opcodes store their byte directly; opcodes on the `0xFE` page
/// store the prefix in the high byte (e.g. `ceq` is `0xfe01`).
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Encoded size of the opcode itself in bytes.
    pub fn size(&self) -> usize {
        if self.0 > 0xff {
            2
        } else {
            1
        }
    }
}

/// A mapper between mnemonics and opcode values plus their operand kinds.
#[derive(Debug)]
pub struct OpcodeMapping {
    forward_map: HashMap<Mnemonic, (Opcode, OperandKind)>,
    reverse_map: HashMap<u16, (Mnemonic, OperandKind)>,
}

impl OpcodeMapping {
    /// Find the opcode and operand kind for the given mnemonic.
    #[tracing::instrument]
    pub fn find_opcode(&self, mnemonic: Mnemonic) -> Option<(Opcode, OperandKind)> {
        self.forward_map.get(&mnemonic).copied()
    }

    /// Find the mnemonic and operand kind for the given opcode value.
    #[tracing::instrument]
    pub fn find_instruction(&self, opcode: u16) -> Option<(Mnemonic, OperandKind)> {
        self.reverse_map.get(&opcode).copied()
    }

    fn new() -> Self {
        let mut forward_map = HashMap::new();
        let mut reverse_map = HashMap::new();

        let mappings = vec![
            (Mnemonic::Nop, OperandKind::InlineNone, 0x00),
            (Mnemonic::Break, OperandKind::InlineNone, 0x01),
            (Mnemonic::Ldarg0, OperandKind::InlineNone, 0x02),
            (Mnemonic::Ldarg1, OperandKind::InlineNone, 0x03),
            (Mnemonic::Ldarg2, OperandKind::InlineNone, 0x04),
            (Mnemonic::Ldarg3, OperandKind::InlineNone, 0x05),
            (Mnemonic::Ldloc0, OperandKind::InlineNone, 0x06),
            (Mnemonic::Ldloc1, OperandKind::InlineNone, 0x07),
            (Mnemonic::Ldloc2, OperandKind::InlineNone, 0x08),
            (Mnemonic::Ldloc3, OperandKind::InlineNone, 0x09),
            (Mnemonic::Stloc0, OperandKind::InlineNone, 0x0a),
            (Mnemonic::Stloc1, OperandKind::InlineNone, 0x0b),
            (Mnemonic::Stloc2, OperandKind::InlineNone, 0x0c),
            (Mnemonic::Stloc3, OperandKind::InlineNone, 0x0d),
            (Mnemonic::LdargS, OperandKind::ShortInlineVar, 0x0e),
            (Mnemonic::LdargaS, OperandKind::ShortInlineVar, 0x0f),
            (Mnemonic::StargS, OperandKind::ShortInlineVar, 0x10),
            (Mnemonic::LdlocS, OperandKind::ShortInlineVar, 0x11),
            (Mnemonic::LdlocaS, OperandKind::ShortInlineVar, 0x12),
            (Mnemonic::StlocS, OperandKind::ShortInlineVar, 0x13),
            (Mnemonic::Ldnull, OperandKind::InlineNone, 0x14),
            (Mnemonic::LdcI4M1, OperandKind::InlineNone, 0x15),
            (Mnemonic::LdcI40, OperandKind::InlineNone, 0x16),
            (Mnemonic::LdcI41, OperandKind::InlineNone, 0x17),
            (Mnemonic::LdcI42, OperandKind::InlineNone, 0x18),
            (Mnemonic::LdcI43, OperandKind::InlineNone, 0x19),
            (Mnemonic::LdcI44, OperandKind::InlineNone, 0x1a),
            (Mnemonic::LdcI45, OperandKind::InlineNone, 0x1b),
            (Mnemonic::LdcI46, OperandKind::InlineNone, 0x1c),
            (Mnemonic::LdcI47, OperandKind::InlineNone, 0x1d),
            (Mnemonic::LdcI48, OperandKind::InlineNone, 0x1e),
            (Mnemonic::LdcI4S, OperandKind::ShortInlineI, 0x1f),
            (Mnemonic::LdcI4, OperandKind::InlineI, 0x20),
            (Mnemonic::LdcI8, OperandKind::InlineI8, 0x21),
            (Mnemonic::LdcR4, OperandKind::ShortInlineR, 0x22),
            (Mnemonic::LdcR8, OperandKind::InlineR, 0x23),
            (Mnemonic::Dup, OperandKind::InlineNone, 0x25),
            (Mnemonic::Pop, OperandKind::InlineNone, 0x26),
            (Mnemonic::Jmp, OperandKind::InlineMethod, 0x27),
            (Mnemonic::Call, OperandKind::InlineMethod, 0x28),
            (Mnemonic::Calli, OperandKind::InlineSig, 0x29),
            (Mnemonic::Ret, OperandKind::InlineNone, 0x2a),
            (Mnemonic::BrS, OperandKind::ShortInlineBrTarget, 0x2b),
            (Mnemonic::BrfalseS, OperandKind::ShortInlineBrTarget, 0x2c),
            (Mnemonic::BrtrueS, OperandKind::ShortInlineBrTarget, 0x2d),
            (Mnemonic::BeqS, OperandKind::ShortInlineBrTarget, 0x2e),
            (Mnemonic::BgeS, OperandKind::ShortInlineBrTarget, 0x2f),
            (Mnemonic::BgtS, OperandKind::ShortInlineBrTarget, 0x30),
            (Mnemonic::BleS, OperandKind::ShortInlineBrTarget, 0x31),
            (Mnemonic::BltS, OperandKind::ShortInlineBrTarget, 0x32),
            (Mnemonic::BneUnS, OperandKind::ShortInlineBrTarget, 0x33),
            (Mnemonic::BgeUnS, OperandKind::ShortInlineBrTarget, 0x34),
            (Mnemonic::BgtUnS, OperandKind::ShortInlineBrTarget, 0x35),
            (Mnemonic::BleUnS, OperandKind::ShortInlineBrTarget, 0x36),
            (Mnemonic::BltUnS, OperandKind::ShortInlineBrTarget, 0x37),
            (Mnemonic::Br, OperandKind::InlineBrTarget, 0x38),
            (Mnemonic::Brfalse, OperandKind::InlineBrTarget, 0x39),
            (Mnemonic::Brtrue, OperandKind::InlineBrTarget, 0x3a),
            (Mnemonic::Beq, OperandKind::InlineBrTarget, 0x3b),
            (Mnemonic::Bge, OperandKind::InlineBrTarget, 0x3c),
            (Mnemonic::Bgt, OperandKind::InlineBrTarget, 0x3d),
            (Mnemonic::Ble, OperandKind::InlineBrTarget, 0x3e),
            (Mnemonic::Blt, OperandKind::InlineBrTarget, 0x3f),
            (Mnemonic::BneUn, OperandKind::InlineBrTarget, 0x40),
            (Mnemonic::BgeUn, OperandKind::InlineBrTarget, 0x41),
            (Mnemonic::BgtUn, OperandKind::InlineBrTarget, 0x42),
            (Mnemonic::BleUn, OperandKind::InlineBrTarget, 0x43),
            (Mnemonic::BltUn, OperandKind::InlineBrTarget, 0x44),
            (Mnemonic::Switch, OperandKind::InlineSwitch, 0x45),
            (Mnemonic::LdindI1, OperandKind::InlineNone, 0x46),
            (Mnemonic::LdindU1, OperandKind::InlineNone, 0x47),
            (Mnemonic::LdindI2, OperandKind::InlineNone, 0x48),
            (Mnemonic::LdindU2, OperandKind::InlineNone, 0x49),
            (Mnemonic::LdindI4, OperandKind::InlineNone, 0x4a),
            (Mnemonic::LdindU4, OperandKind::InlineNone, 0x4b),
            (Mnemonic::LdindI8, OperandKind::InlineNone, 0x4c),
            (Mnemonic::LdindI, OperandKind::InlineNone, 0x4d),
            (Mnemonic::LdindR4, OperandKind::InlineNone, 0x4e),
            (Mnemonic::LdindR8, OperandKind::InlineNone, 0x4f),
            (Mnemonic::LdindRef, OperandKind::InlineNone, 0x50),
            (Mnemonic::StindRef, OperandKind::InlineNone, 0x51),
            (Mnemonic::StindI1, OperandKind::InlineNone, 0x52),
            (Mnemonic::StindI2, OperandKind::InlineNone, 0x53),
            (Mnemonic::StindI4, OperandKind::InlineNone, 0x54),
            (Mnemonic::StindI8, OperandKind::InlineNone, 0x55),
            (Mnemonic::StindR4, OperandKind::InlineNone, 0x56),
            (Mnemonic::StindR8, OperandKind::InlineNone, 0x57),
            (Mnemonic::Add, OperandKind::InlineNone, 0x58),
            (Mnemonic::Sub, OperandKind::InlineNone, 0x59),
            (Mnemonic::Mul, OperandKind::InlineNone, 0x5a),
            (Mnemonic::Div, OperandKind::InlineNone, 0x5b),
            (Mnemonic::DivUn, OperandKind::InlineNone, 0x5c),
            (Mnemonic::Rem, OperandKind::InlineNone, 0x5d),
            (Mnemonic::RemUn, OperandKind::InlineNone, 0x5e),
            (Mnemonic::And, OperandKind::InlineNone, 0x5f),
            (Mnemonic::Or, OperandKind::InlineNone, 0x60),
            (Mnemonic::Xor, OperandKind::InlineNone, 0x61),
            (Mnemonic::Shl, OperandKind::InlineNone, 0x62),
            (Mnemonic::Shr, OperandKind::InlineNone, 0x63),
            (Mnemonic::ShrUn, OperandKind::InlineNone, 0x64),
            (Mnemonic::Neg, OperandKind::InlineNone, 0x65),
            (Mnemonic::Not, OperandKind::InlineNone, 0x66),
            (Mnemonic::ConvI1, OperandKind::InlineNone, 0x67),
            (Mnemonic::ConvI2, OperandKind::InlineNone, 0x68),
            (Mnemonic::ConvI4, OperandKind::InlineNone, 0x69),
            (Mnemonic::ConvI8, OperandKind::InlineNone, 0x6a),
            (Mnemonic::ConvR4, OperandKind::InlineNone, 0x6b),
            (Mnemonic::ConvR8, OperandKind::InlineNone, 0x6c),
            (Mnemonic::ConvU4, OperandKind::InlineNone, 0x6d),
            (Mnemonic::ConvU8, OperandKind::InlineNone, 0x6e),
            (Mnemonic::Callvirt, OperandKind::InlineMethod, 0x6f),
            (Mnemonic::Cpobj, OperandKind::InlineType, 0x70),
            (Mnemonic::Ldobj, OperandKind::InlineType, 0x71),
            (Mnemonic::Ldstr, OperandKind::InlineString, 0x72),
            (Mnemonic::Newobj, OperandKind::InlineMethod, 0x73),
            (Mnemonic::Castclass, OperandKind::InlineType, 0x74),
            (Mnemonic::Isinst, OperandKind::InlineType, 0x75),
            (Mnemonic::ConvRUn, OperandKind::InlineNone, 0x76),
            (Mnemonic::Unbox, OperandKind::InlineType, 0x79),
            (Mnemonic::Throw, OperandKind::InlineNone, 0x7a),
            (Mnemonic::Ldfld, OperandKind::InlineField, 0x7b),
            (Mnemonic::Ldflda, OperandKind::InlineField, 0x7c),
            (Mnemonic::Stfld, OperandKind::InlineField, 0x7d),
            (Mnemonic::Ldsfld, OperandKind::InlineField, 0x7e),
            (Mnemonic::Ldsflda, OperandKind::InlineField, 0x7f),
            (Mnemonic::Stsfld, OperandKind::InlineField, 0x80),
            (Mnemonic::Stobj, OperandKind::InlineType, 0x81),
            (Mnemonic::ConvOvfI1Un, OperandKind::InlineNone, 0x82),
            (Mnemonic::ConvOvfI2Un, OperandKind::InlineNone, 0x83),
            (Mnemonic::ConvOvfI4Un, OperandKind::InlineNone, 0x84),
            (Mnemonic::ConvOvfI8Un, OperandKind::InlineNone, 0x85),
            (Mnemonic::ConvOvfU1Un, OperandKind::InlineNone, 0x86),
            (Mnemonic::ConvOvfU2Un, OperandKind::InlineNone, 0x87),
            (Mnemonic::ConvOvfU4Un, OperandKind::InlineNone, 0x88),
            (Mnemonic::ConvOvfU8Un, OperandKind::InlineNone, 0x89),
            (Mnemonic::ConvOvfIUn, OperandKind::InlineNone, 0x8a),
            (Mnemonic::ConvOvfUUn, OperandKind::InlineNone, 0x8b),
            (Mnemonic::Box, OperandKind::InlineType, 0x8c),
            (Mnemonic::Newarr, OperandKind::InlineType, 0x8d),
            (Mnemonic::Ldlen, OperandKind::InlineNone, 0x8e),
            (Mnemonic::Ldelema, OperandKind::InlineType, 0x8f),
            (Mnemonic::LdelemI1, OperandKind::InlineNone, 0x90),
            (Mnemonic::LdelemU1, OperandKind::InlineNone, 0x91),
            (Mnemonic::LdelemI2, OperandKind::InlineNone, 0x92),
            (Mnemonic::LdelemU2, OperandKind::InlineNone, 0x93),
            (Mnemonic::LdelemI4, OperandKind::InlineNone, 0x94),
            (Mnemonic::LdelemU4, OperandKind::InlineNone, 0x95),
            (Mnemonic::LdelemI8, OperandKind::InlineNone, 0x96),
            (Mnemonic::LdelemI, OperandKind::InlineNone, 0x97),
            (Mnemonic::LdelemR4, OperandKind::InlineNone, 0x98),
            (Mnemonic::LdelemR8, OperandKind::InlineNone, 0x99),
            (Mnemonic::LdelemRef, OperandKind::InlineNone, 0x9a),
            (Mnemonic::StelemI, OperandKind::InlineNone, 0x9b),
            (Mnemonic::StelemI1, OperandKind::InlineNone, 0x9c),
            (Mnemonic::StelemI2, OperandKind::InlineNone, 0x9d),
            (Mnemonic::StelemI4, OperandKind::InlineNone, 0x9e),
            (Mnemonic::StelemI8, OperandKind::InlineNone, 0x9f),
            (Mnemonic::StelemR4, OperandKind::InlineNone, 0xa0),
            (Mnemonic::StelemR8, OperandKind::InlineNone, 0xa1),
            (Mnemonic::StelemRef, OperandKind::InlineNone, 0xa2),
            (Mnemonic::Ldelem, OperandKind::InlineType, 0xa3),
            (Mnemonic::Stelem, OperandKind::InlineType, 0xa4),
            (Mnemonic::UnboxAny, OperandKind::InlineType, 0xa5),
            (Mnemonic::ConvOvfI1, OperandKind::InlineNone, 0xb3),
            (Mnemonic::ConvOvfU1, OperandKind::InlineNone, 0xb4),
            (Mnemonic::ConvOvfI2, OperandKind::InlineNone, 0xb5),
            (Mnemonic::ConvOvfU2, OperandKind::InlineNone, 0xb6),
            (Mnemonic::ConvOvfI4, OperandKind::InlineNone, 0xb7),
            (Mnemonic::ConvOvfU4, OperandKind::InlineNone, 0xb8),
            (Mnemonic::ConvOvfI8, OperandKind::InlineNone, 0xb9),
            (Mnemonic::ConvOvfU8, OperandKind::InlineNone, 0xba),
            (Mnemonic::Refanyval, OperandKind::InlineType, 0xc2),
            (Mnemonic::Ckfinite, OperandKind::InlineNone, 0xc3),
            (Mnemonic::Mkrefany, OperandKind::InlineType, 0xc6),
            (Mnemonic::Ldtoken, OperandKind::InlineTok, 0xd0),
            (Mnemonic::ConvU2, OperandKind::InlineNone, 0xd1),
            (Mnemonic::ConvU1, OperandKind::InlineNone, 0xd2),
            (Mnemonic::ConvI, OperandKind::InlineNone, 0xd3),
            (Mnemonic::ConvOvfI, OperandKind::InlineNone, 0xd4),
            (Mnemonic::ConvOvfU, OperandKind::InlineNone, 0xd5),
            (Mnemonic::AddOvf, OperandKind::InlineNone, 0xd6),
            (Mnemonic::AddOvfUn, OperandKind::InlineNone, 0xd7),
            (Mnemonic::MulOvf, OperandKind::InlineNone, 0xd8),
            (Mnemonic::MulOvfUn, OperandKind::InlineNone, 0xd9),
            (Mnemonic::SubOvf, OperandKind::InlineNone, 0xda),
            (Mnemonic::SubOvfUn, OperandKind::InlineNone, 0xdb),
            (Mnemonic::Endfinally, OperandKind::InlineNone, 0xdc),
            (Mnemonic::Leave, OperandKind::InlineBrTarget, 0xdd),
            (Mnemonic::LeaveS, OperandKind::ShortInlineBrTarget, 0xde),
            (Mnemonic::StindI, OperandKind::InlineNone, 0xdf),
            (Mnemonic::ConvU, OperandKind::InlineNone, 0xe0),
            (Mnemonic::Arglist, OperandKind::InlineNone, 0xfe00),
            (Mnemonic::Ceq, OperandKind::InlineNone, 0xfe01),
            (Mnemonic::Cgt, OperandKind::InlineNone, 0xfe02),
            (Mnemonic::CgtUn, OperandKind::InlineNone, 0xfe03),
            (Mnemonic::Clt, OperandKind::InlineNone, 0xfe04),
            (Mnemonic::CltUn, OperandKind::InlineNone, 0xfe05),
            (Mnemonic::Ldftn, OperandKind::InlineMethod, 0xfe06),
            (Mnemonic::Ldvirtftn, OperandKind::InlineMethod, 0xfe07),
            (Mnemonic::Ldarg, OperandKind::InlineVar, 0xfe09),
            (Mnemonic::Ldarga, OperandKind::InlineVar, 0xfe0a),
            (Mnemonic::Starg, OperandKind::InlineVar, 0xfe0b),
            (Mnemonic::Ldloc, OperandKind::InlineVar, 0xfe0c),
            (Mnemonic::Ldloca, OperandKind::InlineVar, 0xfe0d),
            (Mnemonic::Stloc, OperandKind::InlineVar, 0xfe0e),
            (Mnemonic::Localloc, OperandKind::InlineNone, 0xfe0f),
            (Mnemonic::Endfilter, OperandKind::InlineNone, 0xfe11),
            (Mnemonic::Unaligned, OperandKind::ShortInlineI, 0xfe12),
            (Mnemonic::Volatile, OperandKind::InlineNone, 0xfe13),
            (Mnemonic::Tail, OperandKind::InlineNone, 0xfe14),
            (Mnemonic::Initobj, OperandKind::InlineType, 0xfe15),
            (Mnemonic::Constrained, OperandKind::InlineType, 0xfe16),
            (Mnemonic::Cpblk, OperandKind::InlineNone, 0xfe17),
            (Mnemonic::Initblk, OperandKind::InlineNone, 0xfe18),
            (Mnemonic::Rethrow, OperandKind::InlineNone, 0xfe1a),
            (Mnemonic::Sizeof, OperandKind::InlineType, 0xfe1c),
            (Mnemonic::Refanytype, OperandKind::InlineNone, 0xfe1d),
            (Mnemonic::Readonly, OperandKind::InlineNone, 0xfe1e),
        ];

        for (mnemonic, operand_kind, opcode) in mappings {
            forward_map.insert(mnemonic, (Opcode(opcode), operand_kind));
            reverse_map.insert(opcode, (mnemonic, operand_kind));
        }

        OpcodeMapping {
            forward_map,
            reverse_map,
        }
    }
}

lazy_static! {
    pub static ref OPCODE_MAPPING: OpcodeMapping = OpcodeMapping::new();
}
