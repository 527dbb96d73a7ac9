use std::sync::Arc;

use thiserror::Error;

use crate::instruction::opcode::{OPCODE_MAPPING, PREFIX};
use crate::instruction::operand::{BranchTarget, Operand, OperandError, RawValue};
use crate::instruction::operand_kind::OperandKind;
use crate::instruction::Instruction;
use crate::metadata::resolver::Resolver;
use crate::metadata::token::MetadataToken;
use crate::metadata::MetadataContext;

pub mod listing;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DisassemblyError {
    #[error("unknown opcode {opcode:#06x} at offset {offset:#06x}")]
    UnknownOpcode { offset: u32, opcode: u16 },
    #[error("method body ends in the middle of an instruction at offset {offset:#06x}")]
    UnexpectedEnd { offset: u32 },
    #[error("invalid operand at offset {offset:#06x}: {source}")]
    Operand {
        offset: u32,
        #[source]
        source: OperandError,
    },
}

fn take<const N: usize>(input: &[u8], ix: usize) -> Result<[u8; N], DisassemblyError> {
    input
        .get(ix..ix + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(DisassemblyError::UnexpectedEnd { offset: ix as u32 })
}

/// Read the raw operand bytes for `kind` starting at `ix` and return the raw
/// value along with the number of bytes consumed.
///
/// Branch displacements are relative to the offset of the *next* instruction
/// (for `switch`, the offset past the whole jump table) and are converted to
/// absolute targets here.
#[tracing::instrument]
fn decode_operand(
    input: &[u8],
    ix: usize,
    kind: OperandKind,
) -> Result<(RawValue, usize), DisassemblyError> {
    match kind {
        OperandKind::InlineNone => Ok((RawValue::None, 0)),
        OperandKind::ShortInlineBrTarget => {
            let disp = i8::from_le_bytes(take::<1>(input, ix)?);
            let next = (ix + 1) as i64;
            let target = BranchTarget {
                offset: (next + i64::from(disp)) as u32,
            };
            Ok((RawValue::Target(target), 1))
        }
        OperandKind::InlineBrTarget => {
            let disp = i32::from_le_bytes(take::<4>(input, ix)?);
            let next = (ix + 4) as i64;
            let target = BranchTarget {
                offset: (next + i64::from(disp)) as u32,
            };
            Ok((RawValue::Target(target), 4))
        }
        OperandKind::InlineSwitch => {
            let count = u32::from_le_bytes(take::<4>(input, ix)?) as usize;
            let consumed = 4 + count * 4;
            let next = (ix + consumed) as i64;
            let mut targets = Vec::with_capacity(count);
            for slot in 0..count {
                let disp = i32::from_le_bytes(take::<4>(input, ix + 4 + slot * 4)?);
                targets.push(BranchTarget {
                    offset: (next + i64::from(disp)) as u32,
                });
            }
            Ok((RawValue::Targets(targets), consumed))
        }
        OperandKind::InlineField
        | OperandKind::InlineMethod
        | OperandKind::InlineSig
        | OperandKind::InlineString
        | OperandKind::InlineTok
        | OperandKind::InlineType => {
            let raw = u32::from_le_bytes(take::<4>(input, ix)?);
            Ok((RawValue::Token(MetadataToken::new(raw)), 4))
        }
        OperandKind::InlineI => {
            let value = i32::from_le_bytes(take::<4>(input, ix)?);
            Ok((RawValue::Int32(value), 4))
        }
        OperandKind::InlineI8 => {
            let value = i64::from_le_bytes(take::<8>(input, ix)?);
            Ok((RawValue::Int64(value), 8))
        }
        OperandKind::ShortInlineI => {
            let value = i8::from_le_bytes(take::<1>(input, ix)?);
            Ok((RawValue::Int8(value), 1))
        }
        OperandKind::InlineR => {
            let value = f64::from_le_bytes(take::<8>(input, ix)?);
            Ok((RawValue::Float64(value), 8))
        }
        OperandKind::ShortInlineR => {
            let value = f32::from_le_bytes(take::<4>(input, ix)?);
            Ok((RawValue::Float32(value), 4))
        }
        // Slot indexes are encoded unsigned; the operand reinterprets them.
        OperandKind::InlineVar => {
            let value = u16::from_le_bytes(take::<2>(input, ix)?);
            Ok((RawValue::UInt16(value), 2))
        }
        OperandKind::ShortInlineVar => {
            let value = u8::from_le_bytes(take::<1>(input, ix)?);
            Ok((RawValue::UInt8(value), 1))
        }
    }
}

#[tracing::instrument(skip(context, resolver))]
fn decode_instruction(
    input: &[u8],
    ix: usize,
    context: &Arc<MetadataContext>,
    resolver: &dyn Resolver,
) -> Result<Instruction, DisassemblyError> {
    let offset = ix as u32;
    let first = *input
        .get(ix)
        .ok_or(DisassemblyError::UnexpectedEnd { offset })?;

    let (opcode, opcode_size) = if first == PREFIX {
        let second = *input
            .get(ix + 1)
            .ok_or(DisassemblyError::UnexpectedEnd { offset })?;
        (u16::from_be_bytes([PREFIX, second]), 2)
    } else {
        (u16::from(first), 1)
    };

    let (mnemonic, kind) = OPCODE_MAPPING
        .find_instruction(opcode)
        .ok_or(DisassemblyError::UnknownOpcode { offset, opcode })?;

    let (raw, _consumed) = decode_operand(input, ix + opcode_size, kind)?;
    let operand = Operand::new(Arc::clone(context), kind)
        .assign(raw, resolver)
        .map_err(|source| DisassemblyError::Operand { offset, source })?;

    Ok(Instruction::new(offset, mnemonic, operand))
}

/// Decode a whole method body into its instruction sequence.
///
/// Walks the buffer linearly from offset zero; reference operands are
/// resolved against `resolver` as they are decoded.
#[tracing::instrument(skip(context, resolver))]
pub fn disassemble_body(
    input: &[u8],
    context: &Arc<MetadataContext>,
    resolver: &dyn Resolver,
) -> Result<Vec<Instruction>, DisassemblyError> {
    let mut code = vec![];
    let mut ix = 0;

    while ix < input.len() {
        let instruction = decode_instruction(input, ix, context, resolver)?;
        ix += instruction.size();
        code.push(instruction);
    }

    Ok(code)
}
