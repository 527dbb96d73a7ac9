/// Decodes CIL method bodies into instructions and disassembly text.
///
/// The steps are:
/// 1. **Opcode lookup** - mapping raw opcode bytes to a mnemonic and an
///    operand kind
/// 2. **Operand decoding** - reading the operand bytes the kind prescribes
/// 3. **Operand binding** - validating the raw value against the kind and
///    resolving tokens to entities through a
///    [`Resolver`][crate::metadata::resolver::Resolver]
/// 4. **Listing** - rendering the decoded instructions as text
pub mod disassembler;

/// Instructions, mnemonics, opcodes and the operand model.
pub mod instruction;

/// Metadata tokens, resolved entities and the context they resolve against.
pub mod metadata;
