/// Operand shape of an instruction, using the ECMA-335 names.
///
/// The kind fixes whether an operand is present at all, how many bytes it
/// occupies in the encoded stream, and which value shape is legal for it.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum OperandKind {
    /// No operand
    InlineNone,
    /// 4-byte branch displacement, decoded to a branch target
    InlineBrTarget,
    /// 1-byte branch displacement, decoded to a branch target
    ShortInlineBrTarget,
    /// 4-byte field token
    InlineField,
    /// 4-byte signed immediate
    InlineI,
    /// 1-byte signed immediate
    ShortInlineI,
    /// 8-byte signed immediate
    InlineI8,
    /// 4-byte method token
    InlineMethod,
    /// 8-byte float64 immediate
    InlineR,
    /// 4-byte float32 immediate
    ShortInlineR,
    /// 4-byte standalone-signature token
    InlineSig,
    /// 4-byte user-string token, decoded to the string's text
    InlineString,
    /// 4-byte target count followed by that many 4-byte branch displacements
    InlineSwitch,
    /// 4-byte token of unconstrained kind
    InlineTok,
    /// 4-byte type token
    InlineType,
    /// 2-byte local or argument slot index
    InlineVar,
    /// 1-byte local or argument slot index
    ShortInlineVar,
}
