/// Mnemonic of an instruction.
///
/// This represents the operation that is performed by the instruction.
/// Variants cover the full one-byte opcode page plus the `0xFE`-prefixed
/// page; the serialized forms are the dotted spellings used in disassembly.
#[derive(
    Debug, Hash, Eq, PartialEq, Clone, Copy, strum_macros::Display, strum_macros::EnumString,
)]
pub enum Mnemonic {
    #[strum(serialize = "nop")]
    Nop,
    #[strum(serialize = "break")]
    Break,
    #[strum(serialize = "ldarg.0")]
    Ldarg0,
    #[strum(serialize = "ldarg.1")]
    Ldarg1,
    #[strum(serialize = "ldarg.2")]
    Ldarg2,
    #[strum(serialize = "ldarg.3")]
    Ldarg3,
    #[strum(serialize = "ldloc.0")]
    Ldloc0,
    #[strum(serialize = "ldloc.1")]
    Ldloc1,
    #[strum(serialize = "ldloc.2")]
    Ldloc2,
    #[strum(serialize = "ldloc.3")]
    Ldloc3,
    #[strum(serialize = "stloc.0")]
    Stloc0,
    #[strum(serialize = "stloc.1")]
    Stloc1,
    #[strum(serialize = "stloc.2")]
    Stloc2,
    #[strum(serialize = "stloc.3")]
    Stloc3,
    #[strum(serialize = "ldarg.s")]
    LdargS,
    #[strum(serialize = "ldarga.s")]
    LdargaS,
    #[strum(serialize = "starg.s")]
    StargS,
    #[strum(serialize = "ldloc.s")]
    LdlocS,
    #[strum(serialize = "ldloca.s")]
    LdlocaS,
    #[strum(serialize = "stloc.s")]
    StlocS,
    #[strum(serialize = "ldnull")]
    Ldnull,
    #[strum(serialize = "ldc.i4.m1")]
    LdcI4M1,
    #[strum(serialize = "ldc.i4.0")]
    LdcI40,
    #[strum(serialize = "ldc.i4.1")]
    LdcI41,
    #[strum(serialize = "ldc.i4.2")]
    LdcI42,
    #[strum(serialize = "ldc.i4.3")]
    LdcI43,
    #[strum(serialize = "ldc.i4.4")]
    LdcI44,
    #[strum(serialize = "ldc.i4.5")]
    LdcI45,
    #[strum(serialize = "ldc.i4.6")]
    LdcI46,
    #[strum(serialize = "ldc.i4.7")]
    LdcI47,
    #[strum(serialize = "ldc.i4.8")]
    LdcI48,
    #[strum(serialize = "ldc.i4.s")]
    LdcI4S,
    #[strum(serialize = "ldc.i4")]
    LdcI4,
    #[strum(serialize = "ldc.i8")]
    LdcI8,
    #[strum(serialize = "ldc.r4")]
    LdcR4,
    #[strum(serialize = "ldc.r8")]
    LdcR8,
    #[strum(serialize = "dup")]
    Dup,
    #[strum(serialize = "pop")]
    Pop,
    #[strum(serialize = "jmp")]
    Jmp,
    #[strum(serialize = "call")]
    Call,
    #[strum(serialize = "calli")]
    Calli,
    #[strum(serialize = "ret")]
    Ret,
    #[strum(serialize = "br.s")]
    BrS,
    #[strum(serialize = "brfalse.s")]
    BrfalseS,
    #[strum(serialize = "brtrue.s")]
    BrtrueS,
    #[strum(serialize = "beq.s")]
    BeqS,
    #[strum(serialize = "bge.s")]
    BgeS,
    #[strum(serialize = "bgt.s")]
    BgtS,
    #[strum(serialize = "ble.s")]
    BleS,
    #[strum(serialize = "blt.s")]
    BltS,
    #[strum(serialize = "bne.un.s")]
    BneUnS,
    #[strum(serialize = "bge.un.s")]
    BgeUnS,
    #[strum(serialize = "bgt.un.s")]
    BgtUnS,
    #[strum(serialize = "ble.un.s")]
    BleUnS,
    #[strum(serialize = "blt.un.s")]
    BltUnS,
    #[strum(serialize = "br")]
    Br,
    #[strum(serialize = "brfalse")]
    Brfalse,
    #[strum(serialize = "brtrue")]
    Brtrue,
    #[strum(serialize = "beq")]
    Beq,
    #[strum(serialize = "bge")]
    Bge,
    #[strum(serialize = "bgt")]
    Bgt,
    #[strum(serialize = "ble")]
    Ble,
    #[strum(serialize = "blt")]
    Blt,
    #[strum(serialize = "bne.un")]
    BneUn,
    #[strum(serialize = "bge.un")]
    BgeUn,
    #[strum(serialize = "bgt.un")]
    BgtUn,
    #[strum(serialize = "ble.un")]
    BleUn,
    #[strum(serialize = "blt.un")]
    BltUn,
    #[strum(serialize = "switch")]
    Switch,
    #[strum(serialize = "ldind.i1")]
    LdindI1,
    #[strum(serialize = "ldind.u1")]
    LdindU1,
    #[strum(serialize = "ldind.i2")]
    LdindI2,
    #[strum(serialize = "ldind.u2")]
    LdindU2,
    #[strum(serialize = "ldind.i4")]
    LdindI4,
    #[strum(serialize = "ldind.u4")]
    LdindU4,
    #[strum(serialize = "ldind.i8")]
    LdindI8,
    #[strum(serialize = "ldind.i")]
    LdindI,
    #[strum(serialize = "ldind.r4")]
    LdindR4,
    #[strum(serialize = "ldind.r8")]
    LdindR8,
    #[strum(serialize = "ldind.ref")]
    LdindRef,
    #[strum(serialize = "stind.ref")]
    StindRef,
    #[strum(serialize = "stind.i1")]
    StindI1,
    #[strum(serialize = "stind.i2")]
    StindI2,
    #[strum(serialize = "stind.i4")]
    StindI4,
    #[strum(serialize = "stind.i8")]
    StindI8,
    #[strum(serialize = "stind.r4")]
    StindR4,
    #[strum(serialize = "stind.r8")]
    StindR8,
    #[strum(serialize = "add")]
    Add,
    #[strum(serialize = "sub")]
    Sub,
    #[strum(serialize = "mul")]
    Mul,
    #[strum(serialize = "div")]
    Div,
    #[strum(serialize = "div.un")]
    DivUn,
    #[strum(serialize = "rem")]
    Rem,
    #[strum(serialize = "rem.un")]
    RemUn,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "xor")]
    Xor,
    #[strum(serialize = "shl")]
    Shl,
    #[strum(serialize = "shr")]
    Shr,
    #[strum(serialize = "shr.un")]
    ShrUn,
    #[strum(serialize = "neg")]
    Neg,
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "conv.i1")]
    ConvI1,
    #[strum(serialize = "conv.i2")]
    ConvI2,
    #[strum(serialize = "conv.i4")]
    ConvI4,
    #[strum(serialize = "conv.i8")]
    ConvI8,
    #[strum(serialize = "conv.r4")]
    ConvR4,
    #[strum(serialize = "conv.r8")]
    ConvR8,
    #[strum(serialize = "conv.u4")]
    ConvU4,
    #[strum(serialize = "conv.u8")]
    ConvU8,
    #[strum(serialize = "callvirt")]
    Callvirt,
    #[strum(serialize = "cpobj")]
    Cpobj,
    #[strum(serialize = "ldobj")]
    Ldobj,
    #[strum(serialize = "ldstr")]
    Ldstr,
    #[strum(serialize = "newobj")]
    Newobj,
    #[strum(serialize = "castclass")]
    Castclass,
    #[strum(serialize = "isinst")]
    Isinst,
    #[strum(serialize = "conv.r.un")]
    ConvRUn,
    #[strum(serialize = "unbox")]
    Unbox,
    #[strum(serialize = "throw")]
    Throw,
    #[strum(serialize = "ldfld")]
    Ldfld,
    #[strum(serialize = "ldflda")]
    Ldflda,
    #[strum(serialize = "stfld")]
    Stfld,
    #[strum(serialize = "ldsfld")]
    Ldsfld,
    #[strum(serialize = "ldsflda")]
    Ldsflda,
    #[strum(serialize = "stsfld")]
    Stsfld,
    #[strum(serialize = "stobj")]
    Stobj,
    #[strum(serialize = "conv.ovf.i1.un")]
    ConvOvfI1Un,
    #[strum(serialize = "conv.ovf.i2.un")]
    ConvOvfI2Un,
    #[strum(serialize = "conv.ovf.i4.un")]
    ConvOvfI4Un,
    #[strum(serialize = "conv.ovf.i8.un")]
    ConvOvfI8Un,
    #[strum(serialize = "conv.ovf.u1.un")]
    ConvOvfU1Un,
    #[strum(serialize = "conv.ovf.u2.un")]
    ConvOvfU2Un,
    #[strum(serialize = "conv.ovf.u4.un")]
    ConvOvfU4Un,
    #[strum(serialize = "conv.ovf.u8.un")]
    ConvOvfU8Un,
    #[strum(serialize = "conv.ovf.i.un")]
    ConvOvfIUn,
    #[strum(serialize = "conv.ovf.u.un")]
    ConvOvfUUn,
    #[strum(serialize = "box")]
    Box,
    #[strum(serialize = "newarr")]
    Newarr,
    #[strum(serialize = "ldlen")]
    Ldlen,
    #[strum(serialize = "ldelema")]
    Ldelema,
    #[strum(serialize = "ldelem.i1")]
    LdelemI1,
    #[strum(serialize = "ldelem.u1")]
    LdelemU1,
    #[strum(serialize = "ldelem.i2")]
    LdelemI2,
    #[strum(serialize = "ldelem.u2")]
    LdelemU2,
    #[strum(serialize = "ldelem.i4")]
    LdelemI4,
    #[strum(serialize = "ldelem.u4")]
    LdelemU4,
    #[strum(serialize = "ldelem.i8")]
    LdelemI8,
    #[strum(serialize = "ldelem.i")]
    LdelemI,
    #[strum(serialize = "ldelem.r4")]
    LdelemR4,
    #[strum(serialize = "ldelem.r8")]
    LdelemR8,
    #[strum(serialize = "ldelem.ref")]
    LdelemRef,
    #[strum(serialize = "stelem.i")]
    StelemI,
    #[strum(serialize = "stelem.i1")]
    StelemI1,
    #[strum(serialize = "stelem.i2")]
    StelemI2,
    #[strum(serialize = "stelem.i4")]
    StelemI4,
    #[strum(serialize = "stelem.i8")]
    StelemI8,
    #[strum(serialize = "stelem.r4")]
    StelemR4,
    #[strum(serialize = "stelem.r8")]
    StelemR8,
    #[strum(serialize = "stelem.ref")]
    StelemRef,
    #[strum(serialize = "ldelem")]
    Ldelem,
    #[strum(serialize = "stelem")]
    Stelem,
    #[strum(serialize = "unbox.any")]
    UnboxAny,
    #[strum(serialize = "conv.ovf.i1")]
    ConvOvfI1,
    #[strum(serialize = "conv.ovf.u1")]
    ConvOvfU1,
    #[strum(serialize = "conv.ovf.i2")]
    ConvOvfI2,
    #[strum(serialize = "conv.ovf.u2")]
    ConvOvfU2,
    #[strum(serialize = "conv.ovf.i4")]
    ConvOvfI4,
    #[strum(serialize = "conv.ovf.u4")]
    ConvOvfU4,
    #[strum(serialize = "conv.ovf.i8")]
    ConvOvfI8,
    #[strum(serialize = "conv.ovf.u8")]
    ConvOvfU8,
    #[strum(serialize = "refanyval")]
    Refanyval,
    #[strum(serialize = "ckfinite")]
    Ckfinite,
    #[strum(serialize = "mkrefany")]
    Mkrefany,
    #[strum(serialize = "ldtoken")]
    Ldtoken,
    #[strum(serialize = "conv.u2")]
    ConvU2,
    #[strum(serialize = "conv.u1")]
    ConvU1,
    #[strum(serialize = "conv.i")]
    ConvI,
    #[strum(serialize = "conv.ovf.i")]
    ConvOvfI,
    #[strum(serialize = "conv.ovf.u")]
    ConvOvfU,
    #[strum(serialize = "add.ovf")]
    AddOvf,
    #[strum(serialize = "add.ovf.un")]
    AddOvfUn,
    #[strum(serialize = "mul.ovf")]
    MulOvf,
    #[strum(serialize = "mul.ovf.un")]
    MulOvfUn,
    #[strum(serialize = "sub.ovf")]
    SubOvf,
    #[strum(serialize = "sub.ovf.un")]
    SubOvfUn,
    #[strum(serialize = "endfinally")]
    Endfinally,
    #[strum(serialize = "leave")]
    Leave,
    #[strum(serialize = "leave.s")]
    LeaveS,
    #[strum(serialize = "stind.i")]
    StindI,
    #[strum(serialize = "conv.u")]
    ConvU,
    #[strum(serialize = "arglist")]
    Arglist,
    #[strum(serialize = "ceq")]
    Ceq,
    #[strum(serialize = "cgt")]
    Cgt,
    #[strum(serialize = "cgt.un")]
    CgtUn,
    #[strum(serialize = "clt")]
    Clt,
    #[strum(serialize = "clt.un")]
    CltUn,
    #[strum(serialize = "ldftn")]
    Ldftn,
    #[strum(serialize = "ldvirtftn")]
    Ldvirtftn,
    #[strum(serialize = "ldarg")]
    Ldarg,
    #[strum(serialize = "ldarga")]
    Ldarga,
    #[strum(serialize = "starg")]
    Starg,
    #[strum(serialize = "ldloc")]
    Ldloc,
    #[strum(serialize = "ldloca")]
    Ldloca,
    #[strum(serialize = "stloc")]
    Stloc,
    #[strum(serialize = "localloc")]
    Localloc,
    #[strum(serialize = "endfilter")]
    Endfilter,
    #[strum(serialize = "unaligned.")]
    Unaligned,
    #[strum(serialize = "volatile.")]
    Volatile,
    #[strum(serialize = "tail.")]
    Tail,
    #[strum(serialize = "initobj")]
    Initobj,
    #[strum(serialize = "constrained.")]
    Constrained,
    #[strum(serialize = "cpblk")]
    Cpblk,
    #[strum(serialize = "initblk")]
    Initblk,
    #[strum(serialize = "rethrow")]
    Rethrow,
    #[strum(serialize = "sizeof")]
    Sizeof,
    #[strum(serialize = "refanytype")]
    Refanytype,
    #[strum(serialize = "readonly.")]
    Readonly,
}

impl Mnemonic {
    pub fn is_branching_instruction(&self) -> bool {
        matches!(
            self,
            Mnemonic::BrS
                | Mnemonic::BrfalseS
                | Mnemonic::BrtrueS
                | Mnemonic::BeqS
                | Mnemonic::BgeS
                | Mnemonic::BgtS
                | Mnemonic::BleS
                | Mnemonic::BltS
                | Mnemonic::BneUnS
                | Mnemonic::BgeUnS
                | Mnemonic::BgtUnS
                | Mnemonic::BleUnS
                | Mnemonic::BltUnS
                | Mnemonic::Br
                | Mnemonic::Brfalse
                | Mnemonic::Brtrue
                | Mnemonic::Beq
                | Mnemonic::Bge
                | Mnemonic::Bgt
                | Mnemonic::Ble
                | Mnemonic::Blt
                | Mnemonic::BneUn
                | Mnemonic::BgeUn
                | Mnemonic::BgtUn
                | Mnemonic::BleUn
                | Mnemonic::BltUn
                | Mnemonic::Leave
                | Mnemonic::LeaveS
                | Mnemonic::Switch
        )
    }

    pub fn is_calling_instruction(&self) -> bool {
        matches!(
            self,
            Mnemonic::Call | Mnemonic::Calli | Mnemonic::Callvirt | Mnemonic::Newobj | Mnemonic::Jmp
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_dotted_spellings() {
        let tests = vec![
            (Mnemonic::Nop, "nop"),
            (Mnemonic::LdcI4S, "ldc.i4.s"),
            (Mnemonic::BneUnS, "bne.un.s"),
            (Mnemonic::ConvOvfI1Un, "conv.ovf.i1.un"),
            (Mnemonic::Constrained, "constrained."),
        ];

        for (mnemonic, expected) in tests {
            assert_eq!(mnemonic.to_string(), expected);
            assert_eq!(Mnemonic::from_str(expected), Ok(mnemonic));
        }
    }

    #[test]
    fn test_classification() {
        assert!(Mnemonic::BrS.is_branching_instruction());
        assert!(Mnemonic::Switch.is_branching_instruction());
        assert!(!Mnemonic::Ret.is_branching_instruction());
        assert!(Mnemonic::Callvirt.is_calling_instruction());
        assert!(!Mnemonic::Ldstr.is_calling_instruction());
    }
}
