use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::instruction::operand_kind::OperandKind;
use crate::metadata::entity::{
    Entity, FieldDefInfo, FieldRefInfo, MemberRefInfo, MethodDefInfo, MethodRefInfo,
    MethodSpecInfo, SignatureInfo, TypeDefInfo, TypeRefInfo, TypeSpecInfo,
};
use crate::metadata::resolver::{ResolveError, Resolver};
use crate::metadata::token::{MetadataToken, TokenKind};
use crate::metadata::MetadataContext;

/// Byte offset of a branch target within its method body.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct BranchTarget {
    pub offset: u32,
}

impl fmt::Display for BranchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04X}", self.offset)
    }
}

/// A freshly decoded operand value, before validation and resolution.
///
/// This is what the instruction decoder reads off the byte stream: absence,
/// branch targets, integers in either signedness, floats, or a raw metadata
/// token. [`Operand::assign`] turns it into an [`OperandValue`] or rejects it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    None,
    Target(BranchTarget),
    Targets(Vec<BranchTarget>),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Token(MetadataToken),
}

/// A validated operand value. Reference kinds store the resolved entity (or
/// decoded string), never the raw token.
#[derive(Debug, Clone, PartialEq)]
pub enum OperandValue {
    Target(BranchTarget),
    Targets(Vec<BranchTarget>),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Entity(Entity),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperandError {
    #[error("unsupported value for {kind:?} operand: {value:?}")]
    UnsupportedValue { kind: OperandKind, value: RawValue },
    #[error("failed to resolve {kind:?} operand token: {source}")]
    Unresolved {
        kind: OperandKind,
        #[source]
        source: ResolveError,
    },
}

/// The single decoded argument of one instruction.
///
/// An operand is created empty for a kind and a metadata context, then bound
/// to a value with [`Operand::assign`], which validates the raw value against
/// the kind and resolves reference kinds through the given [`Resolver`].
/// Binding builds a new operand, so a rejected value can never leave one half
/// assigned.
#[derive(Debug, Clone)]
pub struct Operand {
    kind: OperandKind,
    context: Arc<MetadataContext>,
    value: Option<OperandValue>,
}

impl Operand {
    pub fn new(context: Arc<MetadataContext>, kind: OperandKind) -> Operand {
        Operand {
            kind,
            context,
            value: None,
        }
    }

    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    pub fn context(&self) -> &Arc<MetadataContext> {
        &self.context
    }

    pub fn value(&self) -> Option<&OperandValue> {
        self.value.as_ref()
    }

    /// Encoded size of the operand in bytes.
    ///
    /// For `InlineSwitch` the size depends on the bound value: 4 bytes of
    /// target count plus 4 per target (an unbound switch counts as empty).
    pub fn size(&self) -> usize {
        match self.kind {
            OperandKind::InlineNone => 0,
            OperandKind::InlineBrTarget
            | OperandKind::InlineField
            | OperandKind::InlineI
            | OperandKind::InlineMethod
            | OperandKind::InlineSig
            | OperandKind::InlineString
            | OperandKind::InlineTok
            | OperandKind::InlineType
            | OperandKind::ShortInlineR => 4,
            OperandKind::InlineI8 | OperandKind::InlineR => 8,
            OperandKind::InlineSwitch => {
                let count = match &self.value {
                    Some(OperandValue::Targets(targets)) => targets.len(),
                    _ => 0,
                };
                4 + count * 4
            }
            OperandKind::InlineVar => 2,
            OperandKind::ShortInlineBrTarget
            | OperandKind::ShortInlineI
            | OperandKind::ShortInlineVar => 1,
        }
    }

    /// Validate `raw` against this operand's kind and build the operand that
    /// binds it.
    ///
    /// Unsigned integers of the matching width are reinterpreted bit-for-bit
    /// as signed. Token-shaped kinds dispatch on the token's table tag and
    /// resolve through `resolver`; `InlineString` is looked up on the owning
    /// context's user-string heap and binds the decoded text. `InlineTok`
    /// accepts whichever entity the generic resolve returns. Everything else
    /// is rejected, and `self` is left untouched either way.
    #[tracing::instrument(skip(resolver))]
    pub fn assign(&self, raw: RawValue, resolver: &dyn Resolver) -> Result<Operand, OperandError> {
        let value = self.validate(raw, resolver)?;
        Ok(Operand {
            kind: self.kind,
            context: Arc::clone(&self.context),
            value,
        })
    }

    fn validate(
        &self,
        raw: RawValue,
        resolver: &dyn Resolver,
    ) -> Result<Option<OperandValue>, OperandError> {
        match self.kind {
            OperandKind::InlineNone => match raw {
                RawValue::None => Ok(None),
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineBrTarget | OperandKind::ShortInlineBrTarget => match raw {
                RawValue::Target(target) => Ok(Some(OperandValue::Target(target))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineField => match raw {
                RawValue::Token(token) => match token.kind() {
                    Some(TokenKind::MemberRef) => {
                        let member = resolver
                            .resolve_member(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        match member {
                            MemberRefInfo::Field(info) => {
                                Ok(Some(OperandValue::Entity(Entity::FieldRef(info))))
                            }
                            MemberRefInfo::Method(_) => {
                                Err(self.unsupported(RawValue::Token(token)))
                            }
                        }
                    }
                    Some(TokenKind::Field) => {
                        let info = resolver
                            .resolve_field(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::FieldDef(info))))
                    }
                    _ => Err(self.unsupported(RawValue::Token(token))),
                },
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineI => match raw {
                RawValue::Int32(value) => Ok(Some(OperandValue::Int32(value))),
                RawValue::UInt32(value) => Ok(Some(OperandValue::Int32(value as i32))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineI8 => match raw {
                RawValue::Int64(value) => Ok(Some(OperandValue::Int64(value))),
                RawValue::UInt64(value) => Ok(Some(OperandValue::Int64(value as i64))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineMethod => match raw {
                RawValue::Token(token) => match token.kind() {
                    Some(TokenKind::MemberRef) => {
                        let member = resolver
                            .resolve_member(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        match member {
                            MemberRefInfo::Method(info) => {
                                Ok(Some(OperandValue::Entity(Entity::MethodRef(info))))
                            }
                            MemberRefInfo::Field(_) => {
                                Err(self.unsupported(RawValue::Token(token)))
                            }
                        }
                    }
                    Some(TokenKind::MethodDef) => {
                        let info = resolver
                            .resolve_method(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::MethodDef(info))))
                    }
                    Some(TokenKind::MethodSpec) => {
                        let info = resolver
                            .resolve_method_spec(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::MethodSpec(info))))
                    }
                    _ => Err(self.unsupported(RawValue::Token(token))),
                },
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineR => match raw {
                RawValue::Float64(value) => Ok(Some(OperandValue::Float64(value))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::ShortInlineR => match raw {
                RawValue::Float32(value) => Ok(Some(OperandValue::Float32(value))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineSig => match raw {
                RawValue::Token(token) => match token.kind() {
                    Some(TokenKind::Signature) => {
                        let info = resolver
                            .resolve_signature(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::Signature(info))))
                    }
                    _ => Err(self.unsupported(RawValue::Token(token))),
                },
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineString => match raw {
                RawValue::Token(token) => match token.kind() {
                    Some(TokenKind::UserString) => match self.context.user_string(token) {
                        Some(text) => Ok(Some(OperandValue::String(text.to_string()))),
                        None => Err(self.unresolved(ResolveError::NotFound(token))),
                    },
                    _ => Err(self.unsupported(RawValue::Token(token))),
                },
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineSwitch => match raw {
                RawValue::Targets(targets) => Ok(Some(OperandValue::Targets(targets))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineTok => match raw {
                // Catch-all: any entity shape the generic resolve produces is
                // accepted, only an outright resolution failure rejects.
                RawValue::Token(token) => {
                    let entity = resolver
                        .resolve_any(token, &self.context)
                        .map_err(|source| self.unresolved(source))?;
                    Ok(Some(OperandValue::Entity(entity)))
                }
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineType => match raw {
                RawValue::Token(token) => match token.kind() {
                    Some(TokenKind::TypeDef) => {
                        let info = resolver
                            .resolve_type_def(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::TypeDef(info))))
                    }
                    Some(TokenKind::TypeRef) => {
                        let info = resolver
                            .resolve_type_ref(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::TypeRef(info))))
                    }
                    Some(TokenKind::TypeSpec) => {
                        let info = resolver
                            .resolve_type_spec(token, &self.context)
                            .map_err(|source| self.unresolved(source))?;
                        Ok(Some(OperandValue::Entity(Entity::TypeSpec(info))))
                    }
                    _ => Err(self.unsupported(RawValue::Token(token))),
                },
                other => Err(self.unsupported(other)),
            },
            OperandKind::InlineVar => match raw {
                RawValue::Int16(value) => Ok(Some(OperandValue::Int16(value))),
                RawValue::UInt16(value) => Ok(Some(OperandValue::Int16(value as i16))),
                other => Err(self.unsupported(other)),
            },
            OperandKind::ShortInlineI | OperandKind::ShortInlineVar => match raw {
                RawValue::Int8(value) => Ok(Some(OperandValue::Int8(value))),
                RawValue::UInt8(value) => Ok(Some(OperandValue::Int8(value as i8))),
                other => Err(self.unsupported(other)),
            },
        }
    }

    fn unsupported(&self, value: RawValue) -> OperandError {
        OperandError::UnsupportedValue {
            kind: self.kind,
            value,
        }
    }

    fn unresolved(&self, source: ResolveError) -> OperandError {
        OperandError::Unresolved {
            kind: self.kind,
            source,
        }
    }

    pub fn as_target(&self) -> BranchTarget {
        match &self.value {
            Some(OperandValue::Target(target)) => *target,
            other => panic!("operand does not hold a branch target: {:?}", other),
        }
    }

    pub fn as_targets(&self) -> &[BranchTarget] {
        match &self.value {
            Some(OperandValue::Targets(targets)) => targets,
            other => panic!("operand does not hold a switch table: {:?}", other),
        }
    }

    pub fn as_int8(&self) -> i8 {
        match &self.value {
            Some(OperandValue::Int8(value)) => *value,
            other => panic!("operand does not hold an int8: {:?}", other),
        }
    }

    pub fn as_int16(&self) -> i16 {
        match &self.value {
            Some(OperandValue::Int16(value)) => *value,
            other => panic!("operand does not hold an int16: {:?}", other),
        }
    }

    pub fn as_int32(&self) -> i32 {
        match &self.value {
            Some(OperandValue::Int32(value)) => *value,
            other => panic!("operand does not hold an int32: {:?}", other),
        }
    }

    pub fn as_int64(&self) -> i64 {
        match &self.value {
            Some(OperandValue::Int64(value)) => *value,
            other => panic!("operand does not hold an int64: {:?}", other),
        }
    }

    pub fn as_uint8(&self) -> u8 {
        self.as_int8() as u8
    }

    pub fn as_uint16(&self) -> u16 {
        self.as_int16() as u16
    }

    pub fn as_uint32(&self) -> u32 {
        self.as_int32() as u32
    }

    pub fn as_uint64(&self) -> u64 {
        self.as_int64() as u64
    }

    pub fn as_float32(&self) -> f32 {
        match &self.value {
            Some(OperandValue::Float32(value)) => *value,
            other => panic!("operand does not hold a float32: {:?}", other),
        }
    }

    pub fn as_float64(&self) -> f64 {
        match &self.value {
            Some(OperandValue::Float64(value)) => *value,
            other => panic!("operand does not hold a float64: {:?}", other),
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.value {
            Some(OperandValue::String(text)) => text,
            other => panic!("operand does not hold a string: {:?}", other),
        }
    }

    pub fn as_entity(&self) -> &Entity {
        match &self.value {
            Some(OperandValue::Entity(entity)) => entity,
            other => panic!("operand does not hold an entity: {:?}", other),
        }
    }

    pub fn as_field_def(&self) -> &FieldDefInfo {
        match self.as_entity() {
            Entity::FieldDef(info) => info,
            other => panic!("operand does not hold a field definition: {:?}", other),
        }
    }

    pub fn as_field_ref(&self) -> &FieldRefInfo {
        match self.as_entity() {
            Entity::FieldRef(info) => info,
            other => panic!("operand does not hold a field reference: {:?}", other),
        }
    }

    pub fn as_method_def(&self) -> &MethodDefInfo {
        match self.as_entity() {
            Entity::MethodDef(info) => info,
            other => panic!("operand does not hold a method definition: {:?}", other),
        }
    }

    pub fn as_method_ref(&self) -> &MethodRefInfo {
        match self.as_entity() {
            Entity::MethodRef(info) => info,
            other => panic!("operand does not hold a method reference: {:?}", other),
        }
    }

    pub fn as_method_spec(&self) -> &MethodSpecInfo {
        match self.as_entity() {
            Entity::MethodSpec(info) => info,
            other => panic!("operand does not hold a method specification: {:?}", other),
        }
    }

    pub fn as_signature(&self) -> &SignatureInfo {
        match self.as_entity() {
            Entity::Signature(info) => info,
            other => panic!("operand does not hold a standalone signature: {:?}", other),
        }
    }

    pub fn as_type_def(&self) -> &TypeDefInfo {
        match self.as_entity() {
            Entity::TypeDef(info) => info,
            other => panic!("operand does not hold a type definition: {:?}", other),
        }
    }

    pub fn as_type_ref(&self) -> &TypeRefInfo {
        match self.as_entity() {
            Entity::TypeRef(info) => info,
            other => panic!("operand does not hold a type reference: {:?}", other),
        }
    }

    pub fn as_type_spec(&self) -> &TypeSpecInfo {
        match self.as_entity() {
            Entity::TypeSpec(info) => info,
            other => panic!("operand does not hold a type specification: {:?}", other),
        }
    }
}

/// Operands are equal iff kind, owning context (by identity, not by name) and
/// bound value all match.
impl PartialEq for Operand {
    fn eq(&self, other: &Operand) -> bool {
        self.kind == other.kind
            && Arc::ptr_eq(&self.context, &other.context)
            && self.value == other.value
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.value {
            Some(value) => value,
            None => return Ok(()),
        };

        match value {
            OperandValue::Target(target) => write!(f, "{}", target),
            OperandValue::Targets(targets) => {
                write!(f, "(")?;
                for (ix, target) in targets.iter().enumerate() {
                    if ix != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", target)?;
                }
                write!(f, ")")
            }
            OperandValue::Int8(value) => write!(f, "{}", value),
            OperandValue::Int16(value) => write!(f, "{}", value),
            OperandValue::Int32(value) => write!(f, "{}", value),
            OperandValue::Int64(value) => write!(f, "{}", value),
            OperandValue::Float32(value) => write!(f, "{}", value),
            OperandValue::Float64(value) => write!(f, "{}", value),
            OperandValue::String(text) => write!(f, "\"{}\"", text),
            OperandValue::Entity(entity) => write!(f, "{}", entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::resolver::TableResolver;
    use crate::metadata::token::MetadataToken;

    use pretty_assertions::assert_eq;

    fn context() -> Arc<MetadataContext> {
        let mut context = MetadataContext::new("demo".to_string());
        context.add_user_string(1, "hi".to_string());
        Arc::new(context)
    }

    fn resolver() -> TableResolver {
        let mut resolver = TableResolver::new();
        resolver
            .insert(Entity::FieldDef(FieldDefInfo {
                token: MetadataToken::from_parts(TokenKind::Field, 1),
                field_type: "int32".to_string(),
                declaring_type: "Program".to_string(),
                name: "counter".to_string(),
            }))
            .unwrap();
        resolver
            .insert(Entity::FieldRef(FieldRefInfo {
                token: MetadataToken::from_parts(TokenKind::MemberRef, 1),
                field_type: "string".to_string(),
                declaring_type: "System.String".to_string(),
                name: "Empty".to_string(),
            }))
            .unwrap();
        resolver
            .insert(Entity::MethodRef(MethodRefInfo {
                token: MetadataToken::from_parts(TokenKind::MemberRef, 2),
                return_type: "void".to_string(),
                declaring_type: "System.Console".to_string(),
                name: "WriteLine".to_string(),
                params: vec!["string".to_string()],
            }))
            .unwrap();
        resolver
            .insert(Entity::MethodDef(MethodDefInfo {
                token: MetadataToken::from_parts(TokenKind::MethodDef, 1),
                return_type: "void".to_string(),
                declaring_type: "Program".to_string(),
                name: "Main".to_string(),
                params: vec![],
            }))
            .unwrap();
        resolver
            .insert(Entity::MethodSpec(MethodSpecInfo {
                token: MetadataToken::from_parts(TokenKind::MethodSpec, 1),
                return_type: "void".to_string(),
                declaring_type: "Program".to_string(),
                name: "Run".to_string(),
                type_args: vec!["int32".to_string()],
                params: vec![],
            }))
            .unwrap();
        resolver
            .insert(Entity::Signature(SignatureInfo {
                token: MetadataToken::from_parts(TokenKind::Signature, 1),
                text: "void(int32)".to_string(),
            }))
            .unwrap();
        resolver
            .insert(Entity::TypeDef(TypeDefInfo {
                token: MetadataToken::from_parts(TokenKind::TypeDef, 1),
                namespace: "".to_string(),
                name: "Program".to_string(),
            }))
            .unwrap();
        resolver
            .insert(Entity::TypeRef(TypeRefInfo {
                token: MetadataToken::from_parts(TokenKind::TypeRef, 1),
                namespace: "System".to_string(),
                name: "Object".to_string(),
            }))
            .unwrap();
        resolver
            .insert(Entity::TypeSpec(TypeSpecInfo {
                token: MetadataToken::from_parts(TokenKind::TypeSpec, 1),
                signature: "int32[]".to_string(),
            }))
            .unwrap();
        resolver
    }

    fn target(offset: u32) -> BranchTarget {
        BranchTarget { offset }
    }

    #[test]
    fn test_fixed_sizes() {
        let context = context();
        let tests = vec![
            (OperandKind::InlineNone, 0),
            (OperandKind::InlineBrTarget, 4),
            (OperandKind::ShortInlineBrTarget, 1),
            (OperandKind::InlineField, 4),
            (OperandKind::InlineI, 4),
            (OperandKind::ShortInlineI, 1),
            (OperandKind::InlineI8, 8),
            (OperandKind::InlineMethod, 4),
            (OperandKind::InlineR, 8),
            (OperandKind::ShortInlineR, 4),
            (OperandKind::InlineSig, 4),
            (OperandKind::InlineString, 4),
            (OperandKind::InlineTok, 4),
            (OperandKind::InlineType, 4),
            (OperandKind::InlineVar, 2),
            (OperandKind::ShortInlineVar, 1),
        ];

        for (kind, expected) in tests {
            assert_eq!(Operand::new(Arc::clone(&context), kind).size(), expected);
        }
    }

    #[test]
    fn test_switch_size_tracks_target_count() {
        let context = context();
        let resolver = resolver();
        let empty = Operand::new(Arc::clone(&context), OperandKind::InlineSwitch);
        assert_eq!(empty.size(), 4);

        let bound = empty
            .assign(RawValue::Targets(vec![]), &resolver)
            .unwrap();
        assert_eq!(bound.size(), 4);

        let bound = empty
            .assign(
                RawValue::Targets(vec![target(1), target(2), target(3)]),
                &resolver,
            )
            .unwrap();
        assert_eq!(bound.size(), 16);
    }

    #[test]
    fn test_none_rejects_everything_else() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineNone);

        let accepted = operand.assign(RawValue::None, &resolver).unwrap();
        assert_eq!(accepted.value(), None);
        assert_eq!(accepted.size(), 0);
        assert_eq!(accepted.to_string(), "");

        let rejected = operand.assign(RawValue::Int32(1), &resolver);
        assert_eq!(
            rejected,
            Err(OperandError::UnsupportedValue {
                kind: OperandKind::InlineNone,
                value: RawValue::Int32(1),
            })
        );
    }

    #[test]
    fn test_branch_target() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineBrTarget);

        let bound = operand
            .assign(RawValue::Target(target(0x2a)), &resolver)
            .unwrap();
        assert_eq!(bound.as_target(), target(0x2a));
        assert_eq!(bound.to_string(), "IL_002A");

        assert!(operand.assign(RawValue::Int32(0x2a), &resolver).is_err());
    }

    #[test]
    fn test_switch_render() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineSwitch);

        let bound = operand
            .assign(
                RawValue::Targets(vec![target(0x01), target(0x0f), target(0x20)]),
                &resolver,
            )
            .unwrap();
        assert_eq!(bound.to_string(), "(IL_0001, IL_000F, IL_0020)");
        assert_eq!(bound.as_targets().len(), 3);

        let empty = operand.assign(RawValue::Targets(vec![]), &resolver).unwrap();
        assert_eq!(empty.to_string(), "()");
    }

    #[test]
    fn test_integer_kinds_accept_matching_width_only() {
        let context = context();
        let resolver = resolver();

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineI);
        assert_eq!(
            operand.assign(RawValue::Int32(42), &resolver).unwrap().as_int32(),
            42
        );
        assert!(operand.assign(RawValue::Int64(42), &resolver).is_err());
        assert!(operand.assign(RawValue::Int8(42), &resolver).is_err());

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineI8);
        assert_eq!(
            operand.assign(RawValue::Int64(-7), &resolver).unwrap().as_int64(),
            -7
        );
        assert!(operand.assign(RawValue::Int32(-7), &resolver).is_err());

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineVar);
        assert_eq!(
            operand.assign(RawValue::Int16(3), &resolver).unwrap().as_int16(),
            3
        );
        assert!(operand.assign(RawValue::UInt8(3), &resolver).is_err());
    }

    #[test]
    fn test_unsigned_reinterpretation_preserves_bits() {
        let context = context();
        let resolver = resolver();

        let operand = Operand::new(Arc::clone(&context), OperandKind::ShortInlineVar);
        let bound = operand.assign(RawValue::UInt8(255), &resolver).unwrap();
        assert_eq!(bound.as_int8(), -1);
        assert_eq!(bound.as_uint8(), 255);

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineI);
        let bound = operand
            .assign(RawValue::UInt32(4_294_967_295), &resolver)
            .unwrap();
        assert_eq!(bound.as_int32(), -1);
        assert_eq!(bound.as_uint32(), 4_294_967_295);

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineVar);
        let bound = operand.assign(RawValue::UInt16(65_535), &resolver).unwrap();
        assert_eq!(bound.as_int16(), -1);

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineI8);
        let bound = operand
            .assign(RawValue::UInt64(u64::MAX), &resolver)
            .unwrap();
        assert_eq!(bound.as_int64(), -1);
    }

    #[test]
    fn test_float_kinds_do_not_coerce() {
        let context = context();
        let resolver = resolver();

        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineR);
        let bound = operand.assign(RawValue::Float64(3.5), &resolver).unwrap();
        assert_eq!(bound.as_float64(), 3.5);
        assert_eq!(bound.to_string(), "3.5");
        assert!(operand.assign(RawValue::Float32(3.5), &resolver).is_err());

        let operand = Operand::new(Arc::clone(&context), OperandKind::ShortInlineR);
        let bound = operand.assign(RawValue::Float32(0.25), &resolver).unwrap();
        assert_eq!(bound.as_float32(), 0.25);
        assert!(operand.assign(RawValue::Float64(0.25), &resolver).is_err());
    }

    #[test]
    fn test_field_kind_resolves_definitions_and_references() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineField);

        let field_def = MetadataToken::from_parts(TokenKind::Field, 1);
        let bound = operand
            .assign(RawValue::Token(field_def), &resolver)
            .unwrap();
        assert_eq!(bound.as_field_def().name, "counter");
        assert_eq!(bound.to_string(), "int32 Program::counter");

        let field_ref = MetadataToken::from_parts(TokenKind::MemberRef, 1);
        let bound = operand
            .assign(RawValue::Token(field_ref), &resolver)
            .unwrap();
        assert_eq!(bound.as_field_ref().name, "Empty");

        // A member reference that resolves to a method is the wrong shape.
        let method_ref = MetadataToken::from_parts(TokenKind::MemberRef, 2);
        assert_eq!(
            operand.assign(RawValue::Token(method_ref), &resolver),
            Err(OperandError::UnsupportedValue {
                kind: OperandKind::InlineField,
                value: RawValue::Token(method_ref),
            })
        );

        let type_def = MetadataToken::from_parts(TokenKind::TypeDef, 1);
        assert!(operand.assign(RawValue::Token(type_def), &resolver).is_err());
    }

    #[test]
    fn test_method_kind_resolves_all_three_shapes() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineMethod);

        let method_def = MetadataToken::from_parts(TokenKind::MethodDef, 1);
        let bound = operand
            .assign(RawValue::Token(method_def), &resolver)
            .unwrap();
        assert_eq!(bound.as_method_def().name, "Main");

        let method_ref = MetadataToken::from_parts(TokenKind::MemberRef, 2);
        let bound = operand
            .assign(RawValue::Token(method_ref), &resolver)
            .unwrap();
        assert_eq!(bound.to_string(), "void System.Console::WriteLine(string)");

        let method_spec = MetadataToken::from_parts(TokenKind::MethodSpec, 1);
        let bound = operand
            .assign(RawValue::Token(method_spec), &resolver)
            .unwrap();
        assert_eq!(bound.as_method_spec().type_args, vec!["int32".to_string()]);
        assert_eq!(bound.to_string(), "void Program::Run<int32>()");

        // A member reference that resolves to a field is the wrong shape.
        let field_ref = MetadataToken::from_parts(TokenKind::MemberRef, 1);
        assert!(operand.assign(RawValue::Token(field_ref), &resolver).is_err());
    }

    #[test]
    fn test_type_kind_resolves_def_ref_and_spec() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineType);

        let tests = vec![
            (MetadataToken::from_parts(TokenKind::TypeDef, 1), "Program"),
            (
                MetadataToken::from_parts(TokenKind::TypeRef, 1),
                "System.Object",
            ),
            (MetadataToken::from_parts(TokenKind::TypeSpec, 1), "int32[]"),
        ];
        for (token, expected) in tests {
            let bound = operand.assign(RawValue::Token(token), &resolver).unwrap();
            assert_eq!(bound.to_string(), expected);
        }

        let field = MetadataToken::from_parts(TokenKind::Field, 1);
        assert!(operand.assign(RawValue::Token(field), &resolver).is_err());
    }

    #[test]
    fn test_signature_kind() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineSig);

        let signature = MetadataToken::from_parts(TokenKind::Signature, 1);
        let bound = operand
            .assign(RawValue::Token(signature), &resolver)
            .unwrap();
        assert_eq!(bound.as_signature().text, "void(int32)");

        let method_def = MetadataToken::from_parts(TokenKind::MethodDef, 1);
        assert!(operand
            .assign(RawValue::Token(method_def), &resolver)
            .is_err());
    }

    #[test]
    fn test_string_kind_stores_decoded_text() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineString);

        let token = MetadataToken::from_parts(TokenKind::UserString, 1);
        let bound = operand.assign(RawValue::Token(token), &resolver).unwrap();
        assert_eq!(bound.as_str(), "hi");
        assert_eq!(bound.to_string(), "\"hi\"");

        let missing = MetadataToken::from_parts(TokenKind::UserString, 2);
        assert_eq!(
            operand.assign(RawValue::Token(missing), &resolver),
            Err(OperandError::Unresolved {
                kind: OperandKind::InlineString,
                source: ResolveError::NotFound(missing),
            })
        );
    }

    #[test]
    fn test_token_kind_accepts_any_resolved_shape() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineTok);

        // Unlike the whitelisting kinds, ldtoken takes whatever comes back.
        let tests = vec![
            MetadataToken::from_parts(TokenKind::Field, 1),
            MetadataToken::from_parts(TokenKind::MemberRef, 1),
            MetadataToken::from_parts(TokenKind::MemberRef, 2),
            MetadataToken::from_parts(TokenKind::MethodDef, 1),
            MetadataToken::from_parts(TokenKind::TypeDef, 1),
            MetadataToken::from_parts(TokenKind::TypeSpec, 1),
        ];
        for token in tests {
            let bound = operand.assign(RawValue::Token(token), &resolver).unwrap();
            assert_eq!(bound.as_entity().token(), token);
        }

        let unresolvable = MetadataToken::from_parts(TokenKind::UserString, 1);
        assert_eq!(
            operand.assign(RawValue::Token(unresolvable), &resolver),
            Err(OperandError::Unresolved {
                kind: OperandKind::InlineTok,
                source: ResolveError::NotResolvable(unresolvable),
            })
        );
    }

    #[test]
    fn test_rejection_preserves_prior_binding() {
        let context = context();
        let resolver = resolver();
        let operand = Operand::new(Arc::clone(&context), OperandKind::InlineI);
        let bound = operand.assign(RawValue::Int32(42), &resolver).unwrap();

        assert!(bound.assign(RawValue::Float64(1.0), &resolver).is_err());
        assert_eq!(bound.as_int32(), 42);
    }

    #[test]
    fn test_render_round_trips() {
        let context = context();
        let resolver = resolver();

        let bound = Operand::new(Arc::clone(&context), OperandKind::InlineI)
            .assign(RawValue::Int32(42), &resolver)
            .unwrap();
        assert_eq!(bound.to_string(), "42");

        let bound = Operand::new(Arc::clone(&context), OperandKind::ShortInlineI)
            .assign(RawValue::Int8(-3), &resolver)
            .unwrap();
        assert_eq!(bound.to_string(), "-3");
    }

    #[test]
    fn test_equality_requires_same_context_identity() {
        let context_a = context();
        let context_b = context();
        let resolver = resolver();

        let a = Operand::new(Arc::clone(&context_a), OperandKind::InlineI)
            .assign(RawValue::Int32(1), &resolver)
            .unwrap();
        let a2 = Operand::new(Arc::clone(&context_a), OperandKind::InlineI)
            .assign(RawValue::Int32(1), &resolver)
            .unwrap();
        let b = Operand::new(Arc::clone(&context_b), OperandKind::InlineI)
            .assign(RawValue::Int32(1), &resolver)
            .unwrap();

        assert_eq!(a, a);
        assert_eq!(a, a2);
        assert_eq!(a2, a);
        // Same kind and value, different metadata source.
        assert_ne!(a, b);

        let different_value = Operand::new(Arc::clone(&context_a), OperandKind::InlineI)
            .assign(RawValue::Int32(2), &resolver)
            .unwrap();
        assert_ne!(a, different_value);
    }

    #[test]
    #[should_panic(expected = "operand does not hold an int32")]
    fn test_accessor_mismatch_panics() {
        let context = context();
        let resolver = resolver();
        let bound = Operand::new(Arc::clone(&context), OperandKind::InlineR)
            .assign(RawValue::Float64(1.0), &resolver)
            .unwrap();
        bound.as_int32();
    }
}
