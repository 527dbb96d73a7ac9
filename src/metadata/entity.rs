use std::fmt;

use crate::metadata::token::MetadataToken;

/// A type defined in the current metadata source.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct TypeDefInfo {
    pub token: MetadataToken,
    /// Namespace of the type (e.g. `System`), empty for the global namespace
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for TypeDefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type_name(f, &self.namespace, &self.name)
    }
}

/// A type defined in another metadata source and referenced from this one.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct TypeRefInfo {
    pub token: MetadataToken,
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for TypeRefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type_name(f, &self.namespace, &self.name)
    }
}

/// A constructed type described by a signature blob (arrays, generic
/// instantiations, pointers), kept in its textual form.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct TypeSpecInfo {
    pub token: MetadataToken,
    /// Textual form of the signature, e.g. `int32[]`
    pub signature: String,
}

impl fmt::Display for TypeSpecInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature)
    }
}

/// A field defined in the current metadata source.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct FieldDefInfo {
    pub token: MetadataToken,
    pub field_type: String,
    pub declaring_type: String,
    pub name: String,
}

impl fmt::Display for FieldDefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}::{}", self.field_type, self.declaring_type, self.name)
    }
}

/// A field of a type in another metadata source, reached through a
/// member reference.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct FieldRefInfo {
    pub token: MetadataToken,
    pub field_type: String,
    pub declaring_type: String,
    pub name: String,
}

impl fmt::Display for FieldRefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}::{}", self.field_type, self.declaring_type, self.name)
    }
}

/// A method defined in the current metadata source.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct MethodDefInfo {
    pub token: MetadataToken,
    pub return_type: String,
    pub declaring_type: String,
    pub name: String,
    pub params: Vec<String>,
}

impl fmt::Display for MethodDefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_method(
            f,
            &self.return_type,
            &self.declaring_type,
            &self.name,
            &[],
            &self.params,
        )
    }
}

/// A method of a type in another metadata source, reached through a
/// member reference.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct MethodRefInfo {
    pub token: MetadataToken,
    pub return_type: String,
    pub declaring_type: String,
    pub name: String,
    pub params: Vec<String>,
}

impl fmt::Display for MethodRefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_method(
            f,
            &self.return_type,
            &self.declaring_type,
            &self.name,
            &[],
            &self.params,
        )
    }
}

/// A generic method instantiation.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct MethodSpecInfo {
    pub token: MetadataToken,
    pub return_type: String,
    pub declaring_type: String,
    pub name: String,
    pub type_args: Vec<String>,
    pub params: Vec<String>,
}

impl fmt::Display for MethodSpecInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_method(
            f,
            &self.return_type,
            &self.declaring_type,
            &self.name,
            &self.type_args,
            &self.params,
        )
    }
}

/// A standalone signature (the callee description of `calli`), kept in its
/// textual form.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct SignatureInfo {
    pub token: MetadataToken,
    /// Textual form of the signature, e.g. `void(int32)`
    pub text: String,
}

impl fmt::Display for SignatureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A resolved member reference. The `MemberRef` table holds both field and
/// method references; the row's signature decides which shape comes back.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub enum MemberRefInfo {
    Field(FieldRefInfo),
    Method(MethodRefInfo),
}

impl MemberRefInfo {
    pub fn token(&self) -> MetadataToken {
        match self {
            MemberRefInfo::Field(info) => info.token,
            MemberRefInfo::Method(info) => info.token,
        }
    }
}

impl fmt::Display for MemberRefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRefInfo::Field(info) => write!(f, "{}", info),
            MemberRefInfo::Method(info) => write!(f, "{}", info),
        }
    }
}

/// Any resolved program entity an operand can end up holding.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub enum Entity {
    FieldDef(FieldDefInfo),
    FieldRef(FieldRefInfo),
    MethodDef(MethodDefInfo),
    MethodRef(MethodRefInfo),
    MethodSpec(MethodSpecInfo),
    Signature(SignatureInfo),
    TypeDef(TypeDefInfo),
    TypeRef(TypeRefInfo),
    TypeSpec(TypeSpecInfo),
}

impl Entity {
    pub fn token(&self) -> MetadataToken {
        match self {
            Entity::FieldDef(info) => info.token,
            Entity::FieldRef(info) => info.token,
            Entity::MethodDef(info) => info.token,
            Entity::MethodRef(info) => info.token,
            Entity::MethodSpec(info) => info.token,
            Entity::Signature(info) => info.token,
            Entity::TypeDef(info) => info.token,
            Entity::TypeRef(info) => info.token,
            Entity::TypeSpec(info) => info.token,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::FieldDef(info) => write!(f, "{}", info),
            Entity::FieldRef(info) => write!(f, "{}", info),
            Entity::MethodDef(info) => write!(f, "{}", info),
            Entity::MethodRef(info) => write!(f, "{}", info),
            Entity::MethodSpec(info) => write!(f, "{}", info),
            Entity::Signature(info) => write!(f, "{}", info),
            Entity::TypeDef(info) => write!(f, "{}", info),
            Entity::TypeRef(info) => write!(f, "{}", info),
            Entity::TypeSpec(info) => write!(f, "{}", info),
        }
    }
}

fn write_type_name(f: &mut fmt::Formatter<'_>, namespace: &str, name: &str) -> fmt::Result {
    if namespace.is_empty() {
        write!(f, "{}", name)
    } else {
        write!(f, "{}.{}", namespace, name)
    }
}

fn write_method(
    f: &mut fmt::Formatter<'_>,
    return_type: &str,
    declaring_type: &str,
    name: &str,
    type_args: &[String],
    params: &[String],
) -> fmt::Result {
    write!(f, "{} {}::{}", return_type, declaring_type, name)?;
    if !type_args.is_empty() {
        write!(f, "<{}>", type_args.join(", "))?;
    }
    write!(f, "({})", params.join(", "))
}
