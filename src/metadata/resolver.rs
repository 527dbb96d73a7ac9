use std::collections::HashMap;

use thiserror::Error;

use crate::metadata::entity::{
    Entity, FieldDefInfo, MemberRefInfo, MethodDefInfo, MethodSpecInfo, SignatureInfo,
    TypeDefInfo, TypeRefInfo, TypeSpecInfo,
};
use crate::metadata::token::{MetadataToken, TokenKind};
use crate::metadata::MetadataContext;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unresolved token: {0}")]
    NotFound(MetadataToken),
    #[error("token {token} does not resolve to a {expected}")]
    WrongShape {
        token: MetadataToken,
        expected: &'static str,
    },
    #[error("token {0} does not name a resolvable metadata entity")]
    NotResolvable(MetadataToken),
    #[error("token already registered: {0}")]
    AlreadyRegistered(MetadataToken),
}

/// Turns raw metadata tokens into resolved entities.
///
/// One resolution operation per table tag, so callers dispatch on
/// [`MetadataToken::kind`] and ask for exactly the shape the token names.
/// [`Resolver::resolve_any`] is the generic entry point used by `ldtoken`
/// operands, which accept any entity kind.
pub trait Resolver {
    fn resolve_field(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<FieldDefInfo, ResolveError>;

    fn resolve_member(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<MemberRefInfo, ResolveError>;

    fn resolve_method(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<MethodDefInfo, ResolveError>;

    fn resolve_method_spec(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<MethodSpecInfo, ResolveError>;

    fn resolve_signature(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<SignatureInfo, ResolveError>;

    fn resolve_type_def(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<TypeDefInfo, ResolveError>;

    fn resolve_type_ref(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<TypeRefInfo, ResolveError>;

    fn resolve_type_spec(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<TypeSpecInfo, ResolveError>;

    /// Resolve a token of any kind, dispatching on its own table tag.
    fn resolve_any(
        &self,
        token: MetadataToken,
        context: &MetadataContext,
    ) -> Result<Entity, ResolveError> {
        match token.kind() {
            Some(TokenKind::Field) => self.resolve_field(token, context).map(Entity::FieldDef),
            Some(TokenKind::MemberRef) => {
                self.resolve_member(token, context).map(|member| match member {
                    MemberRefInfo::Field(info) => Entity::FieldRef(info),
                    MemberRefInfo::Method(info) => Entity::MethodRef(info),
                })
            }
            Some(TokenKind::MethodDef) => self.resolve_method(token, context).map(Entity::MethodDef),
            Some(TokenKind::MethodSpec) => {
                self.resolve_method_spec(token, context).map(Entity::MethodSpec)
            }
            Some(TokenKind::Signature) => {
                self.resolve_signature(token, context).map(Entity::Signature)
            }
            Some(TokenKind::TypeDef) => self.resolve_type_def(token, context).map(Entity::TypeDef),
            Some(TokenKind::TypeRef) => self.resolve_type_ref(token, context).map(Entity::TypeRef),
            Some(TokenKind::TypeSpec) => {
                self.resolve_type_spec(token, context).map(Entity::TypeSpec)
            }
            Some(TokenKind::UserString) | None => Err(ResolveError::NotResolvable(token)),
        }
    }
}

/// A [`Resolver`] backed by a pre-indexed token table.
///
/// Embedding tools register the entities their metadata reader knows about,
/// keyed by token; resolution is a plain lookup plus a shape check.
#[derive(Debug, Default)]
pub struct TableResolver {
    entities: HashMap<MetadataToken, Entity>,
}

impl TableResolver {
    #[tracing::instrument]
    pub fn new() -> TableResolver {
        TableResolver {
            entities: HashMap::new(),
        }
    }

    #[tracing::instrument]
    pub fn insert(&mut self, entity: Entity) -> Result<(), ResolveError> {
        let token = entity.token();
        if self.entities.contains_key(&token) {
            return Err(ResolveError::AlreadyRegistered(token));
        }
        self.entities.insert(token, entity);
        Ok(())
    }

    #[tracing::instrument]
    pub fn find(&self, token: MetadataToken) -> Option<&Entity> {
        self.entities.get(&token)
    }
}

impl Resolver for TableResolver {
    fn resolve_field(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<FieldDefInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::FieldDef(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "field definition",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_member(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<MemberRefInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::FieldRef(info)) => Ok(MemberRefInfo::Field(info.clone())),
            Some(Entity::MethodRef(info)) => Ok(MemberRefInfo::Method(info.clone())),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "member reference",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_method(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<MethodDefInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::MethodDef(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "method definition",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_method_spec(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<MethodSpecInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::MethodSpec(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "method specification",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_signature(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<SignatureInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::Signature(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "standalone signature",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_type_def(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<TypeDefInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::TypeDef(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "type definition",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_type_ref(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<TypeRefInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::TypeRef(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "type reference",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }

    fn resolve_type_spec(
        &self,
        token: MetadataToken,
        _context: &MetadataContext,
    ) -> Result<TypeSpecInfo, ResolveError> {
        match self.find(token) {
            Some(Entity::TypeSpec(info)) => Ok(info.clone()),
            Some(_) => Err(ResolveError::WrongShape {
                token,
                expected: "type specification",
            }),
            None => Err(ResolveError::NotFound(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn sample_field() -> FieldDefInfo {
        FieldDefInfo {
            token: MetadataToken::from_parts(TokenKind::Field, 1),
            field_type: "int32".to_string(),
            declaring_type: "Program".to_string(),
            name: "counter".to_string(),
        }
    }

    #[test]
    fn test_insert_and_resolve() {
        let context = MetadataContext::new("test".to_string());
        let mut resolver = TableResolver::new();
        let field = sample_field();
        resolver.insert(Entity::FieldDef(field.clone())).unwrap();

        assert_eq!(resolver.resolve_field(field.token, &context), Ok(field));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut resolver = TableResolver::new();
        let field = sample_field();
        resolver.insert(Entity::FieldDef(field.clone())).unwrap();

        assert_eq!(
            resolver.insert(Entity::FieldDef(field.clone())),
            Err(ResolveError::AlreadyRegistered(field.token))
        );
    }

    #[test]
    fn test_wrong_shape() {
        let context = MetadataContext::new("test".to_string());
        let mut resolver = TableResolver::new();
        let field = sample_field();
        resolver.insert(Entity::FieldDef(field.clone())).unwrap();

        assert_eq!(
            resolver.resolve_method(field.token, &context),
            Err(ResolveError::WrongShape {
                token: field.token,
                expected: "method definition",
            })
        );
    }

    #[test]
    fn test_resolve_any_dispatches_on_tag() {
        let context = MetadataContext::new("test".to_string());
        let mut resolver = TableResolver::new();
        let field = sample_field();
        resolver.insert(Entity::FieldDef(field.clone())).unwrap();

        assert_eq!(
            resolver.resolve_any(field.token, &context),
            Ok(Entity::FieldDef(field))
        );

        let missing = MetadataToken::from_parts(TokenKind::TypeDef, 9);
        assert_eq!(
            resolver.resolve_any(missing, &context),
            Err(ResolveError::NotFound(missing))
        );

        let user_string = MetadataToken::from_parts(TokenKind::UserString, 1);
        assert_eq!(
            resolver.resolve_any(user_string, &context),
            Err(ResolveError::NotResolvable(user_string))
        );
    }
}
