//! Struct type definitions and the type registry.
//!
//! A [`TypeDefinition`] fixes a struct's name and ordered field list, which
//! together determine both the canonical type string and the field encoding
//! order. The [`TypeRegistry`] holds the built-in `EIP712Domain` type plus
//! any caller-registered quote types.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{keccak256, B256};

use super::encoder::{classify, TypeKind};
use crate::error::{Error, Result};

/// Name of the built-in domain struct type.
pub const DOMAIN_TYPE_NAME: &str = "EIP712Domain";

/// A single struct field: name plus Solidity type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// An ordered struct type definition.
///
/// Field order is semantically significant: it fixes the canonical type
/// string and the slot order used by `struct_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl TypeDefinition {
    /// Build a definition from `(field_name, solidity_type)` pairs.
    pub fn new(name: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            fields: fields
                .iter()
                .map(|(name, ty)| FieldDef::new(*name, *ty))
                .collect(),
        }
    }

    /// The type's own signature: `"Name(type1 name1,type2 name2,...)"`,
    /// fields in declaration order, no whitespace after commas.
    pub fn signature(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.ty, f.name))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({})", self.name, fields)
    }
}

/// Registry of struct types known to the encoder.
///
/// The registry is read-only after construction-time registration; lookups
/// never mutate it, so shared references are safe across threads.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDefinition>,
}

impl TypeRegistry {
    /// Create a registry with the built-in `EIP712Domain` type registered.
    pub fn new() -> Self {
        let mut registry = Self {
            types: BTreeMap::new(),
        };
        registry.register(TypeDefinition::new(
            DOMAIN_TYPE_NAME,
            &[
                ("name", "string"),
                ("version", "string"),
                ("chainId", "uint256"),
                ("verifyingContract", "address"),
            ],
        ));
        registry
    }

    /// Register a struct type. Replaces any existing definition with the
    /// same name.
    pub fn register(&mut self, def: TypeDefinition) {
        self.types.insert(def.name.clone(), def);
    }

    /// Whether `name` refers to a registered struct type.
    pub fn is_registered(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Look up a registered type definition.
    pub fn get(&self, name: &str) -> Result<&TypeDefinition> {
        self.types
            .get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Canonical type string for `name`.
    ///
    /// The primary type's signature comes first, followed by the signatures
    /// of every transitively referenced struct type sorted alphabetically
    /// by type name (primary excluded from the sort).
    pub fn canonical_type(&self, name: &str) -> Result<String> {
        let primary = self.get(name)?;

        let mut referenced = BTreeSet::new();
        self.collect_references(primary, &mut referenced)?;
        referenced.remove(name);

        let mut canonical = primary.signature();
        for dep in &referenced {
            canonical.push_str(&self.get(dep)?.signature());
        }
        Ok(canonical)
    }

    /// `keccak256` of the canonical type string's raw UTF-8 bytes.
    pub fn type_hash(&self, name: &str) -> Result<B256> {
        Ok(keccak256(self.canonical_type(name)?.as_bytes()))
    }

    fn collect_references(
        &self,
        def: &TypeDefinition,
        seen: &mut BTreeSet<String>,
    ) -> Result<()> {
        for field in &def.fields {
            if let TypeKind::Struct = classify(&field.ty)? {
                let dep = self
                    .types
                    .get(&field.ty)
                    .ok_or_else(|| Error::UnknownType(field.ty.clone()))?;
                if seen.insert(field.ty.clone()) {
                    self.collect_references(dep, seen)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_type_is_builtin() {
        let registry = TypeRegistry::new();
        assert!(registry.is_registered(DOMAIN_TYPE_NAME));
        assert_eq!(
            registry.canonical_type(DOMAIN_TYPE_NAME).unwrap(),
            "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)"
        );
    }

    #[test]
    fn test_signature_has_no_spaces_after_commas() {
        let def = TypeDefinition::new(
            "Transfer",
            &[("from", "address"), ("to", "address"), ("amount", "uint256")],
        );
        assert_eq!(
            def.signature(),
            "Transfer(address from,address to,uint256 amount)"
        );
    }

    #[test]
    fn test_canonical_type_appends_referenced_types_sorted() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new(
            "Mail",
            &[("from", "Person"), ("to", "Person"), ("contents", "string")],
        ));
        registry.register(TypeDefinition::new(
            "Person",
            &[("name", "string"), ("wallet", "address")],
        ));

        assert_eq!(
            registry.canonical_type("Mail").unwrap(),
            "Mail(Person from,Person to,string contents)Person(string name,address wallet)"
        );
    }

    #[test]
    fn test_canonical_type_collects_transitive_references() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new("Outer", &[("inner", "Middle")]));
        registry.register(TypeDefinition::new("Middle", &[("leaf", "Aleaf")]));
        registry.register(TypeDefinition::new("Aleaf", &[("x", "uint256")]));

        // Referenced types sorted alphabetically: Aleaf before Middle.
        assert_eq!(
            registry.canonical_type("Outer").unwrap(),
            "Outer(Middle inner)Middle(Aleaf leaf)Aleaf(uint256 x)"
        );
    }

    #[test]
    fn test_unknown_referenced_type() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new("Mail", &[("from", "Person")]));

        let err = registry.canonical_type("Mail").unwrap_err();
        assert!(matches!(err, Error::UnknownType(name) if name == "Person"));
    }

    #[test]
    fn test_unknown_primary_type() {
        let registry = TypeRegistry::new();
        assert!(matches!(
            registry.canonical_type("Nope").unwrap_err(),
            Error::UnknownType(_)
        ));
    }

    #[test]
    fn test_type_hash_matches_keccak_of_canonical_string() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new("Ping", &[("nonce", "uint256")]));

        assert_eq!(
            registry.type_hash("Ping").unwrap(),
            keccak256(b"Ping(uint256 nonce)")
        );
    }

    #[test]
    fn test_register_replaces_existing_definition() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new("Ping", &[("nonce", "uint256")]));
        registry.register(TypeDefinition::new("Ping", &[("nonce", "uint64")]));

        assert_eq!(
            registry.canonical_type("Ping").unwrap(),
            "Ping(uint64 nonce)"
        );
    }
}
