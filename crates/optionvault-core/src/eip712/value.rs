//! Struct values: concrete field data conforming to a [`TypeDefinition`].
//!
//! Values arrive either programmatically (via [`StructValue::with_field`])
//! or as a JSON document matching the declared type, in which case every
//! conversion failure maps onto the crate error taxonomy before any
//! hashing happens.

use alloy_primitives::{Address, I256, U256};
use serde_json::Value;

use super::encoder::{classify, Elementary, TypeKind};
use super::registry::TypeRegistry;
use crate::error::{Error, Result};

/// A concrete value for one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Uint(U256),
    Int(I256),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
    /// A nested struct value; encoded as the referenced type's struct hash.
    Struct(StructValue),
}

impl FieldValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FieldValue::Uint(_) => "uint",
            FieldValue::Int(_) => "int",
            FieldValue::Address(_) => "address",
            FieldValue::Bool(_) => "bool",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::String(_) => "string",
            FieldValue::Struct(_) => "struct",
        }
    }
}

/// An ordered mapping from field name to value for one struct type.
///
/// Field order must match the type definition 1:1; `struct_hash` rejects
/// any mismatch as an encoding error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructValue {
    type_name: String,
    fields: Vec<(String, FieldValue)>,
}

impl StructValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, consuming and returning the value for chaining.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Build a struct value from a JSON object.
    ///
    /// JSON objects carry no field order, so the declared order is imposed
    /// here; the object must contain exactly the declared field set.
    pub fn from_json(registry: &TypeRegistry, type_name: &str, json: &Value) -> Result<Self> {
        let def = registry.get(type_name)?;
        let obj = json.as_object().ok_or_else(|| {
            Error::Encoding(format!("expected a JSON object for {type_name}"))
        })?;

        if obj.len() != def.fields.len() {
            return Err(Error::Encoding(format!(
                "{type_name} declares {} fields, document has {}",
                def.fields.len(),
                obj.len()
            )));
        }

        let mut value = StructValue::new(type_name);
        for field in &def.fields {
            let raw = obj.get(&field.name).ok_or_else(|| {
                Error::Encoding(format!("missing field {} in {type_name}", field.name))
            })?;
            value.push(
                field.name.clone(),
                field_value_from_json(registry, &field.ty, raw)?,
            );
        }
        Ok(value)
    }
}

fn field_value_from_json(registry: &TypeRegistry, ty: &str, raw: &Value) -> Result<FieldValue> {
    match classify(ty)? {
        TypeKind::Struct => Ok(FieldValue::Struct(StructValue::from_json(
            registry, ty, raw,
        )?)),
        TypeKind::Elementary(elem) => match elem {
            Elementary::Uint(_) => Ok(FieldValue::Uint(parse_uint(ty, raw)?)),
            Elementary::Int(_) => Ok(FieldValue::Int(parse_int(ty, raw)?)),
            Elementary::Address => {
                let s = expect_str(ty, raw)?;
                let address = s.parse::<Address>().map_err(|e| {
                    Error::Encoding(format!("invalid address {s:?}: {e}"))
                })?;
                Ok(FieldValue::Address(address))
            }
            Elementary::Bool => raw
                .as_bool()
                .map(FieldValue::Bool)
                .ok_or_else(|| Error::Encoding(format!("expected a boolean for {ty}"))),
            Elementary::Bytes | Elementary::FixedBytes(_) => {
                let s = expect_str(ty, raw)?;
                let bytes = hex::decode(s.trim_start_matches("0x")).map_err(|e| {
                    Error::Encoding(format!("invalid hex for {ty}: {e}"))
                })?;
                Ok(FieldValue::Bytes(bytes))
            }
            Elementary::String => Ok(FieldValue::String(expect_str(ty, raw)?.to_string())),
        },
    }
}

fn expect_str<'a>(ty: &str, raw: &'a Value) -> Result<&'a str> {
    raw.as_str()
        .ok_or_else(|| Error::Encoding(format!("expected a string for {ty}")))
}

/// Parse an unsigned integer from a JSON number, decimal string, or
/// `0x`-prefixed hex string. Overflow of the 256-bit word is a range
/// error, not a silent truncation.
pub(crate) fn parse_uint(ty: &str, raw: &Value) -> Result<U256> {
    if let Some(n) = raw.as_u64() {
        return Ok(U256::from(n));
    }
    if let Some(s) = raw.as_str() {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix("0x") {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return U256::from_str_radix(digits, 16).map_err(|_| Error::Range {
                    ty: ty.to_string(),
                    value: s.to_string(),
                });
            }
        } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return U256::from_str_radix(s, 10).map_err(|_| Error::Range {
                ty: ty.to_string(),
                value: s.to_string(),
            });
        }
    }
    Err(Error::Encoding(format!(
        "expected an unsigned integer for {ty}"
    )))
}

fn parse_int(ty: &str, raw: &Value) -> Result<I256> {
    if let Some(n) = raw.as_i64() {
        return I256::try_from(n)
            .map_err(|_| Error::Encoding(format!("expected a signed integer for {ty}")));
    }
    if let Some(s) = raw.as_str() {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            let magnitude = U256::from_str_radix(digits, 10).map_err(|_| Error::Range {
                ty: ty.to_string(),
                value: s.to_string(),
            })?;
            // int256 minimum has a magnitude one past I256::MAX.
            if negative && magnitude == U256::from(1u8) << 255 {
                return Ok(I256::MIN);
            }
            let value = I256::try_from(magnitude).map_err(|_| Error::Range {
                ty: ty.to_string(),
                value: s.to_string(),
            })?;
            return Ok(if negative { -value } else { value });
        }
    }
    Err(Error::Encoding(format!(
        "expected a signed integer for {ty}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::registry::TypeDefinition;
    use serde_json::json;

    fn quote_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new(
            "Sample",
            &[
                ("amount", "uint256"),
                ("owner", "address"),
                ("live", "bool"),
                ("note", "string"),
            ],
        ));
        registry
    }

    #[test]
    fn test_from_json_preserves_declaration_order() {
        let registry = quote_registry();
        // JSON object key order is irrelevant; declaration order wins.
        let doc = json!({
            "note": "hello",
            "live": true,
            "owner": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "amount": 42u64,
        });

        let value = StructValue::from_json(&registry, "Sample", &doc).unwrap();
        let names: Vec<&str> = value.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["amount", "owner", "live", "note"]);
        assert_eq!(value.get("amount"), Some(&FieldValue::Uint(U256::from(42u64))));
    }

    #[test]
    fn test_from_json_missing_field() {
        let registry = quote_registry();
        let doc = json!({ "amount": 1u64, "owner": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "live": true });

        assert!(matches!(
            StructValue::from_json(&registry, "Sample", &doc).unwrap_err(),
            Error::Encoding(_)
        ));
    }

    #[test]
    fn test_from_json_extra_field_rejected() {
        let registry = quote_registry();
        let doc = json!({
            "amount": 1u64,
            "owner": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "live": true,
            "note": "x",
            "bonus": 7u64,
        });

        assert!(matches!(
            StructValue::from_json(&registry, "Sample", &doc).unwrap_err(),
            Error::Encoding(_)
        ));
    }

    #[test]
    fn test_uint256_overflow_is_range_error() {
        let registry = quote_registry();
        // 2^256, one past the largest representable uint256.
        let doc = json!({
            "amount": "115792089237316195423570985008687907853269984665640564039457584007913129639936",
            "owner": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "live": true,
            "note": "x",
        });

        assert!(matches!(
            StructValue::from_json(&registry, "Sample", &doc).unwrap_err(),
            Error::Range { .. }
        ));
    }

    #[test]
    fn test_uint_decimal_string_and_hex_string() {
        let registry = quote_registry();
        let decimal = json!({
            "amount": "1000000000000000000",
            "owner": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "live": false,
            "note": "",
        });
        let value = StructValue::from_json(&registry, "Sample", &decimal).unwrap();
        assert_eq!(
            value.get("amount"),
            Some(&FieldValue::Uint(U256::from(1_000_000_000_000_000_000u128)))
        );

        assert_eq!(parse_uint("uint256", &json!("0xff")).unwrap(), U256::from(255u64));
    }

    #[test]
    fn test_bad_address_is_encoding_error() {
        let registry = quote_registry();
        let doc = json!({
            "amount": 1u64,
            "owner": "0x1234",
            "live": true,
            "note": "x",
        });

        assert!(matches!(
            StructValue::from_json(&registry, "Sample", &doc).unwrap_err(),
            Error::Encoding(_)
        ));
    }

    #[test]
    fn test_nested_struct_from_json() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDefinition::new(
            "Mail",
            &[("from", "Person"), ("contents", "string")],
        ));
        registry.register(TypeDefinition::new(
            "Person",
            &[("name", "string"), ("wallet", "address")],
        ));

        let doc = json!({
            "from": {
                "name": "alice",
                "wallet": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            },
            "contents": "hi",
        });

        let value = StructValue::from_json(&registry, "Mail", &doc).unwrap();
        match value.get("from").unwrap() {
            FieldValue::Struct(inner) => assert_eq!(inner.type_name(), "Person"),
            other => panic!("expected struct, got {}", other.kind()),
        }
    }

    #[test]
    fn test_parse_int_bounds() {
        assert_eq!(parse_int("int256", &json!(-5)).unwrap(), I256::try_from(-5i64).unwrap());
        assert_eq!(
            parse_int(
                "int256",
                &json!("-57896044618658097711785492504343953926634992332820282019728792003956564819968")
            )
            .unwrap(),
            I256::MIN
        );
        assert!(matches!(
            parse_int(
                "int256",
                &json!("57896044618658097711785492504343953926634992332820282019728792003956564819968")
            )
            .unwrap_err(),
            Error::Range { .. }
        ));
    }
}
