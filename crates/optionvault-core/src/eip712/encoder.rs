//! ABI slot encoding and struct hashing.
//!
//! EIP-712 `encodeData` gives every field exactly one 32-byte slot:
//! numeric values are big-endian padded, dynamic `bytes`/`string` values
//! contribute their keccak256 hash, and nested struct values contribute
//! the referenced type's struct hash.

use alloy_primitives::{keccak256, B256, U256};

use super::registry::TypeRegistry;
use super::value::{FieldValue, StructValue};
use crate::error::{Error, Result};

/// Elementary Solidity types the encoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Elementary {
    Uint(usize),
    Int(usize),
    Address,
    Bool,
    Bytes,
    String,
    FixedBytes(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeKind {
    Elementary(Elementary),
    Struct,
}

/// Classify a Solidity type string.
///
/// Anything that does not spell an elementary type is treated as a struct
/// type reference. Malformed elementary spellings (`uint7`, `uint`,
/// `bytes33`) and array types are rejected outright.
pub(crate) fn classify(ty: &str) -> Result<TypeKind> {
    if ty.contains('[') {
        return Err(Error::UnsupportedType(format!("array type {ty}")));
    }

    match ty {
        "address" => return Ok(TypeKind::Elementary(Elementary::Address)),
        "bool" => return Ok(TypeKind::Elementary(Elementary::Bool)),
        "bytes" => return Ok(TypeKind::Elementary(Elementary::Bytes)),
        "string" => return Ok(TypeKind::Elementary(Elementary::String)),
        _ => {}
    }

    if let Some(rest) = ty.strip_prefix("uint") {
        if rest.chars().all(|c| c.is_ascii_digit()) {
            return Ok(TypeKind::Elementary(Elementary::Uint(int_width(ty, rest)?)));
        }
    } else if let Some(rest) = ty.strip_prefix("int") {
        if rest.chars().all(|c| c.is_ascii_digit()) {
            return Ok(TypeKind::Elementary(Elementary::Int(int_width(ty, rest)?)));
        }
    } else if let Some(rest) = ty.strip_prefix("bytes") {
        if rest.chars().all(|c| c.is_ascii_digit()) {
            let width: usize = rest
                .parse()
                .map_err(|_| Error::UnsupportedType(ty.to_string()))?;
            if width == 0 || width > 32 {
                return Err(Error::UnsupportedType(ty.to_string()));
            }
            return Ok(TypeKind::Elementary(Elementary::FixedBytes(width)));
        }
    }

    Ok(TypeKind::Struct)
}

fn int_width(ty: &str, digits: &str) -> Result<usize> {
    let bits: usize = digits
        .parse()
        .map_err(|_| Error::UnsupportedType(ty.to_string()))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(Error::UnsupportedType(ty.to_string()));
    }
    Ok(bits)
}

/// Encode one typed value into its fixed 32-byte slot.
pub fn encode_field(registry: &TypeRegistry, ty: &str, value: &FieldValue) -> Result<B256> {
    match classify(ty)? {
        TypeKind::Elementary(elem) => encode_elementary(ty, elem, value),
        TypeKind::Struct => match value {
            FieldValue::Struct(inner) => {
                if inner.type_name() != ty {
                    return Err(Error::Encoding(format!(
                        "field of type {ty} holds a {} value",
                        inner.type_name()
                    )));
                }
                struct_hash(registry, inner)
            }
            other => Err(shape_mismatch(ty, other)),
        },
    }
}

fn encode_elementary(ty: &str, elem: Elementary, value: &FieldValue) -> Result<B256> {
    match (elem, value) {
        (Elementary::Uint(bits), FieldValue::Uint(v)) => {
            if bits < 256 && v.bit_len() > bits {
                return Err(Error::Range {
                    ty: ty.to_string(),
                    value: v.to_string(),
                });
            }
            Ok(B256::from(*v))
        }
        (Elementary::Int(bits), FieldValue::Int(v)) => {
            if bits < 256 {
                let bound = U256::from(1u8) << (bits - 1);
                let fits = if v.is_negative() {
                    v.unsigned_abs() <= bound
                } else {
                    v.unsigned_abs() < bound
                };
                if !fits {
                    return Err(Error::Range {
                        ty: ty.to_string(),
                        value: v.to_string(),
                    });
                }
            }
            // Two's complement over the full word sign-extends for free.
            Ok(B256::from(v.into_raw()))
        }
        (Elementary::Address, FieldValue::Address(address)) => {
            Ok(B256::left_padding_from(address.as_slice()))
        }
        (Elementary::Bool, FieldValue::Bool(v)) => Ok(B256::left_padding_from(&[*v as u8])),
        (Elementary::Bytes, FieldValue::Bytes(bytes)) => Ok(keccak256(bytes)),
        (Elementary::String, FieldValue::String(s)) => Ok(keccak256(s.as_bytes())),
        (Elementary::FixedBytes(width), FieldValue::Bytes(bytes)) => {
            if bytes.len() != width {
                return Err(Error::Encoding(format!(
                    "{ty} expects {width} bytes, got {}",
                    bytes.len()
                )));
            }
            let mut word = B256::ZERO;
            word[..width].copy_from_slice(bytes);
            Ok(word)
        }
        (_, other) => Err(shape_mismatch(ty, other)),
    }
}

fn shape_mismatch(ty: &str, value: &FieldValue) -> Error {
    Error::Encoding(format!("{} value does not match type {ty}", value.kind()))
}

/// Compute the EIP-712 struct hash:
/// `keccak256(typeHash ++ encodeField(field) for each field in order)`.
///
/// The value's field names must match the registered definition one to one
/// and in declaration order.
pub fn struct_hash(registry: &TypeRegistry, value: &StructValue) -> Result<B256> {
    let def = registry.get(value.type_name())?;
    let fields = value.fields();

    if def.fields.len() != fields.len() {
        return Err(Error::Encoding(format!(
            "{} declares {} fields, value has {}",
            def.name,
            def.fields.len(),
            fields.len()
        )));
    }
    for (field, (name, _)) in def.fields.iter().zip(fields) {
        if &field.name != name {
            return Err(Error::Encoding(format!(
                "field order mismatch in {}: expected {}, got {}",
                def.name, field.name, name
            )));
        }
    }

    let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));
    encoded.extend_from_slice(registry.type_hash(&def.name)?.as_slice());
    for (field, (_, field_value)) in def.fields.iter().zip(fields) {
        encoded.extend_from_slice(encode_field(registry, &field.ty, field_value)?.as_slice());
    }
    Ok(keccak256(&encoded))
}
