//! Literal reference vectors shared across OptionVault implementations.

use alloy_primitives::U256;
use optionvault_core::{Eip712Domain, WriteOptionQuote};

/// Hardhat development account #1. Well known, never to be funded.
pub const REFERENCE_PRIVATE_KEY: &str =
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

/// Address derived from [`REFERENCE_PRIVATE_KEY`].
pub const REFERENCE_SIGNER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Expected EIP-712 message hash for the reference quote (lowercase hex,
/// no prefix).
pub const REFERENCE_MESSAGE_HASH: &str =
    "a093d151c7dbd0564ba51e99baa52e7ac611e0b709837063543bc73fdc76b98e";

/// Expected 65-byte signature for the reference quote (lowercase hex, no
/// prefix).
pub const REFERENCE_SIGNATURE: &str =
    "3b74cdaac8dbb1cdbcefea7b9fb5cc008fadff0b7263530bbeef321f2b7f51c4\
     1df6a318c611087d5393e9e86d5bfa006499c713b4a36c8f9632400f476a8886\
     1c";

/// One fixed domain + quote + key with its expected outputs.
#[derive(Debug, Clone)]
pub struct ReferenceVector {
    pub domain: Eip712Domain,
    pub quote: WriteOptionQuote,
    pub private_key: &'static str,
    pub expected_message_hash: &'static str,
    pub expected_signature: &'static str,
    pub expected_signer: &'static str,
}

impl ReferenceVector {
    /// The static OptionVault cross-implementation vector.
    pub fn option_vault() -> Self {
        let quote = WriteOptionQuote {
            strike: U256::from(4_200_000_000u64), // 4200 USDC (6 decimals)
            expiry: U256::from(1_735_689_600u64), // 2025-01-01 00:00:00 UTC
            premium_per_unit: U256::from(150_000_000u64), // 150 USDC
            min_deposit: U256::from(1_000_000_000_000_000_000u128), // 1 WETH
            max_deposit: U256::from(10_000_000_000_000_000_000u128), // 10 WETH
            valid_until: U256::from(1_735_689_600u64),
            quote_id: U256::from(1u64),
        };

        Self {
            domain: Eip712Domain::option_vault(),
            quote,
            private_key: REFERENCE_PRIVATE_KEY,
            expected_message_hash: REFERENCE_MESSAGE_HASH,
            expected_signature: REFERENCE_SIGNATURE,
            expected_signer: REFERENCE_SIGNER,
        }
    }
}
