//! # Deterministic Address Derivation
//!
//! CREATE2 over the minimal-proxy init code, and the zkSync Era variant.

use cl_primitives::{keccak256, keccak256_concat, Address, Hash};

/// Minimal proxy init code preceding the implementation address.
pub const PROXY_PREFIX: [u8; 20] = [
    0x3d, 0x60, 0x2d, 0x80, 0x60, 0x0a, 0x3d, 0x39, 0x81, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d,
    0x3d, 0x36, 0x3d, 0x73,
];

/// Minimal proxy init code following the implementation address.
pub const PROXY_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// `keccak256("zksyncCreate2")`.
pub const ZKSYNC_CREATE2_PREFIX: [u8; 32] = [
    0x20, 0x20, 0xdb, 0xa9, 0x1b, 0x30, 0xcc, 0x00, 0x06, 0x18, 0x8a, 0xf7, 0x94, 0xc2, 0xfb, 0x30,
    0xdd, 0x85, 0x20, 0xdb, 0x7e, 0x2c, 0x08, 0x8b, 0x7f, 0xc7, 0xc1, 0x03, 0xc0, 0x0c, 0xa4, 0x94,
];

/// Bytecode hash of the zkSync minimal proxy; independent of the implementation.
pub const ZKSYNC_PROXY_BYTECODE_HASH: [u8; 32] = [
    0x01, 0x00, 0x00, 0x35, 0x49, 0x2c, 0xeb, 0x24, 0xa4, 0x7d, 0x86, 0x1a, 0x8f, 0xd7, 0xe6, 0x5b,
    0x11, 0x7f, 0x2e, 0xb5, 0xbf, 0x64, 0x53, 0xe1, 0x91, 0xba, 0x77, 0x0c, 0x70, 0xca, 0x7f, 0x43,
];

/// keccak256 of the minimal proxy init code pointing at `implementation`.
pub fn calc_proxy_bytecode_hash(implementation: &Address) -> Hash {
    keccak256_concat(&[&PROXY_PREFIX, implementation.as_bytes(), &PROXY_SUFFIX])
}

/// Standard CREATE2 address:
/// `keccak256(0xff ++ deployer ++ salt ++ init_code_hash)[12..]`.
pub fn create2_address(deployer: &Address, salt: &Hash, init_code_hash: &Hash) -> Address {
    let hash = keccak256_concat(&[
        &[0xff],
        deployer.as_bytes(),
        salt.as_bytes(),
        init_code_hash.as_bytes(),
    ]);
    address_from_hash(&hash)
}

/// zkSync Era CREATE2 address for the minimal proxy.
pub fn zksync_create2_address(deployer: &Address, salt: &Hash, implementation: &Address) -> Address {
    let input_hash = keccak256(implementation.to_word());
    let hash = keccak256_concat(&[
        &ZKSYNC_CREATE2_PREFIX,
        &deployer.to_word(),
        salt.as_bytes(),
        &ZKSYNC_PROXY_BYTECODE_HASH,
        input_hash.as_bytes(),
    ]);
    address_from_hash(&hash)
}

fn address_from_hash(hash: &Hash) -> Address {
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.as_bytes()[12..]);
    Address::new(addr)
}
