//! Chain primitives
//!
//! Fixed-width identifiers exchanged with the signing agent: account and
//! contract addresses, and transaction hashes. Both come from
//! `alloy-primitives`; on the wire they are lowercase `0x` hex.

pub use alloy_primitives::{Address, TxHash};

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    #[test]
    fn test_address_accepts_any_case() {
        let mixed: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        let lower: Address = "5fbdb2315678afecb367f032d93f642f64180aa3".parse().unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(lower[0], 0x5f);
    }

    #[test]
    fn test_address_serializes_lowercase() {
        let address: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        assert_eq!(
            serde_json::to_value(address).unwrap(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }

    #[test]
    fn test_address_wrong_length() {
        assert!("0x1234".parse::<Address>().is_err());
    }

    #[test]
    fn test_tx_hash_round_trip() {
        let hash: TxHash = HASH.parse().unwrap();
        assert_eq!(hash.to_string(), HASH);

        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{HASH}\""));
        let back: TxHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_tx_hash_rejects_non_hex() {
        let bad = format!("0x{}", "g".repeat(64));
        assert!(bad.parse::<TxHash>().is_err());
    }
}
