//! Contract interface descriptor
//!
//! The JSON ABI the surrounding application ships next to the contract
//! address, parsed with `alloy-json-abi`. Only argument-less calls are
//! encoded; their calldata is the function selector alone.

use alloy_json_abi::{Function, JsonAbi, StateMutability};
use alloy_primitives::Bytes;
use std::collections::BTreeMap;
use std::path::Path;

use super::WalletError;

fn argless(name: &str, state_mutability: StateMutability) -> (String, Vec<Function>) {
    let function = Function {
        name: name.to_string(),
        inputs: Vec::new(),
        outputs: Vec::new(),
        state_mutability,
    };
    (name.to_string(), vec![function])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterface {
    abi: JsonAbi,
}

impl ContractInterface {
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    /// Built-in descriptor of the fund/withdraw contract
    pub fn fund_me() -> Self {
        Self::new(JsonAbi {
            functions: BTreeMap::from([
                argless("fund", StateMutability::Payable),
                argless("withdraw", StateMutability::NonPayable),
            ]),
            ..Default::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        serde_json::from_str::<JsonAbi>(json)
            .map(Self::new)
            .map_err(|e| WalletError::InvalidInterface(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, WalletError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| WalletError::InvalidInterface(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// First overload named `name`
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.abi.function(name).and_then(|overloads| overloads.first())
    }

    /// Calldata for an argument-less function
    pub fn encode_call(&self, name: &str) -> Result<Bytes, WalletError> {
        let overloads = self
            .abi
            .function(name)
            .ok_or_else(|| WalletError::UnknownFunction(name.to_string()))?;
        let function = overloads
            .iter()
            .find(|function| function.inputs.is_empty())
            .ok_or_else(|| {
                WalletError::InvalidInterface(format!(
                    "{name} takes arguments, only argument-less calls are supported"
                ))
            })?;
        Ok(Bytes::copy_from_slice(function.selector().as_slice()))
    }

    /// The contract must take deposits through a payable `fund()` and expose `withdraw()`.
    pub fn validate_fund_me(&self) -> Result<(), WalletError> {
        let fund = self
            .function("fund")
            .ok_or_else(|| WalletError::UnknownFunction("fund".to_string()))?;
        if fund.state_mutability != StateMutability::Payable {
            return Err(WalletError::InvalidInterface(
                "fund must be payable".to_string(),
            ));
        }
        self.function("withdraw")
            .ok_or_else(|| WalletError::UnknownFunction("withdraw".to_string()))?;
        Ok(())
    }
}

impl Default for ContractInterface {
    fn default() -> Self {
        Self::fund_me()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FUND_ME_ABI: &str = r#"[
        {"inputs":[{"internalType":"address","name":"priceFeed","type":"address"}],"stateMutability":"nonpayable","type":"constructor"},
        {"inputs":[],"name":"FundMe__NotOwner","type":"error"},
        {"stateMutability":"payable","type":"fallback"},
        {"inputs":[],"name":"fund","outputs":[],"stateMutability":"payable","type":"function"},
        {"inputs":[{"internalType":"address","name":"funder","type":"address"}],"name":"getAddressToAmountFunded","outputs":[{"internalType":"uint256","name":"","type":"uint256"}],"stateMutability":"view","type":"function"},
        {"inputs":[],"name":"withdraw","outputs":[],"stateMutability":"nonpayable","type":"function"},
        {"stateMutability":"payable","type":"receive"}
    ]"#;

    #[test]
    fn test_builtin_interface() {
        let interface = ContractInterface::fund_me();
        assert!(interface.validate_fund_me().is_ok());
        assert_eq!(interface.encode_call("fund").unwrap().to_vec(), vec![0xb6, 0x0d, 0x42, 0x88]);
        assert_eq!(interface.encode_call("withdraw").unwrap().to_vec(), vec![0x3c, 0xcf, 0xd6, 0x0b]);
    }

    #[test]
    fn test_parse_compiler_abi() {
        let interface = ContractInterface::from_json(FUND_ME_ABI).unwrap();
        assert_eq!(interface.abi.functions().count(), 3);
        assert!(interface.abi.constructor.is_some());
        assert!(interface.validate_fund_me().is_ok());

        let getter = interface.function("getAddressToAmountFunded").unwrap();
        assert_eq!(getter.signature(), "getAddressToAmountFunded(address)");
    }

    #[test]
    fn test_compiler_abi_matches_builtin_calldata() {
        let parsed = ContractInterface::from_json(FUND_ME_ABI).unwrap();
        let builtin = ContractInterface::fund_me();
        for name in ["fund", "withdraw"] {
            assert_eq!(parsed.encode_call(name).unwrap(), builtin.encode_call(name).unwrap());
        }
    }

    #[test]
    fn test_calls_with_arguments_are_refused() {
        let interface = ContractInterface::from_json(FUND_ME_ABI).unwrap();
        assert!(matches!(
            interface.encode_call("getAddressToAmountFunded"),
            Err(WalletError::InvalidInterface(_))
        ));
        assert!(matches!(
            interface.encode_call("transfer"),
            Err(WalletError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_non_payable_fund_is_invalid() {
        let json = r#"[
            {"inputs":[],"name":"fund","outputs":[],"stateMutability":"nonpayable","type":"function"},
            {"inputs":[],"name":"withdraw","outputs":[],"stateMutability":"nonpayable","type":"function"}
        ]"#;
        let interface = ContractInterface::from_json(json).unwrap();
        assert!(matches!(
            interface.validate_fund_me(),
            Err(WalletError::InvalidInterface(_))
        ));
    }

    #[test]
    fn test_missing_withdraw() {
        let json = r#"[{"inputs":[],"name":"fund","outputs":[],"stateMutability":"payable","type":"function"}]"#;
        let interface = ContractInterface::from_json(json).unwrap();
        assert_eq!(
            interface.validate_fund_me(),
            Err(WalletError::UnknownFunction("withdraw".to_string()))
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ContractInterface::from_json("{not json"),
            Err(WalletError::InvalidInterface(_))
        ));
    }
}
