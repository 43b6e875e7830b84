//! Minimal interface of the wrapped-native token contract.

use alloy_sol_types::sol;

sol! {
    interface IWrappedNative {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);

        function deposit() external payable;
        function withdraw(uint256 amount) external;
    }
}

#[cfg(test)]
mod tests {
    use super::IWrappedNative;
    use alloy_primitives::{Address, U256};
    use alloy_sol_types::SolCall;

    #[test]
    fn selectors_match_weth9() {
        assert_eq!(IWrappedNative::depositCall::SELECTOR, [0xd0, 0xe3, 0x0d, 0xb0]);
        assert_eq!(IWrappedNative::withdrawCall::SELECTOR, [0x2e, 0x1a, 0x7d, 0x4d]);
        assert_eq!(IWrappedNative::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(IWrappedNative::decimalsCall::SELECTOR, [0x31, 0x3c, 0xe5, 0x67]);
        assert_eq!(IWrappedNative::symbolCall::SELECTOR, [0x95, 0xd8, 0x9b, 0x41]);
    }

    #[test]
    fn deposit_has_no_arguments() {
        let data = IWrappedNative::depositCall {}.abi_encode();
        assert_eq!(data, IWrappedNative::depositCall::SELECTOR.to_vec());
    }

    #[test]
    fn withdraw_encodes_amount_word() {
        let data = IWrappedNative::withdrawCall {
            amount: U256::from(2_000_000_000_000_000_000u128),
        }
        .abi_encode();

        assert_eq!(data.len(), 36);
        assert_eq!(U256::from_be_slice(&data[4..]), U256::from(2_000_000_000_000_000_000u128));
    }

    #[test]
    fn balance_of_encodes_account() {
        let account = Address::repeat_byte(0x42);
        let data = IWrappedNative::balanceOfCall { account }.abi_encode();
        assert_eq!(&data[16..36], account.as_slice());
    }
}
