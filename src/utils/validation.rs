//! Address validation and normalization.
//!
//! Runs before any cache lookup or network call.

use crate::models::errors::{AppError, AppResult};

/// Length of the hex body of an address (20 bytes)
const ADDRESS_HEX_LEN: usize = 40;

/// True iff `address` is `0x` followed by exactly 40 hex digits (either case)
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(body) => body.len() == ADDRESS_HEX_LEN && hex::decode(body).is_ok(),
        None => false,
    }
}

/// Reject malformed addresses with an `ADDRESS_INVALID` error
pub fn validate_address(address: &str) -> AppResult<()> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(AppError::invalid_address(address))
    }
}

/// Cache key for an address
#[inline]
pub fn normalize_address(address: &str) -> String {
    address.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_address("0x000000000000000000000000000000000000dEaD"));
        assert!(is_valid_address("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(is_valid_address("0xDAC17F958D2EE523A2206206994597C13D831EC7"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address("0x123"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("dAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_valid_address("0XdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_valid_address("0xgAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(!is_valid_address("0xdAC17F958D2ee523a2206206994597C13D831ec70"));
        assert!(!is_valid_address(" 0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        // 38 hex digits
        assert!(!is_valid_address("0x0000000000000000000000000000000000dEaD"));
    }

    #[test]
    fn test_validate_address_error_code() {
        let err = validate_address("0x123").unwrap_err();
        assert_eq!(err.code, ErrorCode::AddressInvalid);
        assert!(validate_address("0x000000000000000000000000000000000000dEaD").is_ok());
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0x000000000000000000000000000000000000dEaD"),
            "0x000000000000000000000000000000000000dead"
        );
    }
}
