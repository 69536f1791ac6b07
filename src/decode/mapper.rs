// SPDX-License-Identifier: GPL-3.0-only

//! Status-token interpretation
//!
//! The engine reports its outcome as a string token. Three cases:
//! a format name is a success, the "NotFound" sentinel is an explicit
//! absence (the steady state of a live scanning session, never logged),
//! and anything else is a loud protocol failure.

use crate::constants::NOT_FOUND_TOKEN;
use crate::decode::{BarcodeFormat, Symbol};
use crate::errors::DecodeError;

/// Turn a raw status token into a typed outcome
///
/// `symbol` is the result carrier the engine populated as a side
/// effect; on success it is returned with the token's format filled in.
pub fn interpret(
    status: Option<String>,
    symbol: Symbol,
) -> Result<Option<Symbol>, DecodeError> {
    let token = status.ok_or(DecodeError::MissingStatus)?;

    if let Some(format) = BarcodeFormat::from_name(&token) {
        return Ok(Some(Symbol { format, ..symbol }));
    }

    if token == NOT_FOUND_TOKEN {
        return Ok(None);
    }

    // Unrecognized tokens signal an incompatibility with the engine's
    // contract; carry the token as diagnostic payload.
    Err(DecodeError::EngineFailure(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(text: &str) -> Symbol {
        Symbol {
            format: BarcodeFormat::None,
            text: Some(text.to_string()),
            time: Some("3 ms".to_string()),
        }
    }

    #[test]
    fn test_format_token_is_success() {
        let result = interpret(Some("QR_CODE".to_string()), found("hello")).unwrap();
        let symbol = result.expect("a symbol");
        assert_eq!(symbol.format, BarcodeFormat::QrCode);
        assert_eq!(symbol.text.as_deref(), Some("hello"));
        assert_eq!(symbol.time.as_deref(), Some("3 ms"));
    }

    #[test]
    fn test_every_format_name_maps() {
        for format in BarcodeFormat::ALL {
            let result =
                interpret(Some(format.name().to_string()), Symbol::default()).unwrap();
            assert_eq!(result.expect("a symbol").format, format);
        }
    }

    #[test]
    fn test_not_found_is_absence_not_error() {
        let result = interpret(Some("NotFound".to_string()), Symbol::default());
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_garbage_token_escalates_with_payload() {
        let err = interpret(Some("garbage".to_string()), Symbol::default()).unwrap_err();
        match err {
            DecodeError::EngineFailure(token) => assert_eq!(token, "garbage"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_token_escalates() {
        // Empty is neither a format name nor the sentinel
        let err = interpret(Some(String::new()), Symbol::default()).unwrap_err();
        assert!(matches!(err, DecodeError::EngineFailure(token) if token.is_empty()));
    }

    #[test]
    fn test_missing_token_is_contract_violation() {
        let err = interpret(None, Symbol::default()).unwrap_err();
        assert!(matches!(err, DecodeError::MissingStatus));
    }
}
