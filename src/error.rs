//! Error type for wallet connection and bank contract calls, plus the
//! normalization rule that turns a raw failure payload into the one line
//! shown to the user.

use serde_json::Value;

use alloy::contract::Error as ContractError;
use alloy::providers::PendingTransactionError;
use alloy::sol_types::{Revert, SolError};
use alloy::transports::{RpcError, TransportErrorKind};

/// Fallback toast text when a failure carries nothing human-readable.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, thiserror::Error)]
pub enum BankError {
    /// No signing key is configured in the environment.
    #[error("No wallet configured. Set ETH_WALLET_KEY to a signing key.")]
    WalletUnavailable,

    /// The provider or contract binding could not be built.
    #[error("wallet connection failed: {0}")]
    ConnectionFailed(String),

    /// A remote call failed. Carries the normalized failure payload
    /// (`reason` / `shortMessage` / `message`) extracted from the
    /// underlying error.
    #[error("{}", parse_error_message(.0, DEFAULT_ERROR_MESSAGE))]
    Call(Value),
}

impl BankError {
    /// The line surfaced to the user for this failure.
    ///
    /// Call failures go through [`parse_error_message`] with the
    /// operation-specific default ("Deposit failed", ...); everything else
    /// already renders a user-meaningful message.
    pub fn user_message(&self, default_msg: &str) -> String {
        match self {
            Self::Call(payload) => parse_error_message(payload, default_msg),
            other => other.to_string(),
        }
    }
}

/// Extracts the most user-meaningful message from a failure payload.
///
/// Priority: a plain string is returned verbatim; anything that is not a
/// structured object yields `default_msg`; then an on-chain revert `reason`
/// beats the RPC-level `shortMessage`, which beats the generic `message`.
pub fn parse_error_message(error: &Value, default_msg: &str) -> String {
    if let Value::String(text) = error {
        return text.clone();
    }
    let Value::Object(fields) = error else {
        return default_msg.to_string();
    };
    if let Some(Value::String(reason)) = fields.get("reason") {
        return reason.clone();
    }
    if let Some(Value::String(short)) = fields.get("shortMessage") {
        return short.clone();
    }
    match fields.get("message") {
        Some(Value::String(message)) => message.clone(),
        _ => default_msg.to_string(),
    }
}

fn call_payload(
    reason: Option<String>,
    short_message: Option<String>,
    message: String,
) -> Value {
    let mut payload = serde_json::Map::new();
    if let Some(reason) = reason {
        payload.insert("reason".into(), Value::String(reason));
    }
    if let Some(short) = short_message {
        payload.insert("shortMessage".into(), Value::String(short));
    }
    payload.insert("message".into(), Value::String(message));
    Value::Object(payload)
}

fn decode_reason(revert_data: &[u8]) -> Option<String> {
    Revert::abi_decode(revert_data).ok().map(|revert| revert.reason)
}

impl From<ContractError> for BankError {
    fn from(err: ContractError) -> Self {
        let reason = err.as_revert_data().and_then(|data| decode_reason(&data));
        let short_message = match &err {
            ContractError::TransportError(rpc) => {
                rpc.as_error_resp().map(|resp| resp.message.to_string())
            }
            _ => None,
        };
        Self::Call(call_payload(reason, short_message, err.to_string()))
    }
}

impl From<RpcError<TransportErrorKind>> for BankError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        let short_message = err.as_error_resp().map(|resp| resp.message.to_string());
        Self::Call(call_payload(None, short_message, err.to_string()))
    }
}

impl From<PendingTransactionError> for BankError {
    fn from(err: PendingTransactionError) -> Self {
        Self::Call(call_payload(None, None, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn revert_reason_wins_over_message() {
        let payload = json!({
            "reason": "insufficient balance",
            "message": "execution reverted (code -32000)",
        });
        assert_eq!(
            parse_error_message(&payload, "Withdraw failed"),
            "insufficient balance"
        );
    }

    #[test]
    fn short_message_used_when_no_reason() {
        let payload = json!({
            "shortMessage": "user rejected",
            "message": "Error: user rejected action (ACTION_REJECTED)",
        });
        assert_eq!(parse_error_message(&payload, "Deposit failed"), "user rejected");
    }

    #[test]
    fn plain_string_returned_verbatim() {
        assert_eq!(parse_error_message(&json!("boom"), "Deposit failed"), "boom");
    }

    #[test]
    fn unrecognized_value_falls_back_to_default() {
        assert_eq!(
            parse_error_message(&json!(42), "Something went wrong"),
            "Something went wrong"
        );
        assert_eq!(
            parse_error_message(&json!({"code": -32000}), "Deposit failed"),
            "Deposit failed"
        );
    }

    #[test]
    fn generic_message_is_the_last_resort() {
        let payload = json!({"message": "network is down"});
        assert_eq!(parse_error_message(&payload, "Deposit failed"), "network is down");
    }

    #[test]
    fn user_message_applies_the_operation_default() {
        let err = BankError::Call(json!({"code": 4001}));
        assert_eq!(err.user_message("Deposit failed"), "Deposit failed");

        let err = BankError::Call(json!({"reason": "exceeds balance"}));
        assert_eq!(err.user_message("Withdraw failed"), "exceeds balance");
    }
}
