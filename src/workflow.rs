//! The account operation workflow: connect, read balances, deposit, withdraw.
//!
//! Everything here is generic over [`BankContract`] and [`Notifier`], so the
//! whole flow runs in unit tests against a mock contract and a recording
//! notifier, without a node or a rendering environment. Each operation is a
//! sequential pipeline; a failure at any step aborts the rest, clears any
//! transient loading toast, and surfaces one failure toast.

use alloy::primitives::{Address, U256};

use crate::error::BankError;

/// A connected wallet bound to one bank contract.
#[derive(Clone)]
pub struct Session<C> {
    pub account: Address,
    pub contract: C,
}

/// Balances read from the authoritative remote state in one pass.
///
/// `pool_balance` is the aggregate across all depositors; only the ether
/// bank exposes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub balance: U256,
    pub pool_balance: Option<U256>,
}

/// The call surface of a bank contract, as the workflow sees it.
#[allow(async_fn_in_trait)]
pub trait BankContract {
    type Pending: PendingTransfer;

    /// View-only read of the caller's balance (and the pool balance where
    /// the contract has one). Never mutates remote state.
    async fn read_balances(&self) -> Result<BalanceSnapshot, BankError>;

    async fn submit_deposit(&self, amount: U256) -> Result<Self::Pending, BankError>;
    async fn submit_withdraw(&self, amount: U256) -> Result<Self::Pending, BankError>;
}

/// A submitted state-changing call awaiting finalization.
#[allow(async_fn_in_trait)]
pub trait PendingTransfer {
    async fn confirmed(self) -> Result<(), BankError>;
}

/// Toast-style notification surface.
pub trait Notifier {
    fn loading(&self, message: &str);
    fn dismiss(&self);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

// ---------------------------------------------------------------------------
// Amount validation
// ---------------------------------------------------------------------------

/// The deposit/withdraw triggers stay disabled while this is true: the field
/// is empty or does not parse as a number strictly greater than zero.
pub fn is_invalid_amount(amount: &str) -> bool {
    let trimmed = amount.trim();
    trimmed.is_empty() || !trimmed.parse::<f64>().is_ok_and(|value| value > 0.0)
}

/// Parses a units-bank amount, truncating to whole units.
///
/// No bounds check against uint256; oversized input saturates at the parse
/// step.
pub fn parse_unit_amount(amount: &str) -> Option<U256> {
    let value = amount.trim().parse::<f64>().ok()?;
    if value <= 0.0 {
        return None;
    }
    Some(U256::from(value as u64))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// User-visible strings for one transfer operation.
#[derive(Clone, Copy)]
pub struct TransferCopy {
    pub in_flight: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

pub const DEPOSIT_COPY: TransferCopy = TransferCopy {
    in_flight: "Depositing...",
    success: "Deposit successful",
    failure: "Deposit failed",
};

pub const WITHDRAW_COPY: TransferCopy = TransferCopy {
    in_flight: "Withdrawing...",
    success: "Withdraw successful",
    failure: "Withdraw failed",
};

/// The ether bank phrases withdraw success differently.
pub const ETHER_WITHDRAW_COPY: TransferCopy = TransferCopy {
    in_flight: "Withdrawing...",
    success: "Withdrawal successful",
    failure: "Withdraw failed",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Deposit,
    Withdraw,
}

/// Runs a connector and surfaces the outcome.
///
/// Re-running re-triggers the whole connect flow; nothing is cached.
pub fn establish<C>(
    connect: impl FnOnce() -> Result<Session<C>, BankError>,
    notify: &impl Notifier,
) -> Option<Session<C>> {
    match connect() {
        Ok(session) => {
            notify.success("Wallet connected");
            Some(session)
        }
        Err(err) => {
            tracing::warn!(error = %err, "wallet connection failed");
            notify.error(&err.user_message("Wallet connection failed"));
            None
        }
    }
}

/// Reads balances from the remote source, surfacing a failure toast on error.
pub async fn refresh<C: BankContract>(
    contract: &C,
    notify: &impl Notifier,
) -> Option<BalanceSnapshot> {
    match contract.read_balances().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            notify.error(&err.user_message("Balance retrieval failed"));
            None
        }
    }
}

/// Submits a deposit or withdraw, waits for finalization, then re-reads the
/// balances from the authoritative source. A locally computed post-operation
/// figure is never trusted.
///
/// Returns the fresh snapshot on success (the caller clears the amount
/// input); `None` means the failure was already surfaced and the displayed
/// balance must stay at its last confirmed read.
pub async fn transfer<C: BankContract>(
    contract: &C,
    kind: Transfer,
    amount: U256,
    copy: TransferCopy,
    notify: &impl Notifier,
) -> Option<BalanceSnapshot> {
    let submitted = match kind {
        Transfer::Deposit => contract.submit_deposit(amount).await,
        Transfer::Withdraw => contract.submit_withdraw(amount).await,
    };
    let pending = match submitted {
        Ok(pending) => pending,
        Err(err) => {
            tracing::warn!(error = %err, ?kind, "submission rejected");
            notify.error(&err.user_message(copy.failure));
            return None;
        }
    };

    notify.loading(copy.in_flight);
    let outcome = async {
        pending.confirmed().await?;
        contract.read_balances().await
    }
    .await;
    notify.dismiss();

    match outcome {
        Ok(snapshot) => {
            notify.success(copy.success);
            Some(snapshot)
        }
        Err(err) => {
            tracing::warn!(error = %err, ?kind, "transfer failed");
            notify.error(&err.user_message(copy.failure));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Note {
        Loading(String),
        Dismiss,
        Success(String),
        Error(String),
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notes: RefCell<Vec<Note>>,
    }

    impl Notifier for RecordingNotifier {
        fn loading(&self, message: &str) {
            self.notes.borrow_mut().push(Note::Loading(message.into()));
        }
        fn dismiss(&self) {
            self.notes.borrow_mut().push(Note::Dismiss);
        }
        fn success(&self, message: &str) {
            self.notes.borrow_mut().push(Note::Success(message.into()));
        }
        fn error(&self, message: &str) {
            self.notes.borrow_mut().push(Note::Error(message.into()));
        }
    }

    /// In-memory bank: deposits and withdrawals apply at confirmation,
    /// withdrawing more than the balance reverts the way the contract does.
    struct MockBank {
        balance: Rc<Cell<U256>>,
        pool: Option<Rc<Cell<U256>>>,
        read_failure: Option<BankError>,
        confirm_failure: Option<BankError>,
    }

    impl MockBank {
        fn with_balance(units: u64) -> Self {
            Self {
                balance: Rc::new(Cell::new(U256::from(units))),
                pool: None,
                read_failure: None,
                confirm_failure: None,
            }
        }
    }

    struct MockPending {
        effect: Option<(Rc<Cell<U256>>, U256)>,
        failure: Option<BankError>,
    }

    impl PendingTransfer for MockPending {
        async fn confirmed(self) -> Result<(), BankError> {
            if let Some(err) = self.failure {
                return Err(err);
            }
            if let Some((cell, value)) = self.effect {
                cell.set(value);
            }
            Ok(())
        }
    }

    impl BankContract for MockBank {
        type Pending = MockPending;

        async fn read_balances(&self) -> Result<BalanceSnapshot, BankError> {
            if let Some(err) = &self.read_failure {
                return Err(err.clone());
            }
            Ok(BalanceSnapshot {
                balance: self.balance.get(),
                pool_balance: self.pool.as_ref().map(|cell| cell.get()),
            })
        }

        async fn submit_deposit(&self, amount: U256) -> Result<MockPending, BankError> {
            Ok(MockPending {
                effect: Some((self.balance.clone(), self.balance.get() + amount)),
                failure: self.confirm_failure.clone(),
            })
        }

        async fn submit_withdraw(&self, amount: U256) -> Result<MockPending, BankError> {
            if amount > self.balance.get() {
                return Err(BankError::Call(json!({
                    "reason": "exceeds balance",
                    "message": "execution reverted",
                })));
            }
            Ok(MockPending {
                effect: Some((self.balance.clone(), self.balance.get() - amount)),
                failure: self.confirm_failure.clone(),
            })
        }
    }

    #[test]
    fn amount_validation_gates_the_triggers() {
        for invalid in ["", "  ", "abc", "0", "-5", "0.0", "-0.1", "NaN"] {
            assert!(is_invalid_amount(invalid), "{invalid:?} should be invalid");
        }
        for valid in ["1", "10", "0.5", " 42 ", "0.0001"] {
            assert!(!is_invalid_amount(valid), "{valid:?} should be valid");
        }
    }

    #[test]
    fn unit_amounts_truncate_to_whole_units() {
        assert_eq!(parse_unit_amount("10"), Some(U256::from(10u64)));
        assert_eq!(parse_unit_amount("10.9"), Some(U256::from(10u64)));
        assert_eq!(parse_unit_amount("0"), None);
        assert_eq!(parse_unit_amount("junk"), None);
    }

    #[test]
    fn connect_success_surfaces_one_toast() {
        let notify = RecordingNotifier::default();
        let session = establish(
            || {
                Ok(Session {
                    account: Address::ZERO,
                    contract: MockBank::with_balance(500),
                })
            },
            &notify,
        );
        assert!(session.is_some());
        assert_eq!(
            *notify.notes.borrow(),
            vec![Note::Success("Wallet connected".into())]
        );
    }

    #[test]
    fn missing_wallet_surfaces_the_install_instruction() {
        let notify = RecordingNotifier::default();
        let session: Option<Session<MockBank>> =
            establish(|| Err(BankError::WalletUnavailable), &notify);
        assert!(session.is_none());
        assert_eq!(
            *notify.notes.borrow(),
            vec![Note::Error(
                "No wallet configured. Set ETH_WALLET_KEY to a signing key.".into()
            )]
        );
    }

    #[tokio::test]
    async fn connect_then_read_shows_the_remote_balance() {
        let bank = MockBank::with_balance(500);
        let notify = RecordingNotifier::default();

        let snapshot = refresh(&bank, &notify).await.unwrap();
        assert_eq!(snapshot.balance.to_string(), "500");
        assert!(notify.notes.borrow().is_empty());
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let bank = MockBank::with_balance(500);
        let notify = RecordingNotifier::default();

        let first = refresh(&bank, &notify).await.unwrap();
        let second = refresh(&bank, &notify).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn read_failure_surfaces_the_default_toast() {
        let mut bank = MockBank::with_balance(500);
        bank.read_failure = Some(BankError::Call(json!(42)));
        let notify = RecordingNotifier::default();

        assert!(refresh(&bank, &notify).await.is_none());
        assert_eq!(
            *notify.notes.borrow(),
            vec![Note::Error("Balance retrieval failed".into())]
        );
    }

    #[tokio::test]
    async fn deposit_reconciles_from_the_remote_balance() {
        let bank = MockBank::with_balance(500);
        let notify = RecordingNotifier::default();

        let snapshot = transfer(
            &bank,
            Transfer::Deposit,
            U256::from(10u64),
            DEPOSIT_COPY,
            &notify,
        )
        .await
        .unwrap();

        assert_eq!(snapshot.balance.to_string(), "510");
        assert_eq!(
            *notify.notes.borrow(),
            vec![
                Note::Loading("Depositing...".into()),
                Note::Dismiss,
                Note::Success("Deposit successful".into()),
            ]
        );
    }

    #[tokio::test]
    async fn over_withdraw_surfaces_the_revert_reason_verbatim() {
        let bank = MockBank::with_balance(500);
        let notify = RecordingNotifier::default();

        let outcome = transfer(
            &bank,
            Transfer::Withdraw,
            U256::from(1000u64),
            WITHDRAW_COPY,
            &notify,
        )
        .await;

        assert!(outcome.is_none());
        assert_eq!(
            *notify.notes.borrow(),
            vec![Note::Error("exceeds balance".into())]
        );
        // Balance must stay at its last confirmed read.
        let snapshot = bank.read_balances().await.unwrap();
        assert_eq!(snapshot.balance, U256::from(500u64));
    }

    #[tokio::test]
    async fn withdraw_updates_balance_and_clears_loading() {
        let bank = MockBank::with_balance(500);
        let notify = RecordingNotifier::default();

        let snapshot = transfer(
            &bank,
            Transfer::Withdraw,
            U256::from(200u64),
            ETHER_WITHDRAW_COPY,
            &notify,
        )
        .await
        .unwrap();

        assert_eq!(snapshot.balance, U256::from(300u64));
        assert_eq!(
            *notify.notes.borrow(),
            vec![
                Note::Loading("Withdrawing...".into()),
                Note::Dismiss,
                Note::Success("Withdrawal successful".into()),
            ]
        );
    }

    #[tokio::test]
    async fn confirmation_failure_dismisses_loading_before_the_error() {
        let mut bank = MockBank::with_balance(500);
        bank.confirm_failure = Some(BankError::Call(json!({
            "shortMessage": "transaction dropped",
        })));
        let notify = RecordingNotifier::default();

        let outcome = transfer(
            &bank,
            Transfer::Deposit,
            U256::from(10u64),
            DEPOSIT_COPY,
            &notify,
        )
        .await;

        assert!(outcome.is_none());
        assert_eq!(
            *notify.notes.borrow(),
            vec![
                Note::Loading("Depositing...".into()),
                Note::Dismiss,
                Note::Error("transaction dropped".into()),
            ]
        );
    }

    #[tokio::test]
    async fn pool_balance_comes_back_with_the_snapshot() {
        let mut bank = MockBank::with_balance(500);
        bank.pool = Some(Rc::new(Cell::new(U256::from(2000u64))));
        let notify = RecordingNotifier::default();

        let snapshot = refresh(&bank, &notify).await.unwrap();
        assert_eq!(snapshot.pool_balance, Some(U256::from(2000u64)));
    }
}
