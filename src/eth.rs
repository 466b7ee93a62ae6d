//! Alloy plumbing: the wallet capability, typed bank contract bindings, and
//! the [`BankContract`] implementations the workflow runs against.
//!
//! The wallet capability is a signing key in `ETH_WALLET_KEY` (the desktop
//! analogue of a browser-injected provider). Connecting builds an HTTP
//! provider with the signer attached and binds the contract instance at the
//! address configured for the variant.

use std::env;

use alloy::network::Ethereum;
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;

use crate::error::BankError;
use crate::workflow::{BalanceSnapshot, BankContract, PendingTransfer, Session};

pub const WALLET_KEY_VAR: &str = "ETH_WALLET_KEY";
pub const RPC_URL_VAR: &str = "ETH_RPC_URL";
pub const UNITS_BANK_ADDRESS_VAR: &str = "BANK_CONTRACT_ADDRESS";
pub const ETHER_BANK_ADDRESS_VAR: &str = "BANK_ETHER_CONTRACT_ADDRESS";

const DEFAULT_RPC_URL: &str = "http://localhost:8545";

sol! {
    #[sol(rpc)]
    contract UnitsBank {
        function deposit(uint256 amount) public;
        function withdraw(uint256 amount) public;
        function getBalance() public view returns (uint256);
    }

    #[sol(rpc)]
    contract EtherBank {
        function deposit() public payable;
        function withdraw(uint256 amount) public payable;
        function getBalance() public view returns (uint256);
        function contractBalance() public view returns (uint256);
    }
}

pub type UnitsContract = UnitsBank::UnitsBankInstance<DynProvider>;
pub type EtherContract = EtherBank::EtherBankInstance<DynProvider>;

// ---------------------------------------------------------------------------
// Wallet connector
// ---------------------------------------------------------------------------

struct Wallet {
    provider: DynProvider,
    account: Address,
}

/// Builds the signer-attached provider from the environment.
///
/// A missing key is [`BankError::WalletUnavailable`]; a malformed key or RPC
/// URL is [`BankError::ConnectionFailed`].
fn wallet_from_env() -> Result<Wallet, BankError> {
    let key = env::var(WALLET_KEY_VAR).map_err(|_| BankError::WalletUnavailable)?;
    let signer: PrivateKeySigner = key
        .trim()
        .parse()
        .map_err(|_| BankError::ConnectionFailed("invalid signing key".into()))?;
    let account = signer.address();

    let rpc_url = env::var(RPC_URL_VAR).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
    let url = rpc_url
        .parse()
        .map_err(|_| BankError::ConnectionFailed(format!("invalid RPC URL: {rpc_url}")))?;

    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect_http(url)
        .erased();

    tracing::info!(account = %account, rpc_url = %rpc_url, "wallet ready");
    Ok(Wallet { provider, account })
}

fn contract_address(var: &str) -> Result<Address, BankError> {
    let raw = env::var(var)
        .map_err(|_| BankError::ConnectionFailed(format!("{var} is not set")))?;
    raw.trim()
        .parse()
        .map_err(|_| BankError::ConnectionFailed(format!("invalid contract address: {raw}")))
}

/// Connects the wallet and binds the units bank contract.
pub fn connect_units() -> Result<Session<UnitsContract>, BankError> {
    let wallet = wallet_from_env()?;
    let address = contract_address(UNITS_BANK_ADDRESS_VAR)?;
    Ok(Session {
        account: wallet.account,
        contract: UnitsBank::new(address, wallet.provider),
    })
}

/// Connects the wallet and binds the ether bank contract.
pub fn connect_ether() -> Result<Session<EtherContract>, BankError> {
    let wallet = wallet_from_env()?;
    let address = contract_address(ETHER_BANK_ADDRESS_VAR)?;
    Ok(Session {
        account: wallet.account,
        contract: EtherBank::new(address, wallet.provider),
    })
}

// ---------------------------------------------------------------------------
// BankContract implementations
// ---------------------------------------------------------------------------

/// A submitted, not yet finalized transaction.
pub struct PendingTx(PendingTransactionBuilder<Ethereum>);

impl PendingTransfer for PendingTx {
    async fn confirmed(self) -> Result<(), BankError> {
        let hash = self.0.watch().await?;
        tracing::debug!(%hash, "transaction confirmed");
        Ok(())
    }
}

impl BankContract for UnitsContract {
    type Pending = PendingTx;

    async fn read_balances(&self) -> Result<BalanceSnapshot, BankError> {
        let balance = self.getBalance().call().await?;
        Ok(BalanceSnapshot {
            balance,
            pool_balance: None,
        })
    }

    async fn submit_deposit(&self, amount: U256) -> Result<PendingTx, BankError> {
        Ok(PendingTx(self.deposit(amount).send().await?))
    }

    async fn submit_withdraw(&self, amount: U256) -> Result<PendingTx, BankError> {
        Ok(PendingTx(self.withdraw(amount).send().await?))
    }
}

impl BankContract for EtherContract {
    type Pending = PendingTx;

    async fn read_balances(&self) -> Result<BalanceSnapshot, BankError> {
        let balance = self.getBalance().call().await?;
        let pool = self.contractBalance().call().await?;
        Ok(BalanceSnapshot {
            balance,
            pool_balance: Some(pool),
        })
    }

    /// Ether deposits carry the amount as transaction value.
    async fn submit_deposit(&self, amount: U256) -> Result<PendingTx, BankError> {
        Ok(PendingTx(self.deposit().value(amount).send().await?))
    }

    async fn submit_withdraw(&self, amount: U256) -> Result<PendingTx, BankError> {
        Ok(PendingTx(self.withdraw(amount).send().await?))
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Formats a wei amount as a decimal ETH string without trailing zeros.
pub fn format_eth(wei: U256) -> String {
    let fixed = format_ether(wei);
    if !fixed.contains('.') {
        return fixed;
    }
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn format_eth_trims_trailing_zeros() {
        assert_eq!(format_eth(parse_ether("1.5").unwrap()), "1.5");
        assert_eq!(format_eth(parse_ether("0.0001").unwrap()), "0.0001");
        assert_eq!(format_eth(parse_ether("12").unwrap()), "12");
        assert_eq!(format_eth(U256::ZERO), "0");
    }

    #[test]
    fn format_eth_keeps_wei_precision() {
        assert_eq!(format_eth(U256::from(500u64)), "0.0000000000000005");
    }
}
