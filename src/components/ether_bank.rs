use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use dioxus::prelude::*;

use crate::eth::{self, EtherContract};
use crate::state::{ToastNotifier, ToastSlot};
use crate::workflow::{self, Notifier, Transfer, TransferCopy, DEPOSIT_COPY, ETHER_WITHDRAW_COPY};

#[component]
pub fn EtherBankPage() -> Element {
    let toast = use_context::<ToastSlot>();

    let mut account = use_signal(String::new);
    let mut contract = use_signal(|| None::<EtherContract>);
    let mut balance = use_signal(|| U256::ZERO);
    let mut pool_balance = use_signal(|| U256::ZERO);
    let mut amount = use_signal(String::new);

    let invalid = workflow::is_invalid_amount(&amount.read());
    let connected = !account.read().is_empty();

    let mut apply_snapshot = move |snapshot: workflow::BalanceSnapshot| {
        balance.set(snapshot.balance);
        if let Some(pool) = snapshot.pool_balance {
            pool_balance.set(pool);
        }
    };

    let on_connect = move |_| {
        let notify = ToastNotifier(toast);
        spawn(async move {
            let Some(session) = workflow::establish(eth::connect_ether, &notify) else {
                return;
            };
            account.set(session.account.to_string());
            contract.set(Some(session.contract.clone()));
            if let Some(snapshot) = workflow::refresh(&session.contract, &notify).await {
                apply_snapshot(snapshot);
            }
        });
    };

    let run_transfer = move |kind: Transfer, copy: TransferCopy| {
        let Some(bank) = contract.read().clone() else {
            return;
        };
        let notify = ToastNotifier(toast);
        let wei = match parse_ether(amount.read().trim()) {
            Ok(wei) if wei > U256::ZERO => wei,
            _ => {
                notify.error(copy.failure);
                return;
            }
        };
        spawn(async move {
            if let Some(snapshot) = workflow::transfer(&bank, kind, wei, copy, &notify).await {
                apply_snapshot(snapshot);
                amount.set(String::new());
            }
        });
    };

    let balance_eth = eth::format_eth(balance());
    let pool_eth = eth::format_eth(pool_balance());

    rsx! {
        div { class: "page",
            h1 { "Ether Bank" }
            p { class: "subtitle", "Deposit and withdraw ETH." }

            if !connected {
                button { class: "btn btn-primary btn-wide", onclick: on_connect,
                    "Connect wallet"
                }
            } else {
                div { class: "account-card",
                    p { class: "label", "Total bank balance" }
                    p { class: "balance-large", "{pool_eth} ETH" }
                    p { class: "label", "Account" }
                    p { class: "mono", "{account}" }
                    p { class: "label", "Your bank balance" }
                    p { class: "balance-large", "{balance_eth} ETH" }
                }

                div { class: "form-group",
                    label { "Amount (ETH)" }
                    input {
                        class: "input",
                        r#type: "number",
                        placeholder: "Amount in ETH",
                        value: "{amount}",
                        oninput: move |e| amount.set(e.value()),
                    }
                }

                div { class: "btn-row",
                    button {
                        class: "btn btn-success",
                        disabled: invalid,
                        onclick: move |_| run_transfer(Transfer::Deposit, DEPOSIT_COPY),
                        "Deposit"
                    }
                    button {
                        class: "btn btn-danger",
                        disabled: invalid,
                        onclick: move |_| run_transfer(Transfer::Withdraw, ETHER_WITHDRAW_COPY),
                        "Withdraw"
                    }
                }

                if invalid {
                    p { class: "error-text", "Please enter a valid amount greater than 0." }
                }
            }
        }
    }
}
