use alloy::primitives::U256;
use dioxus::prelude::*;

use crate::eth::{self, UnitsContract};
use crate::state::{ToastNotifier, ToastSlot};
use crate::workflow::{self, Transfer, TransferCopy, DEPOSIT_COPY, WITHDRAW_COPY};

#[component]
pub fn UnitsBankPage() -> Element {
    let toast = use_context::<ToastSlot>();

    let mut account = use_signal(String::new);
    let mut contract = use_signal(|| None::<UnitsContract>);
    let mut balance = use_signal(|| U256::ZERO);
    let mut amount = use_signal(String::new);

    let invalid = workflow::is_invalid_amount(&amount.read());
    let connected = !account.read().is_empty();

    let on_connect = move |_| {
        let notify = ToastNotifier(toast);
        spawn(async move {
            let Some(session) = workflow::establish(eth::connect_units, &notify) else {
                return;
            };
            account.set(session.account.to_string());
            contract.set(Some(session.contract.clone()));
            if let Some(snapshot) = workflow::refresh(&session.contract, &notify).await {
                balance.set(snapshot.balance);
            }
        });
    };

    let run_transfer = move |kind: Transfer, copy: TransferCopy| {
        let Some(bank) = contract.read().clone() else {
            return;
        };
        let Some(units) = workflow::parse_unit_amount(&amount.read()) else {
            return;
        };
        let notify = ToastNotifier(toast);
        spawn(async move {
            if let Some(snapshot) = workflow::transfer(&bank, kind, units, copy, &notify).await {
                balance.set(snapshot.balance);
                amount.set(String::new());
            }
        });
    };

    rsx! {
        div { class: "page",
            h1 { "Units Bank" }
            p { class: "subtitle", "Deposit and withdraw whole units." }

            if !connected {
                button { class: "btn btn-primary btn-wide", onclick: on_connect,
                    "Connect wallet"
                }
            } else {
                div { class: "account-card",
                    p { class: "label", "Account" }
                    p { class: "mono", "{account}" }
                    p { class: "label", "Balance" }
                    p { class: "balance-large", "{balance} units" }
                }

                div { class: "form-group",
                    label { "Amount" }
                    input {
                        class: "input",
                        r#type: "number",
                        placeholder: "Amount",
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
                        onclick: move |_| run_transfer(Transfer::Withdraw, WITHDRAW_COPY),
                        "Withdraw"
                    }
                }

                if invalid {
                    p { class: "error-text", "Please enter a positive amount greater than 0." }
                }
            }
        }
    }
}
