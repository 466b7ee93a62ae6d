#![allow(non_snake_case)]

mod components;
mod error;
mod eth;
mod state;
mod workflow;

use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;

use state::Toast;

const STYLE: &str = include_str!("../assets/style.css");

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
    #[route("/units")]
    UnitsBank {},
    #[route("/ether")]
    EtherBank {},
}

fn main() {
    // Contract addresses and the wallet key come from the environment;
    // a local .env is honored for development.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One shared toast slot for the whole app
    use_context_provider(|| Signal::new(None::<Toast>));

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}

// ---------------------------------------------------------------------------
// Layout — sidebar + content + toast overlay
// ---------------------------------------------------------------------------

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app-container",
            components::layout::Sidebar {}
            div { class: "main-panel",
                div { class: "main-content",
                    Outlet::<Route> {}
                }
            }
            components::toast::ToastOverlay {}
        }
    }
}

// ---------------------------------------------------------------------------
// Route components — thin wrappers around the real components
// ---------------------------------------------------------------------------

#[component]
fn Home() -> Element {
    rsx! {
        div { class: "page",
            h1 { "Jean & Co. Bank" }
            p { class: "subtitle", "A simple bank on Ethereum." }
            p { class: "hint",
                "Pick a bank from the sidebar, then connect your wallet. "
                "The units bank keeps balances in whole units; the ether bank holds ETH."
            }
        }
    }
}

#[component]
fn UnitsBank() -> Element {
    rsx! { components::units_bank::UnitsBankPage {} }
}

#[component]
fn EtherBank() -> Element {
    rsx! { components::ether_bank::EtherBankPage {} }
}
