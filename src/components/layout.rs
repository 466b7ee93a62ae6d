use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            div { class: "sidebar-brand",
                span { class: "brand-icon", "🏦" }
                span { class: "brand-text", "Jean & Co. Bank" }
            }
            div { class: "sidebar-nav",
                NavSection { label: "Bank" }
                NavLink { to: Route::Home {}, label: "Overview", icon: "⌂" }
                NavLink { to: Route::UnitsBank {}, label: "Units Bank", icon: "#" }
                NavLink { to: Route::EtherBank {}, label: "Ether Bank", icon: "Ξ" }
            }
            div { class: "sidebar-footer",
                span { class: "sidebar-footer-text", "testnet" }
            }
        }
    }
}

#[component]
fn NavSection(label: &'static str) -> Element {
    rsx! {
        div { class: "nav-section-label", "{label}" }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { class: "nav-link", to: to,
            span { class: "nav-icon", "{icon}" }
            span { "{label}" }
        }
    }
}
