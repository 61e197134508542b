pub mod footer;
pub mod global_context;
pub mod header;

use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |  Header: brand, nav, search, sections    |
/// +------------------------------------------+
/// |              Page content                |
/// +------------------------------------------+
/// |                 Footer                   |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header::Header />
            <main class="app-main">{children()}</main>
            <footer::Footer />
        </div>
    }
}
