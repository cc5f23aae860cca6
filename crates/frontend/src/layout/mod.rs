pub mod left;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let sidebar_open = RwSignal::new(true);

    view! {
        <div class="app-layout">
            <TopHeader sidebar_open=sidebar_open />
            <div class="app-body">
                <left::Left open=sidebar_open>
                    <left::Sidebar />
                </left::Left>
                <div class="app-main">
                    <div data-zone="center" class="app-content">
                        {children()}
                    </div>
                </div>
            </div>
        </div>
    }
}
