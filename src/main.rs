mod app;
mod bridge;
mod editor;
mod engine;
mod platform;
mod session;
mod shell;
mod toolbar;
mod webfs;

use leptos::prelude::*;

use app::App;
use platform::Capability;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    // Resolved once, before anything that does file I/O can run.
    let capability = Capability::detect();
    leptos::mount::mount_to_body(move || view! { <App capability/> });
}
