//! Log Panel Component
//!
//! Collapsible view of the in-memory log buffer, for reporting failed saves.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());
    let (open, set_open) = signal(false);

    // Snapshot on open; the buffer is not reactive
    let toggle = move |_| {
        if !open.get_untracked() {
            set_lines.set(rolling_logger::recent_lines());
        }
        set_open.update(|o| *o = !*o);
    };

    view! {
        <section class="log-panel">
            <button class="log-toggle" on:click=toggle>
                {move || if open.get() { "بستن گزارش‌ها" } else { "نمایش گزارش‌ها" }}
            </button>
            <Show when=move || open.get()>
                <pre class="log-lines">
                    {move || lines.with(|lines| lines.join("\n"))}
                </pre>
            </Show>
        </section>
    }
}
