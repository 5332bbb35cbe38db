//! Password screen for the PNotes bundle.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::BUNDLE_NAMESPACE;
use crate::models::View;

stylance::import_crate_style!(css, "src/components/login/login.module.css");

#[component]
pub fn Login() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let code = RwSignal::new(String::new());
    let (visible, set_visible) = signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let value = code.get_untracked();
        if value.is_empty() {
            ctx.notice.set(Some("Please enter a password.".to_string()));
            return;
        }
        spawn_local(ctx.login(value));
    };

    view! {
        <div class=css::page>
            <form class=css::panel on:submit=on_submit>
                <button
                    type="button"
                    class=css::backButton
                    on:click=move |_| ctx.go_to(View::Upload)
                >
                    <Icon icon=ic::ARROW_LEFT />
                    <span>"Back"</span>
                </button>

                <div class=css::badge>
                    <Icon icon=ic::LOCK />
                </div>
                <h1 class=css::title>{format!("Access {}", BUNDLE_NAMESPACE)}</h1>
                <p class=css::subtitle>"Enter your access password to load the study notes."</p>

                <div class=css::inputRow>
                    <input
                        class=css::input
                        type=move || if visible.get() { "text" } else { "password" }
                        placeholder="Password"
                        autocomplete="off"
                        autofocus=true
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(event_target_value(&ev))
                    />
                    <button
                        type="button"
                        class=css::toggle
                        on:click=move |_| set_visible.update(|v| *v = !*v)
                        aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                    >
                        {move || {
                            if visible.get() {
                                view! { <Icon icon=ic::EYE_OFF /> }
                            } else {
                                view! { <Icon icon=ic::EYE /> }
                            }
                        }}
                    </button>
                </div>

                <Show when=move || ctx.notice.with(Option::is_some)>
                    <p class=css::error role="alert">
                        {move || ctx.notice.get().unwrap_or_default()}
                    </p>
                </Show>

                <button type="submit" class=css::submit>
                    "Unlock"
                </button>
            </form>
        </div>
    }
}
