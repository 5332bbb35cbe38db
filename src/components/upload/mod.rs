//! Landing screen: folder picker, drop zone and entry points to the other
//! screens.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use web_sys::HtmlInputElement;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_NAME, APP_TAGLINE};
use crate::models::View;
use crate::utils::files;

stylance::import_crate_style!(css, "src/components/upload/upload.module.css");

const FORMAT_EXAMPLE: &str = "\
Q: What is the powerhouse of the cell?
A: The mitochondria.

Q: What does DNA stand for?
A: Deoxyribonucleic acid.";

#[component]
pub fn FileUpload() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let (dragging, set_dragging) = signal(false);
    let (guide_open, set_guide_open) = signal(false);

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let picked = files::file_list(input.files());
        // Reset so picking the same folder again still fires `change`
        input.set_value("");
        if !picked.is_empty() {
            ctx.ingest_upload(picked);
        }
    };

    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_dragging.set(true);
    };

    let on_drag_leave = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_dragging.set(false);
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_dragging.set(false);

        let Some(data) = ev.data_transfer() else {
            return;
        };
        // Both lists must be taken before the handler returns
        let entries = files::dropped_entries(&data);
        let fallback = files::file_list(data.files());
        if entries.is_empty() && fallback.is_empty() {
            return;
        }
        ctx.ingest_drop(entries, fallback);
    };

    let zone_class = move || {
        if dragging.get() {
            format!("{} {}", css::dropZone, css::dragging)
        } else {
            css::dropZone.to_string()
        }
    };

    let chevron_class = move || {
        if guide_open.get() {
            format!("{} {}", css::chevron, css::chevronOpen)
        } else {
            css::chevron.to_string()
        }
    };

    view! {
        <div class=css::page>
            <div class=css::hero>
                <h1 class=css::appName>{APP_NAME}</h1>
                <p class=css::tagline>{APP_TAGLINE}</p>
            </div>

            <input
                type="file"
                class=css::hiddenInput
                node_ref=input_ref
                on:change=on_change
                multiple=true
                prop:webkitdirectory=true
            />

            <div
                class=zone_class
                role="button"
                tabindex="0"
                on:click=open_picker
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <span class=css::zoneIcon>
                    <Icon icon=ic::UPLOAD />
                </span>
                <p class=css::zoneTitle>"Click to choose a folder, or drag and drop it here"</p>
                <p class=css::zoneHint>"Plain-text chapter files (.txt). Subfolders are kept."</p>
            </div>

            <Show when=move || ctx.notice.with(Option::is_some)>
                <p class=css::notice role="alert">
                    {move || ctx.notice.get().unwrap_or_default()}
                </p>
            </Show>

            <section class=css::guide>
                <button
                    class=css::guideToggle
                    on:click=move |_| set_guide_open.update(|open| *open = !*open)
                    aria-expanded=move || guide_open.get().to_string()
                >
                    <span>"File format guide"</span>
                    <span class=chevron_class>
                        <Icon icon=ic::CHEVRON_DOWN />
                    </span>
                </button>
                <Show when=move || guide_open.get()>
                    <div class=css::guideBody>
                        <p>
                            "Write each card as a " <code>"Q:"</code> " line followed by an "
                            <code>"A:"</code> " line. Separate cards with a blank line."
                        </p>
                        <pre class=css::example>{FORMAT_EXAMPLE}</pre>
                        <p>"Blocks missing either line are skipped."</p>
                    </div>
                </Show>
            </section>

            <div class=css::actions>
                <button class=css::secondary on:click=move |_| ctx.go_to(View::Login)>
                    <Icon icon=ic::LOCK />
                    <span>"Access PNotes"</span>
                </button>
                <button class=css::primary on:click=move |_| ctx.go_to(View::Generate)>
                    <Icon icon=ic::PLUS />
                    <span>"Create Flashcards"</span>
                </button>
            </div>
        </div>
    }
}
