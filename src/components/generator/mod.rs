//! Flashcard authoring form that downloads the cards as a chapter file.

use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::{error, info};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::DEFAULT_DECK_FILENAME;
use crate::core::{can_generate, normalize_filename, render_cards};
use crate::models::{CardDraft, View};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/generator/generator.module.css");

#[component]
pub fn FlashcardGenerator() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let next_key = StoredValue::new(1_u64);
    let drafts = RwSignal::new(vec![CardDraft::new(0)]);
    let filename = RwSignal::new(DEFAULT_DECK_FILENAME.to_string());
    let (failed, set_failed) = signal(false);
    let ready = Memo::new(move |_| drafts.with(|d| can_generate(d)));

    let add_card = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        drafts.update(|d| d.push(CardDraft::new(key)));
    };

    let generate = move |_| {
        if !ready.get_untracked() {
            return;
        }
        let content = drafts.with_untracked(|d| render_cards(d));
        let name = normalize_filename(&filename.get_untracked());
        match dom::download_text(&name, &content) {
            Ok(()) => {
                info!(file = %name, cards = drafts.with_untracked(Vec::len), "deck generated");
                set_failed.set(false);
            }
            Err(e) => {
                error!(error = ?e, "failed to generate deck");
                set_failed.set(true);
            }
        }
    };

    view! {
        <div class=css::page>
            <header class=css::header>
                <button
                    class=css::backButton
                    on:click=move |_| ctx.go_to(View::Upload)
                    aria-label="Back"
                >
                    <Icon icon=ic::ARROW_LEFT />
                </button>
                <div>
                    <h1 class=css::title>"Create Flashcards"</h1>
                    <p class=css::subtitle>
                        "Write questions and answers, then download them as a chapter file."
                    </p>
                </div>
            </header>

            <label class=css::field>
                <span class=css::fieldLabel>"File name"</span>
                <input
                    type="text"
                    class=css::input
                    placeholder=DEFAULT_DECK_FILENAME
                    prop:value=move || filename.get()
                    on:input=move |ev| filename.set(event_target_value(&ev))
                />
            </label>

            <div class=css::cards>
                <For
                    each=move || drafts.get()
                    key=|draft| draft.key
                    children=move |draft| view! { <DraftEditor draft_key=draft.key drafts=drafts /> }
                />
            </div>

            <button class=css::addButton on:click=add_card>
                <Icon icon=ic::PLUS />
                <span>"Add Card"</span>
            </button>

            <Show when=move || failed.get()>
                <p class=css::error role="alert">"The file could not be created. Please try again."</p>
            </Show>

            <div class=css::footer>
                <Show when=move || !ready.get()>
                    <p class=css::hint>"Fill in every question and answer to generate the file."</p>
                </Show>
                <button class=css::generateButton on:click=generate disabled=move || !ready.get()>
                    <Icon icon=ic::DOWNLOAD />
                    <span>"Generate File"</span>
                </button>
            </div>
        </div>
    }
}

/// Question and answer fields for one draft, located by key.
#[component]
fn DraftEditor(draft_key: u64, drafts: RwSignal<Vec<CardDraft>>) -> impl IntoView {
    let number = Memo::new(move |_| {
        drafts.with(|d| d.iter().position(|c| c.key == draft_key).map_or(0, |i| i + 1))
    });
    let question = move || {
        drafts.with(|d| {
            d.iter()
                .find(|c| c.key == draft_key)
                .map(|c| c.question.clone())
                .unwrap_or_default()
        })
    };
    let answer = move || {
        drafts.with(|d| {
            d.iter()
                .find(|c| c.key == draft_key)
                .map(|c| c.answer.clone())
                .unwrap_or_default()
        })
    };
    let edit = move |apply: fn(&mut CardDraft, String), value: String| {
        drafts.update(|d| {
            if let Some(draft) = d.iter_mut().find(|c| c.key == draft_key) {
                apply(draft, value);
            }
        });
    };
    let can_remove = move || drafts.with(|d| d.len() > 1);
    let remove = move |_| drafts.update(|d| d.retain(|c| c.key != draft_key));

    view! {
        <div class=css::draft>
            <div class=css::draftHeader>
                <span class=css::draftNumber>{move || format!("Card {}", number.get())}</span>
                <Show when=can_remove>
                    <button class=css::removeButton on:click=remove aria-label="Remove card">
                        <Icon icon=ic::TRASH />
                    </button>
                </Show>
            </div>
            <label class=css::field>
                <span class=css::fieldLabel>"Question"</span>
                <textarea
                    class=css::textarea
                    rows="3"
                    placeholder="e.g., What is photosynthesis?"
                    prop:value=question
                    on:input=move |ev| edit(|d, v| d.question = v, event_target_value(&ev))
                ></textarea>
            </label>
            <label class=css::field>
                <span class=css::fieldLabel>"Answer"</span>
                <textarea
                    class=css::textarea
                    rows="3"
                    placeholder="e.g., The process plants use to turn light into energy."
                    prop:value=answer
                    on:input=move |ev| edit(|d, v| d.answer = v, event_target_value(&ev))
                ></textarea>
            </label>
        </div>
    }
}
