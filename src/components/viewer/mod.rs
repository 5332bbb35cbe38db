//! Study view for one file: a flip card with circular navigation.
//!
//! A fresh, shuffled [`Navigator`] is built each time the component mounts,
//! which happens whenever the selected file changes.

use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::debug;

use crate::components::icons as ic;
use crate::core::{Navigator, parse_cards};
use crate::models::{CardRecord, FileRecord};

stylance::import_crate_style!(css, "src/components/viewer/viewer.module.css");

#[component]
pub fn FlashcardViewer(file: FileRecord) -> impl IntoView {
    let cards = parse_cards(&file.content);
    debug!(path = %file.path, cards = cards.len(), "study session started");

    let navigator = RwSignal::new(Navigator::new(cards));
    let flipped = RwSignal::new(false);
    let current = Signal::derive(move || navigator.with(|n| n.current().cloned()));

    // Every move shows the question side first.
    let previous = move |_| {
        navigator.update(|n| n.previous());
        flipped.set(false);
    };
    let next = move |_| {
        navigator.update(|n| n.next());
        flipped.set(false);
    };
    let shuffle = move |_| {
        navigator.update(|n| n.shuffle());
        flipped.set(false);
    };

    let counter = move || navigator.with(|n| format!("{} / {}", n.position() + 1, n.len()));

    view! {
        <Show
            when=move || navigator.with(|n| !n.is_empty())
            fallback=|| {
                view! {
                    <div class=css::empty>
                        <p>"No flashcards were found in this file."</p>
                        <p class=css::emptyHint>
                            "Each card needs a " <code>"Q:"</code> " line and an "
                            <code>"A:"</code> " line, with a blank line between cards."
                        </p>
                    </div>
                }
            }
        >
            <div class=css::viewer>
                <Flashcard card=current flipped=flipped />
                <div class=css::controls>
                    <button class=css::navButton on:click=previous aria-label="Previous card">
                        <Icon icon=ic::CHEVRON_LEFT />
                    </button>
                    <span class=css::counter>{counter}</span>
                    <button class=css::navButton on:click=next aria-label="Next card">
                        <Icon icon=ic::CHEVRON_RIGHT />
                    </button>
                </div>
                <button class=css::shuffleButton on:click=shuffle>
                    <Icon icon=ic::SHUFFLE />
                    <span>"Shuffle"</span>
                </button>
            </div>
        </Show>
    }
}

/// Two-sided card. Clicking toggles between question and answer.
#[component]
fn Flashcard(card: Signal<Option<CardRecord>>, flipped: RwSignal<bool>) -> impl IntoView {
    let question = move || card.with(|c| c.as_ref().map(|c| c.question.clone()).unwrap_or_default());
    let answer = move || card.with(|c| c.as_ref().map(|c| c.answer.clone()).unwrap_or_default());

    let card_class = move || {
        if flipped.get() {
            format!("{} {}", css::card, css::flipped)
        } else {
            css::card.to_string()
        }
    };

    view! {
        <div
            class=css::scene
            role="button"
            tabindex="0"
            aria-pressed=move || flipped.get().to_string()
            on:click=move |_| flipped.update(|f| *f = !*f)
        >
            <div class=card_class>
                <div class=format!("{} {}", css::face, css::front)>
                    <span class=css::faceLabel>"Question"</span>
                    <p class=css::faceText>{question}</p>
                    <span class=css::faceHint>"Click to reveal the answer"</span>
                </div>
                <div class=format!("{} {}", css::face, css::back)>
                    <span class=css::faceLabel>"Answer"</span>
                    <p class=css::faceText>{answer}</p>
                    <span class=css::faceHint>"Click to see the question"</span>
                </div>
            </div>
        </div>
    }
}
