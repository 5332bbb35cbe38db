//! Collapsible chapter tree.
//!
//! Directories render before or after files exactly as the tree builder
//! ordered them. Each directory keeps its own open state.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::flatten_files;
use crate::models::{FileRecord, TreeNode};

stylance::import_crate_style!(css, "src/components/sidebar/sidebar.module.css");

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let file_count = move || ctx.tree.with(|tree| flatten_files(tree).len());

    let panel_class = move || {
        if ctx.sidebar_open.get() {
            format!("{} {}", css::sidebar, css::open)
        } else {
            css::sidebar.to_string()
        }
    };

    view! {
        <Show when=move || ctx.sidebar_open.get()>
            <div class=css::backdrop on:click=move |_| ctx.sidebar_open.set(false)></div>
        </Show>
        <aside class=panel_class>
            <div class=css::heading>
                <h2>
                    "Chapters" <span class=css::count>{file_count}</span>
                </h2>
                <button
                    class=css::closeButton
                    on:click=move |_| ctx.sidebar_open.set(false)
                    aria-label="Close chapters"
                >
                    <Icon icon=ic::CLOSE />
                </button>
            </div>
            <nav class=css::tree>{move || render_nodes(ctx.tree.get(), 0)}</nav>
        </aside>
    }
}

fn render_nodes(nodes: Vec<TreeNode>, depth: usize) -> AnyView {
    nodes
        .into_iter()
        .map(|node| match node {
            TreeNode::File { name, file } => {
                view! { <FileItem name=name file=file depth=depth /> }.into_any()
            }
            TreeNode::Directory { name, children } => {
                view! { <DirectoryItem name=name nodes=children depth=depth /> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

fn indent(depth: usize) -> String {
    format!("padding-left: {:.2}rem", 0.75 + depth as f32)
}

#[component]
fn DirectoryItem(name: String, nodes: Vec<TreeNode>, depth: usize) -> impl IntoView {
    let (open, set_open) = signal(true);

    view! {
        <div class=css::directory>
            <button
                class=css::row
                style=indent(depth)
                on:click=move |_| set_open.update(|o| *o = !*o)
                aria-expanded=move || open.get().to_string()
            >
                <span class=css::icon>
                    {move || {
                        if open.get() {
                            view! { <Icon icon=ic::FOLDER_OPEN /> }
                        } else {
                            view! { <Icon icon=ic::FOLDER /> }
                        }
                    }}
                </span>
                <span class=css::label>{name}</span>
            </button>
            <Show when=move || open.get()>{render_nodes(nodes.clone(), depth + 1)}</Show>
        </div>
    }
}

#[component]
fn FileItem(name: String, file: FileRecord, depth: usize) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let path = file.path.clone();
    let tooltip = file.path.clone();
    let is_selected =
        Memo::new(move |_| ctx.selected.with(|s| s.as_ref().is_some_and(|f| f.path == path)));

    let row_class = move || {
        if is_selected.get() {
            format!("{} {} {}", css::row, css::file, css::selected)
        } else {
            format!("{} {}", css::row, css::file)
        }
    };

    view! {
        <button
            class=row_class
            style=indent(depth)
            title=tooltip
            aria-current=move || is_selected.get().then_some("true")
            on:click=move |_| ctx.select(file.clone())
        >
            <span class=css::icon>
                <Icon icon=ic::FILE_TEXT />
            </span>
            <span class=css::label>{name}</span>
        </button>
    }
}
