pub mod card_stack;
pub mod catalog;
pub mod decision;
pub mod gesture;
pub mod product_card;
pub mod stack;
pub mod storage;

use card_stack::CardStack;
use catalog::{fetch_catalog, Product};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[function_component(App)]
fn app() -> Html {
    let status = use_state(|| FetchStatus::Loading);
    let products = use_state(|| None::<Vec<Product>>);

    {
        let status = status.clone();
        let products = products.clone();

        use_effect_with_deps(
            move |_| {
                status.set(FetchStatus::Loading);

                let status = status.clone();
                let products = products.clone();

                spawn_local(async move {
                    match fetch_catalog().await {
                        Ok(fetched) => {
                            products.set(Some(fetched));
                            status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            status.set(FetchStatus::Error(err.to_string()));
                            products.set(None);
                        }
                    }
                });

                || ()
            },
            (),
        );
    }

    html! {
        <div class="app">
            <header class="app-header">
                <h1><span class="accent">{ "Shop" }</span>{ "Swipe" }</h1>
            </header>
            <main class="app-content">
                { render_browse_area(&status, &products) }
            </main>
        </div>
    }
}

fn render_browse_area(
    status: &UseStateHandle<FetchStatus>,
    products: &UseStateHandle<Option<Vec<Product>>>,
) -> Html {
    match &**status {
        FetchStatus::Loading => html! { <p class="status-note">{ "Loading products…" }</p> },
        FetchStatus::Error(message) => html! { <p class="status-note error">{ message }</p> },
        FetchStatus::Idle => {
            let Some(list) = (&**products).as_ref() else {
                return html! { <p class="status-note">{ "No products available." }</p> };
            };

            html! { <CardStack products={list.clone()} /> }
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
