use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::info;
use yew::prelude::*;

use crate::catalog::Product;
use crate::decision::Decision;
use crate::product_card::ProductCard;
use crate::stack::CardQueue;
use crate::storage::{load_prefs, save_prefs, StoredPrefs};

/// Cards kept in the visible stack.
const VISIBLE_COUNT: usize = 3;
/// How long the decision banner stays up.
const BANNER_MS: u32 = 1500;

pub enum QueueAction {
    Advance(String),
    Restart,
    SetLoop(bool),
}

/// Queue commands go through a reducer so a decision arriving from an
/// animation timer applies to the queue as it is then, not as it was when
/// the gesture started.
impl Reducible for CardQueue {
    type Action = QueueAction;

    fn reduce(self: Rc<Self>, action: QueueAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            QueueAction::Advance(product_id) => next.advance(&product_id),
            QueueAction::Restart => next.reset_to_start(),
            QueueAction::SetLoop(enabled) => next.set_loop(enabled),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct CardStackProps {
    pub products: Vec<Product>,
    #[prop_or_default]
    pub on_like: Callback<String>,
    #[prop_or_default]
    pub on_pass: Callback<String>,
    #[prop_or_default]
    pub on_add_to_cart: Callback<String>,
}

#[function_component(CardStack)]
pub fn card_stack(props: &CardStackProps) -> Html {
    let queue = {
        let products = props.products.clone();
        use_reducer(move || CardQueue::new(products, load_prefs().loop_enabled))
    };
    let banner = use_state(|| None::<Decision>);
    let banner_timer = use_mut_ref(|| None::<Timeout>);

    let on_decision = {
        let queue = queue.clone();
        let banner = banner.clone();
        let banner_timer = banner_timer.clone();
        let on_like = props.on_like.clone();
        let on_pass = props.on_pass.clone();
        let on_add_to_cart = props.on_add_to_cart.clone();

        Callback::from(move |(decision, product_id): (Decision, String)| {
            info!("{} product {}", decision.label(), product_id);
            match decision {
                Decision::Like => on_like.emit(product_id.clone()),
                Decision::Pass => on_pass.emit(product_id.clone()),
                Decision::AddToCart => on_add_to_cart.emit(product_id.clone()),
            }

            banner.set(Some(decision));
            let clear_banner = {
                let banner = banner.clone();
                Timeout::new(BANNER_MS, move || banner.set(None))
            };
            *banner_timer.borrow_mut() = Some(clear_banner);

            queue.dispatch(QueueAction::Advance(product_id));
        })
    };

    let on_restart = {
        let queue = queue.clone();
        Callback::from(move |_| {
            queue.dispatch(QueueAction::Restart);
        })
    };

    let on_toggle_loop = {
        let queue = queue.clone();
        Callback::from(move |_| {
            let enabled = !queue.looping();
            save_prefs(&StoredPrefs {
                loop_enabled: enabled,
            });
            queue.dispatch(QueueAction::SetLoop(enabled));
        })
    };

    if queue.is_exhausted() {
        return html! {
            <div class="card-stack">
                <div class="end-card">
                    <h2>{ "You've seen all products!" }</h2>
                    <button class="restart-button" onclick={on_restart}>{ "Start Again" }</button>
                    { render_loop_toggle(queue.looping(), &on_toggle_loop) }
                </div>
            </div>
        };
    }

    let cards = queue.window(VISIBLE_COUNT);
    let front_id = cards.first().map(|product| product.id.clone());

    let dispatch_front = |decision: Decision| {
        let on_decision = on_decision.clone();
        let front_id = front_id.clone();
        Callback::from(move |_: yew::MouseEvent| {
            if let Some(id) = front_id.clone() {
                on_decision.emit((decision, id));
            }
        })
    };

    let stack_area = if cards.is_empty() {
        html! {
            <div class="end-card">
                <h2>{ "No more products" }</h2>
            </div>
        }
    } else {
        html! {
            <div class="stack-area">
                { for cards.iter().enumerate().map(|(position, product)| {
                    render_card_slot(position, cards.len(), product, &on_decision)
                }) }
            </div>
        }
    };

    html! {
        <div class="card-stack">
            { render_banner(*banner) }
            { stack_area }
            <div class="action-row">
                <button class="action-button pass"
                    aria-label="Pass"
                    onclick={dispatch_front(Decision::Pass)}>{ "✕" }</button>
                <button class="action-button cart"
                    aria-label="Add to cart"
                    onclick={dispatch_front(Decision::AddToCart)}>{ "🛒" }</button>
                <button class="action-button like"
                    aria-label="Like"
                    onclick={dispatch_front(Decision::Like)}>{ "♥" }</button>
            </div>
            { render_loop_toggle(queue.looping(), &on_toggle_loop) }
        </div>
    }
}

fn render_banner(decision: Option<Decision>) -> Html {
    let content = match decision {
        Some(Decision::Like) => html! { <div class="banner banner-like">{ "♥ LIKED!" }</div> },
        Some(Decision::Pass) => html! { <div class="banner banner-pass">{ "✕ PASSED" }</div> },
        Some(Decision::AddToCart) => {
            html! { <div class="banner banner-cart">{ "🛒 ADDED TO CART" }</div> }
        }
        None => html! {},
    };

    html! {
        <div class="banner-layer">
            { content }
        </div>
    }
}

fn render_card_slot(
    position: usize,
    visible: usize,
    product: &Product,
    on_decision: &Callback<(Decision, String)>,
) -> Html {
    let key = format!("{}-{}", product.id, position);

    if position == 0 {
        return html! {
            <div class="stack-slot" key={key} style={format!("z-index: {};", visible)}>
                <ProductCard product={product.clone()}
                    active={true}
                    on_decision={on_decision.clone()} />
            </div>
        };
    }

    let depth = position as f64;
    let style = format!(
        "z-index: {}; transform: scale({:.2}) translateY(-{}px); opacity: {:.2}; filter: brightness({:.2}); pointer-events: none;",
        visible - position,
        0.92 - 0.04 * depth,
        position * 12,
        1.0 - 0.15 * depth,
        1.0 - 0.1 * depth,
    );

    html! {
        <div class="stack-slot" key={key} style={style}>
            { render_backdrop_card(product) }
        </div>
    }
}

/// Cards behind the front one are inert, they only hint at what comes next.
fn render_backdrop_card(product: &Product) -> Html {
    let image = if product.image_url.is_empty() {
        html! { <div class="card-image card-image-missing">{ "Image unavailable" }</div> }
    } else {
        html! { <img class="card-image" src={product.image_url.clone()} alt={product.name.clone()} /> }
    };

    html! {
        <div class="product-card backdrop">
            <div class="card-image-frame">
                { image }
            </div>
            <div class="card-details">
                <h2 class="card-name">{ &product.name }</h2>
                <p class="card-brand">{ &product.brand }</p>
            </div>
        </div>
    }
}

fn render_loop_toggle(looping: bool, on_toggle: &Callback<Event>) -> Html {
    html! {
        <label class="loop-toggle">
            <input type="checkbox" checked={looping} onchange={on_toggle.clone()} />
            <span>{ "Loop through products automatically" }</span>
        </label>
    }
}
