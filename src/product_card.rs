use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::window;
use yew::prelude::*;

use crate::catalog::{format_discount, format_price, Product};
use crate::decision::Decision;
use crate::gesture::{DragPhase, Point, ReleaseAction, SwipeDirection, SwipeTracker};

/// Matches the 0.3s CSS transition on the card.
const SWIPE_ANIM_MS: u32 = 300;
const FALLBACK_VIEWPORT: f64 = 600.0;

#[derive(Properties, PartialEq)]
pub struct ProductCardProps {
    pub product: Product,
    pub active: bool,
    /// Fired once per committed swipe, after the exit animation, with the
    /// id of the product this card was showing.
    pub on_decision: Callback<(Decision, String)>,
}

/// The interactive front card. The gesture lives in an `Rc<RefCell<..>>`
/// so the animation timers always see the current state, while a plain
/// state handle mirrors it for rendering.
#[function_component(ProductCard)]
pub fn product_card(props: &ProductCardProps) -> Html {
    let tracker = use_mut_ref(SwipeTracker::new);
    let rendered = use_state(SwipeTracker::new);
    let anim_timer = use_mut_ref(|| None::<Timeout>);

    {
        let tracker = tracker.clone();
        let rendered = rendered.clone();
        let anim_timer = anim_timer.clone();

        use_effect_with_deps(
            move |_| {
                anim_timer.borrow_mut().take();
                *tracker.borrow_mut() = SwipeTracker::new();
                let current = tracker.borrow().clone();
                rendered.set(current);
                || ()
            },
            props.product.id.clone(),
        );
    }

    let pointer_down = {
        let tracker = tracker.clone();
        let rendered = rendered.clone();
        let anim_timer = anim_timer.clone();
        let active = props.active;

        Callback::from(move |event: web_sys::PointerEvent| {
            if !active {
                return;
            }
            event.prevent_default();
            let at = Point::new(event.client_x() as f64, event.client_y() as f64);
            if !tracker.borrow_mut().start(event.pointer_id(), at) {
                return;
            }
            anim_timer.borrow_mut().take();
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            let current = tracker.borrow().clone();
            rendered.set(current);
        })
    };

    let pointer_move = {
        let tracker = tracker.clone();
        let rendered = rendered.clone();

        Callback::from(move |event: web_sys::PointerEvent| {
            let at = Point::new(event.client_x() as f64, event.client_y() as f64);
            if tracker.borrow_mut().update(event.pointer_id(), at) {
                event.prevent_default();
                let current = tracker.borrow().clone();
                rendered.set(current);
            }
        })
    };

    let pointer_up = {
        let tracker = tracker.clone();
        let rendered = rendered.clone();
        let anim_timer = anim_timer.clone();
        let on_decision = props.on_decision.clone();
        let product_id = props.product.id.clone();

        Callback::from(move |event: web_sys::PointerEvent| {
            let action = tracker.borrow_mut().release(event.pointer_id());
            if action == ReleaseAction::Ignored {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }

            match action {
                ReleaseAction::Commit(decision) => {
                    let from = tracker.borrow().offset();
                    tracker
                        .borrow_mut()
                        .begin_exit(exit_target(decision, from));

                    let timer = {
                        let tracker = tracker.clone();
                        let rendered = rendered.clone();
                        let on_decision = on_decision.clone();
                        let product_id = product_id.clone();
                        Timeout::new(SWIPE_ANIM_MS, move || {
                            let finished = tracker.borrow_mut().finish_commit();
                            let current = tracker.borrow().clone();
                            rendered.set(current);
                            if let Some(decision) = finished {
                                on_decision.emit((decision, product_id));
                            }
                        })
                    };
                    *anim_timer.borrow_mut() = Some(timer);
                }
                ReleaseAction::SpringBack => {
                    let timer = {
                        let tracker = tracker.clone();
                        let rendered = rendered.clone();
                        Timeout::new(SWIPE_ANIM_MS, move || {
                            tracker.borrow_mut().settle();
                            let current = tracker.borrow().clone();
                            rendered.set(current);
                        })
                    };
                    *anim_timer.borrow_mut() = Some(timer);
                }
                ReleaseAction::Ignored => {}
            }

            let current = tracker.borrow().clone();
            rendered.set(current);
        })
    };

    let pointer_cancel = {
        let tracker = tracker.clone();
        let rendered = rendered.clone();
        let anim_timer = anim_timer.clone();

        Callback::from(move |event: web_sys::PointerEvent| {
            if !tracker.borrow_mut().cancel(event.pointer_id()) {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }
            let timer = {
                let tracker = tracker.clone();
                let rendered = rendered.clone();
                Timeout::new(SWIPE_ANIM_MS, move || {
                    tracker.borrow_mut().settle();
                    let current = tracker.borrow().clone();
                    rendered.set(current);
                })
            };
            *anim_timer.borrow_mut() = Some(timer);
            let current = tracker.borrow().clone();
            rendered.set(current);
        })
    };

    let state = &*rendered;
    let dragging = state.is_dragging();
    let offset = state.offset();

    // An idle card renders at rest, the CSS transition animates it back
    // from wherever the drag left it.
    let (shift, rotation) = if state.phase() == DragPhase::Idle {
        (Point::new(0.0, 0.0), 0.0)
    } else {
        (offset, state.rotation_deg())
    };

    let box_shadow = if dragging {
        let lift = if offset.x > 0.0 { 8 } else { -8 };
        format!(
            "0 {}px 20px rgba(0, 0, 0, {:.2})",
            lift,
            state.shadow_intensity()
        )
    } else {
        "0 4px 8px rgba(0, 0, 0, 0.1)".to_owned()
    };

    let card_style = format!(
        "transform: translate({:.1}px, {:.1}px) rotate({:.2}deg); box-shadow: {}; transition: {};",
        shift.x,
        shift.y,
        rotation,
        box_shadow,
        if dragging { "none" } else { "all 0.3s ease" }
    );

    let edge_class = if dragging {
        match state.direction() {
            Some(SwipeDirection::Right) => Some("edge-like"),
            Some(SwipeDirection::Left) => Some("edge-pass"),
            Some(SwipeDirection::Up) => Some("edge-cart"),
            _ => None,
        }
    } else {
        None
    };

    let image = if props.product.image_url.is_empty() {
        html! { <div class="card-image card-image-missing">{ "Image unavailable" }</div> }
    } else {
        html! {
            <img class="card-image"
                src={props.product.image_url.clone()}
                alt={props.product.name.clone()}
                draggable="false" />
        }
    };

    let product = &props.product;

    html! {
        <div class={classes!("product-card", edge_class, if dragging { Some("dragging") } else { None })}
            style={card_style}
            onpointerdown={pointer_down}
            onpointermove={pointer_move}
            onpointerup={pointer_up}
            onpointercancel={pointer_cancel}>
            <div class="decision-badge badge-like"
                style={format!("opacity: {:.2};", state.like_opacity())}>{ "LIKE" }</div>
            <div class="decision-badge badge-pass"
                style={format!("opacity: {:.2};", state.pass_opacity())}>{ "PASS" }</div>
            <div class="decision-badge badge-cart"
                style={format!("opacity: {:.2};", state.cart_opacity())}>{ "ADD TO CART" }</div>
            <div class="card-image-frame">
                { image }
            </div>
            <div class="card-details">
                <h2 class="card-name">{ &product.name }</h2>
                <p class="card-brand">{ &product.brand }</p>
                <div class="card-pricing">
                    <span class="price">{ format_price(product.price) }</span>
                    {
                        if product.original_price > product.price {
                            html! { <span class="original-price">{ format_price(product.original_price) }</span> }
                        } else {
                            html! {}
                        }
                    }
                    {
                        if product.discount_percentage > 0 {
                            html! { <span class="discount-chip">{ format_discount(product.discount_percentage) }</span> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        </div>
    }
}

/// Off-screen point a committed card flies to. The perpendicular axis keeps
/// the drag's drift so the card leaves along its current path.
fn exit_target(decision: Decision, from: Point) -> Point {
    let (width, height) = window()
        .map(|w| {
            (
                w.inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(FALLBACK_VIEWPORT),
                w.inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(FALLBACK_VIEWPORT),
            )
        })
        .unwrap_or((FALLBACK_VIEWPORT, FALLBACK_VIEWPORT));

    match decision {
        Decision::Like => Point::new(width * 1.5, from.y),
        Decision::Pass => Point::new(-width * 1.5, from.y),
        Decision::AddToCart => Point::new(from.x, -height * 1.5),
    }
}
