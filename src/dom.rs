//! Browser glue: modal surface, view materialization, click wiring, and the
//! single cancelable timer slot. This is the only module that touches
//! `web-sys`; everything it calls into (`GameManager`, the sessions) is pure.
//!
//! The manager lives in a `thread_local!` cell — wasm is single-threaded and
//! every entry point (exported function, click listener, timer callback) goes
//! through it. Exactly one delayed callback can be outstanding at a time;
//! `close_game` and a cross-kind `open_game` cancel it before touching the
//! session, so a stale timer can never act on a discarded game.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::games::{Feedback, GameKind, Mix, PRIMARIES, View, Visual};
use crate::manager::GameManager;

thread_local! {
    static MANAGER: RefCell<Option<GameManager>> = const { RefCell::new(None) };
    static PENDING: RefCell<Option<PendingTimer>> = const { RefCell::new(None) };
    static MODAL_WIRED: Cell<bool> = const { Cell::new(false) };
}

/// One outstanding `setTimeout`. The closure must stay alive until the timer
/// fires or is cleared.
struct PendingTimer {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

// --- Entry points ------------------------------------------------------------

pub(crate) fn open_game(kind: &str) -> Result<(), JsValue> {
    // Unknown kinds come from data-driven markup; fail silently.
    let Some(kind) = GameKind::parse(kind) else {
        return Ok(());
    };
    let Some(doc) = document() else {
        return Ok(());
    };
    let modal = ensure_modal(&doc)?;
    wire_modal_events(&doc, &modal)?;
    modal.set_class_name("game-modal active");

    let already_active = MANAGER.with(|m| {
        m.borrow_mut()
            .get_or_insert_with(|| GameManager::new(rng_seed()))
            .active_kind()
            == Some(kind)
    });
    if already_active {
        // Same session keeps playing; re-showing the surface was enough.
        return Ok(());
    }

    cancel_pending();
    let view = MANAGER.with(|m| {
        m.borrow_mut()
            .as_mut()
            .and_then(|mgr| mgr.open(kind))
    });
    if let Some(view) = view {
        render(&view)?;
    }
    Ok(())
}

pub(crate) fn close_game() {
    cancel_pending();
    MANAGER.with(|m| {
        if let Some(mgr) = m.borrow_mut().as_mut() {
            mgr.close();
        }
    });
    let Some(doc) = document() else { return };
    if let Some(content) = doc.get_element_by_id("game-content") {
        content.set_inner_html("");
    }
    if let Some(modal) = doc.get_element_by_id("game-modal") {
        modal.set_class_name("game-modal");
    }
}

// --- Interaction handlers ----------------------------------------------------

fn handle_choice(choice: usize) {
    let now = performance_now();
    let submitted = MANAGER.with(|m| {
        m.borrow_mut()
            .as_mut()
            .and_then(|mgr| mgr.submit(choice, now))
    });
    let Some(sub) = submitted else { return };
    if let View::Question(q) = &sub.view
        && let Some(fb) = &q.feedback
    {
        play_feedback_sound(fb);
    }
    let _ = render(&sub.view);
    if let crate::games::Followup::Advance { delay_ms } = sub.followup {
        schedule_advance(delay_ms);
    }
}

fn handle_restart() {
    // A pending palette reset or question advance is void once the player
    // restarts.
    cancel_pending();
    let view = MANAGER.with(|m| m.borrow_mut().as_mut().and_then(|mgr| mgr.restart()));
    if let Some(view) = view {
        let _ = render(&view);
    }
}

fn handle_timer_fired() {
    // Keep the closure alive for the duration of this call; wasm-bindgen
    // defers the actual deallocation until the invocation returns.
    let _slot = PENDING.with(|p| p.borrow_mut().take());
    let view = MANAGER.with(|m| m.borrow_mut().as_mut().and_then(|mgr| mgr.advance()));
    if let Some(view) = view {
        let _ = render(&view);
    }
}

// --- Timer slot --------------------------------------------------------------

fn schedule_advance(delay_ms: u32) {
    cancel_pending();
    let Some(win) = window() else { return };
    let closure = Closure::wrap(Box::new(handle_timer_fired) as Box<dyn FnMut()>);
    match win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms as i32,
    ) {
        Ok(handle) => PENDING.with(|p| {
            *p.borrow_mut() = Some(PendingTimer {
                handle,
                _closure: closure,
            });
        }),
        Err(_) => drop(closure),
    }
}

fn cancel_pending() {
    if let Some(timer) = PENDING.with(|p| p.borrow_mut().take())
        && let Some(win) = window()
    {
        win.clear_timeout_with_handle(timer.handle);
    }
}

// --- Modal surface -----------------------------------------------------------

fn ensure_modal(doc: &Document) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id("game-modal") {
        return Ok(el);
    }
    let modal = doc.create_element("div")?;
    modal.set_id("game-modal");
    modal.set_class_name("game-modal");
    modal.set_inner_html(
        r#"<div class="game-modal-content">
            <button class="game-modal-close" id="game-modal-close">&times;</button>
            <div id="game-content"></div>
        </div>"#,
    );
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&modal)?;
    Ok(modal)
}

/// Close button, backdrop click, Escape. Bound once per page.
fn wire_modal_events(doc: &Document, modal: &Element) -> Result<(), JsValue> {
    if MODAL_WIRED.with(Cell::get) {
        return Ok(());
    }
    MODAL_WIRED.with(|w| w.set(true));

    if let Some(btn) = doc.get_element_by_id("game-modal-close") {
        let closure = Closure::wrap(Box::new(|| close_game()) as Box<dyn FnMut()>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let on_backdrop = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.id() == "game-modal")
                .unwrap_or(false);
            if on_backdrop {
                close_game();
            }
        }) as Box<dyn FnMut(_)>);
        modal.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Escape" {
                close_game();
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

// --- Rendering ---------------------------------------------------------------

fn render(view: &View) -> Result<(), JsValue> {
    let Some(doc) = document() else {
        return Ok(());
    };
    let Some(content) = doc.get_element_by_id("game-content") else {
        return Ok(());
    };
    content.set_inner_html(&view_html(view));
    wire_view_controls(&doc, view)
}

fn view_html(view: &View) -> String {
    match view {
        View::Question(q) => {
            let mut html = String::with_capacity(1024);
            html.push_str(r#"<div class="game-container" style="text-align: center;">"#);
            html.push_str(&format!(
                r#"<h2 style="color: {};">{}</h2>"#,
                q.accent, q.title
            ));
            if let Some(instructions) = q.instructions {
                html.push_str(&format!("<p>{instructions}</p>"));
            }
            if let Some((score, max)) = q.score {
                html.push_str(&format!(
                    r#"<div class="game-score">Điểm: <span id="game-score">{score}</span>/{max}</div>"#
                ));
            }
            html.push_str(&visual_html(&q.visual));
            if let Some(prompt) = &q.prompt {
                html.push_str(&format!(
                    r#"<div class="question" style="font-size: 2rem; margin: 20px 0;">{prompt}</div>"#
                ));
            }
            let (fb_class, fb_text) = match &q.feedback {
                Some(fb) if fb.correct => ("game-feedback success", fb.message.as_str()),
                Some(fb) => ("game-feedback error", fb.message.as_str()),
                None => ("game-feedback", ""),
            };
            html.push_str(&format!(r#"<div class="{fb_class}">{fb_text}</div>"#));
            html.push_str(r#"<div class="game-options">"#);
            for (i, opt) in q.options.iter().enumerate() {
                let disabled = if opt.enabled { "" } else { " disabled" };
                let style = opt
                    .color
                    .map(|c| format!(r#" style="background: {c};""#))
                    .unwrap_or_default();
                html.push_str(&format!(
                    r#"<button class="game-btn" id="game-opt-{i}"{style}{disabled}>{}</button>"#,
                    opt.label
                ));
            }
            html.push_str("</div>");
            if q.show_restart {
                let label = if matches!(q.visual, Visual::Palette { .. }) {
                    "🔄 Reset"
                } else {
                    "🔄 Chơi lại"
                };
                html.push_str(&format!(
                    r#"<button class="game-btn" id="game-restart-btn" style="background: #e74c3c; margin-top: 20px;">{label}</button>"#
                ));
            }
            html.push_str("</div>");
            html
        }
        View::Summary(s) => format!(
            concat!(
                r#"<div class="game-container" style="text-align: center;">"#,
                "<h2>🎉 Hoàn thành! 🎉</h2>",
                r#"<div style="font-size: 3rem; margin: 20px 0;">{medal}</div>"#,
                "<h3>{message}</h3>",
                r#"<p style="font-size: 1.5rem; margin: 20px 0;">Điểm của bạn: <strong>{score}/{max}</strong></p>"#,
                r#"<button class="game-btn" id="game-restart-btn" style="background: #e74c3c;">🔄 Chơi lại</button>"#,
                "</div>"
            ),
            medal = s.medal,
            message = s.message,
            score = s.score,
            max = s.max,
        ),
    }
}

fn visual_html(visual: &Visual) -> String {
    match visual {
        Visual::None => String::new(),
        Visual::Items { emoji, count } => {
            let mut html = String::from(r#"<div class="items" style="margin: 20px 0;">"#);
            for i in 0..*count {
                html.push_str(&format!(
                    r#"<span class="item" style="animation-delay: {:.1}s">{emoji}</span>"#,
                    i as f64 * 0.1
                ));
            }
            html.push_str("</div>");
            html
        }
        Visual::Expression(expr) => format!(
            r#"<div class="question" style="font-size: 2.5rem; margin: 20px 0;">{expr}</div>"#
        ),
        Visual::Figure { glyph, caption } => {
            let caption = caption
                .map(|c| {
                    format!(
                        r#"<div style="font-size: 1.2rem; color: #7f8c8d; margin: 10px 0;">{c}</div>"#
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="game-figure" style="font-size: 5rem; margin: 20px 0;">{glyph}</div>{caption}"#
            )
        }
        Visual::Track { position } => format!(
            concat!(
                r#"<div class="race-track" style="position: relative; margin: 20px 0;">"#,
                r#"<div id="game-car" style="position: absolute; left: {pos}%; transition: left 0.5s;">🏎️</div>"#,
                r#"<div style="position: absolute; right: 10px; top: 20px; font-size: 40px;">🏁</div>"#,
                "</div>"
            ),
            pos = position,
        ),
        Visual::Blocks { cells } => {
            let mut html =
                String::from(r#"<div class="blocks-display" style="margin: 30px 0; min-height: 150px;">"#);
            for (x, y) in cells {
                html.push_str(&format!(
                    r#"<div class="block" style="position: relative; left: {x}px; top: {y}px;"></div>"#
                ));
            }
            html.push_str("</div>");
            html
        }
        Visual::Palette {
            selected,
            status,
            result,
        } => palette_html(selected, status.as_deref(), *result),
    }
}

fn palette_html(
    selected: &[crate::games::Primary],
    status: Option<&str>,
    result: Option<&'static Mix>,
) -> String {
    let mut html = String::from(
        r#"<div class="color-row" style="display: flex; justify-content: center; gap: 20px; margin: 30px 0;">"#,
    );
    for (i, primary) in PRIMARIES.iter().enumerate() {
        let class = if selected.contains(primary) {
            "color-circle selected"
        } else {
            "color-circle"
        };
        html.push_str(&format!(
            r#"<div class="{class}" id="game-color-{i}" style="background: {};"></div>"#,
            primary.hex()
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        r#"<div id="game-color-status" style="font-size: 1.2rem; margin: 20px 0; min-height: 30px;">{}</div>"#,
        status.unwrap_or("")
    ));
    match result {
        Some(mix) => html.push_str(&format!(
            r#"<div id="game-color-result" style="background: {}; color: white;">{}</div>"#,
            mix.hex, mix.name
        )),
        None => html.push_str(
            r#"<div id="game-color-result" style="background: #eee; color: #333;">?</div>"#,
        ),
    }
    html
}

fn wire_view_controls(doc: &Document, view: &View) -> Result<(), JsValue> {
    match view {
        View::Question(q) => {
            for (i, opt) in q.options.iter().enumerate() {
                if opt.enabled {
                    listen(doc, &format!("game-opt-{i}"), move || handle_choice(i))?;
                }
            }
            if matches!(q.visual, Visual::Palette { .. }) {
                for i in 0..PRIMARIES.len() {
                    listen(doc, &format!("game-color-{i}"), move || handle_choice(i))?;
                }
            }
            if q.show_restart {
                listen(doc, "game-restart-btn", handle_restart)?;
            }
        }
        View::Summary(_) => listen(doc, "game-restart-btn", handle_restart)?,
    }
    Ok(())
}

/// Attach a click handler to `id`, if the element exists. The closure is
/// leaked; the next render replaces the element and orphans the listener.
fn listen(doc: &Document, id: &str, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

// --- Sound & timing helpers --------------------------------------------------

/// Fire-and-forget feedback audio. The page may provide
/// `#game-audio-correct` / `#game-audio-wrong` elements; every failure path
/// is swallowed.
fn play_feedback_sound(feedback: &Feedback) {
    let Some(doc) = document() else { return };
    let id = if feedback.correct {
        "game-audio-correct"
    } else {
        "game-audio-wrong"
    };
    if let Some(el) = doc.get_element_by_id(id)
        && let Ok(audio) = el.dyn_into::<web_sys::HtmlAudioElement>()
    {
        audio.set_current_time(0.0);
        let _ = audio.play();
    }
}

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn rng_seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    performance_now().to_bits() ^ 0x9E37_79B9_7F4A_7C15
}
