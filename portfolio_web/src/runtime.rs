use std::rc::Rc;

use anyhow::Result;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent};

use portfolio_core::effects::{self, Reveal, Typewriter};
use portfolio_core::theme::ThemeEvent;
use portfolio_core::{ContactSubmission, ElementHandle, FormElements, SiteConfig, ThemeElements, ThemePreference};

use crate::context::{js_error, WasmContext};
use crate::dom::DomElement;
use crate::relay::FormSubmitRelay;
use crate::storage::PreferenceStore;


/// Wire the page once its markup is parsed.
pub fn start() -> Result<()> {
    let ctx = WasmContext::new()?;

    if ctx.document().ready_state() == "loading" {
        let window = ctx.window().clone();
        EventListener::once(&window, "DOMContentLoaded", move |_| {
            if let Err(err) = run_app(ctx) {
                warn!("page wiring failed: {:#}", err);
            }
        })
        .forget();
        return Ok(());
    }

    run_app(ctx)
}

pub fn run_app(ctx: WasmContext) -> Result<()> {
    let config = ctx.load_config();

    let year = js_sys::Date::new_0().get_full_year();
    effects::stamp_year(ctx.element(&config.ids.year).as_ref(), year);

    wire_theme(&ctx, &config);

    if let Err(err) = wire_reveal(&ctx, &config) {
        warn!("reveal on scroll disabled: {:#}", err);
    }

    wire_typing(&ctx, &config);
    wire_stats_tilt(&ctx, &config);
    wire_service_tilt(&ctx, &config);
    wire_contact(&ctx, &config);

    Ok(())
}

fn wire_theme(ctx: &WasmContext, config: &SiteConfig) {
    let elements = ThemeElements::resolve(ctx.root(), &config.ids, |id| ctx.element(id));
    let store = PreferenceStore::open(ctx.window(), &config.theme.storage_key);
    let theme = Rc::new(ThemePreference::new(store, elements, config));

    let mode = theme.handle(ThemeEvent::PageLoaded);
    debug!("theme initialized as {}", mode);

    let Some(toggle) = theme.toggle_control() else {
        return;
    };
    let target = toggle.0.clone();
    let theme = theme.clone();
    EventListener::new(&target, "click", move |_| {
        theme.handle(ThemeEvent::ToggleClicked);
    })
    .forget();
}

fn wire_reveal(ctx: &WasmContext, config: &SiteConfig) -> Result<()> {
    let targets = ctx.query_all(&format!(".{}", config.classes.reveal));
    if targets.is_empty() {
        return Ok(());
    }

    let reveal = Reveal::new(config);
    let threshold = reveal.threshold;

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                if reveal.on_intersection(&DomElement(target.clone()), entry.is_intersecting()) {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(js_error)?;

    for target in &targets {
        observer.observe(&target.0);
    }

    // The observer lives as long as the page.
    callback.forget();
    Ok(())
}

fn wire_typing(ctx: &WasmContext, config: &SiteConfig) {
    let Some(target) = ctx.element(&config.ids.typing_text) else {
        return;
    };
    type_next(target, Typewriter::new(&config.typing));
}

fn type_next(target: DomElement, mut writer: Typewriter) {
    let Some(frame) = writer.tick() else {
        return;
    };
    target.set_text(&frame.text);

    Timeout::new(frame.delay.as_millis() as u32, move || type_next(target, writer)).forget();
}

fn wire_stats_tilt(ctx: &WasmContext, config: &SiteConfig) {
    let (Some(wrap), Some(card)) = (
        ctx.element(&config.ids.stats_wrap),
        ctx.element(&config.ids.stats_card),
    ) else {
        return;
    };
    let profile = config.tilt.stats;

    let area = wrap.clone();
    let leaning = card.clone();
    EventListener::new(&wrap.0, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        profile.track(&leaning, area.rect(), event.client_x().into(), event.client_y().into());
    })
    .forget();

    EventListener::new(&wrap.0, "mouseleave", move |_| {
        profile.release(&card);
    })
    .forget();
}

fn wire_service_tilt(ctx: &WasmContext, config: &SiteConfig) {
    let profile = config.tilt.service;
    let icon_selector = format!(".{}", config.classes.icon);

    for card in ctx.query_all(&format!(".{}", config.classes.service_card)) {
        profile.prepare(&card);

        let moving = card.clone();
        let icon = icon_selector.clone();
        let icon_transform = config.tilt.service_icon_transform.clone();
        EventListener::new(&card.0, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            profile.track(&moving, moving.rect(), event.client_x().into(), event.client_y().into());
            if let Some(icon) = moving.find(&icon) {
                icon.set_style("transform", &icon_transform);
            }
        })
        .forget();

        let leaving = card.clone();
        let icon = icon_selector.clone();
        EventListener::new(&card.0, "mouseleave", move |_| {
            profile.release(&leaving);
            if let Some(icon) = leaving.find(&icon) {
                profile.release(&icon);
            }
        })
        .forget();
    }
}

fn wire_contact(ctx: &WasmContext, config: &SiteConfig) {
    let Some(elements) = FormElements::resolve(&config.ids, |id| ctx.element(id)) else {
        info!("contact form incomplete, submission not wired");
        return;
    };

    let form = elements.form.0.clone();
    let relay = FormSubmitRelay::new(config.contact.endpoint(), form.dyn_ref::<HtmlFormElement>().cloned());
    let submission = Rc::new(ContactSubmission::new(elements, relay, config));

    EventListener::new_with_options(&form, "submit", EventListenerOptions::enable_prevent_default(), move |event| {
        event.prevent_default();

        let submission = submission.clone();
        spawn_local(async move {
            let outcome = submission.submit().await;
            debug!("contact submit finished: {:?}", outcome);
        });
    })
    .forget();
}
