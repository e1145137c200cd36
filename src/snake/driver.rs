use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::ThreadRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

use super::{ActivationBuffer, Direction, Phase, SnakeGame, TickOutcome, draw::draw};
use crate::config::PageConfig;
use crate::dom::{self, ids};
use crate::error::DomError;

/// Owns the canvas, the repeating tick timer and the current run.
pub struct SnakeDriver {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    surface: HtmlElement,
    doc: Document,
    cell_px: u32,
    tick_ms: i32,
    activation: ActivationBuffer,
    game: Option<SnakeGame>,
    interval: Option<i32>,
    tick_fn: Option<js_sys::Function>,
    rng: ThreadRng,
}

impl SnakeDriver {
    /// Look up the game surface, arm the keyboard listener and the close button.
    /// The game stays Dormant until the activation phrase is typed.
    pub fn install(doc: &Document, cfg: &PageConfig) -> Result<Rc<RefCell<Self>>, DomError> {
        let canvas: HtmlCanvasElement = dom::by_id(doc, ids::SNAKE_CANVAS)?;
        let surface: HtmlElement = dom::by_id(doc, ids::SNAKE_SURFACE)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(DomError::Js("canvas has no 2d context".into()))?
            .dyn_into()
            .map_err(|_| DomError::Js("2d context has unexpected type".into()))?;

        let driver = Rc::new(RefCell::new(SnakeDriver {
            canvas,
            ctx,
            surface,
            doc: doc.clone(),
            cell_px: cfg.snake_cell_px,
            tick_ms: cfg.snake_tick_ms.min(i32::MAX as u32) as i32,
            activation: ActivationBuffer::new(),
            game: None,
            interval: None,
            tick_fn: None,
            rng: rand::thread_rng(),
        }));

        // Tick callback lives for the page; start/stop only arm and clear the interval.
        {
            let d = driver.clone();
            let closure = Closure::wrap(Box::new(move || {
                let ended = d.borrow_mut().step();
                if let Some(score) = ended {
                    if let Some(w) = web_sys::window() {
                        let _ = w.alert_with_message(&format!("Game Over! Score: {score}"));
                    }
                    d.borrow().hide_surface();
                }
            }) as Box<dyn FnMut()>);
            driver.borrow_mut().tick_fn = Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
            closure.forget();
        }

        {
            let d = driver.clone();
            let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
                d.borrow_mut().on_key(&evt);
            }) as Box<dyn FnMut(_)>);
            doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(close) = doc.get_element_by_id(ids::SNAKE_CLOSE) {
            let d = driver.clone();
            let closure = Closure::wrap(Box::new(move || {
                d.borrow_mut().close();
            }) as Box<dyn FnMut()>);
            close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(driver)
    }

    pub fn phase(&self) -> Phase {
        if self.game.is_some() { Phase::Running } else { Phase::Dormant }
    }

    /// Handle of the armed tick interval; `None` while Dormant.
    pub fn timer(&self) -> Option<i32> {
        self.interval
    }

    fn on_key(&mut self, evt: &KeyboardEvent) {
        let key = evt.key();
        if self.activation.push(&key) && self.phase() == Phase::Dormant {
            self.activate();
            return;
        }
        if let (Some(game), Some(dir)) = (self.game.as_mut(), Direction::from_key(&key)) {
            evt.prevent_default();
            game.steer(dir);
        }
    }

    /// Dormant -> Running.
    pub fn activate(&mut self) {
        self.stop_timer();
        let cell = self.cell_px.max(1);
        let cols = self.canvas.width() / cell;
        let rows = self.canvas.height() / cell;
        let game = SnakeGame::start(cols, rows, &mut self.rng);
        tracing::info!(cols, rows, "snake activated");
        self.set_score(game.score());
        self.game = Some(game);

        let classes = self.surface.class_list();
        let _ = classes.remove_1("hidden");
        let _ = classes.add_1("show");
        self.redraw();

        let Some(tick_fn) = self.tick_fn.as_ref() else {
            return;
        };
        match web_sys::window().map(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(tick_fn, self.tick_ms)
        }) {
            Some(Ok(id)) => self.interval = Some(id),
            _ => {
                tracing::error!("could not start snake timer");
                self.close();
            }
        }
    }

    /// Running -> Dormant without a game-over prompt.
    pub fn close(&mut self) {
        self.stop_timer();
        self.game = None;
        self.hide_surface();
    }

    /// One timer tick. Returns the final score when the run just ended; the
    /// game is already Dormant and the timer cleared by then.
    fn step(&mut self) -> Option<u32> {
        let game = self.game.as_mut()?;
        match game.tick(&mut self.rng) {
            TickOutcome::Moved => {}
            TickOutcome::Ate { score } => self.set_score(score),
            TickOutcome::GameOver { score } => {
                tracing::info!(score, "snake game over");
                self.stop_timer();
                self.game = None;
                return Some(score);
            }
        }
        self.redraw();
        None
    }

    fn stop_timer(&mut self) {
        if let Some(id) = self.interval.take() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(id);
            }
        }
    }

    fn redraw(&self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        if let Err(e) = draw(&self.ctx, game, w, h, self.cell_px.max(1) as f64) {
            tracing::warn!(error = ?e, "snake frame failed");
        }
    }

    fn set_score(&self, score: u32) {
        dom::set_text(&self.doc, ids::SNAKE_SCORE, &score.to_string());
    }

    fn hide_surface(&self) {
        let classes = self.surface.class_list();
        let _ = classes.remove_1("show");
        let _ = classes.add_1("hidden");
    }
}
