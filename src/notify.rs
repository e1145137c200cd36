//! Toast notifications.
//!
//! A single slot: presenting a toast evicts whatever is showing. Every toast gets a
//! fresh [`ToastId`]; timers and the close button dismiss by id, so a timer left
//! over from an evicted toast finds a different id in the slot and does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom::{self, after, on};
use crate::error::DomError;

const SLIDE_IN_DELAY_MS: i32 = 100;
const AUTO_EXIT_MS: i32 = 400;
const MANUAL_EXIT_MS: i32 = 300;
const OFFSCREEN: &str = "translateX(calc(100% + 20px))";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub icon: &'static str,
}

impl Severity {
    /// Unrecognised names map to `Info`.
    pub fn parse(name: &str) -> Self {
        match name {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "times-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Info => "info-circle",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Severity::Success => Palette {
                background: "rgba(16, 185, 129, 0.1)",
                border: "rgba(16, 185, 129, 0.3)",
                icon: "#10b981",
            },
            Severity::Error => Palette {
                background: "rgba(239, 68, 68, 0.1)",
                border: "rgba(239, 68, 68, 0.3)",
                icon: "#ef4444",
            },
            Severity::Warning => Palette {
                background: "rgba(245, 158, 11, 0.1)",
                border: "rgba(245, 158, 11, 0.3)",
                icon: "#f59e0b",
            },
            Severity::Info => Palette {
                background: "rgba(59, 130, 246, 0.1)",
                border: "rgba(59, 130, 246, 0.3)",
                icon: "#3b82f6",
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_ms: f64,
    pub dismiss_at_ms: f64,
}

/// Bookkeeping for the single visible toast.
#[derive(Debug)]
pub struct ToastSlot {
    next_id: u64,
    duration_ms: f64,
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn new(duration_ms: f64) -> Self {
        Self { next_id: 0, duration_ms, current: None }
    }

    /// Allocate a toast without showing it. It becomes current only once passed
    /// to [`ToastSlot::show`].
    pub fn prepare(&mut self, message: &str, severity: Severity, now_ms: f64) -> Toast {
        self.next_id += 1;
        Toast {
            id: ToastId(self.next_id),
            message: message.to_string(),
            severity,
            created_ms: now_ms,
            dismiss_at_ms: now_ms + self.duration_ms,
        }
    }

    /// Make `toast` the visible one, returning the toast it evicted.
    pub fn show(&mut self, toast: Toast) -> Option<Toast> {
        self.current.replace(toast)
    }

    /// Put a new toast in the slot, returning it and the toast it evicted.
    pub fn present(&mut self, message: &str, severity: Severity, now_ms: f64) -> (Toast, Option<Toast>) {
        let toast = self.prepare(message, severity, now_ms);
        let evicted = self.show(toast.clone());
        (toast, evicted)
    }

    /// Remove the toast if it is still the one showing. Repeat calls return `None`.
    pub fn dismiss(&mut self, id: ToastId) -> Option<Toast> {
        if self.current.as_ref().map(|t| t.id) == Some(id) {
            self.current.take()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

struct Inner {
    slot: ToastSlot,
    element: Option<(ToastId, HtmlElement)>,
}

/// DOM-backed presenter. Cheap to clone; clones share the slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Rc<RefCell<Inner>>,
    duration_ms: i32,
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

impl Notifier {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                slot: ToastSlot::new(duration_ms as f64),
                element: None,
            })),
            duration_ms: duration_ms.min(i32::MAX as u32) as i32,
        }
    }

    pub fn notify(&self, message: &str, severity: Severity) {
        if let Err(e) = self.try_notify(message, severity) {
            tracing::warn!(error = %e, text = message, "could not show notification");
        }
    }

    fn try_notify(&self, message: &str, severity: Severity) -> Result<(), DomError> {
        let doc = dom::document()?;
        let toast = self.inner.borrow_mut().slot.prepare(message, severity, now_ms());

        // The slot only changes once the element is in the page.
        let el = build_toast(&doc, &toast, self)?;
        doc.body()
            .ok_or(DomError::Js("no body".into()))?
            .append_child(&el)?;
        let id = toast.id;
        let old = {
            let mut inner = self.inner.borrow_mut();
            inner.slot.show(toast);
            inner.element.replace((id, el.clone()))
        };
        if let Some((_, old)) = old {
            old.remove();
        }

        {
            let el = el.clone();
            after(SLIDE_IN_DELAY_MS, move || dom::set_style(&el, "transform", "translateX(0)"));
        }
        let this = self.clone();
        after(self.duration_ms, move || this.dismiss_after(id, AUTO_EXIT_MS));
        Ok(())
    }

    /// Slide the toast out and remove it. No-op if `id` is no longer showing.
    pub fn dismiss(&self, id: ToastId) {
        self.dismiss_after(id, MANUAL_EXIT_MS);
    }

    fn dismiss_after(&self, id: ToastId, exit_ms: i32) {
        let el = {
            let mut inner = self.inner.borrow_mut();
            if inner.slot.dismiss(id).is_none() {
                return;
            }
            inner.element.take().map(|(_, el)| el)
        };
        if let Some(el) = el {
            dom::set_style(&el, "transform", OFFSCREEN);
            after(exit_ms, move || el.remove());
        }
    }

    pub fn current(&self) -> Option<Toast> {
        self.inner.borrow().slot.current().cloned()
    }
}

fn build_toast(doc: &Document, toast: &Toast, notifier: &Notifier) -> Result<HtmlElement, DomError> {
    let palette = toast.severity.palette();
    let make = |tag: &str| -> Result<HtmlElement, DomError> {
        doc.create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::Js(format!("<{tag}> is not an HtmlElement")))
    };

    let root = make("div")?;
    root.set_class_name(&format!("notification notification-{}", toast.severity.as_str()));
    root.style().set_css_text(&format!(
        "position: fixed; top: 20px; right: 20px; \
         background: linear-gradient(135deg, {bg}, rgba(40, 40, 40, 0.9)); \
         border: 1px solid {border}; border-radius: 16px; padding: 1rem 1.5rem; \
         box-shadow: 0 8px 32px rgba(0, 0, 0, 0.6), 0 0 0 1px rgba(255, 255, 255, 0.05); \
         z-index: 1001; transform: {OFFSCREEN}; \
         transition: all 0.4s cubic-bezier(0.34, 1.56, 0.64, 1); \
         backdrop-filter: blur(20px) saturate(180%); max-width: 320px; min-width: 250px;",
        bg = palette.background,
        border = palette.border,
    ));

    let content = make("div")?;
    content.set_class_name("notification-content");
    content
        .style()
        .set_css_text("display: flex; align-items: center; gap: 0.5rem;");

    let icon = make("i")?;
    icon.set_class_name(&format!("fas fa-{}", toast.severity.icon()));
    icon.style().set_css_text(&format!(
        "color: {}; font-size: 1.3rem; margin-right: 0.75rem; display: flex; \
         align-items: center; justify-content: center; width: 32px; height: 32px; \
         background: {}; border-radius: 50%; flex-shrink: 0;",
        palette.icon, palette.background
    ));

    let text = make("span")?;
    text.set_text_content(Some(&toast.message));
    text.style().set_css_text(
        "color: var(--text-primary); font-size: 0.95rem; font-weight: 500; line-height: 1.4;",
    );

    let close = make("button")?;
    close.set_class_name("notification-close");
    close.set_text_content(Some("\u{00d7}"));
    close.style().set_css_text(
        "background: transparent; border: none; color: var(--text-muted); font-size: 1.5rem; \
         cursor: pointer; padding: 0; width: 24px; height: 24px; display: flex; \
         align-items: center; justify-content: center; margin-left: auto; \
         transition: all 0.2s ease; opacity: 0.5;",
    );

    {
        let notifier = notifier.clone();
        let id = toast.id;
        on(&close, "click", move || notifier.dismiss(id))?;
    }
    {
        let (root_c, close_c) = (root.clone(), close.clone());
        on(&root, "mouseenter", move || {
            dom::set_style(&root_c, "transform", "translateX(0) scale(1.02)");
            dom::set_style(
                &root_c,
                "box-shadow",
                "0 12px 40px rgba(0, 0, 0, 0.7), 0 0 0 1px rgba(255, 255, 255, 0.08)",
            );
            dom::set_style(&close_c, "opacity", "1");
        })?;
    }
    {
        let (root_c, close_c) = (root.clone(), close.clone());
        on(&root, "mouseleave", move || {
            dom::set_style(&root_c, "transform", "translateX(0) scale(1)");
            dom::set_style(
                &root_c,
                "box-shadow",
                "0 8px 32px rgba(0, 0, 0, 0.6), 0 0 0 1px rgba(255, 255, 255, 0.05)",
            );
            dom::set_style(&close_c, "opacity", "0.5");
        })?;
    }
    {
        let close_c = close.clone();
        on(&close, "mouseenter", move || {
            dom::set_style(&close_c, "color", "var(--text-primary)");
            dom::set_style(&close_c, "transform", "rotate(90deg) scale(1.1)");
        })?;
    }
    {
        let close_c = close.clone();
        on(&close, "mouseleave", move || {
            dom::set_style(&close_c, "color", "var(--text-muted)");
            dom::set_style(&close_c, "transform", "rotate(0deg) scale(1)");
        })?;
    }

    content.append_child(&icon)?;
    content.append_child(&text)?;
    content.append_child(&close)?;
    root.append_child(&content)?;
    Ok(root)
}
