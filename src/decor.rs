//! Ambient decoration: orb placement, the floating particle field and its
//! reaction to the pointer over the profile card.

use std::rc::Rc;

use rand::Rng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::dom::{self, ids, selectors};
use crate::error::DomError;

/// Orbs stay within this band (percent of their container) on both axes.
pub const ORB_MIN_PCT: f64 = 10.0;
pub const ORB_MAX_PCT: f64 = 90.0;

const BASE_OPACITY: f64 = 0.5;
const TRANSITION: &str = "all 0.5s ease";

/// Random `(top, left)` percentages for an orb.
pub fn orb_position<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (
        rng.gen_range(ORB_MIN_PCT..ORB_MAX_PCT),
        rng.gen_range(ORB_MIN_PCT..ORB_MAX_PCT),
    )
}

/// Initial placement and animation timing of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl ParticleSeed {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            duration_s: rng.gen_range(3.0..6.0),
            delay_s: rng.gen_range(0.0..2.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
    pub scale: f64,
    pub opacity: f64,
    pub interactive: bool,
}

impl ParticleStyle {
    pub const BASELINE: ParticleStyle = ParticleStyle {
        scale: 1.0,
        opacity: BASE_OPACITY,
        interactive: false,
    };
}

/// Style for a particle `distance` px from the pointer. Linear falloff inside
/// `radius`, baseline outside it.
pub fn particle_response(distance: f64, radius: f64) -> ParticleStyle {
    if distance >= radius {
        return ParticleStyle::BASELINE;
    }
    let intensity = 1.0 - distance / radius;
    ParticleStyle {
        scale: 1.0 + intensity * 0.5,
        opacity: BASE_OPACITY + intensity * 0.5,
        interactive: true,
    }
}

/// Pointer position as percentages of a box given by its left/top/width/height.
pub fn pointer_percent(x: f64, y: f64, left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    let pct = |v: f64, origin: f64, span: f64| if span > 0.0 { (v - origin) / span * 100.0 } else { 0.0 };
    (pct(x, left, width), pct(y, top, height))
}

pub fn place_orbs<R: Rng + ?Sized>(doc: &Document, rng: &mut R) -> Result<(), DomError> {
    for selector in selectors::ORBS {
        let Some(orb) = dom::query(doc, selector)? else {
            continue;
        };
        let (top, left) = orb_position(rng);
        dom::set_style(&orb, "top", &format!("{top}%"));
        dom::set_style(&orb, "left", &format!("{left}%"));
        tracing::debug!(selector, top, left, "orb placed");
    }
    Ok(())
}

pub struct ParticleField {
    particles: Vec<HtmlElement>,
    radius: f64,
}

impl ParticleField {
    pub fn spawn<R: Rng + ?Sized>(
        doc: &Document,
        count: usize,
        radius: f64,
        rng: &mut R,
    ) -> Result<Self, DomError> {
        let container: HtmlElement = dom::by_id(doc, ids::PARTICLES)?;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let seed = ParticleSeed::random(rng);
            let p: HtmlElement = doc
                .create_element("div")?
                .dyn_into()
                .map_err(|_| DomError::Js("particle is not an HtmlElement".into()))?;
            p.set_class_name("particle");
            dom::set_style(&p, "left", &format!("{}%", seed.left_pct));
            dom::set_style(&p, "top", &format!("{}%", seed.top_pct));
            dom::set_style(&p, "animation-duration", &format!("{}s", seed.duration_s));
            dom::set_style(&p, "animation-delay", &format!("{}s", seed.delay_s));
            dom::set_style(&p, "opacity", &BASE_OPACITY.to_string());
            container.append_child(&p)?;
            particles.push(p);
        }
        Ok(Self { particles, radius })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// React to a pointer at viewport coordinates `(x, y)`.
    pub fn track(&self, x: f64, y: f64) {
        for p in &self.particles {
            let rect = p.get_bounding_client_rect();
            let cx = rect.left() + rect.width() / 2.0;
            let cy = rect.top() + rect.height() / 2.0;
            let distance = (x - cx).hypot(y - cy);
            apply_style(p, particle_response(distance, self.radius));
        }
    }

    pub fn relax(&self) {
        for p in &self.particles {
            apply_style(p, ParticleStyle::BASELINE);
        }
    }
}

fn apply_style(p: &HtmlElement, style: ParticleStyle) {
    let classes = p.class_list();
    let _ = if style.interactive {
        classes.add_1("interactive")
    } else {
        classes.remove_1("interactive")
    };
    dom::set_style(p, "transition", TRANSITION);
    dom::set_style(p, "transform", &format!("scale({})", style.scale));
    dom::set_style(p, "opacity", &style.opacity.to_string());
}

/// Wire pointer tracking on the profile card to the mouse-track variables and
/// the particle field.
pub fn bind_pointer(doc: &Document, field: Rc<ParticleField>) -> Result<(), DomError> {
    let Some(card) = dom::query(doc, selectors::PROFILE_CARD)? else {
        tracing::warn!("no profile card; pointer effects disabled");
        return Ok(());
    };
    let track = dom::query(doc, selectors::MOUSE_TRACK)?;

    {
        let card_c = card.clone();
        let field = field.clone();
        let on_move = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
            let rect = card_c.get_bounding_client_rect();
            let (px, py) = pointer_percent(x, y, rect.left(), rect.top(), rect.width(), rect.height());
            if let Some(track) = &track {
                dom::set_style(track, "--mouse-x", &format!("{px}%"));
                dom::set_style(track, "--mouse-y", &format!("{py}%"));
            }
            field.track(x, y);
        }) as Box<dyn FnMut(_)>);
        card.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }
    {
        let on_leave = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            field.relax();
        }) as Box<dyn FnMut(_)>);
        card.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn orbs_stay_inside_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (top, left) = orb_position(&mut rng);
            assert!((ORB_MIN_PCT..=ORB_MAX_PCT).contains(&top));
            assert!((ORB_MIN_PCT..=ORB_MAX_PCT).contains(&left));
        }
    }

    #[test]
    fn particle_seeds_respect_timing_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let s = ParticleSeed::random(&mut rng);
            assert!((3.0..6.0).contains(&s.duration_s));
            assert!((0.0..2.0).contains(&s.delay_s));
            assert!((0.0..100.0).contains(&s.left_pct));
            assert!((0.0..100.0).contains(&s.top_pct));
        }
    }

    #[test]
    fn response_falls_off_linearly() {
        let at_pointer = particle_response(0.0, 150.0);
        assert_eq!(at_pointer.scale, 1.5);
        assert_eq!(at_pointer.opacity, 1.0);
        assert!(at_pointer.interactive);

        let halfway = particle_response(75.0, 150.0);
        assert!((halfway.scale - 1.25).abs() < 1e-9);
        assert!((halfway.opacity - 0.75).abs() < 1e-9);

        assert_eq!(particle_response(150.0, 150.0), ParticleStyle::BASELINE);
        assert_eq!(particle_response(400.0, 150.0), ParticleStyle::BASELINE);
    }

    #[test]
    fn pointer_percent_is_relative_to_box() {
        assert_eq!(pointer_percent(150.0, 60.0, 100.0, 50.0, 200.0, 40.0), (25.0, 25.0));
        assert_eq!(pointer_percent(5.0, 5.0, 0.0, 0.0, 0.0, 0.0), (0.0, 0.0));
    }
}
