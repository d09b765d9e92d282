use crate::dom;
use crate::render::GpuState;
use glam::Vec2;
use instant::Instant;
use scene_core::{AnimatedScene, FrameClock, SceneAnimator, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Animator = SceneAnimator<Box<dyn AnimatedScene>, GpuState>;

pub struct FrameContext {
    pub animator: Animator,
    pub host: web::HtmlElement,
    // scroll progress is measured against this element; defaults to the host
    pub section: web::HtmlElement,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
    pub viewport: Viewport,
}

impl FrameContext {
    pub fn new(
        animator: Animator,
        host: web::HtmlElement,
        section: web::HtmlElement,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        let viewport = dom::css_size(&host);
        Self {
            animator,
            host,
            section,
            canvas,
            started: Instant::now(),
            viewport,
        }
    }

    pub fn frame(&mut self) -> bool {
        let clock = FrameClock::from_millis(self.started.elapsed().as_secs_f64() * 1000.0);
        self.animator.frame(clock)
    }

    pub fn on_scroll(&mut self) {
        let rect = dom::element_rect(&self.section);
        let vh = dom::viewport_size().height;
        self.animator.on_scroll(rect, vh);
    }

    pub fn on_resize(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        let viewport = dom::css_size(&self.host);
        if viewport != self.viewport {
            self.viewport = viewport;
            if let Err(e) = self.animator.on_resize(viewport) {
                log::error!("[resize] {e}");
            }
        }
        // layout moved, so the section did too
        self.on_scroll();
    }

    pub fn on_pointer(&mut self, ev: &web::MouseEvent) {
        let window = dom::viewport_size();
        if window.width <= 0.0 || window.height <= 0.0 {
            return;
        }
        let ndc = Vec2::new(
            ev.client_x() as f32 / window.width * 2.0 - 1.0,
            1.0 - ev.client_y() as f32 / window.height * 2.0,
        );
        self.animator.on_pointer(ndc);
    }
}

/// `requestAnimationFrame` loop that can be cancelled.
///
/// The tick closure re-schedules itself through a shared slot; `cancel`
/// empties the slot, which drops the closure and breaks the cycle.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if !frame_ctx.borrow_mut().frame() {
                return;
            }
            if let Some(cb) = tick_clone.borrow().as_ref() {
                pending_tick.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = tick.borrow().as_ref() {
            pending.set(request_frame(cb));
        }
        Self { tick, pending }
    }

    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}
