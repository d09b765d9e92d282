#![cfg(target_arch = "wasm32")]
mod dom;
mod frame;
mod render;

use frame::{Animator, FrameContext, FrameLoop};
use scene_core::SceneKind;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    // scenes mounted from `data-scene` attributes; they live until `unmount_all`
    static AUTO_MOUNTED: RefCell<Vec<Rc<Mount>>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    if let Err(e) = auto_mount() {
        log::error!("auto-mount error: {:?}", e);
    }
    Ok(())
}

/// Mount every `[data-scene]` element on the page. An optional
/// `data-scroll-section="<id>"` names the element whose scroll position
/// drives the scene.
fn auto_mount() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let hosts = document
        .query_selector_all("[data-scene]")
        .map_err(|e| anyhow::anyhow!(format!("query [data-scene]: {:?}", e)))?;
    for i in 0..hosts.length() {
        let Some(host) = hosts.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
            continue;
        };
        let kind = host.get_attribute("data-scene").unwrap_or_default();
        let section = host
            .get_attribute("data-scroll-section")
            .and_then(|id| document.get_element_by_id(&id))
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        match mount(&document, host, section, &kind) {
            Ok(m) => AUTO_MOUNTED.with(|all| all.borrow_mut().push(m)),
            Err(e) => log::error!("[mount] {kind}: {:?}", e),
        }
    }
    Ok(())
}

/// Stop every scene mounted from `data-scene` attributes.
#[wasm_bindgen]
pub fn unmount_all() {
    let mounted = AUTO_MOUNTED.with(|all| std::mem::take(&mut *all.borrow_mut()));
    for m in mounted {
        m.stop();
    }
}

/// Mount a scene on `host`. `section` is the element whose scroll position
/// drives progress; it defaults to `host`. A missing host yields a handle
/// that is already stopped.
#[wasm_bindgen]
pub fn mount_scene(
    host: Option<web::HtmlElement>,
    section: Option<web::HtmlElement>,
    kind: &str,
) -> Result<SceneHandle, JsValue> {
    let Some(host) = host else {
        return Ok(SceneHandle { mount: None });
    };
    let document = dom::window_document().ok_or_else(|| js_error("no document"))?;
    let mount = mount(&document, host, section, kind).map_err(|e| js_error(&e.to_string()))?;
    Ok(SceneHandle { mount: Some(mount) })
}

#[wasm_bindgen]
pub struct SceneHandle {
    mount: Option<Rc<Mount>>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Cancel the frame loop, remove listeners, release GPU buffers and
    /// detach the canvas. Calling it again does nothing.
    pub fn stop(&self) {
        if let Some(m) = &self.mount {
            m.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.mount.as_ref().is_some_and(|m| m.is_running())
    }
}

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

/// Everything one mounted scene holds on to.
struct Mount {
    ctx: Rc<RefCell<FrameContext>>,
    frame_loop: FrameLoop,
    listeners: RefCell<Vec<dom::EventListener>>,
    canvas: web::HtmlCanvasElement,
    stopped: Cell<bool>,
}

impl Mount {
    fn stop(&self) {
        if self.stopped.replace(true) {
            return;
        }
        self.frame_loop.cancel();
        self.listeners.borrow_mut().clear();
        self.ctx.borrow_mut().animator.stop();
        self.canvas.remove();
    }

    fn is_running(&self) -> bool {
        !self.stopped.get() && self.ctx.borrow().animator.is_running()
    }
}

fn mount(
    document: &web::Document,
    host: web::HtmlElement,
    section: Option<web::HtmlElement>,
    kind: &str,
) -> anyhow::Result<Rc<Mount>> {
    let kind: SceneKind = kind.parse()?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

    let viewport = dom::css_size(&host);
    let scene = kind.build(viewport)?;
    let animator: Animator = scene_core::SceneAnimator::new(scene);

    let canvas = dom::create_overlay_canvas(document, &host)?;
    dom::sync_canvas_backing_size(&canvas);

    let section = section.unwrap_or_else(|| host.clone());
    let ctx = Rc::new(RefCell::new(FrameContext::new(
        animator,
        host,
        section,
        canvas.clone(),
    )));
    ctx.borrow_mut().on_scroll();

    let target: &web::EventTarget = window.as_ref();
    let listeners = {
        let on_scroll = ctx.clone();
        let on_resize = ctx.clone();
        let on_pointer = ctx.clone();
        vec![
            listen(target, "scroll", move |_| on_scroll.borrow_mut().on_scroll())?,
            listen(target, "resize", move |_| on_resize.borrow_mut().on_resize())?,
            listen(target, "pointermove", move |ev| {
                if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                    on_pointer.borrow_mut().on_pointer(ev);
                }
            })?,
        ]
    };

    ctx.borrow_mut().animator.start();
    let frame_loop = FrameLoop::start(ctx.clone());
    log::info!("[mount] {kind} {}x{}", viewport.width, viewport.height);

    {
        let ctx = ctx.clone();
        spawn_local(async move {
            match render::GpuState::new(canvas).await {
                Ok(gpu) => ctx.borrow_mut().animator.attach_backend(gpu),
                Err(e) => log::error!("WebGPU init error: {:?}", e),
            }
        });
    }

    let canvas = ctx.borrow().canvas.clone();
    Ok(Rc::new(Mount {
        ctx,
        frame_loop,
        listeners: RefCell::new(listeners),
        canvas,
        stopped: Cell::new(false),
    }))
}

fn listen(
    target: &web::EventTarget,
    event: &'static str,
    handler: impl FnMut(web::Event) + 'static,
) -> anyhow::Result<dom::EventListener> {
    dom::EventListener::new(target, event, handler)
        .map_err(|e| anyhow::anyhow!(format!("listen {event}: {:?}", e)))
}
