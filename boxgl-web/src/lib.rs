/// BoxGL Web - WebGL2 spinning-cube renderer
///
/// Exports [`CubeApp`] to JavaScript: construct it with a canvas id,
/// call `start()` to enter the requestAnimationFrame loop, `stop()` to
/// leave it, and `resize()` from a window resize listener.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, WebGl2RenderingContext as Gl, Window};

mod scene;
mod shader;

use boxgl_core::CubeGeometry;
use scene::CubeScene;
pub use shader::{
    compile_shader, create_program, link_program, ShaderError, ShaderStage,
    FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE,
};

/// Render loop lifecycle.
///
/// The animation-frame callback observes this before drawing and before
/// rescheduling, so `stop()` takes effect at the next frame boundary
/// and the loop never reschedules itself past a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Stopped,
}

impl LoopState {
    fn on_start(self) -> LoopState {
        LoopState::Running
    }

    fn on_stop(self) -> LoopState {
        match self {
            LoopState::Running => LoopState::Stopped,
            other => other,
        }
    }
}

/// Loop state plus a run generation.
///
/// A callback scheduled before a stop can still be queued in the
/// browser when a quick restart sets the state back to Running. Each
/// run hands its callback a generation token; a callback whose token no
/// longer matches belongs to an earlier run and must not draw or
/// reschedule, otherwise two callbacks end up live per frame.
#[derive(Debug)]
struct LoopControl {
    state: Cell<LoopState>,
    generation: Cell<u64>,
}

impl LoopControl {
    fn new() -> Self {
        Self {
            state: Cell::new(LoopState::Idle),
            generation: Cell::new(0),
        }
    }

    fn is_running(&self) -> bool {
        self.state.get() == LoopState::Running
    }

    /// Transition to Running and invalidate callbacks of earlier runs.
    /// Returns the token for the new run's callback.
    fn start(&self) -> u64 {
        self.state.set(self.state.get().on_start());
        self.generation.set(self.generation.get() + 1);
        self.generation.get()
    }

    fn stop(&self) {
        self.state.set(self.state.get().on_stop());
    }

    /// Force Stopped, used when scheduling the next frame fails.
    fn abort(&self) {
        self.state.set(LoopState::Stopped);
    }

    /// Whether the callback holding `token` may draw and reschedule.
    fn should_run(&self, token: u64) -> bool {
        self.is_running() && self.generation.get() == token
    }
}

/// The spinning-cube application, driving one canvas.
#[wasm_bindgen]
pub struct CubeApp {
    canvas: HtmlCanvasElement,
    scene: Rc<RefCell<CubeScene>>,
    control: Rc<LoopControl>,
    // Keeps the rescheduling closure alive for the life of the app
    raf: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

#[wasm_bindgen]
impl CubeApp {
    /// Look up the canvas, acquire a WebGL2 context, and build the
    /// scene. Shader compile/link failures reject the constructor with
    /// the full diagnostic text.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<CubeApp, JsValue> {
        let window = window_handle()?;
        let document = window.document().ok_or_else(|| error("missing document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| error("canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let (width, height) = physical_size(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let gl: Gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| error("webgl2 context unavailable"))?
            .dyn_into()?;

        let scene = CubeScene::new(gl, &CubeGeometry::unit(), width, height)?;

        Ok(CubeApp {
            canvas,
            scene: Rc::new(RefCell::new(scene)),
            control: Rc::new(LoopControl::new()),
            raf: Rc::new(RefCell::new(None)),
        })
    }

    /// Enter the render loop. Idempotent while already running, and
    /// restarts cleanly after a `stop()`.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.control.is_running() {
            return Ok(());
        }
        let token = self.control.start();

        let control = self.control.clone();
        let scene = self.scene.clone();
        let raf = self.raf.clone();
        let closure = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            if !control.should_run(token) {
                // Stopped, or superseded by a restart before this
                // queued frame fired: fall out without rescheduling
                return;
            }
            scene.borrow_mut().draw(now_ms);
            if let Some(window) = web_sys::window() {
                if let Some(callback) = raf.borrow().as_ref() {
                    if window
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .is_err()
                    {
                        console::warn_1(&"failed to schedule next frame".into());
                        control.abort();
                    }
                }
            }
        });
        *self.raf.borrow_mut() = Some(closure);

        if let Some(callback) = self.raf.borrow().as_ref() {
            let scheduled = window_handle().and_then(|window| {
                window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .map(|_| ())
            });
            if let Err(err) = scheduled {
                // No frame is queued, so the loop never started
                self.control.abort();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Signal the loop to stop; the in-flight frame finishes and the
    /// loop is not rescheduled.
    pub fn stop(&mut self) {
        self.control.stop();
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Resize the canvas backing store to the window's physical size
    /// and update viewport and aspect ratio. The host calls this from
    /// its window resize listener.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let window = window_handle()?;
        let (width, height) = physical_size(&window)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.scene.borrow_mut().resize(width, height);
        Ok(())
    }
}

fn window_handle() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| error("missing window"))
}

/// Window inner size in physical pixels (CSS pixels scaled by the
/// device pixel ratio).
fn physical_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let ratio = window.device_pixel_ratio();
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| error("window width is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| error("window height is not a number"))?;
    Ok(((width * ratio) as u32, (height * ratio) as u32))
}

fn error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

// Better panic messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

#[cfg(test)]
mod tests {
    use super::{LoopControl, LoopState};

    #[test]
    fn test_loop_starts_from_idle() {
        assert_eq!(LoopState::Idle.on_start(), LoopState::Running);
    }

    #[test]
    fn test_loop_stops_only_while_running() {
        assert_eq!(LoopState::Running.on_stop(), LoopState::Stopped);
        assert_eq!(LoopState::Idle.on_stop(), LoopState::Idle);
        assert_eq!(LoopState::Stopped.on_stop(), LoopState::Stopped);
    }

    #[test]
    fn test_loop_restarts_after_stop() {
        let state = LoopState::Running.on_stop();
        assert_eq!(state.on_start(), LoopState::Running);
    }

    #[test]
    fn test_callback_runs_only_while_running() {
        let control = LoopControl::new();
        let token = control.start();
        assert!(control.should_run(token));
        control.stop();
        assert!(!control.should_run(token));
    }

    #[test]
    fn test_stale_callback_is_shut_out_after_restart() {
        // A frame queued before stop() can still fire after a quick
        // restart; its token must no longer pass, or it would draw and
        // reschedule alongside the new run's callback
        let control = LoopControl::new();
        let first = control.start();
        control.stop();
        let second = control.start();
        assert!(control.is_running());
        assert!(!control.should_run(first));
        assert!(control.should_run(second));
    }

    #[test]
    fn test_abort_leaves_a_restartable_stop() {
        // Failed scheduling must not strand the app reporting Running
        let control = LoopControl::new();
        let token = control.start();
        control.abort();
        assert!(!control.is_running());
        assert!(!control.should_run(token));
        let next = control.start();
        assert!(control.should_run(next));
    }
}
