//! Headless Shell
//!
//! Drives an `App` without a window system: it owns the state, runs the
//! update loop, executes `Command` futures on tokio, and produces a fresh
//! `LayoutSnapshot` per frame. Mouse events are synthesized by the caller
//! and routed through hit-testing plus pointer capture, exactly as a
//! windowed shell would.

use std::collections::HashMap;

use tokio::task::JoinSet;
use tracing::{debug, trace};

use crate::app::{App, AppConfig, CaptureRequest, Command};
use crate::events::{CaptureState, MouseEvent};
use crate::image_store::{ImageHandle, ImageStore};
use crate::layout_snapshot::LayoutSnapshot;
use crate::primitives::Rect;
use crate::source_id::SourceId;

/// Headless application driver.
pub struct Shell<A: App> {
    state: A::State,
    images: ImageStore,
    snapshot: LayoutSnapshot,
    capture: CaptureState,
    viewport: Rect,
    /// Command futures still running on the executor.
    tasks: JoinSet<A::Message>,
    /// Stand-in for the renderer's image atlas: handle -> (width, height).
    loaded_images: HashMap<ImageHandle, (u32, u32)>,
}

impl<A: App> Shell<A> {
    /// Initialize the app and run its init command.
    ///
    /// Must be called inside a tokio runtime (commands are spawned onto it).
    pub fn new(config: &AppConfig) -> Self {
        let mut images = ImageStore::new();
        let (state, init_cmd) = A::init(&mut images);

        let mut shell = Self {
            state,
            images,
            snapshot: LayoutSnapshot::new(),
            capture: CaptureState::None,
            viewport: Rect::new(0.0, 0.0, config.window_size.0, config.window_size.1),
            tasks: JoinSet::new(),
            loaded_images: HashMap::new(),
        };
        debug!(title = %config.title, "shell initialized");
        shell.spawn_command(init_cmd);
        shell.render();
        shell
    }

    /// Run one layout pass, replacing the previous frame's snapshot.
    pub fn render(&mut self) {
        // Prepare pass: apply queued image uploads and unloads
        for pending in self.images.drain_pending() {
            self.loaded_images
                .insert(pending.handle, (pending.width, pending.height));
        }
        for handle in self.images.drain_pending_unloads() {
            self.loaded_images.remove(&handle);
        }

        self.snapshot.clear();
        self.snapshot.set_viewport(self.viewport);
        self.snapshot
            .primitives_mut()
            .add_solid_rect(self.viewport, A::background_color(&self.state));
        A::view(&self.state, &mut self.snapshot);
        trace!(primitives = self.snapshot.primitives().len(), "frame rendered");
    }

    /// Dispatch a message through `update()`, spawn the resulting command,
    /// and re-render.
    pub fn dispatch(&mut self, message: A::Message) {
        debug!(?message, "dispatch");
        let cmd = A::update(&mut self.state, message, &mut self.images);
        self.spawn_command(cmd);
        self.render();
    }

    /// Route a mouse event to the app.
    ///
    /// Hit-tests against the current snapshot, forwards to `on_mouse()`,
    /// applies any capture request, and dispatches the produced message.
    pub fn send_mouse(&mut self, event: MouseEvent) {
        let hit = self.hit_for(&event);
        let response = A::on_mouse(&self.state, event, hit, &self.capture);

        match response.capture {
            CaptureRequest::None => {}
            CaptureRequest::Capture(source) => self.capture = CaptureState::Captured(source),
            CaptureRequest::Release => self.capture = CaptureState::None,
        }

        if let Some(message) = response.message {
            self.dispatch(message);
        }
    }

    /// Dispatch completed command messages until no command futures remain.
    ///
    /// Completion and delivery are a single `join_next` step, so idleness
    /// is declared exactly when the task set is empty and every message
    /// has been dispatched. Returns once the app has reached a stable
    /// state. Useful for tests and for batch runs of the headless shell.
    pub async fn run_until_idle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(message) => self.dispatch(message),
                Err(err) => debug!(%err, "command task aborted"),
            }
        }
    }

    /// Spawn each future of a command onto the runtime.
    ///
    /// Futures run on the executor immediately; `run_until_idle` collects
    /// their messages from the task set as they finish.
    fn spawn_command(&mut self, mut cmd: Command<A::Message>) {
        for future in cmd.take_futures() {
            self.tasks.spawn(future);
        }
    }

    fn hit_for(&self, event: &MouseEvent) -> Option<SourceId> {
        let position = match event {
            MouseEvent::ButtonPressed { position, .. }
            | MouseEvent::ButtonReleased { position, .. }
            | MouseEvent::CursorMoved { position }
            | MouseEvent::WheelScrolled { position, .. } => *position,
            MouseEvent::CursorEntered | MouseEvent::CursorLeft => return None,
        };
        self.snapshot.hit_test(position)
    }

    /// The app state.
    pub fn state(&self) -> &A::State {
        &self.state
    }

    /// The most recent layout snapshot.
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    /// The image store (pending uploads are drained by the renderer).
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Pixel dimensions of a loaded image, if the handle is live.
    pub fn loaded_image_size(&self, handle: ImageHandle) -> Option<(u32, u32)> {
        self.loaded_images.get(&handle).copied()
    }

    /// Current pointer capture state.
    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    /// Title the app wants shown by its host.
    pub fn title(&self) -> String {
        A::title(&self.state)
    }

    /// Whether the app has requested exit.
    pub fn should_exit(&self) -> bool {
        A::should_exit(&self.state)
    }
}

/// Run an app headlessly until it settles, then return its final state.
///
/// Builds a tokio runtime, initializes the shell, and drives messages and
/// commands to quiescence.
pub fn run<A: App>(config: AppConfig) -> anyhow::Result<Shell<A>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let shell = runtime.block_on(async {
        let mut shell = Shell::<A>::new(&config);
        shell.run_until_idle().await;
        shell
    });
    Ok(shell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MouseResponse;
    use crate::layout::{Column, Length, TextElement};

    struct Counter;

    #[derive(Debug, Clone)]
    enum Msg {
        Add(u32),
        FanOut,
        Chain(u32),
    }

    impl App for Counter {
        type State = u32;
        type Message = Msg;

        fn init(_images: &mut ImageStore) -> (u32, Command<Msg>) {
            (0, Command::message(Msg::Add(1)))
        }

        fn update(state: &mut u32, message: Msg, _images: &mut ImageStore) -> Command<Msg> {
            match message {
                Msg::Add(n) => {
                    *state += n;
                    Command::none()
                }
                Msg::FanOut => {
                    Command::batch([Command::message(Msg::Add(10)), Command::message(Msg::Add(20))])
                }
                Msg::Chain(n) => {
                    *state += 1;
                    if n == 0 {
                        Command::none()
                    } else {
                        Command::perform(async move {
                            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
                            Msg::Chain(n - 1)
                        })
                    }
                }
            }
        }

        fn view(state: &u32, snapshot: &mut LayoutSnapshot) {
            let viewport = snapshot.viewport();
            Column::new()
                .width(Length::Fill)
                .push(TextElement::new(format!("count: {state}")))
                .layout(snapshot, viewport);
        }

        fn on_mouse(
            _state: &u32,
            event: MouseEvent,
            _hit: Option<SourceId>,
            _capture: &CaptureState,
        ) -> MouseResponse<Msg> {
            match event {
                MouseEvent::ButtonPressed { .. } => MouseResponse::message(Msg::FanOut),
                _ => MouseResponse::none(),
            }
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn init_command_runs_to_idle() {
        let mut shell = Shell::<Counter>::new(&AppConfig::default());
        shell.run_until_idle().await;
        assert_eq!(*shell.state(), 1);
        assert!(shell.snapshot().primitives().find_text("count: 1").is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn chained_commands_never_stall_idle_detection() {
        // Each link completes right as the shell is deciding whether it is
        // idle; every completion must be consumed together with its message.
        let mut shell = Shell::<Counter>::new(&AppConfig::default());
        tokio::time::timeout(std::time::Duration::from_secs(3), shell.run_until_idle())
            .await
            .expect("idle detection stalled");
        assert_eq!(*shell.state(), 1);

        shell.dispatch(Msg::Chain(5));
        tokio::time::timeout(std::time::Duration::from_secs(3), shell.run_until_idle())
            .await
            .expect("idle detection stalled");
        assert_eq!(*shell.state(), 1 + 6);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn render_clears_to_app_background() {
        let shell = Shell::<Counter>::new(&AppConfig::default());
        let clear = shell
            .snapshot()
            .primitives()
            .solid_rects()
            .next()
            .expect("clear rect emitted");
        assert_eq!(clear.rect, shell.snapshot().viewport());
        assert_eq!(clear.color, crate::primitives::Color::BLACK);
        assert_eq!(shell.title(), "App");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn mouse_event_fans_out_commands() {
        let mut shell = Shell::<Counter>::new(&AppConfig::default());
        shell.run_until_idle().await;

        shell.send_mouse(MouseEvent::left_press(10.0, 10.0));
        shell.run_until_idle().await;

        assert_eq!(*shell.state(), 31);
    }
}
