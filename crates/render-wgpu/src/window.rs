use crate::bindings::KeyBindings;
use crate::gpu::WgpuRenderer;
use freelook_common::Config;
use freelook_input::{Input, Key};
use freelook_render::{Display, Mesh, RenderTransform, SurfaceInitError};
use std::cell::Cell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowAttributes, WindowId};

/// Pumps allowed for the platform to resume the app and hand us a window.
const WINDOW_CREATE_PUMPS: u32 = 100;

/// Open the window and GPU surface described by `config`.
///
/// Returns the display and input halves; they share the window and the
/// close-request flag. Any failure along the way is a `SurfaceInitError`.
pub fn open(config: &Config) -> Result<(WindowDisplay, WindowInput), SurfaceInitError> {
    let mut event_loop = EventLoop::new().map_err(|e| {
        SurfaceInitError::new("failed to create the event loop", "window", "WindowInput", "open")
            .with_source(e)
    })?;

    let mut attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false);
    if config.fullscreen {
        attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    let close_requested = Rc::new(Cell::new(false));
    let mut events = WindowEvents::new(attributes, close_requested.clone());

    for _ in 0..WINDOW_CREATE_PUMPS {
        let status = event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut events);
        if let Some(err) = events.create_error.take() {
            return Err(SurfaceInitError::new(
                "failed to create the window",
                "window",
                "WindowInput",
                "open",
            )
            .with_source(err));
        }
        if events.window.is_some() {
            break;
        }
        if let PumpStatus::Exit(code) = status {
            return Err(SurfaceInitError::new(
                format!("event loop exited with code {code} before a window was created"),
                "window",
                "WindowInput",
                "open",
            ));
        }
    }

    let window = events.window.clone().ok_or_else(|| {
        SurfaceInitError::new(
            "the platform never resumed the application, no window was created",
            "window",
            "WindowInput",
            "open",
        )
    })?;

    let display = WindowDisplay::create(window.clone(), close_requested)?;
    let input = WindowInput {
        event_loop,
        events,
        bindings: KeyBindings::default(),
        window,
        keys: BTreeSet::new(),
        mouse_delta: (0.0, 0.0),
    };

    Ok((display, input))
}

/// winit event sink: collects key, mouse and close events between polls.
struct WindowEvents {
    attributes: Option<WindowAttributes>,
    window: Option<Arc<Window>>,
    create_error: Option<OsError>,
    held: HashSet<KeyCode>,
    mouse_delta: (f64, f64),
    cursor_grabbed: bool,
    close_requested: Rc<Cell<bool>>,
}

impl WindowEvents {
    fn new(attributes: WindowAttributes, close_requested: Rc<Cell<bool>>) -> Self {
        Self {
            attributes: Some(attributes),
            window: None,
            create_error: None,
            held: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            cursor_grabbed: false,
            close_requested,
        }
    }

    fn on_key(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(code);
        } else {
            self.held.remove(&code);
        }
    }

    /// Raw motion only counts while the cursor is grabbed.
    fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.cursor_grabbed {
            self.mouse_delta.0 += dx;
            self.mouse_delta.1 += dy;
        }
    }

    /// Release events are not delivered to unfocused windows, so forget
    /// everything held when focus goes away.
    fn on_focus_lost(&mut self) {
        self.held.clear();
    }

    fn take_mouse_delta(&mut self) -> (f64, f64) {
        std::mem::take(&mut self.mouse_delta)
    }
}

impl ApplicationHandler for WindowEvents {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(attributes) = self.attributes.take() else {
            return;
        };
        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::debug!("window close requested");
                self.close_requested.set(true);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => self.on_key(code, state == ElementState::Pressed),
            WindowEvent::Focused(false) => self.on_focus_lost(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.on_mouse_motion(delta.0, delta.1);
        }
    }
}

/// Keyboard and mouse input read from the window's event loop.
pub struct WindowInput {
    event_loop: EventLoop<()>,
    events: WindowEvents,
    bindings: KeyBindings,
    window: Arc<Window>,
    keys: BTreeSet<Key>,
    mouse_delta: (f32, f32),
}

impl WindowInput {
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

impl Input for WindowInput {
    fn poll(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.events);
        if let PumpStatus::Exit(code) = status {
            tracing::debug!(code, "event loop exited");
            self.events.close_requested.set(true);
        }

        self.keys = self.bindings.held_keys(&self.events.held);
        let (dx, dy) = self.events.take_mouse_delta();
        self.mouse_delta = (dx as f32, dy as f32);
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn mouse_delta_x(&self) -> f32 {
        self.mouse_delta.0
    }

    fn mouse_delta_y(&self) -> f32 {
        self.mouse_delta.1
    }

    fn set_cursor_grabbed(&mut self, grabbed: bool) {
        let result = if grabbed {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = result {
            tracing::warn!("cursor grab change failed: {e}");
        }
        self.window.set_cursor_visible(!grabbed);

        self.events.cursor_grabbed = grabbed;
        self.events.mouse_delta = (0.0, 0.0);
        tracing::info!(grabbed, "cursor grab changed");
    }
}

struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

/// Window-backed display rendering through wgpu.
pub struct WindowDisplay {
    window: Arc<Window>,
    gpu: Option<GpuContext>,
    pending: Option<RenderTransform>,
    close_requested: Rc<Cell<bool>>,
}

impl WindowDisplay {
    fn create(
        window: Arc<Window>,
        close_requested: Rc<Cell<bool>>,
    ) -> Result<Self, SurfaceInitError> {
        let fail = |message: &str| {
            SurfaceInitError::new(message.to_string(), "gpu", "WindowDisplay", "create")
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| fail("failed to create the window surface").with_source(e))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| fail("no GPU adapter is compatible with the window surface"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("freelook_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| fail("failed to create the GPU device").with_source(e))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| fail("the surface reports no supported texture formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let info = adapter.get_info();
        tracing::info!(
            backend = info.backend.to_str(),
            adapter = %info.name,
            width = config.width,
            height = config.height,
            "GPU surface initialized"
        );

        Ok(Self {
            window,
            gpu: Some(GpuContext {
                surface,
                device,
                queue,
                config,
                renderer,
            }),
            pending: None,
            close_requested,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl GpuContext {
    /// Follow the window size; `false` while the window has no area.
    fn sync_size(&mut self, size: PhysicalSize<u32>) -> bool {
        if size.width == 0 || size.height == 0 {
            return false;
        }
        if size.width != self.config.width || size.height != self.config.height {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer
                .resize(&self.device, self.config.width, self.config.height);
            tracing::debug!(width = size.width, height = size.height, "surface reconfigured");
        }
        true
    }
}

impl Display for WindowDisplay {
    fn submit(&mut self, transform: &RenderTransform, scene: &Mesh) {
        if let Some(gpu) = &mut self.gpu {
            gpu.renderer.upload_scene(&gpu.device, scene);
            self.pending = Some(*transform);
        }
    }

    fn present(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let Some(transform) = self.pending.take() else {
            return;
        };
        if !gpu.sync_size(self.window.inner_size()) {
            return;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::warn!("surface error, frame skipped: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        gpu.renderer
            .render(&gpu.device, &gpu.queue, &view, &transform);
        output.present();
    }

    fn is_close_requested(&self) -> bool {
        self.close_requested.get()
    }

    fn destroy(&mut self) {
        if self.gpu.take().is_some() {
            self.window.set_visible(false);
            tracing::info!("window display destroyed");
        }
    }
}
