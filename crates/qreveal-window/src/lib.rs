//! qreveal-window: minimal winit + wgpu window/event wrapper.
//!
//! Responsibilities:
//! - Create window + surface + device/queue.
//! - Manage surface configuration and resizing.
//! - Dispatch resize, redraw and keyboard editing events to an [`EventHandler`].

use std::sync::Arc;

use anyhow::{Context, Result};
use engine_core::{make_surface_config, wgpu};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

pub mod events;

pub use events::{KeyInput, RevealWindowEvent};

pub struct RevealWindow {
    event_loop: EventLoop<()>,
    state: WindowState,
}

struct WindowState {
    // Leaked so the surface can borrow it for 'static.
    window: &'static Window,
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    scale_factor: f64,
}

pub struct WindowCtx<'a> {
    window: &'a Window,
    adapter: &'a wgpu::Adapter,
    device: &'a Arc<wgpu::Device>,
    queue: &'a Arc<wgpu::Queue>,
    surface: &'a wgpu::Surface<'static>,
    config: &'a mut wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    scale_factor: f64,
    elwt: &'a EventLoopWindowTarget<()>,
}

impl<'a> WindowCtx<'a> {
    pub fn window(&self) -> &Window { self.window }
    pub fn device(&self) -> &wgpu::Device { self.device }
    pub fn queue(&self) -> &wgpu::Queue { self.queue }
    pub fn device_arc(&self) -> Arc<wgpu::Device> { self.device.clone() }
    pub fn queue_arc(&self) -> Arc<wgpu::Queue> { self.queue.clone() }
    pub fn surface_config(&self) -> &wgpu::SurfaceConfiguration { self.config }
    pub fn size(&self) -> PhysicalSize<u32> { self.size }
    pub fn scale_factor(&self) -> f64 { self.scale_factor }
    pub fn request_redraw(&self) { self.window.request_redraw(); }
    pub fn exit(&self) { self.elwt.exit(); }

    pub fn acquire_current_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Rebuild the surface configuration for the current size, e.g. after
    /// the surface was lost or went out of date.
    pub fn reconfigure_surface(&mut self) {
        *self.config = make_surface_config(self.adapter, self.surface, self.size.width, self.size.height);
        self.surface.configure(self.device, self.config);
        log::info!("surface reconfigured at {}x{}", self.config.width, self.config.height);
    }
}

pub trait EventHandler {
    fn init(&mut self, _ctx: &mut WindowCtx) -> Result<()> { Ok(()) }
    fn on_resize(&mut self, _ctx: &mut WindowCtx, _size: PhysicalSize<u32>) -> Result<()> { Ok(()) }
    fn on_key(&mut self, _ctx: &mut WindowCtx, _key: KeyInput) -> Result<()> { Ok(()) }
    fn on_redraw(&mut self, _ctx: &mut WindowCtx) -> Result<()> { Ok(()) }
    fn on_event(&mut self, _ctx: &mut WindowCtx, _event: RevealWindowEvent) -> Result<()> { Ok(()) }
}

impl WindowState {
    fn ctx<'a>(&'a mut self, elwt: &'a EventLoopWindowTarget<()>) -> WindowCtx<'a> {
        WindowCtx {
            window: self.window,
            adapter: &self.adapter,
            device: &self.device,
            queue: &self.queue,
            surface: &self.surface,
            config: &mut self.config,
            size: self.size,
            scale_factor: self.scale_factor,
            elwt,
        }
    }
}

fn report(what: &str, result: Result<()>) {
    if let Err(err) = result {
        log::error!("{what} failed: {err:#}");
    }
}

impl RevealWindow {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        // Create event loop and window
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .build(&event_loop)?;
        let window: &'static Window = Box::leak(Box::new(window));

        // Create wgpu instance + surface
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        // Request adapter/device
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .context("no suitable GPU adapter found")?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None))?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        // Configure surface
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let config = make_surface_config(&adapter, &surface, size.width, size.height);
        surface.configure(&device, &config);

        Ok(Self {
            event_loop,
            state: WindowState {
                window,
                _instance: instance,
                surface,
                adapter,
                device: Arc::new(device),
                queue: Arc::new(queue),
                config,
                size,
                scale_factor,
            },
        })
    }

    pub fn run(self, mut handler: impl EventHandler + 'static) -> Result<()> {
        let Self { event_loop, mut state } = self;
        let mut needs_init = true;

        event_loop.run(move |event, elwt| match event {
            Event::Resumed if needs_init => {
                report("init", handler.init(&mut state.ctx(elwt)));
                needs_init = false;
            }
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                let translated = events::translate_window_event(&event);
                if let Some(ev) = translated.clone() {
                    report("event", handler.on_event(&mut state.ctx(elwt), ev));
                }
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(new_size) => {
                        state.size = new_size;
                        if new_size.width > 0 && new_size.height > 0 {
                            state.config.width = new_size.width;
                            state.config.height = new_size.height;
                            state.surface.configure(&state.device, &state.config);
                        }
                        report("resize", handler.on_resize(&mut state.ctx(elwt), new_size));
                    }
                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        state.scale_factor = scale_factor;
                    }
                    WindowEvent::KeyboardInput { .. } => {
                        if let Some(RevealWindowEvent::Key(key)) = translated {
                            report("key", handler.on_key(&mut state.ctx(elwt), key));
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        report("redraw", handler.on_redraw(&mut state.ctx(elwt)));
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // Redraw continuously; the reveal animates every frame.
                state.window.request_redraw();
            }
            _ => {}
        })?;
        Ok(())
    }
}
