use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use engine_core::{GraphicsEngine, PassManager, Viewport};
use qreveal_config::QrevealConfig;
use qreveal_scene::{GeometryLayout, GpuRevealScene, ItemChange, QrCodeItem, RevealTimeline};
use qreveal_window::{EventHandler, KeyInput, RevealWindow, WindowCtx};

/// Text from `demo-app TEXT` or `demo-app --text=TEXT`. The last one wins.
fn text_from_args(args: impl IntoIterator<Item = String>) -> Option<String> {
    args.into_iter()
        .filter_map(|a| match a.strip_prefix("--text=") {
            Some(text) => Some(text.to_string()),
            None if a.starts_with("--") => None,
            None => Some(a),
        })
        .last()
}

/// Apply one key to the edited text. Returns true when the reveal should
/// start over without a text change.
fn edit_text(text: &mut String, key: KeyInput) -> bool {
    match key {
        KeyInput::Text(s) => text.push_str(&s),
        KeyInput::Backspace => {
            text.pop();
        }
        KeyInput::Escape => text.clear(),
        KeyInput::Enter => return true,
    }
    false
}

struct Renderer {
    engine: GraphicsEngine,
    passes: PassManager,
}

struct RevealApp {
    config: QrevealConfig,
    text: String,
    item: QrCodeItem,
    timeline: RevealTimeline,
    started: Instant,
    // Set by the item's observer when the text changes.
    restart: Rc<Cell<bool>>,
    clear: wgpu::Color,
    gpu: GpuRevealScene,
    renderer: Option<Renderer>,
}

impl RevealApp {
    fn new(config: QrevealConfig) -> Result<Self> {
        let style = config.style().context("invalid [colors] configuration")?;
        let clear = config.clear_color().context("invalid [colors] configuration")?.to_wgpu();

        let restart = Rc::new(Cell::new(false));
        let mut item = QrCodeItem::new()
            .with_encode_options(config.encode_options())
            .with_style(style)
            .with_params(config.reveal_params());
        let flag = restart.clone();
        item.subscribe(move |change| {
            if change == ItemChange::Text {
                flag.set(true);
            }
        });
        item.set_text(&config.demo.text);

        Ok(Self {
            text: config.demo.text.clone(),
            timeline: config.timeline(),
            config,
            item,
            started: Instant::now(),
            restart,
            clear,
            gpu: GpuRevealScene::new(),
            renderer: None,
        })
    }
}

impl EventHandler for RevealApp {
    fn init(&mut self, ctx: &mut WindowCtx) -> Result<()> {
        let engine = GraphicsEngine::from_shared(ctx.device_arc(), ctx.queue_arc());
        let passes = PassManager::new(
            engine.device(),
            ctx.surface_config().format,
            self.config.rendering.msaa_samples,
        );
        self.renderer = Some(Renderer { engine, passes });
        self.started = Instant::now();
        ctx.request_redraw();
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut WindowCtx, size: winit::dpi::PhysicalSize<u32>) -> Result<()> {
        // Pooled MSAA targets of the old size are never reused.
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.engine.allocator_mut().purge_textures();
        }
        log::debug!("resized to {}x{}", size.width, size.height);
        ctx.request_redraw();
        Ok(())
    }

    fn on_key(&mut self, _ctx: &mut WindowCtx, key: KeyInput) -> Result<()> {
        if edit_text(&mut self.text, key) {
            self.restart.set(true);
        } else if self.item.set_text(&self.text) {
            log::info!("text changed ({} bytes)", self.text.len());
        }
        Ok(())
    }

    fn on_redraw(&mut self, ctx: &mut WindowCtx) -> Result<()> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        if self.restart.replace(false) {
            self.started = Instant::now();
        }

        self.item.set_reveal_progress(self.timeline.progress_at(self.started.elapsed()));
        let size = ctx.size();
        let viewport = Viewport { width: size.width, height: size.height };
        let layout = GeometryLayout::centered(viewport, self.config.demo.fill);
        let update = self.item.update_paint(layout);

        let queue = renderer.engine.queue();
        self.gpu.sync(&self.item, update, renderer.engine.allocator_mut(), &queue)?;

        let frame = match ctx.acquire_current_frame() {
            Ok(frame) => frame,
            Err(err) => {
                // Vertex and index buffers outlive the surface.
                log::warn!("dropping frame: {err}");
                ctx.reconfigure_surface();
                return Ok(());
            }
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = renderer
            .engine
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("qreveal-encoder") });
        renderer.passes.render_frame(
            &mut encoder,
            renderer.engine.allocator_mut(),
            &view,
            size.width,
            size.height,
            self.gpu.scene(),
            self.clear,
            &queue,
        );
        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = QrevealConfig::load();
    if let Some(text) = text_from_args(std::env::args().skip(1)) {
        config.demo.text = text;
    }
    log::info!("encoding {:?}", config.demo.text);

    let window = RevealWindow::new(&config.demo.title, config.demo.width, config.demo.height)?;
    let app = RevealApp::new(config)?;
    window.run(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn text_argument_forms() {
        assert_eq!(text_from_args(args(&[])), None);
        assert_eq!(text_from_args(args(&["hello"])), Some("hello".into()));
        assert_eq!(text_from_args(args(&["--text=a b"])), Some("a b".into()));
        assert_eq!(text_from_args(args(&["--verbose"])), None);
        assert_eq!(text_from_args(args(&["--text="])), Some(String::new()));
    }

    #[test]
    fn editing_keys() {
        let mut text = String::from("ab");
        assert!(!edit_text(&mut text, KeyInput::Text("cé".into())));
        assert_eq!(text, "abcé");
        edit_text(&mut text, KeyInput::Backspace);
        assert_eq!(text, "abc");
        assert!(edit_text(&mut text, KeyInput::Enter));
        assert_eq!(text, "abc");
        assert!(!edit_text(&mut text, KeyInput::Text(" ".into())));
        assert_eq!(text, "abc ");
        edit_text(&mut text, KeyInput::Backspace);
        edit_text(&mut text, KeyInput::Escape);
        assert!(text.is_empty());
        edit_text(&mut text, KeyInput::Backspace);
        assert!(text.is_empty());
    }

    #[test]
    fn text_change_requests_restart() {
        let mut app = RevealApp::new(QrevealConfig::default()).unwrap();
        app.restart.set(false);
        app.text.push('x');
        assert!(app.item.set_text(&app.text));
        assert!(app.restart.get());
    }

    #[test]
    fn bad_colors_fail_startup() {
        let mut config = QrevealConfig::default();
        config.colors.clear = "black".into();
        assert!(RevealApp::new(config).is_err());
    }
}
