pub use winit;
pub use toybox_input as input;
pub use toybox_cfg as cfg;

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use common::math::Vec2i;

use toybox_input::AppEvent;

mod held;
mod logging;
mod platform;
mod translate;

#[cfg(feature="gamepad")]
mod gamepad;

pub use logging::init_logging;
pub use platform::WinitPlatform;

pub mod prelude {
	pub use super::{App, Context, InputSystem};
	pub use toybox_input::prelude::*;
	pub use common::math::*;
}


pub type InputSystem = input::System<WinitPlatform>;


pub struct Context {
	pub input: InputSystem,
	pub cfg: cfg::Config,
	pub window: Arc<Window>,
	pub window_size: Vec2i,
}


pub trait App {
	/// Called once per frame, after input has been gathered.
	fn update(&mut self, ctx: &mut Context);
}


pub struct Settings<'title> {
	pub initial_title: &'title str,

	/// Config file to read input settings from. Command line `key=value` arguments are always applied on top.
	pub config_path: Option<PathBuf>,
}

impl<'title> Settings<'title> {
	pub fn new(initial_title: &'title str) -> Self {
		Settings {
			initial_title,
			config_path: None,
		}
	}

	pub fn with_config_path(self, config_path: impl Into<PathBuf>) -> Self {
		Settings {
			config_path: Some(config_path.into()),
			..self
		}
	}
}


pub fn run<F, A>(title: &str, start_app: F) -> anyhow::Result<()>
	where A: App + 'static
		, F: FnOnce(&mut Context) -> anyhow::Result<A>
{
	run_with_settings(Settings::new(title), start_app)
}


pub fn run_with_settings<F, A>(settings: Settings<'_>, start_app: F) -> anyhow::Result<()>
	where A: App + 'static
		, F: FnOnce(&mut Context) -> anyhow::Result<A>
{
	init_logging()?;

	let cfg = match &settings.config_path {
		Some(path) => cfg::Config::from_file(path)?,
		None => cfg::Config::from_tables(cfg::Table::new(), cfg::Table::from_cli()),
	};

	let event_loop = EventLoop::new()?;
	event_loop.set_control_flow(ControlFlow::Poll);

	let mut host = Host {
		title: settings.initial_title.to_owned(),
		start: Some((cfg, start_app)),
		hosted: None,
		error: None,
		suspended: false,
	};

	event_loop.run_app(&mut host)?;

	match host.error {
		Some(error) => Err(error),
		None => Ok(()),
	}
}



struct Hosted<A: App> {
	context: Context,
	app: A,
}


struct Host<F, A: App> {
	title: String,
	start: Option<(cfg::Config, F)>,
	hosted: Option<Hosted<A>>,
	error: Option<anyhow::Error>,
	suspended: bool,
}

impl<F, A> Host<F, A>
	where A: App
		, F: FnOnce(&mut Context) -> anyhow::Result<A>
{
	#[tracing::instrument(skip_all, name="host::start")]
	fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
		let Some((cfg, start_app)) = self.start.take() else {
			return Ok(())
		};

		let window_attributes = Window::default_attributes()
			.with_title(self.title.clone());

		let window = Arc::new(event_loop.create_window(window_attributes)?);
		let size = window.inner_size();
		log::info!("Window created: {}x{}", size.width, size.height);

		let input_settings = input::Settings::from_config(&cfg);
		let input = input::System::new(WinitPlatform::new(window.clone()), input_settings);

		let mut context = Context {
			input,
			cfg,
			window,
			window_size: Vec2i::new(size.width as i32, size.height as i32),
		};

		let app = start_app(&mut context)?;
		self.hosted = Some(Hosted { context, app });

		Ok(())
	}

	fn platform_mut(&mut self) -> Option<&mut WinitPlatform> {
		self.hosted.as_mut()
			.map(|hosted| hosted.context.input.platform_mut())
	}
}

impl<F, A> ApplicationHandler for Host<F, A>
	where A: App
		, F: FnOnce(&mut Context) -> anyhow::Result<A>
{
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		if self.hosted.is_none() {
			if let Err(error) = self.start(event_loop) {
				self.error = Some(error);
				event_loop.exit();
			}

			return
		}

		if std::mem::take(&mut self.suspended)
			&& let Some(platform) = self.platform_mut()
		{
			platform.on_app_event(AppEvent::WillEnterForeground);
			platform.on_app_event(AppEvent::DidEnterForeground);
		}
	}

	fn suspended(&mut self, _: &ActiveEventLoop) {
		self.suspended = true;

		if let Some(platform) = self.platform_mut() {
			platform.on_app_event(AppEvent::WillEnterBackground);
			platform.on_app_event(AppEvent::DidEnterBackground);
		}
	}

	fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
		if let Some(platform) = self.platform_mut() {
			platform.on_window_event(&event);
		}
	}

	fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
		if let Some(platform) = self.platform_mut() {
			platform.on_device_event(&event);
		}
	}

	fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
		let Some(Hosted { context, app }) = &mut self.hosted else {
			return
		};

		context.input.advance_frame(&mut context.window_size);
		app.update(context);

		if context.input.exit_requested() {
			event_loop.exit();
		}
	}

	fn memory_warning(&mut self, _: &ActiveEventLoop) {
		if let Some(platform) = self.platform_mut() {
			platform.on_app_event(AppEvent::LowMemory);
		}
	}

	fn exiting(&mut self, _: &ActiveEventLoop) {
		let Some(Hosted { context, .. }) = &mut self.hosted else {
			return
		};

		// One last frame so lifecycle callbacks hear about it.
		context.input.platform_mut().on_app_event(AppEvent::Terminating);
		context.input.advance_frame(&mut context.window_size);
		context.input.shutdown();
	}
}
