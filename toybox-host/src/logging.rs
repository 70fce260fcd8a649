use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};


/// Route `log` records to the terminal and panics through `log`.
/// With the `tracy` feature, `tracing` spans are also forwarded to a tracy client.
pub fn init_logging() -> anyhow::Result<()> {
	let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };

	let config = ConfigBuilder::new()
		.set_target_level(LevelFilter::Error)
		.set_thread_level(LevelFilter::Off)
		.add_filter_ignore_str("winit")
		.add_filter_ignore_str("gilrs")
		.build();

	TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)?;

	log_panics::init();

	#[cfg(feature="tracy")]
	{
		use tracing_subscriber::layer::SubscriberExt;

		let subscriber = tracing_subscriber::registry()
			.with(tracing_tracy::TracyLayer::default());

		tracing::subscriber::set_global_default(subscriber)?;
	}

	Ok(())
}
