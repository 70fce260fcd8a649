use toybox_host::prelude::*;
use toybox_host::input::{TextInputEvent, TextInputRect};


fn main() -> anyhow::Result<()> {
	toybox_host::run("input log", |ctx| {
		ctx.input.add_app_event_callback(|event| log::info!("App event: {event:?}"));
		ctx.input.record_text_input(true);
		ctx.input.start_text_input();
		ctx.input.set_text_input_rect(TextInputRect { x: 10, y: 10, width: 200, height: 20 });

		Ok(InputLog)
	})
}


struct InputLog;

impl App for InputLog {
	fn update(&mut self, ctx: &mut Context) {
		let input = &mut ctx.input;

		if input.button(keys::ESCAPE).went_down() {
			let relative = !input.relative_mouse_mode();
			input.set_relative_mouse_mode(relative);
			log::info!("Relative mouse mode: {relative}");
		}

		for (index, button) in [(0, "left"), (1, "middle"), (2, "right")] {
			if input.pointer_button(index).went_down() {
				let position = input.pointers()[0].position;
				log::info!("{button} click at {}, {}", position.x, position.y);
			}
		}

		let wheel = input.mousewheel_delta();
		if wheel.y != 0 {
			log::info!("Wheel: {}", wheel.y);
		}

		for (id, joystick) in input.joysticks() {
			for (index, button) in joystick.buttons().iter().enumerate() {
				if button.went_down() {
					log::info!("Joystick {id} ({}) button {index}", joystick.name().unwrap_or("disconnected"));
				}
			}

			if let Some(hat) = joystick.hats().first()
				&& hat.direction() != HatDirection::Centered
			{
				log::info!("Joystick {id} hat: {:?}", hat.direction());
			}
		}

		for event in input.take_text_input_events() {
			if let TextInputEvent::Text { text } = event {
				log::info!("Text: {text}");
			}
		}

		if input.frames() % 600 == 0 {
			log::info!("{} frames in {:.1}s, window {}x{}", input.frames(), input.time(), ctx.window_size.x, ctx.window_size.y);
		}
	}
}
