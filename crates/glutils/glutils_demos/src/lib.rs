// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::{error::Error, time::Instant};

use glfw::{Context, OpenGlProfileHint, WindowHint};
use glutils::context::{self, Version};

pub struct WindowConfig {
	pub width: u32,
	pub height: u32,
	pub title: String,
	pub vsync: bool,
	pub gl_version: Version,
	/// Request a debug context and route its messages to the logger.
	pub debug_context: bool,
}

impl Default for WindowConfig {
	fn default() -> Self {
		Self {
			width: 1000,
			height: 1000,
			title: "glutils".to_string(),
			vsync: true,
			gl_version: context::REQUIRED_VERSION,
			debug_context: true,
		}
	}
}

/// Per-frame state handed to the demo loop.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
	pub width: i32,
	pub height: i32,
	/// Seconds since the loop started.
	pub time: f32,
}

/// Open a window, run `setup` once the context is current, then call the loop
/// it returns every frame until the window is closed.
pub fn view_window<I, L>(config: WindowConfig, setup: I) -> Result<(), Box<dyn Error>>
where
	I: FnOnce() -> glutils::Result<L>,
	L: FnMut(Frame),
{
	env_logger::init();

	let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;
	glfw.window_hint(WindowHint::ContextVersion(
		config.gl_version.major,
		config.gl_version.minor,
	));
	glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
	glfw.window_hint(WindowHint::OpenGlDebugContext(config.debug_context));

	let (mut window, events) = glfw
		.create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
		.ok_or("could not create window")?;

	window.make_current();

	if !config.vsync {
		glfw.set_swap_interval(glfw::SwapInterval::None);
	}

	window.set_size_polling(true);

	glutils::load_with(|p| window.get_proc_address(p) as *const _);
	context::require_version(config.gl_version)?;

	if config.debug_context {
		glutils::debug::enable_debug_output(true);
	}

	let (width, height) = window.get_framebuffer_size();
	let mut frame = Frame { width, height, time: 0.0 };

	let mut demo_loop = setup()?;
	let start = Instant::now();

	while !window.should_close() {
		frame.time = start.elapsed().as_secs_f32();
		demo_loop(frame);

		window.swap_buffers();
		glfw.poll_events();
		for (_, event) in glfw::flush_messages(&events) {
			if let glfw::WindowEvent::Size(..) = event {
				(frame.width, frame.height) = window.get_framebuffer_size();
				unsafe { gl::Viewport(0, 0, frame.width, frame.height) };
			}
		}
	}

	Ok(())
}
