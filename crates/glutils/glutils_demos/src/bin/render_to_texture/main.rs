// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Offscreen rendering into a texture, composited onto the window with blits

use std::{error::Error, time::Duration};

use glutils::{
	debug,
	framebuffer::{Attachment, BlitMask, FramebufferTarget},
	texture::{InternalFormat, MagFilter, MinFilter, PixelFormat, TextureTarget},
	Framebuffer,
	FramebufferHandle,
	Named,
	Renderbuffer,
	Sync,
	Texture,
};
use glutils_demos::{Frame, WindowConfig};
use rand::Rng;

const SIZE: i32 = 256;
const CHECKER: i32 = 8;

fn checkerboard() -> Vec<u8> {
	(0..CHECKER * CHECKER)
		.flat_map(|i| match (i % CHECKER + i / CHECKER) % 2 {
			0 => [240, 240, 240, 255],
			_ => [30, 30, 30, 255],
		})
		.collect()
}

fn random_color() -> [f32; 4] {
	let mut rng = rand::thread_rng();
	[rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), 1.0]
}

fn main() -> Result<(), Box<dyn Error>> {
	glutils_demos::view_window(
		WindowConfig {
			title: "render to texture".to_string(),
			..Default::default()
		},
		|| {
			let checker = Texture::new(TextureTarget::Texture2D)?;
			checker.storage_2d(1, InternalFormat::Rgba8, CHECKER, CHECKER);
			checker.sub_image_2d(0, 0, 0, CHECKER, CHECKER, PixelFormat::Rgba, &checkerboard());
			checker.set_label("checkerboard");

			let checker_framebuffer = Framebuffer::new(())?;
			checker_framebuffer.attach_texture(Attachment::Color(0), *checker, 0);
			checker_framebuffer.check(FramebufferTarget::Read)?;

			let color = Texture::new(TextureTarget::Texture2D)?;
			color.storage_2d(1, InternalFormat::Rgba8, SIZE, SIZE);
			color.set_min_filter(MinFilter::Linear);
			color.set_mag_filter(MagFilter::Linear);

			let depth = Renderbuffer::new(())?;
			depth.storage(InternalFormat::Depth24Stencil8, SIZE, SIZE);

			let offscreen = Framebuffer::new(())?;
			offscreen.attach_texture(Attachment::Color(0), *color, 0);
			offscreen.attach_renderbuffer(Attachment::DepthStencil, *depth);
			offscreen.set_draw_buffers(&[Attachment::Color(0)]);
			offscreen.check(FramebufferTarget::Framebuffer)?;
			offscreen.set_label("offscreen");

			log::info!(
				"offscreen target is {}x{}, depth {}x{}",
				color.width(0),
				color.height(0),
				depth.width(),
				depth.height()
			);

			let mut background = random_color();
			let mut changed_at = 0.0;
			let mut fence = Sync::null();

			Ok(move |frame: Frame| {
				if frame.time - changed_at > 1.0 {
					background = random_color();
					changed_at = frame.time;
				}

				// report how far behind the GPU is running
				if !fence.is_null() {
					match fence.client_wait(false, Duration::ZERO) {
						Ok(status) if !status.signaled() => log::debug!("previous frame still in flight"),
						Ok(_) => {},
						Err(e) => log::error!("{e}"),
					}
				}

				{
					let _group = debug::push_group("offscreen");
					unsafe {
						gl::ClearNamedFramebufferfv(offscreen.name(), gl::COLOR, 0, background.as_ptr());
						gl::ClearNamedFramebufferfi(offscreen.name(), gl::DEPTH_STENCIL, 0, 1.0, 0);
					}

					let inset = SIZE / 4;
					checker_framebuffer.blit(
						*offscreen,
						[0, 0, CHECKER, CHECKER],
						[inset, inset, SIZE - inset, SIZE - inset],
						BlitMask::COLOR,
						MagFilter::Nearest,
					);
				}

				let side = frame.width.min(frame.height);
				let (x, y) = ((frame.width - side) / 2, (frame.height - side) / 2);

				let _group = debug::push_group("composite");
				FramebufferHandle::unbind(FramebufferTarget::Framebuffer);
				unsafe {
					gl::ClearColor(0.0, 0.0, 0.0, 1.0);
					gl::Clear(gl::COLOR_BUFFER_BIT);
				}
				offscreen.blit(
					FramebufferHandle::DEFAULT,
					[0, 0, SIZE, SIZE],
					[x, y, x + side, y + side],
					BlitMask::COLOR,
					MagFilter::Linear,
				);

				match Sync::new(()) {
					Ok(next) => fence = next,
					Err(e) => log::error!("{e}"),
				}
			})
		},
	)
}
