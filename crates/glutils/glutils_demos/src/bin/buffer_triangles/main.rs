// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Triangles streamed through a persistently mapped ring of vertex buffers

use std::{error::Error, time::Duration};

use bytemuck::{Pod, Zeroable};
use glutils::{
	buffer::{AccessFlags, Range, StorageFlags},
	debug,
	shader::ShaderType,
	vertex_array::AttribSize,
	Buffer,
	Named,
	Program,
	Shader,
	Sync,
	VertexArray,
	VertexAttribute,
};
use glutils_demos::{Frame, WindowConfig};

const VERTEX: &str = "#version 450
layout(location = 0) in vec2 position;
layout(location = 1) in vec4 color;
out vec4 v_color;
void main() {
	v_color = color;
	gl_Position = vec4(position, 0.0, 1.0);
}
";

const FRAGMENT: &str = "#version 450
in vec4 v_color;
out vec4 frag_color;
void main() {
	frag_color = v_color;
}
";

const TRIANGLES: usize = 10;
const VERTICES: usize = TRIANGLES * 3;
// frames the GPU may lag behind before the CPU waits
const SEGMENTS: usize = 3;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
	position: [f32; 2],
	color: [u8; 4],
}

const LAYOUT: [VertexAttribute; 2] = [
	VertexAttribute::new::<f32>(AttribSize::Two),
	VertexAttribute::normalized::<u8>(AttribSize::Four),
];

fn triangles(time: f32, out: &mut [Vertex]) {
	for (i, triangle) in out.chunks_exact_mut(3).enumerate() {
		let h = (time * 0.5 - i as f32 * 0.15).rem_euclid(2.0) - 1.0;
		let v = -0.8 + i as f32 * 0.15;
		let shade = (255 - i * 16) as u8;

		let points = [[h - 0.1, v], [h + 0.1, v], [h, v + 0.1]];
		for (vertex, position) in triangle.iter_mut().zip(points) {
			*vertex = Vertex { position, color: [shade, 255, 255, 255] };
		}
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	glutils_demos::view_window(
		WindowConfig {
			title: "buffer triangles".to_string(),
			..Default::default()
		},
		|| {
			let vertex = Shader::from_source(ShaderType::Vertex, VERTEX)?;
			let fragment = Shader::from_source(ShaderType::Fragment, FRAGMENT)?;
			let program = Program::from_shaders(&[*vertex, *fragment])?;
			program.set_label("triangles");

			let segment = Range::of::<Vertex>(0, VERTICES);
			let buffer = Buffer::new(())?;
			buffer.allocate_immutable(
				segment.size * SEGMENTS as isize,
				StorageFlags::MAP_WRITE | StorageFlags::MAP_PERSISTENT | StorageFlags::MAP_COHERENT,
			);
			let mapping = unsafe {
				buffer.map_range(
					Range::new(0, buffer.size()),
					AccessFlags::WRITE | AccessFlags::PERSISTENT | AccessFlags::COHERENT,
				)?
			}
			.cast::<Vertex>();

			let vertex_array = VertexArray::new(())?;
			let stride = vertex_array.set_layout(0, 0, &LAYOUT);
			vertex_array.bind_vertex_buffer(0, *buffer, 0, stride);

			let mut fences: [Sync; SEGMENTS] = Default::default();
			let mut frame_index = 0;

			Ok(move |frame: Frame| {
				let current = frame_index % SEGMENTS;
				frame_index += 1;

				// the GPU may still be reading this segment
				if !fences[current].is_null() {
					match fences[current].client_wait(true, Duration::from_secs(1)) {
						Ok(status) if status.signaled() => {},
						other => log::warn!("segment {current} not released: {other:?}"),
					}
				}

				let vertices = unsafe {
					std::slice::from_raw_parts_mut(mapping.as_ptr().add(current * VERTICES), VERTICES)
				};
				triangles(frame.time, vertices);

				let _group = debug::push_group("draw triangles");
				unsafe {
					gl::ClearColor(0.2, 0.2, 0.2, 1.0);
					gl::Clear(gl::COLOR_BUFFER_BIT);
				}

				program.use_program();
				vertex_array.bind();
				unsafe { gl::DrawArrays(gl::TRIANGLES, (current * VERTICES) as i32, VERTICES as i32) };

				match Sync::new(()) {
					Ok(fence) => fences[current] = fence,
					Err(e) => log::error!("{e}"),
				}

				// keep the persistent mapping and its buffer alive with the loop
				let _ = &buffer;
			})
		},
	)
}
