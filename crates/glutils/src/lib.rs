// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Typed, owning wrappers over OpenGL 4.5 objects.
//!
//! Every object kind has a `Copy` handle type (e.g. [`BufferHandle`]) whose methods
//! forward to the matching direct state access entry point, and an owning
//! [`Object`] alias (e.g. [`Buffer`]) which deletes the object when dropped.
//!
//! All calls assume the GL functions were loaded with [`load_with`] and that the
//! context they were loaded for is current on the calling thread.

use std::ffi::c_void;

#[macro_use]
mod macros;

pub mod attribute;
pub mod buffer;
pub mod context;
pub mod debug;
pub mod error;
pub mod framebuffer;
pub mod object;
pub mod program;
pub mod renderbuffer;
pub mod shader;
pub mod sync;
pub mod texture;
pub mod vertex_array;

pub use self::{
	attribute::{GlType, VertexAttribute},
	buffer::{Buffer, BufferHandle},
	error::{Error, GlError, Result},
	framebuffer::{Framebuffer, FramebufferHandle},
	object::{Create, Handle, Named, Object},
	program::{Program, ProgramHandle},
	renderbuffer::{Renderbuffer, RenderbufferHandle},
	shader::{Shader, ShaderHandle},
	sync::{Sync, SyncHandle},
	texture::{Texture, TextureHandle},
	vertex_array::{VertexArray, VertexArrayHandle},
};
#[allow(deprecated)]
pub use self::object::Guard;

/// Load GL function pointers through `loadfn`.
///
/// `loadfn` is given symbol names such as `"glCreateBuffers"` and should return
/// null for functions the context does not provide.
pub fn load_with<F>(loadfn: F)
where
	F: FnMut(&'static str) -> *const c_void,
{
	gl::load_with(loadfn);

	let direct_state_access = gl::CreateBuffers::is_loaded()
		&& gl::CreateVertexArrays::is_loaded()
		&& gl::NamedBufferData::is_loaded()
		&& gl::VertexArrayAttribFormat::is_loaded()
		&& gl::CreateTextures::is_loaded();

	if direct_state_access {
		log::debug!("loaded OpenGL function pointers");
	} else {
		log::warn!(
			"direct state access functions are missing, an OpenGL {} context is required",
			context::REQUIRED_VERSION,
		);
	}
}
