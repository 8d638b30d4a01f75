// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::{GLenum, GLint, GLsizei};

use crate::{object::Object, texture::InternalFormat};

gl_handle! {
	/// Non-owning handle to a renderbuffer object.
	pub struct RenderbufferHandle(Renderbuffer): gl::RENDERBUFFER;
}

dsa_object!(RenderbufferHandle(Renderbuffer));

/// Owned renderbuffer object.
pub type Renderbuffer = Object<RenderbufferHandle>;

impl RenderbufferHandle {
	/// (Re)allocate storage (`glNamedRenderbufferStorage`).
	pub fn storage(&self, format: InternalFormat, width: GLsizei, height: GLsizei) {
		unsafe { gl::NamedRenderbufferStorage(self.0, format.gl_enum(), width, height) };
	}

	/// (Re)allocate multisampled storage (`glNamedRenderbufferStorageMultisample`).
	pub fn storage_multisample(
		&self,
		samples: GLsizei,
		format: InternalFormat,
		width: GLsizei,
		height: GLsizei,
	) {
		unsafe {
			gl::NamedRenderbufferStorageMultisample(self.0, samples, format.gl_enum(), width, height)
		};
	}

	fn parameter(&self, pname: GLenum) -> GLint {
		let mut value = 0;
		unsafe { gl::GetNamedRenderbufferParameteriv(self.0, pname, &mut value) };
		value
	}

	pub fn width(&self) -> GLsizei {
		self.parameter(gl::RENDERBUFFER_WIDTH)
	}

	pub fn height(&self) -> GLsizei {
		self.parameter(gl::RENDERBUFFER_HEIGHT)
	}

	pub fn samples(&self) -> GLsizei {
		self.parameter(gl::RENDERBUFFER_SAMPLES)
	}
}
