// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::ffi::CString;

use gl::types::{GLenum, GLint, GLuint};

use crate::{
	object::{Create, Handle, Object},
	shader::{read_info_log, ShaderHandle},
	Error,
	Result,
};

gl_handle! {
	/// Non-owning handle to a program object.
	pub struct ProgramHandle(Program): gl::PROGRAM;
}

/// Owned program object.
pub type Program = Object<ProgramHandle>;

impl Handle for ProgramHandle {
	const NULL: Self = Self(0);

	#[inline]
	fn is_null(&self) -> bool {
		self.0 == 0
	}

	unsafe fn destroy(self) {
		// Deletion is deferred by the driver while the program is in use.
		gl::DeleteProgram(self.0);
	}
}

impl Create for ProgramHandle {
	type Args = ();

	fn create(_: ()) -> Result<Self> {
		let program = unsafe { gl::CreateProgram() };
		if program == 0 {
			return Err(Error::CouldNotCreate("program"))
		}

		Ok(Self(program))
	}
}

impl ProgramHandle {
	fn parameter(&self, pname: GLenum) -> GLint {
		let mut value = 0;
		unsafe { gl::GetProgramiv(self.0, pname, &mut value) };
		value
	}

	pub fn attach(&self, shader: ShaderHandle) {
		unsafe { gl::AttachShader(self.0, shader.0) };
	}

	pub fn detach(&self, shader: ShaderHandle) {
		unsafe { gl::DetachShader(self.0, shader.0) };
	}

	/// Link the attached shaders, failing with the driver log.
	pub fn link(&self) -> Result<()> {
		unsafe { gl::LinkProgram(self.0) };

		if !self.linked() {
			return Err(Error::Link(self.info_log()))
		}

		Ok(())
	}

	pub fn linked(&self) -> bool {
		self.parameter(gl::LINK_STATUS) == gl::TRUE as GLint
	}

	/// Check whether the program can run in the current GL state (`glValidateProgram`).
	pub fn validate(&self) -> Result<()> {
		unsafe { gl::ValidateProgram(self.0) };

		if self.parameter(gl::VALIDATE_STATUS) != gl::TRUE as GLint {
			return Err(Error::Validate(self.info_log()))
		}

		Ok(())
	}

	pub fn attached_shaders(&self) -> usize {
		self.parameter(gl::ATTACHED_SHADERS).max(0) as usize
	}

	pub fn info_log(&self) -> String {
		unsafe {
			read_info_log(self.parameter(gl::INFO_LOG_LENGTH), |size, length, log| {
				gl::GetProgramInfoLog(self.0, size, length, log)
			})
		}
	}

	/// Make this the current program (`glUseProgram`).
	pub fn use_program(&self) {
		unsafe { gl::UseProgram(self.0) };
	}

	pub fn unuse() {
		unsafe { gl::UseProgram(0) };
	}

	/// Location of an active uniform, `None` if there is no such uniform.
	pub fn uniform_location(&self, name: &str) -> Option<GLint> {
		let name = CString::new(name).ok()?;
		let location = unsafe { gl::GetUniformLocation(self.0, name.as_ptr()) };
		(location >= 0).then_some(location)
	}

	/// Location of an active vertex input, `None` if there is no such input.
	pub fn attrib_location(&self, name: &str) -> Option<GLuint> {
		let name = CString::new(name).ok()?;
		let location = unsafe { gl::GetAttribLocation(self.0, name.as_ptr()) };
		(location >= 0).then_some(location as GLuint)
	}

	/// Set a uniform of this program, it need not be current (`glProgramUniform*`).
	pub fn set_uniform<U: Uniform>(&self, location: GLint, value: U) {
		unsafe { value.set(self.0, location) };
	}

	pub fn uniform_block_index(&self, name: &str) -> Option<GLuint> {
		let name = CString::new(name).ok()?;
		let index = unsafe { gl::GetUniformBlockIndex(self.0, name.as_ptr()) };
		(index != gl::INVALID_INDEX).then_some(index)
	}

	/// Source a uniform block from [`IndexedTarget::Uniform`](crate::buffer::IndexedTarget::Uniform)
	/// binding `binding`.
	pub fn uniform_block_binding(&self, block_index: GLuint, binding: GLuint) {
		unsafe { gl::UniformBlockBinding(self.0, block_index, binding) };
	}

	/// Source a storage block from
	/// [`IndexedTarget::ShaderStorage`](crate::buffer::IndexedTarget::ShaderStorage)
	/// binding `binding`.
	pub fn shader_storage_block_binding(&self, block_index: GLuint, binding: GLuint) {
		unsafe { gl::ShaderStorageBlockBinding(self.0, block_index, binding) };
	}
}

impl Object<ProgramHandle> {
	/// Link `shaders` into a new program.
	///
	/// The shaders are detached afterwards, so they can be deleted right away.
	pub fn from_shaders(shaders: &[ShaderHandle]) -> Result<Self> {
		let program = Self::new(())?;

		shaders.iter().for_each(|shader| program.attach(*shader));
		let linked = program.link();
		shaders.iter().for_each(|shader| program.detach(*shader));

		linked.map(|()| program)
	}
}

/// Values settable with `glProgramUniform*`.
pub trait Uniform {
	/// # SAFETY
	/// * must be called from GL thread
	unsafe fn set(&self, program: GLuint, location: GLint);
}

macro_rules! vector_uniforms {
	($($type:ty => $suffix:ident;)*) => {
		paste::paste! {
			$(
				impl Uniform for $type {
					unsafe fn set(&self, program: GLuint, location: GLint) {
						gl::[<ProgramUniform1 $suffix>](program, location, *self);
					}
				}

				impl Uniform for [$type; 2] {
					unsafe fn set(&self, program: GLuint, location: GLint) {
						gl::[<ProgramUniform2 $suffix>](program, location, self[0], self[1]);
					}
				}

				impl Uniform for [$type; 3] {
					unsafe fn set(&self, program: GLuint, location: GLint) {
						gl::[<ProgramUniform3 $suffix>](program, location, self[0], self[1], self[2]);
					}
				}

				impl Uniform for [$type; 4] {
					unsafe fn set(&self, program: GLuint, location: GLint) {
						gl::[<ProgramUniform4 $suffix>](
							program, location, self[0], self[1], self[2], self[3],
						);
					}
				}
			)*
		}
	};
}

vector_uniforms! {
	f32 => f;
	i32 => i;
	u32 => ui;
}

impl Uniform for bool {
	unsafe fn set(&self, program: GLuint, location: GLint) {
		gl::ProgramUniform1i(program, location, *self as GLint);
	}
}

/// Column major, as GLSL expects.
impl Uniform for [[f32; 3]; 3] {
	unsafe fn set(&self, program: GLuint, location: GLint) {
		gl::ProgramUniformMatrix3fv(program, location, 1, gl::FALSE, self.as_ptr() as *const f32);
	}
}

/// Column major, as GLSL expects.
impl Uniform for [[f32; 4]; 4] {
	unsafe fn set(&self, program: GLuint, location: GLint) {
		gl::ProgramUniformMatrix4fv(program, location, 1, gl::FALSE, self.as_ptr() as *const f32);
	}
}
