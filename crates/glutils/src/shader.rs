// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::{GLchar, GLenum, GLint, GLsizei};

use crate::{
	object::{Create, Handle, Object},
	Error,
	Result,
};

gl_handle! {
	/// Non-owning handle to a shader object.
	pub struct ShaderHandle(Shader): gl::SHADER;
}

/// Owned shader object.
pub type Shader = Object<ShaderHandle>;

gl_enum! {
	pub enum ShaderType {
		Vertex = gl::VERTEX_SHADER,
		Fragment = gl::FRAGMENT_SHADER,
		Geometry = gl::GEOMETRY_SHADER,
		TessControl = gl::TESS_CONTROL_SHADER,
		TessEvaluation = gl::TESS_EVALUATION_SHADER,
		Compute = gl::COMPUTE_SHADER,
	}
}

impl Handle for ShaderHandle {
	const NULL: Self = Self(0);

	#[inline]
	fn is_null(&self) -> bool {
		self.0 == 0
	}

	unsafe fn destroy(self) {
		// The driver keeps the shader alive while it is attached to a program.
		gl::DeleteShader(self.0);
	}
}

impl Create for ShaderHandle {
	type Args = ShaderType;

	fn create(ty: ShaderType) -> Result<Self> {
		let shader = unsafe { gl::CreateShader(ty.gl_enum()) };
		if shader == 0 {
			return Err(Error::CouldNotCreate("shader"))
		}

		Ok(Self(shader))
	}
}

impl ShaderHandle {
	fn parameter(&self, pname: GLenum) -> GLint {
		let mut value = 0;
		unsafe { gl::GetShaderiv(self.0, pname, &mut value) };
		value
	}

	/// Replace the shader source (`glShaderSource`).
	pub fn set_source(&self, source: &str) {
		self.set_sources(&[source]);
	}

	/// Replace the shader source with the concatenation of `sources`.
	pub fn set_sources(&self, sources: &[&str]) {
		let pointers = sources.iter().map(|s| s.as_ptr() as *const GLchar).collect::<Vec<_>>();
		let lengths = sources.iter().map(|s| s.len() as GLint).collect::<Vec<_>>();

		unsafe {
			gl::ShaderSource(
				self.0,
				sources.len() as GLsizei,
				pointers.as_ptr(),
				lengths.as_ptr(),
			)
		};
	}

	/// Compile the current source, failing with the driver log.
	pub fn compile(&self) -> Result<()> {
		unsafe { gl::CompileShader(self.0) };

		if !self.compiled() {
			return Err(Error::Compile(self.info_log()))
		}

		Ok(())
	}

	/// Whether the last compile succeeded.
	pub fn compiled(&self) -> bool {
		self.parameter(gl::COMPILE_STATUS) == gl::TRUE as GLint
	}

	pub fn shader_type(&self) -> Result<ShaderType> {
		ShaderType::try_from(self.parameter(gl::SHADER_TYPE) as GLenum)
	}

	pub fn info_log(&self) -> String {
		unsafe {
			read_info_log(self.parameter(gl::INFO_LOG_LENGTH), |size, length, log| {
				gl::GetShaderInfoLog(self.0, size, length, log)
			})
		}
	}
}

impl Object<ShaderHandle> {
	/// Create a shader and compile `source` into it.
	pub fn from_source(ty: ShaderType, source: &str) -> Result<Self> {
		let shader = Self::new(ty)?;
		shader.set_source(source);
		shader.compile()?;
		Ok(shader)
	}
}

/// Read an info log of `log_length` bytes (including the null terminator)
/// through one of the `glGet*InfoLog` functions.
///
/// # SAFETY
/// * must be called from GL thread
pub(crate) unsafe fn read_info_log(
	log_length: GLint,
	read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
	if log_length <= 0 {
		return String::new()
	}

	let mut log = vec![0u8; log_length as usize];
	let mut written = 0;
	read(log_length, &mut written, log.as_mut_ptr() as *mut GLchar);

	// The written length excludes the null terminator.
	log.truncate(written.clamp(0, log_length) as usize);

	// lossy, drivers may emit invalid utf8
	String::from_utf8_lossy(&log).into_owned()
}
