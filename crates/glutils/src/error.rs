// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::GLenum;
use thiserror::Error;

use crate::{context::Version, framebuffer::FramebufferStatus};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("could not create {0} object")]
	CouldNotCreate(&'static str),
	#[error("could not compile shader - driver log:\n{0}\n")]
	Compile(String),
	#[error("could not link program - driver log:\n{0}\n")]
	Link(String),
	#[error("program failed validation - driver log:\n{0}\n")]
	Validate(String),
	#[error("OpenGL returned {value:#x}, which is not a known {kind}")]
	UnknownEnum { kind: &'static str, value: GLenum },
	#[error("could not map buffer")]
	MapFailed,
	#[error("buffer contents were corrupted while mapped")]
	UnmapCorrupted,
	#[error("waiting on sync object failed")]
	WaitFailed,
	#[error("framebuffer is incomplete ({0:?})")]
	IncompleteFramebuffer(FramebufferStatus),
	#[error("OpenGL {required} is required, but the context provides {found}")]
	UnsupportedVersion { required: Version, found: Version },
	#[error(transparent)]
	Gl(#[from] GlError),
}

/// Error codes reported by `glGetError`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
	#[error("GL_INVALID_ENUM")]
	InvalidEnum,
	#[error("GL_INVALID_VALUE")]
	InvalidValue,
	#[error("GL_INVALID_OPERATION")]
	InvalidOperation,
	#[error("GL_STACK_OVERFLOW")]
	StackOverflow,
	#[error("GL_STACK_UNDERFLOW")]
	StackUnderflow,
	#[error("GL_OUT_OF_MEMORY")]
	OutOfMemory,
	#[error("GL_INVALID_FRAMEBUFFER_OPERATION")]
	InvalidFramebufferOperation,
	#[error("GL_CONTEXT_LOST")]
	ContextLost,
	#[error("unknown GL error {0:#x}")]
	Unknown(GLenum),
}

// A lost context may keep reporting errors, don't spin on it.
const MAX_DRAINED_ERRORS: usize = 32;

impl GlError {
	/// Translate a `glGetError` code, `None` for `GL_NO_ERROR`.
	pub fn from_code(code: GLenum) -> Option<Self> {
		Some(match code {
			gl::NO_ERROR => return None,
			gl::INVALID_ENUM => Self::InvalidEnum,
			gl::INVALID_VALUE => Self::InvalidValue,
			gl::INVALID_OPERATION => Self::InvalidOperation,
			gl::STACK_OVERFLOW => Self::StackOverflow,
			gl::STACK_UNDERFLOW => Self::StackUnderflow,
			gl::OUT_OF_MEMORY => Self::OutOfMemory,
			gl::INVALID_FRAMEBUFFER_OPERATION => Self::InvalidFramebufferOperation,
			gl::CONTEXT_LOST => Self::ContextLost,
			other => Self::Unknown(other),
		})
	}
}

/// Pop the next pending error.
pub fn get_error() -> Option<GlError> {
	GlError::from_code(unsafe { gl::GetError() })
}

/// Drain all pending errors, returning the first one.
///
/// Errors after the first are logged.
pub fn check_error() -> std::result::Result<(), GlError> {
	let Some(first) = get_error() else { return Ok(()) };

	for _ in 0..MAX_DRAINED_ERRORS {
		match get_error() {
			Some(error) => log::warn!(target: "OpenGL", "additional pending error: {error}"),
			None => break,
		}
	}

	Err(first)
}
