// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! `KHR_debug` output routed through `log`.

use std::{
	borrow::Cow,
	ffi::{c_char, c_void, CStr},
	marker::PhantomData,
	ptr,
};

use gl::types::{GLenum, GLsizei, GLuint};

/// Log target used for messages coming from the driver.
pub const LOG_TARGET: &str = "OpenGL";

/// Enable debug output and forward every message to `log` under [`LOG_TARGET`].
///
/// `synchronous` makes the driver call back on the thread issuing the faulty
/// call, which keeps backtraces meaningful at a performance cost.
pub fn enable_debug_output(synchronous: bool) {
	unsafe {
		gl::Enable(gl::DEBUG_OUTPUT);
		if synchronous {
			gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
		} else {
			gl::Disable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
		}

		gl::DebugMessageCallback(Some(debug_callback), ptr::null());
		gl::DebugMessageControl(
			gl::DONT_CARE,
			gl::DONT_CARE,
			gl::DONT_CARE,
			0,
			ptr::null(),
			gl::TRUE,
		);
	}

	log::debug!("enabled GL debug output (synchronous: {synchronous})");
}

pub fn disable_debug_output() {
	unsafe {
		gl::DebugMessageCallback(None, ptr::null());
		gl::Disable(gl::DEBUG_OUTPUT);
	}
}

pub(crate) fn source_name(source: GLenum) -> &'static str {
	match source {
		gl::DEBUG_SOURCE_API => "API",
		gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
		gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
		gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
		gl::DEBUG_SOURCE_APPLICATION => "Application",
		gl::DEBUG_SOURCE_OTHER => "Other",
		_ => "Unknown",
	}
}

pub(crate) fn type_name(ty: GLenum) -> &'static str {
	match ty {
		gl::DEBUG_TYPE_ERROR => "Error",
		gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
		gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
		gl::DEBUG_TYPE_PORTABILITY => "Portability",
		gl::DEBUG_TYPE_PERFORMANCE => "Performance",
		gl::DEBUG_TYPE_MARKER => "Marker",
		gl::DEBUG_TYPE_PUSH_GROUP => "Push Group",
		gl::DEBUG_TYPE_POP_GROUP => "Pop Group",
		gl::DEBUG_TYPE_OTHER => "Other",
		_ => "Unknown",
	}
}

pub(crate) fn severity_level(severity: GLenum) -> log::Level {
	match severity {
		gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
		gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
		gl::DEBUG_SEVERITY_LOW => log::Level::Debug,
		_ => log::Level::Trace,
	}
}

extern "system" fn debug_callback(
	source: GLenum,
	ty: GLenum,
	id: GLuint,
	severity: GLenum,
	length: GLsizei,
	message: *const c_char,
	_user_param: *mut c_void,
) {
	if message.is_null() {
		return
	}

	// the length excludes the terminator and may be negative when the driver
	// only null-terminates
	let message: Cow<str> = if length >= 0 {
		let bytes = unsafe { std::slice::from_raw_parts(message.cast::<u8>(), length as usize) };
		String::from_utf8_lossy(bytes)
	} else {
		unsafe { CStr::from_ptr(message) }.to_string_lossy()
	};

	log::log!(
		target: LOG_TARGET,
		severity_level(severity),
		"{}: {} ({id}): {}",
		type_name(ty),
		source_name(source),
		message_text(&message),
	);
}

/// Debug group pushed by [`push_group`], popped when dropped.
#[must_use = "the group is popped as soon as the guard is dropped"]
pub struct DebugGroup {
	_not_send: PhantomData<*const ()>,
}

/// Open a named debug group, shown by graphics debuggers around the commands
/// issued while the returned guard lives.
pub fn push_group(message: &str) -> DebugGroup {
	push_group_with_id(0, message)
}

pub fn push_group_with_id(id: GLuint, message: &str) -> DebugGroup {
	unsafe {
		gl::PushDebugGroup(
			gl::DEBUG_SOURCE_APPLICATION,
			id,
			message.len() as GLsizei,
			message.as_ptr().cast(),
		)
	};

	DebugGroup { _not_send: PhantomData }
}

impl Drop for DebugGroup {
	fn drop(&mut self) {
		unsafe { gl::PopDebugGroup() };
	}
}

/// Insert a marker message into the debug stream.
pub fn insert_marker(id: GLuint, message: &str) {
	unsafe {
		gl::DebugMessageInsert(
			gl::DEBUG_SOURCE_APPLICATION,
			gl::DEBUG_TYPE_MARKER,
			id,
			gl::DEBUG_SEVERITY_NOTIFICATION,
			message.len() as GLsizei,
			message.as_ptr().cast(),
		)
	};
}

pub(crate) fn message_text(message: &str) -> &str {
	message.trim_end_matches(['\n', '\0'])
}
