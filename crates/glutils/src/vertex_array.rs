// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Vertex array objects, wrapping the `glVertexArray*` functions.

use gl::types::{GLboolean, GLint, GLintptr, GLsizei, GLuint};

use crate::{
	attribute::{AttribFormat, VertexAttribute},
	buffer::BufferHandle,
	object::Object,
};

gl_handle! {
	/// Non-owning handle to a vertex array object.
	pub struct VertexArrayHandle(VertexArray): gl::VERTEX_ARRAY;
}

dsa_object!(VertexArrayHandle(VertexArray));

/// Owned vertex array object.
pub type VertexArray = Object<VertexArrayHandle>;

/// Number of components per vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AttribSize {
	One = 1,
	Two = 2,
	Three = 3,
	Four = 4,
}

impl AttribSize {
	pub const fn from_count(count: usize) -> Option<Self> {
		Some(match count {
			1 => Self::One,
			2 => Self::Two,
			3 => Self::Three,
			4 => Self::Four,
			_ => return None,
		})
	}
}

gl_enum! {
	/// Component type of a vertex attribute.
	pub enum AttribType {
		Byte = gl::BYTE,
		UnsignedByte = gl::UNSIGNED_BYTE,
		Short = gl::SHORT,
		UnsignedShort = gl::UNSIGNED_SHORT,
		Int = gl::INT,
		UnsignedInt = gl::UNSIGNED_INT,
		Fixed = gl::FIXED,
		Float = gl::FLOAT,
		HalfFloat = gl::HALF_FLOAT,
		Double = gl::DOUBLE,
		Int2101010Rev = gl::INT_2_10_10_10_REV,
		UnsignedInt2101010Rev = gl::UNSIGNED_INT_2_10_10_10_REV,
		UnsignedInt10f11f11fRev = gl::UNSIGNED_INT_10F_11F_11F_REV,
	}
}

/// One entry of [`VertexArrayHandle::bind_vertex_buffers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferBinding {
	pub buffer: BufferHandle,
	pub offset: GLintptr,
	pub stride: GLsizei,
}

impl VertexArrayHandle {
	/// Make this the current vertex array (`glBindVertexArray`).
	pub fn bind(&self) {
		unsafe { gl::BindVertexArray(self.0) };
	}

	pub fn unbind() {
		unsafe { gl::BindVertexArray(0) };
	}

	/// Attach `buffer` to a vertex buffer binding point (`glVertexArrayVertexBuffer`).
	pub fn bind_vertex_buffer(
		&self,
		binding_index: GLuint,
		buffer: BufferHandle,
		offset: GLintptr,
		stride: GLsizei,
	) {
		unsafe { gl::VertexArrayVertexBuffer(self.0, binding_index, buffer.0, offset, stride) };
	}

	/// Attach buffers to consecutive binding points starting at `first_index`
	/// (`glVertexArrayVertexBuffers`).
	pub fn bind_vertex_buffers<I>(&self, first_index: GLuint, bindings: I)
	where
		I: IntoIterator<Item = VertexBufferBinding>,
	{
		let bindings = bindings.into_iter();
		let capacity = bindings.size_hint().0;
		let mut buffers = Vec::with_capacity(capacity);
		let mut offsets = Vec::with_capacity(capacity);
		let mut strides = Vec::with_capacity(capacity);

		for binding in bindings {
			buffers.push(binding.buffer.0);
			offsets.push(binding.offset);
			strides.push(binding.stride);
		}

		unsafe {
			gl::VertexArrayVertexBuffers(
				self.0,
				first_index,
				buffers.len() as GLsizei,
				buffers.as_ptr(),
				offsets.as_ptr(),
				strides.as_ptr(),
			)
		};
	}

	/// Set the element (index) buffer (`glVertexArrayElementBuffer`).
	pub fn bind_element_buffer(&self, buffer: BufferHandle) {
		unsafe { gl::VertexArrayElementBuffer(self.0, buffer.0) };
	}

	/// Source an attribute from a vertex buffer binding point (`glVertexArrayAttribBinding`).
	pub fn bind_attribute(&self, attribute_index: GLuint, binding_index: GLuint) {
		unsafe { gl::VertexArrayAttribBinding(self.0, attribute_index, binding_index) };
	}

	pub fn enable_attribute(&self, attribute_index: GLuint) {
		unsafe { gl::EnableVertexArrayAttrib(self.0, attribute_index) };
	}

	pub fn disable_attribute(&self, attribute_index: GLuint) {
		unsafe { gl::DisableVertexArrayAttrib(self.0, attribute_index) };
	}

	/// Advance the binding once every `divisor` instances instead of per vertex
	/// (`glVertexArrayBindingDivisor`). Zero restores per vertex stepping.
	pub fn set_binding_divisor(&self, binding_index: GLuint, divisor: GLuint) {
		unsafe { gl::VertexArrayBindingDivisor(self.0, binding_index, divisor) };
	}

	/// Describe a float attribute (`glVertexArrayAttribFormat`).
	///
	/// `normalized` maps integer data to [0, 1] or [-1, 1]. It is ignored for
	/// [`AttribType::Fixed`].
	pub fn set_attrib_format(
		&self,
		attribute_index: GLuint,
		size: AttribSize,
		ty: AttribType,
		normalized: bool,
		relative_offset: GLuint,
	) {
		unsafe {
			gl::VertexArrayAttribFormat(
				self.0,
				attribute_index,
				size as GLint,
				ty.gl_enum(),
				normalized as GLboolean,
				relative_offset,
			)
		};
	}

	/// Describe an integer attribute (`glVertexArrayAttribIFormat`).
	pub fn set_attrib_i_format(
		&self,
		attribute_index: GLuint,
		size: AttribSize,
		ty: AttribType,
		relative_offset: GLuint,
	) {
		unsafe {
			gl::VertexArrayAttribIFormat(
				self.0,
				attribute_index,
				size as GLint,
				ty.gl_enum(),
				relative_offset,
			)
		};
	}

	/// Describe a 64 bit attribute (`glVertexArrayAttribLFormat`).
	pub fn set_attrib_l_format(
		&self,
		attribute_index: GLuint,
		size: AttribSize,
		ty: AttribType,
		relative_offset: GLuint,
	) {
		unsafe {
			gl::VertexArrayAttribLFormat(
				self.0,
				attribute_index,
				size as GLint,
				ty.gl_enum(),
				relative_offset,
			)
		};
	}

	/// Describe interleaved `attributes`, all sourced from `binding_index`.
	///
	/// Attributes get consecutive indices starting at `first_attribute` and are
	/// enabled. Returns the vertex stride to pass to
	/// [`bind_vertex_buffer`](Self::bind_vertex_buffer).
	pub fn set_layout(
		&self,
		binding_index: GLuint,
		first_attribute: GLuint,
		attributes: &[VertexAttribute],
	) -> GLsizei {
		let mut offset = 0;

		for (i, attribute) in attributes.iter().enumerate() {
			let index = first_attribute + i as GLuint;
			offset += attribute.padding;

			match attribute.format {
				AttribFormat::Float { normalized } => self.set_attrib_format(
					index,
					attribute.size,
					attribute.ty,
					normalized,
					offset as GLuint,
				),
				AttribFormat::Integer =>
					self.set_attrib_i_format(index, attribute.size, attribute.ty, offset as GLuint),
				AttribFormat::Long =>
					self.set_attrib_l_format(index, attribute.size, attribute.ty, offset as GLuint),
			}

			self.bind_attribute(index, binding_index);
			self.enable_attribute(index);

			offset += attribute.byte_size();
		}

		offset as GLsizei
	}
}
