// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Buffer objects, wrapping the `glNamedBuffer*` functions.

use std::{
	ffi::c_void,
	mem,
	ptr::{self, NonNull},
};

use bitflags::bitflags;
use gl::types::{GLbitfield, GLint, GLint64, GLintptr, GLsizei, GLsizeiptr, GLuint};

use crate::{object::Object, Error, Result};

gl_handle! {
	/// Non-owning handle to a buffer object.
	pub struct BufferHandle(Buffer): gl::BUFFER;
}

dsa_object!(BufferHandle(Buffer));

/// Owned buffer object.
pub type Buffer = Object<BufferHandle>;

/// A byte range within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
	pub offset: GLintptr,
	pub size: GLsizeiptr,
}

impl Range {
	pub const fn new(offset: GLintptr, size: GLsizeiptr) -> Self {
		Self { offset, size }
	}

	/// Range covering `count` elements of `T`, starting at element `first`.
	pub const fn of<T>(first: usize, count: usize) -> Self {
		let size = mem::size_of::<T>();
		Self {
			offset: (first * size) as GLintptr,
			size: (count * size) as GLsizeiptr,
		}
	}

	#[inline]
	pub const fn end(&self) -> GLintptr {
		self.offset + self.size
	}
}

gl_enum! {
	/// Parameters readable with `glGetNamedBufferParameter*`.
	pub enum BufferParameter {
		Access = gl::BUFFER_ACCESS,
		AccessFlags = gl::BUFFER_ACCESS_FLAGS,
		Immutable = gl::BUFFER_IMMUTABLE_STORAGE,
		Mapped = gl::BUFFER_MAPPED,
		MapLength = gl::BUFFER_MAP_LENGTH,
		MapOffset = gl::BUFFER_MAP_OFFSET,
		Size = gl::BUFFER_SIZE,
		StorageFlags = gl::BUFFER_STORAGE_FLAGS,
		Usage = gl::BUFFER_USAGE,
	}
}

gl_enum! {
	/// Access policy for [`BufferHandle::map`].
	pub enum AccessMode {
		ReadOnly = gl::READ_ONLY,
		WriteOnly = gl::WRITE_ONLY,
		ReadWrite = gl::READ_WRITE,
	}
}

bitflags! {
	/// Access policy for [`BufferHandle::map_range`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct AccessFlags: GLbitfield {
		const READ = gl::MAP_READ_BIT;
		const WRITE = gl::MAP_WRITE_BIT;
		const PERSISTENT = gl::MAP_PERSISTENT_BIT;
		const COHERENT = gl::MAP_COHERENT_BIT;
		const INVALIDATE_RANGE = gl::MAP_INVALIDATE_RANGE_BIT;
		const INVALIDATE_BUFFER = gl::MAP_INVALIDATE_BUFFER_BIT;
		const FLUSH_EXPLICIT = gl::MAP_FLUSH_EXPLICIT_BIT;
		const UNSYNCHRONIZED = gl::MAP_UNSYNCHRONIZED_BIT;
	}
}

gl_enum! {
	/// Usage hint for mutable storage.
	pub enum Usage {
		StaticDraw = gl::STATIC_DRAW,
		StaticRead = gl::STATIC_READ,
		StaticCopy = gl::STATIC_COPY,
		DynamicDraw = gl::DYNAMIC_DRAW,
		DynamicRead = gl::DYNAMIC_READ,
		DynamicCopy = gl::DYNAMIC_COPY,
		StreamDraw = gl::STREAM_DRAW,
		StreamRead = gl::STREAM_READ,
		StreamCopy = gl::STREAM_COPY,
	}
}

bitflags! {
	/// Flags for immutable storage.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct StorageFlags: GLbitfield {
		const DYNAMIC_STORAGE = gl::DYNAMIC_STORAGE_BIT;
		const MAP_READ = gl::MAP_READ_BIT;
		const MAP_WRITE = gl::MAP_WRITE_BIT;
		const MAP_PERSISTENT = gl::MAP_PERSISTENT_BIT;
		const MAP_COHERENT = gl::MAP_COHERENT_BIT;
		const CLIENT_STORAGE = gl::CLIENT_STORAGE_BIT;
	}
}

gl_enum! {
	/// Indexed binding points, see [`BufferHandle::bind_base`].
	pub enum IndexedTarget {
		AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
		TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
		Uniform = gl::UNIFORM_BUFFER,
		ShaderStorage = gl::SHADER_STORAGE_BUFFER,
	}
}

gl_enum! {
	/// Non-indexed binding points, see [`BufferHandle::bind`].
	pub enum Target {
		Array = gl::ARRAY_BUFFER,
		AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
		CopyRead = gl::COPY_READ_BUFFER,
		CopyWrite = gl::COPY_WRITE_BUFFER,
		DispatchIndirect = gl::DISPATCH_INDIRECT_BUFFER,
		DrawIndirect = gl::DRAW_INDIRECT_BUFFER,
		ElementArray = gl::ELEMENT_ARRAY_BUFFER,
		PixelPack = gl::PIXEL_PACK_BUFFER,
		PixelUnpack = gl::PIXEL_UNPACK_BUFFER,
		Query = gl::QUERY_BUFFER,
		ShaderStorage = gl::SHADER_STORAGE_BUFFER,
		Texture = gl::TEXTURE_BUFFER,
		TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
		Uniform = gl::UNIFORM_BUFFER,
	}
}

impl BufferHandle {
	/// Read a buffer parameter (`glGetNamedBufferParameteriv`).
	pub fn parameter(&self, pname: BufferParameter) -> GLint {
		let mut value = 0;
		unsafe { gl::GetNamedBufferParameteriv(self.0, pname.gl_enum(), &mut value) };
		value
	}

	/// Same as [`parameter`](Self::parameter), but 64 bit.
	pub fn parameter_i64(&self, pname: BufferParameter) -> GLint64 {
		let mut value = 0;
		unsafe { gl::GetNamedBufferParameteri64v(self.0, pname.gl_enum(), &mut value) };
		value
	}

	/// Access policy of the current mapping.
	///
	/// For mappings made with [`map_range`](Self::map_range) the flags are
	/// translated to the closest mode.
	pub fn access_mode(&self) -> Result<AccessMode> {
		AccessMode::try_from(self.parameter(BufferParameter::Access) as u32)
	}

	/// Access flags of the current mapping, zero when unmapped.
	pub fn access_flags(&self) -> AccessFlags {
		AccessFlags::from_bits_retain(self.parameter(BufferParameter::AccessFlags) as GLbitfield)
	}

	/// Whether the storage was allocated with [`allocate_immutable`](Self::allocate_immutable).
	pub fn immutable(&self) -> bool {
		self.parameter(BufferParameter::Immutable) != gl::FALSE as GLint
	}

	pub fn mapped(&self) -> bool {
		self.parameter(BufferParameter::Mapped) != gl::FALSE as GLint
	}

	pub fn map_length(&self) -> GLsizeiptr {
		self.parameter_i64(BufferParameter::MapLength) as GLsizeiptr
	}

	pub fn map_offset(&self) -> GLintptr {
		self.parameter_i64(BufferParameter::MapOffset) as GLintptr
	}

	/// Size of the data store in bytes.
	pub fn size(&self) -> GLsizeiptr {
		self.parameter_i64(BufferParameter::Size) as GLsizeiptr
	}

	pub fn usage(&self) -> Result<Usage> {
		Usage::try_from(self.parameter(BufferParameter::Usage) as u32)
	}

	/// Storage flags. Mutable storage reports every flag but client storage.
	pub fn storage_flags(&self) -> StorageFlags {
		StorageFlags::from_bits_retain(self.parameter(BufferParameter::StorageFlags) as GLbitfield)
	}

	/// (Re)allocate uninitialized mutable storage (`glNamedBufferData`).
	pub fn allocate(&self, size: GLsizeiptr, usage: Usage) {
		unsafe { gl::NamedBufferData(self.0, size, ptr::null(), usage.gl_enum()) };
	}

	/// (Re)allocate mutable storage holding `data`.
	pub fn allocate_with<T: bytemuck::Pod>(&self, data: &[T], usage: Usage) {
		let bytes = bytemuck::cast_slice::<T, u8>(data);
		unsafe {
			gl::NamedBufferData(
				self.0,
				bytes.len() as GLsizeiptr,
				bytes.as_ptr() as *const c_void,
				usage.gl_enum(),
			)
		};
	}

	/// Allocate uninitialized, non-resizable storage (`glNamedBufferStorage`).
	pub fn allocate_immutable(&self, size: GLsizeiptr, flags: StorageFlags) {
		unsafe { gl::NamedBufferStorage(self.0, size, ptr::null(), flags.bits()) };
	}

	/// Allocate non-resizable storage holding `data`.
	pub fn allocate_immutable_with<T: bytemuck::Pod>(&self, data: &[T], flags: StorageFlags) {
		let bytes = bytemuck::cast_slice::<T, u8>(data);
		unsafe {
			gl::NamedBufferStorage(
				self.0,
				bytes.len() as GLsizeiptr,
				bytes.as_ptr() as *const c_void,
				flags.bits(),
			)
		};
	}

	/// Copy `data` into the buffer, starting `offset` bytes in (`glNamedBufferSubData`).
	pub fn write<T: bytemuck::Pod>(&self, offset: GLintptr, data: &[T]) {
		if data.is_empty() {
			return
		}

		let bytes = bytemuck::cast_slice::<T, u8>(data);
		unsafe {
			gl::NamedBufferSubData(
				self.0,
				offset,
				bytes.len() as GLsizeiptr,
				bytes.as_ptr() as *const c_void,
			)
		};
	}

	/// Copy the first `range.size` bytes of `bytes` into `range`.
	///
	/// # PANICS
	/// * if `bytes` is shorter than the range
	pub fn write_range(&self, range: Range, bytes: &[u8]) {
		assert!(
			bytes.len() as GLsizeiptr >= range.size,
			"{} bytes given for a {} byte range",
			bytes.len(),
			range.size
		);
		unsafe {
			gl::NamedBufferSubData(self.0, range.offset, range.size, bytes.as_ptr() as *const c_void)
		};
	}

	/// Fill `out` with buffer data starting `offset` bytes in (`glGetNamedBufferSubData`).
	pub fn read<T: bytemuck::Pod>(&self, offset: GLintptr, out: &mut [T]) {
		if out.is_empty() {
			return
		}

		let bytes = bytemuck::cast_slice_mut::<T, u8>(out);
		unsafe {
			gl::GetNamedBufferSubData(
				self.0,
				offset,
				bytes.len() as GLsizeiptr,
				bytes.as_mut_ptr() as *mut c_void,
			)
		};
	}

	/// Read `range` into the start of `out`.
	///
	/// # PANICS
	/// * if `out` is shorter than the range
	pub fn read_range(&self, range: Range, out: &mut [u8]) {
		assert!(
			out.len() as GLsizeiptr >= range.size,
			"{} bytes given for a {} byte range",
			out.len(),
			range.size
		);
		unsafe {
			gl::GetNamedBufferSubData(
				self.0,
				range.offset,
				range.size,
				out.as_mut_ptr() as *mut c_void,
			)
		};
	}

	/// Map the whole buffer into host memory (`glMapNamedBuffer`).
	///
	/// # SAFETY
	/// * the pointer is only valid until [`unmap`](Self::unmap) or deletion
	/// * accesses must follow `access`
	pub unsafe fn map(&self, access: AccessMode) -> Result<NonNull<c_void>> {
		NonNull::new(gl::MapNamedBuffer(self.0, access.gl_enum())).ok_or(Error::MapFailed)
	}

	/// Map `range` into host memory (`glMapNamedBufferRange`).
	///
	/// # SAFETY
	/// * same as [`map`](Self::map)
	pub unsafe fn map_range(&self, range: Range, access: AccessFlags) -> Result<NonNull<c_void>> {
		NonNull::new(gl::MapNamedBufferRange(self.0, range.offset, range.size, access.bits()))
			.ok_or(Error::MapFailed)
	}

	/// Release the current mapping (`glUnmapNamedBuffer`).
	///
	/// Fails with [`Error::UnmapCorrupted`] if the data store was lost while mapped,
	/// in which case its contents are undefined.
	pub fn unmap(&self) -> Result<()> {
		if unsafe { gl::UnmapNamedBuffer(self.0) } == gl::FALSE {
			return Err(Error::UnmapCorrupted)
		}

		Ok(())
	}

	/// Flush writes to a mapping made with [`AccessFlags::FLUSH_EXPLICIT`].
	///
	/// `range` is relative to the start of the mapping.
	pub fn flush_mapped_range(&self, range: Range) {
		unsafe { gl::FlushMappedNamedBufferRange(self.0, range.offset, range.size) };
	}

	/// Discard the buffer contents (`glInvalidateBufferData`).
	pub fn invalidate(&self) {
		unsafe { gl::InvalidateBufferData(self.0) };
	}

	/// Bind to a non-indexed target (`glBindBuffer`).
	pub fn bind(&self, target: Target) {
		unsafe { gl::BindBuffer(target.gl_enum(), self.0) };
	}

	pub fn unbind(target: Target) {
		unsafe { gl::BindBuffer(target.gl_enum(), 0) };
	}

	/// Bind the whole buffer to an indexed target (`glBindBufferBase`).
	pub fn bind_base(&self, target: IndexedTarget, index: GLuint) {
		unsafe { gl::BindBufferBase(target.gl_enum(), index, self.0) };
	}

	/// Bind a range of the buffer to an indexed target (`glBindBufferRange`).
	pub fn bind_range(&self, target: IndexedTarget, index: GLuint, range: Range) {
		unsafe { gl::BindBufferRange(target.gl_enum(), index, self.0, range.offset, range.size) };
	}

	/// Bind each buffer to consecutive indices starting at `first_binding` (`glBindBuffersBase`).
	pub fn bind_bases<I>(target: IndexedTarget, first_binding: GLuint, buffers: I)
	where
		I: IntoIterator<Item = BufferHandle>,
	{
		let names = buffers.into_iter().map(|b| b.0).collect::<Vec<_>>();
		unsafe {
			gl::BindBuffersBase(
				target.gl_enum(),
				first_binding,
				names.len() as GLsizei,
				names.as_ptr(),
			)
		};
	}

	/// Clear `count` consecutive bindings starting at `first_binding`.
	pub fn unbind_bases(target: IndexedTarget, first_binding: GLuint, count: GLsizei) {
		unsafe { gl::BindBuffersBase(target.gl_enum(), first_binding, count, ptr::null()) };
	}

	/// Bind buffer ranges to consecutive indices starting at `first_binding` (`glBindBuffersRange`).
	pub fn bind_ranges<I>(target: IndexedTarget, first_binding: GLuint, ranges: I)
	where
		I: IntoIterator<Item = (BufferHandle, Range)>,
	{
		let ranges = ranges.into_iter();
		let capacity = ranges.size_hint().0;
		let mut names = Vec::with_capacity(capacity);
		let mut offsets = Vec::with_capacity(capacity);
		let mut sizes = Vec::with_capacity(capacity);

		for (buffer, range) in ranges {
			names.push(buffer.0);
			offsets.push(range.offset);
			sizes.push(range.size);
		}

		unsafe {
			gl::BindBuffersRange(
				target.gl_enum(),
				first_binding,
				names.len() as GLsizei,
				names.as_ptr(),
				offsets.as_ptr(),
				sizes.as_ptr(),
			)
		};
	}

	/// Copy `size` bytes between buffers (`glCopyNamedBufferSubData`).
	pub fn copy(
		read_buffer: BufferHandle,
		write_buffer: BufferHandle,
		read_offset: GLintptr,
		write_offset: GLintptr,
		size: GLsizeiptr,
	) {
		unsafe {
			gl::CopyNamedBufferSubData(
				read_buffer.0,
				write_buffer.0,
				read_offset,
				write_offset,
				size,
			)
		};
	}
}
