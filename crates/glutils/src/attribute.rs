// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use crate::vertex_array::{AttribSize, AttribType};

/// How a vertex attribute reaches the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribFormat {
	/// `glVertexArrayAttribFormat`, fixed-point values optionally normalized.
	Float { normalized: bool },
	/// `glVertexArrayAttribIFormat`
	Integer,
	/// `glVertexArrayAttribLFormat`, 64 bit components.
	Long,
}

/// One attribute of an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
	pub ty: AttribType,
	pub size: AttribSize,
	pub ty_size: usize,
	pub format: AttribFormat,
	/// Bytes skipped before this attribute.
	pub padding: usize,
}

impl VertexAttribute {
	pub const fn new<T: GlType>(size: AttribSize) -> Self {
		VertexAttribute {
			ty: T::ATTRIB_TYPE,
			size,
			ty_size: std::mem::size_of::<T>(),
			format: T::FORMAT,
			padding: 0,
		}
	}

	/// Integer components read as normalized floats, e.g. `u8` colors.
	pub const fn normalized<T: GlType>(size: AttribSize) -> Self {
		VertexAttribute {
			format: AttribFormat::Float { normalized: true },
			..Self::new::<T>(size)
		}
	}

	pub const fn padded(self, padding: usize) -> Self {
		VertexAttribute { padding, ..self }
	}

	/// Bytes taken by the attribute itself, excluding padding.
	#[inline]
	pub const fn byte_size(&self) -> usize {
		self.size as usize * self.ty_size
	}
}

/// Distance between consecutive vertices laid out as `attributes`.
pub fn stride_of(attributes: &[VertexAttribute]) -> usize {
	attributes.iter().map(|a| a.padding + a.byte_size()).sum()
}

/// Rust scalar types with a GL counterpart.
pub trait GlType: bytemuck::Pod {
	const ATTRIB_TYPE: AttribType;
	const FORMAT: AttribFormat;
}

macro_rules! gl_types {
	($($type:ident($attrib_type:ident, $format:expr);)*) => {
		$(
			impl GlType for $type {
				const ATTRIB_TYPE: AttribType = AttribType::$attrib_type;
				const FORMAT: AttribFormat = $format;
			}
		)*
	}
}

gl_types! {
	f64(Double, AttribFormat::Long);
	f32(Float, AttribFormat::Float { normalized: false });

	u32(UnsignedInt, AttribFormat::Integer);
	u16(UnsignedShort, AttribFormat::Integer);
	u8(UnsignedByte, AttribFormat::Integer);

	i32(Int, AttribFormat::Integer);
	i16(Short, AttribFormat::Integer);
	i8(Byte, AttribFormat::Integer);
}
