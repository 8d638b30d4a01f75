// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Texture objects, wrapping the `glTexture*` functions.

use std::{ffi::c_void, mem};

use gl::types::{GLenum, GLint, GLsizei, GLuint};

use crate::{
	attribute::GlType,
	context::get_integer,
	object::{Create, Handle, Object},
	Error,
	Result,
};

gl_handle! {
	/// Non-owning handle to a texture object.
	pub struct TextureHandle(Texture): gl::TEXTURE;
}

/// Owned texture object.
pub type Texture = Object<TextureHandle>;

gl_enum! {
	/// Texture kind, fixed when the texture is created.
	pub enum TextureTarget {
		Texture1D = gl::TEXTURE_1D,
		Texture2D = gl::TEXTURE_2D,
		Texture3D = gl::TEXTURE_3D,
		Texture1DArray = gl::TEXTURE_1D_ARRAY,
		Texture2DArray = gl::TEXTURE_2D_ARRAY,
		Rectangle = gl::TEXTURE_RECTANGLE,
		CubeMap = gl::TEXTURE_CUBE_MAP,
		CubeMapArray = gl::TEXTURE_CUBE_MAP_ARRAY,
		Buffer = gl::TEXTURE_BUFFER,
		Texture2DMultisample = gl::TEXTURE_2D_MULTISAMPLE,
		Texture2DMultisampleArray = gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
	}
}

gl_enum! {
	/// Sized internal formats for texture and renderbuffer storage.
	pub enum InternalFormat {
		R8 = gl::R8,
		Rg8 = gl::RG8,
		Rgb8 = gl::RGB8,
		Rgba8 = gl::RGBA8,
		Srgb8Alpha8 = gl::SRGB8_ALPHA8,
		R16f = gl::R16F,
		Rg16f = gl::RG16F,
		Rgba16f = gl::RGBA16F,
		R32f = gl::R32F,
		Rg32f = gl::RG32F,
		Rgba32f = gl::RGBA32F,
		R8ui = gl::R8UI,
		R16ui = gl::R16UI,
		R32ui = gl::R32UI,
		R32i = gl::R32I,
		DepthComponent24 = gl::DEPTH_COMPONENT24,
		DepthComponent32f = gl::DEPTH_COMPONENT32F,
		Depth24Stencil8 = gl::DEPTH24_STENCIL8,
		Depth32fStencil8 = gl::DEPTH32F_STENCIL8,
	}
}

gl_enum! {
	/// Layout of client pixel data.
	pub enum PixelFormat {
		Red = gl::RED,
		Rg = gl::RG,
		Rgb = gl::RGB,
		Bgr = gl::BGR,
		Rgba = gl::RGBA,
		Bgra = gl::BGRA,
		RedInteger = gl::RED_INTEGER,
		RgInteger = gl::RG_INTEGER,
		RgbInteger = gl::RGB_INTEGER,
		RgbaInteger = gl::RGBA_INTEGER,
		DepthComponent = gl::DEPTH_COMPONENT,
		StencilIndex = gl::STENCIL_INDEX,
	}
}

impl PixelFormat {
	/// Components per pixel.
	pub const fn components(self) -> usize {
		match self {
			Self::Red | Self::RedInteger | Self::DepthComponent | Self::StencilIndex => 1,
			Self::Rg | Self::RgInteger => 2,
			Self::Rgb | Self::Bgr | Self::RgbInteger => 3,
			Self::Rgba | Self::Bgra | Self::RgbaInteger => 4,
		}
	}
}

gl_enum! {
	pub enum MinFilter {
		Nearest = gl::NEAREST,
		Linear = gl::LINEAR,
		NearestMipmapNearest = gl::NEAREST_MIPMAP_NEAREST,
		LinearMipmapNearest = gl::LINEAR_MIPMAP_NEAREST,
		NearestMipmapLinear = gl::NEAREST_MIPMAP_LINEAR,
		LinearMipmapLinear = gl::LINEAR_MIPMAP_LINEAR,
	}
}

gl_enum! {
	pub enum MagFilter {
		Nearest = gl::NEAREST,
		Linear = gl::LINEAR,
	}
}

gl_enum! {
	pub enum Wrap {
		Repeat = gl::REPEAT,
		MirroredRepeat = gl::MIRRORED_REPEAT,
		ClampToEdge = gl::CLAMP_TO_EDGE,
		ClampToBorder = gl::CLAMP_TO_BORDER,
		MirrorClampToEdge = gl::MIRROR_CLAMP_TO_EDGE,
	}
}

/// Scalar types usable as pixel components.
pub trait PixelComponent: GlType {}

impl PixelComponent for u8 {}
impl PixelComponent for i8 {}
impl PixelComponent for u16 {}
impl PixelComponent for i16 {}
impl PixelComponent for u32 {}
impl PixelComponent for i32 {}
impl PixelComponent for f32 {}

impl Handle for TextureHandle {
	const NULL: Self = Self(0);

	#[inline]
	fn is_null(&self) -> bool {
		self.0 == 0
	}

	unsafe fn destroy(self) {
		gl::DeleteTextures(1, &self.0);
	}
}

impl Create for TextureHandle {
	type Args = TextureTarget;

	fn create(target: TextureTarget) -> Result<Self> {
		let mut texture = 0;
		unsafe { gl::CreateTextures(target.gl_enum(), 1, &mut texture) };
		if texture == 0 {
			return Err(Error::CouldNotCreate("texture"))
		}

		Ok(Self(texture))
	}
}

/// Set the row alignment of client pixel data (`GL_UNPACK_ALIGNMENT`), one of
/// 1, 2, 4 or 8. GL defaults to 4.
pub fn set_unpack_alignment(alignment: GLint) {
	unsafe { gl::PixelStorei(gl::UNPACK_ALIGNMENT, alignment) };
}

/// The `GL_UNPACK_*` state deciding which client bytes an upload reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnpackLayout {
	alignment: usize,
	row_length: usize,
	image_height: usize,
	skip_pixels: usize,
	skip_rows: usize,
	skip_images: usize,
}

impl Default for UnpackLayout {
	fn default() -> Self {
		Self {
			alignment: 4,
			row_length: 0,
			image_height: 0,
			skip_pixels: 0,
			skip_rows: 0,
			skip_images: 0,
		}
	}
}

impl UnpackLayout {
	/// Read the unpack state. Image height and skipped images only apply to
	/// `images` (3D) uploads.
	///
	/// # PANICS
	/// * if a pixel unpack buffer is bound, as client pointers would be taken
	///   for buffer offsets
	fn current(images: bool) -> Self {
		assert_eq!(
			get_integer(gl::PIXEL_UNPACK_BUFFER_BINDING),
			0,
			"client pixel upload with a pixel unpack buffer bound"
		);

		let get = |name| get_integer(name).max(0) as usize;
		Self {
			alignment: get(gl::UNPACK_ALIGNMENT).max(1),
			row_length: get(gl::UNPACK_ROW_LENGTH),
			image_height: if images { get(gl::UNPACK_IMAGE_HEIGHT) } else { 0 },
			skip_pixels: get(gl::UNPACK_SKIP_PIXELS),
			skip_rows: get(gl::UNPACK_SKIP_ROWS),
			skip_images: if images { get(gl::UNPACK_SKIP_IMAGES) } else { 0 },
		}
	}

	/// Bytes GL reads for a `[width, height, depth]` box of `pixel_size` byte pixels.
	fn bytes_read(&self, pixel_size: usize, [width, height, depth]: [usize; 3]) -> usize {
		if width == 0 || height == 0 || depth == 0 {
			return 0
		}

		let row_pixels = if self.row_length > 0 { self.row_length } else { width };
		let row_bytes = (row_pixels * pixel_size).next_multiple_of(self.alignment);
		let image_rows = if self.image_height > 0 { self.image_height } else { height };
		let image_bytes = image_rows * row_bytes;

		let skipped =
			self.skip_images * image_bytes + self.skip_rows * row_bytes + self.skip_pixels * pixel_size;

		skipped + (depth - 1) * image_bytes + (height - 1) * row_bytes + width * pixel_size
	}
}

fn check_pixels<T>(
	pixels: &[T],
	format: PixelFormat,
	unpack: &UnpackLayout,
	size: [GLsizei; 3],
) {
	let pixel_size = format.components() * mem::size_of::<T>();
	let required = unpack.bytes_read(pixel_size, size.map(|s| s.max(0) as usize));
	let given = mem::size_of_val(pixels);
	assert!(given >= required, "{given} bytes given, {required} read by the upload");
}

impl TextureHandle {
	/// Allocate immutable storage for a 1D texture (`glTextureStorage1D`).
	pub fn storage_1d(&self, levels: GLsizei, format: InternalFormat, width: GLsizei) {
		unsafe { gl::TextureStorage1D(self.0, levels, format.gl_enum(), width) };
	}

	/// Allocate immutable storage for a 2D, 1D array, rectangle or cube map texture
	/// (`glTextureStorage2D`).
	pub fn storage_2d(
		&self,
		levels: GLsizei,
		format: InternalFormat,
		width: GLsizei,
		height: GLsizei,
	) {
		unsafe { gl::TextureStorage2D(self.0, levels, format.gl_enum(), width, height) };
	}

	/// Allocate immutable storage for a 3D, 2D array or cube map array texture
	/// (`glTextureStorage3D`).
	pub fn storage_3d(
		&self,
		levels: GLsizei,
		format: InternalFormat,
		width: GLsizei,
		height: GLsizei,
		depth: GLsizei,
	) {
		unsafe { gl::TextureStorage3D(self.0, levels, format.gl_enum(), width, height, depth) };
	}

	pub fn storage_2d_multisample(
		&self,
		samples: GLsizei,
		format: InternalFormat,
		width: GLsizei,
		height: GLsizei,
		fixed_sample_locations: bool,
	) {
		unsafe {
			gl::TextureStorage2DMultisample(
				self.0,
				samples,
				format.gl_enum(),
				width,
				height,
				fixed_sample_locations as u8,
			)
		};
	}

	/// Upload a rectangle of pixels to `level` (`glTextureSubImage2D`).
	///
	/// # PANICS
	/// * if `pixels` is shorter than the rows GL reads under the current
	///   `GL_UNPACK_*` state, e.g. rows padded to `GL_UNPACK_ALIGNMENT`
	/// * if a pixel unpack buffer is bound
	#[allow(clippy::too_many_arguments)]
	pub fn sub_image_2d<T: PixelComponent>(
		&self,
		level: GLint,
		x: GLint,
		y: GLint,
		width: GLsizei,
		height: GLsizei,
		format: PixelFormat,
		pixels: &[T],
	) {
		check_pixels(pixels, format, &UnpackLayout::current(false), [width, height, 1]);
		unsafe {
			gl::TextureSubImage2D(
				self.0,
				level,
				x,
				y,
				width,
				height,
				format.gl_enum(),
				T::ATTRIB_TYPE.gl_enum(),
				pixels.as_ptr() as *const c_void,
			)
		};
	}

	/// Upload a box of pixels to `level` (`glTextureSubImage3D`).
	///
	/// # PANICS
	/// * same as [`sub_image_2d`](Self::sub_image_2d), with images spaced by
	///   `GL_UNPACK_IMAGE_HEIGHT` rows when set
	#[allow(clippy::too_many_arguments)]
	pub fn sub_image_3d<T: PixelComponent>(
		&self,
		level: GLint,
		offset: [GLint; 3],
		width: GLsizei,
		height: GLsizei,
		depth: GLsizei,
		format: PixelFormat,
		pixels: &[T],
	) {
		check_pixels(pixels, format, &UnpackLayout::current(true), [width, height, depth]);
		unsafe {
			gl::TextureSubImage3D(
				self.0,
				level,
				offset[0],
				offset[1],
				offset[2],
				width,
				height,
				depth,
				format.gl_enum(),
				T::ATTRIB_TYPE.gl_enum(),
				pixels.as_ptr() as *const c_void,
			)
		};
	}

	fn set_parameter(&self, pname: GLenum, value: GLenum) {
		unsafe { gl::TextureParameteri(self.0, pname, value as GLint) };
	}

	pub fn set_min_filter(&self, filter: MinFilter) {
		self.set_parameter(gl::TEXTURE_MIN_FILTER, filter.gl_enum());
	}

	pub fn set_mag_filter(&self, filter: MagFilter) {
		self.set_parameter(gl::TEXTURE_MAG_FILTER, filter.gl_enum());
	}

	/// Set the wrap mode of every coordinate.
	pub fn set_wrap(&self, wrap: Wrap) {
		self.set_wrap_s(wrap);
		self.set_wrap_t(wrap);
		self.set_wrap_r(wrap);
	}

	pub fn set_wrap_s(&self, wrap: Wrap) {
		self.set_parameter(gl::TEXTURE_WRAP_S, wrap.gl_enum());
	}

	pub fn set_wrap_t(&self, wrap: Wrap) {
		self.set_parameter(gl::TEXTURE_WRAP_T, wrap.gl_enum());
	}

	pub fn set_wrap_r(&self, wrap: Wrap) {
		self.set_parameter(gl::TEXTURE_WRAP_R, wrap.gl_enum());
	}

	/// Generate every level below the base level (`glGenerateTextureMipmap`).
	pub fn generate_mipmap(&self) {
		unsafe { gl::GenerateTextureMipmap(self.0) };
	}

	/// Bind to texture unit `unit` (`glBindTextureUnit`).
	pub fn bind_unit(&self, unit: GLuint) {
		unsafe { gl::BindTextureUnit(unit, self.0) };
	}

	pub fn unbind_unit(unit: GLuint) {
		unsafe { gl::BindTextureUnit(unit, 0) };
	}

	fn level_parameter(&self, level: GLint, pname: GLenum) -> GLint {
		let mut value = 0;
		unsafe { gl::GetTextureLevelParameteriv(self.0, level, pname, &mut value) };
		value
	}

	pub fn width(&self, level: GLint) -> GLsizei {
		self.level_parameter(level, gl::TEXTURE_WIDTH)
	}

	pub fn height(&self, level: GLint) -> GLsizei {
		self.level_parameter(level, gl::TEXTURE_HEIGHT)
	}

	pub fn depth(&self, level: GLint) -> GLsizei {
		self.level_parameter(level, gl::TEXTURE_DEPTH)
	}
}
