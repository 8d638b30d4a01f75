// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use bitflags::bitflags;
use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

use crate::{
	object::Object,
	renderbuffer::RenderbufferHandle,
	texture::{MagFilter, TextureHandle},
	Error,
	Result,
};

gl_handle! {
	/// Non-owning handle to a framebuffer object.
	pub struct FramebufferHandle(Framebuffer): gl::FRAMEBUFFER;
}

dsa_object!(FramebufferHandle(Framebuffer));

/// Owned framebuffer object.
pub type Framebuffer = Object<FramebufferHandle>;

gl_enum! {
	pub enum FramebufferTarget {
		/// Both draw and read.
		Framebuffer = gl::FRAMEBUFFER,
		Draw = gl::DRAW_FRAMEBUFFER,
		Read = gl::READ_FRAMEBUFFER,
	}
}

gl_enum! {
	/// Result of `glCheckNamedFramebufferStatus`.
	pub enum FramebufferStatus {
		Complete = gl::FRAMEBUFFER_COMPLETE,
		Undefined = gl::FRAMEBUFFER_UNDEFINED,
		IncompleteAttachment = gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
		IncompleteMissingAttachment = gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
		IncompleteDrawBuffer = gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER,
		IncompleteReadBuffer = gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER,
		Unsupported = gl::FRAMEBUFFER_UNSUPPORTED,
		IncompleteMultisample = gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
		IncompleteLayerTargets = gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS,
	}
}

/// Framebuffer attachment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attachment {
	Color(u32),
	Depth,
	Stencil,
	DepthStencil,
}

impl Attachment {
	pub const fn gl_enum(self) -> GLenum {
		match self {
			Self::Color(i) => gl::COLOR_ATTACHMENT0 + i,
			Self::Depth => gl::DEPTH_ATTACHMENT,
			Self::Stencil => gl::STENCIL_ATTACHMENT,
			Self::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
		}
	}
}

bitflags! {
	/// Buffers copied by [`FramebufferHandle::blit`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct BlitMask: GLbitfield {
		const COLOR = gl::COLOR_BUFFER_BIT;
		const DEPTH = gl::DEPTH_BUFFER_BIT;
		const STENCIL = gl::STENCIL_BUFFER_BIT;
	}
}

/// Pixel rectangle as `[x0, y0, x1, y1]`.
pub type Rect = [GLint; 4];

impl FramebufferHandle {
	/// The window system provided framebuffer.
	pub const DEFAULT: Self = Self(0);

	pub fn bind(&self, target: FramebufferTarget) {
		unsafe { gl::BindFramebuffer(target.gl_enum(), self.0) };
	}

	/// Bind the default framebuffer.
	pub fn unbind(target: FramebufferTarget) {
		Self::DEFAULT.bind(target);
	}

	/// Attach a level of `texture` (`glNamedFramebufferTexture`).
	pub fn attach_texture(&self, attachment: Attachment, texture: TextureHandle, level: GLint) {
		unsafe { gl::NamedFramebufferTexture(self.0, attachment.gl_enum(), texture.0, level) };
	}

	/// Attach `renderbuffer` (`glNamedFramebufferRenderbuffer`).
	pub fn attach_renderbuffer(&self, attachment: Attachment, renderbuffer: RenderbufferHandle) {
		unsafe {
			gl::NamedFramebufferRenderbuffer(
				self.0,
				attachment.gl_enum(),
				gl::RENDERBUFFER,
				renderbuffer.0,
			)
		};
	}

	pub fn status(&self, target: FramebufferTarget) -> Result<FramebufferStatus> {
		FramebufferStatus::try_from(unsafe {
			gl::CheckNamedFramebufferStatus(self.0, target.gl_enum())
		})
	}

	/// Fail with [`Error::IncompleteFramebuffer`] unless complete for `target`.
	pub fn check(&self, target: FramebufferTarget) -> Result<()> {
		match self.status(target)? {
			FramebufferStatus::Complete => Ok(()),
			status => Err(Error::IncompleteFramebuffer(status)),
		}
	}

	/// Select the color attachments fragment outputs are written to
	/// (`glNamedFramebufferDrawBuffers`).
	pub fn set_draw_buffers(&self, attachments: &[Attachment]) {
		let buffers = attachments.iter().map(|a| a.gl_enum()).collect::<Vec<_>>();
		unsafe {
			gl::NamedFramebufferDrawBuffers(self.0, buffers.len() as GLsizei, buffers.as_ptr())
		};
	}

	/// Copy a rectangle from this framebuffer into `draw` (`glBlitNamedFramebuffer`).
	pub fn blit(
		&self,
		draw: FramebufferHandle,
		source: Rect,
		destination: Rect,
		mask: BlitMask,
		filter: MagFilter,
	) {
		unsafe {
			gl::BlitNamedFramebuffer(
				self.0,
				draw.0,
				source[0],
				source[1],
				source[2],
				source[3],
				destination[0],
				destination[1],
				destination[2],
				destination[3],
				mask.bits(),
				filter.gl_enum(),
			)
		};
	}

	/// The framebuffer bound to `target`.
	pub fn bound(target: FramebufferTarget) -> Self {
		let binding = match target {
			FramebufferTarget::Framebuffer | FramebufferTarget::Draw => gl::DRAW_FRAMEBUFFER_BINDING,
			FramebufferTarget::Read => gl::READ_FRAMEBUFFER_BINDING,
		};
		Self(crate::context::get_integer(binding).max(0) as GLuint)
	}
}
