// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Ownership of GL objects.
//!
//! Handles are plain `Copy` values naming a GL object and never delete it.
//! [`Object`] owns a handle and deletes the object when dropped, much like a
//! `Box` owns its allocation.

use std::{fmt, marker::PhantomData, mem, ops::Deref};

use gl::types::{GLchar, GLenum, GLsizei, GLuint};

use crate::Result;

/// A value naming some GL object.
pub trait Handle: Copy + fmt::Debug {
	/// The handle naming no object.
	const NULL: Self;

	fn is_null(&self) -> bool;

	/// Delete the named object.
	///
	/// # SAFETY
	/// * must be called from GL thread
	/// * the object must not be used afterwards, through this or any other handle
	unsafe fn destroy(self);
}

/// A handle to an object kind that can be created without outside state.
pub trait Create: Handle {
	/// Arguments to the create call, e.g. the shader stage.
	type Args;

	fn create(args: Self::Args) -> Result<Self>;
}

/// A handle identified by a `GLuint` name.
pub trait Named: Handle {
	/// Object identifier passed to `glObjectLabel`.
	const IDENTIFIER: GLenum;

	fn name(&self) -> GLuint;

	/// # SAFETY
	/// * `name` must be zero or name an object of this kind
	unsafe fn from_name(name: GLuint) -> Self;

	/// Ask GL whether the name refers to a live object (`glIs*`).
	fn is_valid(&self) -> bool;

	/// Attach a debug label to the object.
	fn set_label(&self, label: &str) {
		unsafe {
			gl::ObjectLabel(
				Self::IDENTIFIER,
				self.name(),
				label.len() as GLsizei,
				label.as_ptr() as *const GLchar,
			)
		};
	}
}

/// Owns a GL object and deletes it on drop.
///
/// A guard holding [`Handle::NULL`] owns nothing and never calls into GL.
/// Moving the guard moves ownership, so each object has exactly one owner
/// and is deleted at most once.
///
/// !Send and !Sync, the object must be deleted on the thread its context is
/// current on.
pub struct Object<H: Handle> {
	handle: H,
	_not_send: PhantomData<*const ()>,
}

/// Former name of [`Object`].
#[deprecated(note = "replaced by Object<H>")]
pub type Guard<H> = Object<H>;

impl<H: Handle> Object<H> {
	/// Create a new object and take ownership of it.
	pub fn new(args: H::Args) -> Result<Self>
	where
		H: Create,
	{
		let handle = H::create(args)?;
		log::trace!("created {handle:?}");
		Ok(unsafe { Self::from_handle(handle) })
	}

	/// A guard owning nothing.
	#[inline]
	pub const fn null() -> Self {
		Self {
			handle: H::NULL,
			_not_send: PhantomData,
		}
	}

	/// Take ownership of an existing object.
	///
	/// # SAFETY
	/// * `handle` must be null or name a live object no one else will delete
	#[inline]
	pub unsafe fn from_handle(handle: H) -> Self {
		Self {
			handle,
			_not_send: PhantomData,
		}
	}

	/// Get a non-owning handle to the object.
	#[inline]
	pub fn handle(&self) -> H {
		self.handle
	}

	#[inline]
	pub fn is_null(&self) -> bool {
		self.handle.is_null()
	}

	/// Give up ownership without deleting the object.
	pub fn release(self) -> H {
		let handle = self.handle;
		mem::forget(self);
		handle
	}

	/// Give up ownership without deleting the object, leaving this guard null.
	pub fn take(&mut self) -> H {
		mem::replace(&mut self.handle, H::NULL)
	}

	/// Delete the current object (if any) and take ownership of `handle`.
	///
	/// # SAFETY
	/// * same as [`Object::from_handle`], and `handle` must not be the one
	///   currently owned
	pub unsafe fn reset(&mut self, handle: H) {
		let old = mem::replace(&mut self.handle, handle);
		if !old.is_null() {
			log::trace!("destroying {old:?}");
			old.destroy();
		}
	}
}

impl<H: Handle> Drop for Object<H> {
	fn drop(&mut self) {
		if !self.handle.is_null() {
			log::trace!("destroying {:?}", self.handle);
			unsafe { self.handle.destroy() };
		}
	}
}

impl<H: Handle> Deref for Object<H> {
	type Target = H;

	#[inline]
	fn deref(&self) -> &H {
		&self.handle
	}
}

impl<H: Handle> Default for Object<H> {
	fn default() -> Self {
		Self::null()
	}
}

impl<H: Handle> fmt::Debug for Object<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Object").field(&self.handle).finish()
	}
}
