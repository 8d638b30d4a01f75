// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Queries about the current context.

use std::{collections::HashSet, ffi::CStr, fmt};

use gl::types::{GLenum, GLint, GLuint};

use crate::{Error, Result};

/// Version providing every entry point wrapped by this crate.
pub const REQUIRED_VERSION: Version = Version::new(4, 5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
	pub major: u32,
	pub minor: u32,
}

impl Version {
	pub const fn new(major: u32, minor: u32) -> Self {
		Self { major, minor }
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.major, self.minor)
	}
}

#[derive(Debug, Default, Clone)]
pub struct GlExtensions {
	names: HashSet<String>,
}

impl GlExtensions {
	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}
}

pub fn get_integer(name: GLenum) -> GLint {
	let mut value = 0;
	unsafe { gl::GetIntegerv(name, &mut value) };
	value
}

/// Version of the current context.
pub fn version() -> Version {
	Version::new(
		get_integer(gl::MAJOR_VERSION).max(0) as u32,
		get_integer(gl::MINOR_VERSION).max(0) as u32,
	)
}

/// Fail if the current context is older than `required`.
pub fn require_version(required: Version) -> Result<()> {
	let found = version();
	log::debug!("OpenGL context version {found}");

	if found < required {
		return Err(Error::UnsupportedVersion { required, found })
	}

	Ok(())
}

/// List the extensions supported by the current context.
pub fn extensions() -> GlExtensions {
	let count = get_integer(gl::NUM_EXTENSIONS).max(0) as GLuint;

	let names = (0..count)
		.filter_map(|i| {
			let name = unsafe { gl::GetStringi(gl::EXTENSIONS, i) };
			if name.is_null() {
				return None
			}

			Some(unsafe { CStr::from_ptr(name as *const _) }.to_string_lossy().into_owned())
		})
		.collect::<HashSet<_>>();

	log::debug!("OpenGL context supports {} extensions", names.len());
	GlExtensions { names }
}
