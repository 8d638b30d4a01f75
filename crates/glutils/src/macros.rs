// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

/// Declare a `#[repr(u32)]` enum whose discriminants are GL enum values.
///
/// Generates `gl_enum()` for passing the value to GL, and a `TryFrom<GLenum>`
/// which fails with [`Error::UnknownEnum`](crate::Error::UnknownEnum) for values
/// outside the enum, so query results are never transmuted.
macro_rules! gl_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident = $value:path,
			)*
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		#[repr(u32)]
		$vis enum $name {
			$(
				$(#[$variant_meta])*
				$variant = $value,
			)*
		}

		impl $name {
			#[inline]
			pub const fn gl_enum(self) -> gl::types::GLenum {
				self as gl::types::GLenum
			}
		}

		impl ::core::convert::TryFrom<gl::types::GLenum> for $name {
			type Error = $crate::Error;

			fn try_from(value: gl::types::GLenum) -> ::core::result::Result<Self, Self::Error> {
				match value {
					$($value => Ok(Self::$variant),)*
					_ => Err($crate::Error::UnknownEnum {
						kind: stringify!($name),
						value,
					}),
				}
			}
		}
	};
}

/// Declare a non-owning handle type wrapping a GL object name.
///
/// `$kind` is the object kind as spelled in the `glIs*` entry point.
macro_rules! gl_handle {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident($kind:ident): $identifier:path;
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
		#[repr(transparent)]
		$vis struct $name(pub(crate) gl::types::GLuint);

		impl $crate::object::Named for $name {
			const IDENTIFIER: gl::types::GLenum = $identifier;

			#[inline]
			fn name(&self) -> gl::types::GLuint {
				self.0
			}

			#[inline]
			unsafe fn from_name(name: gl::types::GLuint) -> Self {
				Self(name)
			}

			fn is_valid(&self) -> bool {
				paste::paste! {
					unsafe { gl::[<Is $kind>](self.0) == gl::TRUE }
				}
			}
		}
	};
}

/// Implement `Handle` and `Create` for an object kind created through
/// `glCreate<Kind>s(n, names)` and deleted through `glDelete<Kind>s(n, names)`.
macro_rules! dsa_object {
	($name:ident($kind:ident)) => {
		impl $crate::object::Handle for $name {
			const NULL: Self = Self(0);

			#[inline]
			fn is_null(&self) -> bool {
				self.0 == 0
			}

			unsafe fn destroy(self) {
				paste::paste! {
					gl::[<Delete $kind s>](1, &self.0);
				}
			}
		}

		impl $crate::object::Create for $name {
			type Args = ();

			fn create(_: ()) -> $crate::Result<Self> {
				let mut name = 0;
				paste::paste! {
					unsafe { gl::[<Create $kind s>](1, &mut name) };
				}

				if name == 0 {
					return Err($crate::Error::CouldNotCreate(stringify!($kind)))
				}

				Ok(Self(name))
			}
		}
	};
}
