// Copyright (C) 2024 the glutils authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Fence sync objects.

use std::{ptr, time::Duration};

use gl::types::{GLint, GLsync, GLuint64};

use crate::{
	object::{Create, Handle, Object},
	Error,
	Result,
};

/// Non-owning handle to a sync object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SyncHandle(GLsync);

/// Owned sync object.
pub type Sync = Object<SyncHandle>;

gl_enum! {
	/// Successful results of [`SyncHandle::client_wait`].
	pub enum WaitStatus {
		AlreadySignaled = gl::ALREADY_SIGNALED,
		ConditionSatisfied = gl::CONDITION_SATISFIED,
		TimeoutExpired = gl::TIMEOUT_EXPIRED,
	}
}

impl WaitStatus {
	/// Whether the fence was signaled before the wait returned.
	pub fn signaled(self) -> bool {
		self != Self::TimeoutExpired
	}
}

impl Handle for SyncHandle {
	const NULL: Self = Self(ptr::null());

	#[inline]
	fn is_null(&self) -> bool {
		self.0.is_null()
	}

	unsafe fn destroy(self) {
		gl::DeleteSync(self.0);
	}
}

impl Create for SyncHandle {
	type Args = ();

	/// Insert a fence signaled once all previous commands complete (`glFenceSync`).
	fn create(_: ()) -> Result<Self> {
		let sync = unsafe { gl::FenceSync(gl::SYNC_GPU_COMMANDS_COMPLETE, 0) };
		if sync.is_null() {
			return Err(Error::CouldNotCreate("sync"))
		}

		Ok(Self(sync))
	}
}

impl SyncHandle {
	pub fn raw(&self) -> GLsync {
		self.0
	}

	/// # SAFETY
	/// * `sync` must be null or a sync object of the current context
	pub unsafe fn from_raw(sync: GLsync) -> Self {
		Self(sync)
	}

	/// Block until the fence is signaled or `timeout` passes (`glClientWaitSync`).
	///
	/// `flush` flushes the command stream first, without it a fence that was
	/// never flushed may never signal.
	pub fn client_wait(&self, flush: bool, timeout: Duration) -> Result<WaitStatus> {
		let flags = if flush { gl::SYNC_FLUSH_COMMANDS_BIT } else { 0 };
		let timeout = GLuint64::try_from(timeout.as_nanos()).unwrap_or(GLuint64::MAX);

		match unsafe { gl::ClientWaitSync(self.0, flags, timeout) } {
			gl::WAIT_FAILED => Err(Error::WaitFailed),
			status => WaitStatus::try_from(status),
		}
	}

	/// Make the server wait for the fence before running later commands (`glWaitSync`).
	pub fn wait(&self) {
		unsafe { gl::WaitSync(self.0, 0, gl::TIMEOUT_IGNORED) };
	}

	/// Poll the fence without blocking.
	pub fn is_signaled(&self) -> bool {
		let mut value = 0;
		unsafe { gl::GetSynciv(self.0, gl::SYNC_STATUS, 1, ptr::null_mut(), &mut value) };
		value == gl::SIGNALED as GLint
	}
}
