// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when a shaper is built from bad input or asked to shape outside its buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    /// The offending mask, or the requested start index.
    value: u32,
    /// The requested count for bounds errors.
    count: usize,
    /// The buffer length for bounds errors.
    len: usize,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn invalid_mask(mask: u32) -> Self {
        Self {
            kind: ErrorKind::InvalidMask,
            value: mask,
            count: 0,
            len: 0,
        }
    }

    pub(crate) fn out_of_bounds(start: usize, count: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::OutOfBounds,
            value: u32::try_from(start).unwrap_or(u32::MAX),
            count,
            len,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidMask => write!(f, "invalid digit range mask {:#x}", self.value),
            ErrorKind::OutOfBounds => write!(
                f,
                "shaping {} characters from {} exceeds buffer length {}",
                self.count, self.value, self.len
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The mask named unknown ranges, or not exactly one range where one was required.
    InvalidMask,
    /// The start/count pair does not lie within the buffer.
    OutOfBounds,
}
