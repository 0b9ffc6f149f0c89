// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the core and its backends.

use thiserror::Error;

/// Everything that can go wrong in the engine, the render queue, or a
/// backend.
///
/// The `Display` text of each variant is what
/// [`Engine::describe_last_error`](crate::engine::Engine::describe_last_error)
/// reports.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The backend library could not be initialized.
    #[error("Failed to initialize the backend")]
    InitializationFailed,

    /// The backend could not open a window (or allocate its surface).
    #[error("Failed to create Window")]
    WindowCreationFailed,

    /// The backend could not create a renderer for its window.
    #[error("Failed to create Renderer")]
    RendererCreationFailed,

    /// Storage for a queue entry or a backend object could not be reserved.
    #[error("Failed to allocate memory, might be out of RAM")]
    AllocationFailed,

    /// The handle does not name a live entry of this queue.
    #[error("Entry is not in the render queue, it was probably removed already")]
    EntryNotFound,

    /// An image file could not be read or decoded.
    #[error("Failed to load image, probably couldn't be found")]
    ImageLoadFailed,

    /// A font file could not be read or parsed.
    #[error("Failed to open the font, check spelling and location of font")]
    FontOpenFailed,

    /// Text rasterization produced no image.
    #[error("Failed to render text into a bitmap")]
    TextRenderFailed,

    /// A decoded image or text bitmap could not become a backend texture.
    #[error("Failed to convert a bitmap to a texture")]
    TextureConversionFailed,

    /// Queue positions are 1-based; zero names nothing.
    #[error("The position provided was exactly zero")]
    PositionCannotBeZero,

    /// The magnitude of the position exceeds the queue length.
    #[error("The position provided was higher than the queue length")]
    PositionOutOfRange,

    /// Negative positions other than -1 are not supported.
    #[error("Negative queue positions other than -1 are not supported")]
    NegativePosition,
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_text() {
        assert_eq!(
            Error::RendererCreationFailed.to_string(),
            "Failed to create Renderer"
        );
        assert_eq!(
            Error::PositionCannotBeZero.to_string(),
            "The position provided was exactly zero"
        );
    }
}
