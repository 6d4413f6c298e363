//! Image preview with pending rotation.

use crate::api::dto::RotateRequest;
use crate::error::{CoreError, CoreResult};
use crate::fs::path::{is_rotatable, with_root_prefix};

/// The image open in the preview dialog and the rotation not yet saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    path: Option<String>,
    rotation: u16,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` with no rotation.
    pub fn open(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
        self.rotation = 0;
    }

    /// Closes the preview and forgets the pending rotation.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Pending clockwise rotation in degrees.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    /// Whether the rotate and save controls are enabled.
    pub fn can_rotate(&self) -> bool {
        self.path.as_deref().is_some_and(is_rotatable)
    }

    /// Turns the preview a quarter turn clockwise and returns the new angle.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotRotatable`] if no JPEG is open.
    pub fn rotate(&mut self) -> CoreResult<u16> {
        if !self.can_rotate() {
            return Err(CoreError::NotRotatable(
                self.path.clone().unwrap_or_default(),
            ));
        }
        self.rotation = (self.rotation + 90) % 360;
        Ok(self.rotation)
    }

    /// The request that saves the pending rotation, or `None` when there is
    /// nothing to save.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotRotatable`] if the open image is not a JPEG.
    /// - [`CoreError::InvalidRotation`] if the angle is not a quarter turn.
    pub fn rotate_request(&self, root: &str) -> CoreResult<Option<RotateRequest>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        if !is_rotatable(path) {
            return Err(CoreError::NotRotatable(path.to_string()));
        }
        match self.rotation {
            0 => Ok(None),
            90 | 180 | 270 => Ok(Some(RotateRequest {
                path: with_root_prefix(path, root),
                rotation: self.rotation,
            })),
            other => Err(CoreError::InvalidRotation(other)),
        }
    }
}
