//! Temporarily relaxing validation for batches of dependent writes.
//!
//! Some fields can only be made consistent by several writes in a row
//! (e.g. resizing an array and the metadata that describes it). Pausing
//! switches off assignment checks on one instance; the [`ValidationPause`]
//! guard puts the flags back however the scope is left, unwinding included.

use crate::error::ModelResult;
use crate::model::DataModel;
use crate::value::Value;
use std::ops::{Deref, DerefMut};
use tracing::{debug, trace, warn};

/// Options for [`DataModel::pause_validation_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseOptions {
    /// Fully revalidate the instance once the flags are restored.
    pub revalidate_on_exit: bool,
}

impl Default for PauseOptions {
    fn default() -> Self {
        Self {
            revalidate_on_exit: true,
        }
    }
}

/// Guard returned by [`DataModel::pause`].
///
/// Dereferences to the paused model. Dropping the guard restores the
/// validation flags it found; [`ValidationPause::finish`] restores them
/// and then revalidates.
#[derive(Debug)]
pub struct ValidationPause<'a> {
    model: &'a mut DataModel,
    saved: Option<(bool, bool)>,
}

impl<'a> ValidationPause<'a> {
    fn new(model: &'a mut DataModel) -> Self {
        let saved = (model.flags.validate_assignment, model.flags.revalidate_instances);
        model.flags.validate_assignment = false;
        model.flags.revalidate_instances = false;
        trace!(model = %model.schema().name(), "validation paused");
        Self {
            model,
            saved: Some(saved),
        }
    }

    fn restore(&mut self) {
        if let Some((validate_assignment, revalidate_instances)) = self.saved.take() {
            self.model.flags.validate_assignment = validate_assignment;
            self.model.flags.revalidate_instances = revalidate_instances;
            trace!(model = %self.model.schema().name(), "validation restored");
        }
    }

    /// Restores the flags and fully revalidates the model.
    pub fn finish(mut self) -> ModelResult<()> {
        self.restore();
        self.model.revalidate()
    }
}

impl Deref for ValidationPause<'_> {
    type Target = DataModel;

    fn deref(&self) -> &DataModel {
        &*self.model
    }
}

impl DerefMut for ValidationPause<'_> {
    fn deref_mut(&mut self) -> &mut DataModel {
        &mut *self.model
    }
}

impl Drop for ValidationPause<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

impl DataModel {
    /// Pauses validation until the returned guard is dropped or finished.
    pub fn pause(&mut self) -> ValidationPause<'_> {
        ValidationPause::new(self)
    }

    /// Runs `f` with validation paused, then revalidates the whole model.
    ///
    /// An error returned by `f` is passed through after the flags are
    /// restored; the exit revalidation still runs and its outcome is
    /// logged at debug level.
    pub fn pause_validation<T>(
        &mut self,
        f: impl FnOnce(&mut DataModel) -> ModelResult<T>,
    ) -> ModelResult<T> {
        self.pause_validation_with(PauseOptions::default(), f)
    }

    /// [`DataModel::pause_validation`] with explicit options.
    pub fn pause_validation_with<T>(
        &mut self,
        options: PauseOptions,
        f: impl FnOnce(&mut DataModel) -> ModelResult<T>,
    ) -> ModelResult<T> {
        let mut guard = self.pause();
        match f(&mut *guard) {
            Ok(out) => {
                if options.revalidate_on_exit {
                    guard.finish()?;
                }
                Ok(out)
            }
            Err(e) => {
                if options.revalidate_on_exit {
                    let model = guard.schema().name().to_string();
                    if let Err(invalid) = guard.finish() {
                        debug!(%model, error = %invalid, "model left invalid by a failed pause scope");
                    }
                }
                Err(e)
            }
        }
    }

    /// Item-style assignment.
    ///
    /// With `validate_setitem` on (the default) this is [`DataModel::set`].
    /// With it off, the write bypasses validation entirely and a warning is
    /// logged; the caller is responsible for turning validation back on.
    pub fn set_item(&mut self, key: &str, value: impl Into<Value>) -> ModelResult<()> {
        if self.flags.validate_setitem {
            return self.set(key, value);
        }
        warn!(
            model = %self.schema().name(),
            field = %key,
            "set_item is circumventing validation and does not re-validate the model; \
             this can leave the model invalid for serialization. \
             Call set_validate_setitem(true) to make sure validation occurs"
        );
        let value = value.into();
        self.pause_validation_with(
            PauseOptions {
                revalidate_on_exit: false,
            },
            |model| model.set(key, value),
        )
    }
}
