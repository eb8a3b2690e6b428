//! Scene-frame lifecycle.
//!
//! A frame is a unit of scene content with an enforced lifecycle:
//! `Created -> Initialized <-> Enabled`, and `Initialized -> Finalized` as
//! the terminal transition. [`FrameLifecycle`] owns the state checking,
//! [`Frame`] layers user hooks on top of it, and [`FrameHolder`] keeps at
//! most one frame enabled at a time.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::warn;


/// Lifecycle state of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Constructed, not yet initialized.
    Created,
    /// Initialized and currently dormant.
    Initialized,
    /// Initialized and active in the scene.
    Enabled,
    /// Torn down. No further transition is allowed.
    Finalized,
}

/// Errors for lifecycle transitions attempted from the wrong state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// `initialize` is only valid on a created frame.
    #[error("frame cannot initialize from the {0:?} state")]
    Initialize(FrameState),
    /// `enable` is only valid on an initialized, dormant frame.
    #[error("frame cannot enable from the {0:?} state")]
    Enable(FrameState),
    /// `disable` is only valid on an enabled frame.
    #[error("frame cannot disable from the {0:?} state")]
    Disable(FrameState),
    /// `finalize` is only valid on an initialized, dormant frame.
    #[error("frame cannot finalize from the {0:?} state")]
    Finalize(FrameState),
}

/// State machine embedded in every frame.
///
/// All transition methods are fallible and leave the state untouched when
/// the transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLifecycle {
    state: FrameState,
}

impl FrameLifecycle {
    /// A lifecycle in the created state.
    pub fn new() -> Self {
        Self {
            state: FrameState::Created,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// True while the frame is active in the scene.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state == FrameState::Enabled
    }

    /// True from initialization until finalization, enabled or not.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, FrameState::Initialized | FrameState::Enabled)
    }

    /// `Created -> Initialized`.
    pub fn initialize(&mut self) -> Result<(), FrameError> {
        match self.state {
            FrameState::Created => {
                self.state = FrameState::Initialized;
                Ok(())
            }
            state => Err(FrameError::Initialize(state)),
        }
    }

    /// `Initialized -> Enabled`.
    pub fn enable(&mut self) -> Result<(), FrameError> {
        match self.state {
            FrameState::Initialized => {
                self.state = FrameState::Enabled;
                Ok(())
            }
            state => Err(FrameError::Enable(state)),
        }
    }

    /// `Enabled -> Initialized`.
    pub fn disable(&mut self) -> Result<(), FrameError> {
        match self.state {
            FrameState::Enabled => {
                self.state = FrameState::Initialized;
                Ok(())
            }
            state => Err(FrameError::Disable(state)),
        }
    }

    /// `Initialized -> Finalized`.
    pub fn finalize(&mut self) -> Result<(), FrameError> {
        match self.state {
            FrameState::Initialized => {
                self.state = FrameState::Finalized;
                Ok(())
            }
            state => Err(FrameError::Finalize(state)),
        }
    }
}

impl Default for FrameLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of scene content with lifecycle-checked hooks.
///
/// Implementers embed a [`FrameLifecycle`] and override the `on_*` hooks;
/// the provided drivers advance the lifecycle first and invoke the hook only
/// when the transition was valid.
pub trait Frame {
    /// The embedded lifecycle.
    fn lifecycle(&self) -> &FrameLifecycle;

    /// The embedded lifecycle, mutably.
    fn lifecycle_mut(&mut self) -> &mut FrameLifecycle;

    /// Hook invoked after a successful `initialize` transition.
    fn on_initialize(&mut self) {}

    /// Hook invoked after a successful `enable` transition.
    fn on_enable(&mut self) {}

    /// Hook invoked after a successful `disable` transition.
    fn on_disable(&mut self) {}

    /// Hook invoked after a successful `finalize` transition.
    fn on_finalize(&mut self) {}

    /// Initialize the frame and run [`on_initialize`](Self::on_initialize).
    fn initialize(&mut self) -> Result<(), FrameError> {
        self.lifecycle_mut().initialize()?;
        self.on_initialize();
        Ok(())
    }

    /// Enable the frame and run [`on_enable`](Self::on_enable).
    fn enable(&mut self) -> Result<(), FrameError> {
        self.lifecycle_mut().enable()?;
        self.on_enable();
        Ok(())
    }

    /// Disable the frame and run [`on_disable`](Self::on_disable).
    fn disable(&mut self) -> Result<(), FrameError> {
        self.lifecycle_mut().disable()?;
        self.on_disable();
        Ok(())
    }

    /// Finalize the frame and run [`on_finalize`](Self::on_finalize).
    fn finalize(&mut self) -> Result<(), FrameError> {
        self.lifecycle_mut().finalize()?;
        self.on_finalize();
        Ok(())
    }
}

/// Shared handle to a frame managed by a [`FrameHolder`].
pub type FrameRef = Rc<RefCell<dyn Frame>>;

/// Keeps at most one frame enabled at a time.
///
/// Handing a frame to the holder enables it; handing over the next frame, or
/// dropping the holder, disables the previous one first.
#[derive(Default)]
pub struct FrameHolder {
    current: Option<FrameRef>,
}

impl FrameHolder {
    /// An empty holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a frame is held (and therefore enabled).
    #[inline]
    pub fn is_holding(&self) -> bool {
        self.current.is_some()
    }

    /// The held frame, if any.
    #[inline]
    pub fn current(&self) -> Option<&FrameRef> {
        self.current.as_ref()
    }

    /// Disable the held frame, then enable `frame` and hold it.
    ///
    /// When enabling `frame` fails, the previous frame has already been
    /// released and the holder is left empty.
    pub fn hold(
        &mut self,
        frame: FrameRef,
    ) -> Result<(), FrameError> {
        self.clear()?;
        frame.borrow_mut().enable()?;
        self.current = Some(frame);
        Ok(())
    }

    /// Disable and release the held frame, if any.
    pub fn clear(&mut self) -> Result<(), FrameError> {
        if let Some(previous) = self.current.take() {
            previous.borrow_mut().disable()?;
        }
        Ok(())
    }
}

impl Drop for FrameHolder {
    fn drop(&mut self) {
        if let Some(frame) = self.current.take() {
            match frame.try_borrow_mut() {
                Ok(mut frame) => {
                    if let Err(err) = frame.disable() {
                        warn!("dropped frame holder could not disable its frame: {}", err);
                    }
                }
                Err(_) => {
                    warn!("frame holder dropped while its frame was borrowed");
                }
            }
        }
    }
}
