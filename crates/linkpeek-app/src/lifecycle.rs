//! Surface lifecycle and the bound view resource
//!
//! The view is bound when the surface first becomes active and released
//! exactly once when the guard is dropped, on every exit path of the engine.

use linkpeek_core::prelude::*;

use crate::state::PreviewState;

/// Lifecycle phase of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfacePhase {
    /// Created but not yet visible.
    #[default]
    Created,
    /// Visible and interactive; view states are observed.
    Active,
    /// Hidden; observation is paused.
    Stopped,
    /// Torn down; the session ends.
    Destroyed,
}

impl SurfacePhase {
    pub fn is_active(&self) -> bool {
        matches!(self, SurfacePhase::Active)
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self, SurfacePhase::Destroyed)
    }
}

/// Something that can draw a preview state.
pub trait PreviewView: Send {
    /// Draw the current state.
    fn render(&mut self, state: &PreviewState) -> Result<()>;

    /// Free whatever the view holds. Called exactly once, by `BoundView`.
    fn release(&mut self);
}

/// Owned view binding, released on drop.
pub struct BoundView<V: PreviewView> {
    view: V,
}

impl<V: PreviewView> BoundView<V> {
    pub fn bind(view: V) -> Self {
        debug!("View bound");
        Self { view }
    }

    pub fn render(&mut self, state: &PreviewState) -> Result<()> {
        self.view.render(state)
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

impl<V: PreviewView> Drop for BoundView<V> {
    fn drop(&mut self) {
        self.view.release();
        debug!("View released");
    }
}
