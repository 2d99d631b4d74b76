// Copyright 2026 the Pleat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fold strip component.
//!
//! [`FoldStrip`] ties the pieces together: it owns the configuration, the
//! content source, the decoration strategy, and the [`FoldAnimator`] that
//! holds the unfold value. The host drives it one frame at a time:
//!
//! ```text
//!   set_target_unfold ──► FoldAnimator ◄── tick(FrameTick)
//!                              │
//!                              ▼ unfold
//!   compose(parent) ──► ComposedFrame ──► Presenter::apply()
//! ```
//!
//! Every state change accepts a [`Tracer`] so animation transitions can be
//! observed without the strip holding on to a sink.

use kurbo::Size;

use crate::animation::{AnimationPhase, FoldAnimator};
use crate::backend::Presenter;
use crate::config::{ConfigError, FoldConfig, is_unit};
use crate::content::ContentSource;
use crate::decoration::Decoration;
use crate::layout::{ComposedFrame, compose};
use crate::time::HostTime;
use crate::timing::FrameTick;
use crate::trace::{
    FrameEvent, FrameSummary, FrameSummaryBuilder, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    Tracer,
};

/// An accordion strip of equally sized panels folding about shared hinges.
pub struct FoldStrip<V> {
    config: FoldConfig,
    content: ContentSource<V>,
    decoration: Decoration<V>,
    animator: FoldAnimator,
}

impl<V> core::fmt::Debug for FoldStrip<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FoldStrip")
            .field("config", &self.config)
            .field("content", &self.content)
            .field("decoration", &self.decoration)
            .field("animator", &self.animator)
            .finish()
    }
}

impl<V> FoldStrip<V> {
    /// Creates a mounted, idle strip resting at `config.target_unfold`.
    ///
    /// The first mount never animates.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration or decoration is
    /// invalid, or if `content` has no panels.
    pub fn new(
        config: FoldConfig,
        content: ContentSource<V>,
        decoration: Decoration<V>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        decoration.validate()?;
        if content.is_empty() {
            return Err(ConfigError::EmptyContent);
        }
        Ok(Self {
            animator: FoldAnimator::new(config.target_unfold, config.animation),
            config,
            content,
            decoration,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    /// Returns the number of panels.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.content.len()
    }

    /// Returns the current unfold value, always in `[0, 1]`.
    #[must_use]
    pub fn unfold(&self) -> f64 {
        self.animator.value()
    }

    /// Returns the unfold value the strip is heading to.
    #[must_use]
    pub fn target_unfold(&self) -> f64 {
        self.animator.target()
    }

    /// Returns the animator phase.
    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.animator.phase()
    }

    /// Starts animating toward `target` at host time `now`.
    ///
    /// Returns `Ok(false)` when nothing changed: the target is already
    /// `target`, or the strip has been unmounted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TargetUnfoldOutOfRange`] if `target` is outside
    /// `[0, 1]`.
    pub fn set_target_unfold(
        &mut self,
        target: f64,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Result<bool, ConfigError> {
        if !is_unit(target) {
            return Err(ConfigError::TargetUnfoldOutOfRange(target));
        }
        if self.phase() == AnimationPhase::Unmounted {
            return Ok(false);
        }
        self.config.target_unfold = target;
        let event = self.animator.set_target(target, now);
        if let Some(event) = &event {
            tracer.animation(now, event);
        }
        Ok(event.is_some())
    }

    /// Replaces the configuration without resetting the unfold value.
    ///
    /// The new animation timing applies to the next transition. A changed
    /// `target_unfold` is routed through the animator like
    /// [`set_target_unfold`](Self::set_target_unfold).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] and leaves the strip untouched if `config`
    /// is invalid.
    pub fn reconfigure(
        &mut self,
        config: FoldConfig,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        let retarget = config.target_unfold != self.config.target_unfold;
        self.config = config;
        self.animator.set_spec(config.animation);
        if retarget {
            self.set_target_unfold(config.target_unfold, now, tracer)?;
        }
        Ok(())
    }

    /// Replaces the content source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyContent`] if `content` has no panels.
    pub fn set_content(&mut self, content: ContentSource<V>) -> Result<(), ConfigError> {
        if content.is_empty() {
            return Err(ConfigError::EmptyContent);
        }
        self.content = content;
        Ok(())
    }

    /// Replaces the decoration strategy.
    ///
    /// # Errors
    ///
    /// Propagates [`Decoration::validate`] failures.
    pub fn set_decoration(&mut self, decoration: Decoration<V>) -> Result<(), ConfigError> {
        decoration.validate()?;
        self.decoration = decoration;
        Ok(())
    }

    /// Advances the animation to `tick.now` and returns the new unfold value.
    pub fn tick(&mut self, tick: &FrameTick, tracer: &mut Tracer<'_>) -> f64 {
        if let Some(event) = self.animator.tick(tick.now) {
            tracer.animation(tick.now, &event);
        }
        self.animator.value()
    }

    /// Tears the strip down, silently cancelling any running animation.
    ///
    /// Further ticks and retargets are ignored, and composition yields no
    /// panels.
    pub fn unmount(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        if let Some(event) = self.animator.unmount() {
            tracer.animation(now, &event);
        }
    }
}

impl<V: Clone> FoldStrip<V> {
    /// Lays out the strip at its current unfold value inside `parent`.
    #[must_use]
    pub fn compose(&self, parent: Size) -> ComposedFrame<V> {
        if self.phase() == AnimationPhase::Unmounted {
            return ComposedFrame::unmounted(
                self.config.axis,
                self.animator.value(),
                self.content.len(),
            );
        }
        compose(
            &self.config,
            &self.content,
            &self.decoration,
            self.animator.value(),
            parent,
        )
    }

    /// Runs one frame: tick, compose, and present.
    ///
    /// `now` reads the host clock and stamps the phase boundaries. Returns
    /// `None` without touching the presenter once the strip is unmounted.
    pub fn present<P: Presenter<V> + ?Sized>(
        &mut self,
        tick: &FrameTick,
        parent: Size,
        presenter: &mut P,
        tracer: &mut Tracer<'_>,
        mut now: impl FnMut() -> HostTime,
    ) -> Option<FrameSummary> {
        if self.phase() == AnimationPhase::Unmounted {
            return None;
        }
        let frame_index = tick.frame_index;
        let mut summary = FrameSummaryBuilder::new(frame_index, tick.now);

        phase_begin(&mut summary, tracer, frame_index, PhaseKind::Tick, now());
        let unfold = self.tick(tick, tracer);
        phase_end(&mut summary, tracer, frame_index, PhaseKind::Tick, now());

        phase_begin(&mut summary, tracer, frame_index, PhaseKind::Compose, now());
        let frame = self.compose(parent);
        phase_end(&mut summary, tracer, frame_index, PhaseKind::Compose, now());

        phase_begin(&mut summary, tracer, frame_index, PhaseKind::Present, now());
        presenter.apply(&frame);
        phase_end(&mut summary, tracer, frame_index, PhaseKind::Present, now());

        #[cfg(feature = "trace-rich")]
        for panel in &frame.panels {
            tracer.panel(&crate::trace::PanelEvent {
                frame_index,
                index: panel.index,
                angle: panel.projection.angle,
                extent: panel.projection.extent(frame.axis),
                folds_inward: panel.folds_inward,
                interactive: panel.interactive,
                layer_count: panel.visual.layers.len(),
            });
        }

        tracer.frame(&FrameEvent {
            frame_index,
            now: tick.now,
            unfold,
            target_unfold: self.animator.target(),
            phase: self.phase(),
            mounted_panels: frame.panels.len(),
            content_extent: frame.content_extent,
        });
        summary.set_composed(frame.unfold, frame.panels.len());
        let summary = summary.finish();
        tracer.frame_summary(&summary);
        Some(summary)
    }
}

fn phase_begin(
    summary: &mut FrameSummaryBuilder,
    tracer: &mut Tracer<'_>,
    frame_index: u64,
    phase: PhaseKind,
    timestamp: HostTime,
) {
    summary.phase_begin(phase, timestamp);
    tracer.phase_begin(&PhaseBeginEvent {
        frame_index,
        phase,
        timestamp,
    });
}

fn phase_end(
    summary: &mut FrameSummaryBuilder,
    tracer: &mut Tracer<'_>,
    frame_index: u64,
    phase: PhaseKind,
    timestamp: HostTime,
) {
    summary.phase_end(phase, timestamp);
    tracer.phase_end(&PhaseEndEvent {
        frame_index,
        phase,
        timestamp,
    });
}
