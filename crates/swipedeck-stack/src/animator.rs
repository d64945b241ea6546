//! Per-card animated placement.
//!
//! Each card keeps its own offset, scale and elevation animatables, keyed by
//! identity so re-supplied lists do not restart motion for cards that stayed.
//! Targets are recomputed from a [`StackFrame`] whenever the stack or the
//! drag changes; values are pulled by the host after [`StackAnimator::advance`].

use crate::collections::map::{BuildHasher, HashSet};
use crate::collections::KeyedMap;
use crate::config::CardAlignment;
use crate::heuristics::{alignment_adjustment, card_scale, drag_sympathy_offset, resting_offset};
use smallvec::SmallVec;
use std::hash::Hash;
use swipedeck_animation::{Animatable, AnimationSpec, AnimationType, Easing, SpringSpec};
use swipedeck_ui_graphics::{Offset, Size};

pub const RESTING_ELEVATION: f32 = 4.0;
pub const ACTIVE_ELEVATION: f32 = 8.0;
pub const ELEVATION_DURATION_MS: u64 = 300;

fn offset_spring() -> AnimationType {
    AnimationType::Spring(
        SpringSpec::new(SpringSpec::DAMPING_RATIO_NO_BOUNCY, SpringSpec::STIFFNESS_MEDIUM)
            .with_thresholds(0.5, 5.0),
    )
}

fn scale_spring() -> AnimationType {
    AnimationType::Spring(SpringSpec::new(
        SpringSpec::DAMPING_RATIO_NO_BOUNCY,
        SpringSpec::STIFFNESS_MEDIUM_LOW,
    ))
}

fn elevation_tween() -> AnimationType {
    AnimationType::Tween(AnimationSpec::tween(
        ELEVATION_DURATION_MS,
        Easing::FastOutSlowInEasing,
    ))
}

/// Inputs shared by every card when computing animation targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackFrame {
    pub count: usize,
    /// Drag progress of the front card in `[-1, 1]`.
    pub progress: f32,
    /// Live drag offset of the front card.
    pub front_offset: Offset,
    pub front_engaged: bool,
    pub alignment: CardAlignment,
    pub spacing_px: f32,
    pub card_size: Size,
}

impl Default for StackFrame {
    fn default() -> Self {
        Self {
            count: 0,
            progress: 0.0,
            front_offset: Offset::ZERO,
            front_engaged: false,
            alignment: CardAlignment::default(),
            spacing_px: 0.0,
            card_size: Size::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CardTargets {
    offset: Offset,
    scale: f32,
    elevation: f32,
}

impl CardTargets {
    fn compute(index: usize, frame: &StackFrame) -> Self {
        let mut offset = resting_offset(frame.alignment, index, frame.spacing_px)
            + drag_sympathy_offset(
                frame.progress,
                index,
                frame.spacing_px,
                frame.count,
                frame.alignment,
            );
        let mut elevation = RESTING_ELEVATION;
        if index == 0 {
            offset += frame.front_offset;
            if frame.front_engaged {
                elevation = ACTIVE_ELEVATION;
            }
        }
        Self {
            offset,
            scale: card_scale(index, frame.count, frame.progress),
            elevation,
        }
    }
}

#[derive(Debug, Clone)]
struct CardAnimation {
    index: usize,
    offset: Animatable<Offset>,
    scale: Animatable<f32>,
    elevation: Animatable<f32>,
}

impl CardAnimation {
    fn at_rest(index: usize, frame: &StackFrame) -> Self {
        let targets = CardTargets::compute(index, frame);
        Self {
            index,
            offset: Animatable::new(targets.offset),
            scale: Animatable::new(targets.scale),
            elevation: Animatable::new(targets.elevation),
        }
    }

    fn retarget(&mut self, frame: &StackFrame) {
        let targets = CardTargets::compute(self.index, frame);
        self.offset.update_target(targets.offset, offset_spring());
        self.scale.update_target(targets.scale, scale_spring());
        self.elevation
            .update_target(targets.elevation, elevation_tween());
    }

    fn on_frame(&mut self, frame_time_nanos: u64) -> bool {
        let mut running = self.offset.on_frame(frame_time_nanos);
        running |= self.scale.on_frame(frame_time_nanos);
        running |= self.elevation.on_frame(frame_time_nanos);
        running
    }

    fn is_running(&self) -> bool {
        self.offset.is_running() || self.scale.is_running() || self.elevation.is_running()
    }
}

/// What the host draws for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVisual<K> {
    pub key: K,
    pub index: usize,
    /// Higher draws on top; the front card has the largest value.
    pub z_index: usize,
    /// Translation from the stack anchor, alignment adjustment included.
    pub translation: Offset,
    pub scale: f32,
    pub elevation: f32,
}

pub struct StackAnimator<K> {
    cards: KeyedMap<K, CardAnimation>,
    frame: StackFrame,
}

impl<K> std::fmt::Debug for StackAnimator<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackAnimator")
            .field("cards", &self.cards.len())
            .field("frame", &self.frame)
            .finish()
    }
}

impl<K: Clone + Eq + Hash> Default for StackAnimator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> StackAnimator<K> {
    pub fn new() -> Self {
        Self {
            cards: KeyedMap::with_hasher(BuildHasher::default()),
            frame: StackFrame::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.cards.contains_key(key)
    }

    pub fn frame(&self) -> &StackFrame {
        &self.frame
    }

    /// Match the tracked cards to `keys`, in stack order.
    ///
    /// Cards that stayed keep their in-flight animations and are retargeted
    /// for their new index. New cards snap to their resting values. Departed
    /// cards are dropped.
    pub fn sync<'a>(&mut self, keys: impl IntoIterator<Item = &'a K>, frame: StackFrame)
    where
        K: 'a,
    {
        let keys: SmallVec<[&K; 8]> = keys.into_iter().collect();
        let frame = StackFrame {
            count: keys.len(),
            ..frame
        };
        self.frame = frame;

        let live: HashSet<&K> = keys.iter().copied().collect();
        let before = self.cards.len();
        self.cards.retain(|key, _| live.contains(key));
        let departed = before - self.cards.len();

        let mut added = 0usize;
        for (index, key) in keys.iter().enumerate() {
            match self.cards.get_mut(*key) {
                Some(card) => card.index = index,
                None => {
                    self.cards
                        .insert((*key).clone(), CardAnimation::at_rest(index, &frame));
                    added += 1;
                }
            }
        }
        self.cards.sort_by(|_, a, _, b| a.index.cmp(&b.index));

        if added > 0 || departed > 0 {
            log::trace!(
                "animator synced {} cards ({added} added, {departed} removed)",
                self.cards.len()
            );
        }
        self.retarget(frame);
    }

    /// Recompute every card's targets. Unchanged targets leave running
    /// animations untouched.
    pub fn retarget(&mut self, frame: StackFrame) {
        self.frame = StackFrame {
            count: self.cards.len(),
            ..frame
        };
        let frame = self.frame;
        for card in self.cards.values_mut() {
            card.retarget(&frame);
        }
    }

    /// Step every animation to `frame_time_nanos`. Returns true while any
    /// card is still moving.
    pub fn advance(&mut self, frame_time_nanos: u64) -> bool {
        let mut running = false;
        for card in self.cards.values_mut() {
            running |= card.on_frame(frame_time_nanos);
        }
        log::trace!("animator frame at {frame_time_nanos}ns, running: {running}");
        running
    }

    pub fn is_animating(&self) -> bool {
        self.cards.values().any(CardAnimation::is_running)
    }

    fn visual_of(&self, key: &K, card: &CardAnimation) -> CardVisual<K> {
        let scale = card.scale.value();
        CardVisual {
            key: key.clone(),
            index: card.index,
            z_index: self.cards.len() - card.index,
            translation: card.offset.value()
                + alignment_adjustment(self.frame.alignment, scale, self.frame.card_size),
            scale,
            elevation: card.elevation.value(),
        }
    }

    pub fn visual(&self, key: &K) -> Option<CardVisual<K>> {
        self.cards.get(key).map(|card| self.visual_of(key, card))
    }

    /// Visuals for every card, front first.
    pub fn visuals(&self) -> SmallVec<[CardVisual<K>; 4]> {
        self.cards
            .iter()
            .map(|(key, card)| self.visual_of(key, card))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
