//! The card stack coordinator.
//!
//! [`CardStack`] owns the ordered items and is the only thing that changes
//! membership. It routes pointer input to the [`GestureController`], keeps
//! the [`StackAnimator`] in sync with the items, removes committed cards and
//! notifies the host.

use crate::animator::{CardVisual, StackAnimator, StackFrame};
use crate::collections::map::HashSet;
use crate::config::{ConfigError, ContentAnchor, StackConfiguration, StackMetrics};
use crate::gesture::{GestureController, GestureEvent, GestureState};
use crate::heuristics::SwipeDirection;
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;
use swipedeck_foundation::{PointerEvent, PointerEventKind};
use swipedeck_ui_graphics::Size;

/// A host item: a stable identity plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackItem<K, T> {
    pub key: K,
    pub payload: T,
}

impl<K, T> StackItem<K, T> {
    pub fn new(key: K, payload: T) -> Self {
        Self { key, payload }
    }
}

type CommitCallback<K, T> = Box<dyn FnMut(StackItem<K, T>)>;

pub struct CardStack<K, T> {
    items: Vec<StackItem<K, T>>,
    config: StackConfiguration,
    metrics: StackMetrics,
    gesture: GestureController,
    animator: StackAnimator<K>,
    /// Key of the card that was in front when the current drag began.
    dragged_key: Option<K>,
    on_commit_left: Option<CommitCallback<K, T>>,
    on_commit_right: Option<CommitCallback<K, T>>,
    on_exhausted: Option<Box<dyn FnMut()>>,
}

impl<K, T> fmt::Debug for CardStack<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardStack")
            .field("items", &self.items.len())
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .field("gesture", &self.gesture.phase())
            .field("animator", &self.animator)
            .finish()
    }
}

impl<K, T> CardStack<K, T>
where
    K: Clone + Eq + Hash,
{
    pub fn new(config: StackConfiguration, viewport: Size) -> Result<Self, ConfigError> {
        let metrics = StackMetrics::resolve(&config, viewport)?;
        Ok(Self {
            items: Vec::new(),
            config,
            metrics,
            gesture: GestureController::new(),
            animator: StackAnimator::new(),
            dragged_key: None,
            on_commit_left: None,
            on_commit_right: None,
            on_exhausted: None,
        })
    }

    pub fn with_on_commit_left(mut self, callback: impl FnMut(StackItem<K, T>) + 'static) -> Self {
        self.on_commit_left = Some(Box::new(callback));
        self
    }

    pub fn with_on_commit_right(
        mut self,
        callback: impl FnMut(StackItem<K, T>) + 'static,
    ) -> Self {
        self.on_commit_right = Some(Box::new(callback));
        self
    }

    /// Called once each time the last card leaves the stack.
    pub fn with_on_exhausted(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_exhausted = Some(Box::new(callback));
        self
    }

    /// Replace the items. An in-flight gesture is cancelled, without any
    /// callback, only when the key sequence actually changed.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = StackItem<K, T>>) {
        let items = dedupe(items, &mut HashSet::default());
        let same_keys = items.len() == self.items.len()
            && items
                .iter()
                .zip(&self.items)
                .all(|(new, old)| new.key == old.key);
        if !same_keys {
            self.cancel_gesture();
        }
        self.replace_items(items);
    }

    /// Add items behind the current ones. Never interrupts a gesture.
    pub fn append(&mut self, items: impl IntoIterator<Item = StackItem<K, T>>) {
        let mut seen: HashSet<K> = self.items.iter().map(|item| item.key.clone()).collect();
        let added = dedupe(items, &mut seen);
        if added.is_empty() {
            return;
        }
        log::debug!("appending {} cards behind {}", added.len(), self.items.len());
        self.items.extend(added);
        self.sync_animator();
    }

    /// Replace the items and always cancel any gesture.
    pub fn reset(&mut self, items: impl IntoIterator<Item = StackItem<K, T>>) {
        let items = dedupe(items, &mut HashSet::default());
        log::debug!("stack reset with {} cards", items.len());
        self.cancel_gesture();
        self.replace_items(items);
    }

    fn replace_items(&mut self, items: Vec<StackItem<K, T>>) {
        let was_empty = self.items.is_empty();
        self.items = items;
        self.sync_animator();
        if !was_empty {
            self.notify_if_exhausted();
        }
    }

    fn cancel_gesture(&mut self) {
        if self.gesture.cancel() {
            log::debug!("in-flight gesture cancelled by an external list change");
        }
        self.dragged_key = None;
    }

    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), ConfigError> {
        if viewport == self.metrics.viewport {
            return Ok(());
        }
        self.metrics = StackMetrics::resolve(&self.config, viewport)?;
        self.animator.retarget(self.frame());
        Ok(())
    }

    pub fn set_configuration(&mut self, config: StackConfiguration) -> Result<(), ConfigError> {
        if config == self.config {
            return Ok(());
        }
        self.metrics = StackMetrics::resolve(&config, self.metrics.viewport)?;
        self.config = config;
        self.animator.retarget(self.frame());
        Ok(())
    }

    /// Route a pointer event to the front card. Returns true when handled.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        if self.items.is_empty() {
            return false;
        }

        let handled = self
            .gesture
            .on_pointer_event(event, &self.config, &self.metrics);
        if !handled {
            return false;
        }

        if event.kind == PointerEventKind::Down {
            self.dragged_key = self.items.first().map(|item| item.key.clone());
        }
        self.animator.retarget(self.frame());
        true
    }

    /// Step gesture timers and animations to `frame_time_nanos`.
    ///
    /// Returns true while another frame is needed.
    pub fn advance(&mut self, frame_time_nanos: u64) -> bool {
        match self.gesture.advance(frame_time_nanos) {
            Some(GestureEvent::Finalize(direction)) => self.finalize(direction),
            Some(GestureEvent::Settled) => {
                self.dragged_key = None;
                self.animator.retarget(self.frame());
            }
            None => {}
        }

        let animating = self.animator.advance(frame_time_nanos);
        animating || !self.gesture.is_idle()
    }

    fn finalize(&mut self, direction: SwipeDirection) {
        let Some(key) = self.dragged_key.take() else {
            log::debug!("swipe {direction:?} finished with no card to remove");
            return;
        };
        let Some(position) = self.items.iter().position(|item| item.key == key) else {
            log::debug!("swipe {direction:?} finished but its card is gone");
            return;
        };

        let item = self.items.remove(position);
        log::debug!(
            "swiped {direction:?}; removed card at {position}, {} left",
            self.items.len()
        );
        self.sync_animator();

        let callback = match direction {
            SwipeDirection::Left => self.on_commit_left.as_mut(),
            SwipeDirection::Right => self.on_commit_right.as_mut(),
            SwipeDirection::Up | SwipeDirection::Down => None,
        };
        if let Some(callback) = callback {
            callback(item);
        }
        self.notify_if_exhausted();
    }

    fn notify_if_exhausted(&mut self) {
        if !self.items.is_empty() {
            return;
        }
        log::debug!("card stack exhausted");
        if let Some(callback) = self.on_exhausted.as_mut() {
            callback();
        }
    }

    fn frame(&self) -> StackFrame {
        StackFrame {
            count: self.items.len(),
            progress: self.gesture.progress(),
            front_offset: self.gesture.offset(),
            front_engaged: self.gesture.front_engaged(),
            alignment: self.config.alignment,
            spacing_px: self.metrics.spacing_px,
            card_size: self.metrics.card_size,
        }
    }

    fn sync_animator(&mut self) {
        let frame = self.frame();
        self.animator
            .sync(self.items.iter().map(|item| &item.key), frame);
    }

    pub fn items(&self) -> &[StackItem<K, T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn front(&self) -> Option<&StackItem<K, T>> {
        self.items.first()
    }

    pub fn is_exhausted(&self) -> bool {
        self.items.is_empty()
    }

    /// Drag progress of the front card in `[-1, 1]`.
    pub fn stack_progress(&self) -> f32 {
        self.gesture.progress()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn configuration(&self) -> &StackConfiguration {
        &self.config
    }

    pub fn metrics(&self) -> &StackMetrics {
        &self.metrics
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn card_visual(&self, key: &K) -> Option<CardVisual<K>> {
        self.animator.visual(key)
    }

    /// Visuals for every card, front first.
    pub fn card_visuals(&self) -> SmallVec<[CardVisual<K>; 4]> {
        self.animator.visuals()
    }

    /// Height the host should reserve for the stack.
    pub fn stacked_height(&self) -> f32 {
        self.metrics
            .stacked_height(self.config.alignment, self.items.len())
    }

    pub fn content_anchor(&self) -> ContentAnchor {
        self.config.alignment.content_anchor()
    }
}

/// Keep the first item per key, skipping keys already in `seen`.
fn dedupe<K, T>(
    items: impl IntoIterator<Item = StackItem<K, T>>,
    seen: &mut HashSet<K>,
) -> Vec<StackItem<K, T>>
where
    K: Clone + Eq + Hash,
{
    let mut kept = Vec::new();
    for (position, item) in items.into_iter().enumerate() {
        if seen.insert(item.key.clone()) {
            kept.push(item);
        } else {
            log::warn!("dropping card at position {position}: its key is already in the stack");
        }
    }
    kept
}

#[cfg(test)]
#[path = "tests/card_stack_tests.rs"]
mod tests;
