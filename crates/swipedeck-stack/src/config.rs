//! Stack configuration and the pixel metrics derived from it.

use std::fmt;
use swipedeck_ui_graphics::{Offset, Size};

/// Fraction of the spacing ratio that turns into visible card spacing.
const SPACING_SCALE: f32 = 0.15;

/// Velocity threshold as a fraction of the smaller viewport dimension.
const VELOCITY_THRESHOLD_FRACTION: f32 = 0.3;

/// Where the stack is anchored; trailing cards fan out away from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardAlignment {
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Top,
    TopStart,
    TopEnd,
    Start,
    End,
}

impl CardAlignment {
    pub const ALL: [CardAlignment; 8] = [
        CardAlignment::Bottom,
        CardAlignment::BottomStart,
        CardAlignment::BottomEnd,
        CardAlignment::Top,
        CardAlignment::TopStart,
        CardAlignment::TopEnd,
        CardAlignment::Start,
        CardAlignment::End,
    ];

    pub fn is_bottom_anchored(&self) -> bool {
        matches!(
            self,
            CardAlignment::Bottom | CardAlignment::BottomStart | CardAlignment::BottomEnd
        )
    }

    pub fn is_top_anchored(&self) -> bool {
        matches!(
            self,
            CardAlignment::Top | CardAlignment::TopStart | CardAlignment::TopEnd
        )
    }

    /// Unit direction in which trailing cards fan out.
    pub fn fan_out_direction(&self) -> Offset {
        match self {
            CardAlignment::Top => Offset::new(0.0, 1.0),
            CardAlignment::TopStart => Offset::new(-1.0, 1.0),
            CardAlignment::TopEnd => Offset::new(1.0, 1.0),
            CardAlignment::Bottom => Offset::new(0.0, -1.0),
            CardAlignment::BottomStart => Offset::new(-1.0, -1.0),
            CardAlignment::BottomEnd => Offset::new(1.0, -1.0),
            CardAlignment::Start => Offset::new(-1.0, 0.0),
            CardAlignment::End => Offset::new(1.0, 0.0),
        }
    }

    /// Where the host should place the stack inside its container.
    pub fn content_anchor(&self) -> ContentAnchor {
        match self {
            CardAlignment::Bottom => ContentAnchor::BottomCenter,
            CardAlignment::BottomStart => ContentAnchor::BottomStart,
            CardAlignment::BottomEnd => ContentAnchor::BottomEnd,
            CardAlignment::Top => ContentAnchor::TopCenter,
            CardAlignment::TopStart => ContentAnchor::TopStart,
            CardAlignment::TopEnd => ContentAnchor::TopEnd,
            CardAlignment::Start | CardAlignment::End => ContentAnchor::Center,
        }
    }
}

/// Placement of the stack within the host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentAnchor {
    TopStart,
    TopCenter,
    TopEnd,
    Center,
    BottomStart,
    BottomCenter,
    BottomEnd,
}

/// Axis the front card may be dragged along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragAxis {
    #[default]
    Horizontal,
    Vertical,
    Unconstrained,
}

impl DragAxis {
    /// Drop the component of `delta` the axis does not permit.
    pub fn constrain(&self, delta: Offset) -> Offset {
        match self {
            DragAxis::Horizontal => Offset::new(delta.x, 0.0),
            DragAxis::Vertical => Offset::new(0.0, delta.y),
            DragAxis::Unconstrained => delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidCardHeight(f32),
    InvalidSpacingRatio(f32),
    InvalidCardPadding(f32),
    InvalidViewport { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCardHeight(height) => {
                write!(f, "card height must be finite and positive, got {height}")
            }
            ConfigError::InvalidSpacingRatio(ratio) => {
                write!(f, "spacing ratio must be within [0, 1], got {ratio}")
            }
            ConfigError::InvalidCardPadding(padding) => {
                write!(f, "card padding must be finite and non-negative, got {padding}")
            }
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "viewport {width}x{height} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Host-supplied stack configuration, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackConfiguration {
    pub card_height: f32,
    /// Fraction of the viewport height used to space trailing cards.
    pub spacing_ratio: f32,
    pub alignment: CardAlignment,
    pub drag_axis: DragAxis,
    /// Horizontal inset on each side of a card.
    pub card_padding: f32,
}

impl Default for StackConfiguration {
    fn default() -> Self {
        Self {
            card_height: 420.0,
            spacing_ratio: 0.1,
            alignment: CardAlignment::default(),
            drag_axis: DragAxis::default(),
            card_padding: 12.0,
        }
    }
}

impl StackConfiguration {
    pub fn new(card_height: f32) -> Self {
        Self {
            card_height,
            ..Self::default()
        }
    }

    pub fn with_spacing_ratio(mut self, spacing_ratio: f32) -> Self {
        self.spacing_ratio = spacing_ratio;
        self
    }

    pub fn with_alignment(mut self, alignment: CardAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_drag_axis(mut self, drag_axis: DragAxis) -> Self {
        self.drag_axis = drag_axis;
        self
    }

    pub fn with_card_padding(mut self, card_padding: f32) -> Self {
        self.card_padding = card_padding;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.card_height.is_finite() || self.card_height <= 0.0 {
            return Err(ConfigError::InvalidCardHeight(self.card_height));
        }
        if !(0.0..=1.0).contains(&self.spacing_ratio) {
            return Err(ConfigError::InvalidSpacingRatio(self.spacing_ratio));
        }
        if !self.card_padding.is_finite() || self.card_padding < 0.0 {
            return Err(ConfigError::InvalidCardPadding(self.card_padding));
        }
        Ok(())
    }
}

/// Pixel quantities derived from a configuration and a viewport.
///
/// Recomputed only when either input changes, never per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackMetrics {
    pub viewport: Size,
    pub card_size: Size,
    pub spacing_px: f32,
    /// Release speed (px/s) that commits a swipe; also the drag distance
    /// that maps to full stack progress.
    pub velocity_threshold_px: f32,
}

impl StackMetrics {
    pub fn resolve(config: &StackConfiguration, viewport: Size) -> Result<Self, ConfigError> {
        config.validate()?;
        let valid_dimension = |value: f32| value.is_finite() && value >= 0.0;
        if !valid_dimension(viewport.width) || !valid_dimension(viewport.height) {
            return Err(ConfigError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let card_width = (viewport.width - 2.0 * config.card_padding).max(0.0);
        Ok(Self {
            viewport,
            card_size: Size::new(card_width, config.card_height),
            spacing_px: viewport.height * config.spacing_ratio * SPACING_SCALE,
            velocity_threshold_px: viewport.min_dimension() * VELOCITY_THRESHOLD_FRACTION,
        })
    }

    /// Height the host should reserve for `count` cards.
    pub fn stacked_height(&self, alignment: CardAlignment, count: usize) -> f32 {
        match alignment {
            CardAlignment::Start | CardAlignment::End => self.card_size.height,
            _ => self.card_size.height + self.spacing_px * count.saturating_sub(1) as f32,
        }
    }
}
