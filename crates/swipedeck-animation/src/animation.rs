//! Animation system for swipedeck
//!
//! Provides time-based tweens with easing curves and spring physics. Unlike a
//! composition-driven animatable, every value here is stepped explicitly by
//! [`Animatable::on_frame`] with the host's frame timestamp.

use swipedeck_ui_graphics::Offset;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Offset {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Offset::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// Two-component vector used to run physics on any animatable type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationVector2D {
    pub v1: f32,
    pub v2: f32,
}

impl AnimationVector2D {
    pub const ZERO: AnimationVector2D = AnimationVector2D { v1: 0.0, v2: 0.0 };

    pub const fn new(v1: f32, v2: f32) -> Self {
        Self { v1, v2 }
    }

    fn is_zero(&self) -> bool {
        self.v1 == 0.0 && self.v2 == 0.0
    }
}

/// Converts a value to and from the vector space the physics runs in.
pub trait TwoWayConverter: Lerp + Copy + PartialEq {
    fn to_vector(&self) -> AnimationVector2D;
    fn from_vector(vector: AnimationVector2D) -> Self;
}

impl TwoWayConverter for f32 {
    fn to_vector(&self) -> AnimationVector2D {
        AnimationVector2D::new(*self, 0.0)
    }

    fn from_vector(vector: AnimationVector2D) -> Self {
        vector.v1
    }
}

impl TwoWayConverter for Offset {
    fn to_vector(&self) -> AnimationVector2D {
        AnimationVector2D::new(self.x, self.y)
    }

    fn from_vector(vector: AnimationVector2D) -> Self {
        Offset::new(vector.v1, vector.v2)
    }
}

/// Easing curves for tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    /// Material deceleration curve.
    LinearOutSlowInEasing,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let curve = match self {
            Easing::LinearEasing => return fraction,
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowInEasing => CubicBezier::new(0.4, 0.0, 0.2, 1.0),
            Easing::LinearOutSlowInEasing => CubicBezier::new(0.0, 0.0, 0.2, 1.0),
        };
        curve.transform(fraction)
    }
}

/// A CSS-style cubic bezier through `(0, 0)` and `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CubicBezier {
    /// Polynomial coefficients `(a, b, c)` for x and y.
    x: (f32, f32, f32),
    y: (f32, f32, f32),
}

impl CubicBezier {
    const EPSILON: f32 = 1e-6;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        fn coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
            let c = 3.0 * p1;
            let b = 3.0 * (p2 - p1) - c;
            (1.0 - c - b, b, c)
        }
        Self {
            x: coefficients(x1, x2),
            y: coefficients(y1, y2),
        }
    }

    fn sample((a, b, c): (f32, f32, f32), t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn slope((a, b, c): (f32, f32, f32), t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    /// Solve for the curve parameter whose x equals `x`: Newton first,
    /// bisection when Newton stalls on a flat slope.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let error = Self::sample(self.x, t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = Self::slope(self.x, t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..16 {
            let error = Self::sample(self.x, t) - x;
            if error.abs() < Self::EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
        t
    }

    fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            0.0
        } else if fraction >= 1.0 {
            1.0
        } else {
            Self::sample(self.y, self.solve_t(fraction))
        }
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop animation.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_LOW: f32 = 200.0;

    /// Create a spring with the given damping ratio and stiffness and the
    /// default settle thresholds.
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default_spring()
        }
    }

    /// Critically damped, medium stiffness.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: Self::DAMPING_RATIO_NO_BOUNCY,
            stiffness: Self::STIFFNESS_MEDIUM,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Override the thresholds used to decide the spring has come to rest.
    ///
    /// Pixel-valued animations want coarser thresholds than unit fractions.
    pub fn with_thresholds(mut self, position_threshold: f32, velocity_threshold: f32) -> Self {
        self.position_threshold = position_threshold;
        self.velocity_threshold = velocity_threshold;
        self
    }

    /// Advance a damped harmonic oscillator by `dt` seconds.
    ///
    /// `displacement` is measured from the rest position. Returns the new
    /// displacement and velocity. Uses the closed-form solution for each
    /// damping regime, so the result does not depend on frame pacing.
    pub fn step(&self, displacement: f32, velocity: f32, dt: f32) -> (f32, f32) {
        let omega = (self.stiffness.max(0.0) as f64).sqrt();
        let zeta = self.damping_ratio.max(0.0) as f64;
        let x0 = displacement as f64;
        let v0 = velocity as f64;
        let t = dt.max(0.0) as f64;

        if omega == 0.0 {
            return (displacement + velocity * dt, velocity);
        }

        let (x, v) = if zeta > 1.0 {
            let root = (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + omega * root;
            let gamma_minus = -zeta * omega - omega * root;
            let coeff_b = (gamma_minus * x0 - v0) / (gamma_minus - gamma_plus);
            let coeff_a = x0 - coeff_b;
            let e_minus = (gamma_minus * t).exp();
            let e_plus = (gamma_plus * t).exp();
            (
                coeff_a * e_minus + coeff_b * e_plus,
                coeff_a * gamma_minus * e_minus + coeff_b * gamma_plus * e_plus,
            )
        } else if zeta == 1.0 {
            let coeff_a = x0;
            let coeff_b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let n = coeff_a + coeff_b * t;
            (n * decay, decay * (coeff_b - omega * n))
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let cos_coeff = x0;
            let sin_coeff = (zeta * omega * x0 + v0) / damped;
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            let x = decay * (cos_coeff * cos + sin_coeff * sin);
            let v = x * (-zeta * omega) + decay * damped * (sin_coeff * cos - cos_coeff * sin);
            (x, v)
        };

        (x as f32, v as f32)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Generic animatable value holder, stepped by frame timestamps.
#[derive(Debug, Clone)]
pub struct Animatable<T: TwoWayConverter> {
    current: T,
    velocity: AnimationVector2D,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    running: bool,
}

impl<T: TwoWayConverter> Animatable<T> {
    /// Create a new animatable resting at the given value.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            velocity: AnimationVector2D::ZERO,
            start: initial,
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            running: false,
        }
    }

    /// Animate to the target value using the specified animation.
    ///
    /// A spring that is retargeted keeps its current velocity and frame
    /// anchor so motion stays continuous; a tween restarts from the current
    /// value.
    pub fn animate_to(&mut self, target: T, animation: AnimationType) {
        self.start = self.current;
        self.target = target;
        self.animation_type = animation;
        self.start_time_nanos = None;
        if matches!(animation, AnimationType::Tween(_)) {
            self.velocity = AnimationVector2D::ZERO;
            self.last_frame_nanos = None;
        }
        self.running = self.current != target || !self.velocity.is_zero();
    }

    /// Retarget only when the target or the animation changed.
    ///
    /// Returns true if a new animation was started.
    pub fn update_target(&mut self, target: T, animation: AnimationType) -> bool {
        if self.target == target && self.animation_type == animation {
            return false;
        }
        self.animate_to(target, animation);
        true
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&mut self, target: T) {
        self.current = target;
        self.start = target;
        self.target = target;
        self.velocity = AnimationVector2D::ZERO;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.running = false;
    }

    pub fn value(&self) -> T {
        self.current
    }

    /// Return the current animation target.
    pub fn target(&self) -> T {
        self.target
    }

    pub fn velocity(&self) -> T {
        T::from_vector(self.velocity)
    }

    /// Return the animation spec currently driving this animatable.
    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the animation to `frame_time_nanos`.
    ///
    /// The first frame after [`animate_to`](Self::animate_to) only anchors the
    /// start time. Returns true while further frames are needed.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> bool {
        if !self.running {
            return false;
        }

        match self.animation_type {
            AnimationType::Tween(spec) => self.step_tween(spec, frame_time_nanos),
            AnimationType::Spring(spec) => self.step_spring(spec, frame_time_nanos),
        }

        self.running
    }

    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let delay_nanos = spec.delay_millis * 1_000_000;

        if elapsed_nanos < delay_nanos {
            return;
        }

        let animation_elapsed = elapsed_nanos - delay_nanos;
        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
        let linear_progress = (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        let progress = spec.easing.transform(linear_progress);

        self.current = self.start.lerp(&self.target, progress);

        if linear_progress >= 1.0 {
            self.finish();
        }
    }

    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) {
        let Some(last_frame) = self.last_frame_nanos.replace(frame_time_nanos) else {
            return;
        };
        let dt = frame_time_nanos.saturating_sub(last_frame) as f32 / 1_000_000_000.0;
        if dt == 0.0 {
            return;
        }

        let current = self.current.to_vector();
        let target = self.target.to_vector();
        let (d1, v1) = spec.step(current.v1 - target.v1, self.velocity.v1, dt);
        let (d2, v2) = spec.step(current.v2 - target.v2, self.velocity.v2, dt);

        self.current = T::from_vector(AnimationVector2D::new(target.v1 + d1, target.v2 + d2));
        self.velocity = AnimationVector2D::new(v1, v2);

        let near_target = d1.abs() < spec.position_threshold && d2.abs() < spec.position_threshold;
        let at_rest = v1.abs() < spec.velocity_threshold && v2.abs() < spec.velocity_threshold;
        if near_target && at_rest {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.current = self.target;
        self.start = self.target;
        self.velocity = AnimationVector2D::ZERO;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.running = false;
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
