use std::thread;
use std::time::Duration;
use swipedeck_foundation::{PointerEvent, UptimeClock};
use swipedeck_stack::{
    CardAlignment, CardStack, ConfigError, DragAxis, StackConfiguration, StackItem,
};
use swipedeck_ui_graphics::{Offset, Point, Size};

const FRAME: Duration = Duration::from_millis(16);
const POINTER_STEP: Duration = Duration::from_millis(10);
const VIEWPORT: Size = Size::new(412.0, 915.0);

#[derive(Debug, Clone)]
struct Profile {
    name: &'static str,
    age: u8,
}

/// A scripted gesture: drag by `by` over `duration_ms`, then hold still for
/// `hold_ms` before lifting.
struct Gesture {
    label: &'static str,
    by: Offset,
    duration_ms: u64,
    hold_ms: u64,
}

const SCRIPT: &[Gesture] = &[
    Gesture {
        label: "quick flick left",
        by: Offset::new(-220.0, 0.0),
        duration_ms: 120,
        hold_ms: 0,
    },
    Gesture {
        label: "small nudge right",
        by: Offset::new(30.0, 4.0),
        duration_ms: 300,
        hold_ms: 120,
    },
    Gesture {
        label: "slow drag right past the edge",
        by: Offset::new(160.0, 10.0),
        duration_ms: 900,
        hold_ms: 120,
    },
    Gesture {
        label: "throw upward",
        by: Offset::new(10.0, -300.0),
        duration_ms: 150,
        hold_ms: 0,
    },
];

struct Driver {
    stack: CardStack<u32, Profile>,
    clock: UptimeClock,
}

impl Driver {
    fn play(&mut self, gesture: &Gesture) {
        let start = Point::new(VIEWPORT.width / 2.0, VIEWPORT.height / 2.0);
        self.stack
            .on_pointer_event(&PointerEvent::down(start, self.clock.uptime_millis()));

        let steps = (gesture.duration_ms / POINTER_STEP.as_millis() as u64).max(1);
        let mut position = start;
        for step in 1..=steps {
            thread::sleep(POINTER_STEP);
            position = start + gesture.by * (step as f32 / steps as f32);
            self.stack
                .on_pointer_event(&PointerEvent::moved(position, self.clock.uptime_millis()));
            self.stack.advance(self.clock.uptime_nanos());
        }

        thread::sleep(Duration::from_millis(gesture.hold_ms));
        self.stack
            .on_pointer_event(&PointerEvent::up(position, self.clock.uptime_millis()));
        if let Some(decision) = self.stack.gesture().last_decision() {
            println!("  {:<32} -> {decision:?}", gesture.label);
        }
        self.run_until_idle();
    }

    fn run_until_idle(&mut self) {
        while self.stack.advance(self.clock.uptime_nanos()) {
            thread::sleep(FRAME);
        }
    }

    fn print_stack(&self) {
        for visual in self.stack.card_visuals() {
            let name = self
                .stack
                .items()
                .get(visual.index)
                .map_or("?", |item| item.payload.name);
            println!(
                "    #{} {:<6} z={} scale={:.3} offset=({:.1}, {:.1}) elevation={:.1}",
                visual.index,
                name,
                visual.z_index,
                visual.scale,
                visual.translation.x,
                visual.translation.y,
                visual.elevation
            );
        }
    }
}

fn build_stack() -> Result<CardStack<u32, Profile>, ConfigError> {
    let config = StackConfiguration::new(520.0)
        .with_alignment(CardAlignment::Bottom)
        .with_drag_axis(DragAxis::Unconstrained);
    let mut stack = CardStack::new(config, VIEWPORT)?
        .with_on_commit_left(|item: StackItem<u32, Profile>| {
            println!("  passed on {} ({})", item.payload.name, item.payload.age);
        })
        .with_on_commit_right(|item: StackItem<u32, Profile>| {
            println!("  liked {} ({})", item.payload.name, item.payload.age);
        })
        .with_on_exhausted(|| println!("  no more profiles"));

    let profiles = [("Ada", 36), ("Grace", 45), ("Linus", 28), ("Barbara", 52)];
    stack.set_items(
        profiles
            .iter()
            .zip(1u32..)
            .map(|(&(name, age), id)| StackItem::new(id, Profile { name, age })),
    );
    Ok(stack)
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== swipedeck demo ===");
    let stack = match build_stack() {
        Ok(stack) => stack,
        Err(err) => {
            log::error!("invalid stack configuration: {err}");
            return;
        }
    };
    let mut driver = Driver {
        stack,
        clock: UptimeClock::new(),
    };

    println!("stack height {:.1}px", driver.stack.stacked_height());
    driver.print_stack();
    for gesture in SCRIPT {
        driver.play(gesture);
        driver.print_stack();
    }
    log::info!("{} cards left", driver.stack.len());
}
