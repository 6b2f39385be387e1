use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use motus_engine::animate::TickAnimator;
use motus_engine::gesture::{sample_timeline, Gesture, Stroke};
use motus_engine::logging::{init_logging, LoggingConfig};
use motus_engine::sched::{ClockPulse, FrameScheduler, SharedCallback};
use motus_path::{Path, Vec2};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  motus demo  ·  frame scheduling + gesture sampling");
    println!();

    run_scheduler_demo();
    run_gesture_demo().context("failed to build demo gesture")?;

    Ok(())
}

/// Drives a scheduler off the real-time clock pulse for a few frames.
fn run_scheduler_demo() {
    let mut sched = FrameScheduler::new(ClockPulse::with_interval(16));

    let ticker = TickAnimator::new(|update| {
        println!(
            "  frame  total {:>4}ms  delta {:>3}ms",
            update.total_ms, update.delta_ms
        );
    })
    .run_for(100);
    let handle: SharedCallback = Rc::new(RefCell::new(ticker));

    sched.register(handle, 0);
    log::info!("scheduler running, {} animation(s)", sched.active_count());

    // Minimal host loop: sleep one interval, deliver the pulse, then the
    // commit pass if one was requested.
    while sched.source_mut().take_pulse_request() {
        thread::sleep(Duration::from_millis(sched.pulse_interval()));
        sched.on_pulse();
        if sched.source_mut().take_commit_request() {
            sched.run_commits();
        }
    }

    log::info!("scheduler idle");
    println!();
}

/// Samples a two-stroke gesture (a swipe plus a tap) into a touch timeline.
fn run_gesture_demo() -> Result<()> {
    let swipe = Stroke::new(
        Path::line(Vec2::new(20.0, 400.0), Vec2::new(20.0, 80.0)),
        0,
        240,
    )?;
    let tap = Stroke::new(Path::point(Vec2::new(300.0, 300.0)), 80, 60)?;

    let mut builder = Gesture::builder();
    builder.add_stroke(swipe)?;
    builder.add_stroke(tap)?;
    let gesture = builder.build()?;

    let frames = sample_timeline(&gesture, 40);
    log::info!(
        "sampled {} strokes into {} frames",
        gesture.stroke_count(),
        frames.len()
    );

    for frame in &frames {
        print!("  t={:>4}ms ", frame.time_ms);
        for point in &frame.points {
            let marker = match (point.is_start, point.is_end) {
                (true, _) => "down",
                (_, true) => "up  ",
                _ => "move",
            };
            print!(
                " [{} ({:>5.1}, {:>5.1})]",
                marker, point.position.x, point.position.y
            );
        }
        println!();
    }
    println!();

    Ok(())
}
