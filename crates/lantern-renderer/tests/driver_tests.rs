//! Start/stop lifecycle of the repaint loop
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

mod common;

use common::*;
use lantern_core::{Task, TaskState};
use lantern_renderer::{Error, RendererOptions};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn test_render_twice_starts_one_loop() {
    let (mut driver, surface) = driver(
        vec![task("Build", TaskState::Pending)],
        &RendererOptions::default(),
    );

    driver.render().expect("render");
    driver.render().expect("second render");
    assert!(driver.is_rendering());

    sleep(Duration::from_millis(350)).await;
    let ticks = surface.draw_count();
    assert_eq!(surface.record().hidden, 1);
    // one loop ticks at 0, 100, 200 and 300 ms
    assert!((3..=5).contains(&ticks), "unexpected tick count {ticks}");

    driver.end().await.expect("end");
}

#[tokio::test(start_paused = true)]
async fn test_end_twice_flushes_once() {
    let (mut driver, surface) = driver(
        vec![task("Build", TaskState::Completed)],
        &RendererOptions::default(),
    );
    driver.render().expect("render");
    sleep(Duration::from_millis(120)).await;

    driver.end().await.expect("end");
    let after_first = surface.record();
    driver.end().await.expect("second end");
    let after_second = surface.record();

    assert_eq!(after_first, after_second);
    assert_eq!(after_second.finalized, 1);
    assert_eq!(after_second.shown, 1);
    assert_eq!(after_second.cleared, 0);
    assert!(!driver.is_rendering());
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_end() {
    let (mut driver, surface) = driver(
        vec![task("Build", TaskState::Pending)],
        &RendererOptions::default(),
    );
    driver.render().expect("render");
    sleep(Duration::from_millis(150)).await;
    driver.end().await.expect("end");

    let drawn = surface.draw_count();
    sleep(Duration::from_millis(500)).await;
    assert_eq!(surface.draw_count(), drawn);
}

#[tokio::test(start_paused = true)]
async fn test_final_frame_omits_prompt() {
    let ask = Task::titled("Confirm").with_prompt();
    ask.set_state(TaskState::Pending);
    ask.set_output("Ship it? (y/N)");
    let (mut driver, surface) = driver(vec![ask], &RendererOptions::default());

    driver.render().expect("render");
    sleep(Duration::from_millis(50)).await;
    let live = surface.last_frame().expect("live frame");
    assert_eq!(live.last().map(String::as_str), Some("Ship it? (y/N)"));

    driver.end().await.expect("end");
    let last = surface.last_frame().expect("final frame");
    assert!(!last.iter().any(|line| line.contains("Ship it?")));
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_end() {
    let (mut driver, surface) = driver(Vec::new(), &RendererOptions::default());

    driver.render().expect("render");
    driver.end().await.expect("end");
    driver.render().expect("restart");
    driver.end().await.expect("end again");

    let record = surface.record();
    assert_eq!(record.hidden, 2);
    assert_eq!(record.shown, 2);
    assert_eq!(record.finalized, 2);
}

#[tokio::test(start_paused = true)]
async fn test_frames_follow_concurrent_updates() {
    let build = task("Build", TaskState::Pending);
    let deploy = task("Deploy", TaskState::Waiting);
    let (mut driver, surface) = driver(
        vec![build.clone(), deploy.clone()],
        &RendererOptions::default(),
    );
    driver.render().expect("render");

    let engine = tokio::spawn(async move {
        sleep(Duration::from_millis(150)).await;
        build.set_state(TaskState::Completed);
        deploy.set_state(TaskState::Pending);
        sleep(Duration::from_millis(150)).await;
        deploy.set_state(TaskState::Completed);
    });
    engine.await.expect("engine");
    driver.end().await.expect("end");

    let record = surface.record();
    assert_eq!(record.frames.first().expect("first frame")[0], "◜ Build");
    assert_eq!(
        record.frames.last().expect("final frame"),
        &lines(&["✔ Build", "✔ Deploy"])
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_output_erases_final_frame() {
    let options = RendererOptions {
        clear_output: true,
        ..RendererOptions::default()
    };
    let (mut driver, surface) = driver(vec![task("Build", TaskState::Completed)], &options);
    driver.render().expect("render");
    driver.end().await.expect("end");

    let record = surface.record();
    assert_eq!(record.cleared, 1);
    assert_eq!(record.finalized, 0);
}

#[test]
fn test_render_requires_runtime() {
    let (mut driver, surface) = driver(Vec::new(), &RendererOptions::default());
    assert!(matches!(driver.render(), Err(Error::NoRuntime)));
    assert_eq!(surface.record().hidden, 0);
}

#[test]
fn test_render_once_without_runtime() {
    let (driver, surface) = driver(
        vec![task("Lint", TaskState::Skipped)],
        &RendererOptions::default(),
    );
    assert_eq!(driver.render_once().expect("render once"), 1);
    assert_eq!(surface.last_frame(), Some(lines(&["↓ Lint [SKIPPED]"])));
}
