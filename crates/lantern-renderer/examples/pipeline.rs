//! Simulated release pipeline rendered with lantern.
//!
//! Usage: `cargo run --example pipeline [options.toml]`
//!
//! Logs go to `lantern-demo.log` so they never interleave with the frame.

use anyhow::{Context as _, Result};
use lantern_core::{Task, TaskNode as _, TaskRenderOptions, TaskState};
use lantern_renderer::{FrameDriver, RendererOptions};
use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const LOG_FILE: &str = "lantern-demo.log";

struct Pipeline {
    checkout: Task,
    download: Task,
    build: Task,
    compile: Task,
    bundle: Task,
    lint: Task,
    confirm: Task,
    test: Task,
    deploy: Task,
    notify: Task,
    report: Task,
}

impl Pipeline {
    fn new() -> Self {
        let compile = Task::titled("Compile");
        let bundle = Task::titled("Bundle assets");
        Self {
            checkout: Task::titled("Checkout"),
            download: Task::titled("Download toolchain")
                .with_options(TaskRenderOptions::bottom_bar(3)),
            build: Task::titled("Build").with_subtasks([compile.clone(), bundle.clone()]),
            compile,
            bundle,
            lint: Task::titled("Lint"),
            confirm: Task::titled("Confirm release").with_prompt(),
            test: Task::titled("Test"),
            deploy: Task::titled("Deploy"),
            notify: Task::titled("Notify").with_exit_on_error(false),
            report: Task::untitled().with_options(TaskRenderOptions::persistent()),
        }
    }

    fn roots(&self) -> Vec<Task> {
        vec![
            self.checkout.clone(),
            self.download.clone(),
            self.build.clone(),
            self.lint.clone(),
            self.confirm.clone(),
            self.test.clone(),
            self.deploy.clone(),
            self.notify.clone(),
            self.report.clone(),
        ]
    }
}

async fn step(task: &Task, millis: u64, state: TaskState) {
    task.set_state(TaskState::Pending);
    sleep(Duration::from_millis(millis)).await;
    task.set_state(state);
    info!(task = %task_title(task), ?state, "Step finished");
}

fn task_title(task: &Task) -> String {
    task.title().unwrap_or_default()
}

async fn run(pipeline: &Pipeline) {
    step(&pipeline.checkout, 400, TaskState::Completed).await;

    pipeline.download.set_state(TaskState::Pending);
    for percent in (0..=100).step_by(20) {
        pipeline.download.set_output(format!("toolchain.tar.gz {percent}%"));
        sleep(Duration::from_millis(250)).await;
    }
    pipeline.download.set_state(TaskState::Completed);

    pipeline.build.set_state(TaskState::Pending);
    pipeline.compile.set_state(TaskState::Pending);
    for unit in ["core", "renderer", "cli"] {
        pipeline.compile.append_output(&format!("compiling {unit}"));
        sleep(Duration::from_millis(300)).await;
    }
    pipeline.compile.set_state(TaskState::Completed);
    step(&pipeline.bundle, 500, TaskState::Completed).await;
    pipeline.build.set_state(TaskState::Completed);

    pipeline.lint.set_output("no files changed since last run");
    pipeline.lint.set_state(TaskState::Skipped);

    pipeline.confirm.set_state(TaskState::Pending);
    pipeline.confirm.set_output("Publish version 0.1.0? (Y/n)");
    sleep(Duration::from_millis(1200)).await;
    pipeline.confirm.clear_output();
    pipeline.confirm.set_state(TaskState::Completed);

    pipeline.report.set_state(TaskState::Pending);
    pipeline.report.set_output("report written to target/report.html");
    pipeline.test.set_state(TaskState::Pending);
    pipeline.test.set_output("running 42 tests");
    pipeline.notify.set_state(TaskState::Pending);
    sleep(Duration::from_millis(800)).await;
    pipeline.test.set_output("1 test failed: renders_bottom_bar");
    pipeline.test.set_state(TaskState::Failed);
    pipeline.report.set_state(TaskState::Completed);
    sleep(Duration::from_millis(600)).await;
    pipeline.notify.set_state(TaskState::Completed);
    sleep(Duration::from_millis(300)).await;
}

fn init_logging() -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("Failed to open {LOG_FILE}"))?;

    Registry::default()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lantern_renderer=debug,pipeline=info".into()),
        )
        .with(
            fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .init();
    Ok(())
}

fn load_options() -> Result<RendererOptions> {
    env::args().nth(1).map_or_else(
        || Ok(RendererOptions::default()),
        |path| {
            RendererOptions::load(Path::new(&path))
                .with_context(|| format!("Failed to load renderer options from {path}"))
        },
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let options = load_options()?;
    info!(?options, "Starting pipeline demo");

    let pipeline = Pipeline::new();
    let mut driver = FrameDriver::for_stdout(pipeline.roots(), &options)?;
    driver.render()?;
    run(&pipeline).await;
    driver.end().await?;

    info!("Pipeline demo finished");
    Ok(())
}
