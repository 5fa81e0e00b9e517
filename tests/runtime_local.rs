// ABOUTME: Integration tests against a local Docker/Podman daemon.
// ABOUTME: Skipped when no runtime socket is found on this machine.

mod support;

use berth::config::{DesiredContainer, ReconcilerSettings, UploadSpec};
use berth::reconcile::{ContainerRecord, ReadOutcome, ReconcileError, Reconciler};
use berth::runtime::{
    BollardRuntime, ContainerError, ContainerOps, ImageOps, RemoveOptions, detect_local,
};
use berth::types::{ContainerId, ContainerName};
use std::time::Duration;

const IMAGE: &str = "alpine:latest";

/// Get local runtime, skipping test if unavailable.
fn local_runtime() -> Option<BollardRuntime> {
    let info = detect_local(None).ok()?;
    BollardRuntime::connect(&info).ok()
}

/// Skip test if no local runtime available.
macro_rules! require_runtime {
    () => {
        match local_runtime() {
            Some(rt) => rt,
            None => {
                eprintln!("Skipping test: no local container runtime found");
                return;
            }
        }
    };
}

fn test_container(suffix: &str, command: &[&str]) -> DesiredContainer {
    let name = format!("berth-test-{}-{}", std::process::id(), suffix);
    let mut desired = DesiredContainer::new(ContainerName::new(&name).unwrap(), IMAGE);
    desired.command = Some(command.iter().map(|s| s.to_string()).collect());
    desired
        .labels
        .insert("berth.test".to_string(), "true".to_string());
    desired
}

fn settings() -> ReconcilerSettings {
    ReconcilerSettings {
        poll_attempts: 20,
        poll_interval: Duration::from_millis(250),
        ..Default::default()
    }
}

// =============================================================================
// Gateway Tests
// =============================================================================

#[tokio::test]
async fn runtime_ping() {
    let runtime = require_runtime!();
    runtime.ping().await.expect("ping should succeed");
}

#[tokio::test]
async fn image_exists_false_for_nonexistent() {
    let runtime = require_runtime!();

    let exists = runtime
        .image_exists("this-image-definitely-does-not-exist-12345:v999")
        .await
        .expect("image_exists should succeed");
    assert!(!exists, "non-existent image should return false");
}

#[tokio::test]
async fn inspect_unknown_container_is_not_found() {
    let runtime = require_runtime!();

    let result = runtime
        .inspect_container(&ContainerId::new("berth-no-such-container"))
        .await;
    assert!(matches!(result, Err(ContainerError::NotFound(_))));
}

#[tokio::test]
async fn remove_unknown_container_is_not_found() {
    let runtime = require_runtime!();

    let result = runtime
        .remove_container(
            &ContainerId::new("berth-no-such-container"),
            &RemoveOptions {
                force: true,
                remove_volumes: true,
            },
        )
        .await;
    assert!(matches!(result, Err(ContainerError::NotFound(_))));
}

// =============================================================================
// Reconcile Tests
// =============================================================================

#[tokio::test]
async fn create_read_delete_long_running_container() {
    support::init_tracing();
    let runtime = require_runtime!();
    let reconciler = Reconciler::with_settings(runtime, settings());

    let mut desired = test_container("sleeper", &["sleep", "300"]);
    desired.lifecycle.destroy_grace_period = Some(Duration::from_secs(1));
    let mut record = ContainerRecord::new(desired);

    reconciler
        .create(&mut record)
        .await
        .expect("create should succeed");
    assert!(record.id.is_some());

    let outcome = reconciler.read(&mut record).await.expect("read should succeed");
    assert_eq!(outcome, ReadOutcome::Present);
    assert_eq!(record.observed.as_ref().unwrap().exit_code, None);

    reconciler
        .delete(&mut record)
        .await
        .expect("delete should succeed");
    assert!(record.id.is_none());
}

#[tokio::test]
async fn attach_captures_uploaded_script_output() {
    support::init_tracing();
    let runtime = require_runtime!();
    let reconciler = Reconciler::with_settings(runtime, settings());

    let mut desired = test_container("oneshot", &["/usr/local/bin/greet"]);
    desired.lifecycle.attach = true;
    desired.lifecycle.logs = true;
    desired.lifecycle.must_run = false;
    desired.uploads.push(UploadSpec {
        content: "#!/bin/sh\necho hello from berth\n".to_string(),
        file: "/usr/local/bin/greet".to_string(),
        executable: true,
    });
    let mut record = ContainerRecord::new(desired);

    let result = reconciler.create(&mut record).await;
    let observed = record.observed.clone();
    reconciler.delete(&mut record).await.expect("delete should succeed");

    result.expect("create should succeed");
    let observed = observed.unwrap();
    assert_eq!(observed.exit_code, Some(0));
    // Capture is best-effort; when anything arrived it must be our line.
    if let Some(logs) = observed.container_logs.filter(|l| !l.is_empty()) {
        assert!(logs.contains("hello from berth"), "unexpected logs: {logs}");
    }
}

#[tokio::test]
async fn immediate_exit_is_cleaned_up() {
    support::init_tracing();
    let runtime = require_runtime!();
    let reconciler = Reconciler::with_settings(runtime, settings());

    let mut record = ContainerRecord::new(test_container("crasher", &["false"]));

    let err = reconciler
        .create(&mut record)
        .await
        .expect_err("a container that exits must fail create");
    assert!(
        matches!(
            err,
            ReconcileError::ExitedAfterCreation { .. } | ReconcileError::NotRunning { .. }
        ),
        "unexpected error: {err}"
    );
    assert!(record.id.is_none(), "failed container should be removed");
}
