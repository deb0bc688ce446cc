//! Concurrent pipeline runs sharing one executor

mod helpers;

use helpers::{CountingWork, FailingWork, SlowWork, SucceedingWork};
use jobline::{AggregateStatus, Executor, Job, JobStatus, Pipeline, Registry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

fn pipeline_with_jobs(name: &str, job_names: &[&str]) -> Pipeline {
    let mut pipeline = Pipeline::new(name);
    for job_name in job_names {
        pipeline
            .add_job(Job::new(*job_name, SucceedingWork).unwrap())
            .unwrap();
    }
    pipeline
}

#[tokio::test]
async fn concurrent_runs_merge_results_without_lost_updates() {
    let executor = Arc::new(Executor::new());

    let exec_a = executor.clone();
    let task_a = tokio::spawn(async move {
        let mut pipeline = pipeline_with_jobs("alpha", &["a1", "a2", "a3"]);
        exec_a.run(&mut pipeline).await
    });

    let exec_b = executor.clone();
    let task_b = tokio::spawn(async move {
        let mut pipeline = pipeline_with_jobs("beta", &["b1", "b2", "b3"]);
        exec_b.run(&mut pipeline).await
    });

    let (status_a, status_b) = (task_a.await.unwrap(), task_b.await.unwrap());
    assert_eq!(status_a, AggregateStatus::Completed);
    assert_eq!(status_b, AggregateStatus::Completed);

    // The shared results map holds the union of both runs
    let results = executor.results().await;
    assert_eq!(results.len(), 6);
    for name in ["a1", "a2", "a3", "b1", "b2", "b3"] {
        assert_eq!(results.get(name), Some(&JobStatus::Completed));
    }
}

#[tokio::test]
async fn results_accumulate_across_sequential_runs() {
    let executor = Executor::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut first = Pipeline::new("first");
    first
        .add_job(Job::new("shared", CountingWork::succeeding(calls.clone())).unwrap())
        .unwrap();
    first
        .add_job(Job::new("only-first", CountingWork::succeeding(calls.clone())).unwrap())
        .unwrap();
    executor.run(&mut first).await;

    let mut second = Pipeline::new("second");
    second
        .add_job(Job::new("shared", FailingWork("second time around")).unwrap())
        .unwrap();
    executor.run(&mut second).await;

    // Last write wins on the colliding name; the rest is untouched
    let results = executor.results().await;
    assert_eq!(results.get("shared"), Some(&JobStatus::Failed));
    assert_eq!(results.get("only-first"), Some(&JobStatus::Completed));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn registry_run_does_not_block_other_pipelines() {
    let registry = Arc::new(Registry::new(Arc::new(Executor::new())));

    registry.create_pipeline("slow").await.unwrap();
    registry
        .add_job(
            "slow",
            Job::new("sleepy", SlowWork(Duration::from_millis(500))).unwrap(),
        )
        .await
        .unwrap();
    registry.create_pipeline("other").await.unwrap();
    registry
        .add_job("other", Job::no_op("o1").unwrap())
        .await
        .unwrap();

    let background = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.run("slow").await.unwrap() })
    };
    // Let the slow run take its pipeline lock
    tokio::time::sleep(Duration::from_millis(50)).await;

    // A status lookup for a job in a different pipeline answers while the
    // slow run is still in flight
    let report = timeout(Duration::from_millis(100), registry.job_status("o1"))
        .await
        .expect("status lookup blocked behind an unrelated run")
        .unwrap();
    assert_eq!(report.status, JobStatus::Pending);

    // A second pipeline starts and finishes while the first is running
    let status = timeout(Duration::from_millis(100), registry.run("other"))
        .await
        .expect("run blocked behind an unrelated run")
        .unwrap();
    assert_eq!(status, AggregateStatus::Completed);

    assert_eq!(background.await.unwrap(), AggregateStatus::Completed);
}
