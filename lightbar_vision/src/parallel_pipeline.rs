// THEORY:
// Frames carry no state into each other, so independent frames can be analyzed
// concurrently. `ParallelPipeline` owns a small tokio worker pool: a dispatcher
// hands tasks to workers round-robin, every worker runs its own
// `LightBarPipeline`, and each caller awaits its frame's result on a oneshot
// channel. `process_batch` returns results in submission order regardless of
// which worker finished first.

use crate::config::PipelineConfig;
use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::Outline;
use crate::error::{InvalidInputError, PipelineError};
use crate::pipeline::{FrameAnalysis, LightBarPipeline};
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

pub struct FrameTask {
    pub frame_id: u64,
    pub frame: Frame,
    pub outlines: Vec<Outline>,
    pub result_sender: oneshot::Sender<Result<FrameAnalysis, InvalidInputError>>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<FrameTask>,
    dispatcher: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns the dispatcher and `worker_count` workers (at least one) on the
    /// current tokio runtime.
    pub fn new(config: PipelineConfig, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<FrameTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<FrameTask>())
            .unzip();

        // Spawn dispatcher
        let dispatcher = tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                if worker_senders[worker_idx].send(task).is_err() {
                    break;
                }
                worker_idx = (worker_idx + 1) % worker_senders.len();
            }
        });

        // Spawn workers
        let workers = worker_receivers
            .into_iter()
            .enumerate()
            .map(|(worker_id, mut worker_receiver)| {
                let pipeline = LightBarPipeline::new(config.clone());
                tokio::spawn(async move {
                    while let Some(task) = worker_receiver.recv().await {
                        debug!(worker_id, frame_id = task.frame_id, "analyzing frame");
                        let analysis = pipeline.analyze(&task.frame, &task.outlines);
                        let _ = task.result_sender.send(analysis);
                    }
                })
            })
            .collect();

        Self {
            task_sender,
            dispatcher,
            workers,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub async fn process_frame(
        &self,
        frame_id: u64,
        frame: Frame,
        outlines: Vec<Outline>,
    ) -> Result<FrameAnalysis, PipelineError> {
        let (result_sender, result_receiver) = oneshot::channel();

        let task = FrameTask {
            frame_id,
            frame,
            outlines,
            result_sender,
        };

        self.task_sender
            .send(task)
            .map_err(|_| PipelineError::WorkerPoolClosed)?;

        let analysis = result_receiver
            .await
            .map_err(|_| PipelineError::WorkerDropped { frame_id })?;
        Ok(analysis?)
    }

    /// Stops accepting tasks and waits for queued frames to finish.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        let _ = self.dispatcher.await;
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

pub struct ParallelPipeline {
    worker_pool: WorkerPool,
    frame_counter: AtomicU64,
}

impl ParallelPipeline {
    /// One worker per logical CPU.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_workers(config, num_cpus::get())
    }

    pub fn with_workers(config: PipelineConfig, worker_count: usize) -> Self {
        Self {
            worker_pool: WorkerPool::new(config, worker_count),
            frame_counter: AtomicU64::new(0),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_pool.worker_count()
    }

    pub async fn process_frame(
        &self,
        frame: Frame,
        outlines: Vec<Outline>,
    ) -> Result<FrameAnalysis, PipelineError> {
        let frame_id = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        self.worker_pool.process_frame(frame_id, frame, outlines).await
    }

    /// Analyzes a batch of frames concurrently; results follow input order.
    pub async fn process_batch(
        &self,
        frames: Vec<(Frame, Vec<Outline>)>,
    ) -> Vec<Result<FrameAnalysis, PipelineError>> {
        join_all(
            frames
                .into_iter()
                .map(|(frame, outlines)| self.process_frame(frame, outlines)),
        )
        .await
    }

    pub async fn shutdown(self) {
        self.worker_pool.shutdown().await;
    }
}
