use crate::{DisplaySink, LaneError, LanePipeline};
use lane_image::{CameraFrame, PixelGrid};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

type Slot = Option<Arc<PixelGrid>>;

/// Runs a [`LanePipeline`] on the tokio blocking pool, one frame at a time.
///
/// Frames go through a watch channel: submitting while a frame is in flight
/// replaces whatever was still pending, so the worker always picks up the
/// newest frame and never builds a backlog.
pub struct LaneWorker<S> {
    frames: watch::Sender<Slot>,
    task: JoinHandle<Result<(LanePipeline, S), LaneError>>,
}

impl<S> LaneWorker<S>
where
    S: DisplaySink + Send + 'static,
{
    /// Must be called from within a tokio runtime.
    pub fn spawn(pipeline: LanePipeline, sink: S) -> Self {
        let (frames, rx) = watch::channel::<Slot>(None);
        let task = tokio::spawn(run(pipeline, sink, rx));
        Self { frames, task }
    }

    /// Hands the newest frame to the worker. Never blocks.
    pub fn submit(&self, frame: PixelGrid) {
        self.frames.send_replace(Some(Arc::new(frame)));
    }

    /// Rotates a camera frame upright and submits it.
    pub fn submit_camera(&self, frame: &CameraFrame) -> Result<(), LaneError> {
        self.submit(frame.upright()?);
        Ok(())
    }

    /// Stops accepting frames and waits for the worker.
    ///
    /// A frame submitted but not yet picked up is still processed.
    pub async fn shutdown(self) -> Result<(LanePipeline, S), LaneError> {
        let Self { frames, task } = self;
        drop(frames);
        task.await
            .map_err(|e| LaneError::Worker(format!("lane worker failed: {e}")))?
    }
}

async fn run<S>(
    mut pipeline: LanePipeline,
    mut sink: S,
    mut rx: watch::Receiver<Slot>,
) -> Result<(LanePipeline, S), LaneError>
where
    S: DisplaySink + Send + 'static,
{
    log::debug!("lane worker started");
    while rx.changed().await.is_ok() {
        let latest = rx.borrow_and_update().clone();
        let Some(frame) = latest else {
            continue;
        };
        (pipeline, sink) = tokio::task::spawn_blocking(move || {
            pipeline.process_frame(&frame, &mut sink);
            (pipeline, sink)
        })
        .await
        .map_err(|e| LaneError::Worker(format!("lane frame task failed: {e}")))?;
    }
    log::debug!("lane worker stopped");
    Ok((pipeline, sink))
}
