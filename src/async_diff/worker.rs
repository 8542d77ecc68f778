use tokio::sync::mpsc;

use crate::source::load_file_data;

use super::channel::{DiffRequest, DiffResult};

/// Loads file pairs off the UI thread.
///
/// Results come back in completion order; the caller compares generations
/// to drop answers to requests it has since superseded.
pub struct DiffWorker {
    request_tx: mpsc::UnboundedSender<DiffRequest>,
    result_rx: mpsc::UnboundedReceiver<DiffResult>,
}

impl DiffWorker {
    pub fn new() -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<DiffRequest>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<DiffResult>();

        tokio::spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let tx = result_tx.clone();

                tokio::task::spawn_blocking(move || {
                    let data = load_file_data(&request.source, &request.options).map_err(|e| {
                        tracing::warn!(generation = request.generation, error = %e, "diff load failed");
                        e.to_string()
                    });
                    let _ = tx.send(DiffResult {
                        generation: request.generation,
                        pair: request.pair,
                        data,
                    });
                });
            }
        });

        Self {
            request_tx,
            result_rx,
        }
    }

    pub fn request(&self, req: DiffRequest) {
        tracing::debug!(generation = req.generation, pair = req.pair, "diff requested");
        let _ = self.request_tx.send(req);
    }

    pub fn try_recv(&mut self) -> Option<DiffResult> {
        self.result_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DiffOptions, FileSource};
    use std::time::Duration;

    #[tokio::test]
    async fn test_worker_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "x\ny\n").unwrap();

        let mut worker = DiffWorker::new();
        worker.request(DiffRequest {
            generation: 7,
            pair: 0,
            source: FileSource::Paths {
                before: path.clone(),
                after: path,
            },
            options: DiffOptions::default(),
        });

        let result = loop {
            if let Some(result) = worker.try_recv() {
                break result;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        };
        assert_eq!(result.generation, 7);
        assert_eq!(result.data.unwrap().content_a.as_deref(), Some("x\ny\n"));
    }
}
