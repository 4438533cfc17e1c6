use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::{CheckerError, CheckerOutput, OutputChunk, Stream};

/// Utility for spawning checker processes
pub struct ProcessSpawner;

impl ProcessSpawner {
    /// Spawn a process, wait for it, and capture both streams in the order
    /// their bytes arrived
    pub async fn spawn(
        binary: &Path,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CheckerOutput, CheckerError> {
        let start = Instant::now();

        debug!(
            binary = %binary.display(),
            args = ?args,
            working_dir = %working_dir.display(),
            "Spawning checker process"
        );

        let mut cmd = Command::new(binary);
        cmd.args(args)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null()); // Hooks run without a terminal

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CheckerError::NotFound(binary.display().to_string()),
            _ => CheckerError::SpawnFailed(e),
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CheckerError::OutputFailed("stdout not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| CheckerError::OutputFailed("stderr not captured".to_string()))?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let stdout_task = pump(stdout, Stream::Stdout, tx.clone());
        let stderr_task = pump(stderr, Stream::Stderr, tx);

        let mut output = CheckerOutput::new(Vec::new(), 0, Default::default());
        // Ends once both pumps have dropped their senders
        while let Some(chunk) = rx.recv().await {
            output.push(chunk.stream, &chunk.bytes);
        }
        for task in [stdout_task, stderr_task] {
            task.await
                .map_err(|e| CheckerError::OutputFailed(e.to_string()))?
                .map_err(|e| CheckerError::OutputFailed(e.to_string()))?;
        }

        let status = child.wait().await?;
        output.duration = start.elapsed();
        output.exit_code = status.code().ok_or(CheckerError::Terminated)?;

        debug!(
            exit_code = output.exit_code,
            chunks = output.chunks.len(),
            duration_ms = output.duration.as_millis(),
            "Checker process completed"
        );

        Ok(output)
    }
}

/// Copy a pipe into the channel until EOF
fn pump<R>(
    mut reader: R,
    stream: Stream,
    tx: mpsc::UnboundedSender<OutputChunk>,
) -> JoinHandle<std::io::Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 8192];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                return Ok(());
            }
            trace!(?stream, bytes = n, "checker output");
            if tx.send(OutputChunk::new(stream, &buf[..n])).is_err() {
                return Ok(());
            }
        }
    })
}
