use serde::Serialize;
use std::time::Duration;

/// Which of the checker's streams a chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Raw bytes read from one stream, in the order they arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub stream: Stream,
    pub bytes: Vec<u8>,
}

impl OutputChunk {
    pub fn new(stream: Stream, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            stream,
            bytes: bytes.into(),
        }
    }
}

/// Output captured from a checker run.
///
/// Only the exit code and duration are serialized; the captured bytes are
/// forwarded to the user as-is and never re-encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckerOutput {
    /// Both streams interleaved in arrival order
    #[serde(skip)]
    pub chunks: Vec<OutputChunk>,
    /// Exit code from the process
    pub exit_code: i32,
    /// Duration of execution
    #[serde(serialize_with = "duration_secs")]
    pub duration: Duration,
}

impl CheckerOutput {
    pub fn new(chunks: Vec<OutputChunk>, exit_code: i32, duration: Duration) -> Self {
        Self {
            chunks,
            exit_code,
            duration,
        }
    }

    /// Check if the checker found nothing to report
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Append bytes, merging with the previous chunk when it is the same stream
    pub fn push(&mut self, stream: Stream, bytes: &[u8]) {
        match self.chunks.last_mut() {
            Some(last) if last.stream == stream => last.bytes.extend_from_slice(bytes),
            _ => self.chunks.push(OutputChunk::new(stream, bytes)),
        }
    }

    /// All bytes written to `stream`
    pub fn bytes(&self, stream: Stream) -> Vec<u8> {
        self.chunks
            .iter()
            .filter(|c| c.stream == stream)
            .flat_map(|c| c.bytes.iter().copied())
            .collect()
    }
}

fn duration_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_only_on_zero() {
        let ok = CheckerOutput::new(Vec::new(), 0, Duration::ZERO);
        let bad = CheckerOutput::new(Vec::new(), 100, Duration::ZERO);
        assert!(ok.success());
        assert!(!bad.success());
    }

    #[test]
    fn test_push_merges_runs_of_one_stream() {
        let mut output = CheckerOutput::new(Vec::new(), 0, Duration::ZERO);
        output.push(Stream::Stdout, b"a");
        output.push(Stream::Stdout, b"b");
        output.push(Stream::Stderr, b"c");
        output.push(Stream::Stdout, b"d");

        assert_eq!(
            output.chunks,
            vec![
                OutputChunk::new(Stream::Stdout, &b"ab"[..]),
                OutputChunk::new(Stream::Stderr, &b"c"[..]),
                OutputChunk::new(Stream::Stdout, &b"d"[..]),
            ]
        );
        assert_eq!(output.bytes(Stream::Stdout), b"abd");
        assert_eq!(output.bytes(Stream::Stderr), b"c");
    }
}
