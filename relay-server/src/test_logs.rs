//! Captured JSON log output for asserting on emitted events in tests.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log sink. Clones share the same buffer.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

pub(crate) struct CapturedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CapturedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buf: self.buf.clone(),
        }
    }
}

impl CapturedLogs {
    /// JSON subscriber shaped like the server's, writing into this sink.
    pub(crate) fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(self.clone())
            .finish()
    }

    /// All captured events, one JSON object per line.
    pub(crate) fn events(&self) -> Vec<Value> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// First event whose message is `name`.
    pub(crate) fn event(&self, name: &str) -> Option<Value> {
        self.events()
            .into_iter()
            .find(|event| event["message"] == name)
    }

    /// Wait up to a second for an event emitted by a detached task.
    pub(crate) async fn wait_for_event(&self, name: &str) -> Option<Value> {
        for _ in 0..50 {
            if let Some(event) = self.event(name) {
                return Some(event);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.event(name)
    }
}
