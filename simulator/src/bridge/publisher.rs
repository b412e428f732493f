use anyhow::Context;
use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use wildcore::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Mqtt,
    Websocket,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Mqtt => f.write_str("MQTT"),
            Transport::Websocket => f.write_str("WEBSOCKET"),
        }
    }
}

/// Stand-in for a live telemetry feed. Every sample is serialized and logged
/// as it would be published; nothing leaves the process.
#[derive(Debug, Clone)]
pub struct StreamPublisher {
    transport: Transport,
    topic: String,
    host: String,
    port: u16,
}

impl StreamPublisher {
    pub fn new(
        transport: Transport,
        topic: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            transport,
            topic: topic.into(),
            host: host.into(),
            port,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Serializes one sample into the payload that would go on the wire.
    pub fn encode(&self, sample: &Sample) -> anyhow::Result<String> {
        serde_json::to_string(sample).context("serializing telemetry sample")
    }

    pub fn publish(&self, sample: &Sample) -> anyhow::Result<()> {
        let payload = self.encode(sample)?;
        info!("[STREAM] {} {}", self.topic, payload);
        Ok(())
    }

    /// Publishes samples until the source is exhausted or `stop` is raised,
    /// returning the number published.
    pub fn publish_all<I>(&self, samples: I, stop: &AtomicBool) -> anyhow::Result<usize>
    where
        I: IntoIterator<Item = Sample>,
    {
        info!(
            "[STREAM] simulating {} stream to {} on topic '{}'",
            self.transport,
            self.endpoint(),
            self.topic
        );
        let mut published = 0;
        for sample in samples {
            if stop.load(Ordering::Relaxed) {
                info!("[STREAM] stop requested after {} samples", published);
                break;
            }
            self.publish(&sample)?;
            published += 1;
        }
        Ok(published)
    }
}
