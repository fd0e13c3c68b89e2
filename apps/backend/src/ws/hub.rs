//! Per-game connection set with best-effort fan-out.

use std::collections::HashMap;

use actix::Recipient;
use thiserror::Error;
use uuid::Uuid;

use crate::ws::protocol::ServerFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("connection is closed")]
pub struct SinkClosed;

/// Write side of one attached connection. Delivery must not block.
pub trait FrameSink: Send {
    fn deliver(&self, frame: ServerFrame) -> Result<(), SinkClosed>;
}

impl FrameSink for Recipient<ServerFrame> {
    fn deliver(&self, frame: ServerFrame) -> Result<(), SinkClosed> {
        if !self.connected() {
            return Err(SinkClosed);
        }
        self.do_send(frame);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: Vec<Uuid>,
}

#[derive(Default)]
pub struct ConnectionHub {
    connections: HashMap<Uuid, Box<dyn FrameSink>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `conn_id` was already attached (the sink is replaced).
    pub fn attach(&mut self, conn_id: Uuid, sink: Box<dyn FrameSink>) -> bool {
        self.connections.insert(conn_id, sink).is_none()
    }

    /// Idempotent. Returns whether the connection was present.
    pub fn detach(&mut self, conn_id: &Uuid) -> bool {
        self.connections.remove(conn_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Push `frame` to every attached connection. A failing sink is
    /// reported, never propagated, and never stops delivery to the rest.
    pub fn broadcast(&self, frame: &ServerFrame) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        for (conn_id, sink) in &self.connections {
            match sink.deliver(frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(SinkClosed) => report.failed.push(*conn_id),
            }
        }
        report
    }
}
