use crate::errors;
use rmcp::ErrorData as McpError;
use rmcp::model::Tool;
use serde_json::json;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;

pub mod prompt;
pub mod simulation;

/// Concurrent blocking jobs (file reads, blocking HTTP)
const BLOCKING_PERMITS: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct Safety {
    pub network: bool,
    pub reads: bool,
    pub writes: bool,
    pub writes_sot: bool,
}

pub trait ToolExt {
    fn with_safety(self, safety: Safety) -> Tool;
}

impl ToolExt for Tool {
    fn with_safety(mut self, safety: Safety) -> Tool {
        // Map to RMCP annotations
        let mut annotations = self.annotations.unwrap_or_default();
        annotations.read_only_hint = Some(!safety.writes);
        annotations.open_world_hint = Some(safety.network);
        self.annotations = Some(annotations);

        // Add custom safety meta
        let mut meta = self.meta.unwrap_or_default();
        meta.insert(
            "safety".to_string(),
            json!({
                "network": safety.network,
                "reads": safety.reads,
                "writes": safety.writes,
                "writes_sot": safety.writes_sot,
            }),
        );
        self.meta = Some(meta);
        self
    }
}

/// Run `f` on the blocking pool, at most `BLOCKING_PERMITS` at a time
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, McpError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, McpError> + Send + 'static,
{
    let permit = blocking_semaphore()
        .acquire_owned()
        .await
        .map_err(errors::from_display)?;

    spawn_blocking(move || {
        let _permit = permit;
        f()
    })
    .await
    .map_err(errors::from_display)?
}

fn blocking_semaphore() -> Arc<Semaphore> {
    static SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    SEM.get_or_init(|| Arc::new(Semaphore::new(BLOCKING_PERMITS)))
        .clone()
}
