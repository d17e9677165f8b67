use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_flame::{FlameLayer, FlushGuard};
use tracing_subscriber::prelude::*;

use crate::error::TracerError;

/// Opt-in tracing setup for hosts and debugging sessions.
///
/// Pretty output goes to stdout, optionally mirrored into a log file, and a
/// flame graph layer can be added to profile slow grid searches.
#[derive(Clone, Debug)]
pub struct RouterTracer {
    level: LevelFilter,
    log_file: Option<PathBuf>,
    flame_file: Option<PathBuf>,
}

/// Keeps the flame graph writer alive; dropping it flushes the output.
pub struct TracerGuard {
    _flame: Option<FlushGuard<BufWriter<File>>>,
}

impl fmt::Debug for TracerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracerGuard")
            .field("flame_graph", &self._flame.is_some())
            .finish()
    }
}

impl Default for RouterTracer {
    fn default() -> Self {
        RouterTracer {
            level: LevelFilter::INFO,
            log_file: None,
            flame_file: None,
        }
    }
}

impl RouterTracer {
    pub fn new(level: LevelFilter) -> Self {
        RouterTracer {
            level,
            ..RouterTracer::default()
        }
    }

    pub fn with_log_file(mut self, path: impl AsRef<Path>) -> Self {
        self.log_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_flame_graph(mut self, path: impl AsRef<Path>) -> Self {
        self.flame_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Installs the subscriber globally. Fails if one is already installed.
    pub fn try_init(&self) -> Result<TracerGuard, TracerError> {
        let stdout_log = tracing_subscriber::fmt::layer().pretty().with_filter(self.level);

        let file_log = match &self.log_file {
            Some(path) => {
                let file = File::create(path)?;
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Arc::new(file))
                        .with_filter(self.level),
                )
            }
            None => None,
        };

        let (flame_layer, flame_guard) = match &self.flame_file {
            Some(path) => {
                let (layer, guard) = FlameLayer::with_file(path)?;
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(stdout_log)
            .with(file_log)
            .with(flame_layer)
            .try_init()?;

        Ok(TracerGuard { _flame: flame_guard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_outputs() {
        let tracer = RouterTracer::new(LevelFilter::DEBUG)
            .with_log_file("route.log")
            .with_flame_graph("route.folded");
        assert_eq!(tracer.level, LevelFilter::DEBUG);
        assert_eq!(tracer.log_file, Some(PathBuf::from("route.log")));
        assert_eq!(tracer.flame_file, Some(PathBuf::from("route.folded")));
        assert_eq!(RouterTracer::default().level, LevelFilter::INFO);
    }

    #[test]
    fn guard_debug_reports_flame_output() {
        let guard = TracerGuard { _flame: None };
        assert_eq!(format!("{guard:?}"), "TracerGuard { flame_graph: false }");
    }
}
