// src/surface.rs
//! Results surfaces: where a handler renders output, shows its loading
//! indicator and raises alerts

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::render::{OutputFormat, ResultsView};

/// The output region, loading indicator and alert channel owned by one handler.
pub trait ResultsSurface: Send + Sync {
    /// Remove whatever a previous submission rendered.
    fn clear(&self);

    fn set_loading(&self, visible: bool);

    /// Replace the output region with `view`.
    fn show(&self, view: ResultsView);

    /// Blocking, user-visible notice. Never touches the output region.
    fn alert(&self, message: &str);
}

// ===== In-memory surface =====

#[derive(Debug, Default)]
struct SurfaceState {
    view: Option<ResultsView>,
    html: String,
    loading: bool,
    alerts: Vec<String>,
}

/// Keeps the rendered HTML in memory. Backs the web page and the tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn html(&self) -> String {
        self.state().html.clone()
    }

    pub fn view(&self) -> Option<ResultsView> {
        self.state().view.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state().alerts.clone()
    }
}

impl ResultsSurface for MemorySurface {
    fn clear(&self) {
        let mut state = self.state();
        state.view = None;
        state.html.clear();
    }

    fn set_loading(&self, visible: bool) {
        self.state().loading = visible;
    }

    fn show(&self, view: ResultsView) {
        let html = match view.to_html() {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to render results: {}", e);
                String::new()
            }
        };

        let mut state = self.state();
        state.html = html;
        state.view = Some(view);
    }

    fn alert(&self, message: &str) {
        self.state().alerts.push(message.to_string());
    }
}

// ===== Terminal surface =====

/// Prints results to stdout, or writes them to a file, in HTML or text.
/// Alerts and the loading indicator go to stderr.
pub struct ConsoleSurface {
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl ConsoleSurface {
    pub fn new(format: OutputFormat, output: Option<PathBuf>) -> Self {
        Self { format, output }
    }

    fn write_output(&self, rendered: &str) -> std::io::Result<()> {
        match &self.output {
            Some(path) => std::fs::write(path, rendered),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()
            }
        }
    }
}

impl ResultsSurface for ConsoleSurface {
    fn clear(&self) {
        if let Some(path) = &self.output {
            if path.exists() {
                if let Err(e) = std::fs::write(path, "") {
                    warn!("Failed to clear {}: {}", path.display(), e);
                }
            }
        }
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            eprintln!("⏳ Scoring resume against job description...");
        }
    }

    fn show(&self, view: ResultsView) {
        let rendered = match view.render(self.format) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("Failed to render results: {}", e);
                return;
            }
        };

        match self.write_output(&rendered) {
            Ok(()) => {
                if let Some(path) = &self.output {
                    info!("Results written to {}", path.display());
                    eprintln!("✓ Results written to {}", path.display());
                }
            }
            Err(e) => error!("Failed to write results: {}", e),
        }
    }

    fn alert(&self, message: &str) {
        warn!("Submission rejected: {}", message);
        eprintln!("❌ {}", message);
    }
}
