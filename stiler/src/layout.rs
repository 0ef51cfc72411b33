use stiler_layout::Strategy;

use crate::error::StilerError;

/// Remembers which multi-window strategy was used last.
///
/// Reordering operations (swap, cycle, anticycle) replay it so the caller does
/// not have to name a layout again.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    recorded: Option<String>,
}

impl LayoutState {
    pub fn new(recorded: Option<String>) -> Self {
        Self { recorded }
    }

    pub fn record_layout(&mut self, strategy: Strategy) {
        self.recorded = Some(strategy.name().to_string());
    }

    /// The recorded strategy, or master-stack when nothing usable was recorded.
    pub fn last_layout_or_default(&self) -> Strategy {
        let Some(name) = self.recorded.as_deref() else {
            return Strategy::default();
        };

        match name.parse() {
            Ok(strategy) => {
                tracing::info!("Retrieved last used layout: {}", strategy);
                strategy
            }
            Err(_) => {
                tracing::warn!(
                    "{}, using {}",
                    StilerError::UnknownStrategy(name.to_string()),
                    Strategy::default()
                );
                Strategy::default()
            }
        }
    }
}
