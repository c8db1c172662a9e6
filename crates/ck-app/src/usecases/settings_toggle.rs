//! 开机自启开关：乐观更新，失败回滚

use std::sync::Arc;

use ck_core::ports::AutostartPort;
use ck_core::ToggleFailure;
use tracing::{info, info_span, warn, Instrument};

use crate::state::OptimisticCell;

/// The launch-at-login checkbox.
///
/// The displayed value is always either the optimistic new value or the
/// rolled-back old one, never a pending state.
pub struct SettingsToggle {
    autostart: Arc<dyn AutostartPort>,
    state: OptimisticCell<bool>,
}

impl SettingsToggle {
    pub fn new(autostart: Arc<dyn AutostartPort>) -> Self {
        Self {
            autostart,
            state: OptimisticCell::new(false),
        }
    }

    /// One-time query at startup. A failing query reads as disabled.
    ///
    /// Leaves the displayed value alone; the caller decides whether to
    /// [`confirm`](Self::confirm) it.
    pub async fn query(&self) -> bool {
        let span = info_span!("usecase.settings_toggle.query");

        async {
            let enabled = match self.autostart.is_enabled().await {
                Ok(enabled) => enabled,
                Err(err) => {
                    warn!(error = %err, "Auto-start query failed, assuming disabled");
                    false
                }
            };
            enabled
        }
        .instrument(span)
        .await
    }

    /// Record the backend's value as the displayed one.
    pub fn confirm(&self, enabled: bool) {
        self.state.set_confirmed(enabled);
    }

    pub fn current(&self) -> bool {
        self.state.get()
    }

    /// Show `enabled` immediately, then ask the backend.
    ///
    /// On rejection the pre-toggle value is restored, unless a newer
    /// toggle has been applied in the meantime.
    pub async fn toggle(&self, enabled: bool) -> Result<bool, ToggleFailure> {
        let span = info_span!("usecase.settings_toggle.toggle", requested = enabled);

        async {
            let pending = self.state.apply(enabled);

            match self.autostart.set_enabled(enabled).await {
                Ok(()) => {
                    info!("Auto-start updated");
                    Ok(enabled)
                }
                Err(err) => {
                    let previous = *pending.previous();
                    let rolled_back = self.state.rollback(pending);
                    warn!(
                        error = %err,
                        previous,
                        rolled_back,
                        "Auto-start update rejected"
                    );
                    Err(ToggleFailure {
                        requested: enabled,
                        reason: err.to_string(),
                    })
                }
            }
        }
        .instrument(span)
        .await
    }
}
