// ABOUTME: Rollover watcher command for macro-ledger
// ABOUTME: Polls the clock until Ctrl-C, completing the previous day on each date change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

use macro_ledger::ledger::Ledger;
use macro_ledger::lifecycle::RolloverWatcher;
use macro_ledger::AppResult;
use tracing::{info, warn};

/// Run the watcher until interrupted
pub async fn run(ledger: &mut Ledger, poll_secs: u64) -> AppResult<()> {
    info!(poll_secs, "Watching for date rollover; press Ctrl-C to stop");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl-C; stopping watcher");
        }
    };
    let watcher = RolloverWatcher::from_secs(poll_secs).run(ledger, shutdown).await;
    info!(rollovers = watcher.rollovers(), "Watcher stopped");
    Ok(())
}
