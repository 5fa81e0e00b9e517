// ABOUTME: Reconciler struct binding a runtime gateway to polling settings.
// ABOUTME: Operations live in sibling modules as inherent impls.

use crate::config::ReconcilerSettings;
use crate::runtime::RuntimeGateway;

/// Drives one container record toward its desired state.
///
/// Callers serialise operations on the same record; nothing here locks.
pub struct Reconciler<R> {
    pub(super) runtime: R,
    pub(super) settings: ReconcilerSettings,
}

impl<R: RuntimeGateway> Reconciler<R> {
    pub fn new(runtime: R) -> Self {
        Self::with_settings(runtime, ReconcilerSettings::default())
    }

    pub fn with_settings(runtime: R, settings: ReconcilerSettings) -> Self {
        Self { runtime, settings }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn settings(&self) -> &ReconcilerSettings {
        &self.settings
    }
}
