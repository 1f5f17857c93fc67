//! Ensure an external resource handle exists exactly once per page.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::config::ResourceSpec;
use crate::host::{LoadOutcome, Page};

/// Return a signal that resolves once `spec` is available or has failed.
///
/// Existing handles are detected before anything is created, so repeated
/// calls within one page lifetime never start a second network load. The
/// handle is attached before this function returns; only the wait is
/// deferred.
pub fn ensure(page: &dyn Page, spec: &ResourceSpec) -> LocalBoxFuture<'static, LoadOutcome> {
    if page.has_resource(spec) {
        log::debug!("{:?} {} already present", spec.kind, spec.marker);
        return future::ready(LoadOutcome::AlreadyPresent).boxed_local();
    }

    let kind = spec.kind;
    let marker = spec.marker.clone();
    match page.load_resource(spec) {
        Ok(load) => load
            .map(move |outcome| {
                match outcome {
                    LoadOutcome::Failed => log::warn!("{kind:?} {marker} failed to load"),
                    _ => log::info!("{kind:?} {marker} loaded"),
                }
                outcome
            })
            .boxed_local(),
        Err(e) => {
            log::warn!("could not attach {kind:?} {marker}: {e}");
            future::ready(LoadOutcome::Failed).boxed_local()
        }
    }
}
