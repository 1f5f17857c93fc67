//! Two-state bootstrap sequencer.
//!
//! `Uninitialized -> Ready` happens only when both carousel dependencies have
//! resolved; `Ready -> Uninitialized` happens only on a soft navigation. The
//! cycle repeats for the whole session.
//!
//! DESIGN
//! ======
//! [`Sequencer::initialize`] and [`Sequencer::on_soft_navigation`] perform
//! their synchronous part (guard, theme, hygiene, handle creation) before
//! returning, and hand back a future for the part that waits. The theme is
//! therefore correct even if the returned future is never polled.
//!
//! The guard is a plain check-then-act on a `Cell`: the event loop is single
//! threaded and the only suspension points are load completion and the
//! re-navigation delay.

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod sequencer_test;

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::config::BootstrapConfig;
use crate::host::{LoadOutcome, NavigationSource, Page, ReadyEvent, Scheduler, Storage};
use crate::{hygiene, resource, theme};

/// Bootstrap state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Dependencies not yet confirmed for the current document.
    #[default]
    Uninitialized,
    /// Both dependencies resolved and the ready event was broadcast.
    Ready,
}

pub struct Sequencer {
    page: Rc<dyn Page>,
    storage: Rc<dyn Storage>,
    scheduler: Rc<dyn Scheduler>,
    config: BootstrapConfig,
    phase: Cell<Phase>,
}

impl Sequencer {
    #[must_use]
    pub fn new(
        page: Rc<dyn Page>,
        storage: Rc<dyn Storage>,
        scheduler: Rc<dyn Scheduler>,
        config: BootstrapConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            page,
            storage,
            scheduler,
            config,
            phase: Cell::new(Phase::Uninitialized),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase.get() == Phase::Ready
    }

    /// Forget the previous run; the document may have been replaced.
    pub fn reset(&self) {
        self.phase.set(Phase::Uninitialized);
    }

    /// Force the configured theme. See [`theme::apply`].
    pub fn apply_dark_theme(&self) -> bool {
        theme::apply(self.page.as_ref(), self.storage.as_ref(), &self.config)
    }

    fn refresh_presentation(&self) {
        self.apply_dark_theme();
        hygiene::run(self.page.as_ref(), self.storage.as_ref(), &self.config);
    }

    /// Bootstrap the current document.
    ///
    /// A no-op while [`Phase::Ready`]. Otherwise the theme is applied and
    /// both resource handles are ensured immediately; the returned future
    /// joins the two load signals, marks the sequencer ready and broadcasts
    /// the ready event.
    pub fn initialize(self: &Rc<Self>) -> LocalBoxFuture<'static, ()> {
        if self.is_ready() {
            log::debug!("theme bootstrap already complete");
            return future::ready(()).boxed_local();
        }

        log::info!("theme bootstrap starting");
        self.refresh_presentation();

        let stylesheet = resource::ensure(self.page.as_ref(), &self.config.stylesheet);
        let script = resource::ensure(self.page.as_ref(), &self.config.script);
        let this = Rc::clone(self);
        async move {
            let (stylesheet, script) = future::join(stylesheet, script).await;
            this.complete(stylesheet, script);
        }
        .boxed_local()
    }

    fn complete(&self, stylesheet: LoadOutcome, script: LoadOutcome) {
        self.phase.set(Phase::Ready);
        log::info!("theme bootstrap complete (stylesheet: {stylesheet:?}, script: {script:?})");

        let event = ReadyEvent {
            name: self.config.ready_event.clone(),
            message: self.config.ready_message.clone(),
        };
        if let Err(e) = self.page.dispatch(&event) {
            log::error!("failed to broadcast {}: {e}", event.name);
        }
    }

    /// Handle an in-place page swap.
    ///
    /// Resets the phase and re-applies the theme immediately; the returned
    /// future waits the configured delay and re-initializes if nothing else
    /// did in the meantime.
    pub fn on_soft_navigation(self: &Rc<Self>) -> LocalBoxFuture<'static, ()> {
        log::info!("soft navigation, resetting theme bootstrap");
        self.reset();
        self.refresh_presentation();

        let delay = self.scheduler.sleep(self.config.renavigation_delay());
        let this = Rc::clone(self);
        async move {
            delay.await;
            if !this.is_ready() {
                this.initialize().await;
            }
        }
        .boxed_local()
    }

    /// Re-assert the theme once every subresource of the page finished.
    pub fn on_page_load(&self) {
        self.refresh_presentation();
    }

    /// Start [`Self::initialize`] on the scheduler.
    pub fn launch(self: &Rc<Self>) {
        self.scheduler.spawn(self.initialize());
    }

    /// Subscribe soft-navigation handling to every configured event.
    ///
    /// Returns how many subscriptions succeeded; failures are logged.
    pub fn attach(self: &Rc<Self>, source: &dyn NavigationSource) -> usize {
        let mut attached = 0;
        for event in &self.config.navigation_events {
            let this = Rc::clone(self);
            let handler: Rc<dyn Fn()> = Rc::new(move || {
                let task = this.on_soft_navigation();
                this.scheduler.spawn(task);
            });
            match source.subscribe(event, handler) {
                Ok(()) => attached += 1,
                Err(e) => log::warn!("failed to subscribe to {event}: {e}"),
            }
        }
        attached
    }
}
