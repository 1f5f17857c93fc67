//! In-memory hosts for driving the sequencer in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::config::{ResourceKind, ResourceSpec};
use crate::error::{PageError, StorageError};
use crate::host::{LoadOutcome, NavigationSource, Page, ReadyEvent, Scheduler, Storage};

#[derive(Default)]
pub struct FakeStorage {
    pub items: RefCell<HashMap<String, String>>,
    pub disabled: Cell<bool>,
}

impl FakeStorage {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let storage = Self::default();
        for (k, v) in entries {
            storage.items.borrow_mut().insert((*k).to_owned(), (*v).to_owned());
        }
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.disabled.get() {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Storage for FakeStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// How a freshly attached handle resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    Succeed,
    Fail,
    /// Resolve only through [`FakePage::finish`].
    Hold,
}

pub struct FakePage {
    pub attributes: RefCell<HashMap<String, String>>,
    /// Handles attached so far, in creation order.
    pub handles: RefCell<Vec<ResourceKind>>,
    pub globals: RefCell<Vec<String>>,
    pub events: RefCell<Vec<ReadyEvent>>,
    pub players: Cell<usize>,
    pub fail_dispatch: Cell<bool>,
    pub fail_attach: Cell<bool>,
    modes: RefCell<HashMap<ResourceKind, LoadMode>>,
    pending: RefCell<Vec<(ResourceKind, oneshot::Sender<LoadOutcome>)>>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            attributes: RefCell::new(HashMap::new()),
            handles: RefCell::new(Vec::new()),
            globals: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
            players: Cell::new(0),
            fail_dispatch: Cell::new(false),
            fail_attach: Cell::new(false),
            modes: RefCell::new(HashMap::new()),
            pending: RefCell::new(Vec::new()),
        }
    }
}

impl FakePage {
    pub fn set_mode(&self, kind: ResourceKind, mode: LoadMode) {
        self.modes.borrow_mut().insert(kind, mode);
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn handle_count(&self, kind: ResourceKind) -> usize {
        self.handles.borrow().iter().filter(|k| **k == kind).count()
    }

    pub fn event_count(&self) -> usize {
        self.events.borrow().len()
    }

    /// Resolve every held load of `kind`.
    pub fn finish(&self, kind: ResourceKind, outcome: LoadOutcome) {
        let mut pending = self.pending.borrow_mut();
        let (matching, rest): (Vec<_>, Vec<_>) = pending.drain(..).partition(|(k, _)| *k == kind);
        *pending = rest;
        for (_, tx) in matching {
            let _ = tx.send(outcome);
        }
    }
}

impl Page for FakePage {
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError> {
        self.attributes.borrow_mut().insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn has_resource(&self, spec: &ResourceSpec) -> bool {
        let global = spec
            .global
            .as_ref()
            .is_some_and(|g| self.globals.borrow().contains(g));
        global || self.handles.borrow().contains(&spec.kind)
    }

    fn load_resource(&self, spec: &ResourceSpec) -> Result<LocalBoxFuture<'static, LoadOutcome>, PageError> {
        if self.fail_attach.get() {
            return Err(PageError::Dom("append failed".to_owned()));
        }
        self.handles.borrow_mut().push(spec.kind);
        let mode = self.modes.borrow().get(&spec.kind).copied().unwrap_or(LoadMode::Succeed);
        Ok(match mode {
            LoadMode::Succeed => futures::future::ready(LoadOutcome::Loaded).boxed_local(),
            LoadMode::Fail => futures::future::ready(LoadOutcome::Failed).boxed_local(),
            LoadMode::Hold => {
                let (tx, rx) = oneshot::channel();
                self.pending.borrow_mut().push((spec.kind, tx));
                rx.map(|r| r.unwrap_or(LoadOutcome::Failed)).boxed_local()
            }
        })
    }

    fn dispatch(&self, event: &ReadyEvent) -> Result<(), PageError> {
        if self.fail_dispatch.get() {
            return Err(PageError::Dom("dispatch rejected".to_owned()));
        }
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }

    fn remove_matching(&self, _selector: &str) -> Result<usize, PageError> {
        Ok(self.players.replace(0))
    }
}

/// Scheduler backed by tokio's virtual clock; spawned tasks are queued and
/// driven explicitly by the test.
#[derive(Default)]
pub struct FakeScheduler {
    pub tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
    pub sleeps: RefCell<Vec<Duration>>,
}

impl FakeScheduler {
    /// Await queued tasks until none remain.
    pub async fn drain(&self) {
        loop {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            if tasks.is_empty() {
                break;
            }
            futures::future::join_all(tasks).await;
        }
    }
}

impl Scheduler for FakeScheduler {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        tokio::time::sleep(duration).boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

#[derive(Default)]
pub struct FakeNavigation {
    handlers: RefCell<HashMap<String, Vec<Rc<dyn Fn()>>>>,
    pub reject: RefCell<Vec<String>>,
}

impl FakeNavigation {
    pub fn emit(&self, event: &str) {
        let handlers = self.handlers.borrow().get(event).cloned().unwrap_or_default();
        for handler in handlers {
            handler();
        }
    }
}

impl NavigationSource for FakeNavigation {
    fn subscribe(&self, event: &str, handler: Rc<dyn Fn()>) -> Result<(), PageError> {
        if self.reject.borrow().iter().any(|e| e == event) {
            return Err(PageError::Dom(format!("cannot listen to {event}")));
        }
        self.handlers.borrow_mut().entry(event.to_owned()).or_default().push(handler);
        Ok(())
    }
}
