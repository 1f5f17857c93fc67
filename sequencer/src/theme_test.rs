use super::*;
use crate::fake::{FakePage, FakeStorage};

#[test]
fn apply_sets_attribute_and_persists() {
    let page = FakePage::default();
    let storage = FakeStorage::default();
    let config = BootstrapConfig::default();

    assert!(apply(&page, &storage, &config));
    assert_eq!(page.attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
}

#[test]
fn apply_overwrites_prior_preference_and_drops_obsolete_key() {
    let page = FakePage::default();
    let storage = FakeStorage::with(&[("theme", "light"), ("autoChangeMode", "1")]);
    let config = BootstrapConfig::default();

    apply(&page, &storage, &config);
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    assert_eq!(storage.get("autoChangeMode"), None);
}

#[test]
fn apply_is_idempotent() {
    let page = FakePage::default();
    let storage = FakeStorage::default();
    let config = BootstrapConfig::default();

    apply(&page, &storage, &config);
    apply(&page, &storage, &config);
    assert_eq!(storage.items.borrow().len(), 1);
    assert_eq!(page.attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn disabled_storage_still_sets_attribute() {
    let page = FakePage::default();
    let storage = FakeStorage::default();
    storage.disabled.set(true);
    let config = BootstrapConfig::default();

    assert!(!apply(&page, &storage, &config));
    assert_eq!(page.attribute("data-theme").as_deref(), Some("dark"));
}
