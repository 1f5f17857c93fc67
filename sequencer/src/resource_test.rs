use super::*;
use crate::config::{BootstrapConfig, ResourceKind};
use crate::fake::{FakePage, LoadMode};

#[tokio::test]
async fn creates_handle_and_resolves_loaded() {
    let page = FakePage::default();
    let config = BootstrapConfig::default();

    let outcome = ensure(&page, &config.stylesheet).await;
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(page.handle_count(ResourceKind::Stylesheet), 1);
}

#[tokio::test]
async fn existing_handle_resolves_without_duplicate() {
    let page = FakePage::default();
    page.handles.borrow_mut().push(ResourceKind::Stylesheet);
    let config = BootstrapConfig::default();

    let outcome = ensure(&page, &config.stylesheet).await;
    assert_eq!(outcome, LoadOutcome::AlreadyPresent);
    assert_eq!(page.handle_count(ResourceKind::Stylesheet), 1);
}

#[tokio::test]
async fn defined_global_counts_as_present() {
    let page = FakePage::default();
    page.globals.borrow_mut().push("Swiper".to_owned());
    let config = BootstrapConfig::default();

    assert_eq!(ensure(&page, &config.script).await, LoadOutcome::AlreadyPresent);
    assert_eq!(page.handle_count(ResourceKind::Script), 0);
}

#[tokio::test]
async fn load_error_resolves_failed() {
    let page = FakePage::default();
    page.set_mode(ResourceKind::Script, LoadMode::Fail);
    let config = BootstrapConfig::default();

    assert_eq!(ensure(&page, &config.script).await, LoadOutcome::Failed);
}

#[tokio::test]
async fn attach_error_resolves_failed() {
    let page = FakePage::default();
    page.fail_attach.set(true);
    let config = BootstrapConfig::default();

    assert_eq!(ensure(&page, &config.script).await, LoadOutcome::Failed);
    assert_eq!(page.handle_count(ResourceKind::Script), 0);
}

#[test]
fn handle_is_attached_before_the_signal_is_polled() {
    let page = FakePage::default();
    let config = BootstrapConfig::default();

    let _signal = ensure(&page, &config.stylesheet);
    assert_eq!(page.handle_count(ResourceKind::Stylesheet), 1);
    let _again = ensure(&page, &config.stylesheet);
    assert_eq!(page.handle_count(ResourceKind::Stylesheet), 1);
}
