use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use errnote::{
    hooks::{Fixed, Hooks, SourceLocation},
    prelude::*,
};

#[derive(Debug, thiserror::Error)]
#[error("timed out")]
struct TimedOut;

fn fetch() -> AnnotatedError {
    annotate!(Annotator::new(), &TimedOut, "fetching")
}

// Hooks are process-global, so everything that installs them lives in this one test.
#[test]
fn test_hook_lifecycle() {
    assert!(!Hooks::is_installed());
    assert!(fetch().record().fn_name().ends_with("::fetch"));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let count = Arc::new(AtomicUsize::new(0));
    let hooks = {
        let seen = Arc::clone(&seen);
        let count = Arc::clone(&count);
        Hooks::new()
            .caller_identity(Fixed("global"))
            .observer(move |record: &Record, _: &Caller| {
                seen.lock().unwrap().push(record.fn_name().to_owned());
            })
            .observer(move |_: &Record, _: &Caller| {
                count.fetch_add(1, Ordering::SeqCst);
            })
    };
    let created_at = hooks.created_at();
    assert_eq!(created_at.file(), file!());
    hooks.install().expect("failed to install hooks");
    assert!(Hooks::is_installed());

    // The global provider replaces the function name captured by the macro
    assert_eq!(fetch().record().fn_name(), "global");
    // A provider on the annotator still wins
    let local = Annotator::new()
        .caller_identity(Fixed("local"))
        .annotate(&TimedOut, &[]);
    assert_eq!(local.record().fn_name(), "local");

    assert_eq!(*seen.lock().unwrap(), ["global", "local"]);
    assert_eq!(count.load(Ordering::SeqCst), 2);

    // A second install is refused and hands the hooks back
    let rejected = Hooks::new().caller_identity(SourceLocation).install().unwrap_err();
    assert_eq!(rejected.to_string(), "hooks are already installed globally");
    assert_eq!(fetch().record().fn_name(), "global");

    let previous = rejected.0.replace().expect("hooks were installed");
    assert_eq!(previous.created_at(), created_at);
    let located = fetch();
    assert!(located.record().fn_name().starts_with(file!()), "{}", located.record().fn_name());
    // Observers went away with the replaced hooks
    assert_eq!(count.load(Ordering::SeqCst), 2);

    assert!(Hooks::uninstall().is_some());
    assert!(!Hooks::is_installed());
    assert!(fetch().record().fn_name().ends_with("::fetch"));
    assert!(Hooks::uninstall().is_none());
}
