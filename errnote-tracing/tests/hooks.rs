use std::sync::{Arc, Mutex};

use errnote::{hooks::Hooks, prelude::*};
use errnote_tracing::{SpanIdentity, TARGET, TracingObserver};
use tracing::Level;
use tracing_subscriber::{Registry, layer::SubscriberExt};

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
struct ConnectionReset;

#[derive(Clone, Default)]
struct Targets(Arc<Mutex<Vec<(String, Level)>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Targets {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        self.0
            .lock()
            .unwrap()
            .push((metadata.target().to_owned(), *metadata.level()));
    }
}

#[tracing::instrument]
fn load_profile(user_id: u64) -> Result<(), AnnotatedError> {
    bail_annotated!(annotator![user_id], &ConnectionReset, "loading profile");
}

fn handle_request() -> Result<(), AnnotatedError> {
    let annotator = Annotator::new().arg("GET /profile");
    load_profile(42).annotate(&annotator, &["handling request"])
}

// Hooks are process-global, so everything that installs them lives in this one test.
#[test]
fn test_installed_tracing_hooks() {
    Hooks::new()
        .caller_identity(SpanIdentity)
        .observer(TracingObserver {
            level: Level::INFO,
            include_record: false,
            leafs_only: false,
        })
        .install()
        .expect("failed to install hooks");

    let targets = Targets::default();
    let events = targets.0.clone();
    let error = tracing::subscriber::with_default(Registry::default().with(targets), handle_request)
        .unwrap_err();

    assert_eq!(error.depth(), 2);
    assert_eq!(error.root_cause(), "connection reset");

    let layers: Vec<&Record> = error.layers().collect();
    assert!(layers[1].fn_name().ends_with("::load_profile"), "{}", layers[1].fn_name());
    assert_eq!(layers[1].args(), ["42"]);
    // Outside any span the direct call is named after its source location
    assert!(layers[0].fn_name().starts_with(file!()), "{}", layers[0].fn_name());

    let events = events.lock().unwrap();
    let annotation_events: Vec<_> = events.iter().filter(|(target, _)| target == TARGET).collect();
    assert_eq!(annotation_events.len(), 2);
    assert!(annotation_events.iter().all(|(_, level)| *level == Level::INFO));

    assert!(Hooks::uninstall().is_some());
}
