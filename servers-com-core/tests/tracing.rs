//! Structured diagnostics emitted while building graphs.

use rand::{SeedableRng, rngs::SmallRng};
use servers_com_core::{Graph, GraphConfig};
use servers_com_test_support::tracing::RecordingLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn capture<T>(run: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let output = tracing::subscriber::with_default(subscriber, run);
    (output, layer)
}

fn field<'a>(fields: &'a std::collections::HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields.get(key).map(String::as_str)
}

#[test]
fn random_span_records_configuration() {
    let config = GraphConfig {
        nodes_amount: 8,
        ..GraphConfig::default()
    };
    let (result, layer) = capture(|| {
        let mut rng = SmallRng::seed_from_u64(42);
        Graph::random(&config, &mut rng)
    });
    let graph = result.expect("config is satisfiable");

    let span = layer.span_named("graph.random").expect("span recorded");
    assert_eq!(field(&span.fields, "nodes_amount"), Some("8"));
    assert_eq!(field(&span.fields, "connection_percent"), Some("80"));
    assert_eq!(field(&span.fields, "allow_loops"), Some("false"));

    let limits = layer.span_named("graph.set_limits").expect("span recorded");
    assert_eq!(field(&limits.fields, "limits"), Some("2"));

    let events = layer.events_with_message("graph populated");
    assert_eq!(events.len(), 1);
    let event = events.first().expect("event recorded");
    assert_eq!(event.level, Level::INFO);
    let edges = graph.edge_count().to_string();
    assert_eq!(field(&event.fields, "edges"), Some(edges.as_str()));
}

#[test]
fn configuration_failure_is_logged() {
    let config = GraphConfig {
        nodes_amount: 3,
        ..GraphConfig::default()
    };
    let (result, layer) = capture(|| {
        let mut rng = SmallRng::seed_from_u64(3);
        Graph::random(&config, &mut rng)
    });
    assert!(result.is_err());

    let warnings = layer.events_with_message("not enough uncapped partners");
    assert_eq!(warnings.len(), 1);
    let errors = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::ERROR)
        .count();
    assert_eq!(errors, 1, "a failed construction reports its error once");
    assert!(layer.events_with_message("graph populated").is_empty());
}
