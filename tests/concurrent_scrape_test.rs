use panasonic_exporter::application::PowerCollector;
use panasonic_exporter::domain::mappings::PowerMappings;
use panasonic_exporter::infrastructure::mock::{MockResponse, MockSnapshotSource};
use panasonic_exporter::infrastructure::observability::ExporterMetrics;
use std::sync::Arc;
use std::time::Duration;

fn snapshot(reading: u32) -> MockResponse {
    MockResponse::body(&format!(
        "YYYYMMDDhhmm,main,kitchen\n202610181200,{:x},{:x}\n",
        reading, reading
    ))
}

fn value_of(output: &str, entity: &str) -> f64 {
    let prefix = format!("panasonic_power_watts{{entity=\"{}\"", entity);
    let lines: Vec<&str> = output.lines().filter(|l| l.starts_with(&prefix)).collect();
    assert_eq!(lines.len(), 1, "expected exactly one sample for {}", entity);
    lines[0]
        .rsplit(' ')
        .next()
        .and_then(|v| v.parse().ok())
        .expect("sample value")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scrapes_are_serialized() {
    let source = Arc::new(
        MockSnapshotSource::sequence((1..=8).map(snapshot).collect())
            .with_delay(Duration::from_millis(20)),
    );
    let mappings: PowerMappings = [("main", 1), ("kitchen", 2)].into_iter().collect();
    let collector = Arc::new(PowerCollector::new(
        source.clone(),
        Arc::new(mappings),
        ExporterMetrics::new().expect("Failed to create metrics"),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let collector = collector.clone();
            tokio::spawn(async move { collector.scrape_and_render().await.unwrap() })
        })
        .collect();

    let mut seen = Vec::new();
    for handle in handles {
        let output = handle.await.unwrap();
        let main = value_of(&output, "main");
        let kitchen = value_of(&output, "kitchen");
        // Both samples must come from the same snapshot
        assert_eq!(main, kitchen * 10.0);
        seen.push(kitchen as u32);
    }

    assert_eq!(source.calls(), 8);
    assert_eq!(source.max_in_flight(), 1);

    seen.sort_unstable();
    assert_eq!(seen, (1..=8).collect::<Vec<u32>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scrape_waits_for_running_scrape() {
    let source = Arc::new(
        MockSnapshotSource::new(snapshot(3)).with_delay(Duration::from_millis(50)),
    );
    let mappings: PowerMappings = [("kitchen", 2)].into_iter().collect();
    let collector = Arc::new(PowerCollector::new(
        source.clone(),
        Arc::new(mappings),
        ExporterMetrics::new().unwrap(),
    ));

    let started = std::time::Instant::now();
    let (first, second) = tokio::join!(collector.scrape(), collector.scrape());

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(source.max_in_flight(), 1);
}
