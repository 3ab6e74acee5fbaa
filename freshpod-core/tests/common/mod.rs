//! Shared helpers for integration tests

use std::sync::Once;

use freshpod_core::content::BlogIndex;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Blog index with `count` posts; authors cycle through `authors`
#[allow(dead_code)]
pub fn sample_blog(count: usize, authors: &[&str]) -> BlogIndex {
    let posts: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let description = if i % 3 == 0 {
                "Why sanitizing matters"
            } else {
                "Riding season notes"
            };
            serde_json::json!({
                "slug": format!("post-{i}"),
                "title": format!("Helmet hygiene tip #{i}"),
                "description": description,
                "author": authors[i % authors.len()],
                "publishedAt": "2026-01-15",
                "banner": format!("/images/blog/{i}.webp"),
                "order": [],
                "content": {}
            })
        })
        .collect();

    BlogIndex::from_json(&serde_json::Value::Array(posts).to_string()).unwrap()
}

/// Small quantized topology: India, Nepal and the United States as squares
#[allow(dead_code)]
pub fn sample_topojson() -> &'static str {
    r#"{
  "type": "Topology",
  "transform": { "scale": [0.5, 0.5], "translate": [-180, -90] },
  "objects": {
    "countries": {
      "type": "GeometryCollection",
      "geometries": [
        { "type": "Polygon", "id": "356", "properties": { "name": "India" }, "arcs": [[0]] },
        { "type": "Polygon", "id": "524", "properties": { "name": "Nepal" }, "arcs": [[1]] },
        { "type": "MultiPolygon", "id": 840, "properties": { "name": "United States of America" }, "arcs": [[[2]]] }
      ]
    }
  },
  "arcs": [
    [[504, 200], [20, 0], [0, 20], [-20, 0], [0, -20]],
    [[524, 236], [8, 0], [0, 4], [-8, 0], [0, -4]],
    [[160, 240], [40, 0], [0, 20], [-40, 0], [0, -20]]
  ]
}"#
}
