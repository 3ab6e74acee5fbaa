//! Integration tests for the freshpod binary

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

/// Run freshpod with HOME pointed at a scratch directory
fn run(home: &Path, args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_freshpod"))
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("FRESHPOD_CONTACT_SECRET")
        .args(args)
        .output()
        .expect("Failed to run freshpod")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_posts(dir: &Path, count: usize) -> std::path::PathBuf {
    let posts: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "slug": format!("post-{i}"),
                "title": format!("Helmet care {i}"),
                "description": "Keeping helmets fresh",
                "author": if i % 2 == 0 { "Asha" } else { "Vikram" },
                "publishedAt": "2025-03-05",
                "order": ["intro"],
                "content": { "intro": { "type": "text", "body": "Sanitize weekly." } }
            })
        })
        .collect();

    let path = dir.join("posts.json");
    fs::write(&path, serde_json::to_string(&posts).unwrap()).unwrap();
    path
}

#[test]
fn test_calc_prints_indian_grouping() {
    let temp = TempDir::new().unwrap();
    let output = run(
        temp.path(),
        &[
            "calc",
            "--machine-cost",
            "50000",
            "--machines",
            "5",
            "--price",
            "50",
            "--cleans",
            "20",
        ],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("₹1,50,000"));
    assert!(text.contains("₹18,25,000"));
    assert!(text.contains("Days to ROI:     50"));
}

#[test]
fn test_calc_requires_every_field() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["calc", "--machine-cost", "50000"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Fill all fields"));
}

#[test]
fn test_blog_list_json_clamps_stale_page() {
    let temp = TempDir::new().unwrap();
    let data = write_posts(temp.path(), 8);

    let output = run(
        temp.path(),
        &[
            "blog",
            "list",
            "--data",
            data.to_str().unwrap(),
            "--author",
            "Asha",
            "--page",
            "9",
            "--json",
        ],
    );

    assert!(output.status.success());
    let view: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(view["totalMatches"], 4);
    assert_eq!(view["page"], 1);
    assert_eq!(view["items"][0]["slug"], "post-0");
}

#[test]
fn test_blog_show_unknown_slug_fails() {
    let temp = TempDir::new().unwrap();
    let data = write_posts(temp.path(), 2);

    let output = run(
        temp.path(),
        &["blog", "show", "missing", "--data", data.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Post 'missing' not found"));
}

#[test]
fn test_gallery_category_filter() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["gallery", "--category", "Product", "--json"]);

    assert!(output.status.success());
    let view: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let items = view["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|image| image["category"] == "Product"));
}

#[test]
fn test_map_render_from_local_topology() {
    let temp = TempDir::new().unwrap();
    let topology = temp.path().join("world.json");
    fs::write(
        &topology,
        r#"{
            "type": "Topology",
            "objects": { "countries": { "type": "GeometryCollection", "geometries": [
                { "type": "Polygon", "id": "356", "arcs": [[0]] }
            ] } },
            "arcs": [[[70, 10], [80, 10], [80, 20], [70, 10]]]
        }"#,
    )
    .unwrap();
    let out = temp.path().join("map.svg");

    let output = run(
        temp.path(),
        &[
            "map",
            "render",
            "--topology",
            topology.to_str().unwrap(),
            "--hover",
            "356",
            "--out",
            out.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"class="country active""#));
    assert!(svg.contains(r#"class="tooltip""#));
}

#[test]
fn test_map_server_render_is_placeholder() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["map", "render", "--server"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("map-placeholder"));
}

#[test]
fn test_map_classify() {
    let temp = TempDir::new().unwrap();

    let active = run(temp.path(), &["map", "classify", "524"]);
    assert!(stdout(&active).contains("Nepal (active)"));

    let inactive = run(temp.path(), &["map", "classify", "840"]);
    assert!(stdout(&inactive).contains("not an active market"));
}

#[test]
fn test_config_init_then_show() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("site.yaml");
    let path_arg = path.to_str().unwrap();

    let init = run(temp.path(), &["config", "init", "--config", path_arg]);
    assert!(init.status.success());
    assert!(path.exists());

    let again = run(temp.path(), &["config", "init", "--config", path_arg]);
    assert!(!again.status.success());

    let show = run(temp.path(), &["config", "show", "--config", path_arg]);
    assert!(stdout(&show).contains("rate_limit_seconds: 60"));
}

/// Run freshpod with no home or config directory in the environment
fn run_homeless(dir: &Path, args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_freshpod"))
        .current_dir(dir)
        .env_remove("HOME")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_CACHE_HOME")
        .args(args)
        .output()
        .expect("Failed to run freshpod")
}

#[test]
fn test_settings_free_commands_run_without_home() {
    let temp = TempDir::new().unwrap();

    let calc = run_homeless(
        temp.path(),
        &[
            "calc",
            "--machine-cost",
            "50000",
            "--machines",
            "5",
            "--price",
            "50",
            "--cleans",
            "20",
        ],
    );
    assert!(calc.status.success());
    assert!(stdout(&calc).contains("₹18,25,000"));

    let classify = run_homeless(temp.path(), &["map", "classify", "356"]);
    assert!(classify.status.success());
    assert!(stdout(&classify).contains("(active)"));

    let project = run_homeless(temp.path(), &["map", "project", "78", "20"]);
    assert!(project.status.success());
    assert!(stdout(&project).contains("visible"));

    let markers = run_homeless(temp.path(), &["map", "markers"]);
    assert!(markers.status.success());
}
