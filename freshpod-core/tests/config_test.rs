//! Site configuration loading and the site key environment lookup

use anyhow::Result;
use freshpod_core::config::{SiteConfig, DEFAULT_SITE_KEY_ENV, FALLBACK_SITE_KEY};
use serial_test::serial;
use std::env;
use tempfile::TempDir;

#[test]
#[serial]
fn test_site_key_from_environment() -> Result<()> {
    let config = SiteConfig::default();

    env::set_var(DEFAULT_SITE_KEY_ENV, "from-env");
    assert_eq!(config.contact.site_key(), "from-env");

    env::remove_var(DEFAULT_SITE_KEY_ENV);
    assert_eq!(config.contact.site_key(), FALLBACK_SITE_KEY);

    Ok(())
}

#[test]
#[serial]
fn test_blank_site_key_falls_back() -> Result<()> {
    let mut config = SiteConfig::default();
    config.contact.site_key_env = "FRESHPOD_TEST_BLANK_KEY".to_string();

    env::set_var("FRESHPOD_TEST_BLANK_KEY", "   ");
    assert_eq!(config.contact.site_key(), FALLBACK_SITE_KEY);
    env::remove_var("FRESHPOD_TEST_BLANK_KEY");

    Ok(())
}

#[test]
fn test_config_file_overrides() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("site.yaml");

    std::fs::write(
        &path,
        r#"
site_url: https://staging.freshpod.in
contact:
  endpoint: https://staging.freshpod.in/api/contact
  rate_limit_seconds: 120
map:
  topology_url: https://example.com/countries-50m.json
  cache_ttl_minutes: 5
catalog:
  blog_page_size: 9
"#,
    )?;

    let config = SiteConfig::load_from_path(&path)?;
    assert_eq!(config.site_url, "https://staging.freshpod.in");
    assert_eq!(config.contact.rate_limit().as_secs(), 120);
    assert_eq!(config.contact.timeout_seconds, 30);
    assert_eq!(config.map.cache_ttl().as_secs(), 300);
    assert_eq!(config.catalog.blog_page_size, 9);
    assert_eq!(config.catalog.gallery_page_size, None);

    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("site.yaml");
    std::fs::write(&path, "catalog:\n  blog_page_size: 0\n")?;

    let err = SiteConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("blog_page_size"));

    Ok(())
}
