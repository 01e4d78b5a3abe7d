use std::path::Path;

use figment::providers::{Format, Toml};
use figment::Figment;
use serde::Deserialize;

use kb_core::config::{expand_path, resolve_with_base, Config};

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Data {
    corpus_path: String,
}

fn config(toml: &str) -> Config {
    Config::from_figment(Figment::new().merge(Toml::string(toml)))
}

#[test]
fn get_extracts_nested_sections() {
    let cfg = config("[data]\ncorpus_path = \"kb/articles.json\"\n");
    let data: Data = cfg.get("data").expect("data section");
    assert_eq!(data.corpus_path, "kb/articles.json");
    let path: String = cfg.get("data.corpus_path").expect("dotted key");
    assert_eq!(path, "kb/articles.json");
}

#[test]
fn missing_key_is_an_error_for_get_but_default_for_get_or_default() {
    let cfg = config("");
    assert!(cfg.get::<Data>("data").is_err());
    assert_eq!(cfg.get_or_default::<Data>("data").unwrap(), Data::default());
}

#[test]
fn malformed_section_is_still_an_error() {
    let cfg = config("[data]\ncorpus_path = 12\n");
    assert!(cfg.get_or_default::<Data>("data").is_err());
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/srv/kb");
    assert_eq!(resolve_with_base(base, "data/a.json"), base.join("data/a.json"));
    assert_eq!(resolve_with_base(base, "/abs/a.json"), Path::new("/abs/a.json"));
}

#[test]
fn expand_path_substitutes_env_vars() {
    std::env::set_var("KB_CORE_TEST_DIR", "/tmp/kbtest");
    assert_eq!(expand_path("${KB_CORE_TEST_DIR}/corpus"), Path::new("/tmp/kbtest/corpus"));
}

#[test]
fn path_keys_resolve_against_the_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[data]\ncorpus_path = \"kb/corpus\"\n").unwrap();
    let cfg = Config::load_from(dir.path()).unwrap();
    assert_eq!(cfg.base_dir(), dir.path());
    assert_eq!(cfg.path("data.corpus_path").unwrap(), Some(dir.path().join("kb/corpus")));
    assert_eq!(cfg.path("data.missing").unwrap(), None);

    let cfg = config("[data]\ncorpus_path = \"/abs/corpus\"\n").with_base("/srv");
    assert_eq!(cfg.path("data.corpus_path").unwrap(), Some(Path::new("/abs/corpus").to_path_buf()));
}
