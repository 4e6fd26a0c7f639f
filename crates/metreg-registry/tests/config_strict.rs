#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use metreg_core::MetricKind;
use metreg_registry::config::{self, MetricKindConfig};
use metreg_registry::Registry;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  - name: "requests"
    kind: counter
    labelz: { route: "/" } # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");
}

#[test]
fn unknown_kind_fails() {
    let bad = r#"
version: 1
metrics:
  - name: "requests"
    kind: summary
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = "version: 1\n";
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(cfg.metrics.is_empty());
    assert_eq!(cfg.registry.healthcheck_interval(), Duration::from_secs(30));
}

#[test]
fn version_and_ranges_are_validated() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code(), "UNSUPPORTED_VERSION");

    let bad = r#"
version: 1
registry:
  healthcheck_interval_ms: 5
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");

    let bad = r#"
version: 1
metrics:
  - name: "  "
    kind: gauge
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");
}

#[test]
fn registry_from_config_preregisters() {
    let ok = r#"
version: 1
registry:
  healthcheck_interval_ms: 1000
metrics:
  - name: "requests"
    kind: counter
  - name: "load"
    kind: gauge_float64
  - name: "latency"
    kind: timer
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.metrics[1].kind, MetricKindConfig::GaugeFloat64);

    let r = Registry::from_config(&cfg).expect("must build");
    assert_eq!(r.names(), vec!["latency", "load", "requests"]);
    assert_eq!(r.get("latency").unwrap().kind(), MetricKind::Timer);
}

#[test]
fn duplicate_declarations_fail_registry_build() {
    let dup = r#"
version: 1
metrics:
  - name: "requests"
    kind: counter
  - name: "requests"
    kind: meter
"#;
    let cfg = config::load_from_str(dup).expect("must parse");
    let err = Registry::from_config(&cfg).err().expect("must fail");
    assert_eq!(err.code(), "DUPLICATE_METRIC");
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code(), "INTERNAL");
}

#[test]
fn load_from_path_buf_and_report_path_on_bad_yaml() {
    let dir = std::env::temp_dir().join(format!("metreg-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.yaml");
    std::fs::write(&good, "version: 1\nmetrics:\n  - name: hits\n    kind: meter\n").unwrap();
    let cfg = config::load_from_file(&good).expect("must parse");
    assert_eq!(cfg.metrics[0].kind, MetricKindConfig::Meter);

    let bad = dir.join("bad.yaml");
    std::fs::write(&bad, "version: 1\nbogus: true\n").unwrap();
    let err = config::load_from_file(bad.clone()).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");
    assert!(err.to_string().contains("bad.yaml"), "{err}");

    std::fs::remove_dir_all(&dir).unwrap();
}
