//! Process-wide registry installation.

use std::io::Write;

use navcat_registry::{NavCategoryError, NavcatConfig, ViewMode, global, install_global};

#[test]
fn global_registry_installs_once() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(
        file,
        r#"
[platform]
graphing_available = true

[policy]
users = ["alice"]

[policy.values]
"Education/AllowGraphingCalculator" = true
"#
    )
    .expect("write config");

    let config = NavcatConfig::load(file.path()).expect("load config");
    assert!(global().is_none());

    let installed = install_global(config.registry()).expect("first install");
    assert_eq!(installed.position(ViewMode::Graphing), 3);
    assert!(std::ptr::eq(installed, global().expect("installed")));

    let second = install_global(NavcatConfig::default().registry());
    assert!(matches!(second, Err(NavCategoryError::GlobalAlreadyInstalled)));
    assert_eq!(
        global().expect("installed").deserialize(17),
        ViewMode::Graphing
    );
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = NavcatConfig::load(&dir.path().join("navcat.toml")).unwrap_err();
    assert!(matches!(error, NavCategoryError::Io { .. }));
}
