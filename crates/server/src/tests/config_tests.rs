use super::*;

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(tag: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("visum_server_{tag}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

fn no_env(_key: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/server.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.static_dir, PathBuf::from("web"));
}

#[test]
fn config_file_overrides_defaults() {
    let root = temp_root("file");
    let path = root.join("server.toml");
    fs::write(
        &path,
        "bind_addr = \"127.0.0.1:9000\"\nstatic_dir = \"dist\"\n",
    )
    .expect("write");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.bind_addr, "127.0.0.1:9000");
    assert_eq!(settings.static_dir, PathBuf::from("dist"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn environment_wins_over_file_and_app_prefix_wins_last() {
    let root = temp_root("env");
    let path = root.join("server.toml");
    fs::write(&path, "bind_addr = \"127.0.0.1:9000\"\n").expect("write");

    let vars = HashMap::from([
        ("VISUM_BIND", "127.0.0.1:7000"),
        ("APP__BIND_ADDR", "127.0.0.1:7001"),
        ("VISUM_DIR", "public"),
    ]);
    let settings = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.bind_addr, "127.0.0.1:7001");
    assert_eq!(settings.static_dir, PathBuf::from("public"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_file_is_ignored() {
    let root = temp_root("bad");
    let path = root.join("server.toml");
    fs::write(&path, "bind_addr = [").expect("write");

    assert_eq!(load_settings_from(&path, no_env), Settings::default());

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn port_only_bind_addr_listens_on_all_interfaces() {
    assert_eq!(normalize_bind_addr(":8080"), "0.0.0.0:8080");
    assert_eq!(normalize_bind_addr(" 127.0.0.1:3000 "), "127.0.0.1:3000");
    assert_eq!(normalize_bind_addr(""), "0.0.0.0:8080");
}
