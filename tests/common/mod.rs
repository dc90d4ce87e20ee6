//! Shared fixtures for integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use proxy_controller::ControllerConfig;

/// Write an executable fake engine script into `dir` and return its path.
///
/// The body is POSIX sh; `#!/bin/sh` is prepended.
pub fn fake_engine(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-engine.sh");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// A fake engine that passes check mode and rewrites the pid file on reload,
/// which is the cooperative behavior the real engine shows.
pub fn cooperative_engine(dir: &Path) -> PathBuf {
    fake_engine(
        dir,
        r#"if [ "$1" = "-c" ]; then
    exit 0
fi
pidfile=""
while [ "$#" -gt 0 ]; do
    if [ "$1" = "-p" ]; then
        pidfile="$2"
    fi
    shift
done
echo "$$" > "$pidfile""#,
    )
}

/// Controller config wired to a fake engine inside `dir`, with a fast poll
/// interval and a bounded confirm deadline so failing tests fail quickly.
pub fn test_config(dir: &Path, engine_binary: &Path) -> ControllerConfig {
    let template_path = dir.join("haproxy.tmpl");
    fs::write(&template_path, "frontend main\n{{SERVICES}}").unwrap();

    let mut config = ControllerConfig::default();
    config.engine.binary = engine_binary.display().to_string();
    config.engine.config_path = dir.join("haproxy.cfg").display().to_string();
    config.engine.pid_path = dir.join("haproxy.pid").display().to_string();
    config.engine.template_path = template_path.display().to_string();
    config.reconfigure.poll_interval_ms = 10;
    config.reconfigure.confirm_timeout_secs = Some(5);
    config
}
