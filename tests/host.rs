// ABOUTME: Integration tests for host preconditions and restart scripts.
// ABOUTME: Uses generated shell scripts and temporary emulation status files.

use kbox_maintainer::config::{HostConfig, ScriptsConfig};
use kbox_maintainer::error::Error;
use kbox_maintainer::host::{self, RestartScripts, check_emulation, recover_emulation};
use kbox_maintainer::types::ContainerIndex;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

/// Write a script without the executable bit, as shipped in deploy bundles.
fn create_script(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o644);
    fs::set_permissions(&path, perms).unwrap();
}

/// Restart script that records its arguments and working directory.
fn create_recording_scripts(dir: &TempDir, extra: &str) {
    create_script(
        dir.path(),
        "android9_kbox.sh",
        &format!("#!/bin/sh\necho \"$@\" >> calls.log\npwd > cwd.log\n{extra}\nexit 0\n"),
    );
    create_script(dir.path(), "base_box.sh", "#!/bin/sh\nexit 0\n");
}

fn host_config(status: &Path) -> HostConfig {
    HostConfig {
        emulation_status: status.to_path_buf(),
        ..HostConfig::default()
    }
}

mod emulation {
    use super::*;

    #[test]
    fn enabled_status_passes() {
        let temp_dir = TempDir::new().unwrap();
        let status = temp_dir.path().join("ubt_a32a64");
        fs::write(&status, "enabled\ninterpreter /opt/exagear/ubt_a32a64\n").unwrap();

        assert!(check_emulation(&host_config(&status)));
    }

    #[test]
    fn disabled_status_fails() {
        let temp_dir = TempDir::new().unwrap();
        let status = temp_dir.path().join("ubt_a32a64");
        fs::write(&status, "disabled\n").unwrap();

        assert!(!check_emulation(&host_config(&status)));
    }

    #[test]
    fn missing_or_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!check_emulation(&host_config(&temp_dir.path().join("absent"))));
        assert!(!check_emulation(&host_config(temp_dir.path())));
    }

    #[tokio::test]
    async fn restart_script_can_enable_emulation() {
        let temp_dir = TempDir::new().unwrap();
        let status = temp_dir.path().join("ubt_a32a64");
        create_recording_scripts(
            &temp_dir,
            &format!("echo enabled > {}", status.display()),
        );

        let scripts = RestartScripts::locate(temp_dir.path(), &ScriptsConfig::default()).unwrap();
        let recovered = recover_emulation(&host_config(&status), &scripts)
            .await
            .unwrap();

        assert!(recovered);
        let calls = fs::read_to_string(temp_dir.path().join("calls.log")).unwrap();
        assert_eq!(calls, "restart\n");
    }
}

mod scripts {
    use super::*;

    #[test]
    fn locate_marks_scripts_user_executable() {
        let temp_dir = TempDir::new().unwrap();
        create_recording_scripts(&temp_dir, "");

        RestartScripts::locate(temp_dir.path(), &ScriptsConfig::default()).unwrap();

        for name in ["android9_kbox.sh", "base_box.sh"] {
            let mode = fs::metadata(temp_dir.path().join(name))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o100, 0o100, "{name} should be u+x");
        }
    }

    #[test]
    fn missing_base_script_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        create_script(temp_dir.path(), "android9_kbox.sh", "#!/bin/sh\nexit 0\n");

        let err = RestartScripts::locate(temp_dir.path(), &ScriptsConfig::default()).unwrap_err();
        match err {
            Error::ScriptNotFound(path) => assert!(path.ends_with("base_box.sh")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn restart_container_passes_index_from_scripts_dir() {
        let temp_dir = TempDir::new().unwrap();
        create_recording_scripts(&temp_dir, "");

        let scripts = RestartScripts::locate(temp_dir.path(), &ScriptsConfig::default()).unwrap();
        let index = ContainerIndex::from_name("android_12").unwrap();
        let output = scripts.restart_container(index).await.unwrap();

        assert!(output.success);
        let calls = fs::read_to_string(temp_dir.path().join("calls.log")).unwrap();
        assert_eq!(calls, "restart 12\n");

        let cwd = fs::read_to_string(temp_dir.path().join("cwd.log")).unwrap();
        assert_eq!(
            fs::canonicalize(cwd.trim()).unwrap(),
            fs::canonicalize(temp_dir.path()).unwrap()
        );
    }

    #[tokio::test]
    async fn failing_restart_is_reported_not_raised() {
        let temp_dir = TempDir::new().unwrap();
        create_script(temp_dir.path(), "android9_kbox.sh", "#!/bin/sh\nexit 4\n");
        create_script(temp_dir.path(), "base_box.sh", "#!/bin/sh\nexit 0\n");

        let scripts = RestartScripts::locate(temp_dir.path(), &ScriptsConfig::default()).unwrap();
        let output = scripts
            .restart_container(ContainerIndex::new("1").unwrap())
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(4));
    }
}

mod gating {
    use super::*;

    fn unreachable_modules(status: &Path) -> HostConfig {
        HostConfig {
            required_modules: vec!["kbox_module_that_does_not_exist".to_string()],
            binder_module: "/nonexistent/aosp9_binder_linux.ko".into(),
            ashmem_module: "/nonexistent/ashmem_linux.ko".into(),
            ..host_config(status)
        }
    }

    #[tokio::test]
    async fn check_points_to_recover() {
        let temp_dir = TempDir::new().unwrap();
        let config = unreachable_modules(&temp_dir.path().join("ubt_a32a64"));

        let err = host::ensure_ready(&config).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "binder ashmem not insmod, using [kbox-maintainer recover]"
        );
    }

    #[tokio::test]
    async fn recover_fails_without_module_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = unreachable_modules(&temp_dir.path().join("ubt_a32a64"));

        let err = host::restore(&config, temp_dir.path(), &ScriptsConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "binder ashmem cannot insmod!!!");
    }
}
