// ABOUTME: Integration tests for collection building blocks.
// ABOUTME: Working directory lifecycle, GPU info copies and archive round trips.

use flate2::read::GzDecoder;
use kbox_maintainer::collect::{
    CollectKind, WorkDir, collect_gpu_pm_info, guest_tmp_path, pack_dir, pack_dir_gz,
};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

fn entry_names<R: Read>(archive: &mut tar::Archive<R>) -> BTreeSet<String> {
    archive
        .entries()
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .unwrap()
                .to_string_lossy()
                .trim_start_matches("./")
                .to_string()
        })
        .collect()
}

#[test]
fn workdir_archive_holds_both_subtrees() {
    let out = tempfile::tempdir().unwrap();
    let workdir = WorkDir::create(out.path(), CollectKind::Log).unwrap();
    fs::write(workdir.host_dir().join("dmesg.log"), "[    0.000000] Booting\n").unwrap();
    fs::write(
        workdir.guest_dir("android_1").unwrap().join("getprop.log"),
        "[sys.boot_completed]: [1]\n",
    )
    .unwrap();

    let dest = out.path().join("android_1_log_20240101000000.tar.gz");
    pack_dir_gz(workdir.path(), &dest).unwrap();
    let workdir_path = workdir.path().to_path_buf();
    workdir.close().unwrap();

    assert!(!workdir_path.exists());
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(&dest).unwrap()));
    let names = entry_names(&mut archive);
    assert!(names.contains("hostos/dmesg.log"));
    assert!(names.contains("guestos/android_1/getprop.log"));
}

#[test]
fn host_log_tar_is_uncompressed() {
    let logs = tempfile::tempdir().unwrap();
    fs::create_dir_all(logs.path().join("journal")).unwrap();
    fs::write(logs.path().join("syslog"), "kernel: ok\n").unwrap();
    std::os::unix::fs::symlink("/nonexistent/target", logs.path().join("dangling")).unwrap();

    let out = tempfile::tempdir().unwrap();
    let dest = out.path().join("var_log.tar");
    pack_dir(logs.path(), &dest).unwrap();

    let mut archive = tar::Archive::new(File::open(&dest).unwrap());
    let names = entry_names(&mut archive);
    assert!(names.contains("syslog"));
    assert!(names.contains("dangling"));
}

#[test]
fn gpu_info_per_card() {
    let dri = tempfile::tempdir().unwrap();
    fs::create_dir_all(dri.path().join("128")).unwrap();
    fs::write(dri.path().join("128/amdgpu_pm_info"), "MEM Clocks\n").unwrap();

    let host = tempfile::tempdir().unwrap();
    assert_eq!(collect_gpu_pm_info(dri.path(), host.path()).unwrap(), 1);
    assert!(host.path().join("amdgpu_pm_info_128").is_file());
    assert_eq!(
        collect_gpu_pm_info(Path::new("/nonexistent/dri"), host.path()).unwrap(),
        0
    );
}

#[test]
fn guest_temp_paths_follow_workdir_name() {
    let out = tempfile::tempdir().unwrap();
    let workdir = WorkDir::create(out.path(), CollectKind::Resource).unwrap();
    assert_eq!(
        guest_tmp_path(CollectKind::Resource, workdir.name()),
        format!("/data/{}", workdir.name())
    );
}
