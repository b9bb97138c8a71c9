// ABOUTME: Tar and tar.gz packing of local directories.
// ABOUTME: Also names the final archive after the collected containers and a UTC timestamp.

use super::CollectKind;
use crate::error::{Error, Result};
use crate::runtime::ContainerSummary;
use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Name used when more than one container was collected.
pub const FLEET_NAME: &str = "cloudphone";

/// `<name>_<log|res>_<yyyyMMddHHmmss>.tar.gz`
pub fn archive_name(kind: CollectKind, targets: &[ContainerSummary], at: DateTime<Utc>) -> String {
    let name = match targets {
        [single] => single.name.as_str(),
        _ => FLEET_NAME,
    };
    format!("{}_{}_{}.tar.gz", name, kind.tag(), at.format("%Y%m%d%H%M%S"))
}

/// Write `src` as an uncompressed tar whose entries are rooted at `.`.
pub fn pack_dir(src: &Path, dest: &Path) -> Result<()> {
    let archive_err = |source| Error::Archive {
        path: dest.to_path_buf(),
        source,
    };
    let pack_err = |source| Error::Pack {
        path: src.to_path_buf(),
        source,
    };

    let file = File::create(dest).map_err(archive_err)?;
    let writer = append_tree(file, src).map_err(pack_err)?;
    writer.sync_all().map_err(archive_err)
}

/// Write `src` as a gzip-compressed tar whose entries are rooted at `.`.
pub fn pack_dir_gz(src: &Path, dest: &Path) -> Result<()> {
    let archive_err = |source| Error::Archive {
        path: dest.to_path_buf(),
        source,
    };
    let pack_err = |source| Error::Pack {
        path: src.to_path_buf(),
        source,
    };

    let file = File::create(dest).map_err(archive_err)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let encoder = append_tree(encoder, src).map_err(pack_err)?;
    let mut file = encoder.finish().map_err(archive_err)?;
    file.flush().map_err(archive_err)
}

fn append_tree<W: Write>(writer: W, src: &Path) -> std::io::Result<W> {
    let mut builder = tar::Builder::new(writer);
    // Log directories routinely hold dangling links
    builder.follow_symlinks(false);
    builder.append_dir_all(".", src)?;
    builder.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContainerId;
    use chrono::TimeZone;
    use std::io::Read;

    fn summary(name: &str) -> ContainerSummary {
        ContainerSummary {
            id: ContainerId::new(format!("{name}-id")),
            name: name.to_string(),
            state: crate::runtime::ContainerState::Running,
            labels: Default::default(),
        }
    }

    #[test]
    fn single_container_names_the_archive() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            archive_name(CollectKind::Log, &[summary("android_1")], at),
            "android_1_log_20240307090501.tar.gz"
        );
    }

    #[test]
    fn several_containers_use_fleet_name() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let targets = [summary("android_1"), summary("android_2")];
        assert_eq!(
            archive_name(CollectKind::Resource, &targets, at),
            "cloudphone_res_20241231235959.tar.gz"
        );
    }

    #[test]
    fn gz_archive_contains_tree() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("hostos")).unwrap();
        std::fs::write(src.path().join("hostos/dmesg.log"), "boot\n").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("x.tar.gz");
        pack_dir_gz(src.path(), &dest).unwrap();

        let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(File::open(&dest).unwrap()));
        let mut found = None;
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            if entry.path().unwrap().ends_with("hostos/dmesg.log") {
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                found = Some(content);
            }
        }
        assert_eq!(found.as_deref(), Some("boot\n"));
    }

    #[test]
    fn pack_missing_source_fails() {
        let out = tempfile::tempdir().unwrap();
        let err = pack_dir(Path::new("/nonexistent/var/log"), &out.path().join("v.tar"))
            .unwrap_err();
        assert!(
            matches!(err, Error::Pack { ref path, .. } if path == Path::new("/nonexistent/var/log")),
            "unexpected error: {err}"
        );
        assert!(err.to_string().starts_with("failed to pack /nonexistent/var/log"));
    }
}
