use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

/// Write an executable stand-in for exiftool. Files whose name contains
/// `IMG001` report `create_date`; anything else makes it exit non-zero.
#[cfg(unix)]
pub fn setup_fake_exiftool(temp_dir: &TempDir, create_date: &str) -> ChildPath {
    use std::os::unix::fs::PermissionsExt;

    let script = temp_dir.child("fake-exiftool");
    script
        .write_str(&format!(
            r##"#!/bin/sh
case "$1" in
  -ver) echo 12.76 ;;
  *IMG001*) echo "Camera Model Name               : NIKON Z 6_2"
            echo "Create Date                     : {create_date}" ;;
  *) echo "Error: File not found - $1" >&2; exit 1 ;;
esac
"##
        ))
        .unwrap();
    let mut permissions = std::fs::metadata(script.path()).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(script.path(), permissions).unwrap();
    script
}

/// Write a stand-in for `exiftool -stay_open True -@ -`. Arguments arrive on
/// stdin one per line and each `-execute` is answered with the metadata of
/// the last file named, followed by the `{ready}` marker. Files whose name
/// contains `IMG001` report `create_date`. After `max_requests` answers the
/// process exits, as a crashed exiftool would; 0 means never.
#[cfg(unix)]
pub fn setup_fake_stay_open_exiftool(
    temp_dir: &TempDir,
    create_date: &str,
    max_requests: usize,
) -> ChildPath {
    use std::os::unix::fs::PermissionsExt;

    let script = temp_dir.child("fake-exiftool-stay-open");
    script
        .write_str(&format!(
            r##"#!/bin/sh
file=""
served=0
while IFS= read -r line; do
  case "$line" in
    -execute*)
      case "$file" in
        *IMG001*) echo "Create Date                     : {create_date}" ;;
      esac
      echo "{{ready${{line#-execute}}}}"
      file=""
      served=$((served + 1))
      if [ {max_requests} -ne 0 ] && [ "$served" -ge {max_requests} ]; then
        exit 0
      fi ;;
    -stay_open|False|True) ;;
    -*) ;;
    *) file="$line" ;;
  esac
done
"##
        ))
        .unwrap();
    let mut permissions = std::fs::metadata(script.path()).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(script.path(), permissions).unwrap();
    script
}

pub fn setup_source(temp_dir: &TempDir, names: &[&str]) -> ChildPath {
    let source = temp_dir.child("source");
    source.create_dir_all().unwrap();
    for name in names {
        source.child(name).write_str(name).unwrap();
    }
    source
}
