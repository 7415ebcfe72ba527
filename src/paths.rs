use std::path::{Path, PathBuf};

const WATCH_ROOT: &str = "/watch";

/// Best-effort container detection: `/.dockerenv` exists inside Docker
/// containers; older runtimes mention docker in `/proc/1/cgroup`.
pub fn running_in_container() -> bool {
    if Path::new("/.dockerenv").exists() {
        return true;
    }
    std::fs::read_to_string("/proc/1/cgroup")
        .map(|data| data.contains("docker"))
        .unwrap_or(false)
}

/// When this tool itself runs in a container, the host paths from the config
/// are only visible under the `/watch` bind mount.
pub fn resolve_local_path(path: &str) -> PathBuf {
    rewrite_for_container(path, running_in_container())
}

fn rewrite_for_container(path: &str, in_container: bool) -> PathBuf {
    if in_container && !path.starts_with("/watch/") {
        // join() would discard the prefix for absolute paths
        return Path::new(WATCH_ROOT).join(path.trim_start_matches('/'));
    }
    PathBuf::from(path)
}
