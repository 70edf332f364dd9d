//! Test helpers: a fake POSIX-shell interpreter and a tracing capture buffer.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Passing this as a venv option makes the fake interpreter fail creation.
pub const FAIL_VENV_FLAG: &str = "--fail-venv";

/// Any specifier containing this marker fails to install.
pub const MISSING_PACKAGE: &str = "thispackagedoesnotexistandshouldfailpipinstall";

/// Handles `-m venv [--without-pip] [opts] DIR` by copying itself into
/// `DIR/bin/python` (plus a `pip` marker), and `-m pip install ARGS` by
/// appending each argument to `DIR/installed.txt`.
const FAKE_PYTHON: &str = r#"here=$(cd "$(dirname "$0")" && pwd)
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
    shift 2
    target=""
    with_pip=1
    for arg in "$@"; do
        case "$arg" in
            --without-pip) with_pip=0 ;;
            --fail-venv) echo "simulated venv failure" >&2; exit 1 ;;
            -*) ;;
            *) target="$arg" ;;
        esac
    done
    mkdir -p "$target/bin" || exit 1
    cp "$0" "$target/bin/python" || exit 1
    chmod +x "$target/bin/python" || exit 1
    if [ "$with_pip" = 1 ]; then : > "$target/bin/pip"; fi
    exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
    if [ ! -e "$here/pip" ]; then
        echo "$0: No module named pip" >&2
        exit 1
    fi
    shift 3
    for arg in "$@"; do
        case "$arg" in
            *doesnotexist*)
                echo "ERROR: No matching distribution found for $arg" >&2
                exit 1
                ;;
        esac
    done
    for arg in "$@"; do echo "$arg" >> "$here/../installed.txt"; done
    exit 0
fi
exit 0
"#;

/// Handles `venv DIR --python BASE [--seed] [opts]` by copying BASE (a fake
/// interpreter) into `DIR/bin/python`, and `pip install --python PY ARGS` by
/// appending each argument to `installed.txt` next to PY's `bin` directory.
const FAKE_UV: &str = r#"if [ "$1" = "venv" ]; then
    target="$2"
    shift 2
    base=""
    seed=0
    while [ $# -gt 0 ]; do
        case "$1" in
            --python) base="$2"; shift 2 ;;
            --seed) seed=1; shift ;;
            --fail-venv) echo "simulated uv venv failure" >&2; exit 1 ;;
            *) shift ;;
        esac
    done
    if [ -z "$base" ]; then echo "uv: missing --python" >&2; exit 2; fi
    mkdir -p "$target/bin" || exit 1
    cp "$base" "$target/bin/python" || exit 1
    chmod +x "$target/bin/python" || exit 1
    if [ "$seed" = 1 ]; then : > "$target/bin/pip"; fi
    exit 0
fi
if [ "$1" = "pip" ] && [ "$2" = "install" ] && [ "$3" = "--python" ]; then
    env_bin=$(dirname "$4")
    shift 4
    for arg in "$@"; do
        case "$arg" in
            *doesnotexist*)
                echo "error: No solution found when resolving dependencies: $arg" >&2
                exit 1
                ;;
        esac
    done
    for arg in "$@"; do echo "$arg" >> "$env_bin/../installed.txt"; done
    exit 0
fi
echo "uv: unsupported invocation: $*" >&2
exit 2
"#;

/// Write an executable `#!/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Install the fake interpreter as `dir/python3`.
#[cfg(unix)]
pub fn fake_python(dir: &Path) -> PathBuf {
    write_script(dir, "python3", FAKE_PYTHON)
}

/// Install the fake `uv` as `dir/uv`.
#[cfg(unix)]
pub fn fake_uv(dir: &Path) -> PathBuf {
    write_script(dir, "uv", FAKE_UV)
}

/// Arguments the fake installer received in the environment rooted at `root`.
pub fn installed_args(root: &Path) -> Vec<String> {
    std::fs::read_to_string(root.join("installed.txt"))
        .map(|s| s.lines().map(String::from).collect())
        .unwrap_or_default()
}

#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with an INFO-level subscriber and return what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, buf.contents())
}
