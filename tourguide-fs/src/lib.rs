//! UTF-8 path file helpers built on `cap-std` and `camino`.
//!
//! Every helper resolves its path against an ambient base directory (the
//! filesystem root, a Windows drive prefix, or `.`) and performs the actual
//! IO through a capability-scoped [`fs_utf8::Dir`].
#![forbid(unsafe_code)]

use std::io::{self, Read};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, relative) = ambient_base(path)?;
    dir.open(&relative)
}

/// Read a whole file into a string.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Create or truncate a file, creating missing parent directories first.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, relative) = ambient_base(path)?;
    if relative.file_name().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        ));
    }
    if let Some(parent) = relative.parent()
        && !parent.as_str().is_empty()
    {
        dir.create_dir_all(parent)?;
    }
    dir.create(&relative)
}

/// Whether `path` exists and is a regular file.
///
/// A missing path yields an [`io::ErrorKind::NotFound`] error so callers can
/// tell it apart from a path that exists but is something else.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, relative) = ambient_base(path)?;
    dir.metadata(&relative).map(|meta| meta.is_file())
}

/// Split `path` into an opened ambient base directory and the remainder.
fn ambient_base(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let base = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if base.as_str() == "." {
        path.to_path_buf()
    } else {
        path.strip_prefix(&base)
            .map_err(|_| io::Error::other(format!("failed to strip {base} from {path}")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}
