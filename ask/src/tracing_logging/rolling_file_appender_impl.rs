// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// A file appender that never rolls over. Note that wrapping it in
/// `tracing_appender::non_blocking` loses events when the process exits right after
/// a prompt, so it is used as is.
///
/// # Errors
///
/// If `path_str` has no parent folder or no file name.
pub fn try_create(path_str: &str) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = match path.parent() {
        Some(it) if it.as_os_str().is_empty() => PathBuf::from("."),
        Some(it) => it.to_path_buf(),
        None => {
            return Err(miette::miette!(
                "Can't access the folder of {}. It might not exist.",
                path.display()
            ));
        }
    };

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Can't get a file name from {}.", path.display())
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}
