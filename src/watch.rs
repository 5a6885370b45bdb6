use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use notify::{DebouncedEvent, RecursiveMode, Watcher};

use crate::compile::Compiler;
use crate::walk;

/// Recompiles shader sources under `root` as they change, until the
/// process is terminated.
pub fn watch(compiler: &Compiler, root: &Path) -> anyhow::Result<()> {
    let (sender, receiver) = mpsc::channel();
    let debounce = Duration::from_millis(200);

    let mut watcher = notify::PollWatcher::new(sender, debounce)
        .context("could not start file watcher")?;
    watcher
        .watch(root, RecursiveMode::Recursive)
        .with_context(|| format!("could not watch '{}'", root.display()))?;

    info!("watching {} for changes", root.display());

    while let Ok(event) = receiver.recv() {
        match event {
            DebouncedEvent::Create(path) | DebouncedEvent::Write(path) => {
                recompile(compiler, &path);
            }
            DebouncedEvent::Rename(_, path) => recompile(compiler, &path),
            _ => continue,
        }
    }

    Ok(())
}

fn recompile(compiler: &Compiler, path: &Path) {
    if !walk::is_shader_source(path) || !path.is_file() {
        return;
    }

    match compiler.compile(path) {
        Ok(output) => info!("compiled {} -> {}", path.display(), output.display()),
        Err(error) => error!("could not compile {}: {:#}", path.display(), error),
    }
}
