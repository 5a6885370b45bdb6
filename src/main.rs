mod compile;
mod walk;
mod watch;

use std::path::{Path, PathBuf};

use compile::Compiler;

#[macro_use]
extern crate tracing;

/// Matches the directory the tool originally hardcoded.
const DEFAULT_ROOT: &str = "shader";

const USAGE: &str = "usage: shader_batch [ROOT] [--strict] [--watch]";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = Options::parse(std::env::args().skip(1))?;
    let compiler = Compiler::new(compile::GLSLANG_VALIDATOR);

    let summary = compile_tree(&compiler, &options.root);
    info!(
        compiled = summary.compiled,
        failed = summary.failed,
        "finished"
    );

    if options.strict && summary.failed > 0 {
        return Err(anyhow::format_err!(
            "{} shader(s) failed to compile",
            summary.failed
        ));
    }

    if options.watch {
        watch::watch(&compiler, &options.root)?;
    }

    Ok(())
}

/// One compiler invocation per walked source, strictly in sequence. A file
/// that fails to compile is reported and the loop moves on to the next one.
fn compile_tree(compiler: &Compiler, root: &Path) -> Summary {
    let mut summary = Summary::default();

    for source in walk::shader_sources(root) {
        match compiler.compile(&source) {
            Ok(output) => {
                info!("compiled {} -> {}", source.display(), output.display());
                summary.compiled += 1;
            }
            Err(error) => {
                error!("could not compile {}: {:#}", source.display(), error);
                summary.failed += 1;
            }
        }
    }

    summary
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Summary {
    compiled: usize,
    failed: usize,
}

#[derive(Debug)]
struct Options {
    root: PathBuf,
    strict: bool,
    watch: bool,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
        let mut root = None;
        let mut strict = false;
        let mut watch = false;

        for arg in args {
            match arg.as_str() {
                "--strict" => strict = true,
                "--watch" => watch = true,
                _ if arg.starts_with('-') => {
                    return Err(anyhow::format_err!("unknown option '{arg}'\n{USAGE}"))
                }
                _ if root.is_some() => {
                    return Err(anyhow::format_err!("unexpected argument '{arg}'\n{USAGE}"))
                }
                _ => root = Some(PathBuf::from(arg)),
            }
        }

        Ok(Options {
            root: root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            strict,
            watch,
        })
    }
}
