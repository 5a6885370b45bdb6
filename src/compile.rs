use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

/// Default executable, resolved through `PATH`.
pub const GLSLANG_VALIDATOR: &str = "glslangValidator";

/// Suffix appended to the full source file name, original extension included.
const OUTPUT_SUFFIX: &str = ".spv";

/// Drives one external compiler executable, one source file at a time.
pub struct Compiler {
    executable: PathBuf,
}

impl Compiler {
    pub fn new(executable: impl Into<PathBuf>) -> Compiler {
        Compiler {
            executable: executable.into(),
        }
    }

    /// `a/x.vert` becomes `a/x.vert.spv`; the source path itself is untouched.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let mut name = source.file_name().unwrap_or_default().to_os_string();
        name.push(OUTPUT_SUFFIX);
        source.with_file_name(name)
    }

    /// Runs `<executable> -V <source> -o <output>` and blocks until it exits.
    ///
    /// A non-zero exit becomes an error carrying the tool's stderr text. A
    /// missing executable or a permissions failure surfaces the same way:
    /// a single per-file error, never a distinct kind.
    pub fn compile(&self, source: &Path) -> anyhow::Result<PathBuf> {
        let output_path = self.output_path(source);

        let output = Command::new(&self.executable)
            .arg("-V")
            .arg(source)
            .arg("-o")
            .arg(&output_path)
            .output()
            .with_context(|| format!("could not run '{}'", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::format_err!(
                "compiler exited with {}: {}",
                output.status,
                stderr.trim_end()
            ));
        }

        Ok(output_path)
    }
}

impl Default for Compiler {
    fn default() -> Compiler {
        Compiler::new(GLSLANG_VALIDATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn output_path_appends_suffix_after_the_stage_extension() {
        let compiler = Compiler::default();
        assert_eq!(
            compiler.output_path(Path::new("a/x.vert")),
            PathBuf::from("a/x.vert.spv")
        );
        assert_eq!(
            compiler.output_path(Path::new("a/b/y.frag")),
            PathBuf::from("a/b/y.frag.spv")
        );
    }

    #[cfg(unix)]
    fn stub_compiler(name: &str, script: &str) -> (PathBuf, PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!(
            "shader_batch_compile_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let stub = dir.join("fake-glslang");
        fs::write(&stub, script).unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        let source = dir.join("tri.vert");
        fs::write(&source, b"void main() {}\n").unwrap();

        (stub, source)
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_reports_the_output_path() {
        let (stub, source) = stub_compiler("ok", "#!/bin/sh\nexit 0\n");
        let compiler = Compiler::new(&stub);

        let output = compiler.compile(&source).unwrap();
        assert_eq!(output, compiler.output_path(&source));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_carries_the_captured_stderr() {
        let (stub, source) = stub_compiler("err", "#!/bin/sh\necho ERR >&2\nexit 1\n");
        let compiler = Compiler::new(&stub);

        let error = compiler.compile(&source).unwrap_err();
        assert!(error.to_string().contains("ERR"), "{error:#}");
    }

    #[test]
    fn missing_executable_is_an_ordinary_per_file_error() {
        let compiler = Compiler::new("shader-batch-no-such-binary");
        assert!(compiler.compile(Path::new("tri.vert")).is_err());
    }
}
