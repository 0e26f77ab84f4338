//! WGSL shader loading
//!
//! Shader modules are created inside a validation error scope so a typo in a
//! `.wgsl` file surfaces as a [`ShaderError`] from the slide's `init` instead
//! of an uncaptured-error panic later on.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the WGSL text comes from
#[derive(Debug, Clone)]
pub enum ShaderSource<'a> {
    /// WGSL embedded in the binary
    Inline(&'a str),
    /// WGSL read from disk at init time
    File(PathBuf),
}

impl<'a> ShaderSource<'a> {
    /// Shader file at `dir/name`
    pub fn file(dir: impl AsRef<Path>, name: &str) -> Self {
        ShaderSource::File(dir.as_ref().join(name))
    }
}

/// Shader loading error
#[derive(Debug)]
pub enum ShaderError {
    /// The shader file could not be read
    Io { path: PathBuf, source: io::Error },
    /// WGSL failed to parse or validate
    Compile { label: String, message: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "Failed to read shader {}: {}", path.display(), source)
            }
            ShaderError::Compile { label, message } => {
                write!(f, "Failed to compile shader '{}': {}", label, message)
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            ShaderError::Compile { .. } => None,
        }
    }
}

/// Read the WGSL text for `source`
pub fn read_source<'a>(source: &ShaderSource<'a>) -> Result<Cow<'a, str>, ShaderError> {
    match source {
        ShaderSource::Inline(code) => Ok(Cow::Borrowed(*code)),
        ShaderSource::File(path) => fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| ShaderError::Io {
                path: path.clone(),
                source,
            }),
    }
}

/// Create a shader module, reporting WGSL errors instead of panicking
pub fn load_shader(
    device: &wgpu::Device,
    label: &str,
    source: &ShaderSource<'_>,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let code = read_source(source)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(code),
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(ShaderError::Compile {
            label: label.to_string(),
            message: err.to_string(),
        }),
        None => {
            log::debug!("Compiled shader '{}'", label);
            Ok(module)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_inline() {
        let src = ShaderSource::Inline("@vertex fn vs_main() {}");
        assert_eq!(read_source(&src).unwrap(), "@vertex fn vs_main() {}");
    }

    #[test]
    fn test_read_missing_file() {
        let src = ShaderSource::file("/definitely/not/here", "missing.wgsl");
        let err = read_source(&src).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.to_string().contains("missing.wgsl"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_read_file() {
        let dir = std::env::temp_dir().join("learngfx_shader_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("ok.wgsl"), "// empty").unwrap();

        let src = ShaderSource::file(&dir, "ok.wgsl");
        assert_eq!(read_source(&src).unwrap(), "// empty");
    }

    #[test]
    fn test_compile_error_display() {
        let err = ShaderError::Compile {
            label: "Triangle".to_string(),
            message: "expected ';'".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to compile shader 'Triangle': expected ';'");
        assert!(err.source().is_none());
    }
}
