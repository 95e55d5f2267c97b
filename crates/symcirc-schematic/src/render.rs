//! Output files: raw tikz, standalone LaTeX, and PDF/SVG/PNG through
//! external tools.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::options::SchematicOptions;
use crate::schematic::Schematic;

/// External programs used to turn LaTeX into graphics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub latex: String,
    pub pdf2svg: String,
    /// ImageMagick converters, tried in order.
    pub convert: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            latex: "pdflatex".to_string(),
            pdf2svg: "pdf2svg".to_string(),
            convert: vec!["convert".to_string(), "im-convert".to_string()],
        }
    }
}

/// Output type selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Bare `tikzpicture`, for inclusion in another document.
    Pytex,
    Tex,
    Pdf,
    Svg,
    Png,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(OsStr::to_str).unwrap_or_default();
        match ext {
            "pytex" => Ok(Format::Pytex),
            "tex" => Ok(Format::Tex),
            "pdf" => Ok(Format::Pdf),
            "svg" => Ok(Format::Svg),
            "png" => Ok(Format::Png),
            _ => Err(Error::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Wrap a tikzpicture in a standalone document.
pub fn standalone(tikz: &str) -> String {
    format!(
        "\\documentclass[a4paper]{{standalone}}\n\\usepackage{{circuitikz}}\n\\begin{{document}}\n{}\\end{{document}}",
        tikz
    )
}

fn run(program: &str, args: &[&OsStr], dir: Option<&Path>, output: &Path) -> Result<()> {
    let failed = |message: String| Error::Render {
        command: program.to_string(),
        output: output.to_path_buf(),
        message,
    };

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }
    info!("running {:?}", command);

    let result = command.output().map_err(|e| failed(e.to_string()))?;
    if !result.status.success() {
        return Err(failed(format!("exited with {}", result.status)));
    }
    if !output.exists() {
        return Err(failed("no output file".to_string()));
    }
    Ok(())
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        debug!("could not remove {}: {}", path.display(), e);
    }
}

impl Schematic {
    /// Write the schematic to `path` using the default tools.
    pub fn draw(&mut self, path: impl AsRef<Path>, options: &SchematicOptions) -> Result<()> {
        self.draw_with(path, options, &RenderConfig::default())
    }

    pub fn draw_with(
        &mut self,
        path: impl AsRef<Path>,
        options: &SchematicOptions,
        config: &RenderConfig,
    ) -> Result<()> {
        let path = path.as_ref();
        if !self.has_hints() {
            return Err(Error::NoHints);
        }
        let format = Format::from_path(path)?;
        let tikz = self.tikz(options)?;

        if format == Format::Pytex {
            fs::write(path, tikz)?;
            return Ok(());
        }

        let tex = path.with_extension("tex");
        fs::write(&tex, standalone(&tikz))?;
        if format == Format::Tex {
            return Ok(());
        }

        let pdf = path.with_extension("pdf");
        let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
        let tex_name = tex.file_name().unwrap_or(tex.as_os_str());
        let latex = run(
            &config.latex,
            &[OsStr::new("-interaction"), OsStr::new("batchmode"), tex_name],
            dir,
            &pdf,
        );
        if !options.keep_intermediate {
            for ext in ["aux", "log", "tex"] {
                remove_quietly(&path.with_extension(ext));
            }
        }
        latex?;

        let converted = match format {
            Format::Svg => run(&config.pdf2svg, &[pdf.as_os_str(), path.as_os_str()], None, path),
            Format::Png => convert_png(&pdf, path, options.oversample, config),
            _ => return Ok(()),
        };
        if !options.keep_intermediate {
            remove_quietly(&pdf);
        }
        converted
    }
}

fn convert_png(pdf: &Path, png: &Path, oversample: f64, config: &RenderConfig) -> Result<()> {
    let density = format!("{}", (oversample * 100.0).round());
    let mut last = Error::Render {
        command: "convert".to_string(),
        output: png.to_path_buf(),
        message: "no converter configured".to_string(),
    };
    for program in &config.convert {
        let args = [
            OsStr::new("-density"),
            OsStr::new(&density),
            pdf.as_os_str(),
            png.as_os_str(),
        ];
        match run(program, &args, None, png) {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!("{}", e);
                last = e;
            }
        }
    }
    Err(last)
}
