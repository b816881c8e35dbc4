//! Filesystem side of the generator: mirroring static files and turning a
//! tree of Markdown documents into HTML pages.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::page::{extract_title, render_page};

/// Outcome of a batch page generation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub generated: usize,
    pub failed: usize,
}

/// Replace `dst` with a recursive copy of `src`.
pub fn copy_directory(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        warn!(path = %dst.display(), "removing existing directory");
        fs::remove_dir_all(dst).map_err(Error::io(dst))?;
    }
    info!(from = %src.display(), to = %dst.display(), "copying directory");
    copy_recursive(src, dst)
}

fn copy_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(Error::io(dst))?;
    for entry in fs::read_dir(src).map_err(Error::io(src))? {
        let entry = entry.map_err(Error::io(src))?;
        let path = entry.path();
        let dst_path = dst.join(entry.file_name());
        // Symlinks are not followed into directories
        let file_type = entry.file_type().map_err(Error::io(&path))?;
        if file_type.is_dir() {
            copy_recursive(&path, &dst_path)?;
        } else if file_type.is_symlink() && path.is_dir() {
            warn!(path = %path.display(), "skipping symlinked directory");
        } else {
            info!(from = %path.display(), to = %dst_path.display(), "copying file");
            fs::copy(&path, &dst_path).map_err(Error::io(&path))?;
        }
    }
    Ok(())
}

/// Convert one Markdown file into an HTML page at `dest`.
pub fn generate_page(from: &Path, template: &Path, dest: &Path, base_path: &str) -> Result<()> {
    info!(from = %from.display(), to = %dest.display(), "generating page");

    let markdown = fs::read_to_string(from).map_err(Error::io(from))?;
    let template = fs::read_to_string(template).map_err(Error::io(template))?;

    let content = crate::markdown_to_html(&markdown)?;
    let title = extract_title(&markdown)?;
    let page = render_page(&template, &title, &content, base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    fs::write(dest, page).map_err(Error::io(dest))
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout into `dest_dir`.
///
/// A document that fails to convert is logged and skipped; only a missing
/// template or an unreadable content tree stops the batch.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &Path,
    dest_dir: &Path,
    base_path: &str,
) -> Result<BuildReport> {
    if !template.is_file() {
        return Err(Error::TemplateNotFound(template.to_path_buf()));
    }

    let mut files = Vec::new();
    scan_markdown_files(content_dir, &mut files)?;
    files.sort();

    let mut report = BuildReport::default();
    for md_file in files {
        let Ok(relative) = md_file.strip_prefix(content_dir) else {
            continue;
        };
        let dest = dest_dir.join(relative).with_extension("html");

        match generate_page(&md_file, template, &dest, base_path) {
            Ok(()) => report.generated += 1,
            Err(e) => {
                error!(path = %md_file.display(), error = %e, "failed to generate page");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

fn scan_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(Error::io(dir))? {
        let entry = entry.map_err(Error::io(dir))?;
        let path = entry.path();
        if entry.file_type().map_err(Error::io(&path))?.is_dir() {
            scan_markdown_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

/// Copy static assets, then generate every page.
pub fn build_site(config: &Config) -> Result<BuildReport> {
    copy_directory(&config.static_dir, &config.output_dir)?;
    let report = generate_pages_recursive(
        &config.content_dir,
        &config.template,
        &config.output_dir,
        &config.base_path,
    )?;
    info!(
        generated = report.generated,
        failed = report.failed,
        "site build finished"
    );
    Ok(report)
}
