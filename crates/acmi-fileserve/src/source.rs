//! Loads an ACMI recording from disk, transparently decompressing gzip
//! or zip containers. Runs on a blocking task since `flate2`/`zip` are
//! synchronous readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

pub fn load(path: &Path) -> Result<Vec<u8>> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension {
        "gz" => load_gzip(path),
        "zip" => load_zip(path),
        _ => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
    }
}

fn load_gzip(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut buf = Vec::new();
    decoder
        .read_to_end(&mut buf)
        .with_context(|| format!("decompressing {}", path.display()))?;
    Ok(buf)
}

fn load_zip(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("reading zip archive {}", path.display()))?;
    anyhow::ensure!(archive.len() > 0, "zip archive {} is empty", path.display());
    let mut entry = archive.by_index(0)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}
